pub use coroutines_common::*;

mod error;
pub use error::*;

mod node;
pub use node::*;

mod child;
pub use child::*;

mod coroutine;
pub use coroutine::*;

mod handle;
pub use handle::*;

mod config;
pub use config::*;

mod scheduler;
pub use scheduler::*;

mod event;
pub use event::*;

mod semaphore;
pub use semaphore::*;

mod snapshot;

// Node types, usually assembled through `builder`
mod behavior_nodes;
pub use behavior_nodes::*;

pub mod builder;

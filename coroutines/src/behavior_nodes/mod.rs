// Leaf
mod action_node;
pub use action_node::*;

mod wait_node;
pub use wait_node::*;

// Decorator
mod invert_node;
pub use invert_node::*;

mod scope_node;
pub use scope_node::*;

mod branch_node;
pub use branch_node::*;

mod repeat_node;
pub use repeat_node::*;

// Control
mod sequence_node;
pub use sequence_node::*;

mod select_node;
pub use select_node::*;

mod parallel_node;
pub use parallel_node::*;

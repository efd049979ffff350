mod status;
pub use status::*;

mod coroutine_state;
pub use coroutine_state::*;

mod behavior;
pub use behavior::*;

mod behavior_interface;
pub use behavior_interface::*;

mod snapshot;
pub use snapshot::*;

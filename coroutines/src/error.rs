use coroutines_common::{CoroutineId, CoroutineState, Status};

/// Contract violations.
///
/// Logical failures are never errors, they are reported as `Status::Failure`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoroutineError {
    #[error("node `{node}` ticked after it finished with {status:?}")]
    NodeFinished { node: String, status: Status },

    #[error("coroutine {id} ticked after it finished with {state:?}")]
    CoroutineFinished {
        id: CoroutineId,
        state: CoroutineState,
    },
}

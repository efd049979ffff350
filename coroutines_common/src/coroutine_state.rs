use crate::Status;

/// Identity assigned by the scheduler.
///
/// Identities are handed out in increasing order, so ordering by identity
/// is the same as ordering by start order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct CoroutineId(pub u64);

impl std::fmt::Display for CoroutineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle of a coroutine.
///
/// `Created -> Running -> {Succeeded, Failed, Aborted}`
///
/// Terminal states are sticky.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum CoroutineState {
    /// Started on the scheduler but not ticked yet.
    Created,
    Running,
    Succeeded,
    Failed,
    /// Terminated by an explicit abort request.
    Aborted,
}

impl CoroutineState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            CoroutineState::Succeeded | CoroutineState::Failed | CoroutineState::Aborted
        )
    }
}

impl From<Status> for CoroutineState {
    fn from(status: Status) -> Self {
        match status {
            Status::Success => CoroutineState::Succeeded,
            Status::Failure => CoroutineState::Failed,
            Status::Running => CoroutineState::Running,
        }
    }
}

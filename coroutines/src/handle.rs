use coroutines_common::{CoroutineId, CoroutineState};

/// Observes a coroutine started on a [`crate::Scheduler`].
///
/// The handle keeps reporting the last state after the coroutine was removed.
#[derive(Debug, Clone)]
pub struct CoroutineHandle {
    id: CoroutineId,
    state: tokio::sync::watch::Receiver<CoroutineState>,
}

impl CoroutineHandle {
    pub(crate) fn new(id: CoroutineId, state: tokio::sync::watch::Receiver<CoroutineState>) -> Self {
        Self { id, state }
    }

    pub fn id(&self) -> CoroutineId {
        self.id
    }

    pub fn state(&self) -> CoroutineState {
        *self.state.borrow()
    }

    pub fn is_finished(&self) -> bool {
        self.state().is_terminal()
    }
}

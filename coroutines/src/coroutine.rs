use coroutines_common::{CoroutineId, CoroutineSnapshot, CoroutineState};

use crate::{BoxedNode, Child, CoroutineError, CoroutineHandle, Scheduler, snapshot};

/// Invoked once, after the tick pass in which the coroutine left `Running`.
pub type OnComplete<S> = Box<dyn FnOnce(CoroutineState, &mut Scheduler<S>)>;

/// One running instance of a node tree.
pub struct Coroutine<S> {
    id: CoroutineId,
    root: Child<S>,
    state: tokio::sync::watch::Sender<CoroutineState>,
    on_complete: Option<OnComplete<S>>,
}

impl<S> Coroutine<S> {
    pub fn new(id: CoroutineId, root: BoxedNode<S>) -> Self {
        let (state, _) = tokio::sync::watch::channel(CoroutineState::Created);
        Self {
            id,
            root: Child::new(root),
            state,
            on_complete: None,
        }
    }

    pub fn id(&self) -> CoroutineId {
        self.id
    }

    pub fn state(&self) -> CoroutineState {
        *self.state.borrow()
    }

    pub fn handle(&self) -> CoroutineHandle {
        CoroutineHandle::new(self.id, self.state.subscribe())
    }

    pub fn root(&self) -> &Child<S> {
        &self.root
    }

    pub(crate) fn set_on_complete(&mut self, on_complete: OnComplete<S>) {
        self.on_complete = Some(on_complete);
    }

    pub(crate) fn take_on_complete(&mut self) -> Option<OnComplete<S>> {
        self.on_complete.take()
    }

    /// Ticks the root node.
    ///
    /// A coroutine in a terminal state rejects the tick. If the tree violates
    /// the node contract, it is aborted and the coroutine settles as `Failed`.
    #[tracing::instrument(level = "trace", name = "Coroutine::tick", skip(self, shared), fields(id = %self.id), ret)]
    pub fn tick(&mut self, dt: f64, shared: &mut S) -> Result<CoroutineState, CoroutineError> {
        let state = self.state();
        if state.is_terminal() {
            return Err(CoroutineError::CoroutineFinished { id: self.id, state });
        }

        match self.root.tick(dt, shared) {
            Ok(status) => {
                let state = CoroutineState::from(status);
                self.state.send_replace(state);
                Ok(state)
            }
            Err(err) => {
                self.root.abort(shared);
                self.state.send_replace(CoroutineState::Failed);
                Err(err)
            }
        }
    }

    /// Aborts the running tree and settles as `Aborted`.
    ///
    /// Returns `false`, and does nothing, when the coroutine already finished.
    pub fn abort(&mut self, shared: &mut S) -> bool {
        if self.state().is_terminal() {
            return false;
        }
        self.root.abort(shared);
        self.state.send_replace(CoroutineState::Aborted);
        true
    }

    /// Must not be called while the tree is being ticked, the borrow checker enforces it.
    pub fn snapshot(&self) -> CoroutineSnapshot {
        CoroutineSnapshot {
            id: self.id,
            state: self.state(),
            nodes: snapshot::collect(&self.root),
        }
    }
}

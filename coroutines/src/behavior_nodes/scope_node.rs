use coroutines_common::Status;

use crate::{BoxedNode, Child, CoroutineError, Node};

type OnExit<S> = Box<dyn FnMut(Status, &mut S)>;

/// Runs `on_exit` exactly once when its child stops.
///
/// An aborted child exits with `Failure`. The hook is armed again by a reset.
pub struct ScopeState<S> {
    child: Child<S>,
    on_exit: OnExit<S>,
    exited: bool,
}

impl<S> ScopeState<S> {
    pub fn new<F>(on_exit: F, child: BoxedNode<S>) -> Self
    where
        F: FnMut(Status, &mut S) + 'static,
    {
        Self {
            child: Child::new(child),
            on_exit: Box::new(on_exit),
            exited: false,
        }
    }

    fn exit(&mut self, status: Status, shared: &mut S) {
        if !self.exited {
            self.exited = true;
            (self.on_exit)(status, shared);
        }
    }
}

impl<S> Node<S> for ScopeState<S> {
    fn tick(&mut self, dt: f64, shared: &mut S) -> Result<Status, CoroutineError> {
        let status = self.child.tick(dt, shared)?;
        if status.is_terminal() {
            self.exit(status, shared);
        }
        Ok(status)
    }

    fn reset(&mut self, shared: &mut S) {
        self.child.reset(shared);
        self.exited = false;
    }

    fn abort(&mut self, shared: &mut S) {
        self.child.abort(shared);
        self.exit(Status::Failure, shared);
    }

    fn name(&self) -> &str {
        "Scope"
    }

    fn visit_children(&self, visitor: &mut dyn FnMut(&Child<S>)) {
        visitor(&self.child);
    }
}

/// Gives its child a name in debug snapshots.
pub struct NamedState<S> {
    name: String,
    child: Child<S>,
}

impl<S> NamedState<S> {
    pub fn new(name: impl Into<String>, child: BoxedNode<S>) -> Self {
        Self {
            name: name.into(),
            child: Child::new(child),
        }
    }
}

impl<S> Node<S> for NamedState<S> {
    fn tick(&mut self, dt: f64, shared: &mut S) -> Result<Status, CoroutineError> {
        let _span = tracing::trace_span!("Named::tick", name = %self.name).entered();
        self.child.tick(dt, shared)
    }

    fn reset(&mut self, shared: &mut S) {
        self.child.reset(shared);
    }

    fn abort(&mut self, shared: &mut S) {
        self.child.abort(shared);
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn visit_children(&self, visitor: &mut dyn FnMut(&Child<S>)) {
        visitor(&self.child);
    }
}

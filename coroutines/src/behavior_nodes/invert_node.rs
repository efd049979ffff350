use coroutines_common::Status;

use crate::{BoxedNode, Child, CoroutineError, Node};

/// Converts `Success` into `Failure` and vice versa.
pub struct InvertState<S> {
    child: Child<S>,
}

impl<S> InvertState<S> {
    pub fn new(child: BoxedNode<S>) -> Self {
        Self {
            child: Child::new(child),
        }
    }
}

impl<S> Node<S> for InvertState<S> {
    fn tick(&mut self, dt: f64, shared: &mut S) -> Result<Status, CoroutineError> {
        Ok(self.child.tick(dt, shared)?.invert())
    }

    fn reset(&mut self, shared: &mut S) {
        self.child.reset(shared);
    }

    fn abort(&mut self, shared: &mut S) {
        self.child.abort(shared);
    }

    fn name(&self) -> &str {
        "Invert"
    }

    fn visit_children(&self, visitor: &mut dyn FnMut(&Child<S>)) {
        visitor(&self.child);
    }
}

/// Ignores failures and returns `Success`.
pub struct AlwaysSucceedState<S> {
    child: Child<S>,
}

impl<S> AlwaysSucceedState<S> {
    pub fn new(child: BoxedNode<S>) -> Self {
        Self {
            child: Child::new(child),
        }
    }
}

impl<S> Node<S> for AlwaysSucceedState<S> {
    fn tick(&mut self, dt: f64, shared: &mut S) -> Result<Status, CoroutineError> {
        match self.child.tick(dt, shared)? {
            Status::Running => Ok(Status::Running),
            _ => Ok(Status::Success),
        }
    }

    fn reset(&mut self, shared: &mut S) {
        self.child.reset(shared);
    }

    fn abort(&mut self, shared: &mut S) {
        self.child.abort(shared);
    }

    fn name(&self) -> &str {
        "AlwaysSucceed"
    }

    fn visit_children(&self, visitor: &mut dyn FnMut(&Child<S>)) {
        visitor(&self.child);
    }
}

type OnResult<S> = Box<dyn FnMut(bool, &mut S)>;

/// Hands the child's outcome to `on_result`, then succeeds.
///
/// Not called when the child is aborted.
pub struct CaptureResultState<S> {
    child: Child<S>,
    on_result: OnResult<S>,
}

impl<S> CaptureResultState<S> {
    pub fn new<F>(on_result: F, child: BoxedNode<S>) -> Self
    where
        F: FnMut(bool, &mut S) + 'static,
    {
        Self {
            child: Child::new(child),
            on_result: Box::new(on_result),
        }
    }
}

impl<S> Node<S> for CaptureResultState<S> {
    fn tick(&mut self, dt: f64, shared: &mut S) -> Result<Status, CoroutineError> {
        match self.child.tick(dt, shared)? {
            Status::Running => Ok(Status::Running),
            status => {
                (self.on_result)(status == Status::Success, shared);
                Ok(Status::Success)
            }
        }
    }

    fn reset(&mut self, shared: &mut S) {
        self.child.reset(shared);
    }

    fn abort(&mut self, shared: &mut S) {
        self.child.abort(shared);
    }

    fn name(&self) -> &str {
        "CaptureResult"
    }

    fn visit_children(&self, visitor: &mut dyn FnMut(&Child<S>)) {
        visitor(&self.child);
    }
}

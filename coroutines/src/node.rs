use coroutines_common::Status;

use crate::{Child, CoroutineError};

pub type BoxedNode<S> = Box<dyn Node<S>>;

/// A unit of execution in a coroutine tree.
///
/// Suspension is a return value: a node that wants to continue on the next
/// tick returns `Status::Running` and keeps its progress in its own fields.
pub trait Node<S> {
    /// Function is invoked as long as `Status::Running` is returned by the node.
    ///
    /// No longer invoked after `Status::Success` or `Status::Failure` is returned,
    /// unless reset. The owning [`Child`] rejects such calls.
    fn tick(&mut self, dt: f64, shared: &mut S) -> Result<Status, CoroutineError>;

    /// Resets the node, and all of its children, to the newly created state.
    fn reset(&mut self, shared: &mut S);

    /// Function is only invoked when a `Status::Running` node is aborted.
    ///
    /// Composites forward the abort to their children, only running children act on it.
    fn abort(&mut self, _shared: &mut S) {}

    /// Identify your node
    fn name(&self) -> &str;

    /// Index of the active child, for sequence-like composites.
    fn cursor(&self) -> Option<usize> {
        None
    }

    /// Read-only traversal used by debug snapshots.
    fn visit_children(&self, _visitor: &mut dyn FnMut(&Child<S>)) {}
}

impl<S> Node<S> for BoxedNode<S> {
    fn tick(&mut self, dt: f64, shared: &mut S) -> Result<Status, CoroutineError> {
        (**self).tick(dt, shared)
    }

    fn reset(&mut self, shared: &mut S) {
        (**self).reset(shared)
    }

    fn abort(&mut self, shared: &mut S) {
        (**self).abort(shared)
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn cursor(&self) -> Option<usize> {
        (**self).cursor()
    }

    fn visit_children(&self, visitor: &mut dyn FnMut(&Child<S>)) {
        (**self).visit_children(visitor)
    }
}

/// Converts a host action description into a live node.
///
/// Used by `Behavior::Action` when building a tree from a [`coroutines_common::Behavior`].
pub trait ToNode<S> {
    fn to_node(self) -> BoxedNode<S>;
}

impl<S> ToNode<S> for BoxedNode<S> {
    fn to_node(self) -> BoxedNode<S> {
        self
    }
}

#[cfg(test)]
pub mod test_behavior_interface {
    use super::*;

    /// Records the order in which test actions ran.
    #[derive(Debug, Default)]
    pub struct TestShared {
        pub log: Vec<String>,
        pub aborted: Vec<String>,
    }

    /// Leaf that stays `Running` for `times` ticks before reporting `output`.
    #[derive(Debug, Clone)]
    pub enum TestAction {
        Success,
        Failure,
        SuccessAfter { times: usize },
        FailureAfter { times: usize },
        Named { name: &'static str, output: Status },
    }

    impl TestAction {
        fn parts(&self) -> (&'static str, usize, Status) {
            match self {
                TestAction::Success => ("Success", 0, Status::Success),
                TestAction::Failure => ("Failure", 0, Status::Failure),
                TestAction::SuccessAfter { times } => ("SuccessAfter", *times, Status::Success),
                TestAction::FailureAfter { times } => ("FailureAfter", *times, Status::Failure),
                TestAction::Named { name, output } => (*name, 0, *output),
            }
        }
    }

    pub struct TestState {
        action: TestAction,
        ticks: usize,
    }

    impl Node<TestShared> for TestState {
        fn tick(&mut self, _dt: f64, shared: &mut TestShared) -> Result<Status, CoroutineError> {
            let (name, times, output) = self.action.parts();
            shared.log.push(name.to_owned());
            if self.ticks < times {
                self.ticks += 1;
                return Ok(Status::Running);
            }
            Ok(output)
        }

        fn reset(&mut self, _shared: &mut TestShared) {
            self.ticks = 0;
        }

        fn abort(&mut self, shared: &mut TestShared) {
            shared.aborted.push(self.action.parts().0.to_owned());
        }

        fn name(&self) -> &str {
            self.action.parts().0
        }
    }

    impl ToNode<TestShared> for TestAction {
        fn to_node(self) -> BoxedNode<TestShared> {
            Box::new(TestState {
                action: self,
                ticks: 0,
            })
        }
    }
}

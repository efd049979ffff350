use coroutines_common::{Behavior, Status};

use crate::{BoxedNode, CoroutineError, Node, ToNode, behavior_nodes::*};

/// Owns a node and tracks its lifecycle.
///
/// `status` is `None` until the first tick. Once the node reports
/// `Success` or `Failure`, further ticks are rejected until [`Child::reset`].
pub struct Child<S> {
    node: BoxedNode<S>,
    status: Option<Status>,
    aborted: bool,
}

impl<S> Child<S> {
    pub fn new(node: BoxedNode<S>) -> Self {
        Self {
            node,
            status: None,
            aborted: false,
        }
    }

    pub fn from_behavior<A>(behavior: Behavior<A>) -> Self
    where
        A: ToNode<S>,
        S: 'static,
    {
        Self::new(Self::node_from_behavior(behavior))
    }

    pub fn node_from_behavior<A>(behavior: Behavior<A>) -> BoxedNode<S>
    where
        A: ToNode<S>,
        S: 'static,
    {
        match behavior {
            Behavior::Action(action) => action.to_node(),
            Behavior::Wait(target) => Box::new(WaitState::new(target)),
            Behavior::WaitFrames(frames) => Box::new(WaitFramesState::new(frames)),
            Behavior::Yield => Box::new(YieldState::new()),
            Behavior::Invert(child) => Box::new(InvertState::new(Self::node_from_behavior(*child))),
            Behavior::AlwaysSucceed(child) => {
                Box::new(AlwaysSucceedState::new(Self::node_from_behavior(*child)))
            }
            Behavior::Sequence(children) => {
                let children = children
                    .into_iter()
                    .map(Self::node_from_behavior)
                    .collect();
                Box::new(SequenceState::new(children))
            }
            Behavior::Select(children) => {
                let children = children
                    .into_iter()
                    .map(Self::node_from_behavior)
                    .collect();
                Box::new(SelectState::new(children))
            }
            Behavior::Parallel(policy, children) => {
                let children = children
                    .into_iter()
                    .map(Self::node_from_behavior)
                    .collect();
                Box::new(ParallelState::new(policy, children))
            }
            Behavior::Repeat(mode, child) => {
                Box::new(RepeatState::new(mode, Self::node_from_behavior(*child)))
            }
            Behavior::Named(name, child) => {
                Box::new(NamedState::new(name, Self::node_from_behavior(*child)))
            }
        }
    }

    pub fn tick(&mut self, dt: f64, shared: &mut S) -> Result<Status, CoroutineError> {
        if let Some(status) = self.status {
            if status.is_terminal() {
                return Err(CoroutineError::NodeFinished {
                    node: self.node.name().to_owned(),
                    status,
                });
            }
        }

        match self.node.tick(dt, shared) {
            Ok(status) => {
                self.status = Some(status);
                Ok(status)
            }
            Err(err) => {
                // Parts of the subtree may have started, an abort must still reach them
                self.status = Some(Status::Running);
                Err(err)
            }
        }
    }

    /// Aborts the node if it is running, settling it to `Failure`.
    ///
    /// Returns `false` for nodes that never started or already finished.
    pub fn abort(&mut self, shared: &mut S) -> bool {
        if !self.is_running() {
            return false;
        }
        self.node.abort(shared);
        self.status = Some(Status::Failure);
        self.aborted = true;
        true
    }

    /// A running node is aborted before it is reset.
    pub fn reset(&mut self, shared: &mut S) {
        self.abort(shared);
        self.node.reset(shared);
        self.status = None;
        self.aborted = false;
    }

    pub fn status(&self) -> Option<Status> {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == Some(Status::Running)
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_some_and(Status::is_terminal)
    }

    pub fn was_aborted(&self) -> bool {
        self.aborted
    }

    pub fn name(&self) -> &str {
        self.node.name()
    }

    pub fn node(&self) -> &dyn Node<S> {
        self.node.as_ref()
    }
}

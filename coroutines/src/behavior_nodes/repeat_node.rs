use coroutines_common::{RepeatMode, Status};

use crate::{BoxedNode, Child, CoroutineError, Node};

type StopCondition<S> = Box<dyn Fn(&S) -> bool>;

/// Runs its child repeatedly, at most one iteration per tick.
///
/// The child is reset as soon as an iteration ends.
pub struct RepeatState<S> {
    mode: RepeatMode,
    child: Child<S>,
    iterations: u32,
    stop_when: Option<StopCondition<S>>,
}

impl<S> RepeatState<S> {
    pub fn new(mode: RepeatMode, child: BoxedNode<S>) -> Self {
        Self {
            mode,
            child: Child::new(child),
            iterations: 0,
            stop_when: None,
        }
    }

    /// External stop condition, checked at the start of every tick.
    ///
    /// When it holds the running iteration is aborted and the repeat succeeds.
    pub fn stop_when<F>(mut self, condition: F) -> Self
    where
        F: Fn(&S) -> bool + 'static,
    {
        self.stop_when = Some(Box::new(condition));
        self
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    fn next_iteration(&mut self, shared: &mut S) -> Status {
        self.iterations = self.iterations.saturating_add(1);
        if let RepeatMode::Times(times) = self.mode {
            if self.iterations >= times {
                return Status::Success;
            }
        }
        self.child.reset(shared);
        Status::Running
    }
}

impl<S> Node<S> for RepeatState<S> {
    #[tracing::instrument(level = "trace", name = "Repeat::tick", skip_all, fields(iterations = self.iterations), ret)]
    fn tick(&mut self, dt: f64, shared: &mut S) -> Result<Status, CoroutineError> {
        if self.stop_when.as_ref().is_some_and(|stop| stop(shared)) {
            self.child.abort(shared);
            return Ok(Status::Success);
        }
        if matches!(self.mode, RepeatMode::Times(times) if self.iterations >= times) {
            return Ok(Status::Success);
        }

        let status = match (self.child.tick(dt, shared)?, self.mode) {
            (Status::Running, _) => Status::Running,
            (Status::Success, _) => self.next_iteration(shared),
            (Status::Failure, RepeatMode::Times(_)) => Status::Failure,
            (Status::Failure, RepeatMode::UntilFailure) => Status::Success,
            (Status::Failure, RepeatMode::Forever) => self.next_iteration(shared),
        };
        Ok(status)
    }

    fn reset(&mut self, shared: &mut S) {
        self.child.reset(shared);
        self.iterations = 0;
    }

    fn abort(&mut self, shared: &mut S) {
        self.child.abort(shared);
    }

    fn name(&self) -> &str {
        match self.mode {
            RepeatMode::Times(_) => "Repeat",
            RepeatMode::UntilFailure => "RepeatUntilFailure",
            RepeatMode::Forever => "Forever",
        }
    }

    fn visit_children(&self, visitor: &mut dyn FnMut(&Child<S>)) {
        visitor(&self.child);
    }
}

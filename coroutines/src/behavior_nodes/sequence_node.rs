use coroutines_common::Status;

use crate::{BoxedNode, Child, CoroutineError, Node};

/// Runs children strictly in order.
///
/// Within one tick the sequence keeps going through children that finish on
/// their first tick. A child that suspended earlier and finishes now ends the
/// progress for this tick, the next child starts on the following tick.
pub struct SequenceState<S> {
    children: Vec<Child<S>>,
    index: usize,
    optional: bool,
}

impl<S> SequenceState<S> {
    pub fn new(children: Vec<BoxedNode<S>>) -> Self {
        Self {
            children: children.into_iter().map(Child::new).collect(),
            index: 0,
            optional: false,
        }
    }

    /// Stops at the first failing child like a plain sequence, but succeeds.
    pub fn optional(children: Vec<BoxedNode<S>>) -> Self {
        Self {
            optional: true,
            ..Self::new(children)
        }
    }
}

impl<S> Node<S> for SequenceState<S> {
    #[tracing::instrument(level = "trace", name = "Sequence::tick", skip_all, ret)]
    fn tick(&mut self, dt: f64, shared: &mut S) -> Result<Status, CoroutineError> {
        loop {
            let Some(child) = self.children.get_mut(self.index) else {
                return Ok(Status::Success);
            };

            let resumed = child.status().is_some();
            match child.tick(dt, shared)? {
                Status::Success => {
                    self.index += 1;
                    if resumed && self.index < self.children.len() {
                        return Ok(Status::Running);
                    }
                }
                Status::Failure if self.optional => return Ok(Status::Success),
                Status::Failure => return Ok(Status::Failure),
                Status::Running => return Ok(Status::Running),
            }
        }
    }

    fn reset(&mut self, shared: &mut S) {
        self.children
            .iter_mut()
            .for_each(|child| child.reset(shared));
        self.index = 0;
    }

    fn abort(&mut self, shared: &mut S) {
        if let Some(child) = self.children.get_mut(self.index) {
            child.abort(shared);
        }
    }

    fn name(&self) -> &str {
        if self.optional {
            "OptionalSequence"
        } else {
            "Sequence"
        }
    }

    fn cursor(&self) -> Option<usize> {
        Some(self.index)
    }

    fn visit_children(&self, visitor: &mut dyn FnMut(&Child<S>)) {
        self.children.iter().for_each(visitor);
    }
}

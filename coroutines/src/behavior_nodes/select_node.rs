use coroutines_common::Status;

use crate::{BoxedNode, Child, CoroutineError, Node};

/// Tries children in order until one succeeds.
///
/// A failing child hands over to the next one within the same tick.
pub struct SelectState<S> {
    children: Vec<Child<S>>,
    index: usize,
}

impl<S> SelectState<S> {
    pub fn new(children: Vec<BoxedNode<S>>) -> Self {
        Self {
            children: children.into_iter().map(Child::new).collect(),
            index: 0,
        }
    }
}

impl<S> Node<S> for SelectState<S> {
    #[tracing::instrument(level = "trace", name = "Select::tick", skip_all, ret)]
    fn tick(&mut self, dt: f64, shared: &mut S) -> Result<Status, CoroutineError> {
        while let Some(child) = self.children.get_mut(self.index) {
            match child.tick(dt, shared)? {
                Status::Failure => self.index += 1,
                status => return Ok(status),
            }
        }
        Ok(Status::Failure)
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
        "Select"
    }

    fn cursor(&self) -> Option<usize> {
        Some(self.index)
    }

    fn visit_children(&self, visitor: &mut dyn FnMut(&Child<S>)) {
        self.children.iter().for_each(visitor);
    }
}

use coroutines_common::Status;

use crate::{BoxedNode, Child, CoroutineError, Node};

type Condition<S> = Box<dyn Fn(&S) -> bool>;

/// Picks a branch once, on its first tick.
///
/// Without an `otherwise` branch a false condition fails the node.
pub struct BranchState<S> {
    condition: Condition<S>,
    then: Child<S>,
    otherwise: Option<Child<S>>,
    taken: Option<bool>,
}

impl<S> BranchState<S> {
    pub fn new<F>(condition: F, then: BoxedNode<S>) -> Self
    where
        F: Fn(&S) -> bool + 'static,
    {
        Self {
            condition: Box::new(condition),
            then: Child::new(then),
            otherwise: None,
            taken: None,
        }
    }

    pub fn otherwise(mut self, otherwise: BoxedNode<S>) -> Self {
        self.otherwise = Some(Child::new(otherwise));
        self
    }

    fn active(&mut self) -> Option<&mut Child<S>> {
        match self.taken? {
            true => Some(&mut self.then),
            false => self.otherwise.as_mut(),
        }
    }
}

impl<S> Node<S> for BranchState<S> {
    fn tick(&mut self, dt: f64, shared: &mut S) -> Result<Status, CoroutineError> {
        if self.taken.is_none() {
            self.taken = Some((self.condition)(shared));
        }
        match self.active() {
            Some(child) => child.tick(dt, shared),
            None => Ok(Status::Failure),
        }
    }

    fn reset(&mut self, shared: &mut S) {
        self.then.reset(shared);
        if let Some(otherwise) = self.otherwise.as_mut() {
            otherwise.reset(shared);
        }
        self.taken = None;
    }

    fn abort(&mut self, shared: &mut S) {
        if let Some(child) = self.active() {
            child.abort(shared);
        }
    }

    fn name(&self) -> &str {
        "Branch"
    }

    fn cursor(&self) -> Option<usize> {
        self.taken.map(|taken| if taken { 0 } else { 1 })
    }

    fn visit_children(&self, visitor: &mut dyn FnMut(&Child<S>)) {
        visitor(&self.then);
        if let Some(otherwise) = self.otherwise.as_ref() {
            visitor(otherwise);
        }
    }
}

/// Runs its child while a condition holds.
///
/// The condition is checked before every tick of the child. When it stops
/// holding, the running child is aborted and the guard fails.
pub struct GuardState<S> {
    condition: Condition<S>,
    child: Child<S>,
}

impl<S> GuardState<S> {
    pub fn new<F>(condition: F, child: BoxedNode<S>) -> Self
    where
        F: Fn(&S) -> bool + 'static,
    {
        Self {
            condition: Box::new(condition),
            child: Child::new(child),
        }
    }
}

impl<S> Node<S> for GuardState<S> {
    fn tick(&mut self, dt: f64, shared: &mut S) -> Result<Status, CoroutineError> {
        if !(self.condition)(shared) {
            self.child.abort(shared);
            return Ok(Status::Failure);
        }
        self.child.tick(dt, shared)
    }

    fn reset(&mut self, shared: &mut S) {
        self.child.reset(shared);
    }

    fn abort(&mut self, shared: &mut S) {
        self.child.abort(shared);
    }

    fn name(&self) -> &str {
        "Guard"
    }

    fn visit_children(&self, visitor: &mut dyn FnMut(&Child<S>)) {
        visitor(&self.child);
    }
}

use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use coroutines_common::Status;

use crate::{BoxedNode, Child, CoroutineError, Node};

struct SemaphoreInner {
    max_active: usize,
    active: usize,
    queue: VecDeque<u64>,
    next_ticket: u64,
}

enum Acquire {
    Acquired,
    Queued(u64),
}

/// Limits how many [`SemaphoreScopeState`] nodes run their child at once.
///
/// Waiters are served in the order they started waiting.
#[derive(Clone)]
pub struct Semaphore(Rc<RefCell<SemaphoreInner>>);

impl Semaphore {
    /// # Panics
    ///
    /// Panics if `max_active` is 0.
    pub fn new(max_active: usize) -> Self {
        assert!(max_active > 0, "Semaphore needs at least one slot");
        Self(Rc::new(RefCell::new(SemaphoreInner {
            max_active,
            active: 0,
            queue: VecDeque::new(),
            next_ticket: 0,
        })))
    }

    pub fn is_available(&self) -> bool {
        let inner = self.0.borrow();
        inner.active < inner.max_active
    }

    pub fn active(&self) -> usize {
        self.0.borrow().active
    }

    pub fn queued(&self) -> usize {
        self.0.borrow().queue.len()
    }

    /// Queued waiters pick up new slots on their next tick.
    ///
    /// # Panics
    ///
    /// Panics if `max_active` is 0.
    pub fn set_max_active(&self, max_active: usize) {
        assert!(max_active > 0, "Semaphore needs at least one slot");
        let mut inner = self.0.borrow_mut();
        if max_active < inner.active {
            tracing::warn!(
                max_active,
                active = inner.active,
                "Semaphore limit lowered below the number of active holders"
            );
        }
        inner.max_active = max_active;
    }

    fn try_acquire(&self, ticket: Option<u64>) -> Acquire {
        let mut inner = self.0.borrow_mut();
        let first_in_line = match ticket {
            Some(ticket) => inner.queue.front() == Some(&ticket),
            None => inner.queue.is_empty(),
        };

        if first_in_line && inner.active < inner.max_active {
            if ticket.is_some() {
                inner.queue.pop_front();
            }
            inner.active += 1;
            return Acquire::Acquired;
        }

        match ticket {
            Some(ticket) => Acquire::Queued(ticket),
            None => {
                let ticket = inner.next_ticket;
                inner.next_ticket += 1;
                inner.queue.push_back(ticket);
                Acquire::Queued(ticket)
            }
        }
    }

    fn release(&self) {
        let mut inner = self.0.borrow_mut();
        inner.active = inner.active.saturating_sub(1);
    }

    fn leave_queue(&self, ticket: u64) {
        self.0.borrow_mut().queue.retain(|queued| *queued != ticket);
    }
}

/// Runs its child while holding a slot of the semaphore.
pub struct SemaphoreScopeState<S> {
    semaphore: Semaphore,
    child: Child<S>,
    ticket: Option<u64>,
    holding: bool,
}

impl<S> SemaphoreScopeState<S> {
    pub fn new(semaphore: &Semaphore, child: BoxedNode<S>) -> Self {
        Self {
            semaphore: semaphore.clone(),
            child: Child::new(child),
            ticket: None,
            holding: false,
        }
    }

    fn give_back(&mut self) {
        if self.holding {
            self.holding = false;
            self.semaphore.release();
        }
        if let Some(ticket) = self.ticket.take() {
            self.semaphore.leave_queue(ticket);
        }
    }
}

impl<S> Node<S> for SemaphoreScopeState<S> {
    fn tick(&mut self, dt: f64, shared: &mut S) -> Result<Status, CoroutineError> {
        if !self.holding {
            match self.semaphore.try_acquire(self.ticket) {
                Acquire::Acquired => {
                    self.ticket = None;
                    self.holding = true;
                }
                Acquire::Queued(ticket) => {
                    self.ticket = Some(ticket);
                    return Ok(Status::Running);
                }
            }
        }

        let status = self.child.tick(dt, shared)?;
        if status.is_terminal() {
            self.give_back();
        }
        Ok(status)
    }

    fn reset(&mut self, shared: &mut S) {
        self.child.reset(shared);
        self.give_back();
    }

    fn abort(&mut self, shared: &mut S) {
        self.child.abort(shared);
        self.give_back();
    }

    fn name(&self) -> &str {
        "Semaphore"
    }

    fn visit_children(&self, visitor: &mut dyn FnMut(&Child<S>)) {
        visitor(&self.child);
    }
}

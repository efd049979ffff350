use coroutines_common::Status;
use tokio::sync::broadcast::{self, error::TryRecvError};

use crate::{CoroutineError, Node};

/// Broadcast point that coroutines can wait on.
///
/// Only listeners subscribed before a broadcast receive it.
pub struct Event<T> {
    sender: broadcast::Sender<T>,
}

impl<T> Clone for Event<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T> Default for Event<T>
where
    T: Clone,
{
    fn default() -> Self {
        Self::with_capacity(16)
    }
}

impl<T> Event<T>
where
    T: Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// `capacity` values can be broadcast between two ticks of a listener
    /// before it starts skipping the oldest ones.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            sender: broadcast::channel(capacity).0,
        }
    }

    /// Returns the number of listeners that received the value.
    pub fn broadcast(&self, value: T) -> usize {
        match self.sender.send(value) {
            Ok(listeners) => listeners,
            Err(_) => {
                tracing::trace!("Event::broadcast without listeners");
                0
            }
        }
    }

    pub fn listener_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

type EventHandler<T, S> = Box<dyn FnMut(&T, &mut S) -> bool>;

/// Suspends until the event is broadcast after this node started.
///
/// The handler decides the outcome, by default the node succeeds.
pub struct WaitForEventState<T, S> {
    event: Event<T>,
    receiver: Option<broadcast::Receiver<T>>,
    handler: EventHandler<T, S>,
}

impl<T, S> WaitForEventState<T, S> {
    pub fn new(event: &Event<T>) -> Self {
        Self::with_handler(event, |_, _| true)
    }

    pub fn with_handler<F>(event: &Event<T>, handler: F) -> Self
    where
        F: FnMut(&T, &mut S) -> bool + 'static,
    {
        Self {
            event: event.clone(),
            receiver: None,
            handler: Box::new(handler),
        }
    }
}

impl<T, S> Node<S> for WaitForEventState<T, S>
where
    T: Clone,
{
    fn tick(&mut self, _dt: f64, shared: &mut S) -> Result<Status, CoroutineError> {
        let receiver = self
            .receiver
            .get_or_insert_with(|| self.event.sender.subscribe());

        let value = loop {
            match receiver.try_recv() {
                Ok(value) => break value,
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::trace!(skipped, "WaitForEvent lagged behind");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => return Ok(Status::Running),
            }
        };

        // Dropping the receiver unsubscribes
        self.receiver = None;
        Ok(Status::from_bool((self.handler)(&value, shared)))
    }

    fn reset(&mut self, _shared: &mut S) {
        self.receiver = None;
    }

    fn abort(&mut self, _shared: &mut S) {
        self.receiver = None;
    }

    fn name(&self) -> &str {
        "WaitForEvent"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wait_for_event() {
        let event = Event::<u32>::new();
        let mut shared = vec![];
        let mut wait = WaitForEventState::with_handler(&event, |value: &u32, shared: &mut Vec<u32>| {
            shared.push(*value);
            *value > 1
        });

        // Broadcasts before the node started are not seen
        assert_eq!(event.broadcast(0), 0);

        assert_eq!(wait.tick(0.1, &mut shared), Ok(Status::Running));
        assert_eq!(event.listener_count(), 1);
        assert_eq!(wait.tick(0.1, &mut shared), Ok(Status::Running));

        assert_eq!(event.broadcast(5), 1);
        assert_eq!(wait.tick(0.1, &mut shared), Ok(Status::Success));
        assert_eq!(event.listener_count(), 0);
        assert_eq!(shared, vec![5]);
    }

    #[test]
    fn test_wait_for_event_handler_failure() {
        let event = Event::<u32>::new();
        let mut shared = vec![];
        let mut wait = WaitForEventState::with_handler(&event, |value: &u32, _: &mut Vec<u32>| {
            *value > 1
        });

        assert_eq!(wait.tick(0.1, &mut shared), Ok(Status::Running));
        event.broadcast(1);
        assert_eq!(wait.tick(0.1, &mut shared), Ok(Status::Failure));
    }

    #[test]
    fn test_wait_for_event_abort_unregisters() {
        let event = Event::<()>::new();
        let mut wait = WaitForEventState::new(&event);

        assert_eq!(wait.tick(0.1, &mut ()), Ok(Status::Running));
        assert_eq!(event.listener_count(), 1);

        Node::<()>::abort(&mut wait, &mut ());
        assert_eq!(event.listener_count(), 0);
        assert_eq!(event.broadcast(()), 0);
    }

    #[test]
    fn test_multiple_listeners() {
        let event = Event::<()>::new();
        let mut first = WaitForEventState::new(&event);
        let mut second = WaitForEventState::new(&event);

        assert_eq!(first.tick(0.1, &mut ()), Ok(Status::Running));
        assert_eq!(second.tick(0.1, &mut ()), Ok(Status::Running));
        assert_eq!(event.broadcast(()), 2);
        assert_eq!(first.tick(0.1, &mut ()), Ok(Status::Success));
        assert_eq!(second.tick(0.1, &mut ()), Ok(Status::Success));
    }

    #[test]
    fn test_lagging_listener_takes_oldest_kept_value() {
        let event = Event::<u32>::with_capacity(2);
        let mut shared = vec![];
        let mut wait = WaitForEventState::with_handler(&event, |value: &u32, shared: &mut Vec<u32>| {
            shared.push(*value);
            true
        });

        assert_eq!(wait.tick(0.1, &mut shared), Ok(Status::Running));
        for value in 1..=4 {
            event.broadcast(value);
        }
        assert_eq!(wait.tick(0.1, &mut shared), Ok(Status::Success));
        assert_eq!(shared, vec![3]);
    }
}

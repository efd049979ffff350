use std::collections::BTreeMap;

use coroutines_common::{Behavior, CoroutineId, CoroutineSnapshot, CoroutineState};

use crate::{Child, Coroutine, CoroutineHandle, Node, SchedulerConfig, ToNode};

/// Owns the shared state and every active coroutine.
///
/// Coroutines are ticked in the order they were started. A coroutine that
/// reaches a terminal state is removed after the pass, then its completion
/// callback runs, so anything it starts waits for the next pass.
pub struct Scheduler<S> {
    shared: S,
    config: SchedulerConfig,
    coroutines: BTreeMap<CoroutineId, Coroutine<S>>,
    pending_aborts: Vec<CoroutineId>,
    next_id: u64,
}

impl<S> Scheduler<S>
where
    S: 'static,
{
    pub fn new(shared: S) -> Self {
        Self::with_config(shared, SchedulerConfig::default())
    }

    pub fn with_config(shared: S, config: SchedulerConfig) -> Self {
        Self {
            shared,
            config,
            coroutines: BTreeMap::new(),
            pending_aborts: vec![],
            next_id: 1,
        }
    }

    /// Adds a coroutine, it is first ticked by the next [`Scheduler::tick`].
    pub fn start(&mut self, root: impl Node<S> + 'static) -> CoroutineHandle {
        let id = CoroutineId(self.next_id);
        self.next_id += 1;

        let coroutine = Coroutine::new(id, Box::new(root));
        let handle = coroutine.handle();
        tracing::debug!(%id, root = coroutine.root().name(), "coroutine started");
        self.coroutines.insert(id, coroutine);
        handle
    }

    pub fn start_with_callback<F>(&mut self, root: impl Node<S> + 'static, on_complete: F) -> CoroutineHandle
    where
        F: FnOnce(CoroutineState, &mut Scheduler<S>) + 'static,
    {
        let handle = self.start(root);
        if let Some(coroutine) = self.coroutines.get_mut(&handle.id()) {
            coroutine.set_on_complete(Box::new(on_complete));
        }
        handle
    }

    pub fn start_behavior<A>(&mut self, behavior: Behavior<A>) -> CoroutineHandle
    where
        A: ToNode<S>,
    {
        self.start(Child::node_from_behavior(behavior))
    }

    /// Requests an abort, applied at the start of the next tick pass.
    ///
    /// Returns `false` for finished or unknown coroutines and for repeated requests.
    pub fn abort(&mut self, id: CoroutineId) -> bool {
        let active = self
            .coroutines
            .get(&id)
            .is_some_and(|coroutine| !coroutine.state().is_terminal());
        if !active || self.pending_aborts.contains(&id) {
            tracing::trace!(%id, "abort ignored");
            return false;
        }
        self.pending_aborts.push(id);
        true
    }

    /// Aborts every coroutine immediately, callbacks receive `Aborted`.
    ///
    /// Coroutines started by those callbacks are kept, they run on the next tick.
    pub fn abort_all(&mut self) {
        tracing::debug!(count = self.coroutines.len(), "aborting all coroutines");
        self.pending_aborts.clear();
        let mut aborted = vec![];
        for (id, coroutine) in self.coroutines.iter_mut() {
            coroutine.abort(&mut self.shared);
            aborted.push(*id);
        }
        self.finish(aborted);
    }

    /// Advances every active coroutine once.
    #[tracing::instrument(level = "trace", name = "Scheduler::tick", skip(self))]
    pub fn tick(&mut self, dt: f64) {
        let dt = self.config.effective_delta(dt);
        let mut finished = vec![];

        for id in std::mem::take(&mut self.pending_aborts) {
            if let Some(coroutine) = self.coroutines.get_mut(&id) {
                if coroutine.abort(&mut self.shared) {
                    tracing::debug!(%id, "coroutine aborted");
                    finished.push(id);
                }
            }
        }

        for (id, coroutine) in self.coroutines.iter_mut() {
            if coroutine.state().is_terminal() {
                continue;
            }
            match coroutine.tick(dt, &mut self.shared) {
                Ok(state) if state.is_terminal() => finished.push(*id),
                Ok(_) => {}
                Err(err) => {
                    tracing::error!(%id, %err, "coroutine failed a tick");
                    finished.push(*id);
                }
            }
        }

        self.finish(finished);
    }

    fn finish(&mut self, ids: Vec<CoroutineId>) {
        let finished: Vec<_> = ids
            .into_iter()
            .filter_map(|id| self.coroutines.remove(&id))
            .collect();

        for mut coroutine in finished {
            let state = coroutine.state();
            tracing::debug!(id = %coroutine.id(), ?state, "coroutine finished");
            if let Some(on_complete) = coroutine.take_on_complete() {
                on_complete(state, self);
            }
        }
    }
}

impl<S> Scheduler<S> {
    pub fn len(&self) -> usize {
        self.coroutines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coroutines.is_empty()
    }

    pub fn contains(&self, id: CoroutineId) -> bool {
        self.coroutines.contains_key(&id)
    }

    /// `None` once the coroutine was removed, use a [`CoroutineHandle`] to observe the final state.
    pub fn state(&self, id: CoroutineId) -> Option<CoroutineState> {
        self.coroutines.get(&id).map(Coroutine::state)
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn shared(&self) -> &S {
        &self.shared
    }

    pub fn shared_mut(&mut self) -> &mut S {
        &mut self.shared
    }

    pub fn snapshot(&self) -> Vec<CoroutineSnapshot> {
        self.coroutines.values().map(Coroutine::snapshot).collect()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use coroutines_common::Status;
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    use super::*;
    use crate::{
        BoxedNode, CoroutineError, builder,
        test_behavior_interface::{TestAction, TestShared},
    };

    /// Breaks the node contract on every tick.
    struct Rogue;

    impl Node<TestShared> for Rogue {
        fn tick(&mut self, _dt: f64, _shared: &mut TestShared) -> Result<Status, CoroutineError> {
            Err(CoroutineError::NodeFinished {
                node: "Rogue".into(),
                status: Status::Success,
            })
        }

        fn reset(&mut self, _shared: &mut TestShared) {}

        fn name(&self) -> &str {
            "Rogue"
        }
    }

    fn action(name: &'static str) -> BoxedNode<TestShared> {
        Child::node_from_behavior(Behavior::Action(TestAction::Named {
            name,
            output: Status::Success,
        }))
    }

    #[test]
    fn test_start_does_not_tick() {
        let _ignore = tracing_subscriber::Registry::default()
            .with(tracing_forest::ForestLayer::default())
            .try_init();

        let mut scheduler = Scheduler::new(TestShared::default());
        let handle = scheduler.start(action("A"));

        assert_eq!(scheduler.len(), 1);
        assert_eq!(handle.state(), CoroutineState::Created);
        assert!(scheduler.shared().log.is_empty());

        scheduler.tick(0.1);
        assert_eq!(scheduler.shared().log, vec!["A"]);
        assert_eq!(handle.state(), CoroutineState::Succeeded);
        assert!(scheduler.is_empty());
        assert!(!scheduler.contains(handle.id()));
        assert_eq!(scheduler.state(handle.id()), None);
    }

    #[test]
    fn test_ids_increase() {
        let mut scheduler = Scheduler::new(TestShared::default());
        let first = scheduler.start(action("A"));
        let second = scheduler.start(action("B"));
        assert!(first.id() < second.id());
    }

    #[test]
    fn test_error_is_isolated() {
        let mut scheduler = Scheduler::new(TestShared::default());
        let states = Rc::new(RefCell::new(vec![]));

        let recorded = states.clone();
        let rogue = scheduler.start_with_callback(Rogue, move |state, _| {
            recorded.borrow_mut().push(state);
        });
        let other = scheduler.start_behavior(Behavior::Action(TestAction::SuccessAfter { times: 1 }));

        scheduler.tick(0.1);
        assert_eq!(rogue.state(), CoroutineState::Failed);
        assert_eq!(*states.borrow(), vec![CoroutineState::Failed]);
        assert_eq!(other.state(), CoroutineState::Running);

        scheduler.tick(0.1);
        assert_eq!(other.state(), CoroutineState::Succeeded);
    }

    #[test]
    fn test_error_cleans_up_started_nodes() {
        let mut scheduler = Scheduler::new(TestShared::default());
        let slot = crate::Semaphore::new(1);
        let event = crate::Event::<()>::new();

        let handle = scheduler.start(builder::parallel(vec![
            builder::scope(
                |status, shared: &mut TestShared| shared.log.push(format!("exit {status:?}")),
                builder::semaphore_scope(&slot, builder::wait_forever()),
            ),
            builder::wait_for_event(&event),
            Box::new(Rogue),
        ]));

        scheduler.tick(0.1);
        assert_eq!(handle.state(), CoroutineState::Failed);
        assert!(!scheduler.contains(handle.id()));

        // Everything started before the error was aborted
        assert_eq!(slot.active(), 0);
        assert_eq!(event.listener_count(), 0);
        assert_eq!(scheduler.shared().log, vec!["exit Failure"]);
    }

    #[test]
    fn test_abort_all_keeps_coroutines_started_by_callbacks() {
        let mut scheduler = Scheduler::new(TestShared::default());
        scheduler.start_with_callback(builder::wait_forever(), |_, scheduler| {
            scheduler.start(action("cleanup"));
        });

        scheduler.tick(0.1);
        scheduler.abort_all();
        assert_eq!(scheduler.len(), 1);

        scheduler.tick(0.1);
        assert_eq!(scheduler.shared().log, vec!["cleanup"]);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_abort_unknown() {
        let mut scheduler = Scheduler::new(TestShared::default());
        assert!(!scheduler.abort(CoroutineId(42)));
    }

    #[test]
    fn test_delta_config() {
        let config = SchedulerConfig {
            max_delta: Some(0.5),
            time_scale: 1.0,
        };
        let mut scheduler = Scheduler::with_config(TestShared::default(), config);
        let handle = scheduler.start(crate::WaitState::new(1.0));

        // A hitch only counts for max_delta
        scheduler.tick(10.0);
        assert_eq!(handle.state(), CoroutineState::Running);
        scheduler.tick(10.0);
        assert_eq!(handle.state(), CoroutineState::Succeeded);
    }
}

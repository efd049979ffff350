use coroutines_common::{ParallelPolicy, Status};

use crate::{BoxedNode, Child, CoroutineError, Node};

/// Advances every unfinished child once per tick, in order.
///
/// Finished children keep their status for the aggregation. Once the
/// policy decides the outcome, children still running are aborted.
pub struct ParallelState<S> {
    policy: ParallelPolicy,
    children: Vec<Child<S>>,
}

impl<S> ParallelState<S> {
    pub fn new(policy: ParallelPolicy, children: Vec<BoxedNode<S>>) -> Self {
        Self {
            policy,
            children: children.into_iter().map(Child::new).collect(),
        }
    }

    fn aggregate(&self, first_finished: Option<Status>) -> Status {
        let total = self.children.len();
        let succeeded = self
            .children
            .iter()
            .filter(|child| child.status() == Some(Status::Success))
            .count();
        let failed = self
            .children
            .iter()
            .filter(|child| child.status() == Some(Status::Failure))
            .count();

        match self.policy {
            ParallelPolicy::RequireAll if failed > 0 => Status::Failure,
            ParallelPolicy::RequireAll if succeeded == total => Status::Success,
            ParallelPolicy::RequireAny if succeeded > 0 => Status::Success,
            ParallelPolicy::RequireAny if failed == total => Status::Failure,
            ParallelPolicy::Race => first_finished.unwrap_or(Status::Running),
            _ => Status::Running,
        }
    }
}

impl<S> Node<S> for ParallelState<S> {
    #[tracing::instrument(level = "trace", name = "Parallel::tick", skip_all, fields(policy = ?self.policy), ret)]
    fn tick(&mut self, dt: f64, shared: &mut S) -> Result<Status, CoroutineError> {
        if self.children.is_empty() {
            return Ok(Status::Success);
        }

        let mut first_finished = None;
        for child in self.children.iter_mut() {
            if child.is_finished() {
                continue;
            }
            let status = child.tick(dt, shared)?;
            if status.is_terminal() && first_finished.is_none() {
                first_finished = Some(status);
            }
        }

        let status = self.aggregate(first_finished);
        if status.is_terminal() {
            self.abort(shared);
        }
        Ok(status)
    }

    fn reset(&mut self, shared: &mut S) {
        self.children
            .iter_mut()
            .for_each(|child| child.reset(shared));
    }

    fn abort(&mut self, shared: &mut S) {
        self.children.iter_mut().for_each(|child| {
            child.abort(shared);
        });
    }

    fn name(&self) -> &str {
        match self.policy {
            ParallelPolicy::RequireAll => "Parallel(RequireAll)",
            ParallelPolicy::RequireAny => "Parallel(RequireAny)",
            ParallelPolicy::Race => "Race",
        }
    }

    fn visit_children(&self, visitor: &mut dyn FnMut(&Child<S>)) {
        self.children.iter().for_each(visitor);
    }
}

#[cfg(test)]
mod tests {
    use coroutines_common::Behavior;

    use crate::test_behavior_interface::{TestAction, TestShared};

    use super::*;

    fn parallel(policy: ParallelPolicy, behaviors: Vec<Behavior<TestAction>>) -> Child<TestShared> {
        Child::from_behavior(Behavior::Parallel(policy, behaviors))
    }

    #[test]
    fn test_parallel_require_all_waits() {
        let mut shared = TestShared::default();
        let mut parallel = parallel(
            ParallelPolicy::RequireAll,
            vec![Behavior::Wait(1.0), Behavior::Wait(2.0)],
        );

        assert_eq!(parallel.tick(1.0, &mut shared), Ok(Status::Running));
        assert_eq!(parallel.tick(1.0, &mut shared), Ok(Status::Success));
    }

    #[test]
    fn test_parallel_require_all_ticks_whole_pass_on_failure() {
        let mut shared = TestShared::default();
        let mut parallel = parallel(
            ParallelPolicy::RequireAll,
            vec![
                Behavior::Action(TestAction::Failure),
                Behavior::Action(TestAction::SuccessAfter { times: 3 }),
                Behavior::Action(TestAction::Success),
            ],
        );

        assert_eq!(parallel.tick(0.1, &mut shared), Ok(Status::Failure));
        assert_eq!(shared.log, vec!["Failure", "SuccessAfter", "Success"]);
        assert_eq!(shared.aborted, vec!["SuccessAfter"]);
    }

    #[test]
    fn test_parallel_finished_children_not_ticked() {
        let mut shared = TestShared::default();
        let mut parallel = parallel(
            ParallelPolicy::RequireAll,
            vec![
                Behavior::Action(TestAction::Success),
                Behavior::Action(TestAction::SuccessAfter { times: 2 }),
            ],
        );

        assert_eq!(parallel.tick(0.1, &mut shared), Ok(Status::Running));
        assert_eq!(parallel.tick(0.1, &mut shared), Ok(Status::Running));
        assert_eq!(parallel.tick(0.1, &mut shared), Ok(Status::Success));
        assert_eq!(
            shared.log,
            vec!["Success", "SuccessAfter", "SuccessAfter", "SuccessAfter"]
        );
    }

    #[test]
    fn test_parallel_require_any() {
        let mut shared = TestShared::default();
        let mut parallel = parallel(
            ParallelPolicy::RequireAny,
            vec![
                Behavior::Action(TestAction::Failure),
                Behavior::Action(TestAction::SuccessAfter { times: 1 }),
                Behavior::Action(TestAction::SuccessAfter { times: 5 }),
            ],
        );

        assert_eq!(parallel.tick(0.1, &mut shared), Ok(Status::Running));
        assert_eq!(parallel.tick(0.1, &mut shared), Ok(Status::Success));
        assert_eq!(shared.aborted, vec!["SuccessAfter"]);
    }

    #[test]
    fn test_parallel_require_any_all_fail() {
        let mut shared = TestShared::default();
        let mut parallel = parallel(
            ParallelPolicy::RequireAny,
            vec![
                Behavior::Action(TestAction::Failure),
                Behavior::Action(TestAction::FailureAfter { times: 1 }),
            ],
        );

        assert_eq!(parallel.tick(0.1, &mut shared), Ok(Status::Running));
        assert_eq!(parallel.tick(0.1, &mut shared), Ok(Status::Failure));
    }

    #[test]
    fn test_race_first_finisher_wins() {
        let mut shared = TestShared::default();
        let mut race = parallel(
            ParallelPolicy::Race,
            vec![
                Behavior::Action(TestAction::SuccessAfter { times: 3 }),
                Behavior::Action(TestAction::FailureAfter { times: 1 }),
            ],
        );

        assert_eq!(race.tick(0.1, &mut shared), Ok(Status::Running));
        assert_eq!(race.tick(0.1, &mut shared), Ok(Status::Failure));
        assert_eq!(shared.aborted, vec!["SuccessAfter"]);
    }

    #[test]
    fn test_parallel_empty() {
        let mut shared = TestShared::default();
        let mut parallel = parallel(ParallelPolicy::RequireAny, vec![]);
        assert_eq!(parallel.tick(0.1, &mut shared), Ok(Status::Success));
    }
}

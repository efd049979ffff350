use coroutines_common::{ImmediateAction, Status};

use crate::{CoroutineError, Node};

/// Runs a single-shot action on its first tick.
///
/// Never stays `Running`.
pub struct ActionState<T> {
    action: T,
}

impl<T> ActionState<T> {
    pub fn new(action: T) -> Self {
        Self { action }
    }
}

impl<S, T> Node<S> for ActionState<T>
where
    T: ImmediateAction<S>,
{
    fn tick(&mut self, _dt: f64, shared: &mut S) -> Result<Status, CoroutineError> {
        Ok(Status::from_bool(self.action.run(shared)))
    }

    fn reset(&mut self, shared: &mut S) {
        self.action.reset(shared);
    }

    fn name(&self) -> &str {
        self.action.name()
    }
}

/// Reports a fixed status on every tick.
///
/// `Running` gives a node that only ends through an abort.
pub struct ConstantState {
    status: Status,
}

impl ConstantState {
    pub fn new(status: Status) -> Self {
        Self { status }
    }
}

impl<S> Node<S> for ConstantState {
    fn tick(&mut self, _dt: f64, _shared: &mut S) -> Result<Status, CoroutineError> {
        Ok(self.status)
    }

    fn reset(&mut self, _shared: &mut S) {}

    fn name(&self) -> &str {
        match self.status {
            Status::Success => "Nop",
            Status::Failure => "Fail",
            Status::Running => "WaitForever",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter {
        runs: usize,
        resets: usize,
    }

    impl ImmediateAction<Vec<usize>> for Counter {
        fn run(&mut self, shared: &mut Vec<usize>) -> bool {
            self.runs += 1;
            shared.push(self.runs);
            self.runs < 2
        }

        fn reset(&mut self, _shared: &mut Vec<usize>) {
            self.resets += 1;
        }

        fn name(&self) -> &'static str {
            "Counter"
        }
    }

    #[test]
    fn test_action_closure() {
        let mut shared = 0;
        let mut action = ActionState::new(|shared: &mut i32| {
            *shared += 1;
            true
        });

        assert_eq!(action.tick(0.1, &mut shared), Ok(Status::Success));
        assert_eq!(shared, 1);
        assert_eq!(Node::<i32>::name(&action), "Action");
    }

    #[test]
    fn test_action_signals_failure() {
        let mut shared = vec![];
        let mut action = ActionState::new(Counter { runs: 0, resets: 0 });

        assert_eq!(action.tick(0.1, &mut shared), Ok(Status::Success));
        assert_eq!(action.tick(0.1, &mut shared), Ok(Status::Failure));
        assert_eq!(shared, vec![1, 2]);

        action.reset(&mut shared);
        assert_eq!(action.action.resets, 1);
        assert_eq!(Node::<Vec<usize>>::name(&action), "Counter");
    }

    #[test]
    fn test_constant() {
        let mut shared = ();
        assert_eq!(
            ConstantState::new(Status::Success).tick(0.1, &mut shared),
            Ok(Status::Success)
        );
        assert_eq!(
            ConstantState::new(Status::Failure).tick(0.1, &mut shared),
            Ok(Status::Failure)
        );

        let mut forever = ConstantState::new(Status::Running);
        for _ in 0..10 {
            assert_eq!(forever.tick(100.0, &mut shared), Ok(Status::Running));
        }
    }
}

/// Describes a coroutine tree.
///
/// This is the declarative form of a tree: it can be stored, cloned and
/// (de)serialized, then turned into live nodes once per coroutine.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Behavior<A> {
    /// A high level description of an action.
    Action(A),
    /// Waits an amount of time before continuing.
    ///
    /// f64: Time in seconds, in the same unit as the tick delta
    Wait(f64),
    /// Waits a number of ticks before continuing.
    WaitFrames(u32),
    /// Suspends for exactly one tick.
    Yield,

    /// Converts `Success` into `Failure` and vice versa.
    Invert(Box<Behavior<A>>),
    /// Ignores failures and returns `Success`.
    AlwaysSucceed(Box<Behavior<A>>),

    /// Runs behaviors one by one until all succeeded.
    ///
    /// The sequence fails if a behavior fails.
    /// The sequence succeeds if all the behavior succeeds.
    /// Can be thought of as a short-circuited logical AND gate.
    Sequence(Vec<Behavior<A>>),
    /// Runs behaviors one by one until a behavior succeeds.
    ///
    /// If a behavior fails it will try the next one.
    /// Fails if the last behavior fails.
    /// Can be thought of as a short-circuited logical OR gate.
    Select(Vec<Behavior<A>>),
    /// Runs all behaviors side by side, completion decided by the policy.
    Parallel(ParallelPolicy, Vec<Behavior<A>>),
    /// Runs a behavior repeatedly, one iteration per tick at most.
    Repeat(RepeatMode, Box<Behavior<A>>),

    /// Gives the behavior a name in debug snapshots.
    Named(String, Box<Behavior<A>>),
}

/// How a parallel node combines the outcome of its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ParallelPolicy {
    /// Succeeds once all children succeeded, fails as soon as one failed.
    RequireAll,
    /// Succeeds as soon as one child succeeded, fails once all failed.
    RequireAny,
    /// Finishes with the outcome of the first child to finish.
    Race,
}

/// When a repeat node starts another iteration and when it stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RepeatMode {
    /// Runs the child `n` times, fails as soon as one iteration fails.
    Times(u32),
    /// Restarts the child on success, succeeds once an iteration fails.
    UntilFailure,
    /// Restarts the child regardless of its outcome.
    Forever,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
    enum Operation {
        Open,
        Close,
    }

    #[test]
    fn test_behavior_serde() {
        let behavior = Behavior::Sequence(vec![
            Behavior::Action(Operation::Open),
            Behavior::Wait(1.5),
            Behavior::Parallel(
                ParallelPolicy::RequireAny,
                vec![Behavior::Yield, Behavior::WaitFrames(2)],
            ),
            Behavior::Repeat(
                RepeatMode::Times(3),
                Box::new(Behavior::Named(
                    "close".into(),
                    Box::new(Behavior::Action(Operation::Close)),
                )),
            ),
        ]);

        let data = serde_json::to_string(&behavior).unwrap();
        let parsed: Behavior<Operation> = serde_json::from_str(&data).unwrap();
        assert_eq!(parsed, behavior);
    }
}

//! Free functions assembling node trees by hand.
//!
//! ```ignore
//! use coroutines::builder::*;
//!
//! scheduler.start(sequence(vec![
//!     action(|world: &mut World| world.open_door()),
//!     wait(1.5),
//!     wait_until(|world: &World| world.door_is_open()),
//! ]));
//! ```

use coroutines_common::{ParallelPolicy, RepeatMode, Status};

use crate::{
    ActionState, AlwaysSucceedState, BoxedNode, BranchState, CaptureResultState, ConstantState,
    Event, GuardState, InvertState, NamedState, ParallelState, RepeatState, ScopeState,
    SelectState, Semaphore, SemaphoreScopeState, SequenceState, WaitForEventState,
    WaitFramesState, WaitState, WaitUntilState, YieldState,
};

// Leaf

/// Single-shot action that always succeeds.
pub fn action<S, F>(mut f: F) -> BoxedNode<S>
where
    S: 'static,
    F: FnMut(&mut S) + 'static,
{
    Box::new(ActionState::new(move |shared: &mut S| {
        f(shared);
        true
    }))
}

/// Single-shot action, `false` fails the node.
pub fn try_action<S, F>(f: F) -> BoxedNode<S>
where
    S: 'static,
    F: FnMut(&mut S) -> bool + 'static,
{
    Box::new(ActionState::new(f))
}

pub fn wait<S>(seconds: f64) -> BoxedNode<S> {
    Box::new(WaitState::new(seconds))
}

pub fn wait_frames<S>(frames: u32) -> BoxedNode<S> {
    Box::new(WaitFramesState::new(frames))
}

pub fn wait_until<S, F>(predicate: F) -> BoxedNode<S>
where
    S: 'static,
    F: Fn(&S) -> bool + 'static,
{
    Box::new(WaitUntilState::new(predicate))
}

pub fn yield_now<S>() -> BoxedNode<S> {
    Box::new(YieldState::new())
}

pub fn nop<S>() -> BoxedNode<S> {
    Box::new(ConstantState::new(Status::Success))
}

pub fn fail<S>() -> BoxedNode<S> {
    Box::new(ConstantState::new(Status::Failure))
}

/// Only ends through an abort.
pub fn wait_forever<S>() -> BoxedNode<S> {
    Box::new(ConstantState::new(Status::Running))
}

pub fn wait_for_event<T, S>(event: &Event<T>) -> BoxedNode<S>
where
    T: Clone + 'static,
    S: 'static,
{
    Box::new(WaitForEventState::new(event))
}

pub fn wait_for_event_with<T, S, F>(event: &Event<T>, handler: F) -> BoxedNode<S>
where
    T: Clone + 'static,
    S: 'static,
    F: FnMut(&T, &mut S) -> bool + 'static,
{
    Box::new(WaitForEventState::with_handler(event, handler))
}

// Control

pub fn sequence<S: 'static>(children: Vec<BoxedNode<S>>) -> BoxedNode<S> {
    Box::new(SequenceState::new(children))
}

/// Like `sequence`, but a failing child ends it with `Success`.
pub fn optional_sequence<S: 'static>(children: Vec<BoxedNode<S>>) -> BoxedNode<S> {
    Box::new(SequenceState::optional(children))
}

pub fn select<S: 'static>(children: Vec<BoxedNode<S>>) -> BoxedNode<S> {
    Box::new(SelectState::new(children))
}

/// Succeeds once every child succeeded.
pub fn parallel<S: 'static>(children: Vec<BoxedNode<S>>) -> BoxedNode<S> {
    Box::new(ParallelState::new(ParallelPolicy::RequireAll, children))
}

/// Succeeds as soon as one child succeeds.
pub fn parallel_any<S: 'static>(children: Vec<BoxedNode<S>>) -> BoxedNode<S> {
    Box::new(ParallelState::new(ParallelPolicy::RequireAny, children))
}

/// Finishes with the first child to finish.
pub fn race<S: 'static>(children: Vec<BoxedNode<S>>) -> BoxedNode<S> {
    Box::new(ParallelState::new(ParallelPolicy::Race, children))
}

pub fn repeat<S: 'static>(times: u32, child: BoxedNode<S>) -> BoxedNode<S> {
    Box::new(RepeatState::new(RepeatMode::Times(times), child))
}

pub fn repeat_until_failure<S: 'static>(child: BoxedNode<S>) -> BoxedNode<S> {
    Box::new(RepeatState::new(RepeatMode::UntilFailure, child))
}

/// Repeats until `stop` holds at the start of a tick.
pub fn repeat_until<S, F>(stop: F, child: BoxedNode<S>) -> BoxedNode<S>
where
    S: 'static,
    F: Fn(&S) -> bool + 'static,
{
    Box::new(RepeatState::new(RepeatMode::Forever, child).stop_when(stop))
}

pub fn forever<S: 'static>(child: BoxedNode<S>) -> BoxedNode<S> {
    Box::new(RepeatState::new(RepeatMode::Forever, child))
}

// Decorator

pub fn branch<S, F>(condition: F, then: BoxedNode<S>, otherwise: Option<BoxedNode<S>>) -> BoxedNode<S>
where
    S: 'static,
    F: Fn(&S) -> bool + 'static,
{
    let branch = BranchState::new(condition, then);
    match otherwise {
        Some(otherwise) => Box::new(branch.otherwise(otherwise)),
        None => Box::new(branch),
    }
}

pub fn guard<S, F>(condition: F, child: BoxedNode<S>) -> BoxedNode<S>
where
    S: 'static,
    F: Fn(&S) -> bool + 'static,
{
    Box::new(GuardState::new(condition, child))
}

pub fn invert<S: 'static>(child: BoxedNode<S>) -> BoxedNode<S> {
    Box::new(InvertState::new(child))
}

pub fn always_succeed<S: 'static>(child: BoxedNode<S>) -> BoxedNode<S> {
    Box::new(AlwaysSucceedState::new(child))
}

/// Reports whether the child succeeded, then succeeds.
pub fn capture_result<S, F>(on_result: F, child: BoxedNode<S>) -> BoxedNode<S>
where
    S: 'static,
    F: FnMut(bool, &mut S) + 'static,
{
    Box::new(CaptureResultState::new(on_result, child))
}

pub fn scope<S, F>(on_exit: F, child: BoxedNode<S>) -> BoxedNode<S>
where
    S: 'static,
    F: FnMut(Status, &mut S) + 'static,
{
    Box::new(ScopeState::new(on_exit, child))
}

pub fn named<S: 'static>(name: impl Into<String>, child: BoxedNode<S>) -> BoxedNode<S> {
    Box::new(NamedState::new(name, child))
}

pub fn semaphore_scope<S: 'static>(semaphore: &Semaphore, child: BoxedNode<S>) -> BoxedNode<S> {
    Box::new(SemaphoreScopeState::new(semaphore, child))
}

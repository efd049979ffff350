use coroutines_common::Status;

use crate::{CoroutineError, Node};

/// Accumulates tick deltas until `target` is reached.
///
/// The delta of the starting tick counts, so a zero target succeeds immediately.
pub struct WaitState {
    target: f64,
    elapsed: f64,
}

impl WaitState {
    pub fn new(target: f64) -> Self {
        Self {
            target,
            elapsed: 0.0,
        }
    }
}

impl<S> Node<S> for WaitState {
    fn tick(&mut self, dt: f64, _shared: &mut S) -> Result<Status, CoroutineError> {
        self.elapsed += dt;
        if self.elapsed >= self.target {
            Ok(Status::Success)
        } else {
            Ok(Status::Running)
        }
    }

    fn reset(&mut self, _shared: &mut S) {
        self.elapsed = 0.0;
    }

    fn name(&self) -> &str {
        "Wait"
    }
}

/// Suspends for a number of ticks, regardless of their delta.
pub struct WaitFramesState {
    target: u32,
    elapsed: u32,
}

impl WaitFramesState {
    pub fn new(target: u32) -> Self {
        Self { target, elapsed: 0 }
    }
}

impl<S> Node<S> for WaitFramesState {
    fn tick(&mut self, _dt: f64, _shared: &mut S) -> Result<Status, CoroutineError> {
        if self.elapsed >= self.target {
            return Ok(Status::Success);
        }
        self.elapsed += 1;
        Ok(Status::Running)
    }

    fn reset(&mut self, _shared: &mut S) {
        self.elapsed = 0;
    }

    fn name(&self) -> &str {
        "WaitFrames"
    }
}

/// `Running` once, then `Success` on the next tick.
pub struct YieldState {
    yielded: bool,
}

impl YieldState {
    pub fn new() -> Self {
        Self { yielded: false }
    }
}

impl Default for YieldState {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Node<S> for YieldState {
    fn tick(&mut self, _dt: f64, _shared: &mut S) -> Result<Status, CoroutineError> {
        if self.yielded {
            return Ok(Status::Success);
        }
        self.yielded = true;
        Ok(Status::Running)
    }

    fn reset(&mut self, _shared: &mut S) {
        self.yielded = false;
    }

    fn name(&self) -> &str {
        "Yield"
    }
}

/// Evaluates a predicate every tick, succeeds once it holds.
///
/// The predicate only reads the shared state, it may be evaluated any number of times.
pub struct WaitUntilState<F> {
    predicate: F,
}

impl<F> WaitUntilState<F> {
    pub fn new(predicate: F) -> Self {
        Self { predicate }
    }
}

impl<S, F> Node<S> for WaitUntilState<F>
where
    F: Fn(&S) -> bool,
{
    fn tick(&mut self, _dt: f64, shared: &mut S) -> Result<Status, CoroutineError> {
        if (self.predicate)(shared) {
            Ok(Status::Success)
        } else {
            Ok(Status::Running)
        }
    }

    fn reset(&mut self, _shared: &mut S) {}

    fn name(&self) -> &str {
        "WaitUntil"
    }
}

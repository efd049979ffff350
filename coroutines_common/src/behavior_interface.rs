/// Host defined single-shot work.
///
/// Plain closures `FnMut(&mut S) -> bool` implement this trait.
pub trait ImmediateAction<S> {
    /// Runs the action in a single tick
    ///
    /// Cannot return `Status::Running`
    /// true == `Status::Success`
    /// false == `Status::Failure`
    fn run(&mut self, shared: &mut S) -> bool;

    /// Resets the current action to its initial/newly created state
    fn reset(&mut self, _shared: &mut S) {}

    /// Identify your action
    fn name(&self) -> &'static str {
        "Action"
    }
}

impl<S, F> ImmediateAction<S> for F
where
    F: FnMut(&mut S) -> bool,
{
    fn run(&mut self, shared: &mut S) -> bool {
        self(shared)
    }
}

/// The result of ticking a node.
///
/// A node that has not been ticked yet has no status at all,
/// this is represented as `Option<Status>::None` by its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Status {
    /// The node finished its work.
    Success,
    /// The node finished without doing its work, or was aborted.
    Failure,
    /// The node has unfinished work and wants to be ticked again.
    Running,
}

impl Status {
    /// `Success` or `Failure`
    pub fn is_terminal(self) -> bool {
        !matches!(self, Status::Running)
    }

    /// Converts `Success` into `Failure` and vice versa.
    ///
    /// `Running` is left untouched.
    pub fn invert(self) -> Self {
        match self {
            Status::Success => Status::Failure,
            Status::Failure => Status::Success,
            Status::Running => Status::Running,
        }
    }

    pub fn from_bool(success: bool) -> Self {
        if success {
            Status::Success
        } else {
            Status::Failure
        }
    }
}

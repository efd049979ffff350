use crate::{CoroutineId, CoroutineState, Status};

/// Read-only view of a single node, taken between ticks.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NodeSnapshot {
    pub name: String,
    /// `None` while the node has not started.
    pub status: Option<Status>,
    /// Root is at depth 0
    pub depth: usize,
    /// Index of the active child for sequence-like nodes.
    pub cursor: Option<usize>,
    /// Set when the `Failure` status came from an abort.
    pub aborted: bool,
}

/// Read-only view of a coroutine and its tree in pre-order.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CoroutineSnapshot {
    pub id: CoroutineId,
    pub state: CoroutineState,
    pub nodes: Vec<NodeSnapshot>,
}

impl CoroutineSnapshot {
    /// Nodes currently reporting `Running`, deepest last.
    pub fn running(&self) -> impl Iterator<Item = &NodeSnapshot> {
        self.nodes
            .iter()
            .filter(|node| node.status == Some(Status::Running))
    }
}

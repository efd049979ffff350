use coroutines_common::NodeSnapshot;

use crate::Child;

/// Pre-order traversal of a tree, root first.
pub fn collect<S>(root: &Child<S>) -> Vec<NodeSnapshot> {
    let mut nodes = vec![];
    visit(root, 0, &mut nodes);
    nodes
}

fn visit<S>(child: &Child<S>, depth: usize, nodes: &mut Vec<NodeSnapshot>) {
    nodes.push(NodeSnapshot {
        name: child.name().to_owned(),
        status: child.status(),
        depth,
        cursor: child.node().cursor(),
        aborted: child.was_aborted(),
    });
    child
        .node()
        .visit_children(&mut |grandchild| visit(grandchild, depth + 1, nodes));
}

//! Tree flattening for render passes.
//!
//! Both iterators walk depth-first pre-order with an explicit stack, the same
//! way an arena walk pushes children in reverse to visit them left to right.

use tracing::instrument;

use crate::domain::node::TaskNode;

/// Visible nodes of a forest: collapsed subtrees contribute only their root.
pub struct VisibleNodes<'a> {
    stack: Vec<&'a TaskNode>,
}

impl<'a> VisibleNodes<'a> {
    pub fn new(nodes: &'a [TaskNode]) -> Self {
        Self {
            stack: nodes.iter().rev().collect(),
        }
    }
}

impl<'a> Iterator for VisibleNodes<'a> {
    type Item = &'a TaskNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if node.expanded() {
            self.stack.extend(node.children().iter().rev());
        }
        Some(node)
    }
}

/// Every node of a forest, regardless of expansion.
pub struct PreOrder<'a> {
    stack: Vec<&'a TaskNode>,
}

impl<'a> PreOrder<'a> {
    pub fn new(nodes: &'a [TaskNode]) -> Self {
        Self {
            stack: nodes.iter().rev().collect(),
        }
    }
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a TaskNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

/// Ordered, expansion-filtered sequence of nodes for one render pass.
///
/// A node's descendants follow it directly when it is expanded; sibling order
/// is preserved at every depth. The result is rebuilt on every call.
#[instrument(level = "trace", skip(nodes), fields(roots = nodes.len()))]
pub fn flatten_visible(nodes: &[TaskNode]) -> Vec<&TaskNode> {
    VisibleNodes::new(nodes).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::TaskRecord;

    fn ids<'a>(nodes: impl IntoIterator<Item = &'a TaskNode>) -> Vec<&'a str> {
        nodes.into_iter().map(TaskNode::id).collect()
    }

    #[test]
    fn given_empty_forest_when_flattening_then_returns_nothing() {
        assert!(flatten_visible(&[]).is_empty());
    }

    #[test]
    fn given_collapsed_root_when_iterating_pre_order_then_still_visits_children() {
        let node = TaskNode::from(
            TaskRecord::new("a", "A").with_children(vec![TaskRecord::new("b", "B")]),
        );
        let forest = [node];
        assert_eq!(ids(flatten_visible(&forest)), vec!["a"]);
        assert_eq!(ids(PreOrder::new(&forest)), vec!["a", "b"]);
    }
}

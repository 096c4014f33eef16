/*
Text rendering of task trees for logs and debugging.

termtree::Tree is a foreign type, so the conversion lives in a local trait
implemented for the node and for the service that owns a forest.
 */
use termtree::Tree;
use tracing::instrument;

use crate::application::TaskTreeService;
use crate::domain::TaskNode;

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

fn label(node: &TaskNode) -> String {
    let marker = match (node.children().is_empty(), node.expanded()) {
        (true, _) => " ",
        (false, true) => "-",
        (false, false) => "+",
    };
    match (node.start(), node.end()) {
        (Some(start), Some(end)) => format!(
            "{marker} {} {} [{} .. {}]",
            node.id(),
            node.title(),
            start,
            end
        ),
        _ => format!("{marker} {} {}", node.id(), node.title()),
    }
}

impl TreeNodeConvert for TaskNode {
    #[instrument(level = "trace", skip(self), fields(id = %self.id()))]
    fn to_tree_string(&self) -> Tree<String> {
        // Recursively construct the children
        let leaves: Vec<_> = self.children().iter().map(|c| c.to_tree_string()).collect();
        Tree::new(label(self)).with_leaves(leaves)
    }
}

impl TreeNodeConvert for TaskTreeService {
    fn to_tree_string(&self) -> Tree<String> {
        let leaves: Vec<_> = self.roots().iter().map(|r| r.to_tree_string()).collect();
        Tree::new("tasks".to_string()).with_leaves(leaves)
    }
}

//! Tests for expansion-aware flattening

use rstest::rstest;

use gantt_model::domain::{flatten_visible, TaskNode, TaskRecord, VisibleNodes};

fn ids(nodes: Vec<&TaskNode>) -> Vec<&str> {
    nodes.into_iter().map(TaskNode::id).collect()
}

/// A(expanded) -> [B(collapsed) -> [C], D]
fn sample_tree() -> TaskNode {
    TaskNode::from(
        TaskRecord::new("A", "a").with_expanded(true).with_children(vec![
            TaskRecord::new("B", "b")
                .with_expanded(false)
                .with_children(vec![TaskRecord::new("C", "c")]),
            TaskRecord::new("D", "d"),
        ]),
    )
}

#[test]
fn given_collapsed_middle_node_when_flattening_then_hides_its_children() {
    let forest = [sample_tree()];
    assert_eq!(ids(flatten_visible(&forest)), vec!["A", "B", "D"]);
}

#[test]
fn given_expanded_middle_node_when_flattening_then_children_follow_it_directly() {
    let mut root = sample_tree();
    root.find_mut("B").unwrap().set_expanded(true);
    let forest = [root];

    assert_eq!(ids(flatten_visible(&forest)), vec!["A", "B", "C", "D"]);
}

#[test]
fn given_expanded_child_under_collapsed_parent_when_flattening_then_stays_hidden() {
    let mut root = sample_tree();
    root.find_mut("B").unwrap().set_expanded(true);
    root.set_expanded(false);
    let forest = [root];

    assert_eq!(ids(flatten_visible(&forest)), vec!["A"]);
}

#[test]
fn given_expanded_leaf_when_flattening_then_contributes_only_itself() {
    let leaf = TaskNode::from(TaskRecord::new("L", "leaf").with_expanded(true));
    let forest = [leaf];
    assert_eq!(ids(flatten_visible(&forest)), vec!["L"]);
}

#[rstest]
#[case(1)]
#[case(3)]
#[case(7)]
fn given_siblings_when_flattening_then_preserves_order(#[case] count: usize) {
    let children: Vec<_> = (0..count)
        .map(|i| TaskRecord::new(format!("c{i}"), "child"))
        .collect();
    let forest = [
        TaskNode::from(TaskRecord::new("first", "x").with_expanded(true).with_children(children)),
        TaskNode::from(TaskRecord::new("second", "y")),
    ];

    let visible = ids(flatten_visible(&forest));

    let mut expected = vec!["first".to_string()];
    expected.extend((0..count).map(|i| format!("c{i}")));
    expected.push("second".to_string());
    assert_eq!(visible, expected);
}

#[test]
fn given_deep_expanded_chain_when_flattening_then_emits_every_level() {
    let mut record = TaskRecord::new("n0", "leaf");
    for i in 1..500 {
        record = TaskRecord::new(format!("n{i}"), "level")
            .with_expanded(true)
            .with_children(vec![record]);
    }
    let forest = [TaskNode::from(record)];

    let visible: Vec<_> = VisibleNodes::new(&forest).collect();

    assert_eq!(visible.len(), 500);
    assert_eq!(visible[0].id(), "n499");
    assert_eq!(visible[499].id(), "n0");
}

#[test]
fn given_same_tree_when_flattening_twice_then_results_match() {
    let forest = [sample_tree()];
    assert_eq!(ids(flatten_visible(&forest)), ids(flatten_visible(&forest)));
}

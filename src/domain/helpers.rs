//! Shared value helpers for lookups, de-duplication and colors.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::LazyLock;

use itertools::Itertools;
use regex::Regex;

use crate::domain::flatten::PreOrder;
use crate::domain::node::TaskNode;

/// String-keyed lookup table.
pub type Dictionary<T> = HashMap<String, T>;

static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#([0-9a-fA-F]{2})([0-9a-fA-F]{2})([0-9a-fA-F]{2})").expect("valid hex color regex")
});

/// Keeps the first item for each key, in input order.
pub fn uniq_by<T, K, F>(items: impl IntoIterator<Item = T>, key: F) -> Vec<T>
where
    K: Eq + Hash,
    F: FnMut(&T) -> K,
{
    items.into_iter().unique_by(key).collect()
}

/// Indexes every node of a forest by id; the first occurrence wins.
pub fn index_by_id(nodes: &[TaskNode]) -> Dictionary<&TaskNode> {
    let mut index = Dictionary::new();
    for node in PreOrder::new(nodes) {
        index.entry(node.id().to_owned()).or_insert(node);
    }
    index
}

/// Converts `#rrggbb` into `rgba(r,g,b,opacity)`.
///
/// Returns `None` for anything that does not start with `#` and six hex digits.
pub fn hex_to_rgba(color: &str, opacity: f64) -> Option<String> {
    let caps = HEX_COLOR.captures(color)?;
    let channel = |i: usize| u8::from_str_radix(&caps[i], 16).ok();
    Some(format!(
        "rgba({},{},{},{})",
        channel(1)?,
        channel(2)?,
        channel(3)?,
        opacity
    ))
}

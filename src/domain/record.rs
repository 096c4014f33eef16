//! External task record: the caller-owned side of every node.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Shared handle to a record.
///
/// The host and the node built from it hold the same instance, so write-backs
/// performed by node operations are visible to the host.
pub type TaskRecordRef = Rc<RefCell<TaskRecord>>;

/// Task description as supplied by the host application.
///
/// Every optional field stays `None` when the caller omits it, so an explicit
/// `expanded: Some(false)` is distinguishable from an omitted flag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Stable identity; must be non-empty.
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Epoch seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,
    /// Epoch seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    /// Ids of tasks this task links to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draggable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expandable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expanded: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TaskRecordRef>>,
    /// Opaque host payload, never inspected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<serde_json::Value>,
}

impl TaskRecord {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_start(mut self, start: i64) -> Self {
        self.start = Some(start);
        self
    }

    pub fn with_end(mut self, end: i64) -> Self {
        self.end = Some(end);
        self
    }

    pub fn with_links<I, S>(mut self, links: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.links = Some(links.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_expanded(mut self, expanded: bool) -> Self {
        self.expanded = Some(expanded);
        self
    }

    pub fn with_expandable(mut self, expandable: bool) -> Self {
        self.expandable = Some(expandable);
        self
    }

    pub fn with_children(mut self, children: Vec<TaskRecord>) -> Self {
        self.children = Some(children.into_iter().map(TaskRecord::into_ref).collect());
        self
    }

    /// Moves the record behind a shared handle.
    pub fn into_ref(self) -> TaskRecordRef {
        Rc::new(RefCell::new(self))
    }

    pub fn has_children(&self) -> bool {
        self.children.as_ref().is_some_and(|c| !c.is_empty())
    }
}

/// Parses a JSON array of records into shared handles.
pub fn records_from_json(json: &str) -> serde_json::Result<Vec<TaskRecordRef>> {
    serde_json::from_str(json)
}

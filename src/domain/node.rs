//! Internal task node built from a [`TaskRecord`].
//!
//! # Invariants
//! - `id` equals the origin record's id for the node's lifetime.
//! - `expandable` is `Some(true)` whenever the record had children at wrap time.
//! - Node and origin are re-synchronized only by the mutation methods here;
//!   each one writes back exactly the origin fields it owns.
//! - Children are rebuilt, never reused, by [`TaskNode::replace_children`].

use std::rc::Rc;

use tracing::{debug, instrument, trace, warn};

use crate::domain::date::{Calendar, GanttDate};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::flatten::PreOrder;
use crate::domain::helpers::hex_to_rgba;
use crate::domain::layout::{LayoutCell, LayoutMetrics, SubscriptionId};
use crate::domain::record::{TaskRecord, TaskRecordRef};

#[derive(Debug)]
pub struct TaskNode {
    id: String,
    title: String,
    start: Option<GanttDate>,
    end: Option<GanttDate>,
    links: Vec<String>,
    color: Option<String>,
    draggable: bool,
    linkable: bool,
    expandable: Option<bool>,
    expanded: bool,
    loading: bool,
    children: Vec<TaskNode>,
    layout: LayoutCell,
    calendar: Calendar,
    origin: TaskRecordRef,
}

impl TaskNode {
    /// Wraps a record using the default calendar (UTC, one-month backfill).
    pub fn wrap(record: &TaskRecordRef) -> Self {
        Self::wrap_with(record, Calendar::default())
    }

    /// Wraps a record and, recursively, all of its children.
    ///
    /// Never fails: absent optionals fall back to defaults. An empty id is
    /// accepted here; use [`crate::domain::validate_records`] to reject it.
    /// The record tree must be acyclic.
    pub fn wrap_with(record: &TaskRecordRef, calendar: Calendar) -> Self {
        let rec = record.borrow();
        trace!(id = %rec.id, "wrapping task record");

        let start = rec.start.map(|secs| calendar.normalize(secs));
        let end = rec.end.map(|secs| calendar.normalize(secs));
        let children = wrap_all(rec.children.as_deref().unwrap_or_default(), calendar);
        let (start, end) = calendar.backfill(start, end);

        Self {
            id: rec.id.clone(),
            title: rec.title.clone(),
            start,
            end,
            links: rec.links.clone().unwrap_or_default(),
            color: rec.color.clone(),
            draggable: rec.draggable.unwrap_or(true),
            linkable: rec.linkable.unwrap_or(true),
            expandable: if rec.has_children() {
                Some(true)
            } else {
                rec.expandable
            },
            expanded: rec.expanded.unwrap_or(false),
            loading: false,
            children,
            layout: LayoutCell::new(),
            calendar,
            origin: Rc::clone(record),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn start(&self) -> Option<GanttDate> {
        self.start
    }

    pub fn end(&self) -> Option<GanttDate> {
        self.end
    }

    pub fn links(&self) -> &[String] {
        &self.links
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    /// Node color as a CSS `rgba(...)` string, if it is a `#rrggbb` hex color.
    pub fn color_rgba(&self, opacity: f64) -> Option<String> {
        self.color.as_deref().and_then(|c| hex_to_rgba(c, opacity))
    }

    pub fn draggable(&self) -> bool {
        self.draggable
    }

    pub fn linkable(&self) -> bool {
        self.linkable
    }

    pub fn expandable(&self) -> Option<bool> {
        self.expandable
    }

    pub fn expanded(&self) -> bool {
        self.expanded
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Set by whoever loads children asynchronously; no write-back.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn children(&self) -> &[TaskNode] {
        &self.children
    }

    /// Mutable access to existing children. The sequence itself can only be
    /// swapped through [`TaskNode::replace_children`].
    pub fn children_mut(&mut self) -> &mut [TaskNode] {
        &mut self.children
    }

    pub fn calendar(&self) -> Calendar {
        self.calendar
    }

    /// The record this node was built from, shared with the host.
    pub fn origin(&self) -> &TaskRecordRef {
        &self.origin
    }

    pub fn group_id(&self) -> Option<String> {
        self.origin.borrow().group_id.clone()
    }

    pub fn payload(&self) -> Option<serde_json::Value> {
        self.origin.borrow().origin.clone()
    }

    pub fn layout(&self) -> Option<LayoutMetrics> {
        self.layout.get()
    }

    #[instrument(level = "trace", skip(self), fields(id = %self.id))]
    pub fn update_layout(&mut self, metrics: LayoutMetrics) {
        self.layout.publish(metrics);
    }

    /// Registers a layout observer; it immediately receives the current value.
    pub fn subscribe_layout<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(Option<&LayoutMetrics>) + 'static,
    {
        self.layout.subscribe(observer)
    }

    pub fn unsubscribe_layout(&mut self, id: SubscriptionId) -> bool {
        self.layout.unsubscribe(id)
    }

    /// Sets a new day-snapped range and writes its epoch seconds to the origin.
    ///
    /// Both bounds are re-based onto the node's calendar before snapping, so
    /// day boundaries never depend on the offset the caller built them with.
    ///
    /// # Errors
    /// `InvertedRange` when the snapped start falls after the snapped end;
    /// neither node nor origin is touched in that case.
    #[instrument(level = "debug", skip(self), fields(id = %self.id))]
    pub fn update_date_range(&mut self, start: GanttDate, end: GanttDate) -> DomainResult<()> {
        let start = self.calendar.normalize(start.unix_time()).start_of_day();
        let end = self.calendar.normalize(end.unix_time()).end_of_day();
        if start > end {
            warn!(start = %start, end = %end, "rejecting inverted date range");
            return Err(DomainError::InvertedRange {
                id: self.id.clone(),
                start: start.unix_time(),
                end: end.unix_time(),
            });
        }
        self.start = Some(start);
        self.end = Some(end);

        let mut origin = self.origin.borrow_mut();
        origin.start = Some(start.unix_time());
        origin.end = Some(end.unix_time());
        Ok(())
    }

    /// Replaces the children on both sides.
    ///
    /// The origin keeps the given handles as-is; the node's subtree is rebuilt
    /// from them, dropping all state held by the previous child nodes.
    #[instrument(level = "debug", skip(self, records), fields(id = %self.id, count = records.len()))]
    pub fn replace_children(&mut self, records: Vec<TaskRecordRef>) {
        self.children = wrap_all(&records, self.calendar);
        self.origin.borrow_mut().children = Some(records);
    }

    #[instrument(level = "debug", skip(self), fields(id = %self.id))]
    pub fn set_expanded(&mut self, expanded: bool) {
        self.expanded = expanded;
        self.origin.borrow_mut().expanded = Some(expanded);
    }

    /// Appends a link target; duplicates are kept.
    #[instrument(level = "debug", skip(self), fields(id = %self.id))]
    pub fn add_link(&mut self, target: &str) {
        let mut links = self.links.clone();
        links.push(target.to_owned());
        self.origin.borrow_mut().links = Some(links.clone());
        self.links = links;
        debug!(links = self.links.len(), "link added");
    }

    /// Pre-order iterator over this node and all descendants, ignoring expansion.
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder::new(std::slice::from_ref(self))
    }

    pub fn find(&self, id: &str) -> Option<&TaskNode> {
        self.iter().find(|node| node.id == id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut TaskNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(id))
    }

    /// Number of levels in this subtree (a leaf has depth 1).
    pub fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(TaskNode::depth)
            .max()
            .unwrap_or(0)
    }
}

fn wrap_all(records: &[TaskRecordRef], calendar: Calendar) -> Vec<TaskNode> {
    records
        .iter()
        .map(|record| TaskNode::wrap_with(record, calendar))
        .collect()
}

impl From<TaskRecord> for TaskNode {
    fn from(record: TaskRecord) -> Self {
        Self::wrap(&record.into_ref())
    }
}

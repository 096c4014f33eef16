//! Task tree service
//!
//! Owns a forest of nodes built from host records and addresses mutations by
//! task id, so the host does not have to keep node references around.

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::config::Settings;
use crate::domain::{
    flatten_visible, index_by_id, uniq_by, validate_records, Calendar, GanttDate,
    LayoutMetrics, PreOrder, TaskNode, TaskRecordRef, VisibleNodes,
};

/// A resolved link between two tasks of the same tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Dependency {
    pub source: String,
    pub target: String,
}

/// Service owning one task forest.
#[derive(Debug)]
pub struct TaskTreeService {
    roots: Vec<TaskNode>,
    calendar: Calendar,
}

impl TaskTreeService {
    /// Wrap the records without validation.
    pub fn new(records: &[TaskRecordRef], calendar: Calendar) -> Self {
        debug!("new: wrapping {} root records", records.len());
        Self {
            roots: records
                .iter()
                .map(|record| TaskNode::wrap_with(record, calendar))
                .collect(),
            calendar,
        }
    }

    /// Validate the records, then wrap them.
    pub fn try_new(records: &[TaskRecordRef], calendar: Calendar) -> ApplicationResult<Self> {
        validate_records(records)?;
        Ok(Self::new(records, calendar))
    }

    /// Build from loaded settings; validates when `settings.validate_records` is set.
    pub fn from_settings(records: &[TaskRecordRef], settings: &Settings) -> ApplicationResult<Self> {
        let calendar = settings.calendar()?;
        if settings.validate_records {
            Self::try_new(records, calendar)
        } else {
            Ok(Self::new(records, calendar))
        }
    }

    pub fn calendar(&self) -> Calendar {
        self.calendar
    }

    pub fn roots(&self) -> &[TaskNode] {
        &self.roots
    }

    /// Visible nodes for the next render pass.
    pub fn visible(&self) -> Vec<&TaskNode> {
        flatten_visible(&self.roots)
    }

    /// Lazy variant of [`TaskTreeService::visible`].
    pub fn visible_iter(&self) -> VisibleNodes<'_> {
        VisibleNodes::new(&self.roots)
    }

    /// All nodes, pre-order, regardless of expansion.
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder::new(&self.roots)
    }

    pub fn find(&self, id: &str) -> Option<&TaskNode> {
        self.iter().find(|node| node.id() == id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut TaskNode> {
        self.roots.iter_mut().find_map(|node| node.find_mut(id))
    }

    fn node_mut(&mut self, id: &str) -> ApplicationResult<&mut TaskNode> {
        self.find_mut(id)
            .ok_or_else(|| ApplicationError::NodeNotFound(id.to_string()))
    }

    #[instrument(level = "debug", skip(self))]
    pub fn set_expanded(&mut self, id: &str, expanded: bool) -> ApplicationResult<()> {
        self.node_mut(id)?.set_expanded(expanded);
        Ok(())
    }

    /// Expand or collapse every node that has children.
    #[instrument(level = "debug", skip(self))]
    pub fn expand_all(&mut self, expanded: bool) {
        fn walk(nodes: &mut [TaskNode], expanded: bool) {
            for node in nodes {
                if !node.children().is_empty() {
                    node.set_expanded(expanded);
                }
                walk(node.children_mut(), expanded);
            }
        }
        walk(&mut self.roots, expanded);
    }

    pub fn add_link(&mut self, source: &str, target: &str) -> ApplicationResult<()> {
        self.node_mut(source)?.add_link(target);
        Ok(())
    }

    pub fn update_date_range(
        &mut self,
        id: &str,
        start: GanttDate,
        end: GanttDate,
    ) -> ApplicationResult<()> {
        self.node_mut(id)?.update_date_range(start, end)?;
        Ok(())
    }

    /// Same as [`TaskTreeService::update_date_range`] with epoch seconds,
    /// normalized through the tree's calendar.
    pub fn update_date_range_unix(&mut self, id: &str, start: i64, end: i64) -> ApplicationResult<()> {
        let (start, end) = (self.calendar.normalize(start), self.calendar.normalize(end));
        self.update_date_range(id, start, end)
    }

    pub fn replace_children(
        &mut self,
        id: &str,
        records: Vec<TaskRecordRef>,
    ) -> ApplicationResult<()> {
        self.node_mut(id)?.replace_children(records);
        Ok(())
    }

    pub fn update_layout(&mut self, id: &str, metrics: LayoutMetrics) -> ApplicationResult<()> {
        self.node_mut(id)?.update_layout(metrics);
        Ok(())
    }

    /// Links whose target exists in this tree, de-duplicated, in pre-order of
    /// their source.
    pub fn dependencies(&self) -> Vec<Dependency> {
        let index = index_by_id(&self.roots);
        let pairs = self.iter().flat_map(|node| {
            node.links().iter().map(move |target| Dependency {
                source: node.id().to_string(),
                target: target.clone(),
            })
        });
        uniq_by(
            pairs.filter(|dep| index.contains_key(&dep.target)),
            Dependency::clone,
        )
    }
}

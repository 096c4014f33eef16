//! In-memory task tree for interactive Gantt charts.
//!
//! Host records ([`TaskRecord`]) are wrapped into [`TaskNode`]s with normalized
//! dates and defaulted flags. Node mutations write the fields they own back to
//! the shared record. [`flatten_visible`] produces the expansion-aware
//! sequence a renderer draws on each pass.

pub mod application;
pub mod config;
pub mod domain;
pub mod tree_traits;
pub mod util;

pub use application::{ApplicationError, ApplicationResult, Dependency, TaskTreeService};
pub use config::Settings;
pub use domain::{
    flatten_visible, records_from_json, validate_records, Calendar, DomainError, DomainResult,
    GanttDate, LayoutMetrics, SubscriptionId, TaskNode, TaskRecord, TaskRecordRef,
};
pub use tree_traits::TreeNodeConvert;

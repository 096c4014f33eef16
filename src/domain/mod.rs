//! Domain layer: task records, nodes and tree traversal
//!
//! This layer is independent of external concerns (no I/O, no config loading).

pub mod date;
pub mod error;
pub mod flatten;
pub mod helpers;
pub mod layout;
pub mod node;
pub mod record;
pub mod validate;

pub use date::{Calendar, GanttDate};
pub use error::{DomainError, DomainResult};
pub use flatten::{flatten_visible, PreOrder, VisibleNodes};
pub use helpers::{hex_to_rgba, index_by_id, uniq_by, Dictionary};
pub use layout::{LayoutCell, LayoutMetrics, SubscriptionId};
pub use node::TaskNode;
pub use record::{records_from_json, TaskRecord, TaskRecordRef};
pub use validate::validate_records;

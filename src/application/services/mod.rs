//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.

mod task_tree;

pub use task_tree::{Dependency, TaskTreeService};

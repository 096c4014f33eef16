//! Optional hardening for record trees.
//!
//! Wrapping never validates; hosts that want early failures run these checks
//! on the input first.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use tracing::{instrument, warn};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::record::{TaskRecord, TaskRecordRef};

/// Checks a forest of records, depth-first.
///
/// # Errors
/// - `EmptyId` for a blank id
/// - `DuplicateId` when an id appears twice anywhere in the forest
/// - `InvertedRange` when both bounds are set and `start > end`
/// - `CycleDetected` when a record is reachable from itself
#[instrument(level = "debug", skip(records), fields(roots = records.len()))]
pub fn validate_records(records: &[TaskRecordRef]) -> DomainResult<()> {
    let mut seen = HashSet::new();
    let mut ancestors = Vec::new();
    for record in records {
        validate_record(record, None, &mut seen, &mut ancestors).inspect_err(|e| {
            warn!(error = %e, "record validation failed");
        })?;
    }
    Ok(())
}

fn validate_record(
    record: &TaskRecordRef,
    parent: Option<&str>,
    seen: &mut HashSet<String>,
    ancestors: &mut Vec<*const RefCell<TaskRecord>>,
) -> DomainResult<()> {
    let ptr = Rc::as_ptr(record);
    let rec = record.borrow();
    if ancestors.contains(&ptr) {
        return Err(DomainError::CycleDetected(rec.id.clone()));
    }
    if rec.id.trim().is_empty() {
        return Err(DomainError::EmptyId {
            parent: parent.map(str::to_owned),
        });
    }
    if !seen.insert(rec.id.clone()) {
        return Err(DomainError::DuplicateId(rec.id.clone()));
    }
    if let (Some(start), Some(end)) = (rec.start, rec.end) {
        if start > end {
            return Err(DomainError::InvertedRange {
                id: rec.id.clone(),
                start,
                end,
            });
        }
    }

    ancestors.push(ptr);
    for child in rec.children.iter().flatten() {
        validate_record(child, Some(rec.id.as_str()), seen, ancestors)?;
    }
    ancestors.pop();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_well_formed_forest_when_validating_then_ok() {
        let records = vec![
            TaskRecord::new("a", "A")
                .with_start(10)
                .with_end(20)
                .with_children(vec![TaskRecord::new("b", "B")])
                .into_ref(),
            TaskRecord::new("c", "C").into_ref(),
        ];
        assert_eq!(validate_records(&records), Ok(()));
    }

    #[test]
    fn given_self_referencing_record_when_validating_then_detects_cycle() {
        let root = TaskRecord::new("loop", "Loop").into_ref();
        root.borrow_mut().children = Some(vec![Rc::clone(&root)]);

        let result = validate_records(std::slice::from_ref(&root));
        assert_eq!(result, Err(DomainError::CycleDetected("loop".into())));

        // break the cycle so the Rc is freed
        root.borrow_mut().children = None;
    }
}

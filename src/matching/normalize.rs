//! Canonical form of operation sequences prior to comparison.

use crate::core::operation::{sort_by_sequence, Operation};

/// Case-fold a text field, trim it, and collapse internal whitespace runs to one space
#[must_use]
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Return a normalized copy of `operations`, ordered by sequence number.
///
/// Text fields are case-folded and trimmed. Ordering is stable, so operations
/// sharing a sequence number keep their original relative position. The input
/// is never modified.
#[must_use]
pub fn normalize_operations(operations: &[Operation]) -> Vec<Operation> {
    let mut normalized: Vec<Operation> = operations
        .iter()
        .map(|op| Operation {
            operation_name: normalize_text(&op.operation_name),
            machine_name: normalize_text(&op.machine_name),
            sequence_number: op.sequence_number,
        })
        .collect();
    sort_by_sequence(&mut normalized);
    normalized
}

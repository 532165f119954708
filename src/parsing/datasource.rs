//! Flat per-operation rows, as exported by an upstream datasource.
//!
//! Each row repeats its layout's identity; rows are grouped back into
//! breakdowns by `layout_id`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::breakdown::OperationBreakdown;
use crate::core::operation::Operation;
use crate::core::types::LayoutId;

/// One operation of one layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationRow {
    pub layout_id: LayoutId,
    pub layout_code: String,
    pub style_type: String,
    pub operation_name: String,
    pub machine_name: String,
    pub operation_seq: u32,
}

/// Keep only rows whose trimmed style type equals `style_type` (trimmed)
pub fn filter_by_style_type(rows: Vec<OperationRow>, style_type: &str) -> Vec<OperationRow> {
    let wanted = style_type.trim();
    rows.into_iter()
        .filter(|row| row.style_type.trim() == wanted)
        .collect()
}

/// Group rows into breakdowns by layout id.
///
/// Breakdowns appear in the order their layout was first seen; each takes
/// its code and style type from its first row, and its operations are
/// ordered by sequence number.
pub fn group_rows(rows: Vec<OperationRow>) -> Vec<OperationBreakdown> {
    let mut breakdowns: Vec<OperationBreakdown> = Vec::new();
    let mut positions: HashMap<LayoutId, usize> = HashMap::new();

    for row in rows {
        let idx = *positions.entry(row.layout_id).or_insert_with(|| {
            breakdowns.push(OperationBreakdown::new(
                row.layout_id,
                row.layout_code.clone(),
                row.style_type.clone(),
            ));
            breakdowns.len() - 1
        });
        breakdowns[idx].operations.push(Operation::new(
            row.operation_name,
            row.machine_name,
            row.operation_seq,
        ));
    }

    for breakdown in &mut breakdowns {
        breakdown.sort_operations();
    }
    breakdowns
}

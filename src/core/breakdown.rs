use serde::{Deserialize, Serialize};

use crate::core::operation::{sort_by_sequence, Operation};
use crate::core::types::LayoutId;

/// The ordered list of operations required to produce one garment layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationBreakdown {
    pub layout_id: LayoutId,

    /// Human-facing layout identity (style number)
    pub layout_code: String,

    /// Style category the layout belongs to
    pub style_type: String,

    /// Operations ordered ascending by sequence number
    #[serde(default)]
    pub operations: Vec<Operation>,
}

impl OperationBreakdown {
    pub fn new(
        layout_id: impl Into<LayoutId>,
        layout_code: impl Into<String>,
        style_type: impl Into<String>,
    ) -> Self {
        Self {
            layout_id: layout_id.into(),
            layout_code: layout_code.into(),
            style_type: style_type.into(),
            operations: Vec::new(),
        }
    }

    /// Builder method: set operations, restoring sequence order
    #[must_use]
    pub fn with_operations(mut self, mut operations: Vec<Operation>) -> Self {
        sort_by_sequence(&mut operations);
        self.operations = operations;
        self
    }

    /// Restore the sequence-order invariant after deserialization
    pub fn sort_operations(&mut self) {
        sort_by_sequence(&mut self.operations);
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Distinct machines used by this breakdown, in first-use order
    pub fn machines(&self) -> Vec<&str> {
        let mut machines: Vec<&str> = Vec::new();
        for op in &self.operations {
            if !machines.contains(&op.machine_name.as_str()) {
                machines.push(op.machine_name.as_str());
            }
        }
        machines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_operations_sorts_by_sequence() {
        let ob = OperationBreakdown::new(1, "L-001", "BRIEF").with_operations(vec![
            Operation::new("HEM", "Coverstitch", 20),
            Operation::new("TACK", "Zig Zag", 10),
        ]);
        assert_eq!(ob.operations[0].operation_name, "TACK");
        assert_eq!(ob.operations[1].operation_name, "HEM");
        assert_eq!(ob.len(), 2);
    }

    #[test]
    fn test_empty_breakdown_is_valid() {
        let ob = OperationBreakdown::new(2, "L-002", "BRIEF");
        assert!(ob.is_empty());
        assert!(ob.machines().is_empty());
    }

    #[test]
    fn test_machines_are_distinct() {
        let ob = OperationBreakdown::new(3, "L-003", "BRIEF").with_operations(vec![
            Operation::new("A", "Zig Zag", 1),
            Operation::new("B", "Overlock", 2),
            Operation::new("C", "Zig Zag", 3),
        ]);
        assert_eq!(ob.machines(), vec!["Zig Zag", "Overlock"]);
    }

    #[test]
    fn test_deserialize_without_operations() {
        let json = r#"{"layout_id": 5, "layout_code": "X", "style_type": "Y"}"#;
        let ob: OperationBreakdown = serde_json::from_str(json).unwrap();
        assert_eq!(ob.layout_id, LayoutId(5));
        assert!(ob.is_empty());
    }
}

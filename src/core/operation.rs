use serde::{Deserialize, Serialize};

/// A single sewing operation bound to a machine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// Operation description (e.g. "TACK SIDE SEAMS UPPER+UNDER")
    pub operation_name: String,

    /// Machine performing the operation (e.g. "Zig Zag Machine")
    pub machine_name: String,

    /// Position within the breakdown; unique per breakdown, not necessarily contiguous
    pub sequence_number: u32,
}

impl Operation {
    pub fn new(
        operation_name: impl Into<String>,
        machine_name: impl Into<String>,
        sequence_number: u32,
    ) -> Self {
        Self {
            operation_name: operation_name.into(),
            machine_name: machine_name.into(),
            sequence_number,
        }
    }
}

/// Sort operations by sequence number, keeping the original order for ties
pub fn sort_by_sequence(operations: &mut [Operation]) {
    operations.sort_by_key(|op| op.sequence_number);
}

/// True if every sequence number in the list appears at most once
#[must_use]
pub fn has_unique_sequence_numbers(operations: &[Operation]) -> bool {
    let mut seen = std::collections::HashSet::with_capacity(operations.len());
    operations.iter().all(|op| seen.insert(op.sequence_number))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_by_sequence_is_stable() {
        let mut ops = vec![
            Operation::new("c", "m", 3),
            Operation::new("a1", "m", 1),
            Operation::new("b", "m", 2),
            Operation::new("a2", "m", 1),
        ];
        sort_by_sequence(&mut ops);
        let names: Vec<&str> = ops.iter().map(|o| o.operation_name.as_str()).collect();
        assert_eq!(names, vec!["a1", "a2", "b", "c"]);
    }

    #[test]
    fn test_unique_sequence_numbers() {
        let ops = vec![Operation::new("a", "m", 1), Operation::new("b", "m", 5)];
        assert!(has_unique_sequence_numbers(&ops));

        let dup = vec![Operation::new("a", "m", 1), Operation::new("b", "m", 1)];
        assert!(!has_unique_sequence_numbers(&dup));
        assert!(has_unique_sequence_numbers(&[]));
    }
}

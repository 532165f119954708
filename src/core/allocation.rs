use serde::{Deserialize, Serialize};

use crate::core::types::LayoutId;

/// Assignment of a layout to a production line with its target and observed efficiency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    /// Layout this allocation belongs to
    pub layout_id: LayoutId,

    pub allocation_id: i64,

    pub allocation_name: String,

    /// Production line, when the source records one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_id: Option<i64>,

    /// Pieces per hour
    #[serde(default)]
    pub hourly_target: f64,

    /// Observed efficiency percentage (0-100); serialized as null when unknown
    #[serde(default)]
    pub run_efficiency: Option<f64>,
}

impl Allocation {
    pub fn new(
        layout_id: impl Into<LayoutId>,
        allocation_id: i64,
        allocation_name: impl Into<String>,
        hourly_target: f64,
    ) -> Self {
        Self {
            layout_id: layout_id.into(),
            allocation_id,
            allocation_name: allocation_name.into(),
            line_id: None,
            hourly_target,
            run_efficiency: None,
        }
    }

    #[must_use]
    pub fn with_run_efficiency(mut self, run_efficiency: f64) -> Self {
        self.run_efficiency = Some(run_efficiency);
        self
    }

    #[must_use]
    pub fn with_line_id(mut self, line_id: i64) -> Self {
        self.line_id = Some(line_id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_efficiency_serializes_as_null() {
        let alloc = Allocation::new(1, 10, "Line A", 120.0);
        let json = serde_json::to_value(&alloc).unwrap();
        assert!(json["run_efficiency"].is_null());
        assert!(json.get("line_id").is_none());
    }

    #[test]
    fn test_deserialize_source_record() {
        let json = r#"{
            "layout_id": 7,
            "allocation_id": 3,
            "allocation_name": "Line 4 - Day",
            "line_id": 4,
            "hourly_target": 85.5,
            "run_efficiency": null
        }"#;
        let alloc: Allocation = serde_json::from_str(json).unwrap();
        assert_eq!(alloc.layout_id, LayoutId(7));
        assert_eq!(alloc.line_id, Some(4));
        assert!(alloc.run_efficiency.is_none());
    }
}

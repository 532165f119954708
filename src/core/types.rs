use serde::{Deserialize, Serialize};

/// Identity of a layout (one recorded operation breakdown)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct LayoutId(pub i64);

impl LayoutId {
    #[must_use]
    pub fn new(id: i64) -> Self {
        Self(id)
    }
}

impl From<i64> for LayoutId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for LayoutId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tenant owning a set of style types and layouts
pub type TenantId = i64;

/// Which side of the catalog a record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    /// Resolved through a provider (catalog or database)
    Provider,
    /// Supplied by the caller alongside the query
    Override,
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Provider => write!(f, "provider"),
            Self::Override => write!(f, "override"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_id_serializes_as_integer() {
        let id = LayoutId::new(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
        let parsed: LayoutId = serde_json::from_str("7").unwrap();
        assert_eq!(parsed, LayoutId(7));
    }

    #[test]
    fn test_layout_id_ordering() {
        let mut ids = vec![LayoutId(9), LayoutId(-1), LayoutId(3)];
        ids.sort();
        assert_eq!(ids, vec![LayoutId(-1), LayoutId(3), LayoutId(9)]);
    }
}

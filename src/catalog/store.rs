use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use thiserror::Error;

use crate::catalog::provider::{AllocationProvider, CandidateProvider, ProviderError};
use crate::core::allocation::Allocation;
use crate::core::breakdown::OperationBreakdown;
use crate::core::operation::has_unique_sequence_numbers;
use crate::core::types::{LayoutId, TenantId};
use crate::utils::validation::normalize_style_type;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Duplicate layout id {0} in catalog")]
    DuplicateLayout(LayoutId),
}

/// Catalog version for compatibility checking
pub const CATALOG_VERSION: &str = "1.0.0";

/// A recorded breakdown together with the tenant that owns it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogLayout {
    pub tenant_id: TenantId,

    #[serde(flatten)]
    pub breakdown: OperationBreakdown,
}

/// Serializable catalog format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogData {
    pub version: String,
    pub created_at: String,
    pub layouts: Vec<CatalogLayout>,
    #[serde(default)]
    pub allocations: Vec<Allocation>,
}

/// In-memory catalog of recorded breakdowns and allocations, with indexes
#[derive(Debug)]
pub struct OperationCatalog {
    /// All recorded layouts
    pub layouts: Vec<CatalogLayout>,

    /// All recorded allocations
    pub allocations: Vec<Allocation>,

    /// Index: layout id -> index in layouts vec
    id_to_index: HashMap<LayoutId, usize>,

    /// Index: (tenant, trimmed style type) -> indices of layouts
    style_to_layouts: HashMap<(TenantId, String), Vec<usize>>,

    /// Index: (tenant, layout code) -> layout index
    code_to_layout: HashMap<(TenantId, String), usize>,

    /// Index: layout id -> indices of allocations, in insertion order
    layout_to_allocations: HashMap<LayoutId, Vec<usize>>,
}

impl OperationCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            layouts: Vec::new(),
            allocations: Vec::new(),
            id_to_index: HashMap::new(),
            style_to_layouts: HashMap::new(),
            code_to_layout: HashMap::new(),
            layout_to_allocations: HashMap::new(),
        }
    }

    /// Load the embedded sample catalog
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded JSON is malformed (validated at build time).
    pub fn load_embedded() -> Result<Self, CatalogError> {
        // Validated at compile time via build.rs
        const EMBEDDED_CATALOG: &str = include_str!("../../catalogs/sample_catalog.json");
        Self::from_json(EMBEDDED_CATALOG)
    }

    /// Load catalog from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse catalog from JSON string
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or repeats a layout id.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let data: CatalogData = serde_json::from_str(json)?;

        // Version check (warn but don't fail)
        if data.version != CATALOG_VERSION {
            tracing::warn!(
                "Catalog version mismatch (expected {}, found {})",
                CATALOG_VERSION,
                data.version
            );
        }

        let mut catalog = Self::new();
        for layout in data.layouts {
            catalog.add_layout(layout.tenant_id, layout.breakdown)?;
        }
        for allocation in data.allocations {
            catalog.add_allocation(allocation);
        }

        Ok(catalog)
    }

    /// Add a breakdown owned by `tenant_id`
    ///
    /// A layout code already used by the tenant stays bound to the earlier
    /// layout for [`find_by_layout_code`](Self::find_by_layout_code).
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateLayout` if the layout id is already present.
    pub fn add_layout(
        &mut self,
        tenant_id: TenantId,
        mut breakdown: OperationBreakdown,
    ) -> Result<(), CatalogError> {
        if self.id_to_index.contains_key(&breakdown.layout_id) {
            return Err(CatalogError::DuplicateLayout(breakdown.layout_id));
        }

        if !has_unique_sequence_numbers(&breakdown.operations) {
            tracing::warn!(
                "Layout {} repeats a sequence number; ties keep recorded order",
                breakdown.layout_id
            );
        }

        breakdown.sort_operations();
        let index = self.layouts.len();

        self.id_to_index.insert(breakdown.layout_id, index);
        self.style_to_layouts
            .entry((tenant_id, normalize_style_type(&breakdown.style_type)))
            .or_default()
            .push(index);
        let code_key = (tenant_id, breakdown.layout_code.trim().to_string());
        if let Some(&existing) = self.code_to_layout.get(&code_key) {
            tracing::warn!(
                "Layout {} reuses code '{}' of layout {} for tenant {}; lookups by code keep layout {}",
                breakdown.layout_id,
                code_key.1,
                self.layouts[existing].breakdown.layout_id,
                tenant_id,
                self.layouts[existing].breakdown.layout_id
            );
        } else {
            self.code_to_layout.insert(code_key, index);
        }

        self.layouts.push(CatalogLayout {
            tenant_id,
            breakdown,
        });
        Ok(())
    }

    /// Add an allocation; allocations for unknown layouts are kept but logged
    pub fn add_allocation(&mut self, allocation: Allocation) {
        if !self.id_to_index.contains_key(&allocation.layout_id) {
            tracing::warn!(
                "Allocation {} references unknown layout {}",
                allocation.allocation_id,
                allocation.layout_id
            );
        }

        let index = self.allocations.len();
        self.layout_to_allocations
            .entry(allocation.layout_id)
            .or_default()
            .push(index);
        self.allocations.push(allocation);
    }

    /// Get a layout by id
    pub fn get(&self, layout_id: LayoutId) -> Option<&CatalogLayout> {
        self.id_to_index
            .get(&layout_id)
            .map(|&idx| &self.layouts[idx])
    }

    /// Breakdowns recorded for a tenant and style type, in insertion order
    pub fn breakdowns(&self, tenant_id: TenantId, style_type: &str) -> Vec<&OperationBreakdown> {
        self.style_to_layouts
            .get(&(tenant_id, normalize_style_type(style_type)))
            .map(|indices| {
                indices
                    .iter()
                    .map(|&idx| &self.layouts[idx].breakdown)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Find a tenant's layout by its code (style number)
    pub fn find_by_layout_code(
        &self,
        tenant_id: TenantId,
        layout_code: &str,
    ) -> Option<&CatalogLayout> {
        self.code_to_layout
            .get(&(tenant_id, layout_code.trim().to_string()))
            .map(|&idx| &self.layouts[idx])
    }

    /// Distinct style types recorded for a tenant, sorted
    pub fn style_types(&self, tenant_id: TenantId) -> Vec<String> {
        self.style_to_layouts
            .keys()
            .filter(|(tenant, _)| *tenant == tenant_id)
            .map(|(_, style)| style.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct tenants present in the catalog, sorted
    pub fn tenants(&self) -> Vec<TenantId> {
        self.layouts
            .iter()
            .map(|l| l.tenant_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Allocations recorded for a layout, in insertion order
    pub fn allocations_for(&self, layout_id: LayoutId) -> Vec<&Allocation> {
        self.layout_to_allocations
            .get(&layout_id)
            .map(|indices| indices.iter().map(|&idx| &self.allocations[idx]).collect())
            .unwrap_or_default()
    }

    /// Export catalog to JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, CatalogError> {
        let data = CatalogData {
            version: CATALOG_VERSION.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            layouts: self.layouts.clone(),
            allocations: self.allocations.clone(),
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }

    /// Number of layouts in catalog
    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    /// Check if catalog is empty
    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }
}

impl Default for OperationCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CandidateProvider for OperationCatalog {
    async fn fetch_candidates(
        &self,
        tenant_id: TenantId,
        style_type: &str,
    ) -> Result<Vec<OperationBreakdown>, ProviderError> {
        Ok(self
            .breakdowns(tenant_id, style_type)
            .into_iter()
            .cloned()
            .collect())
    }
}

#[async_trait]
impl AllocationProvider for OperationCatalog {
    async fn fetch_allocations(
        &self,
        layout_id: LayoutId,
    ) -> Result<Vec<Allocation>, ProviderError> {
        Ok(self
            .allocations_for(layout_id)
            .into_iter()
            .cloned()
            .collect())
    }
}

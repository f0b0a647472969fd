//! Read-only views over the material list: category set and search filter.

use crate::material::Material;
use std::collections::BTreeSet;

/// De-duplicated, sorted category names.
pub fn categories(materials: &[Material]) -> Vec<String> {
    materials
        .iter()
        .map(|m| m.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Search text plus an optional category selection.
///
/// An empty search matches everything; `None` (or an empty string) as the
/// category means "All Categories".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    pub search: String,
    pub category: Option<String>,
}

impl CatalogFilter {
    pub fn new(search: impl Into<String>, category: Option<String>) -> Self {
        Self {
            search: search.into(),
            category,
        }
    }

    pub fn matches(&self, material: &Material) -> bool {
        let needle = self.search.to_lowercase();
        let matches_search = material.name.to_lowercase().contains(&needle)
            || material
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&needle));

        let matches_category = match self.category.as_deref() {
            None | Some("") => true,
            Some(category) => material.category == category,
        };

        matches_search && matches_category
    }

    /// Materials passing the filter, in list order.
    pub fn apply<'a>(&self, materials: &'a [Material]) -> Vec<&'a Material> {
        materials.iter().filter(|m| self.matches(m)).collect()
    }
}

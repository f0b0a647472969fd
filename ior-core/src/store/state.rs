//! Catalog state and the operations that change it

use ior_common::Material;

/// State held by the catalog store.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CatalogState {
    /// Materials in arrival order from the last successful fetch
    pub materials: Vec<Material>,
    /// Whether admin mode is unlocked
    pub is_admin: bool,
    /// Whether any remote call is outstanding
    pub is_loading: bool,
    /// Message for the most recent failed operation
    pub error: Option<String>,
    in_flight: usize,
}

/// Store operations that talk to the remote collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Fetch,
    Add,
    Update,
    Delete,
}

impl Operation {
    /// The fixed message stored in `CatalogState::error` when this operation fails.
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::Fetch => "Failed to fetch materials",
            Operation::Add => "Failed to add material",
            Operation::Update => "Failed to update material",
            Operation::Delete => "Failed to delete material",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Operation::Fetch => "fetch",
            Operation::Add => "add",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

impl CatalogState {
    pub fn material(&self, id: &str) -> Option<&Material> {
        self.materials.iter().find(|m| m.id == id)
    }

    pub(crate) fn begin(&mut self) {
        self.in_flight += 1;
        self.is_loading = true;
        self.error = None;
    }

    pub(crate) fn finish(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.is_loading = self.in_flight > 0;
    }

    pub(crate) fn fail(&mut self, operation: Operation) {
        self.finish();
        self.error = Some(operation.failure_message().to_string());
    }

    /// Replace the element keyed by `id`, which the stored record keeps.
    /// Returns false if none matched.
    pub(crate) fn replace(&mut self, id: &str, mut material: Material) -> bool {
        match self.materials.iter_mut().find(|m| m.id == id) {
            Some(slot) => {
                material.id = slot.id.clone();
                *slot = material;
                true
            }
            None => false,
        }
    }

    pub(crate) fn remove(&mut self, id: &str) {
        self.materials.retain(|m| m.id != id);
    }
}

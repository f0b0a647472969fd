use std::path::Path;

use ior_common::{Material, MaterialDraft, MaterialPatch};

/// In-memory materials collection. Nothing is written to disk.
#[derive(Clone, Debug, Default)]
pub struct MaterialCollection {
    materials: Vec<Material>,
}

impl MaterialCollection {
    pub fn new(materials: Vec<Material>) -> Self {
        Self { materials }
    }

    /// Load a JSON array of materials to start from.
    pub fn load_seed(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path).map_err(|e| format!("read seed: {e}"))?;
        let materials = serde_json::from_str(&content).map_err(|e| format!("parse seed: {e}"))?;
        Ok(Self::new(materials))
    }

    pub fn list(&self) -> &[Material] {
        &self.materials
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Store a new material under a fresh id.
    pub fn insert(&mut self, draft: MaterialDraft) -> Material {
        let material = draft.with_id(uuid::Uuid::new_v4().to_string());
        self.materials.push(material.clone());
        material
    }

    pub fn patch(&mut self, id: &str, patch: &MaterialPatch) -> Option<Material> {
        let material = self.materials.iter_mut().find(|m| m.id == id)?;
        material.apply_patch(patch);
        Some(material.clone())
    }

    pub fn remove(&mut self, id: &str) -> Option<Material> {
        let index = self.materials.iter().position(|m| m.id == id)?;
        Some(self.materials.remove(index))
    }
}

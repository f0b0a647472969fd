use super::*;
use crate::materials_client::MaterialsClientError;
use async_trait::async_trait;
use ior_common::Material;
use reqwest::StatusCode;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// In-memory stand-in for the remote collection.
#[derive(Default)]
struct FakeApi {
    materials: Mutex<Vec<Material>>,
    next_id: AtomicUsize,
    failing: AtomicBool,
    calls: AtomicUsize,
    /// When set, `list_all` waits for a notification before answering.
    list_gate: Option<Arc<Notify>>,
    /// When set, `update` answers with this id instead of the requested one.
    update_echo_id: Option<String>,
}

impl FakeApi {
    fn with(materials: Vec<Material>) -> Self {
        Self {
            materials: Mutex::new(materials),
            ..Default::default()
        }
    }

    fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn server_side(&self) -> Vec<Material> {
        self.materials.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), MaterialsClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            Err(MaterialsClientError::Status(StatusCode::SERVICE_UNAVAILABLE))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl MaterialsApi for FakeApi {
    async fn list_all(&self) -> Result<Vec<Material>, MaterialsClientError> {
        if let Some(gate) = &self.list_gate {
            gate.notified().await;
        }
        self.check()?;
        Ok(self.server_side())
    }

    async fn create(&self, draft: &MaterialDraft) -> Result<Material, MaterialsClientError> {
        self.check()?;
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let material = draft.clone().with_id(format!("x{n}"));
        self.materials.lock().unwrap().push(material.clone());
        Ok(material)
    }

    async fn update(
        &self,
        id: &str,
        patch: &MaterialPatch,
    ) -> Result<Material, MaterialsClientError> {
        self.check()?;
        let mut materials = self.materials.lock().unwrap();
        let material = materials
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| MaterialsClientError::NotFound(id.to_string()))?;
        material.apply_patch(patch);
        let mut answer = material.clone();
        if let Some(echo) = &self.update_echo_id {
            answer.id = echo.clone();
        }
        Ok(answer)
    }

    async fn delete(&self, id: &str) -> Result<(), MaterialsClientError> {
        self.check()?;
        let mut materials = self.materials.lock().unwrap();
        let before = materials.len();
        materials.retain(|m| m.id != id);
        if materials.len() == before {
            return Err(MaterialsClientError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

fn material(id: &str, name: &str, category: &str, ior: f64) -> Material {
    MaterialDraft::new(name, category, ior).with_id(id)
}

fn seed() -> Vec<Material> {
    vec![
        material("a", "Water", "Liquid", 1.333),
        material("b", "Crown glass", "Glass", 1.52),
        material("c", "Sapphire", "Gemstone", 1.77),
    ]
}

fn store_with(materials: Vec<Material>) -> CatalogStore<FakeApi> {
    CatalogStore::new(FakeApi::with(materials), AdminCredential::new("admin123"))
}

async fn fetched_store() -> CatalogStore<FakeApi> {
    let store = store_with(seed());
    store.fetch_materials().await;
    store
}

#[tokio::test]
async fn fetch_replaces_list_in_server_order() {
    let store = fetched_store().await;
    let state = store.snapshot();

    assert_eq!(state.materials, seed());
    assert!(!state.is_loading);
    assert_eq!(state.error, None);
}

#[tokio::test]
async fn fetch_twice_yields_same_list() {
    let store = fetched_store().await;
    let first = store.snapshot().materials;
    store.fetch_materials().await;
    assert_eq!(store.snapshot().materials, first);
}

#[tokio::test]
async fn add_appends_server_record() {
    let store = fetched_store().await;

    store
        .add_material(MaterialDraft::new("Diamond", "Gemstone", 2.417))
        .await;

    let state = store.snapshot();
    assert_eq!(state.materials.len(), 4);
    let last = state.materials.last().unwrap();
    assert_eq!(last, &material("x1", "Diamond", "Gemstone", 2.417));
    assert_eq!(&state.materials[..3], &seed()[..]);
    assert!(!state.is_loading);
}

#[tokio::test]
async fn update_replaces_in_place() {
    let store = store_with(vec![]);
    store
        .add_material(MaterialDraft::new("Diamond", "Gemstone", 2.417))
        .await;
    store
        .add_material(MaterialDraft::new("Quartz", "Crystal", 1.544))
        .await;

    store
        .update_material("x1", MaterialPatch::ior_value(2.42))
        .await;

    let state = store.snapshot();
    assert_eq!(state.materials.len(), 2);
    assert_eq!(state.materials[0].id, "x1");
    assert_eq!(state.materials[0].ior_value, 2.42);
    assert_eq!(state.materials[0].name, "Diamond");
    assert_eq!(state.materials[1].name, "Quartz");
    assert_eq!(state.error, None);
}

#[tokio::test]
async fn update_of_id_missing_locally_leaves_list_untouched() {
    let store = store_with(seed());
    // Never fetched, so the local list is empty while the server knows "b"
    store
        .update_material("b", MaterialPatch::ior_value(1.5))
        .await;

    let state = store.snapshot();
    assert!(state.materials.is_empty());
    assert_eq!(state.error, None);
    assert_eq!(store.api().server_side()[1].ior_value, 1.5);
}

#[tokio::test]
async fn update_matches_the_requested_id() {
    let store = CatalogStore::new(
        FakeApi {
            update_echo_id: Some("b".into()),
            ..FakeApi::with(seed())
        },
        AdminCredential::new("admin123"),
    );
    store.fetch_materials().await;

    store
        .update_material("a", MaterialPatch::ior_value(1.34))
        .await;

    let state = store.snapshot();
    assert_eq!(state.materials[0].id, "a");
    assert_eq!(state.materials[0].ior_value, 1.34);
    assert_eq!(state.materials[1], seed()[1]);
    assert_eq!(state.error, None);
}

#[tokio::test]
async fn update_of_unknown_id_fails() {
    let store = fetched_store().await;
    store
        .update_material("nope", MaterialPatch::ior_value(1.0))
        .await;

    let state = store.snapshot();
    assert_eq!(state.error.as_deref(), Some("Failed to update material"));
    assert_eq!(state.materials, seed());
}

#[tokio::test]
async fn delete_removes_only_target() {
    let store = fetched_store().await;
    store.delete_material("b").await;

    let ids: Vec<_> = store
        .snapshot()
        .materials
        .iter()
        .map(|m| m.id.clone())
        .collect();
    assert_eq!(ids, vec!["a", "c"]);
}

#[tokio::test]
async fn delete_twice_fails_the_second_time() {
    let store = fetched_store().await;
    store.delete_material("a").await;
    assert_eq!(store.snapshot().error, None);

    store.delete_material("a").await;
    let state = store.snapshot();
    assert_eq!(state.error.as_deref(), Some("Failed to delete material"));
    assert_eq!(state.materials.len(), 2);
}

#[tokio::test]
async fn failures_keep_materials_and_set_fixed_message() {
    let store = fetched_store().await;
    store.api().set_failing(true);

    store.fetch_materials().await;
    let state = store.snapshot();
    assert_eq!(state.error.as_deref(), Some("Failed to fetch materials"));
    assert!(!state.is_loading);
    assert_eq!(state.materials, seed());

    store
        .add_material(MaterialDraft::new("Diamond", "Gemstone", 2.417))
        .await;
    let state = store.snapshot();
    assert_eq!(state.error.as_deref(), Some("Failed to add material"));
    assert_eq!(state.materials, seed());

    store
        .update_material("a", MaterialPatch::ior_value(9.0))
        .await;
    let state = store.snapshot();
    assert_eq!(state.error.as_deref(), Some("Failed to update material"));
    assert_eq!(state.materials, seed());

    store.delete_material("a").await;
    let state = store.snapshot();
    assert_eq!(state.error.as_deref(), Some("Failed to delete material"));
    assert_eq!(state.materials, seed());
    assert!(!state.is_loading);
}

#[tokio::test]
async fn next_operation_clears_error() {
    let store = fetched_store().await;
    store.api().set_failing(true);
    store.fetch_materials().await;
    assert!(store.snapshot().error.is_some());

    store.api().set_failing(false);
    store.fetch_materials().await;
    assert_eq!(store.snapshot().error, None);
}

#[tokio::test]
async fn blank_required_fields_never_reach_the_server() {
    let store = fetched_store().await;
    let calls_before = store.api().calls();

    store
        .add_material(MaterialDraft::new("", "Gemstone", 2.417))
        .await;
    assert_eq!(
        store.snapshot().error.as_deref(),
        Some("Failed to add material")
    );

    let patch = MaterialPatch {
        category: Some("  ".into()),
        ..Default::default()
    };
    store.update_material("a", patch).await;
    assert_eq!(
        store.snapshot().error.as_deref(),
        Some("Failed to update material")
    );

    assert_eq!(store.api().calls(), calls_before);
    assert!(!store.snapshot().is_loading);
    assert_eq!(store.snapshot().materials, seed());
}

#[tokio::test]
async fn login_only_unlocks_with_the_right_password() {
    let store = store_with(vec![]);
    assert!(!store.snapshot().is_admin);

    assert!(!store.login("letmein"));
    assert!(!store.snapshot().is_admin);

    assert!(store.login("admin123"));
    assert!(store.snapshot().is_admin);

    store.logout();
    assert!(!store.snapshot().is_admin);
    assert_eq!(store.api().calls(), 0);
}

#[tokio::test]
async fn set_admin_is_pure_state() {
    let store = store_with(seed());
    store.set_admin(true);

    let state = store.snapshot();
    assert!(state.is_admin);
    assert!(state.materials.is_empty());
    assert!(!state.is_loading);
    assert_eq!(store.api().calls(), 0);
}

#[tokio::test]
async fn validate_password_matches_configured_secret() {
    let store = store_with(vec![]);
    assert!(store.validate_password("admin123"));
    assert!(!store.validate_password("admin1234"));
}

#[tokio::test]
async fn loading_is_visible_while_request_is_pending() {
    let gate = Arc::new(Notify::new());
    let api = FakeApi {
        list_gate: Some(gate.clone()),
        ..FakeApi::with(seed())
    };
    let store = Arc::new(CatalogStore::new(api, AdminCredential::new("admin123")));
    let mut rx = store.subscribe();

    let pending = tokio::spawn({
        let store = store.clone();
        async move { store.fetch_materials().await }
    });

    rx.wait_for(|s| s.is_loading).await.unwrap();
    assert!(store.snapshot().materials.is_empty());

    gate.notify_one();
    pending.await.unwrap();

    let state = store.snapshot();
    assert!(!state.is_loading);
    assert_eq!(state.materials, seed());
}

#[tokio::test]
async fn overlapping_operations_keep_loading_until_all_finish() {
    let gate = Arc::new(Notify::new());
    let api = FakeApi {
        list_gate: Some(gate.clone()),
        ..FakeApi::with(vec![])
    };
    let store = Arc::new(CatalogStore::new(api, AdminCredential::new("admin123")));
    let mut rx = store.subscribe();

    let pending_fetch = tokio::spawn({
        let store = store.clone();
        async move { store.fetch_materials().await }
    });
    rx.wait_for(|s| s.is_loading).await.unwrap();

    store
        .add_material(MaterialDraft::new("Diamond", "Gemstone", 2.417))
        .await;
    assert!(store.snapshot().is_loading);
    assert_eq!(store.snapshot().materials.len(), 1);

    gate.notify_one();
    pending_fetch.await.unwrap();

    let state = store.snapshot();
    assert!(!state.is_loading);
    // The fetch resolved last and saw the created record on the server
    assert_eq!(state.materials.len(), 1);
    assert_eq!(state.materials[0].id, "x1");
}

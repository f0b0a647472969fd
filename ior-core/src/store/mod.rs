//! Catalog store: the in-memory material list and its sync with the remote collection
//!
//! Every mutation waits for the server. State changes happen only when an
//! operation starts and when its remote call resolves, each applied
//! atomically through a `watch` channel so presentation code can subscribe.

mod state;

pub use state::{CatalogState, Operation};

use crate::admin::AdminCredential;
use crate::materials_client::MaterialsApi;
use ior_common::{MaterialDraft, MaterialPatch};
use std::fmt::Display;
use tokio::sync::watch;
use tracing::{error, info, warn};

pub struct CatalogStore<A> {
    api: A,
    credential: AdminCredential,
    state: watch::Sender<CatalogState>,
}

impl<A: MaterialsApi> CatalogStore<A> {
    pub fn new(api: A, credential: AdminCredential) -> Self {
        let (state, _) = watch::channel(CatalogState::default());
        Self {
            api,
            credential,
            state,
        }
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> CatalogState {
        self.state.borrow().clone()
    }

    /// Receiver that observes every state transition.
    pub fn subscribe(&self) -> watch::Receiver<CatalogState> {
        self.state.subscribe()
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    fn begin(&self, operation: Operation, target: Option<&str>) {
        match target {
            Some(id) => info!("{} material {id}", operation.label()),
            None => info!("{} materials", operation.label()),
        }
        self.state.send_modify(|s| s.begin());
    }

    fn fail(&self, operation: Operation, err: impl Display) {
        error!("{} failed: {err}", operation.label());
        self.state.send_modify(|s| s.fail(operation));
    }

    /// Replace the list with the server's collection.
    pub async fn fetch_materials(&self) {
        self.begin(Operation::Fetch, None);
        match self.api.list_all().await {
            Ok(materials) => {
                info!("fetched {} materials", materials.len());
                self.state.send_modify(|s| {
                    s.materials = materials;
                    s.finish();
                });
            }
            Err(e) => self.fail(Operation::Fetch, e),
        }
    }

    /// Create a material and append the server's record.
    pub async fn add_material(&self, draft: MaterialDraft) {
        self.begin(Operation::Add, None);
        if let Some(field) = draft.missing_required() {
            self.fail(Operation::Add, format!("{field} is required"));
            return;
        }
        match self.api.create(&draft).await {
            Ok(material) => {
                info!("added material {}", material.id);
                self.state.send_modify(|s| {
                    // Keep ids unique if the server hands back one we already hold
                    if !s.replace(&material.id, material.clone()) {
                        s.materials.push(material);
                    }
                    s.finish();
                });
            }
            Err(e) => self.fail(Operation::Add, e),
        }
    }

    /// Patch a material and replace the local copy with the server's record.
    /// The element is matched on `id`, not on the id the server echoes.
    ///
    /// If `id` is not in the local list the server's answer is dropped and the
    /// list is left as it was.
    pub async fn update_material(&self, id: &str, patch: MaterialPatch) {
        self.begin(Operation::Update, Some(id));
        if let Some(field) = patch.blanks_required() {
            self.fail(Operation::Update, format!("{field} is required"));
            return;
        }
        match self.api.update(id, &patch).await {
            Ok(material) => self.state.send_modify(|s| {
                if !s.replace(id, material) {
                    warn!("updated material {id} is not in the local list, ignoring");
                }
                s.finish();
            }),
            Err(e) => self.fail(Operation::Update, e),
        }
    }

    /// Delete a material remotely, then drop it from the list.
    pub async fn delete_material(&self, id: &str) {
        self.begin(Operation::Delete, Some(id));
        match self.api.delete(id).await {
            Ok(()) => self.state.send_modify(|s| {
                s.remove(id);
                s.finish();
            }),
            Err(e) => self.fail(Operation::Delete, e),
        }
    }

    pub fn set_admin(&self, status: bool) {
        self.state.send_modify(|s| s.is_admin = status);
    }

    pub fn validate_password(&self, candidate: &str) -> bool {
        self.credential.validate(candidate)
    }

    /// Unlock admin mode if the password is right. Returns whether it was.
    pub fn login(&self, candidate: &str) -> bool {
        if self.validate_password(candidate) {
            self.set_admin(true);
            true
        } else {
            warn!("admin login rejected");
            false
        }
    }

    pub fn logout(&self) {
        self.set_admin(false);
    }
}

#[cfg(test)]
mod tests;

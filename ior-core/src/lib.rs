pub mod admin;
pub mod config;
pub mod materials_client;
pub mod store;

pub use admin::AdminCredential;
pub use config::Config;
pub use materials_client::{MaterialsApi, MaterialsClient, MaterialsClientError};
pub use store::{CatalogState, CatalogStore, Operation};

/// Build a store talking to the collection named in `config`.
pub fn store_from_config(config: &Config) -> CatalogStore<MaterialsClient> {
    CatalogStore::new(
        MaterialsClient::new(config.api_url.clone()),
        AdminCredential::new(config.admin_password.clone()),
    )
}

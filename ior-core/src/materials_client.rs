use async_trait::async_trait;
use ior_common::{Material, MaterialDraft, MaterialPatch};
use reqwest::StatusCode;
use tracing::debug;

/// Transport-level failure talking to the materials collection.
#[derive(Debug, thiserror::Error)]
pub enum MaterialsClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("material not found: {0}")]
    NotFound(String),
    #[error("server responded with {0}")]
    Status(StatusCode),
}

/// The four operations of a remote materials collection.
///
/// Implementations are stateless: each call issues exactly one request and
/// keeps nothing afterwards.
#[async_trait]
pub trait MaterialsApi: Send + Sync {
    /// Fetch the whole collection, in server order.
    async fn list_all(&self) -> Result<Vec<Material>, MaterialsClientError>;

    /// Create a material. The server assigns the id.
    async fn create(&self, draft: &MaterialDraft) -> Result<Material, MaterialsClientError>;

    /// Patch an existing material and return the full updated record.
    async fn update(&self, id: &str, patch: &MaterialPatch)
        -> Result<Material, MaterialsClientError>;

    /// Remove a material. Deleting an unknown id is an error.
    async fn delete(&self, id: &str) -> Result<(), MaterialsClientError>;
}

/// REST client for a `/materials` resource.
pub struct MaterialsClient {
    base_url: String,
    http: reqwest::Client,
}

impl MaterialsClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/materials", self.base_url)
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/materials/{}", self.base_url, urlencoding::encode(id))
    }
}

/// Map non-2xx responses to errors. 404 on an item URL becomes `NotFound`.
fn check_status(
    resp: reqwest::Response,
    id: Option<&str>,
) -> Result<reqwest::Response, MaterialsClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    match id {
        Some(id) if status == StatusCode::NOT_FOUND => {
            Err(MaterialsClientError::NotFound(id.to_string()))
        }
        _ => Err(MaterialsClientError::Status(status)),
    }
}

#[async_trait]
impl MaterialsApi for MaterialsClient {
    async fn list_all(&self) -> Result<Vec<Material>, MaterialsClientError> {
        let url = self.collection_url();
        debug!("GET {url}");
        let resp = self.http.get(&url).send().await?;
        Ok(check_status(resp, None)?.json().await?)
    }

    async fn create(&self, draft: &MaterialDraft) -> Result<Material, MaterialsClientError> {
        let url = self.collection_url();
        debug!("POST {url}");
        let resp = self.http.post(&url).json(draft).send().await?;
        Ok(check_status(resp, None)?.json().await?)
    }

    async fn update(
        &self,
        id: &str,
        patch: &MaterialPatch,
    ) -> Result<Material, MaterialsClientError> {
        let url = self.item_url(id);
        debug!("PATCH {url}");
        let resp = self.http.patch(&url).json(patch).send().await?;
        Ok(check_status(resp, Some(id))?.json().await?)
    }

    async fn delete(&self, id: &str) -> Result<(), MaterialsClientError> {
        let url = self.item_url(id);
        debug!("DELETE {url}");
        let resp = self.http.delete(&url).send().await?;
        check_status(resp, Some(id))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_url_has_materials_path() {
        let client = MaterialsClient::new("http://localhost:3001");
        assert_eq!(client.collection_url(), "http://localhost:3001/materials");
    }

    #[test]
    fn base_url_strips_trailing_slash() {
        let client = MaterialsClient::new("http://localhost:3001/");
        assert_eq!(client.base_url(), "http://localhost:3001");
        assert_eq!(client.item_url("x1"), "http://localhost:3001/materials/x1");
    }

    #[test]
    fn item_url_encodes_id() {
        let client = MaterialsClient::new("http://localhost:3001");
        assert_eq!(
            client.item_url("a b/c"),
            "http://localhost:3001/materials/a%20b%2Fc"
        );
    }

    #[test]
    fn base_url_may_carry_a_prefix() {
        let client = MaterialsClient::new("https://lab.example.org/api/v1");
        assert_eq!(
            client.collection_url(),
            "https://lab.example.org/api/v1/materials"
        );
    }

    #[test]
    fn not_found_error_names_the_id() {
        let err = MaterialsClientError::NotFound("x9".into());
        assert_eq!(err.to_string(), "material not found: x9");

        let err = MaterialsClientError::Status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "server responded with 500 Internal Server Error");
    }
}

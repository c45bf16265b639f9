//! Remote collection client
//!
//! The collection lives at a single base URL; single records are
//! addressed as `<base>/{id}`.
//!
//! - `GET <base>` lists the collection
//! - `POST <base>` creates a record (body without id)
//! - `PUT <base>/{id}` replaces a record
//! - `DELETE <base>/{id}` removes a record

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::error::ApiError;
use crate::model::{NewUser, UserId, UserRecord};

/// Result type alias for collection requests
pub type Result<T> = std::result::Result<T, ApiError>;

/// Default collection endpoint
pub const DEFAULT_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/users";

/// Operations on the remote user collection
#[async_trait]
pub trait UserApi: Send + Sync {
    /// Fetch the full collection
    async fn list_users(&self) -> Result<Vec<UserRecord>>;

    /// Create a record; the server's answer carries its own id
    async fn create_user(&self, user: &NewUser) -> Result<UserRecord>;

    /// Replace the record with `user.id`
    async fn update_user(&self, user: &UserRecord) -> Result<UserRecord>;

    /// Remove the record with `id`
    async fn delete_user(&self, id: UserId) -> Result<()>;
}

/// Options for building an [`HttpUserApi`]
#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    /// Per-request timeout; `None` leaves requests untimed
    pub timeout: Option<Duration>,
    /// Skip TLS certificate verification
    pub insecure: bool,
}

/// reqwest-backed [`UserApi`]
#[derive(Debug, Clone)]
pub struct HttpUserApi {
    client: Client,
    base: String,
}

#[derive(Deserialize, Debug)]
struct ErrorResponse {
    error: String,
    #[serde(default)]
    message: Option<String>,
}

impl HttpUserApi {
    /// Build a client for the collection at `endpoint`
    pub fn new(endpoint: impl Into<String>, options: &ClientOptions) -> Result<Self> {
        let endpoint = endpoint.into();
        let base = endpoint.trim_end_matches('/').to_string();
        if base.is_empty() {
            return Err(ApiError::endpoint(endpoint, "endpoint is empty"));
        }
        if base.contains('?') || base.contains('#') {
            return Err(ApiError::endpoint(
                endpoint,
                "endpoint must not carry a query or fragment",
            ));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        if options.insecure {
            builder = builder.danger_accept_invalid_certs(true);
        }
        let client = builder.build()?;

        Ok(Self { client, base })
    }

    /// Collection URL, without trailing slash
    pub fn base(&self) -> &str {
        &self.base
    }

    fn item_url(&self, id: UserId) -> String {
        format!("{}/{}", self.base, id)
    }
}

/// Map non-success statuses to [`ApiError::Status`], preferring a JSON
/// `{"error": ...}` body when the server sends one
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    let message = match serde_json::from_str::<ErrorResponse>(&text) {
        Ok(ErrorResponse {
            error,
            message: Some(message),
        }) => format!("{error} ({message})"),
        Ok(ErrorResponse { error, .. }) => error,
        Err(_) if text.trim().is_empty() => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
        Err(_) => text,
    };

    Err(ApiError::status(status, message))
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let response = check_status(response).await?;
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::decode(e.to_string()))
}

#[async_trait]
impl UserApi for HttpUserApi {
    async fn list_users(&self) -> Result<Vec<UserRecord>> {
        debug!(url = %self.base, "GET collection");
        let response = self.client.get(&self.base).send().await?;
        decode(response).await
    }

    async fn create_user(&self, user: &NewUser) -> Result<UserRecord> {
        debug!(url = %self.base, "POST record");
        let response = self.client.post(&self.base).json(user).send().await?;
        decode(response).await
    }

    async fn update_user(&self, user: &UserRecord) -> Result<UserRecord> {
        let url = self.item_url(user.id);
        debug!(url = %url, "PUT record");
        let response = self.client.put(&url).json(user).send().await?;
        decode(response).await
    }

    async fn delete_user(&self, id: UserId) -> Result<()> {
        let url = self.item_url(id);
        debug!(url = %url, "DELETE record");
        let response = self.client.delete(&url).send().await?;
        check_status(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_trims_trailing_slash() {
        let api = HttpUserApi::new("http://localhost:3030/users/", &ClientOptions::default())
            .unwrap();
        assert_eq!(api.base(), "http://localhost:3030/users");
        assert_eq!(api.item_url(UserId(5)), "http://localhost:3030/users/5");
    }

    #[test]
    fn test_rejects_unusable_endpoints() {
        let opts = ClientOptions::default();
        assert!(matches!(
            HttpUserApi::new("/", &opts),
            Err(ApiError::Endpoint { .. })
        ));
        assert!(matches!(
            HttpUserApi::new("http://x/users?page=2", &opts),
            Err(ApiError::Endpoint { .. })
        ));
    }
}

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::error::GatewayError;
use crate::config::ClientConfig;
use crate::entity::{DeleteAcknowledgement, Note, NoteInput};

/// Typed access to a remote note store.
///
/// Every call is one fresh round trip. Failures are handed back unchanged;
/// the gateway never retries and keeps no state between calls.
#[derive(Debug, Clone)]
pub struct NotesGateway {
    http: reqwest::Client,
    base_url: String,
}

impl NotesGateway {
    pub fn new(config: &ClientConfig) -> Result<Self, GatewayError> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        match Url::parse(&base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => return Err(GatewayError::InvalidBaseUrl(config.base_url.clone())),
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().map_err(GatewayError::Client)?;

        Ok(Self { http, base_url })
    }

    /// Gateway for `base_url` with no request timeout.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, GatewayError> {
        Self::new(&ClientConfig {
            base_url: base_url.into(),
            timeout_secs: None,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn list_notes(&self) -> Result<Vec<Note>, GatewayError> {
        self.send(Method::GET, "/notes", None).await
    }

    pub async fn get_note(&self, id: i64) -> Result<Note, GatewayError> {
        self.send(Method::GET, &format!("/notes/{id}"), None).await
    }

    pub async fn create_note(&self, input: &NoteInput) -> Result<Note, GatewayError> {
        self.send(Method::POST, "/notes", Some(input)).await
    }

    pub async fn update_note(&self, id: i64, input: &NoteInput) -> Result<Note, GatewayError> {
        self.send(Method::PUT, &format!("/notes/{id}"), Some(input))
            .await
    }

    pub async fn delete_note(&self, id: i64) -> Result<DeleteAcknowledgement, GatewayError> {
        self.send(Method::DELETE, &format!("/notes/{id}"), None)
            .await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&NoteInput>,
    ) -> Result<T, GatewayError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "api request");

        let mut request = self.http.request(method.clone(), &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(source) => {
                warn!(%method, %url, error = %source, "api request failed");
                return Err(GatewayError::Transport { url, source });
            }
        };

        let status = response.status();
        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(source) => {
                warn!(%method, %url, error = %source, "api response interrupted");
                return Err(GatewayError::Transport { url, source });
            }
        };
        debug!(status = status.as_u16(), %url, "api response");

        if !status.is_success() {
            let body = String::from_utf8_lossy(&bytes).into_owned();
            warn!(status = status.as_u16(), %method, %url, %body, "api error response");
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_slice(&bytes).map_err(|source| GatewayError::Decode { url, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_base_url() {
        for url in ["", "not a url", "ftp://example.com"] {
            let err = NotesGateway::with_base_url(url).unwrap_err();
            assert!(matches!(err, GatewayError::InvalidBaseUrl(_)));
        }
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let gateway = NotesGateway::with_base_url("http://127.0.0.1:5000/").unwrap();
        assert_eq!(gateway.base_url(), "http://127.0.0.1:5000");
    }

    #[tokio::test]
    async fn test_unreachable_store_is_transport_failure() {
        // grab a free port, then release it so nothing is listening there
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let gateway = NotesGateway::with_base_url(format!("http://{addr}")).unwrap();
        let err = gateway.list_notes().await.unwrap_err();
        assert!(err.is_transport());
        assert_eq!(err.status(), None);
        assert_eq!(err.body(), None);
    }
}

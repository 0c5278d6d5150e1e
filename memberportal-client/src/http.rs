/// HTTP plumbing shared by the service wrappers
///
/// [`PortalHttp`] owns the `reqwest` client and the configuration, attaches
/// the bearer token, maps non-success responses to
/// [`ClientError::Status`] (decoding the problem body when present) and
/// reads the `X-Total-Count` header of paged listings.

use memberportal_shared::models::page::{Page, PageRequest, TOTAL_COUNT_HEADER};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult, Problem};

/// Shared HTTP client
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Clone)]
pub struct PortalHttp {
    client: reqwest::Client,
    config: Arc<ClientConfig>,
}

impl PortalHttp {
    /// Builds the HTTP client from configuration
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Config` if the configuration is invalid or the
    /// TLS backend cannot be initialised.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        config
            .validate()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.api.timeout_secs))
            .build()
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to create HTTP client");
                ClientError::Config(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    /// Client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        tracing::debug!(method = method.as_str(), url, "Portal request");
        let builder = self.client.request(method, url);
        match &self.config.api.auth_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends a request and turns non-success statuses into errors
    async fn send(&self, builder: RequestBuilder) -> ClientResult<Response> {
        let response = builder.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let problem = serde_json::from_str::<Problem>(&body).ok();
        tracing::warn!(%status, body = %truncate(&body, 200), "Portal request failed");

        Err(ClientError::Status { status, problem })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// `GET` and decode a JSON body
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> ClientResult<T> {
        let response = self.send(self.request(Method::GET, url)).await?;
        Self::decode(response).await
    }

    /// `POST` a JSON body and decode the JSON answer
    pub async fn post_json<B, T>(&self, url: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(self.request(Method::POST, url).json(body)).await?;
        Self::decode(response).await
    }

    /// `PUT` a JSON body and decode the JSON answer
    pub async fn put_json<B, T>(&self, url: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(self.request(Method::PUT, url).json(body)).await?;
        Self::decode(response).await
    }

    /// `POST` a JSON body, ignoring the answer's body
    pub async fn post_no_content<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> ClientResult<()> {
        self.send(self.request(Method::POST, url).json(body)).await?;
        Ok(())
    }

    /// `POST` a plain text body, ignoring the answer's body
    pub async fn post_text(&self, url: &str, body: &str) -> ClientResult<()> {
        let builder = self
            .request(Method::POST, url)
            .header(reqwest::header::CONTENT_TYPE, "text/plain")
            .body(body.to_string());
        self.send(builder).await?;
        Ok(())
    }

    /// `POST` without body, ignoring the answer's body
    pub async fn post_empty(&self, url: &str) -> ClientResult<()> {
        self.send(self.request(Method::POST, url)).await?;
        Ok(())
    }

    /// `DELETE` a resource
    pub async fn delete(&self, url: &str) -> ClientResult<()> {
        self.send(self.request(Method::DELETE, url)).await?;
        Ok(())
    }

    /// `GET` a paged listing
    ///
    /// A missing or unparsable `X-Total-Count` header falls back to the
    /// number of rows received.
    pub async fn get_page<T: DeserializeOwned>(&self, url: &str, req: &PageRequest) -> ClientResult<Page<T>> {
        let builder = self.request(Method::GET, url).query(&req.to_query());
        let response = self.send(builder).await?;

        let total = response
            .headers()
            .get(TOTAL_COUNT_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());

        let items: Vec<T> = Self::decode(response).await?;
        let total_count = total.unwrap_or(items.len() as u64);

        Ok(Page::new(items, total_count))
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

// HTTP transport with the two interceptor hooks.
//
// Request hook: attach the current access token as a bearer credential when
// the session has one; requests without a session go out unauthenticated.
// Response hook: a 401 on a not-yet-retried request runs the refresh
// protocol; every other response reaches the caller unchanged.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use geolens_common::error::{GeoLensError, Result};

use crate::session::SessionStore;

/// Immutable descriptor of one API call. `retried` marks a descriptor that
/// has already been resubmitted after a token refresh; the response hook
/// skips it on the second pass, so a request is retried at most once.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<serde_json::Value>,
    pub retried: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            retried: false,
        }
    }

    pub fn with_body(method: Method, path: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method,
            path: path.into(),
            body: Some(body),
            retried: false,
        }
    }

    fn as_retried(&self) -> Self {
        Self {
            retried: true,
            ..self.clone()
        }
    }
}

/// Fully resolved request handed to the sender: absolute URL, credential
/// already decided.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub method: Method,
    pub url: String,
    pub bearer: Option<String>,
    pub body: Option<serde_json::Value>,
}

#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// The wire seam. Production uses `ReqwestSender`; tests script responses
/// through `testing::MockSender`.
#[async_trait]
pub trait HttpSend: Send + Sync {
    async fn send(&self, request: OutboundRequest) -> Result<RawResponse>;
}

pub struct ReqwestSender {
    client: reqwest::Client,
}

impl ReqwestSender {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");
        Self { client }
    }
}

impl Default for ReqwestSender {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpSend for ReqwestSender {
    async fn send(&self, request: OutboundRequest) -> Result<RawResponse> {
        let mut builder = self.client.request(request.method, &request.url);
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        Ok(RawResponse { status, body })
    }
}

#[derive(Debug, Deserialize)]
struct RefreshedTokens {
    access_token: String,
}

/// One configured client against one base endpoint. Owns no state beyond
/// the session handle; retries happen only through the refresh protocol.
pub struct Transport {
    sender: Arc<dyn HttpSend>,
    session: Arc<dyn SessionStore>,
    base_url: String,
}

impl Transport {
    pub fn new(
        base_url: &str,
        sender: Arc<dyn HttpSend>,
        session: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            sender,
            session,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Run one request through both hooks.
    ///
    /// The bearer token is re-read from the session on every pass, so the
    /// resubmission after a refresh carries the token the refresh just
    /// wrote, never a stale copy.
    pub async fn execute(&self, request: ApiRequest) -> Result<RawResponse> {
        let mut request = request;
        loop {
            let outbound = OutboundRequest {
                method: request.method.clone(),
                url: self.url(&request.path),
                bearer: self.session.access_token(),
                body: request.body.clone(),
            };
            let response = self.sender.send(outbound).await?;

            if response.status == 401 && !request.retried {
                let Some(refresh_token) = self.session.refresh_token() else {
                    // Nothing to refresh with; the caller sees the 401.
                    return Self::into_result(&request.path, response);
                };
                match self.refresh_access(&refresh_token).await {
                    Ok(access) => {
                        self.session.replace_access(&access);
                        debug!(path = request.path.as_str(), "Access token refreshed, retrying");
                        request = request.as_retried();
                        continue;
                    }
                    Err(error) => {
                        warn!(%error, "Token refresh rejected, clearing session");
                        self.session.clear();
                        return Err(GeoLensError::SessionExpired(error.to_string()));
                    }
                }
            }

            return Self::into_result(&request.path, response);
        }
    }

    /// The dedicated refresh call. Goes straight to the sender, with no
    /// bearer attachment and no response hook, so it cannot re-enter itself.
    async fn refresh_access(&self, refresh_token: &str) -> Result<String> {
        let outbound = OutboundRequest {
            method: Method::POST,
            url: self.url("/auth/refresh"),
            bearer: None,
            body: Some(serde_json::json!({ "refresh_token": refresh_token })),
        };
        let response = self.sender.send(outbound).await?;
        if !(200..300).contains(&response.status) {
            return Err(GeoLensError::Api {
                status: response.status,
                message: response.text(),
            });
        }
        let tokens: RefreshedTokens = serde_json::from_slice(&response.body)?;
        Ok(tokens.access_token)
    }

    fn into_result(path: &str, response: RawResponse) -> Result<RawResponse> {
        match response.status {
            200..=299 => Ok(response),
            404 => Err(GeoLensError::NotFound(path.to_string())),
            status => Err(GeoLensError::Api {
                status,
                message: response.text(),
            }),
        }
    }

    // --- Verb helpers ---

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.execute(ApiRequest::new(Method::GET, path)).await?;
        Ok(serde_json::from_slice(&response.body)?)
    }

    /// GET returning the raw body, for binary exports.
    pub async fn get_bytes(&self, path: &str) -> Result<Vec<u8>> {
        let response = self.execute(ApiRequest::new(Method::GET, path)).await?;
        Ok(response.body)
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let body = serde_json::to_value(body)?;
        let response = self
            .execute(ApiRequest::with_body(Method::POST, path, body))
            .await?;
        Ok(serde_json::from_slice(&response.body)?)
    }

    /// POST with no payload and no decoded response (logout and friends).
    pub async fn post_empty(&self, path: &str) -> Result<()> {
        self.execute(ApiRequest::new(Method::POST, path)).await?;
        Ok(())
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let body = serde_json::to_value(body)?;
        let response = self
            .execute(ApiRequest::with_body(Method::PUT, path, body))
            .await?;
        Ok(serde_json::from_slice(&response.body)?)
    }

    pub async fn delete(&self, path: &str) -> Result<()> {
        self.execute(ApiRequest::new(Method::DELETE, path)).await?;
        Ok(())
    }
}

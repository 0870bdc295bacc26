//! The single point of outbound traffic.
//!
//! Every request flows through [`ApiClient::send`]: the current access token
//! is attached as a bearer credential, the response body is screened for
//! HTML (a misrouted endpoint, not the API), transport failures are split
//! from application failures, and a 401 on a protected endpoint hands off to
//! the refresh protocol before anything is propagated.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tokio::sync::Mutex;

use mosaic_auth::TokenStore;
use mosaic_config::MosaicConfig;
use mosaic_core::ApiError;

use crate::endpoints;

/// An owned multipart file part. Kept as plain data (not a `reqwest` form,
/// which is consumed on send) so a replay after refresh can rebuild the
/// identical request.
#[derive(Debug, Clone)]
pub(crate) struct FilePart {
    pub field: String,
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub(crate) enum Payload {
    Empty,
    Json(Value),
    Multipart(Vec<FilePart>),
}

/// A rebuildable description of one outbound request.
#[derive(Debug, Clone)]
pub(crate) struct RequestSpec {
    pub method: Method,
    pub path: String,
    pub query: Vec<(&'static str, String)>,
    pub payload: Payload,
}

impl RequestSpec {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            query: Vec::new(),
            payload: Payload::Empty,
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::DELETE,
            path: path.into(),
            query: Vec::new(),
            payload: Payload::Empty,
        }
    }

    pub fn post_json<T: Serialize>(path: impl Into<String>, body: &T) -> Result<Self, ApiError> {
        Ok(Self {
            method: Method::POST,
            path: path.into(),
            query: Vec::new(),
            payload: Payload::Json(to_json(body)?),
        })
    }

    pub fn patch_json<T: Serialize>(path: impl Into<String>, body: &T) -> Result<Self, ApiError> {
        Ok(Self {
            method: Method::PATCH,
            path: path.into(),
            query: Vec::new(),
            payload: Payload::Json(to_json(body)?),
        })
    }

    pub fn post_multipart(path: impl Into<String>, parts: Vec<FilePart>) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            query: Vec::new(),
            payload: Payload::Multipart(parts),
        }
    }

    pub fn with_query(mut self, key: &'static str, value: impl ToString) -> Self {
        self.query.push((key, value.to_string()));
        self
    }
}

fn to_json<T: Serialize>(body: &T) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Validation(format!("encode request: {e}")))
}

struct ClientInner {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
    tokens: TokenStore,
    /// Guards the refresh exchange so concurrent 401s coalesce into a single
    /// in-flight `/auth/refresh` call.
    refresh_gate: Mutex<()>,
}

/// HTTP client for the Mosaic backend. Cheap to clone; clones share the
/// underlying connection pool, token store, and refresh gate.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

impl ApiClient {
    #[must_use]
    pub fn new(config: &MosaicConfig, tokens: TokenStore) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                http: reqwest::Client::new(),
                base_url: config.api.trimmed_base_url().to_string(),
                timeout: Duration::from_secs(config.api.timeout_secs),
                tokens,
                refresh_gate: Mutex::new(()),
            }),
        }
    }

    /// The token store this client reads bearer credentials from.
    #[must_use]
    pub fn tokens(&self) -> &TokenStore {
        &self.inner.tokens
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    pub(crate) fn refresh_gate(&self) -> &Mutex<()> {
        &self.inner.refresh_gate
    }

    /// Issue a request and return the decoded JSON body.
    ///
    /// On a 401 from a protected endpoint the refresh protocol runs and the
    /// request is replayed at most once; the caller only ever observes the
    /// final outcome.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] variant per the taxonomy in `mosaic-core`.
    pub(crate) async fn send(&self, spec: RequestSpec) -> Result<Value, ApiError> {
        let sent_with = self.inner.tokens.access_token();
        let response = self.dispatch(&spec, sent_with.as_deref()).await?;
        let (status, body) = read_body(response).await?;

        if status == StatusCode::UNAUTHORIZED
            && !endpoints::is_unauthenticated_auth_endpoint(&spec.path)
        {
            return self.refresh_and_replay(spec, sent_with).await;
        }

        finish(status, &body)
    }

    /// Build and fire one attempt of `spec` with the given bearer token.
    pub(crate) async fn dispatch(
        &self,
        spec: &RequestSpec,
        bearer: Option<&str>,
    ) -> Result<reqwest::Response, ApiError> {
        let url = format!("{}{}", self.inner.base_url, spec.path);
        let mut builder = self
            .inner
            .http
            .request(spec.method.clone(), &url)
            .timeout(self.inner.timeout);

        if !spec.query.is_empty() {
            builder = builder.query(&spec.query);
        }
        if let Some(token) = bearer {
            builder = builder.bearer_auth(token);
        }
        builder = match &spec.payload {
            Payload::Empty => builder,
            Payload::Json(body) => builder.json(body),
            Payload::Multipart(parts) => builder.multipart(build_form(parts)?),
        };

        builder
            .send()
            .await
            .map_err(|e| ApiError::NetworkUnreachable(e.to_string()))
    }
}

fn build_form(parts: &[FilePart]) -> Result<reqwest::multipart::Form, ApiError> {
    let mut form = reqwest::multipart::Form::new();
    for part in parts {
        let piece = reqwest::multipart::Part::bytes(part.bytes.clone())
            .file_name(part.file_name.clone())
            .mime_str(&part.mime_type)
            .map_err(|e| ApiError::Validation(format!("invalid content type: {e}")))?;
        form = form.part(part.field.clone(), piece);
    }
    Ok(form)
}

/// Read the full body, screening for HTML documents regardless of status.
pub(crate) async fn read_body(
    response: reqwest::Response,
) -> Result<(StatusCode, String), ApiError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::NetworkUnreachable(format!("reading response: {e}")))?;
    if looks_like_html(&body) {
        return Err(ApiError::BackendUnreachable);
    }
    Ok((status, body))
}

/// Final classification of a response that is past 401 handling.
pub(crate) fn finish(status: StatusCode, body: &str) -> Result<Value, ApiError> {
    if !status.is_success() {
        return Err(ApiError::application_from_body(status.as_u16(), body));
    }
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(body).map_err(|e| ApiError::ResponseFormat(e.to_string()))
}

fn looks_like_html(body: &str) -> bool {
    let head = body.trim_start();
    let lowered = head.get(..15).unwrap_or(head).to_ascii_lowercase();
    lowered.starts_with("<!doctype") || lowered.starts_with("<html")
}

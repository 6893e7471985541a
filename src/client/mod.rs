//! HTTP client adapter for the clinic REST API.
//!
//! One configured `reqwest::Client` shared by every store: base URL, cookie
//! session, JSON content type. Failures are mapped to [`AppError`] and handed
//! back unchanged; there is no retry and no timeout.

use std::sync::LazyLock;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::{Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::Config;
use crate::errors::{AppError, ErrorResponse, FieldError};

/// Scratch URL used only to percent-encode path segments.
static SEGMENT_BASE: LazyLock<Url> =
    LazyLock::new(|| Url::parse("http://segment.invalid/").expect("Invalid segment base URL"));

/// Shared client for the clinic API.
#[derive(Clone, Debug)]
pub struct HttpClient {
    inner: reqwest::Client,
    base_url: Url,
}

impl HttpClient {
    /// Build the client from configuration.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let base_url = parse_base_url(&config.api_base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_str(&config.user_agent)?);

        let inner = reqwest::Client::builder()
            .cookie_store(true)
            .default_headers(headers)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { inner, base_url })
    }

    /// Base URL every relative path is joined onto.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a relative API path (`/patients/all`) against the base URL.
    pub fn url(&self, path: &str) -> Result<Url, AppError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| AppError::Config(format!("Invalid request path {}: {}", path, e)))
    }

    /// The underlying client, carrying the session cookies.
    pub fn raw(&self) -> &reqwest::Client {
        &self.inner
    }

    /// GET a path and decode the JSON body.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let request = self.request(Method::GET, path)?;
        decode(send(request).await?).await
    }

    /// POST a JSON body and decode the JSON response.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, path)?.json(body);
        decode(send(request).await?).await
    }

    /// PUT a JSON body and decode the JSON response.
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::PUT, path)?.json(body);
        decode(send(request).await?).await
    }

    /// PUT without a body (status-style endpoints) and decode the response.
    pub async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let request = self.request(Method::PUT, path)?;
        decode(send(request).await?).await
    }

    /// PUT a JSON body when the response carries nothing worth decoding.
    pub async fn put_no_content<B>(&self, path: &str, body: &B) -> Result<(), AppError>
    where
        B: Serialize + ?Sized,
    {
        let request = self.request(Method::PUT, path)?.json(body);
        send(request).await?;
        Ok(())
    }

    /// DELETE a path. No response body is expected.
    pub async fn delete(&self, path: &str) -> Result<(), AppError> {
        let request = self.request(Method::DELETE, path)?;
        send(request).await?;
        Ok(())
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, AppError> {
        let url = self.url(path)?;
        tracing::debug!("{} {}", method, url);
        Ok(self.inner.request(method, url))
    }
}

/// Percent-encode one path segment, such as a record id.
///
/// `/`, `?`, `#` and `%` are escaped so an id can never address another
/// endpoint. Empty and dot-only ids would collapse the path and are refused.
pub fn segment(raw: &str) -> Result<String, AppError> {
    if raw.is_empty() || raw == "." || raw == ".." {
        return Err(AppError::Validation(vec![FieldError::new(
            "id",
            format!("Invalid record id: {:?}", raw),
        )]));
    }
    let mut url = SEGMENT_BASE.clone();
    url.path_segments_mut()
        .map_err(|_| AppError::Config("Segment base URL cannot be a base".to_string()))?
        .clear()
        .push(raw);
    Ok(url.path().trim_start_matches('/').to_string())
}

/// Parse the base URL, making sure relative joins keep its path.
fn parse_base_url(raw: &str) -> Result<Url, AppError> {
    let mut normalized = raw.trim().to_string();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    let url = Url::parse(&normalized)
        .map_err(|e| AppError::Config(format!("Invalid API base URL {}: {}", raw, e)))?;
    if url.cannot_be_a_base() {
        return Err(AppError::Config(format!("API base URL {} cannot be a base", raw)));
    }
    Ok(url)
}

/// Send a request, turning non-success statuses into `AppError::Server`.
pub(crate) async fn send(request: RequestBuilder) -> Result<Response, AppError> {
    let response = request.send().await?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().clone();
    let body = response.text().await.unwrap_or_default();
    let err = ErrorResponse::into_app_error(status.as_u16(), &body);
    tracing::warn!("Request to {} rejected: {}", url, err);
    Err(err)
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

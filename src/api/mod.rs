//! Gateway to the booking backend.
//!
//! Every call carries the session's bearer token. A 401 from any endpoint is
//! reported as [`ApiError::Unauthorized`] so the route guard can tear the
//! session down; handlers only ever deal with transport and validation errors.

pub mod auth;
pub mod types;
pub mod waiting_list;

use std::fmt;
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use self::types::ErrorBody;

#[derive(Debug)]
pub enum ApiError {
    /// The backend could not be reached or the connection failed mid-request.
    Transport(reqwest::Error),
    /// The backend answered with a non-success status.
    Rejected { status: u16, message: Option<String> },
    /// Token missing, expired or revoked.
    Unauthorized,
    /// The backend answered 2xx but the body was not what we expected.
    Decode(String),
}

impl ApiError {
    /// Text to show inline next to the control that triggered the request.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Rejected { message: Some(msg), .. } => msg.clone(),
            _ => fallback.to_string(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(e) => write!(f, "Backend unreachable: {e}"),
            ApiError::Rejected { status, message } => match message {
                Some(msg) => write!(f, "Backend rejected request ({status}): {msg}"),
                None => write!(f, "Backend rejected request ({status})"),
            },
            ApiError::Unauthorized => write!(f, "Backend session expired"),
            ApiError::Decode(e) => write!(f, "Unexpected backend response: {e}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Transport(e)
        }
    }
}

/// Shared HTTP client plus the backend base URL. Cheap to clone.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::Transport)?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<T, ApiError> {
        let response = self.request(Method::GET, path, token).send().await?;
        Self::read_json(response).await
    }

    pub(crate) async fn post_json<B, T>(
        &self,
        path: &str,
        token: Option<&str>,
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut builder = self.request(Method::POST, path, token);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let response = builder.send().await?;
        Self::read_json(response).await
    }

    /// POST where only the status matters; the response body is dropped.
    pub(crate) async fn post_for_status<B>(
        &self,
        path: &str,
        token: Option<&str>,
        body: Option<&B>,
    ) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        let mut builder = self.request(Method::POST, path, token);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let response = builder.send().await?;
        Self::check_status(response).await.map(|_| ())
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let response = Self::check_status(response).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }
        let message = match response.bytes().await {
            Ok(bytes) => serde_json::from_slice::<ErrorBody>(&bytes)
                .ok()
                .and_then(|body| body.text()),
            Err(_) => None,
        };
        log::warn!("Backend answered {}: {:?}", status.as_u16(), message);
        Err(ApiError::Rejected { status: status.as_u16(), message })
    }
}

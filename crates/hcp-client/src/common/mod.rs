//! Common utilities for the HCP API client
//!
//! Provides shared functionality used across all API modules.

pub mod backoff;
pub mod paths;

use crate::common::backoff::ExponentialBackoff;
use crate::error::HcpError;
use crate::models::{ListOrganizationsResponse, ListProjectsResponse, Organization, Project};
use reqwest::{Client, Method, Response};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Retries after the first attempt for transient failures
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// A list response that may continue on another page
pub trait Paginated: for<'de> Deserialize<'de> {
    type Item;

    /// Split into this page's items and the token of the next page, if any
    fn into_page(self) -> (Vec<Self::Item>, Option<String>);
}

impl Paginated for ListOrganizationsResponse {
    type Item = Organization;

    fn into_page(self) -> (Vec<Organization>, Option<String>) {
        let next = self.pagination.and_then(|p| p.next_page_token);
        (self.organizations, next)
    }
}

impl Paginated for ListProjectsResponse {
    type Item = Project;

    fn into_page(self) -> (Vec<Project>, Option<String>) {
        let next = self.pagination.and_then(|p| p.next_page_token);
        (self.projects, next)
    }
}

/// Shape of the error body returned by HCP services
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
}

/// Map a non-success response to the error taxonomy
pub(crate) fn error_for_status(method: &Method, path: &str, status: u16, body: &str) -> HcpError {
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .map(|b| b.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| body.to_string());

    match status {
        404 => HcpError::NotFound(format!("{} {}: {}", method, path, message)),
        401 | 403 => HcpError::Authentication(format!("{} {}: {} - {}", method, path, status, message)),
        _ => HcpError::Api {
            status,
            message: format!("{} {} failed: {}", method, path, message),
        },
    }
}

/// HTTP client wrapper with authentication and transient-failure retry
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: String,
    max_retries: u32,
    retry_initial: Duration,
    retry_max: Duration,
}

impl HttpClient {
    /// Create a new HTTP client wrapper
    pub fn new(client: Client, base_url: String, token: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_initial: Duration::from_millis(500),
            retry_max: Duration::from_secs(8),
        }
    }

    /// Override the number of retries for transient failures
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Override the retry delays
    pub fn with_retry_backoff(mut self, initial: Duration, max: Duration) -> Self {
        self.retry_initial = initial;
        self.retry_max = max;
        self
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a full URL from a path
    pub fn build_url(&self, path: &str) -> String {
        if path.starts_with("http") {
            path.to_string()
        } else {
            format!("{}{}", self.base_url, path)
        }
    }

    /// Get authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// Send a request, retrying transient failures with backoff.
    ///
    /// Returns the response only when its status is a success.
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<Response, HcpError> {
        let url = self.build_url(path);
        let mut backoff = ExponentialBackoff::new(self.retry_initial, self.retry_max);
        let mut attempt = 0;

        loop {
            let request_id = uuid::Uuid::new_v4().to_string();
            debug!("{} {} (request {})", method, url, request_id);

            let mut request = self
                .client
                .request(method.clone(), &url)
                .header("Authorization", self.auth_header())
                .header("Accept", "application/json")
                .header("X-Request-Id", &request_id);
            if let Some(body) = body {
                request = request.json(body);
            }

            let err = match request.send().await {
                Ok(response) if response.status().is_success() => return Ok(response),
                Ok(response) => {
                    let status = response.status().as_u16();
                    let text = response.text().await.unwrap_or_default();
                    error_for_status(&method, path, status, &text)
                }
                Err(e) => HcpError::Http(e),
            };

            if attempt >= self.max_retries || !err.is_transient() {
                return Err(err);
            }

            attempt += 1;
            let delay = backoff.next_backoff();
            warn!(
                "{} {} failed with transient error ({}), retry {}/{} in {:?}",
                method, path, err, attempt, self.max_retries, delay
            );
            tokio::time::sleep(delay).await;
        }
    }

    /// Decode a success body, keeping a prefix of the body in the error
    async fn decode<T: for<'de> Deserialize<'de>>(response: Response) -> Result<T, HcpError> {
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            HcpError::Decode(format!(
                "error decoding response body: {} - Response (first 500 chars): {}",
                e,
                text.chars().take(500).collect::<String>()
            ))
        })
    }

    /// Make a GET request
    pub async fn get<T: for<'de> Deserialize<'de>>(&self, path: &str) -> Result<T, HcpError> {
        let response = self.send(Method::GET, path, None).await?;
        Self::decode(response).await
    }

    /// Make a POST request
    pub async fn post<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T, HcpError> {
        let response = self.send(Method::POST, path, Some(body)).await?;
        Self::decode(response).await
    }

    /// Make a PATCH request
    pub async fn patch<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T, HcpError> {
        let response = self.send(Method::PATCH, path, Some(body)).await?;
        Self::decode(response).await
    }

    /// Make a DELETE request. HCP deletes answer with the operation tracking them.
    pub async fn delete<T: for<'de> Deserialize<'de>>(&self, path: &str) -> Result<T, HcpError> {
        let response = self.send(Method::DELETE, path, None).await?;
        Self::decode(response).await
    }

    /// Fetch all pages of a paginated list
    pub async fn fetch_all_pages<P: Paginated>(&self, path: &str) -> Result<Vec<P::Item>, HcpError> {
        let mut all_results = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let page_path = match &page_token {
                Some(token) => {
                    let separator = if path.contains('?') { '&' } else { '?' };
                    format!(
                        "{}{}pagination.next_page_token={}",
                        path,
                        separator,
                        urlencoding::encode(token)
                    )
                }
                None => path.to_string(),
            };

            let page: P = self.get(&page_path).await?;
            let (items, next) = page.into_page();
            all_results.extend(items);

            match next.filter(|t| !t.is_empty()) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(all_results)
    }
}

//! `reqwest`-based transport for the deal discovery API.

use super::{Endpoint, EndpointRequest, SearchBackend};
use crate::config::ApiConfig;
use crate::error::BackendError;
use anyhow::Context;
use async_trait::async_trait;
use std::time::Duration;

/// Maximum number of bytes of an error body kept for diagnostics.
const MAX_ERROR_BODY: usize = 512;

/// HTTP client for the analysis endpoints.
///
/// The client carries only a connect timeout. Per-branch deadlines are
/// applied by the executor so unbounded branches stay unbounded.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &ApiConfig) -> crate::error::Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(concat!("deal-discovery/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }
}

#[async_trait]
impl SearchBackend for HttpBackend {
    async fn post(
        &self,
        endpoint: Endpoint,
        request: &EndpointRequest,
    ) -> Result<serde_json::Value, BackendError> {
        let url = self.url(endpoint);
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| transport_error(endpoint, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Http {
                endpoint,
                status: status.as_u16(),
                body: error_body(response.text().await),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| transport_error(endpoint, &e))?;

        serde_json::from_slice(&bytes).map_err(|source| BackendError::Decode { endpoint, source })
    }
}

/// Diagnostic text for an error response, truncated to [`MAX_ERROR_BODY`].
fn error_body<E: std::fmt::Display>(text: Result<String, E>) -> String {
    let mut body = match text {
        Ok(body) => body,
        Err(e) => return format!("<unreadable body: {}>", e),
    };
    if body.len() > MAX_ERROR_BODY {
        let mut cut = MAX_ERROR_BODY;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
    }
    body
}

fn transport_error(endpoint: Endpoint, error: &reqwest::Error) -> BackendError {
    // Walk the source chain; hyper buries the useful part several levels down
    let mut message = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }

    if error.is_connect() {
        BackendError::Connectivity { endpoint, message }
    } else {
        BackendError::from_transport(endpoint, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    fn api(base_url: &str) -> ApiConfig {
        ApiConfig {
            base_url: base_url.to_string(),
            connect_timeout_secs: 1,
        }
    }

    #[test]
    fn joins_base_url_and_path() {
        let backend = HttpBackend::new(&api("http://localhost:3001/")).unwrap();
        check!(backend.base_url() == "http://localhost:3001");
        check!(backend.url(Endpoint::DealsSearch) == "http://localhost:3001/api/deals/search");
    }

    #[test]
    fn unreadable_error_body_keeps_a_placeholder() {
        let body = error_body::<&str>(Err("connection reset mid-body"));
        check!(body == "<unreadable body: connection reset mid-body>");
    }

    #[test]
    fn long_error_body_is_cut_on_a_char_boundary() {
        let body = error_body::<&str>(Ok("é".repeat(400)));
        check!(body.len() <= MAX_ERROR_BODY);
        check!(body.chars().all(|c| c == 'é'));
        check!(error_body::<&str>(Ok("bad gateway".to_string())) == "bad gateway");
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_connectivity_failure() {
        // Port 9 (discard) is closed on CI hosts
        let backend = HttpBackend::new(&api("http://127.0.0.1:9")).unwrap();
        let err = backend
            .post(Endpoint::MarketingNews, &EndpointRequest::new("news"))
            .await
            .unwrap_err();
        check!(err.kind() == crate::error::FailureKind::Connectivity);
    }
}

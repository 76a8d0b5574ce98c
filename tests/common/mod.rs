//! Shared test fixtures for integration tests.
//!
//! # Scripted backend
//!
//! [`ScriptedBackend`] stands in for the HTTP API. Each endpoint gets a
//! [`Reply`]; endpoints without one answer with an empty JSON object. Every
//! call is recorded so tests can assert on exactly which endpoint was hit and
//! with what body.
//!
//! ```ignore
//! let backend = ScriptedBackend::new()
//!     .reply(Endpoint::MarketSizing, Reply::Stall(Duration::from_secs(120)));
//! let executor = executor(&backend, settings());
//! ```
//!
//! Timeout tests run under `#[tokio::test(start_paused = true)]`, so stalled
//! replies resolve on virtual time.

use async_trait::async_trait;
use deal_discovery::config::SearchConfig;
use deal_discovery::{
    BackendError, Endpoint, EndpointRequest, SearchBackend, SearchExecutor, SearchSession,
};
use rstest::fixture;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Scripted answer for one endpoint.
#[derive(Debug, Clone)]
#[allow(dead_code)] // Variants used across different integration test crates
pub enum Reply {
    /// Respond immediately with this body.
    Json(Value),
    /// Respond with this body after a delay.
    Delayed(Duration, Value),
    /// Sleep for the duration, then respond with an empty body.
    Stall(Duration),
    /// Fail as if the server could not be reached.
    Unreachable,
    /// Fail with a non-2xx status.
    Status(u16),
    /// Respond with a body that does not decode as search results.
    Malformed,
}

#[derive(Debug, Default)]
pub struct ScriptedBackend {
    replies: HashMap<Endpoint, Reply>,
    calls: Mutex<Vec<(Endpoint, EndpointRequest)>>,
}

#[allow(dead_code)] // Methods used across different integration test crates
impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, endpoint: Endpoint, reply: Reply) -> Self {
        self.replies.insert(endpoint, reply);
        self
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<(Endpoint, EndpointRequest)> {
        self.calls.lock().unwrap().clone()
    }

    /// Endpoints called so far, in order.
    pub fn endpoints(&self) -> Vec<Endpoint> {
        self.calls().into_iter().map(|(endpoint, _)| endpoint).collect()
    }
}

#[async_trait]
impl SearchBackend for ScriptedBackend {
    async fn post(
        &self,
        endpoint: Endpoint,
        request: &EndpointRequest,
    ) -> Result<Value, BackendError> {
        self.calls.lock().unwrap().push((endpoint, request.clone()));

        match self.replies.get(&endpoint).cloned() {
            None => Ok(json!({})),
            Some(Reply::Json(body)) => Ok(body),
            Some(Reply::Delayed(delay, body)) => {
                tokio::time::sleep(delay).await;
                Ok(body)
            }
            Some(Reply::Stall(delay)) => {
                tokio::time::sleep(delay).await;
                Ok(json!({}))
            }
            Some(Reply::Unreachable) => Err(BackendError::Connectivity {
                endpoint,
                message: "error sending request: tcp connect error: Connection refused".to_string(),
            }),
            Some(Reply::Status(status)) => Err(BackendError::Http {
                endpoint,
                status,
                body: "upstream error".to_string(),
            }),
            Some(Reply::Malformed) => Ok(json!({"deals": "not a list"})),
        }
    }
}

/// Default search settings: limit 6, 60s analytic and 45s general deadlines.
#[fixture]
pub fn settings() -> SearchConfig {
    SearchConfig::default()
}

#[allow(dead_code)]
pub fn executor(
    backend: &Arc<ScriptedBackend>,
    settings: SearchConfig,
) -> SearchExecutor<Arc<ScriptedBackend>> {
    SearchExecutor::new(Arc::clone(backend), settings)
}

#[allow(dead_code)]
pub fn session(backend: &Arc<ScriptedBackend>) -> Arc<SearchSession<Arc<ScriptedBackend>>> {
    Arc::new(SearchSession::new(executor(backend, SearchConfig::default())))
}

/// A deal record as the API returns it.
#[allow(dead_code)]
pub fn deal_json(id: &str, name: &str, description: &str, media_type: &str) -> Value {
    json!({
        "id": id,
        "dealName": name,
        "description": description,
        "mediaType": media_type,
    })
}

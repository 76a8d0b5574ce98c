//! Executes a routing decision against a backend and produces one outcome.
//!
//! Every failure is caught here and turned into a status plus a message, so
//! nothing past this point ever sees a `BackendError`. Deals in a successful
//! response are re-ranked against the original query before they are stored.

use crate::backend::response::{self, EndpointResponse};
use crate::backend::{Coaching, SearchBackend, SearchResults};
use crate::config::SearchConfig;
use crate::error::{BackendError, FailureKind};
use crate::fallback;
use crate::routing::{Action, RoutingDecision, general_decision};
use crate::search::rank;
use crate::types::{CardType, SearchRequest};
use std::time::Duration;

/// How a search invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeStatus {
    /// Results are available.
    Completed,
    /// The request succeeded but returned nothing usable.
    NoResults,
    /// The backend was unreachable and local substitutes are shown.
    Offline,
    /// The branch failed; only the message is meaningful.
    Failed(FailureKind),
}

/// Immutable result of one search invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// The action whose results are shown. After a fallback this is the
    /// fallback action; the original one is in `fell_back_from`.
    pub action: Action,
    pub status: OutcomeStatus,
    pub message: String,
    pub results: SearchResults,
    pub ai_response: Option<String>,
    pub coaching: Option<Coaching>,
    pub fell_back_from: Option<Action>,
}

impl SearchOutcome {
    fn failed(action: Action, kind: FailureKind, message: String) -> Self {
        Self {
            action,
            status: OutcomeStatus::Failed(kind),
            message,
            results: SearchResults::default(),
            ai_response: None,
            coaching: None,
            fell_back_from: None,
        }
    }

    pub const fn is_failure(&self) -> bool {
        matches!(self.status, OutcomeStatus::Failed(_))
    }
}

/// Runs routing decisions against a [`SearchBackend`].
#[derive(Debug)]
pub struct SearchExecutor<B> {
    backend: B,
    settings: SearchConfig,
}

impl<B: SearchBackend> SearchExecutor<B> {
    pub const fn new(backend: B, settings: SearchConfig) -> Self {
        Self { backend, settings }
    }

    pub const fn settings(&self) -> &SearchConfig {
        &self.settings
    }

    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Deadline for an action, if it has one.
    pub fn timeout_for(&self, action: &Action) -> Option<Duration> {
        match action {
            Action::Card {
                card_type: CardType::MarketSizing | CardType::AudienceInsights,
                ..
            } => Some(self.settings.analytic_timeout()),
            Action::General => Some(self.settings.general_timeout()),
            Action::Unified { .. } | Action::Card { .. } | Action::ForcedDeals => None,
        }
    }

    /// Perform the decided request and build the outcome.
    pub async fn execute(&self, request: &SearchRequest, decision: &RoutingDecision) -> SearchOutcome {
        let outcome = match self.call(decision).await {
            Ok(response) => self.complete(request, &decision.action, response),
            Err(error) => self.recover(request, decision, &error).await,
        };

        tracing::info!(
            action = %outcome.action,
            status = ?outcome.status,
            deals = outcome.results.deals.len(),
            "Search finished"
        );
        outcome
    }

    async fn call(&self, decision: &RoutingDecision) -> Result<EndpointResponse, BackendError> {
        let endpoint = decision.endpoint;
        let pending = self.backend.post(endpoint, &decision.request);

        let body = match self.timeout_for(&decision.action) {
            Some(limit) => tokio::time::timeout(limit, pending)
                .await
                .map_err(|_| BackendError::Timeout {
                    endpoint,
                    after: limit,
                })??,
            None => pending.await?,
        };

        response::decode(endpoint, body)
    }

    fn complete(
        &self,
        request: &SearchRequest,
        action: &Action,
        response: EndpointResponse,
    ) -> SearchOutcome {
        let cards = action.card_types();
        let mut results = response.results;
        results.retain(&cards);

        if !results.deals.is_empty() {
            results.deals = rank(&results.deals, &request.query, self.settings.result_limit);
        }

        let ai_response = response.ai_response.filter(|text| !text.trim().is_empty());

        let (status, message) = if results.is_empty_for(&cards) {
            (OutcomeStatus::NoResults, empty_message(action, &request.query))
        } else {
            let message = ai_response.clone().unwrap_or_else(|| {
                let counts: Vec<usize> = cards.iter().map(|card| results.slot_len(*card)).collect();
                fallback::success_message(&cards, &counts)
            });
            (OutcomeStatus::Completed, message)
        };

        SearchOutcome {
            action: action.clone(),
            status,
            message,
            results,
            ai_response,
            coaching: response.coaching,
            fell_back_from: None,
        }
    }

    async fn recover(
        &self,
        request: &SearchRequest,
        decision: &RoutingDecision,
        error: &BackendError,
    ) -> SearchOutcome {
        tracing::warn!(
            endpoint = %error.endpoint(),
            "{} failed: {}",
            decision.action,
            error
        );

        match &decision.action {
            Action::Unified { .. } => {
                tracing::warn!("Falling back to general deal search");
                let fallback = general_decision(request);
                let mut outcome = match self.call(&fallback).await {
                    Ok(response) => self.complete(request, &fallback.action, response),
                    Err(error) => Self::terminal_failure(&fallback.action, &error),
                };
                outcome.fell_back_from = Some(decision.action.clone());
                outcome
            }
            Action::Card {
                card_type: CardType::MarketingNews,
                ..
            } if error.kind() == FailureKind::Connectivity => {
                let results = SearchResults {
                    marketing_news: fallback::canned_news(),
                    ..SearchResults::default()
                };
                SearchOutcome {
                    action: decision.action.clone(),
                    status: OutcomeStatus::Offline,
                    message: fallback::OFFLINE_NEWS_MESSAGE.to_string(),
                    results,
                    ai_response: None,
                    coaching: None,
                    fell_back_from: None,
                }
            }
            action => Self::terminal_failure(action, error),
        }
    }

    fn terminal_failure(action: &Action, error: &BackendError) -> SearchOutcome {
        let card = action.primary_card();
        let message = match (action, error) {
            (_, BackendError::Timeout { after, .. }) => fallback::timeout_message(card, *after),
            (Action::Unified { card_types }, _) => fallback::combined_unavailable_message(card_types),
            _ => fallback::unavailable_message(card),
        };
        SearchOutcome::failed(action.clone(), error.kind(), message)
    }
}

fn empty_message(action: &Action, query: &str) -> String {
    match action {
        Action::Unified { card_types } if card_types.len() > 1 => {
            fallback::combined_empty_message(card_types, query)
        }
        _ => fallback::empty_message(action.primary_card(), query),
    }
}

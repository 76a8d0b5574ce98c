//! Turning a search request into exactly one routing decision.

use super::company::extract_company;
use super::keywords::{self, Intent};
use crate::backend::{Endpoint, EndpointRequest};
use crate::types::{CardType, SearchRequest};
use std::fmt;

/// How a card-type branch was selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// The user picked the card type.
    Explicit,
    /// A keyword rule inferred it from free text.
    Keyword(Intent),
}

/// The single action a search invocation performs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Several card types in one unified request.
    Unified { card_types: Vec<CardType> },
    /// One card type on its dedicated endpoint.
    Card {
        card_type: CardType,
        selection: Selection,
    },
    /// Free text asked for deals outright; the backend must return deals.
    ForcedDeals,
    /// Nothing matched; default deal search.
    General,
}

impl Action {
    /// Card types whose result slots this action fills.
    pub fn card_types(&self) -> Vec<CardType> {
        match self {
            Self::Unified { card_types } => card_types.clone(),
            Self::Card { card_type, .. } => vec![*card_type],
            Self::ForcedDeals | Self::General => vec![CardType::Deals],
        }
    }

    /// The card type used to pick status messages.
    pub fn primary_card(&self) -> CardType {
        match self {
            Self::Unified { card_types } => card_types.first().copied().unwrap_or(CardType::Deals),
            Self::Card { card_type, .. } => *card_type,
            Self::ForcedDeals | Self::General => CardType::Deals,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unified { card_types } => {
                let names: Vec<&str> = card_types.iter().map(|c| c.as_str()).collect();
                write!(f, "unified search [{}]", names.join(", "))
            }
            Self::Card {
                card_type,
                selection: Selection::Explicit,
            } => write!(f, "{} (selected)", card_type),
            Self::Card {
                card_type,
                selection: Selection::Keyword(_),
            } => write!(f, "{} (inferred)", card_type),
            Self::ForcedDeals => f.write_str("deal search (forced)"),
            Self::General => f.write_str("general deal search"),
        }
    }
}

/// The chosen action plus the request it sends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingDecision {
    pub action: Action,
    pub endpoint: Endpoint,
    pub request: EndpointRequest,
    /// Keyword that selected a free-text branch, for diagnostics.
    pub matched_keyword: Option<&'static str>,
}

/// Decide which endpoint a search request goes to.
///
/// Explicit card types always win over keyword inference. Exactly one
/// decision is produced for every input.
pub fn route(request: &SearchRequest) -> RoutingDecision {
    let decision = match request.card_types.as_slice() {
        [] => route_free_text(request),
        [card_type] => card_decision(request, *card_type, Selection::Explicit, None),
        card_types => RoutingDecision {
            action: Action::Unified {
                card_types: card_types.to_vec(),
            },
            endpoint: Endpoint::UnifiedSearch,
            request: EndpointRequest::new(&request.query).card_types(card_types.to_vec()),
            matched_keyword: None,
        },
    };

    tracing::debug!(
        action = %decision.action,
        endpoint = %decision.endpoint,
        keyword = decision.matched_keyword.unwrap_or("-"),
        "Routed query"
    );
    decision
}

/// The default branch, also used as the unified-search fallback.
pub fn general_decision(request: &SearchRequest) -> RoutingDecision {
    RoutingDecision {
        action: Action::General,
        endpoint: Endpoint::DealsSearch,
        request: EndpointRequest::new(&request.query)
            .history(&request.conversation_history)
            .card_types(request.card_types.clone()),
        matched_keyword: None,
    }
}

fn route_free_text(request: &SearchRequest) -> RoutingDecision {
    match keywords::classify(&request.query) {
        Some((Intent::ExplicitDeals, keyword)) => RoutingDecision {
            action: Action::ForcedDeals,
            endpoint: Endpoint::DealsSearch,
            request: EndpointRequest::new(&request.query)
                .history(&request.conversation_history)
                .force_deals(),
            matched_keyword: Some(keyword),
        },
        Some((intent, keyword)) => card_decision(
            request,
            intent.card_type(),
            Selection::Keyword(intent),
            Some(keyword),
        ),
        None => general_decision(request),
    }
}

fn card_decision(
    request: &SearchRequest,
    card_type: CardType,
    selection: Selection,
    matched_keyword: Option<&'static str>,
) -> RoutingDecision {
    let base = EndpointRequest::new(&request.query);
    let body = match card_type {
        CardType::Personas => base.card_type(CardType::Personas),
        CardType::MarketingNews => base,
        CardType::Deals | CardType::Geographic => base
            .history(&request.conversation_history)
            .card_types(vec![card_type]),
        CardType::MarketingSwot | CardType::CompanyProfile => {
            let company = extract_company(&request.query);
            base.history(&request.conversation_history)
                .company(company.name, company.stock_symbol)
        }
        CardType::MarketSizing
        | CardType::AudienceInsights
        | CardType::CompetitiveIntelligence
        | CardType::ContentStrategy
        | CardType::BrandStrategy => base.history(&request.conversation_history),
    };

    RoutingDecision {
        action: Action::Card {
            card_type,
            selection,
        },
        endpoint: Endpoint::for_card(card_type),
        request: body,
        matched_keyword,
    }
}

//! Typed request body shared by all endpoints.

use crate::types::{CardType, ConversationTurn};
use serde::Serialize;

/// JSON body sent to an endpoint.
///
/// Optional fields are omitted from the wire when unset, so each branch only
/// sends what its endpoint reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub conversation_history: Vec<ConversationTurn>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_types: Option<Vec<CardType>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_type: Option<CardType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_deals: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_symbol: Option<String>,
}

impl EndpointRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn history(mut self, history: &[ConversationTurn]) -> Self {
        self.conversation_history = history.to_vec();
        self
    }

    pub fn card_types(mut self, card_types: Vec<CardType>) -> Self {
        self.card_types = Some(card_types);
        self
    }

    pub const fn card_type(mut self, card_type: CardType) -> Self {
        self.card_type = Some(card_type);
        self
    }

    pub const fn force_deals(mut self) -> Self {
        self.force_deals = Some(true);
        self
    }

    pub fn company(mut self, company_name: String, stock_symbol: Option<String>) -> Self {
        self.company_name = Some(company_name);
        self.stock_symbol = stock_symbol;
        self
    }
}

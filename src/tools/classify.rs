//! `classify` tool: show the routing decision for a query without calling it.

use crate::format::render_decision;
use crate::routing::route;
use crate::types::{CardType, SearchRequest};
use rmcp::schemars;
use serde::Deserialize;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ClassifyRequest {
    /// Free-text request to classify
    pub query: String,
    /// Explicitly selected result categories, if any
    #[serde(default)]
    pub card_types: Option<Vec<CardType>>,
}

pub fn handle_classify(request: ClassifyRequest) -> String {
    let search = SearchRequest::new(request.query)
        .with_card_types(request.card_types.unwrap_or_default());
    render_decision(&route(&search))
}

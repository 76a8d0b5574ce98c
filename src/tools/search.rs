//! `search` tool: route a query, call the chosen endpoint, render the outcome.

use crate::backend::SearchBackend;
use crate::format::render_outcome;
use crate::session::SearchSession;
use crate::types::{CardType, ConversationTurn, SearchRequest};
use rmcp::schemars;
use serde::Deserialize;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchToolRequest {
    /// Free-text request, e.g. "find deals for new parents" or "TAM for oat milk"
    pub query: String,
    /// Result categories to fetch. Selecting any skips keyword inference;
    /// selecting more than one issues a single unified search.
    #[serde(default)]
    pub card_types: Option<Vec<CardType>>,
    /// Prior conversation turns forwarded to the endpoint unchanged
    #[serde(default)]
    pub conversation_history: Option<Vec<ConversationTurn>>,
}

impl From<SearchToolRequest> for SearchRequest {
    fn from(request: SearchToolRequest) -> Self {
        Self::new(request.query)
            .with_card_types(request.card_types.unwrap_or_default())
            .with_history(request.conversation_history.unwrap_or_default())
    }
}

/// Execute one search through the shared session.
///
/// Failures of the downstream endpoint are not errors here: they come back as
/// an outcome with a status message. Only a superseded search is an error.
pub async fn handle_search<B: SearchBackend>(
    session: &SearchSession<B>,
    request: SearchToolRequest,
) -> Result<String, String> {
    let query = request.query.clone();
    match session.search(request.into()).await {
        Some(outcome) => Ok(render_outcome(&outcome)),
        None => Err(format!(
            "Search for '{}' was superseded by a newer search before it finished.",
            query
        )),
    }
}

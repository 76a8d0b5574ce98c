//! `rank_deals` tool: score caller-supplied deals against a query.

use crate::format::render_ranking;
use crate::search::{DEFAULT_RESULT_LIMIT, rank_scored};
use crate::types::Deal;
use rmcp::schemars;
use serde::Deserialize;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RankDealsRequest {
    /// Deals to rank. Each needs at least `id`; `dealName`, `description`
    /// and `mediaType` are scored when present.
    pub deals: Vec<serde_json::Value>,
    /// Query to score against
    pub query: String,
    /// Maximum number of deals to return (default: 6)
    #[serde(default)]
    pub limit: Option<usize>,
}

pub fn handle_rank_deals(request: RankDealsRequest) -> Result<String, String> {
    let deals = request
        .deals
        .into_iter()
        .enumerate()
        .map(|(idx, value)| {
            serde_json::from_value::<Deal>(value)
                .map_err(|e| format!("Deal #{} is not a valid deal record: {}", idx + 1, e))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let limit = request.limit.unwrap_or(DEFAULT_RESULT_LIMIT);
    let ranked = rank_scored(&deals, &request.query, limit);
    Ok(render_ranking(&request.query, &ranked))
}

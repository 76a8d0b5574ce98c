mod common;

use assert2::{check, let_assert};
use common::{Reply, ScriptedBackend, deal_json, session};
use deal_discovery::tools::classify::{ClassifyRequest, handle_classify};
use deal_discovery::tools::rank::{RankDealsRequest, handle_rank_deals};
use deal_discovery::tools::search::{SearchToolRequest, handle_search};
use deal_discovery::{CardType, Endpoint};
use rstest::rstest;
use serde_json::json;
use std::sync::Arc;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn search_tool_renders_ranked_deals() {
    let backend = Arc::new(ScriptedBackend::new().reply(
        Endpoint::DealsSearch,
        Reply::Json(json!({
            "deals": [
                deal_json("d1", "Sports Fans Video", "live sports", "Video"),
                deal_json("d2", "Gardening Audio", "", "Audio"),
            ],
            "aiResponse": "Two sports packages look promising.",
        })),
    ));
    let session = session(&backend);

    let result = handle_search(
        &session,
        SearchToolRequest {
            query: "sports".to_string(),
            card_types: None,
            conversation_history: None,
        },
    )
    .await;

    check!(result.is_ok(), "Search should succeed: {:?}", result);
    let output = result.unwrap();
    check!(output.contains("Two sports packages look promising."));
    check!(output.contains("`d1` Sports Fans Video (Video)"));
    check!(!output.contains("Gardening Audio"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn search_tool_reports_failures_as_text() {
    let backend = Arc::new(ScriptedBackend::new().reply(Endpoint::BrandStrategy, Reply::Status(503)));
    let session = session(&backend);

    let output = handle_search(
        &session,
        SearchToolRequest {
            query: "brand voice for a bakery".to_string(),
            card_types: Some(vec![CardType::BrandStrategy]),
            conversation_history: None,
        },
    )
    .await
    .unwrap();

    check!(output.contains("Status: failed"));
    check!(output.contains("Brand strategy is temporarily unavailable"));
}

#[test]
fn search_tool_request_accepts_kebab_case_cards() {
    let request: SearchToolRequest = serde_json::from_value(json!({
        "query": "runners",
        "card_types": ["deals", "audience-insights"],
    }))
    .unwrap();
    check!(request.card_types == Some(vec![CardType::Deals, CardType::AudienceInsights]));
}

#[test]
fn classify_tool_previews_without_network() {
    let output = handle_classify(ClassifyRequest {
        query: "show me deals for luxury goods shoppers".to_string(),
        card_types: None,
    });

    check!(output.contains("Action: deal search (forced)"));
    check!(output.contains("Endpoint: POST /api/deals/search"));
    check!(output.contains("\"forceDeals\": true"));
}

#[test]
fn rank_tool_scores_supplied_deals() {
    let output = handle_rank_deals(RankDealsRequest {
        deals: vec![
            deal_json("1", "Podcast Reach", "", "Audio"),
            json!({"id": 2, "dealName": "Premium Display Network", "description": "High-impact display advertising", "mediaType": "Display"}),
        ],
        query: "display".to_string(),
        limit: None,
    })
    .unwrap();

    check!(output.contains("1. `2` Premium Display Network - score: 170"));
    check!(!output.contains("Podcast Reach"));
}

#[test]
fn rank_tool_rejects_invalid_records() {
    let result = handle_rank_deals(RankDealsRequest {
        deals: vec![json!("just a string")],
        query: "display".to_string(),
        limit: Some(3),
    });

    let_assert!(Err(message) = result);
    check!(message.contains("Deal #1"));
}

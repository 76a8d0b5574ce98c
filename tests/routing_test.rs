use assert2::check;
use deal_discovery::routing::{Intent, Selection};
use deal_discovery::{Action, CardType, ConversationTurn, Endpoint, SearchRequest, route};
use rstest::rstest;
use serde_json::json;

fn history() -> Vec<ConversationTurn> {
    vec![
        ConversationTurn {
            role: "user".to_string(),
            content: "We make plant-based snacks".to_string(),
        },
        ConversationTurn {
            role: "assistant".to_string(),
            content: "Great, who is your target buyer?".to_string(),
        },
    ]
}

#[rstest]
#[case("share the latest marketing headlines and market share data", Endpoint::MarketingNews)]
#[case("what's the market size for oat milk", Endpoint::MarketSizing)]
#[case("how big is the pet food ad spend", Endpoint::MarketSizing)]
#[case("build a persona for my coffee brand", Endpoint::UnifiedSearch)]
#[case("demographics of cyclists", Endpoint::AudienceInsights)]
#[case("best zip code for a pop-up", Endpoint::GeographicInsights)]
#[case("find deals to reach new parents", Endpoint::DealsSearch)]
#[case("premium video inventory", Endpoint::DealsSearch)]
fn free_text_reaches_expected_endpoint(#[case] query: &str, #[case] endpoint: Endpoint) {
    check!(route(&SearchRequest::new(query)).endpoint == endpoint);
}

#[test]
fn news_outranks_market_sizing() {
    // Contains both "latest" and "market share"
    let decision = route(&SearchRequest::new(
        "share the latest marketing headlines and market share data",
    ));
    check!(
        decision.action
            == Action::Card {
                card_type: CardType::MarketingNews,
                selection: Selection::Keyword(Intent::MarketingNews),
            }
    );
}

#[test]
fn explicit_card_ignores_keywords() {
    let request = SearchRequest::new("latest market size headlines")
        .with_card_types([CardType::BrandStrategy]);
    let decision = route(&request);

    check!(decision.endpoint == Endpoint::BrandStrategy);
    check!(decision.matched_keyword.is_none());
    check!(
        decision.action
            == Action::Card {
                card_type: CardType::BrandStrategy,
                selection: Selection::Explicit,
            }
    );
}

#[test]
fn multiple_cards_send_one_unified_body() {
    let request = SearchRequest::new("snack shoppers")
        .with_card_types([CardType::Deals, CardType::Personas, CardType::Deals])
        .with_history(history());
    let decision = route(&request);

    check!(decision.endpoint == Endpoint::UnifiedSearch);
    check!(
        serde_json::to_value(&decision.request).unwrap()
            == json!({"query": "snack shoppers", "cardTypes": ["deals", "personas"]})
    );
}

#[test]
fn unmatched_text_is_general_search_with_history() {
    let decision = route(&SearchRequest::new("premium video inventory").with_history(history()));

    check!(decision.action == Action::General);
    let body = serde_json::to_value(&decision.request).unwrap();
    check!(body["conversationHistory"].as_array().map(Vec::len) == Some(2));
    check!(body.get("forceDeals").is_none());
}

#[test]
fn explicit_deal_phrasing_forces_deals() {
    let decision = route(&SearchRequest::new("show me deals for sports fans"));

    check!(decision.action == Action::ForcedDeals);
    check!(decision.request.force_deals == Some(true));
}

#[test]
fn swot_request_carries_company_and_ticker() {
    let request = SearchRequest::new("give me a marketing swot analysis on Nike ($NKE)")
        .with_card_types([CardType::MarketingSwot]);
    let decision = route(&request);

    check!(decision.endpoint == Endpoint::MarketingSwot);
    check!(decision.request.stock_symbol.as_deref() == Some("NKE"));
    check!(decision.request.company_name.is_some());
}

#[test]
fn news_body_sends_query_only() {
    let decision = route(&SearchRequest::new("today's marketing news").with_history(history()));
    check!(serde_json::to_value(&decision.request).unwrap() == json!({"query": "today's marketing news"}));
}

//! Plain-text rendering of outcomes, decisions and rankings for tool output.

use crate::backend::{Card, SearchResults};
use crate::executor::{OutcomeStatus, SearchOutcome};
use crate::routing::RoutingDecision;
use crate::search::DealScore;
use crate::types::CardType;

/// Keys tried, in order, to find a card's headline.
const HEADLINE_KEYS: &[&str] = &["title", "name", "personaName", "segment", "market", "city", "region"];

/// Render a search outcome as markdown-ish text.
pub fn render_outcome(outcome: &SearchOutcome) -> String {
    let mut output = format!("Search: {}\n", outcome.action);

    if let Some(original) = &outcome.fell_back_from {
        output.push_str(&format!("Fell back from: {}\n", original));
    }

    output.push_str(&format!("Status: {}\n\n", status_label(outcome.status)));
    output.push_str(&outcome.message);
    output.push_str("\n\n");

    for card in outcome.action.card_types() {
        render_slot(&mut output, &outcome.results, card);
    }

    if let Some(coaching) = &outcome.coaching
        && !coaching.is_empty()
    {
        output.push_str("Coaching:\n");
        output.push_str(&format!("  {}\n", serde_json::Value::Object(coaching.clone())));
    }

    output
}

const fn status_label(status: OutcomeStatus) -> &'static str {
    match status {
        OutcomeStatus::Completed => "completed",
        OutcomeStatus::NoResults => "no results",
        OutcomeStatus::Offline => "offline (showing local results)",
        OutcomeStatus::Failed(_) => "failed",
    }
}

fn render_slot(output: &mut String, results: &SearchResults, card: CardType) {
    let count = results.slot_len(card);
    if count == 0 {
        return;
    }

    output.push_str(&format!("{} ({}):\n", card.label(), count));

    match card {
        CardType::Deals => {
            for (idx, deal) in results.deals.iter().enumerate() {
                output.push_str(&format!("{}. `{}` {}", idx + 1, deal.id, deal.deal_name));
                if !deal.media_type.is_empty() {
                    output.push_str(&format!(" ({})", deal.media_type));
                }
                output.push('\n');
                if !deal.description.is_empty() {
                    output.push_str(&format!("   {}\n", deal.description.trim()));
                }
            }
        }
        CardType::MarketingNews => {
            for (idx, item) in results.marketing_news.iter().enumerate() {
                output.push_str(&format!("{}. {}", idx + 1, item.title));
                if !item.source.is_empty() {
                    output.push_str(&format!(" [{}]", item.source));
                }
                output.push('\n');
                if !item.summary.is_empty() {
                    output.push_str(&format!("   {}\n", item.summary));
                }
            }
        }
        CardType::Personas => render_cards(output, &results.personas),
        CardType::AudienceInsights => render_cards(output, &results.audience_insights),
        CardType::MarketSizing => render_cards(output, &results.market_sizing),
        CardType::Geographic => render_cards(output, &results.geo_cards),
        CardType::CompetitiveIntelligence => render_object(output, &results.competitive_intelligence),
        CardType::ContentStrategy => render_object(output, &results.content_strategy),
        CardType::BrandStrategy => render_object(output, &results.brand_strategy),
        CardType::MarketingSwot => render_object(output, &results.marketing_swot),
        CardType::CompanyProfile => render_object(output, &results.company_profile),
    }

    output.push('\n');
}

fn render_cards(output: &mut String, cards: &[Card]) {
    for (idx, card) in cards.iter().enumerate() {
        match headline(card) {
            Some(title) => output.push_str(&format!("{}. {}\n", idx + 1, title)),
            None => output.push_str(&format!(
                "{}. {}\n",
                idx + 1,
                serde_json::Value::Object(card.clone())
            )),
        }
    }
}

fn render_object(output: &mut String, card: &Card) {
    for (key, value) in card {
        match value {
            serde_json::Value::String(text) => output.push_str(&format!("• {}: {}\n", key, text)),
            other => output.push_str(&format!("• {}: {}\n", key, other)),
        }
    }
}

fn headline(card: &Card) -> Option<&str> {
    HEADLINE_KEYS
        .iter()
        .find_map(|key| card.get(*key).and_then(serde_json::Value::as_str))
}

/// Render a routing decision without executing it.
pub fn render_decision(decision: &RoutingDecision) -> String {
    let mut output = format!("Action: {}\n", decision.action);
    output.push_str(&format!("Endpoint: POST {}\n", decision.endpoint));
    if let Some(keyword) = decision.matched_keyword {
        output.push_str(&format!("Matched keyword: \"{}\"\n", keyword));
    }
    let body = serde_json::to_string_pretty(&decision.request)
        .unwrap_or_else(|e| format!("<unserializable request: {}>", e));
    output.push_str(&format!("Request body:\n{}\n", body));
    output
}

/// Render ranked deals with their scores and reasons.
pub fn render_ranking(query: &str, ranked: &[DealScore<'_>]) -> String {
    if ranked.is_empty() {
        return format!("No deals scored above zero for '{}'.\n", query);
    }

    let mut output = format!("Ranked deals for '{}':\n\n", query);
    for (idx, scored) in ranked.iter().enumerate() {
        output.push_str(&format!(
            "{}. `{}` {} - score: {}\n",
            idx + 1,
            scored.deal.id,
            scored.deal.deal_name,
            scored.score
        ));
        if !scored.reasons.is_empty() {
            output.push_str(&format!("   {}\n", scored.reasons.join("; ")));
        }
    }
    output
}

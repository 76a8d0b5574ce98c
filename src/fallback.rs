//! User-facing status messages and the offline news substitute.

use crate::backend::NewsItem;
use crate::types::CardType;
use std::time::Duration;

/// Shown when the news branch cannot reach the backend.
pub const OFFLINE_NEWS_MESSAGE: &str =
    "The marketing news service is offline, so these are recent headlines from the local digest.";

/// Message for a branch whose backend failed.
pub fn unavailable_message(card: CardType) -> String {
    format!("{} is temporarily unavailable. Please try again later.", card.label())
}

/// Message for a branch that hit its deadline.
pub fn timeout_message(card: CardType, after: Duration) -> String {
    format!(
        "{} timed out after {} seconds. Try a more specific query.",
        card.label(),
        after.as_secs()
    )
}

/// Message for a request that succeeded with nothing usable.
pub fn empty_message(card: CardType, query: &str) -> String {
    match card {
        CardType::Deals => format!(
            "No deals matched \"{}\". Try broader terms or a different audience.",
            query
        ),
        CardType::MarketingNews => format!("No marketing news found for \"{}\".", query),
        CardType::Personas => format!("No personas could be generated for \"{}\".", query),
        CardType::MarketSizing => format!(
            "No market sizing data found for \"{}\". Try naming a specific category or region.",
            query
        ),
        CardType::Geographic => format!("No geographic insights found for \"{}\".", query),
        CardType::AudienceInsights => format!("No audience insights found for \"{}\".", query),
        CardType::CompetitiveIntelligence
        | CardType::ContentStrategy
        | CardType::BrandStrategy
        | CardType::MarketingSwot
        | CardType::CompanyProfile => {
            format!("{} returned no results for \"{}\".", card.label(), query)
        }
    }
}

/// Empty-result message for a unified search over several card types.
pub fn combined_empty_message(cards: &[CardType], query: &str) -> String {
    format!(
        "Nothing found for \"{}\" across {}. Try broader terms or fewer categories.",
        query,
        card_list(cards)
    )
}

/// Failure message for a unified search over several card types.
pub fn combined_unavailable_message(cards: &[CardType]) -> String {
    format!(
        "Search across {} is temporarily unavailable. Please try again later.",
        card_list(cards)
    )
}

fn card_list(cards: &[CardType]) -> String {
    cards.iter().map(|card| card.as_str()).collect::<Vec<_>>().join(", ")
}

/// Default success message when the backend sent no `aiResponse`.
pub fn success_message(cards: &[CardType], counts: &[usize]) -> String {
    let parts: Vec<String> = cards
        .iter()
        .zip(counts)
        .filter(|(_, count)| **count > 0)
        .map(|(card, count)| format!("{} {}", count, card.as_str()))
        .collect();
    format!("Found {}.", parts.join(", "))
}

/// Locally generated headlines used when the news backend is unreachable.
pub fn canned_news() -> Vec<NewsItem> {
    let item = |title: &str, summary: &str, category: &str| NewsItem {
        title: title.to_string(),
        summary: summary.to_string(),
        source: "Deal Discovery digest".to_string(),
        url: None,
        category: Some(category.to_string()),
    };

    vec![
        item(
            "Retail media networks keep taking share of digital budgets",
            "Advertisers continue shifting spend toward commerce data and closed-loop measurement.",
            "Retail Media",
        ),
        item(
            "Connected TV buyers tighten focus on outcomes",
            "CTV campaigns are increasingly planned against attention and conversion metrics rather than reach alone.",
            "CTV",
        ),
        item(
            "Privacy changes push marketers toward first-party data",
            "Signal loss is accelerating investment in clean rooms and contextual targeting.",
            "Privacy",
        ),
        item(
            "Creator partnerships move from test to line item",
            "Brands are formalising creator programmes with dedicated budgets and performance goals.",
            "Social",
        ),
    ]
}

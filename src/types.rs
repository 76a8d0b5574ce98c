//! Core request and record types shared by the router, scorer and executor.

use rmcp::schemars;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// A user-selectable category of analysis result.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, schemars::JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum CardType {
    Deals,
    Personas,
    AudienceInsights,
    MarketSizing,
    Geographic,
    MarketingNews,
    CompetitiveIntelligence,
    ContentStrategy,
    BrandStrategy,
    MarketingSwot,
    CompanyProfile,
}

impl CardType {
    /// Every card type, in display order.
    pub const ALL: [Self; 11] = [
        Self::Deals,
        Self::Personas,
        Self::AudienceInsights,
        Self::MarketSizing,
        Self::Geographic,
        Self::MarketingNews,
        Self::CompetitiveIntelligence,
        Self::ContentStrategy,
        Self::BrandStrategy,
        Self::MarketingSwot,
        Self::CompanyProfile,
    ];

    /// Wire name, e.g. `audience-insights`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Deals => "deals",
            Self::Personas => "personas",
            Self::AudienceInsights => "audience-insights",
            Self::MarketSizing => "market-sizing",
            Self::Geographic => "geographic",
            Self::MarketingNews => "marketing-news",
            Self::CompetitiveIntelligence => "competitive-intelligence",
            Self::ContentStrategy => "content-strategy",
            Self::BrandStrategy => "brand-strategy",
            Self::MarketingSwot => "marketing-swot",
            Self::CompanyProfile => "company-profile",
        }
    }

    /// Human-readable label used in status messages.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Deals => "Deal search",
            Self::Personas => "Persona generation",
            Self::AudienceInsights => "Audience insights",
            Self::MarketSizing => "Market sizing analysis",
            Self::Geographic => "Geographic insights",
            Self::MarketingNews => "Marketing news",
            Self::CompetitiveIntelligence => "Competitive intelligence",
            Self::ContentStrategy => "Content strategy",
            Self::BrandStrategy => "Brand strategy",
            Self::MarketingSwot => "Marketing SWOT analysis",
            Self::CompanyProfile => "Company profile",
        }
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a card type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown card type '{input}' (expected one of: {})", valid_card_types())]
pub struct ParseCardTypeError {
    pub input: String,
}

fn valid_card_types() -> String {
    CardType::ALL
        .iter()
        .map(|card| card.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl FromStr for CardType {
    type Err = ParseCardTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|card| card.as_str() == normalized)
            .ok_or_else(|| ParseCardTypeError {
                input: s.to_string(),
            })
    }
}

/// One prior turn of the conversation, forwarded to endpoints untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ConversationTurn {
    pub role: String,
    pub content: String,
}

/// A single search invocation as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    /// Explicitly selected card types, deduplicated, first occurrence wins.
    pub card_types: Vec<CardType>,
    pub conversation_history: Vec<ConversationTurn>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn with_card_types(mut self, card_types: impl IntoIterator<Item = CardType>) -> Self {
        self.card_types.clear();
        for card in card_types {
            if !self.card_types.contains(&card) {
                self.card_types.push(card);
            }
        }
        self
    }

    pub fn with_history(mut self, history: Vec<ConversationTurn>) -> Self {
        self.conversation_history = history;
        self
    }
}

/// An advertising deal returned by the deals endpoints.
///
/// Only the fields the scorer reads are typed. Everything else (`environment`,
/// `bidGuidance`, ...) is carried verbatim in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub deal_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub media_type: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Deal {
    pub fn new(
        id: impl Into<String>,
        deal_name: impl Into<String>,
        description: impl Into<String>,
        media_type: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            deal_name: deal_name.into(),
            description: description.into(),
            media_type: media_type.into(),
            extra: serde_json::Map::new(),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde_json::Value;

    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "deal id must be a string or number, got {}",
            other
        ))),
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

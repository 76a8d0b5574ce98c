//! Response schema decoded at the endpoint boundary.
//!
//! All endpoints answer with a JSON object holding one result slot per card
//! type they produce plus an optional `aiResponse`. Missing or `null` slots
//! decode as empty containers, so the executor never checks truthiness.

use super::Endpoint;
use crate::error::BackendError;
use crate::types::{CardType, Deal};
use serde::{Deserialize, Deserializer, Serialize};

/// An opaque analysis card (persona, market sizing row, geo card, ...).
pub type Card = serde_json::Map<String, serde_json::Value>;

/// Optional coaching hints returned with deal searches.
pub type Coaching = serde_json::Map<String, serde_json::Value>;

/// A marketing news headline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewsItem {
    pub title: String,
    pub summary: String,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Result slots, one per card type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    #[serde(default, deserialize_with = "null_as_default")]
    pub deals: Vec<Deal>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub personas: Vec<Card>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub audience_insights: Vec<Card>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub market_sizing: Vec<Card>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub geo_cards: Vec<Card>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub marketing_news: Vec<NewsItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub competitive_intelligence: Card,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content_strategy: Card,
    #[serde(default, deserialize_with = "null_as_default")]
    pub brand_strategy: Card,
    #[serde(default, deserialize_with = "null_as_default")]
    pub marketing_swot: Card,
    #[serde(default, deserialize_with = "null_as_default")]
    pub company_profile: Card,
}

impl SearchResults {
    /// Number of records held in the slot for `card`.
    ///
    /// Object slots count as one record when non-empty.
    pub fn slot_len(&self, card: CardType) -> usize {
        match card {
            CardType::Deals => self.deals.len(),
            CardType::Personas => self.personas.len(),
            CardType::AudienceInsights => self.audience_insights.len(),
            CardType::MarketSizing => self.market_sizing.len(),
            CardType::Geographic => self.geo_cards.len(),
            CardType::MarketingNews => self.marketing_news.len(),
            CardType::CompetitiveIntelligence => usize::from(!self.competitive_intelligence.is_empty()),
            CardType::ContentStrategy => usize::from(!self.content_strategy.is_empty()),
            CardType::BrandStrategy => usize::from(!self.brand_strategy.is_empty()),
            CardType::MarketingSwot => usize::from(!self.marketing_swot.is_empty()),
            CardType::CompanyProfile => usize::from(!self.company_profile.is_empty()),
        }
    }

    /// True when none of `cards` carries any record.
    pub fn is_empty_for(&self, cards: &[CardType]) -> bool {
        cards.iter().all(|card| self.slot_len(*card) == 0)
    }

    /// Keep only the slots for `cards`; every other slot is emptied.
    pub fn retain(&mut self, cards: &[CardType]) {
        for card in CardType::ALL {
            if !cards.contains(&card) {
                self.clear_slot(card);
            }
        }
    }

    fn clear_slot(&mut self, card: CardType) {
        match card {
            CardType::Deals => self.deals.clear(),
            CardType::Personas => self.personas.clear(),
            CardType::AudienceInsights => self.audience_insights.clear(),
            CardType::MarketSizing => self.market_sizing.clear(),
            CardType::Geographic => self.geo_cards.clear(),
            CardType::MarketingNews => self.marketing_news.clear(),
            CardType::CompetitiveIntelligence => self.competitive_intelligence.clear(),
            CardType::ContentStrategy => self.content_strategy.clear(),
            CardType::BrandStrategy => self.brand_strategy.clear(),
            CardType::MarketingSwot => self.marketing_swot.clear(),
            CardType::CompanyProfile => self.company_profile.clear(),
        }
    }
}

/// Full body of an endpoint response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointResponse {
    #[serde(flatten)]
    pub results: SearchResults,
    #[serde(default)]
    pub ai_response: Option<String>,
    #[serde(default)]
    pub coaching: Option<Coaching>,
}

/// Decode a raw JSON body from `endpoint`.
pub fn decode(endpoint: Endpoint, body: serde_json::Value) -> Result<EndpointResponse, BackendError> {
    serde_json::from_value(body).map_err(|source| BackendError::Decode { endpoint, source })
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

//! Downstream analysis endpoints and the transport used to reach them.
//!
//! Every branch of the router ends in exactly one [`SearchBackend::post`] call.
//! The HTTP implementation lives in [`http`]; tests substitute a scripted one.

pub mod http;
pub mod request;
pub mod response;

pub use http::HttpBackend;
pub use request::EndpointRequest;
pub use response::{Card, Coaching, NewsItem, SearchResults};

use crate::error::BackendError;
use crate::types::CardType;
use async_trait::async_trait;
use std::fmt;

/// Logical endpoints exposed by the deal discovery API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    UnifiedSearch,
    DealsSearch,
    MarketSizing,
    AudienceInsights,
    GeographicInsights,
    MarketingNews,
    CompetitiveIntelligence,
    ContentStrategy,
    BrandStrategy,
    MarketingSwot,
    CompanyProfile,
}

impl Endpoint {
    /// Request path relative to the API base URL.
    pub const fn path(self) -> &'static str {
        match self {
            Self::UnifiedSearch => "/api/unified-search",
            Self::DealsSearch => "/api/deals/search",
            Self::MarketSizing => "/api/market-sizing",
            Self::AudienceInsights => "/api/audience-insights",
            Self::GeographicInsights => "/api/geographic-insights",
            Self::MarketingNews => "/api/marketing-news",
            Self::CompetitiveIntelligence => "/api/competitive-intelligence",
            Self::ContentStrategy => "/api/content-strategy",
            Self::BrandStrategy => "/api/brand-strategy",
            Self::MarketingSwot => "/api/marketing-swot",
            Self::CompanyProfile => "/api/company-profile",
        }
    }

    /// The dedicated endpoint for a single card type.
    pub const fn for_card(card: CardType) -> Self {
        match card {
            CardType::Deals => Self::DealsSearch,
            CardType::Personas => Self::UnifiedSearch,
            CardType::AudienceInsights => Self::AudienceInsights,
            CardType::MarketSizing => Self::MarketSizing,
            CardType::Geographic => Self::GeographicInsights,
            CardType::MarketingNews => Self::MarketingNews,
            CardType::CompetitiveIntelligence => Self::CompetitiveIntelligence,
            CardType::ContentStrategy => Self::ContentStrategy,
            CardType::BrandStrategy => Self::BrandStrategy,
            CardType::MarketingSwot => Self::MarketingSwot,
            CardType::CompanyProfile => Self::CompanyProfile,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Transport for a single JSON request to one endpoint.
///
/// Implementations return the raw JSON body; decoding into [`SearchResults`]
/// happens in [`response::decode`] so every backend shares one schema.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn post(
        &self,
        endpoint: Endpoint,
        request: &EndpointRequest,
    ) -> Result<serde_json::Value, BackendError>;
}

#[async_trait]
impl<B: SearchBackend + ?Sized> SearchBackend for std::sync::Arc<B> {
    async fn post(
        &self,
        endpoint: Endpoint,
        request: &EndpointRequest,
    ) -> Result<serde_json::Value, BackendError> {
        (**self).post(endpoint, request).await
    }
}

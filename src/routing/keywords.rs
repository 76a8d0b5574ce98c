//! Ordered keyword rules for free-text intent inference.
//!
//! Rules are evaluated top to bottom against the lower-cased query and the
//! first match wins. Matching is plain substring containment, so `state`
//! also fires inside `statement`.

use crate::types::CardType;

/// What a free-text query is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    MarketingNews,
    MarketSizing,
    ExplicitDeals,
    Personas,
    AudienceInsights,
    Geographic,
}

impl Intent {
    /// Card type whose result slot this intent fills.
    pub const fn card_type(self) -> CardType {
        match self {
            Self::MarketingNews => CardType::MarketingNews,
            Self::MarketSizing => CardType::MarketSizing,
            Self::ExplicitDeals => CardType::Deals,
            Self::Personas => CardType::Personas,
            Self::AudienceInsights => CardType::AudienceInsights,
            Self::Geographic => CardType::Geographic,
        }
    }
}

/// One row of the precedence table.
#[derive(Debug)]
pub struct KeywordRule {
    pub intent: Intent,
    /// Fires when the query contains any of these.
    pub any: &'static [&'static str],
    /// Fires when the query contains every word of any one group.
    pub all: &'static [&'static [&'static str]],
}

impl KeywordRule {
    /// The keyword (or first word of the group) that made this rule fire.
    pub fn matches(&self, lowered_query: &str) -> Option<&'static str> {
        if let Some(keyword) = self
            .any
            .iter()
            .find(|keyword| lowered_query.contains(**keyword))
        {
            return Some(*keyword);
        }

        self.all
            .iter()
            .find(|group| group.iter().all(|word| lowered_query.contains(word)))
            .and_then(|group| group.first().copied())
    }
}

/// Precedence table. Order is significant.
pub static RULES: &[KeywordRule] = &[
    KeywordRule {
        intent: Intent::MarketingNews,
        any: &[
            "news",
            "headlines",
            "latest",
            "today's marketing",
            "trending",
        ],
        all: &[&["share", "headlines"]],
    },
    KeywordRule {
        intent: Intent::MarketSizing,
        any: &[
            "market size",
            "market sizing",
            "tam",
            "market share",
            "ad spend",
            "percentage",
            "how big",
            "total addressable",
        ],
        all: &[],
    },
    KeywordRule {
        intent: Intent::ExplicitDeals,
        any: &[
            "find deals",
            "find me deals",
            "show me deals",
            "reach new parents",
            "sports fans",
            "luxury goods",
            "targeting",
        ],
        all: &[],
    },
    KeywordRule {
        intent: Intent::Personas,
        any: &["persona", "buyer", "customer profile"],
        all: &[],
    },
    KeywordRule {
        intent: Intent::AudienceInsights,
        any: &["audience insights", "demographics", "psychographics"],
        all: &[],
    },
    KeywordRule {
        intent: Intent::Geographic,
        any: &["geographic", "zip code", "city", "state", "region"],
        all: &[],
    },
];

/// Run the precedence table over a query.
///
/// Returns the winning intent and the keyword that triggered it, or `None`
/// when the query should go to the general deal search.
pub fn classify(query: &str) -> Option<(Intent, &'static str)> {
    let lowered = query.to_lowercase();
    RULES
        .iter()
        .find_map(|rule| rule.matches(&lowered).map(|keyword| (rule.intent, keyword)))
}

//! Deal relevance scoring and ranking.
//!
//! Scores are cumulative and case-insensitive:
//! - 100: deal name contains the whole query
//! - 20 per query word that partially matches a deal-name word
//! - 30: description contains the whole query
//! - 20: media type contains the whole query

use crate::types::Deal;

/// Default number of deals kept after ranking.
pub const DEFAULT_RESULT_LIMIT: usize = 6;

const EXACT_NAME_POINTS: u32 = 100;
const NAME_WORD_POINTS: u32 = 20;
const DESCRIPTION_POINTS: u32 = 30;
const MEDIA_TYPE_POINTS: u32 = 20;

/// A deal paired with its relevance score against one query.
#[derive(Debug, Clone, PartialEq)]
pub struct DealScore<'a> {
    pub deal: &'a Deal,
    pub score: u32,
    /// Why points were awarded. Diagnostic only.
    pub reasons: Vec<String>,
}

/// Score a single deal against a query.
pub fn score_deal<'a>(deal: &'a Deal, query: &str) -> DealScore<'a> {
    let query = query.trim().to_lowercase();
    let mut score = 0;
    let mut reasons = Vec::new();

    if query.is_empty() {
        return DealScore {
            deal,
            score,
            reasons,
        };
    }

    let name = deal.deal_name.to_lowercase();

    if name.contains(&query) {
        score += EXACT_NAME_POINTS;
        reasons.push("exact deal name match".to_string());
    }

    let overlap = word_overlap(&query, &name);
    if overlap > 0 {
        score += NAME_WORD_POINTS * overlap;
        reasons.push(format!("word overlap in deal name ({})", overlap));
    }

    if deal.description.to_lowercase().contains(&query) {
        score += DESCRIPTION_POINTS;
        reasons.push("description match".to_string());
    }

    if deal.media_type.to_lowercase().contains(&query) {
        score += MEDIA_TYPE_POINTS;
        reasons.push("media type match".to_string());
    }

    DealScore {
        deal,
        score,
        reasons,
    }
}

/// Count query words that partially match any word of `name`.
///
/// A pair matches when either word contains the other. Both inputs are
/// expected to be lower-cased already.
fn word_overlap(query: &str, name: &str) -> u32 {
    let name_words: Vec<&str> = name.split_whitespace().collect();
    let matched = query
        .split_whitespace()
        .filter(|word| {
            name_words
                .iter()
                .any(|name_word| name_word.contains(word) || word.contains(name_word))
        })
        .count();
    u32::try_from(matched).unwrap_or(u32::MAX)
}

/// Score, filter and order deals, keeping at most `limit`.
///
/// Zero scores are dropped. Equal scores keep their input order. A blank
/// query skips scoring and returns the first `limit` deals untouched.
pub fn rank_scored<'a>(deals: &'a [Deal], query: &str, limit: usize) -> Vec<DealScore<'a>> {
    if query.trim().is_empty() {
        return deals
            .iter()
            .take(limit)
            .map(|deal| DealScore {
                deal,
                score: 0,
                reasons: Vec::new(),
            })
            .collect();
    }

    let mut scored: Vec<DealScore<'a>> = deals
        .iter()
        .map(|deal| score_deal(deal, query))
        .filter(|scored| scored.score > 0)
        .collect();

    // sort_by is stable, so ties keep input order
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(limit);
    scored
}

/// Rank owned deals, returning the kept deals in order.
pub fn rank(deals: &[Deal], query: &str, limit: usize) -> Vec<Deal> {
    rank_scored(deals, query, limit)
        .into_iter()
        .map(|scored| scored.deal.clone())
        .collect()
}

//! Relevance ranking for deals returned by the search endpoints.

pub mod scoring;

pub use scoring::{DEFAULT_RESULT_LIMIT, DealScore, rank, rank_scored, score_deal};

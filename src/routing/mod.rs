//! Intent routing: which downstream endpoint a search invocation calls.
//!
//! Routing is pure and synchronous. Explicit card types short-circuit keyword
//! inference; free text runs through the ordered rule table in [`keywords`].

pub mod company;
pub mod decision;
pub mod keywords;

pub use company::{CompanyRef, extract_company};
pub use decision::{Action, RoutingDecision, Selection, general_decision, route};
pub use keywords::{Intent, KeywordRule, RULES, classify};

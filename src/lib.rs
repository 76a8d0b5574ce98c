pub mod backend;
pub mod cli;
pub mod config;
pub mod error;
pub mod executor;
pub mod fallback;
pub mod format;
pub mod logging;
pub mod routing;
pub mod search;
pub mod server;
pub mod session;
pub mod tools;
pub mod types;

pub use backend::{Endpoint, EndpointRequest, HttpBackend, SearchBackend, SearchResults};
pub use config::Config;
pub use error::{BackendError, FailureKind};
pub use executor::{OutcomeStatus, SearchExecutor, SearchOutcome};
pub use routing::{Action, RoutingDecision, route};
pub use server::DealServer;
pub use session::{SearchSession, SearchState};
pub use types::{CardType, ConversationTurn, Deal, SearchRequest};

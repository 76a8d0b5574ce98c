pub mod classify;
pub mod rank;
pub mod search;

pub use classify::*;
pub use rank::*;
pub use search::*;

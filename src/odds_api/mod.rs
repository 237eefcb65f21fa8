pub mod cache;
pub mod client;
pub mod leagues;
pub mod types;

pub use cache::{ResponseCache, SystemClock};
pub use client::{OddsApiClient, OddsApiError};
pub use types::{BookmakerOdds, Fixture, HistoricalDataBundle, MatchResult};

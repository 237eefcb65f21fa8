//! The pre-match model: pure functions from historical results and quoted
//! prices to probabilities, fair prices and EV opportunities. Nothing in
//! this tree does I/O.

pub mod analysis;
pub mod expected_goals;
pub mod form;
pub mod h2h;
pub mod markets;
pub mod poisson;
pub mod stats;
pub mod value;

pub use analysis::{analyze, MatchAnalysis};

//! `rostercheck-engine`: deterministic roster-linkage engine.
//!
//! Pure engine crate: receives pre-loaded person records, returns one
//! scored, explained match result per event record. No CLI or IO
//! dependencies.

pub mod config;
pub mod error;
pub mod index;
pub mod matcher;
pub mod model;
pub mod normalize;
pub mod scoring;
pub mod summary;

pub use config::MatchConfig;
pub use error::ConfigError;
pub use matcher::match_records;
pub use model::{Issue, MatchResult, MatchType, Person};
pub use summary::{compute_summary, MatchSummary};

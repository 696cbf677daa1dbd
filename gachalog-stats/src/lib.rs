//! Pull normalization and rate statistics for gacha pull logs.
//!
//! Every function here is pure: entries and the cost table come in as arguments and
//! nothing is cached between calls.

pub mod aggregate;
pub mod normalize;
pub mod projection;
pub mod quality;
pub mod rates;

pub use aggregate::{
    Aggregate, EntryRates, aggregate, aggregate_builtin, aggregate_by_game, aggregate_for_game,
};
pub use normalize::{NormalizedPulls, normalize_pulls, normalize_pulls_builtin};
pub use projection::{project_aggregate, project_next_pull};
pub use rates::{OutcomeCounts, RateSet, compute_rates, compute_rates_builtin};

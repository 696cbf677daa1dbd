use gachalog_model::models::Outcome;

use crate::aggregate::Aggregate;

/// Observed rate after one more single pull that is also a hit: `(hits + 1) / (pulls + 1)`.
///
/// Only meaningful on top of an existing aggregate; prefer [`project_aggregate`] or
/// [`crate::rates::RateSet::project_next`], which return `None` when there is no data.
pub fn project_next_pull(hit_count: u32, total_pulls: f64) -> f64 {
    (hit_count as f64 + 1.0) / (total_pulls + 1.0)
}

pub fn project_aggregate(aggregate: &Aggregate, outcome: Outcome) -> Option<f64> {
    aggregate
        .aggregated
        .as_ref()
        .and_then(|rates| rates.project_next(outcome))
}

//! Conversion of one log entry into a comparable pull count.
//!
//! Games grant pulls through three channels that can all appear in the same logged
//! session: spendable currency, dedicated tickets, and free pulls. Each channel is
//! converted to pulls here and nowhere else, including the legacy encoding where the
//! ticket count was stored as a resource amount tagged `"ticket"`.

use std::iter::Sum;
use std::ops::{Add, AddAssign};

use gachalog_model::costs::{CostTable, MULTI_PULL_SIZE, lookup_multi_pull_cost};
use gachalog_model::models::PullLogEntry;
use serde::{Deserialize, Serialize};

/// `resource_kind` of entries recorded before `ticket_amount` existed. Their
/// `resource_amount` is a ticket count, not currency.
pub const LEGACY_TICKET_KIND: &str = "ticket";

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedPulls {
    pub total_pulls: f64,
    pub ticket_pulls: f64,
    pub free_pulls: f64,
    pub resource_pulls: f64,
}

impl NormalizedPulls {
    pub fn new(ticket_pulls: f64, free_pulls: f64, resource_pulls: f64) -> Self {
        Self {
            total_pulls: ticket_pulls + free_pulls + resource_pulls,
            ticket_pulls,
            free_pulls,
            resource_pulls,
        }
    }

    /// Rates are only defined when this holds.
    pub fn has_pulls(&self) -> bool {
        self.total_pulls.is_finite() && self.total_pulls > 0.0
    }
}

/// Field-wise addition. `total_pulls` is added as a total, not recomputed from the
/// channel sums, so a fold equals the per-item totals summed in order.
impl Add for NormalizedPulls {
    type Output = NormalizedPulls;

    fn add(self, rhs: NormalizedPulls) -> NormalizedPulls {
        NormalizedPulls {
            total_pulls: self.total_pulls + rhs.total_pulls,
            ticket_pulls: self.ticket_pulls + rhs.ticket_pulls,
            free_pulls: self.free_pulls + rhs.free_pulls,
            resource_pulls: self.resource_pulls + rhs.resource_pulls,
        }
    }
}

impl AddAssign for NormalizedPulls {
    fn add_assign(&mut self, rhs: NormalizedPulls) {
        *self = *self + rhs;
    }
}

impl Sum for NormalizedPulls {
    fn sum<I: Iterator<Item = NormalizedPulls>>(iter: I) -> Self {
        iter.fold(NormalizedPulls::default(), |acc, p| acc + p)
    }
}

pub fn is_legacy_ticket(entry: &PullLogEntry) -> bool {
    entry.resource_kind == LEGACY_TICKET_KIND
}

/// Normalizes `entry` using the cost row of `game_id` in `table`.
pub fn normalize_pulls(entry: &PullLogEntry, game_id: &str, table: &CostTable) -> NormalizedPulls {
    normalize_with_cost(entry, table.multi_pull_cost(game_id))
}

/// Same as [`normalize_pulls`] against the built-in cost table.
pub fn normalize_pulls_builtin(entry: &PullLogEntry, game_id: &str) -> NormalizedPulls {
    normalize_with_cost(entry, lookup_multi_pull_cost(game_id))
}

pub fn normalize_with_cost(entry: &PullLogEntry, multi_pull_cost: u32) -> NormalizedPulls {
    let single_cost = if multi_pull_cost > 0 {
        multi_pull_cost as f64 / MULTI_PULL_SIZE as f64
    } else {
        0.0
    };

    let ticket_pulls = entry.ticket_amount.unwrap_or(0) as f64;
    let free_pulls = entry.free_pulls.unwrap_or(0) as f64;

    let amount = sanitize_amount(entry.resource_amount);
    let resource_pulls = if is_legacy_ticket(entry) {
        amount
    } else if single_cost > 0.0 {
        amount / single_cost
    } else {
        0.0
    };

    NormalizedPulls::new(ticket_pulls, free_pulls, resource_pulls)
}

/// True when the entry spent currency that could not be converted because the game
/// has no usable cost row.
pub fn resource_ignored(entry: &PullLogEntry, game_id: &str, table: &CostTable) -> bool {
    !is_legacy_ticket(entry)
        && sanitize_amount(entry.resource_amount) > 0.0
        && table.multi_pull_cost(game_id) == 0
}

// Negative or non-finite amounts count as no spend.
fn sanitize_amount(amount: f64) -> f64 {
    if amount.is_finite() && amount > 0.0 {
        amount
    } else {
        0.0
    }
}

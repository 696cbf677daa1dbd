use gachalog_model::costs::CostTable;
use gachalog_model::models::{Outcome, PullLogEntry};
use serde::{Deserialize, Serialize};

use crate::normalize::{normalize_pulls, normalize_pulls_builtin};
use crate::projection::project_next_pull;

/// Raw outcome counters of one entry or of a folded set of entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeCounts {
    pub featured: u32,
    pub spook: u32,
    pub side_unit: u32,
    pub featured_items: Option<u32>,
    pub sr_items: Option<u32>,
}

impl OutcomeCounts {
    pub fn from_entry(entry: &PullLogEntry) -> Self {
        Self {
            featured: entry.featured_count,
            spook: entry.spook_count,
            side_unit: entry.side_unit_count,
            featured_items: entry.featured_items_count,
            sr_items: entry.sr_items_count,
        }
    }

    /// Item counters stay `None` only while neither side tracks them.
    pub fn merge(self, other: OutcomeCounts) -> Self {
        Self {
            featured: self.featured.saturating_add(other.featured),
            spook: self.spook.saturating_add(other.spook),
            side_unit: self.side_unit.saturating_add(other.side_unit),
            featured_items: merge_optional(self.featured_items, other.featured_items),
            sr_items: merge_optional(self.sr_items, other.sr_items),
        }
    }
}

fn merge_optional(a: Option<u32>, b: Option<u32>) -> Option<u32> {
    match (a, b) {
        (None, None) => None,
        (a, b) => Some(a.unwrap_or(0).saturating_add(b.unwrap_or(0))),
    }
}

/// Outcome rates over a positive number of pulls. Rates are plain proportions and may
/// exceed 1.0 when counts were recorded inconsistently with pulls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateSet {
    pub pulls: f64,
    pub featured_rate: f64,
    pub spook_rate: f64,
    pub side_unit_rate: f64,
    pub featured_items_rate: Option<f64>,
    pub sr_items_rate: Option<f64>,
    pub featured_count: u32,
    pub spook_count: u32,
    pub side_unit_count: u32,
    pub featured_items_count: Option<u32>,
    pub sr_items_count: Option<u32>,
}

impl RateSet {
    /// `None` when `pulls` is not a positive finite number.
    pub fn from_counts(pulls: f64, counts: OutcomeCounts) -> Option<Self> {
        if !(pulls.is_finite() && pulls > 0.0) {
            return None;
        }
        let rate = |count: u32| count as f64 / pulls;
        Some(Self {
            pulls,
            featured_rate: rate(counts.featured),
            spook_rate: rate(counts.spook),
            side_unit_rate: rate(counts.side_unit),
            featured_items_rate: counts.featured_items.map(rate),
            sr_items_rate: counts.sr_items.map(rate),
            featured_count: counts.featured,
            spook_count: counts.spook,
            side_unit_count: counts.side_unit,
            featured_items_count: counts.featured_items,
            sr_items_count: counts.sr_items,
        })
    }

    pub fn rate(&self, outcome: Outcome) -> Option<f64> {
        match outcome {
            Outcome::Featured => Some(self.featured_rate),
            Outcome::Spook => Some(self.spook_rate),
            Outcome::SideUnit => Some(self.side_unit_rate),
            Outcome::FeaturedItems => self.featured_items_rate,
            Outcome::SrItems => self.sr_items_rate,
        }
    }

    pub fn count(&self, outcome: Outcome) -> Option<u32> {
        match outcome {
            Outcome::Featured => Some(self.featured_count),
            Outcome::Spook => Some(self.spook_count),
            Outcome::SideUnit => Some(self.side_unit_count),
            Outcome::FeaturedItems => self.featured_items_count,
            Outcome::SrItems => self.sr_items_count,
        }
    }

    pub fn percent(&self, outcome: Outcome) -> Option<f64> {
        self.rate(outcome).map(|r| r * 100.0)
    }

    /// Rate this outcome would have if the next single pull were also a hit.
    pub fn project_next(&self, outcome: Outcome) -> Option<f64> {
        self.count(outcome).map(|count| project_next_pull(count, self.pulls))
    }

    pub fn exceeds_pulls(&self, outcome: Outcome) -> bool {
        self.rate(outcome).is_some_and(|r| r > 1.0)
    }
}

pub fn compute_rates(entry: &PullLogEntry, game_id: &str, table: &CostTable) -> Option<RateSet> {
    let pulls = normalize_pulls(entry, game_id, table);
    RateSet::from_counts(pulls.total_pulls, OutcomeCounts::from_entry(entry))
}

/// Same as [`compute_rates`] against the built-in cost table.
pub fn compute_rates_builtin(entry: &PullLogEntry, game_id: &str) -> Option<RateSet> {
    let pulls = normalize_pulls_builtin(entry, game_id);
    RateSet::from_counts(pulls.total_pulls, OutcomeCounts::from_entry(entry))
}

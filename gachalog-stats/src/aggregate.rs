use std::collections::BTreeMap;

use gachalog_model::costs::CostTable;
use gachalog_model::models::PullLogEntry;
use serde::{Deserialize, Serialize};

use crate::normalize::{NormalizedPulls, normalize_pulls, resource_ignored};
use crate::rates::{OutcomeCounts, RateSet};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryRates {
    pub id: String,
    pub rates: Option<RateSet>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aggregate {
    /// One item per input entry, in input order.
    pub per_entry: Vec<EntryRates>,
    /// Pulls-weighted rates over every entry; `None` when no entry produced pulls.
    pub aggregated: Option<RateSet>,
    pub totals: NormalizedPulls,
    pub counts: OutcomeCounts,
    /// Entries whose currency spend was dropped because the game has no cost row.
    pub ignored_resource_entries: usize,
}

impl Aggregate {
    pub fn has_data(&self) -> bool {
        self.aggregated.is_some()
    }

    pub fn entry_count(&self) -> usize {
        self.per_entry.len()
    }
}

/// Per-entry rates plus one combined rate set over all `entries`, all converted with
/// the cost row of `game_id`.
///
/// The combined rates are summed outcomes over summed pulls. They are not the mean of
/// the per-entry rates: a 100-pull entry weighs a hundred times a single pull.
pub fn aggregate<'a, I>(entries: I, game_id: &str, table: &CostTable) -> Aggregate
where
    I: IntoIterator<Item = &'a PullLogEntry>,
{
    let mut per_entry = Vec::new();
    let mut totals = NormalizedPulls::default();
    let mut counts = OutcomeCounts::default();
    let mut ignored_resource_entries = 0usize;

    for entry in entries {
        let pulls = normalize_pulls(entry, game_id, table);
        let entry_counts = OutcomeCounts::from_entry(entry);

        per_entry.push(EntryRates {
            id: entry.id.clone(),
            rates: RateSet::from_counts(pulls.total_pulls, entry_counts),
        });

        totals += pulls;
        counts = counts.merge(entry_counts);
        if resource_ignored(entry, game_id, table) {
            ignored_resource_entries += 1;
        }
    }

    if ignored_resource_entries > 0 {
        log::warn!(
            "{} entries for '{}' spent resources with no cost row to convert them",
            ignored_resource_entries,
            game_id
        );
    }

    let aggregated = RateSet::from_counts(totals.total_pulls, counts);
    log::debug!(
        "Aggregated {} entries for '{}': {:.2} pulls, data={}",
        per_entry.len(),
        game_id,
        totals.total_pulls,
        aggregated.is_some()
    );

    Aggregate {
        per_entry,
        aggregated,
        totals,
        counts,
        ignored_resource_entries,
    }
}

/// Same as [`aggregate`] against the built-in cost table.
pub fn aggregate_builtin<'a, I>(entries: I, game_id: &str) -> Aggregate
where
    I: IntoIterator<Item = &'a PullLogEntry>,
{
    aggregate(entries, game_id, &CostTable::builtin())
}

/// Aggregates only the entries recorded for `game_id`.
pub fn aggregate_for_game(
    entries: &[PullLogEntry],
    game_id: &str,
    table: &CostTable,
) -> Aggregate {
    aggregate(
        entries.iter().filter(|e| e.game_id == game_id),
        game_id,
        table,
    )
}

/// One aggregate per distinct entry `game_id`, ordered by game id.
pub fn aggregate_by_game(
    entries: &[PullLogEntry],
    table: &CostTable,
) -> BTreeMap<String, Aggregate> {
    let mut groups: BTreeMap<&str, Vec<&PullLogEntry>> = BTreeMap::new();
    for entry in entries {
        groups.entry(entry.game_id.as_str()).or_default().push(entry);
    }

    groups
        .into_iter()
        .map(|(game_id, group)| (game_id.to_string(), aggregate(group, game_id, table)))
        .collect()
}

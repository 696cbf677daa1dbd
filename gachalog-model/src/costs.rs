use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Pulls granted by one multi-pull, in every supported game.
pub const MULTI_PULL_SIZE: u32 = 10;

/// Cost of one multi-pull in each game's primary resource.
pub const BUILTIN_COSTS: &[(&str, u32)] = &[
    ("fgo", 30), // saint quartz
    ("dokkan", 50), // dragon stones
    ("granblue", 3000), // crystals
    ("genshin", 1600), // primogems
    ("starrail", 1600), // stellar jade
    ("wuwa", 1600), // astrite
    ("bluearchive", 1200),
    ("arknights", 6000), // orundum
    ("priconne", 1500),
    ("umamusume", 1500),
    ("nikke", 3000),
    ("pjsk", 3000),
    ("bandori", 2500),
    ("epicseven", 1000),
];

/// Built-in multi-pull cost for `game_id`, 0 when the game is unknown.
pub fn lookup_multi_pull_cost(game_id: &str) -> u32 {
    BUILTIN_COSTS
        .iter()
        .find(|(id, _)| *id == game_id)
        .map(|&(_, cost)| cost)
        .unwrap_or(0)
}

/// Game id -> multi-pull cost. Deserializing this type directly yields exactly the rows
/// given; `from_json` merges them over the built-in rows instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CostTable {
    costs: BTreeMap<String, u32>,
}

impl CostTable {
    pub fn builtin() -> Self {
        Self {
            costs: BUILTIN_COSTS
                .iter()
                .map(|&(id, cost)| (id.to_string(), cost))
                .collect(),
        }
    }

    pub fn empty() -> Self {
        Self {
            costs: BTreeMap::new(),
        }
    }

    /// Parses a JSON object of `game id -> multi-pull cost` overrides and applies them
    /// on top of the built-in table.
    pub fn from_json(json: &str) -> Result<Self> {
        let overrides: BTreeMap<String, u32> =
            serde_json::from_str(json).context("Invalid cost table JSON")?;
        let mut table = Self::builtin();
        for (id, cost) in overrides {
            table = table.with_game(id, cost);
        }
        Ok(table)
    }

    pub fn with_game(mut self, game_id: impl Into<String>, multi_pull_cost: u32) -> Self {
        let game_id = game_id.into();
        if multi_pull_cost == 0 {
            log::warn!("Cost row for '{game_id}' is 0; resource spend will not count as pulls");
        }
        self.costs.insert(game_id, multi_pull_cost);
        self
    }

    pub fn multi_pull_cost(&self, game_id: &str) -> u32 {
        self.costs.get(game_id).copied().unwrap_or(0)
    }

    /// 0.0 when the game has no usable cost row.
    pub fn single_pull_cost(&self, game_id: &str) -> f64 {
        let cost = self.multi_pull_cost(game_id);
        if cost > 0 {
            cost as f64 / MULTI_PULL_SIZE as f64
        } else {
            0.0
        }
    }

    pub fn contains(&self, game_id: &str) -> bool {
        self.costs.contains_key(game_id)
    }

    pub fn game_ids(&self) -> impl Iterator<Item = &str> {
        self.costs.keys().map(String::as_str)
    }
}

impl Default for CostTable {
    fn default() -> Self {
        Self::builtin()
    }
}

use serde::{Deserialize, Deserializer, Serialize};

/// One logged pull session. Missing keys and explicit `null`s both read as the field's
/// zero value, so a partly filled export still parses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PullLogEntry {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub game_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub resource_amount: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub resource_kind: String,
    pub ticket_amount: Option<u32>,
    pub free_pulls: Option<u32>,
    #[serde(deserialize_with = "null_as_default")]
    pub featured_count: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub spook_count: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub side_unit_count: u32,
    pub featured_items_count: Option<u32>,
    pub sr_items_count: Option<u32>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    Featured,
    Spook,
    SideUnit,
    FeaturedItems,
    SrItems,
}

impl Outcome {
    pub const ALL: [Outcome; 5] = [
        Outcome::Featured,
        Outcome::Spook,
        Outcome::SideUnit,
        Outcome::FeaturedItems,
        Outcome::SrItems,
    ];

    /// Item counters are only tracked by some games; the unit counters always are.
    pub fn is_optional(&self) -> bool {
        matches!(self, Outcome::FeaturedItems | Outcome::SrItems)
    }

    /// `None` only for an item counter the entry does not track.
    pub fn count_from(&self, entry: &PullLogEntry) -> Option<u32> {
        match self {
            Outcome::Featured => Some(entry.featured_count),
            Outcome::Spook => Some(entry.spook_count),
            Outcome::SideUnit => Some(entry.side_unit_count),
            Outcome::FeaturedItems => entry.featured_items_count,
            Outcome::SrItems => entry.sr_items_count,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Featured => write!(f, "featured"),
            Outcome::Spook => write!(f, "spook"),
            Outcome::SideUnit => write!(f, "side unit"),
            Outcome::FeaturedItems => write!(f, "featured items"),
            Outcome::SrItems => write!(f, "SR items"),
        }
    }
}

/// Blank entry for `game_id`; tests and callers fill in the fields they care about
/// with struct update syntax.
pub fn make_test_entry(id: &str, game_id: &str) -> PullLogEntry {
    PullLogEntry {
        id: id.to_string(),
        game_id: game_id.to_string(),
        resource_kind: "gems".to_string(),
        ..PullLogEntry::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_test_entry_is_blank() {
        let entry = make_test_entry("001", "fgo");
        assert_eq!(entry.id, "001");
        assert_eq!(entry.game_id, "fgo");
        assert_eq!(entry.resource_amount, 0.0);
        assert_eq!(entry.ticket_amount, None);
        assert_eq!(entry.featured_count, 0);
    }

    #[test]
    fn test_outcome_count_from() {
        let entry = PullLogEntry {
            featured_count: 2,
            spook_count: 1,
            side_unit_count: 3,
            featured_items_count: Some(4),
            ..make_test_entry("001", "genshin")
        };
        assert_eq!(Outcome::Featured.count_from(&entry), Some(2));
        assert_eq!(Outcome::Spook.count_from(&entry), Some(1));
        assert_eq!(Outcome::SideUnit.count_from(&entry), Some(3));
        assert_eq!(Outcome::FeaturedItems.count_from(&entry), Some(4));
        assert_eq!(Outcome::SrItems.count_from(&entry), None);
    }

    #[test]
    fn test_outcome_optional_flags() {
        let optional: Vec<Outcome> = Outcome::ALL
            .into_iter()
            .filter(|o| o.is_optional())
            .collect();
        assert_eq!(optional, vec![Outcome::FeaturedItems, Outcome::SrItems]);
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(Outcome::SideUnit.to_string(), "side unit");
        assert_eq!(Outcome::SrItems.to_string(), "SR items");
    }

    #[test]
    fn test_entry_deserialize_camel_case_with_defaults() {
        let json = r#"{
            "id": "a1",
            "gameId": "fgo",
            "resourceAmount": 15.5,
            "resourceKind": "quartz",
            "ticketAmount": 2,
            "featuredCount": 1
        }"#;
        let entry: PullLogEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.game_id, "fgo");
        assert!((entry.resource_amount - 15.5).abs() < 1e-10);
        assert_eq!(entry.ticket_amount, Some(2));
        assert_eq!(entry.free_pulls, None);
        assert_eq!(entry.featured_count, 1);
        assert_eq!(entry.spook_count, 0);
        assert_eq!(entry.sr_items_count, None);
    }

    #[test]
    fn test_entry_deserialize_null_optionals() {
        let json = r#"{"id": "a2", "gameId": "nikke", "ticketAmount": null, "freePulls": 10}"#;
        let entry: PullLogEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.ticket_amount, None);
        assert_eq!(entry.free_pulls, Some(10));
        assert_eq!(entry.resource_kind, "");
    }

    #[test]
    fn test_entry_deserialize_null_counters_as_zero() {
        let json = r#"[
            {"id": "b1", "gameId": "fgo", "resourceAmount": null, "resourceKind": null,
             "featuredCount": null, "spookCount": 2, "sideUnitCount": null},
            {"id": "b2", "gameId": "fgo", "ticketAmount": 10, "featuredCount": 1}
        ]"#;
        let entries: Vec<PullLogEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].resource_amount, 0.0);
        assert_eq!(entries[0].resource_kind, "");
        assert_eq!(entries[0].featured_count, 0);
        assert_eq!(entries[0].spook_count, 2);
        assert_eq!(entries[0].side_unit_count, 0);
        assert_eq!(entries[1].featured_count, 1);
    }
}

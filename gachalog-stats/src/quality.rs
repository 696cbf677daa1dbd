//! Opt-in data-quality checks for logged entries.
//!
//! Rate computation accepts whatever the log contains; these checks let a caller flag
//! entries that look mistyped (more hits than pulls, currency for an unknown game, ...).

use anyhow::{Result, bail};
use gachalog_model::costs::CostTable;
use gachalog_model::models::{Outcome, PullLogEntry};

use crate::normalize::{normalize_pulls, resource_ignored};

#[derive(Debug, Clone, PartialEq)]
pub enum QualityIssue {
    NegativeResource(f64),
    NonFiniteResource,
    UnconvertibleResource {
        game_id: String,
    },
    OutcomeExceedsPulls {
        outcome: Outcome,
        count: u32,
        pulls: f64,
    },
}

impl std::fmt::Display for QualityIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QualityIssue::NegativeResource(amount) => {
                write!(f, "negative resource amount {amount}")
            }
            QualityIssue::NonFiniteResource => write!(f, "resource amount is not a finite number"),
            QualityIssue::UnconvertibleResource { game_id } => {
                write!(f, "no cost row for '{game_id}', resource spend is not counted")
            }
            QualityIssue::OutcomeExceedsPulls {
                outcome,
                count,
                pulls,
            } => write!(f, "{count} {outcome} recorded for only {pulls:.2} pulls"),
        }
    }
}

pub fn audit_entry(entry: &PullLogEntry, game_id: &str, table: &CostTable) -> Vec<QualityIssue> {
    let mut issues = Vec::new();

    let amount = entry.resource_amount;
    if !amount.is_finite() {
        issues.push(QualityIssue::NonFiniteResource);
    } else if amount < 0.0 {
        issues.push(QualityIssue::NegativeResource(amount));
    }

    if resource_ignored(entry, game_id, table) {
        issues.push(QualityIssue::UnconvertibleResource {
            game_id: game_id.to_string(),
        });
    }

    let pulls = normalize_pulls(entry, game_id, table).total_pulls;
    for outcome in Outcome::ALL {
        if let Some(count) = outcome.count_from(entry)
            && count > 0
            && count as f64 > pulls
        {
            issues.push(QualityIssue::OutcomeExceedsPulls {
                outcome,
                count,
                pulls,
            });
        }
    }

    issues
}

/// Fails on the first issue `audit_entry` would report.
pub fn validate_entry(entry: &PullLogEntry, game_id: &str, table: &CostTable) -> Result<()> {
    if let Some(issue) = audit_entry(entry, game_id, table).into_iter().next() {
        bail!("Entry {}: {}", entry.id, issue);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gachalog_model::models::make_test_entry;

    fn table() -> CostTable {
        CostTable::builtin()
    }

    #[test]
    fn test_clean_entry_ok() {
        let entry = PullLogEntry {
            resource_amount: 30.0,
            featured_count: 1,
            spook_count: 2,
            ..make_test_entry("001", "fgo")
        };
        assert!(audit_entry(&entry, "fgo", &table()).is_empty());
        assert!(validate_entry(&entry, "fgo", &table()).is_ok());
    }

    #[test]
    fn test_outcome_exceeds_pulls() {
        let entry = PullLogEntry {
            ticket_amount: Some(1),
            featured_count: 2,
            ..make_test_entry("001", "fgo")
        };
        let issues = audit_entry(&entry, "fgo", &table());
        assert_eq!(
            issues,
            vec![QualityIssue::OutcomeExceedsPulls {
                outcome: Outcome::Featured,
                count: 2,
                pulls: 1.0,
            }]
        );
        let err = validate_entry(&entry, "fgo", &table()).unwrap_err();
        assert!(err.to_string().contains("001"));
    }

    #[test]
    fn test_hits_without_pulls_flagged() {
        let entry = PullLogEntry {
            sr_items_count: Some(1),
            ..make_test_entry("001", "fgo")
        };
        let issues = audit_entry(&entry, "fgo", &table());
        assert_eq!(issues.len(), 1);
        assert!(matches!(
            issues[0],
            QualityIssue::OutcomeExceedsPulls {
                outcome: Outcome::SrItems,
                ..
            }
        ));
    }

    #[test]
    fn test_full_rate_is_not_an_issue() {
        let entry = PullLogEntry {
            free_pulls: Some(1),
            featured_count: 1,
            ..make_test_entry("001", "fgo")
        };
        assert!(audit_entry(&entry, "fgo", &table()).is_empty());
    }

    #[test]
    fn test_unknown_game_spend_flagged() {
        let entry = PullLogEntry {
            resource_amount: 100.0,
            ticket_amount: Some(3),
            ..make_test_entry("001", "mystery")
        };
        let issues = audit_entry(&entry, "mystery", &table());
        assert_eq!(
            issues,
            vec![QualityIssue::UnconvertibleResource {
                game_id: "mystery".to_string(),
            }]
        );
    }

    #[test]
    fn test_malformed_amounts_flagged() {
        let negative = PullLogEntry {
            resource_amount: -5.0,
            free_pulls: Some(1),
            ..make_test_entry("001", "fgo")
        };
        assert_eq!(
            audit_entry(&negative, "fgo", &table()),
            vec![QualityIssue::NegativeResource(-5.0)]
        );

        let nan = PullLogEntry {
            resource_amount: f64::NAN,
            free_pulls: Some(1),
            ..make_test_entry("002", "fgo")
        };
        assert_eq!(
            audit_entry(&nan, "fgo", &table()),
            vec![QualityIssue::NonFiniteResource]
        );
    }

    #[test]
    fn test_issue_display() {
        let issue = QualityIssue::OutcomeExceedsPulls {
            outcome: Outcome::SideUnit,
            count: 3,
            pulls: 2.5,
        };
        assert_eq!(issue.to_string(), "3 side unit recorded for only 2.50 pulls");
    }
}

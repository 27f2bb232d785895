//! End-to-end engine: amount parse → classify → match → aggregate.
//!
//! One pass over the lines, in order. Output keeps first-occurrence
//! order; repeated identical lines (a transaction echoed in a
//! running-balance column) collapse to one result.

use std::collections::HashSet;

use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::amount::AmountParser;
use crate::classify::Classifier;
use crate::config::MatchConfig;
use crate::entity::{EntityRecord, EntityTable};
use crate::line::Line;
use crate::matcher::EntityMatcher;

/// Sentinel rendered for unmatched candidates in flat output.
pub const NO_MATCH: &str = "No Match";

/// Outcome of entity matching for one deposit candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MatchOutcome {
    /// A known payer cleared the threshold.
    Matched { entity: EntityRecord, score: u8 },
    /// Deposit-like content with no known payer. Kept in the results so
    /// callers can distinguish it from non-deposit noise; hiding these
    /// rows is a display decision.
    Unmatched,
}

/// One externally visible result row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub transaction: String,
    pub outcome: MatchOutcome,
}

impl MatchResult {
    /// Matched AR name, or the `"No Match"` sentinel.
    pub fn ar_name(&self) -> &str {
        match &self.outcome {
            MatchOutcome::Matched { entity, .. } => &entity.name,
            MatchOutcome::Unmatched => NO_MATCH,
        }
    }

    /// Similarity score; 0 for unmatched rows.
    pub fn score(&self) -> u8 {
        match &self.outcome {
            MatchOutcome::Matched { score, .. } => *score,
            MatchOutcome::Unmatched => 0,
        }
    }

    pub fn is_matched(&self) -> bool {
        matches!(self.outcome, MatchOutcome::Matched { .. })
    }

    /// Entity metadata for export; all fields empty when unmatched.
    pub fn entity(&self) -> EntityRecord {
        match &self.outcome {
            MatchOutcome::Matched { entity, .. } => entity.clone(),
            MatchOutcome::Unmatched => EntityRecord::default(),
        }
    }
}

/// The full classification-and-matching engine, configured once.
pub struct Pipeline {
    config: MatchConfig,
    table: EntityTable,
    amounts: AmountParser,
    classifier: Classifier,
}

impl Pipeline {
    pub fn new(config: MatchConfig, table: EntityTable) -> Result<Self> {
        ensure!(
            config.threshold <= 100,
            "match threshold must be within 0-100, got {}",
            config.threshold
        );
        let amounts = AmountParser::new()?;
        let classifier = Classifier::new(&config);
        Ok(Self {
            config,
            table,
            amounts,
            classifier,
        })
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn table(&self) -> &EntityTable {
        &self.table
    }

    /// Run the engine over statement lines, in order.
    pub fn run(&self, lines: &[String]) -> Vec<MatchResult> {
        let matcher =
            EntityMatcher::new(&self.table, self.config.mode, self.config.threshold);

        let mut seen: HashSet<(String, String, u8)> = HashSet::new();
        let mut results = Vec::new();
        let mut candidates = 0usize;

        for raw in lines {
            let line = Line::new(raw);
            if line.is_empty() {
                continue;
            }

            let amount = self.amounts.parse(&line.raw);
            if !self.classifier.is_deposit_candidate(&line, amount) {
                continue;
            }
            candidates += 1;
            debug!(line = %line.raw, "deposit candidate");

            let outcome = match matcher.best_match(&line) {
                Some((entity, score)) => MatchOutcome::Matched {
                    entity: entity.clone(),
                    score,
                },
                None => MatchOutcome::Unmatched,
            };

            let result = MatchResult {
                transaction: line.raw.clone(),
                outcome,
            };

            let key = (
                result.transaction.clone(),
                result.ar_name().to_string(),
                result.score(),
            );
            if seen.insert(key) {
                results.push(result);
            }
        }

        info!(
            lines = lines.len(),
            candidates,
            matched = results.iter().filter(|r| r.is_matched()).count(),
            "pipeline run complete"
        );
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MatchPolicy;

    fn acme_table() -> EntityTable {
        EntityTable::new(vec![EntityRecord {
            name: "Acme Corp".to_string(),
            email: "ar@acme.example".to_string(),
            country: "US".to_string(),
            ..Default::default()
        }])
    }

    fn run(lines: &[&str]) -> Vec<MatchResult> {
        let pipeline = Pipeline::new(MatchConfig::default(), acme_table()).unwrap();
        pipeline.run(&lines.iter().map(|s| s.to_string()).collect::<Vec<_>>())
    }

    #[test]
    fn test_matched_row_carries_metadata() {
        let results = run(&["05/02 WIRE TRANSFER FROM Acme Corp $500.00"]);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].ar_name(), "Acme Corp");
        assert!(results[0].score() >= 85);
        assert_eq!(results[0].entity().email, "ar@acme.example");
    }

    #[test]
    fn test_unmatched_candidate_is_kept_with_empty_metadata() {
        let results = run(&["05/01 Remote Online Deposit $1,250.00"]);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].ar_name(), NO_MATCH);
        assert_eq!(results[0].score(), 0);
        assert_eq!(results[0].entity().email, "");
    }

    #[test]
    fn test_noise_lines_produce_no_results() {
        let results = run(&[
            "Minimum balance $1,000.00",
            "05/03 Debit Card Purchase -$45.00",
            "TRANSACTION DETAIL",
            "",
        ]);
        assert!(results.is_empty());
    }

    #[test]
    fn test_duplicate_lines_collapse_to_one_result() {
        let results = run(&[
            "ACH Credit XYZ $300.00",
            "ACH Credit XYZ $300.00",
        ]);
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_output_preserves_first_occurrence_order() {
        let results = run(&[
            "ACH Credit XYZ $300.00",
            "05/02 WIRE TRANSFER FROM Acme Corp $500.00",
            "ACH Credit XYZ $300.00",
        ]);
        let names: Vec<&str> = results.iter().map(|r| r.ar_name()).collect();
        assert_eq!(names, vec![NO_MATCH, "Acme Corp"]);
    }

    #[test]
    fn test_rerun_is_idempotent() {
        let lines: Vec<String> = [
            "05/01 Remote Online Deposit $1,250.00",
            "05/02 WIRE TRANSFER FROM Acme Corp $500.00",
            "ACH Credit XYZ $300.00",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        let pipeline = Pipeline::new(MatchConfig::default(), acme_table()).unwrap();
        assert_eq!(pipeline.run(&lines), pipeline.run(&lines));
    }

    #[test]
    fn test_invalid_threshold_is_a_configuration_error() {
        let config = MatchConfig {
            threshold: 101,
            ..MatchConfig::default()
        };
        assert!(Pipeline::new(config, acme_table()).is_err());
    }

    #[test]
    fn test_loose_policy_accepts_plain_credits() {
        let config = MatchConfig {
            policy: MatchPolicy::AnyCredit,
            ..MatchConfig::default()
        };
        let pipeline = Pipeline::new(config, acme_table()).unwrap();
        let results = pipeline.run(&["05/04 Acme Corp payment $120.00".to_string()]);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].ar_name(), "Acme Corp");
    }
}

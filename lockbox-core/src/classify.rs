//! Deposit-candidate classification.
//!
//! Priority order: no amount / debit sign rejects first, then the
//! exclusion vocabulary (balance notices and fee summaries win over any
//! inclusion signal), then the policy decides whether an inclusion hit
//! is required or any remaining credit line passes.

use crate::amount::ParsedAmount;
use crate::config::{MatchConfig, MatchPolicy};
use crate::line::{Line, normalize};

pub struct Classifier {
    inclusion: Vec<String>,
    exclusion: Vec<String>,
    policy: MatchPolicy,
}

impl Classifier {
    pub fn new(config: &MatchConfig) -> Self {
        Self {
            inclusion: config.inclusion.iter().map(|t| normalize(t)).collect(),
            exclusion: config.exclusion.iter().map(|t| normalize(t)).collect(),
            policy: config.policy,
        }
    }

    /// Decide whether `line` is a deposit candidate.
    pub fn is_deposit_candidate(&self, line: &Line, amount: Option<ParsedAmount>) -> bool {
        let Some(amount) = amount else {
            return false;
        };
        if !amount.is_credit() {
            return false;
        }

        if self.exclusion.iter().any(|t| matches_term(&line.norm, t)) {
            return false;
        }

        match self.policy {
            MatchPolicy::RequireKeyword => {
                self.inclusion.iter().any(|t| matches_term(&line.norm, t))
            }
            MatchPolicy::AnyCredit => true,
        }
    }
}

/// Multi-word terms match as substrings of the normalized text;
/// single-word terms match whole tokens only, so "deposit" does not
/// fire on "depository".
fn matches_term(norm: &str, term: &str) -> bool {
    if term.is_empty() {
        return false;
    }
    if term.contains(' ') {
        norm.contains(term)
    } else {
        norm.split_whitespace().any(|w| w == term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amount::{AmountParser, Sign};

    fn classify(policy: MatchPolicy, raw: &str) -> bool {
        let config = MatchConfig {
            policy,
            ..MatchConfig::default()
        };
        let classifier = Classifier::new(&config);
        let parser = AmountParser::new().unwrap();
        let line = Line::new(raw);
        classifier.is_deposit_candidate(&line, parser.parse(&line.raw))
    }

    #[test]
    fn test_inclusion_phrase_with_credit_passes() {
        assert!(classify(
            MatchPolicy::RequireKeyword,
            "05/01 Remote Online Deposit $1,250.00"
        ));
    }

    #[test]
    fn test_debit_rejected_before_vocabulary() {
        assert!(!classify(
            MatchPolicy::RequireKeyword,
            "Deposit reversal -$45.00"
        ));
    }

    #[test]
    fn test_missing_amount_rejected() {
        assert!(!classify(MatchPolicy::AnyCredit, "Remote Online Deposit"));
    }

    #[test]
    fn test_exclusion_beats_inclusion() {
        // "deposit" token present, but the balance notice wins.
        assert!(!classify(
            MatchPolicy::RequireKeyword,
            "Minimum balance to avoid deposit fee $1,000.00"
        ));
        assert!(!classify(
            MatchPolicy::AnyCredit,
            "Minimum balance $1,000.00"
        ));
    }

    #[test]
    fn test_require_keyword_rejects_plain_credit() {
        assert!(!classify(
            MatchPolicy::RequireKeyword,
            "05/04 ADJUSTMENT $120.00"
        ));
    }

    #[test]
    fn test_any_credit_accepts_plain_credit() {
        assert!(classify(MatchPolicy::AnyCredit, "05/04 ADJUSTMENT $120.00"));
    }

    #[test]
    fn test_single_word_term_matches_whole_token_only() {
        let config = MatchConfig::default();
        let classifier = Classifier::new(&config);
        let parser = AmountParser::new().unwrap();

        let line = Line::new("Depository services rendered $10.00");
        let amount = parser.parse(&line.raw);
        assert_eq!(amount.unwrap().sign, Sign::Credit);
        assert!(!classifier.is_deposit_candidate(&line, amount));
    }

    #[test]
    fn test_ach_credit_phrase_passes() {
        assert!(classify(MatchPolicy::RequireKeyword, "ACH Credit XYZ $300.00"));
    }
}

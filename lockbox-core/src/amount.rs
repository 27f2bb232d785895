//! Currency amount extraction from statement text.
//!
//! Recognized form: currency symbol plus two-decimal magnitude, with
//! optional grouping and debit markers:
//!   $1,250.00      credit
//!   -$45.00        debit (minus before the symbol)
//!   ($1,000.00)    debit (parenthesized)

use anyhow::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Direction of a parsed amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sign {
    #[serde(rename = "credit")]
    Credit,
    #[serde(rename = "debit")]
    Debit,
}

/// A monetary amount found in a line. Lines without one never become
/// deposit candidates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedAmount {
    pub magnitude: f64,
    pub sign: Sign,
}

impl ParsedAmount {
    pub fn is_credit(&self) -> bool {
        self.sign == Sign::Credit
    }
}

/// Compiled-once amount pattern, built at pipeline construction.
pub struct AmountParser {
    re: Regex,
}

impl AmountParser {
    pub fn new() -> Result<Self> {
        // Commas are stripped before matching, so grouping never appears
        // in the pattern itself.
        let re = Regex::new(concat!(
            r"(?P<open>\()?",
            r"\s*(?P<neg>-)?\s*",
            r"\$(?P<amt>\d+\.\d{2})",
            r"(?P<close>\))?"
        ))?;
        Ok(Self { re })
    }

    /// Extract the first amount in `raw`, or `None` if the line carries
    /// no recognizable amount.
    pub fn parse(&self, raw: &str) -> Option<ParsedAmount> {
        let flat = raw.replace(',', "");
        let caps = self.re.captures(&flat)?;

        let magnitude: f64 = caps["amt"].parse().ok()?;
        let parenthesized = caps.name("open").is_some() && caps.name("close").is_some();
        let sign = if caps.name("neg").is_some() || parenthesized {
            Sign::Debit
        } else {
            Sign::Credit
        };

        Some(ParsedAmount { magnitude, sign })
    }
}

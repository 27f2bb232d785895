//! Run configuration for the matching engine: column mapping,
//! vocabularies, classifier policy, similarity mode, and threshold.
//! Built once per run and never mutated afterwards.

use serde::{Deserialize, Serialize};

/// Column-name mapping for the AR reference table. Only `name` is
/// required to exist in the source table; every other column is
/// optional and yields empty metadata when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMap {
    pub name: String,
    pub email: String,
    pub country: String,
    pub state: String,
    pub description: String,
    pub frequency: String,
    pub materiality: String,
    pub legal_name: String,
    pub location: String,
    pub industry: String,
    pub website: String,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            name: "AR Name".to_string(),
            email: "Email".to_string(),
            country: "Country".to_string(),
            state: "State".to_string(),
            description: "Description".to_string(),
            frequency: "Expected Frequency".to_string(),
            materiality: "Materiality".to_string(),
            legal_name: "Legal Name".to_string(),
            location: "Location".to_string(),
            industry: "Industry".to_string(),
            website: "Website".to_string(),
        }
    }
}

/// Which credit lines qualify as deposit candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPolicy {
    /// A line must hit the inclusion vocabulary to qualify.
    #[serde(rename = "require-keyword")]
    RequireKeyword,
    /// Any non-excluded credit line qualifies.
    #[serde(rename = "any-credit")]
    AnyCredit,
}

/// Similarity scoring mode for entity matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimilarityMode {
    /// Best contiguous-fragment overlap anywhere in the line.
    #[serde(rename = "partial")]
    Partial,
    /// Shared words regardless of order or duplication.
    #[serde(rename = "token-set")]
    TokenSet,
}

/// Missing fields fall back to defaults, so a config file may override
/// only the knobs it cares about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub columns: ColumnMap,
    /// Phrases and keywords associated with incoming payments.
    pub inclusion: Vec<String>,
    /// Terms marking informational lines (balance notices, fee
    /// summaries) that must never be treated as deposits.
    pub exclusion: Vec<String>,
    pub policy: MatchPolicy,
    pub mode: SimilarityMode,
    /// Minimum similarity score (0-100) for an entity match.
    pub threshold: u8,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            columns: ColumnMap::default(),
            inclusion: default_inclusion(),
            exclusion: default_exclusion(),
            policy: MatchPolicy::RequireKeyword,
            mode: SimilarityMode::Partial,
            threshold: 85,
        }
    }
}

fn default_inclusion() -> Vec<String> {
    [
        "atm deposit",
        "remote online deposit",
        "online deposit",
        "mobile deposit",
        "remote deposit",
        "wire transfer",
        "incoming wire",
        "wire credit",
        "ach credit",
        "ach payment",
        "direct deposit",
        "merchant settlement",
        "settlement",
        "stripe",
        "square",
        "paypal",
        "deposit",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_exclusion() -> Vec<String> {
    [
        "minimum balance",
        "minimum daily balance",
        "ending balance",
        "beginning balance",
        "average balance",
        "average daily balance",
        "lowest daily balance",
        "service fee",
        "service charge",
        "monthly service",
        "card summary",
        "total fees",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

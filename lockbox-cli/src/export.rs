//! Flat export of match results as CSV or JSON.

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

use lockbox_core::MatchResult;

/// One exported row; field names become CSV headers / JSON keys.
#[derive(Debug, Clone, Serialize)]
pub struct FlatRow {
    #[serde(rename = "Transaction")]
    pub transaction: String,
    #[serde(rename = "Matched AR")]
    pub matched_ar: String,
    #[serde(rename = "Score")]
    pub score: u8,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Expected Frequency")]
    pub frequency: String,
    #[serde(rename = "Materiality")]
    pub materiality: String,
    #[serde(rename = "Legal Name")]
    pub legal_name: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Industry")]
    pub industry: String,
    #[serde(rename = "Website")]
    pub website: String,
}

impl From<&MatchResult> for FlatRow {
    fn from(result: &MatchResult) -> Self {
        let entity = result.entity();
        Self {
            transaction: result.transaction.clone(),
            matched_ar: result.ar_name().to_string(),
            score: result.score(),
            email: entity.email,
            country: entity.country,
            state: entity.state,
            description: entity.description,
            frequency: entity.frequency,
            materiality: entity.materiality,
            legal_name: entity.legal_name,
            location: entity.location,
            industry: entity.industry,
            website: entity.website,
        }
    }
}

pub fn flatten(results: &[MatchResult]) -> Vec<FlatRow> {
    results.iter().map(FlatRow::from).collect()
}

pub fn write_csv<W: Write>(results: &[MatchResult], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in flatten(results) {
        wtr.serialize(row).context("writing result row")?;
    }
    wtr.flush().context("flushing CSV output")?;
    Ok(())
}

pub fn write_json<W: Write>(results: &[MatchResult], writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, &flatten(results)).context("writing JSON output")
}

//! AR entity records and the run-scoped reference table.
//!
//! The table preserves source-row order (tie-breaks depend on it) and
//! carries a name index built once per run, so lookups after matching
//! never rescan the rows.

use std::collections::HashMap;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::config::ColumnMap;
use crate::line::normalize;

/// One known payer from the AR reference table. Optional metadata
/// columns that are absent or blank in the source stay empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRecord {
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

/// Immutable, ordered table of AR entities.
#[derive(Debug, Clone, Default)]
pub struct EntityTable {
    records: Vec<EntityRecord>,
    /// Normalized names, parallel to `records`.
    norms: Vec<String>,
    /// First occurrence of each name is authoritative.
    by_name: HashMap<String, usize>,
}

impl EntityTable {
    /// Build a table from records, keeping source order. Records with a
    /// blank name are dropped; duplicate names keep the first row.
    pub fn new(records: Vec<EntityRecord>) -> Self {
        let mut table = Self::default();
        for record in records {
            if record.name.trim().is_empty() {
                continue;
            }
            let idx = table.records.len();
            table.norms.push(normalize(&record.name));
            table
                .by_name
                .entry(record.name.clone())
                .or_insert(idx);
            table.records.push(record);
        }
        table
    }

    /// Build a table from a generic header row + data rows using the
    /// configured column mapping. Header comparison is trimmed and
    /// case-insensitive. A missing name column is a configuration
    /// error; missing optional columns yield empty metadata.
    pub fn from_rows(
        headers: &[String],
        rows: &[Vec<String>],
        columns: &ColumnMap,
    ) -> Result<Self> {
        let find = |wanted: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(wanted.trim()))
        };

        let Some(name_col) = find(&columns.name) else {
            bail!(
                "entity table has no '{}' column (found: {})",
                columns.name,
                headers.join(", ")
            );
        };

        let email_col = find(&columns.email);
        let country_col = find(&columns.country);
        let state_col = find(&columns.state);
        let description_col = find(&columns.description);
        let frequency_col = find(&columns.frequency);
        let materiality_col = find(&columns.materiality);
        let legal_name_col = find(&columns.legal_name);
        let location_col = find(&columns.location);
        let industry_col = find(&columns.industry);
        let website_col = find(&columns.website);

        let field = |row: &Vec<String>, col: Option<usize>| {
            col.and_then(|c| row.get(c))
                .map(|s| s.trim().to_string())
                .unwrap_or_default()
        };

        let records = rows
            .iter()
            .map(|row| EntityRecord {
                name: field(row, Some(name_col)),
                email: field(row, email_col),
                country: field(row, country_col),
                state: field(row, state_col),
                description: field(row, description_col),
                frequency: field(row, frequency_col),
                materiality: field(row, materiality_col),
                legal_name: field(row, legal_name_col),
                location: field(row, location_col),
                industry: field(row, industry_col),
                website: field(row, website_col),
            })
            .collect();

        Ok(Self::new(records))
    }

    pub fn records(&self) -> &[EntityRecord] {
        &self.records
    }

    /// Normalized names in table order, parallel to `records()`.
    pub fn norms(&self) -> &[String] {
        &self.norms
    }

    /// Indexed lookup by exact name (first occurrence).
    pub fn get(&self, name: &str) -> Option<&EntityRecord> {
        self.by_name.get(name).map(|&idx| &self.records[idx])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> EntityRecord {
        EntityRecord {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_blank_names_are_dropped() {
        let table = EntityTable::new(vec![named("Acme Corp"), named("  "), named("Globex")]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[1].name, "Globex");
    }

    #[test]
    fn test_duplicate_name_first_occurrence_wins() {
        let first = EntityRecord {
            name: "Acme Corp".to_string(),
            email: "ar@acme.example".to_string(),
            ..Default::default()
        };
        let second = EntityRecord {
            name: "Acme Corp".to_string(),
            email: "other@acme.example".to_string(),
            ..Default::default()
        };
        let table = EntityTable::new(vec![first, second]);
        assert_eq!(table.get("Acme Corp").unwrap().email, "ar@acme.example");
    }

    #[test]
    fn test_from_rows_maps_columns_case_insensitively() {
        let headers = vec!["email".to_string(), "AR NAME".to_string()];
        let rows = vec![vec!["ar@acme.example".to_string(), "Acme Corp".to_string()]];
        let table = EntityTable::from_rows(&headers, &rows, &ColumnMap::default()).unwrap();
        assert_eq!(table.len(), 1);
        let rec = &table.records()[0];
        assert_eq!(rec.name, "Acme Corp");
        assert_eq!(rec.email, "ar@acme.example");
        assert_eq!(rec.country, "");
    }

    #[test]
    fn test_from_rows_missing_name_column_is_an_error() {
        let headers = vec!["Email".to_string()];
        let rows = vec![vec!["ar@acme.example".to_string()]];
        let err = EntityTable::from_rows(&headers, &rows, &ColumnMap::default()).unwrap_err();
        assert!(err.to_string().contains("AR Name"));
    }

    #[test]
    fn test_from_rows_short_row_yields_empty_fields() {
        let headers = vec!["AR Name".to_string(), "Email".to_string()];
        let rows = vec![vec!["Acme Corp".to_string()]];
        let table = EntityTable::from_rows(&headers, &rows, &ColumnMap::default()).unwrap();
        assert_eq!(table.records()[0].email, "");
    }

    #[test]
    fn test_norms_parallel_records() {
        let table = EntityTable::new(vec![named("Acme, Corp.")]);
        assert_eq!(table.norms()[0], "acme corp");
    }
}

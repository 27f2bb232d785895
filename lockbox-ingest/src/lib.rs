//! lockbox-ingest: thin I/O adapters feeding the matching engine.
//! Extracted statement text becomes ordered lines; AR CSV exports
//! become an EntityTable. No decision logic lives here.

pub mod entities;
pub mod statement;

pub use entities::{entity_table_from_reader, load_entity_csv};
pub use statement::{extract_lines, read_statement_text};

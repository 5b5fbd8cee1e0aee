//! Command handlers for the `schemagram` CLI

pub mod config;
pub mod diagram;
pub mod inspect;

use schemagram::schema::Schema;
use schemagram::social::social_schema;
use std::path::Path;

/// Load the schema to operate on: a TOML file when given, otherwise the
/// built-in social network schema.
pub fn load_schema(schema_file: Option<&Path>) -> Result<Schema, String> {
    match schema_file {
        Some(path) => Schema::from_toml_file(path).map_err(|e| format!("✗ {e}")),
        None => Ok(social_schema()),
    }
}

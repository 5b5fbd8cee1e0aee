//! Inspect command handler
//!
//! Prints a human-readable schema summary and validates that every
//! foreign key resolves.

use logger::{error, info};
use std::path::Path;

/// Run the inspect command.
///
/// # Arguments
/// * `schema_file` - Optional TOML schema file (defaults to the built-in schema)
pub fn run(schema_file: Option<&Path>) {
    let schema = match super::load_schema(schema_file) {
        Ok(schema) => schema,
        Err(err) => {
            error!("Failed to load schema: {err}");
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    print!("{schema}");

    match schema.validate_relations() {
        Ok(()) => {
            let relation_count = schema.relations().len();
            println!(
                "\n✓ All {relation_count} relations resolve to primary-key or unique columns"
            );
            info!("Schema '{}' validated", schema.name);
        }
        Err(errors) => {
            println!();
            for error in &errors {
                eprintln!("✗ {error}");
            }
            error!(
                "Schema '{}' has {} unresolved relations",
                schema.name,
                errors.len()
            );
            std::process::exit(1);
        }
    }
}

//! Diagram command handler
//!
//! Renders a schema as an entity-relationship diagram: PNG via the
//! external Graphviz backend, or DOT/Mermaid text written directly.

use logger::{error, info};
use schemagram::config::Config;
use schemagram::diagram::{DiagramFormat, DotGenerator, GraphvizRenderer, MermaidGenerator};
use schemagram::schema::Schema;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default output file stem
const DEFAULT_FILE_STEM: &str = "diagram";

/// Run the diagram command.
///
/// Rendering failures are reported to the user and terminate the process
/// with a failure status; they are never swallowed.
///
/// # Arguments
/// * `schema_file` - Optional TOML schema file (defaults to the built-in schema)
/// * `output_file` - Optional output path
/// * `format_str` - Diagram format (png, dot, mermaid)
/// * `config` - Configuration containing the default diagrams directory
pub fn run(
    schema_file: Option<&Path>,
    output_file: Option<&Path>,
    format_str: &str,
    config: &Config,
) {
    match generate_diagram(schema_file, output_file, format_str, config) {
        Ok(output_path) => {
            println!("✓ Diagram generated: {}", output_path.display());
            info!("Diagram exported to: {}", output_path.display());
        }
        Err(err) => {
            error!("Diagram generation failed: {err}");
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}

/// Generate the diagram and return the output path on success
fn generate_diagram(
    schema_file: Option<&Path>,
    output_file: Option<&Path>,
    format_str: &str,
    config: &Config,
) -> Result<PathBuf, String> {
    // Parse the format
    let format = DiagramFormat::from_str(format_str)
        .map_err(|e| format!("✗ {e}. Use: png, dot, or mermaid"))?;

    // Load and check the schema before rendering anything
    let schema = super::load_schema(schema_file)?;
    schema.validate_relations().map_err(|errors| {
        let mut message = String::from("✗ Schema has unresolved relations:");
        for error in errors {
            message.push_str("\n  ");
            message.push_str(&error);
        }
        message
    })?;

    info!(
        "Schema '{}' loaded: {} entities, {} relations",
        schema.name,
        schema.entity_count(),
        schema.relations().len()
    );

    // Determine output path
    let output_path = match output_file {
        Some(output) => output.to_path_buf(),
        None => {
            let diagrams_dir = PathBuf::from(&config.paths.diagrams_dir);
            fs::create_dir_all(&diagrams_dir).map_err(|e| {
                format!(
                    "✗ Failed to create diagrams directory {}: {e}",
                    diagrams_dir.display()
                )
            })?;
            diagrams_dir.join(format!("{DEFAULT_FILE_STEM}.{}", format.extension()))
        }
    };

    write_diagram(&schema, format, &output_path)?;
    Ok(output_path)
}

/// Write the diagram to a file in the requested format
fn write_diagram(schema: &Schema, format: DiagramFormat, output_path: &Path) -> Result<(), String> {
    match format {
        DiagramFormat::Png => {
            let renderer = GraphvizRenderer::new();
            renderer
                .render(schema, output_path)
                .map_err(|e| format!("✗ {e}"))?;
        }
        DiagramFormat::Dot => {
            let dot_source = DotGenerator::generate(schema);
            fs::write(output_path, dot_source).map_err(|e| {
                format!("✗ Failed to write {}: {e}", output_path.display())
            })?;
        }
        DiagramFormat::Mermaid => {
            let mermaid_source = MermaidGenerator::generate_markdown(schema);
            fs::write(output_path, mermaid_source).map_err(|e| {
                format!("✗ Failed to write {}: {e}", output_path.display())
            })?;
        }
    }
    Ok(())
}

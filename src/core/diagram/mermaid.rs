//! Mermaid diagram generator for schema graphs
//!
//! Generates Mermaid `erDiagram` syntax that can be embedded in Markdown
//! files and rendered by GitHub, GitLab, and other Markdown viewers.

use crate::core::schema::Schema;
use std::fmt::Write;

/// Generator for Mermaid `erDiagram` syntax
pub struct MermaidGenerator;

impl MermaidGenerator {
    /// Generate a Mermaid entity-relationship diagram from a schema
    ///
    /// Each entity block lists its columns with PK/FK/UK markers; each
    /// foreign key becomes a many-to-one relationship edge labelled with
    /// the referencing column.
    #[must_use]
    pub fn generate(schema: &Schema) -> String {
        let mut output = String::from("erDiagram\n");

        // Entity blocks with attributes
        for entity in schema.entities() {
            let entity_id = Self::sanitize_id(&entity.name);
            let _ = writeln!(output, "    {entity_id} {{");
            for column in entity.columns() {
                let mut keys = Vec::new();
                if column.primary_key {
                    keys.push("PK");
                }
                if column.is_foreign_key() {
                    keys.push("FK");
                }
                if column.unique {
                    keys.push("UK");
                }
                let key_str = if keys.is_empty() {
                    String::new()
                } else {
                    format!(" {}", keys.join(", "))
                };
                let _ = writeln!(
                    output,
                    "        {} {}{key_str}",
                    Self::sanitize_id(&column.column_type.to_string()),
                    Self::sanitize_id(&column.name)
                );
            }
            output.push_str("    }\n");
        }

        output.push('\n');

        // Relationship edges (many referencing rows to exactly one target)
        for relation in schema.relations() {
            let _ = writeln!(
                output,
                "    {} }}o--|| {} : \"{}\"",
                Self::sanitize_id(&relation.from_entity),
                Self::sanitize_id(&relation.to_entity),
                relation.from_column
            );
        }

        output
    }

    /// Generate the diagram wrapped in a Markdown fence
    #[must_use]
    pub fn generate_markdown(schema: &Schema) -> String {
        format!("```mermaid\n{}```\n", Self::generate(schema))
    }

    /// Sanitize a name for use as a Mermaid identifier
    fn sanitize_id(name: &str) -> String {
        name.chars()
            .map(|c| if c.is_alphanumeric() { c } else { '_' })
            .collect()
    }
}

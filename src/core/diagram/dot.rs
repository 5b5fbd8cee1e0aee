//! Graphviz DOT generator for schema graphs
//!
//! Produces DOT source with one record-shaped node per entity and one edge
//! per foreign-key relation. Layout is left to the Graphviz backend.

use crate::core::schema::{ColumnType, Schema};
use std::fmt::Write;

/// Generator for Graphviz DOT syntax
pub struct DotGenerator;

impl DotGenerator {
    /// Generate DOT source from a schema
    ///
    /// An empty schema yields a valid empty digraph.
    #[must_use]
    pub fn generate(schema: &Schema) -> String {
        let mut output = String::new();
        let _ = writeln!(output, "digraph {} {{", Self::sanitize_id(&schema.name));
        output.push_str("    rankdir=LR;\n");
        output.push_str("    node [shape=record, fontname=\"Helvetica\"];\n");

        // Entity nodes with their column lists
        for entity in schema.entities() {
            let mut label = format!("{{{}", Self::escape_label(&entity.name));
            for column in entity.columns() {
                let mut markers = Vec::new();
                if column.primary_key {
                    markers.push("pk");
                }
                if column.is_foreign_key() {
                    markers.push("fk");
                }
                if column.unique {
                    markers.push("uniq");
                }
                if column.nullable {
                    markers.push("null");
                }
                let suffix = if markers.is_empty() {
                    String::new()
                } else {
                    format!(" [{}]", markers.join(","))
                };
                let _ = write!(
                    label,
                    "|{}: {}{}\\l",
                    Self::escape_label(&column.name),
                    Self::escape_label(&Self::type_text(&column.column_type)),
                    suffix
                );
            }
            label.push('}');

            let _ = writeln!(
                output,
                "    {} [label=\"{label}\"];",
                Self::sanitize_id(&entity.name)
            );
        }

        // Foreign-key edges
        let relations = schema.relations();
        if !relations.is_empty() {
            output.push('\n');
        }
        for relation in relations {
            let _ = writeln!(
                output,
                "    {} -> {} [label=\"{}\"];",
                Self::sanitize_id(&relation.from_entity),
                Self::sanitize_id(&relation.to_entity),
                Self::escape_label(&relation.from_column)
            );
        }

        output.push_str("}\n");
        output
    }

    /// Column type as shown in the record label
    ///
    /// Enum columns list their closed value set alongside the enum name so
    /// the diagram carries the full constraint.
    fn type_text(column_type: &ColumnType) -> String {
        match column_type {
            ColumnType::Enum { name, values } => {
                format!("{name} {{{}}}", values.join(", "))
            }
            other => other.to_string(),
        }
    }

    /// Sanitize a name for use as a DOT node ID
    fn sanitize_id(name: &str) -> String {
        name.chars()
            .map(|c| if c.is_alphanumeric() { c } else { '_' })
            .collect()
    }

    /// Escape characters with meaning inside DOT record labels
    fn escape_label(text: &str) -> String {
        let mut escaped = String::with_capacity(text.len());
        for c in text.chars() {
            match c {
                '{' | '}' | '|' | '<' | '>' | '"' | '\\' => {
                    escaped.push('\\');
                    escaped.push(c);
                }
                _ => escaped.push(c),
            }
        }
        escaped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::{Column, Entity, Schema};
    use crate::core::social::social_schema;

    #[test]
    fn test_dot_generation() {
        let dot = DotGenerator::generate(&social_schema());

        assert!(dot.starts_with("digraph social {"));
        assert!(dot.contains("shape=record"));
        assert!(dot.contains("user [label=\"{user|id: integer [pk]\\l"));
        assert!(dot.contains("post -> user [label=\"user_id\"];"));
        assert!(dot.contains("follower -> user [label=\"user_from_id\"];"));
        assert!(dot.ends_with("}\n"));
    }

    #[test]
    fn test_empty_schema_is_valid_digraph() {
        let dot = DotGenerator::generate(&Schema::new("empty"));

        assert!(dot.starts_with("digraph empty {"));
        assert!(dot.ends_with("}\n"));
        assert!(!dot.contains("->"));
    }

    #[test]
    fn test_marker_rendering() {
        let mut schema = Schema::new("test");
        schema.add_entity(
            Entity::new("user")
                .with_column(Column::integer("id").primary_key())
                .with_column(Column::text("email").unique())
                .with_column(Column::text("bio").nullable()),
        );

        let dot = DotGenerator::generate(&schema);
        assert!(dot.contains("id: integer [pk]"));
        assert!(dot.contains("email: text [uniq]"));
        assert!(dot.contains("bio: text [null]"));
    }

    #[test]
    fn test_enum_values_listed_in_label() {
        let dot = DotGenerator::generate(&social_schema());

        // Braces around the value set are escaped for the record shape
        assert!(dot.contains("type: media_type \\{image, video\\}"));
        assert!(dot.contains("image"));
        assert!(dot.contains("video"));
    }

    #[test]
    fn test_sanitize_id() {
        assert_eq!(DotGenerator::sanitize_id("my schema"), "my_schema");
        assert_eq!(DotGenerator::sanitize_id("media-type"), "media_type");
    }

    #[test]
    fn test_escape_label() {
        assert_eq!(DotGenerator::escape_label("a|b"), "a\\|b");
        assert_eq!(DotGenerator::escape_label("{x}"), "\\{x\\}");
    }
}

//! Declarative schema model
//!
//! A [`Schema`] is an explicit value: it is constructed once and passed by
//! reference to consumers (diagram generators, the row store). There is no
//! global registry.

pub mod column;
pub mod entity;
pub mod relation;

pub use column::{Column, ColumnRef, ColumnType, DefaultValue};
pub use entity::Entity;
pub use relation::Relation;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// A named set of entities and the foreign-key edges between them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Schema name (used as the diagram title)
    pub name: String,

    /// Entities in declaration order
    entities: Vec<Entity>,
}

impl Schema {
    /// Create a new empty schema
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            entities: Vec::new(),
        }
    }

    /// Add an entity to the schema
    ///
    /// # Returns
    /// `true` if the entity was added, `false` if an entity with that name already exists
    pub fn add_entity(&mut self, entity: Entity) -> bool {
        if self.entities.iter().any(|e| e.name == entity.name) {
            return false;
        }
        self.entities.push(entity);
        true
    }

    /// Get an entity by name
    #[must_use]
    pub fn get_entity(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.name == name)
    }

    /// All entities, in declaration order
    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Number of entities
    #[must_use]
    pub const fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// All foreign-key edges, derived from column declarations
    ///
    /// Edges are ordered by entity declaration order, then column order.
    #[must_use]
    pub fn relations(&self) -> Vec<Relation> {
        let mut relations = Vec::new();
        for entity in &self.entities {
            for column in entity.columns() {
                if let Some(target) = &column.references {
                    relations.push(Relation::new(
                        &entity.name,
                        &column.name,
                        &target.entity,
                        &target.column,
                    ));
                }
            }
        }
        relations
    }

    /// Validate that every foreign key resolves to an existing entity column
    ///
    /// A valid target column must exist and be either a primary key or unique,
    /// and its type must match the referencing column's type.
    ///
    /// # Errors
    /// Returns `Err` with one message per unresolved or ill-typed reference
    pub fn validate_relations(&self) -> Result<(), Vec<String>> {
        let mut invalid = Vec::new();

        for entity in &self.entities {
            for column in entity.columns() {
                let Some(target) = &column.references else {
                    continue;
                };

                let Some(target_entity) = self.get_entity(&target.entity) else {
                    invalid.push(format!(
                        "Entity '{}': foreign key '{}' references unknown entity '{}'",
                        entity.name, column.name, target.entity
                    ));
                    continue;
                };

                let Some(target_column) = target_entity.column(&target.column) else {
                    invalid.push(format!(
                        "Entity '{}': foreign key '{}' references unknown column '{}'",
                        entity.name, column.name, target
                    ));
                    continue;
                };

                if !target_column.primary_key && !target_column.unique {
                    invalid.push(format!(
                        "Entity '{}': foreign key '{}' references '{}' which is neither a primary key nor unique",
                        entity.name, column.name, target
                    ));
                }

                if target_column.column_type != column.column_type {
                    invalid.push(format!(
                        "Entity '{}': foreign key '{}' ({}) does not match the type of '{}' ({})",
                        entity.name,
                        column.name,
                        column.column_type,
                        target,
                        target_column.column_type
                    ));
                }
            }
        }

        if invalid.is_empty() {
            Ok(())
        } else {
            Err(invalid)
        }
    }

    /// Parse a schema from a TOML string
    ///
    /// # Errors
    /// Returns an error if the TOML cannot be parsed or doesn't match the schema shape
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Load a schema from a TOML file
    ///
    /// # Errors
    /// Returns an error message if the file cannot be read or parsed
    pub fn from_toml_file(path: &Path) -> Result<Self, String> {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read schema file {}: {e}", path.display()))?;
        Self::from_toml(&content)
            .map_err(|e| format!("Failed to parse schema file {}: {e}", path.display()))
    }

    /// Serialize the schema to a TOML string
    ///
    /// # Errors
    /// Returns an error if serialization fails
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let relations = self.relations();
        writeln!(
            f,
            "Schema '{}' ({} entities, {} relations):",
            self.name,
            self.entities.len(),
            relations.len()
        )?;
        writeln!(f)?;

        for entity in &self.entities {
            writeln!(f, "  {}", entity.name)?;
            for column in entity.columns() {
                let mut markers = Vec::new();
                if column.primary_key {
                    markers.push("pk");
                }
                if column.unique {
                    markers.push("unique");
                }
                if column.is_foreign_key() {
                    markers.push("fk");
                }
                if column.nullable {
                    markers.push("null");
                }
                let suffix = if markers.is_empty() {
                    String::new()
                } else {
                    format!(" [{}]", markers.join(", "))
                };
                writeln!(f, "    {}: {}{suffix}", column.name, column.column_type)?;
            }
        }

        if !relations.is_empty() {
            writeln!(f)?;
            for relation in relations {
                writeln!(f, "  {relation}")?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_entity_schema() -> Schema {
        let mut schema = Schema::new("blog");
        schema.add_entity(
            Entity::new("user")
                .with_column(Column::integer("id").primary_key())
                .with_column(Column::text("username").unique()),
        );
        schema.add_entity(
            Entity::new("post")
                .with_column(Column::integer("id").primary_key())
                .with_column(Column::integer("user_id").references("user", "id")),
        );
        schema
    }

    #[test]
    fn test_schema_creation() {
        let schema = Schema::new("empty");
        assert_eq!(schema.entity_count(), 0);
        assert!(schema.relations().is_empty());
    }

    #[test]
    fn test_add_duplicate_entity() {
        let mut schema = Schema::new("test");
        assert!(schema.add_entity(Entity::new("user")));
        assert!(!schema.add_entity(Entity::new("user")));
        assert_eq!(schema.entity_count(), 1);
    }

    #[test]
    fn test_relations_derived_from_columns() {
        let schema = two_entity_schema();
        let relations = schema.relations();
        assert_eq!(relations.len(), 1);
        assert_eq!(relations[0], Relation::new("post", "user_id", "user", "id"));
    }

    #[test]
    fn test_validate_relations_success() {
        let schema = two_entity_schema();
        assert!(schema.validate_relations().is_ok());
    }

    #[test]
    fn test_validate_relations_unknown_entity() {
        let mut schema = Schema::new("test");
        schema.add_entity(
            Entity::new("post")
                .with_column(Column::integer("id").primary_key())
                .with_column(Column::integer("user_id").references("user", "id")),
        );

        let errors = schema.validate_relations().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("unknown entity 'user'"));
    }

    #[test]
    fn test_validate_relations_unknown_column() {
        let mut schema = Schema::new("test");
        schema.add_entity(Entity::new("user").with_column(Column::integer("id").primary_key()));
        schema.add_entity(
            Entity::new("post")
                .with_column(Column::integer("user_id").references("user", "uuid")),
        );

        let errors = schema.validate_relations().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("unknown column"));
    }

    #[test]
    fn test_validate_relations_non_unique_target() {
        let mut schema = Schema::new("test");
        schema.add_entity(Entity::new("user").with_column(Column::text("firstname")));
        schema.add_entity(
            Entity::new("post")
                .with_column(Column::text("author").references("user", "firstname")),
        );

        let errors = schema.validate_relations().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("neither a primary key nor unique"));
    }

    #[test]
    fn test_validate_relations_type_mismatch() {
        let mut schema = Schema::new("test");
        schema.add_entity(Entity::new("user").with_column(Column::integer("id").primary_key()));
        schema.add_entity(
            Entity::new("post").with_column(Column::text("user_id").references("user", "id")),
        );

        let errors = schema.validate_relations().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("does not match the type"));
    }

    #[test]
    fn test_toml_round_trip() {
        let schema = two_entity_schema();
        let toml_str = schema.to_toml().expect("serialize");
        let reloaded = Schema::from_toml(&toml_str).expect("parse");

        assert_eq!(schema, reloaded);
        assert_eq!(reloaded.relations().len(), 1);
    }

    #[test]
    fn test_display_lists_entities_and_relations() {
        let schema = two_entity_schema();
        let rendered = format!("{schema}");

        assert!(rendered.contains("Schema 'blog'"));
        assert!(rendered.contains("username: text [unique]"));
        assert!(rendered.contains("user_id: integer [fk]"));
        assert!(rendered.contains("post.user_id -> user.id"));
    }
}

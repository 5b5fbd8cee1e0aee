//! Column model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Storage type of a column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// 64-bit integer
    Integer,
    /// UTF-8 text
    Text,
    /// Point in time, stored as Unix seconds
    Timestamp,
    /// Closed set of named text values (e.g., `media_type` = {image, video})
    Enum {
        /// Name of the enumeration type
        name: String,
        /// Allowed values, in declaration order
        values: Vec<String>,
    },
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer => write!(f, "integer"),
            Self::Text => write!(f, "text"),
            Self::Timestamp => write!(f, "timestamp"),
            Self::Enum { name, .. } => write!(f, "{name}"),
        }
    }
}

/// Default applied when a value is omitted at insert time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultValue {
    /// Fill with the current Unix timestamp
    Now,
}

/// Reference to a column of another entity (a foreign key target)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRef {
    /// Referenced entity name
    pub entity: String,
    /// Referenced column name
    pub column: String,
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.entity, self.column)
    }
}

/// A single column declaration
///
/// Columns are required (non-nullable) unless marked otherwise, matching
/// the dominant convention of the modeled schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column name
    pub name: String,

    /// Storage type
    pub column_type: ColumnType,

    /// Whether NULL values are accepted
    #[serde(default)]
    pub nullable: bool,

    /// Whether values must be unique across rows
    #[serde(default)]
    pub unique: bool,

    /// Whether this column is (part of) the primary key
    #[serde(default)]
    pub primary_key: bool,

    /// Default applied when the value is omitted at insert time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<DefaultValue>,

    /// Foreign-key target, if this column references another entity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub references: Option<ColumnRef>,
}

impl Column {
    /// Create a new required column of the given type
    #[must_use]
    pub fn new(name: &str, column_type: ColumnType) -> Self {
        Self {
            name: name.to_string(),
            column_type,
            nullable: false,
            unique: false,
            primary_key: false,
            default: None,
            references: None,
        }
    }

    /// Create an integer column
    #[must_use]
    pub fn integer(name: &str) -> Self {
        Self::new(name, ColumnType::Integer)
    }

    /// Create a text column
    #[must_use]
    pub fn text(name: &str) -> Self {
        Self::new(name, ColumnType::Text)
    }

    /// Create a timestamp column
    #[must_use]
    pub fn timestamp(name: &str) -> Self {
        Self::new(name, ColumnType::Timestamp)
    }

    /// Create a column restricted to a closed set of text values
    #[must_use]
    pub fn enumeration(name: &str, enum_name: &str, values: &[&str]) -> Self {
        Self::new(
            name,
            ColumnType::Enum {
                name: enum_name.to_string(),
                values: values.iter().map(ToString::to_string).collect(),
            },
        )
    }

    /// Mark this column as (part of) the primary key
    #[must_use]
    pub const fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Mark this column as unique
    #[must_use]
    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Allow NULL values in this column
    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Default the column to the current timestamp when omitted
    #[must_use]
    pub const fn default_now(mut self) -> Self {
        self.default = Some(DefaultValue::Now);
        self
    }

    /// Declare this column as a foreign key into `entity.column`
    #[must_use]
    pub fn references(mut self, entity: &str, column: &str) -> Self {
        self.references = Some(ColumnRef {
            entity: entity.to_string(),
            column: column.to_string(),
        });
        self
    }

    /// Whether this column is a foreign key
    #[must_use]
    pub const fn is_foreign_key(&self) -> bool {
        self.references.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_defaults_to_required() {
        let col = Column::text("username");
        assert_eq!(col.name, "username");
        assert_eq!(col.column_type, ColumnType::Text);
        assert!(!col.nullable);
        assert!(!col.unique);
        assert!(!col.primary_key);
        assert!(col.default.is_none());
        assert!(col.references.is_none());
    }

    #[test]
    fn test_column_flags() {
        let col = Column::integer("id").primary_key();
        assert!(col.primary_key);

        let col = Column::text("email").unique();
        assert!(col.unique);

        let col = Column::text("caption").nullable();
        assert!(col.nullable);
    }

    #[test]
    fn test_foreign_key_reference() {
        let col = Column::integer("user_id").references("user", "id");
        assert!(col.is_foreign_key());

        let target = col.references.unwrap();
        assert_eq!(target.entity, "user");
        assert_eq!(target.column, "id");
        assert_eq!(target.to_string(), "user.id");
    }

    #[test]
    fn test_enum_column_type() {
        let col = Column::enumeration("type", "media_type", &["image", "video"]);
        match &col.column_type {
            ColumnType::Enum { name, values } => {
                assert_eq!(name, "media_type");
                assert_eq!(values, &["image".to_string(), "video".to_string()]);
            }
            other => panic!("expected enum type, got {other}"),
        }
        assert_eq!(col.column_type.to_string(), "media_type");
    }

    #[test]
    fn test_default_now() {
        let col = Column::timestamp("created_at").default_now();
        assert_eq!(col.default, Some(DefaultValue::Now));
    }

    #[test]
    fn test_type_display() {
        assert_eq!(ColumnType::Integer.to_string(), "integer");
        assert_eq!(ColumnType::Text.to_string(), "text");
        assert_eq!(ColumnType::Timestamp.to_string(), "timestamp");
    }
}

//! In-memory row store
//!
//! Enforces the insert-time contract implied by a [`Schema`]: required
//! columns, closed enum membership, primary-key and unique-column
//! uniqueness (including composite keys), and foreign-key resolution.
//! Rows are only ever inserted; there is no update or delete workflow.

use super::schema::{ColumnType, DefaultValue, Schema};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// A single cell value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Integer or timestamp (Unix seconds) value
    Int(i64),
    /// Text or enum value
    Text(String),
    /// Absent value (only valid in nullable columns)
    Null,
}

impl Value {
    /// Whether this value is acceptable for the given column type
    ///
    /// `Null` is never acceptable here; nullability is checked separately.
    #[must_use]
    pub fn matches(&self, column_type: &ColumnType) -> bool {
        match (self, column_type) {
            (Self::Int(_), ColumnType::Integer | ColumnType::Timestamp) => true,
            (Self::Text(_), ColumnType::Text) => true,
            (Self::Text(v), ColumnType::Enum { values, .. }) => values.contains(v),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v}"),
            Self::Null => write!(f, "null"),
        }
    }
}

/// A row: column name to value, ordered for stable serialization
pub type Row = BTreeMap<String, Value>;

/// Build a row from (column, value) pairs
#[must_use]
pub fn row(values: &[(&str, Value)]) -> Row {
    values
        .iter()
        .map(|(name, value)| ((*name).to_string(), value.clone()))
        .collect()
}

/// Rows grouped by entity, validated on insert against a borrowed schema
///
/// The dataset holds no schema of its own; every operation takes the schema
/// by reference so a single schema value can back any number of datasets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Rows per entity name
    tables: BTreeMap<String, Vec<Row>>,
}

impl Dataset {
    /// Create an empty dataset
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows stored for an entity (empty if none have been inserted)
    #[must_use]
    pub fn rows(&self, entity: &str) -> &[Row] {
        self.tables.get(entity).map_or(&[], Vec::as_slice)
    }

    /// Number of rows stored for an entity
    #[must_use]
    pub fn row_count(&self, entity: &str) -> usize {
        self.rows(entity).len()
    }

    /// Insert a row into an entity, validating it against the schema
    ///
    /// Columns with a `now` default are filled with the current Unix
    /// timestamp when omitted; nullable columns default to `Null`.
    ///
    /// # Errors
    /// Returns `Err` with one message per violated constraint; the row is
    /// not stored if any constraint fails
    pub fn insert(&mut self, schema: &Schema, entity: &str, row: Row) -> Result<(), Vec<String>> {
        let Some(definition) = schema.get_entity(entity) else {
            return Err(vec![format!("Unknown entity '{entity}'")]);
        };

        let mut errors = Vec::new();

        // Reject columns the entity does not declare
        for name in row.keys() {
            if definition.column(name).is_none() {
                errors.push(format!("Entity '{entity}': unknown column '{name}'"));
            }
        }

        // Fill defaults and check presence, nullability, and types
        let mut effective = Row::new();
        for column in definition.columns() {
            let value = match row.get(&column.name) {
                Some(value) => value.clone(),
                None => match (&column.default, column.nullable) {
                    (Some(DefaultValue::Now), _) => Value::Int(now_timestamp()),
                    (None, true) => Value::Null,
                    (None, false) => {
                        errors.push(format!(
                            "Entity '{entity}': missing required column '{}'",
                            column.name
                        ));
                        continue;
                    }
                },
            };

            if value == Value::Null {
                if !column.nullable {
                    errors.push(format!(
                        "Entity '{entity}': column '{}' is not nullable",
                        column.name
                    ));
                    continue;
                }
            } else if !value.matches(&column.column_type) {
                errors.push(type_error(entity, &column.name, &column.column_type, &value));
                continue;
            }

            effective.insert(column.name.clone(), value);
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        // Primary-key uniqueness (composite keys compare as ordered tuples)
        let pk_columns = definition.primary_key();
        if !pk_columns.is_empty() {
            let key: Vec<&Value> = pk_columns
                .iter()
                .filter_map(|c| effective.get(&c.name))
                .collect();
            let duplicate = self.rows(entity).iter().any(|existing| {
                pk_columns
                    .iter()
                    .zip(&key)
                    .all(|(c, v)| existing.get(&c.name) == Some(v))
            });
            if duplicate {
                let key_str: Vec<String> = key.iter().map(ToString::to_string).collect();
                errors.push(format!(
                    "Entity '{entity}': duplicate primary key ({})",
                    key_str.join(", ")
                ));
            }
        }

        // Single-column unique constraints (Null never collides)
        for column in definition.columns() {
            if !column.unique {
                continue;
            }
            if let Some(value) = effective.get(&column.name) {
                if *value != Value::Null
                    && self
                        .rows(entity)
                        .iter()
                        .any(|existing| existing.get(&column.name) == Some(value))
                {
                    errors.push(format!(
                        "Entity '{entity}': duplicate value '{value}' for unique column '{}'",
                        column.name
                    ));
                }
            }
        }

        // Foreign-key resolution against already-stored rows
        for column in definition.columns() {
            let Some(target) = &column.references else {
                continue;
            };
            let Some(value) = effective.get(&column.name) else {
                continue;
            };
            if *value == Value::Null {
                continue;
            }
            let resolved = self
                .rows(&target.entity)
                .iter()
                .any(|existing| existing.get(&target.column) == Some(value));
            if !resolved {
                errors.push(format!(
                    "Entity '{entity}': foreign key '{}' = '{value}' has no matching row in '{target}'",
                    column.name
                ));
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        self.tables.entry(entity.to_string()).or_default().push(effective);
        Ok(())
    }

    /// Re-check foreign-key integrity of every stored row
    ///
    /// Used after deserializing a dataset to confirm that all references
    /// survived the round trip.
    ///
    /// # Errors
    /// Returns `Err` with one message per dangling reference
    pub fn validate(&self, schema: &Schema) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        for (entity, rows) in &self.tables {
            let Some(definition) = schema.get_entity(entity) else {
                errors.push(format!("Unknown entity '{entity}' in dataset"));
                continue;
            };
            for stored in rows {
                for column in definition.columns() {
                    let Some(target) = &column.references else {
                        continue;
                    };
                    let Some(value) = stored.get(&column.name) else {
                        continue;
                    };
                    if *value == Value::Null {
                        continue;
                    }
                    let resolved = self
                        .rows(&target.entity)
                        .iter()
                        .any(|existing| existing.get(&target.column) == Some(value));
                    if !resolved {
                        errors.push(format!(
                            "Entity '{entity}': foreign key '{}' = '{value}' has no matching row in '{target}'",
                            column.name
                        ));
                    }
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Serialize the dataset to a JSON string
    ///
    /// # Errors
    /// Returns an error if serialization fails
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse a dataset from a JSON string
    ///
    /// # Errors
    /// Returns an error if the JSON cannot be parsed
    pub fn from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json_str)
    }
}

/// Current Unix timestamp in seconds
fn now_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
}

/// Build a type-mismatch error message
fn type_error(entity: &str, column: &str, column_type: &ColumnType, value: &Value) -> String {
    if let ColumnType::Enum { name, values } = column_type {
        format!(
            "Entity '{entity}': value '{value}' for column '{column}' is not in enum {name} ({})",
            values.join(", ")
        )
    } else {
        format!(
            "Entity '{entity}': value '{value}' for column '{column}' is not a valid {column_type}"
        )
    }
}

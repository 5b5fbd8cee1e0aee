//! Relation model

use serde::{Deserialize, Serialize};
use std::fmt;

/// A foreign-key edge between two entities
///
/// Derived from column declarations; reads as
/// "`from_entity.from_column` references `to_entity.to_column`".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    /// Entity holding the foreign-key column
    pub from_entity: String,
    /// Foreign-key column name
    pub from_column: String,
    /// Referenced entity
    pub to_entity: String,
    /// Referenced column name
    pub to_column: String,
}

impl Relation {
    /// Create a new relation edge
    #[must_use]
    pub fn new(from_entity: &str, from_column: &str, to_entity: &str, to_column: &str) -> Self {
        Self {
            from_entity: from_entity.to_string(),
            from_column: from_column.to_string(),
            to_entity: to_entity.to_string(),
            to_column: to_column.to_string(),
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{} -> {}.{}",
            self.from_entity, self.from_column, self.to_entity, self.to_column
        )
    }
}

//! Entity model

use super::Column;
use serde::{Deserialize, Serialize};

/// A table-like record type with an ordered list of columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Entity name (e.g., "user", "post")
    pub name: String,

    /// Columns in declaration order
    columns: Vec<Column>,
}

impl Entity {
    /// Create a new entity with no columns
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            columns: Vec::new(),
        }
    }

    /// Add a column to the entity
    ///
    /// # Returns
    /// `true` if the column was added, `false` if a column with that name already exists
    pub fn add_column(&mut self, column: Column) -> bool {
        if self.columns.iter().any(|c| c.name == column.name) {
            return false;
        }
        self.columns.push(column);
        true
    }

    /// Add a column, chaining style (duplicate names are ignored)
    #[must_use]
    pub fn with_column(mut self, column: Column) -> Self {
        let _ = self.add_column(column);
        self
    }

    /// Get a column by name
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// All columns, in declaration order
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Columns forming the primary key, in declaration order
    ///
    /// More than one entry means a composite key.
    #[must_use]
    pub fn primary_key(&self) -> Vec<&Column> {
        self.columns.iter().filter(|c| c.primary_key).collect()
    }

    /// Columns declared as foreign keys, in declaration order
    #[must_use]
    pub fn foreign_keys(&self) -> Vec<&Column> {
        self.columns.iter().filter(|c| c.is_foreign_key()).collect()
    }

    /// Number of columns
    #[must_use]
    pub const fn column_count(&self) -> usize {
        self.columns.len()
    }
}

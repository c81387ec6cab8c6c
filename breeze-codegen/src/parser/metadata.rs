//! Metadata structures for parsed SQL schema

use serde::{Deserialize, Serialize};

/// Metadata for a database table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableMetadata {
    /// Table name
    pub name: String,

    /// Columns in declaration order
    pub columns: Vec<ColumnMetadata>,

    /// Indexes (excluding primary key)
    pub indexes: Vec<IndexMetadata>,

    /// Primary key (if any)
    pub primary_key: Option<PrimaryKey>,
}

/// Metadata for a column
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnMetadata {
    /// Column name
    pub name: String,

    /// Data type as written by sqlparser (e.g., "BIGINT", "VARCHAR(255)")
    pub data_type: String,

    /// Whether this column is auto-increment
    pub is_auto_increment: bool,
}

/// Metadata for an index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexMetadata {
    /// Index name
    pub name: String,

    /// Columns in the index (in order)
    pub columns: Vec<String>,

    /// Whether this is a unique index
    pub unique: bool,
}

/// Primary key definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrimaryKey {
    /// Columns in the primary key (in order)
    pub columns: Vec<String>,
}

impl PrimaryKey {
    /// Check if this is a composite primary key
    pub fn is_composite(&self) -> bool {
        self.columns.len() > 1
    }
}

impl TableMetadata {
    /// Get a column by name
    pub fn get_column(&self, name: &str) -> Option<&ColumnMetadata> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Column sets of the unique indexes, in declaration order
    pub fn unique_column_sets(&self) -> Vec<Vec<String>> {
        self.indexes
            .iter()
            .filter(|idx| idx.unique)
            .map(|idx| idx.columns.clone())
            .collect()
    }

    /// The auto-incremented column, if any
    pub fn auto_increment_column(&self) -> Option<&ColumnMetadata> {
        self.columns.iter().find(|c| c.is_auto_increment)
    }
}

impl ColumnMetadata {
    /// The type the way MySQL reports it in `information_schema` (`int(11)`, `varchar(64)`)
    pub fn raw_type(&self) -> String {
        self.data_type.to_lowercase()
    }
}

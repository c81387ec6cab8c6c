//! Schema source backed by an introspection snapshot
//!
//! A snapshot is the JSON output of a live schema introspection service:
//!
//! ```json
//! {
//!   "tables": [
//!     {
//!       "name": "user",
//!       "ric": ["id"],
//!       "unique_indexes": [["email"]],
//!       "column_types": {"id": "int(11)", "email": "varchar(128)"},
//!       "auto_increment_column": "id"
//!     }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use tracing::info;

use super::descriptor::TableDescriptor;
use super::source::SchemaSource;
use crate::error::{CodegenError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaSnapshot {
    pub tables: Vec<TableDescriptor>,
}

/// Serves descriptors from a snapshot, or from descriptors built in memory
#[derive(Debug, Clone, Default)]
pub struct SnapshotSchemaSource {
    snapshot: SchemaSnapshot,
}

impl SnapshotSchemaSource {
    /// Read a snapshot file
    pub fn from_file(path: &Path) -> Result<Self> {
        info!("Reading schema snapshot: {:?}", path);
        let json = std::fs::read_to_string(path)
            .map_err(|e| CodegenError::file("read schema snapshot", path, e))?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: SchemaSnapshot = serde_json::from_str(json)?;
        info!("Found {} tables", snapshot.tables.len());
        Ok(Self { snapshot })
    }

    /// Wrap descriptors that are already in memory
    pub fn from_tables(tables: Vec<TableDescriptor>) -> Self {
        Self {
            snapshot: SchemaSnapshot { tables },
        }
    }
}

impl SchemaSource for SnapshotSchemaSource {
    fn table_names(&self) -> Result<Vec<String>> {
        Ok(self
            .snapshot
            .tables
            .iter()
            .map(|t| t.name.clone())
            .collect())
    }

    fn describe_table(&self, name: &str) -> Result<TableDescriptor> {
        self.snapshot
            .tables
            .iter()
            .find(|t| t.name == name)
            .cloned()
            .ok_or_else(|| {
                CodegenError::SchemaError(format!("table `{}` not found in snapshot", name))
            })
    }
}

//! The canonical table shape consumed by the generator

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{CodegenError, Result};

/// One table, reduced to what the generator needs.
///
/// Every schema source produces this shape, whatever it reads from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDescriptor {
    /// Table name as found in the schema
    pub name: String,

    /// Row identifying columns, in key order
    pub ric: Vec<String>,

    /// Column sets of the unique indexes, in declaration order
    #[serde(default)]
    pub unique_indexes: Vec<Vec<String>>,

    /// Column name to raw schema type (`int(11)`, `varchar(128)`)
    pub column_types: BTreeMap<String, String>,

    /// The auto-incremented column, if any
    #[serde(default)]
    pub auto_increment_column: Option<String>,
}

impl TableDescriptor {
    /// Whether the row identifier is a single column
    pub fn has_single_column_ric(&self) -> bool {
        self.ric.len() == 1
    }

    /// Check that every key column has a known type
    pub fn validate(&self) -> Result<()> {
        if self.ric.is_empty() {
            return Err(CodegenError::SchemaError(format!(
                "table `{}` has no row identifying columns",
                self.name
            )));
        }

        let key_columns = self
            .ric
            .iter()
            .chain(self.unique_indexes.iter().flatten())
            .chain(self.auto_increment_column.iter());

        for column in key_columns {
            if !self.column_types.contains_key(column) {
                return Err(CodegenError::SchemaError(format!(
                    "table `{}` references unknown column `{}`",
                    self.name, column
                )));
            }
        }

        if let Some(empty) = self.unique_indexes.iter().position(|set| set.is_empty()) {
            return Err(CodegenError::SchemaError(format!(
                "table `{}` has an empty unique index (#{})",
                self.name, empty
            )));
        }

        Ok(())
    }
}

//! The schema source capability

use tracing::debug;

use super::descriptor::TableDescriptor;
use crate::config::TableSelection;
use crate::error::{CodegenError, Result};

/// Anything able to describe the tables of a database schema.
///
/// The generator only talks to this trait, so a DDL dump and an
/// introspection snapshot look the same from its side.
pub trait SchemaSource {
    /// Names of every table the source knows, in source order
    fn table_names(&self) -> Result<Vec<String>>;

    /// Describe one table; a table the source does not know is a `SchemaError`
    fn describe_table(&self, name: &str) -> Result<TableDescriptor>;

    /// Describe the selected tables, in selection order
    fn describe_tables(&self, selection: &TableSelection) -> Result<Vec<TableDescriptor>> {
        let names = select_tables(&self.table_names()?, selection)?;
        debug!("Selected {} tables: {:?}", names.len(), names);

        names
            .iter()
            .map(|name| {
                let table = self.describe_table(name)?;
                table.validate()?;
                Ok(table)
            })
            .collect()
    }
}

/// Apply a table selection to the known table names
pub fn select_tables(known: &[String], selection: &TableSelection) -> Result<Vec<String>> {
    match selection {
        TableSelection::All => Ok(known.to_vec()),
        TableSelection::Tables(wanted) => wanted
            .iter()
            .map(|name| {
                if known.contains(name) {
                    Ok(name.clone())
                } else {
                    Err(CodegenError::SchemaError(format!(
                        "table `{}` not found in schema",
                        name
                    )))
                }
            })
            .collect(),
        TableSelection::Prefix(prefix) => {
            let prefix = format!("{}_", prefix);
            Ok(known
                .iter()
                .filter(|name| name.starts_with(&prefix))
                .cloned()
                .collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known() -> Vec<String> {
        ["lud_user", "lud_permission", "luda_resource", "orders"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_select_all() {
        assert_eq!(select_tables(&known(), &TableSelection::All).unwrap(), known());
    }

    #[test]
    fn test_select_by_prefix() {
        let selected = select_tables(&known(), &TableSelection::Prefix("lud".into())).unwrap();
        // "luda_resource" shares the letters but not the prefix
        assert_eq!(selected, vec!["lud_user", "lud_permission"]);
    }

    #[test]
    fn test_select_explicit_keeps_selection_order() {
        let selection = TableSelection::Tables(vec!["orders".into(), "lud_user".into()]);
        assert_eq!(
            select_tables(&known(), &selection).unwrap(),
            vec!["orders", "lud_user"]
        );
    }

    #[test]
    fn test_select_missing_table() {
        let selection = TableSelection::Tables(vec!["invoices".into()]);
        let err = select_tables(&known(), &selection).unwrap_err();
        assert!(matches!(err, CodegenError::SchemaError(msg) if msg.contains("invoices")));
    }
}

//! Schema source backed by a structure dump (MySQL DDL)

use std::collections::BTreeMap;
use std::path::Path;

use tracing::info;

use super::descriptor::TableDescriptor;
use super::source::SchemaSource;
use crate::error::{CodegenError, Result};
use crate::parser::{self, TableMetadata};

/// Reads tables from `CREATE TABLE` statements
#[derive(Debug, Clone)]
pub struct DdlSchemaSource {
    tables: Vec<TableMetadata>,
}

impl DdlSchemaSource {
    /// Parse the given dump file
    pub fn from_file(path: &Path) -> Result<Self> {
        info!("Parsing schema: {:?}", path);
        let sql = std::fs::read_to_string(path)
            .map_err(|e| CodegenError::file("read schema file", path, e))?;
        Self::from_sql(&sql)
    }

    /// Parse DDL held in memory
    pub fn from_sql(sql: &str) -> Result<Self> {
        let tables = parser::parse_schema(sql)?;
        info!("Found {} tables", tables.len());
        Ok(Self { tables })
    }
}

impl SchemaSource for DdlSchemaSource {
    fn table_names(&self) -> Result<Vec<String>> {
        Ok(self.tables.iter().map(|t| t.name.clone()).collect())
    }

    fn describe_table(&self, name: &str) -> Result<TableDescriptor> {
        let table = self
            .tables
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| {
                CodegenError::SchemaError(format!("table `{}` not found in schema dump", name))
            })?;
        Ok(to_descriptor(table))
    }
}

/// Tables without a primary key are identified by all of their columns
fn to_descriptor(table: &TableMetadata) -> TableDescriptor {
    let ric = match &table.primary_key {
        Some(pk) => pk.columns.clone(),
        None => table.columns.iter().map(|c| c.name.clone()).collect(),
    };

    let column_types: BTreeMap<String, String> = table
        .columns
        .iter()
        .map(|c| (c.name.clone(), c.raw_type()))
        .collect();

    TableDescriptor {
        name: table.name.clone(),
        ric,
        unique_indexes: table.unique_column_sets(),
        column_types,
        auto_increment_column: table.auto_increment_column().map(|c| c.name.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TableSelection;

    const SCHEMA: &str = r#"
        CREATE TABLE lud_user (
            id INT(11) NOT NULL AUTO_INCREMENT,
            identifier VARCHAR(128) NOT NULL,
            pseudo VARCHAR(64) NOT NULL,
            PRIMARY KEY (id),
            UNIQUE KEY (identifier)
        );

        CREATE TABLE lud_user_has_permission_group (
            user_id INT(11) NOT NULL,
            permission_group_id INT(11) NOT NULL,
            PRIMARY KEY (user_id, permission_group_id)
        );

        CREATE TABLE audit_log (
            message TEXT,
            created_at DATETIME
        );
    "#;

    #[test]
    fn test_describe_table() {
        let source = DdlSchemaSource::from_sql(SCHEMA).unwrap();
        let user = source.describe_table("lud_user").unwrap();

        assert_eq!(user.ric, vec!["id"]);
        assert_eq!(user.unique_indexes, vec![vec!["identifier".to_string()]]);
        assert_eq!(user.auto_increment_column.as_deref(), Some("id"));
        assert_eq!(user.column_types["id"], "int(11)");
        assert_eq!(user.column_types["pseudo"], "varchar(64)");
    }

    #[test]
    fn test_table_without_primary_key_uses_all_columns() {
        let source = DdlSchemaSource::from_sql(SCHEMA).unwrap();
        let log = source.describe_table("audit_log").unwrap();
        assert_eq!(log.ric, vec!["message", "created_at"]);
    }

    #[test]
    fn test_unknown_table() {
        let source = DdlSchemaSource::from_sql(SCHEMA).unwrap();
        assert!(matches!(
            source.describe_table("lud_permission"),
            Err(CodegenError::SchemaError(_))
        ));
    }

    #[test]
    fn test_describe_tables_by_prefix() {
        let source = DdlSchemaSource::from_sql(SCHEMA).unwrap();
        let tables = source
            .describe_tables(&TableSelection::Prefix("lud".into()))
            .unwrap();
        let names: Vec<_> = tables.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["lud_user", "lud_user_has_permission_group"]);
        assert_eq!(tables[1].ric, vec!["user_id", "permission_group_id"]);
    }

    #[test]
    fn test_missing_dump_reports_its_path() {
        let path = Path::new("does/not/exist.sql");
        match DdlSchemaSource::from_file(path) {
            Err(CodegenError::FileError { action, path: failed, source }) => {
                assert_eq!(action, "read schema file");
                assert_eq!(failed, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected a file error, got {:?}", other.map(|_| ())),
        }
    }
}

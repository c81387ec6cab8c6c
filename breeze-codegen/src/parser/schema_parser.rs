//! SQL schema parser using sqlparser-rs

use sqlparser::ast::{
    ColumnOption, Expr, Ident, IndexColumn, ObjectName, PrimaryKeyConstraint, Statement,
    TableConstraint, UniqueConstraint,
};
use sqlparser::dialect::MySqlDialect;
use sqlparser::parser::Parser;

use super::metadata::*;
use crate::error::Result;

/// Parse a SQL schema string into table metadata
pub fn parse_schema(sql: &str) -> Result<Vec<TableMetadata>> {
    let dialect = MySqlDialect {};
    let statements = Parser::parse_sql(&dialect, sql)?;

    let mut tables = Vec::new();

    for stmt in statements {
        if let Statement::CreateTable(create_table) = stmt {
            let table = extract_table_metadata(&create_table)?;
            tables.push(table);
        }
    }

    Ok(tables)
}

/// Extract table metadata from a CREATE TABLE statement
fn extract_table_metadata(create: &sqlparser::ast::CreateTable) -> Result<TableMetadata> {
    let name = extract_table_name(&create.name);

    let mut columns = Vec::new();
    let mut indexes = Vec::new();
    let mut primary_key = None;

    for col_def in &create.columns {
        let (column, col_pk, col_unique) = extract_column_metadata(col_def);

        // Column-level PRIMARY KEY
        if col_pk {
            primary_key = Some(PrimaryKey {
                columns: vec![column.name.clone()],
            });
        }

        // Column-level UNIQUE
        if col_unique {
            indexes.push(IndexMetadata {
                name: format!("{}_unique", column.name),
                columns: vec![column.name.clone()],
                unique: true,
            });
        }

        columns.push(column);
    }

    for constraint in &create.constraints {
        match constraint {
            TableConstraint::PrimaryKey(PrimaryKeyConstraint {
                columns: pk_cols, ..
            }) => {
                primary_key = Some(PrimaryKey {
                    columns: pk_cols
                        .iter()
                        .map(extract_ident_from_index_column)
                        .collect(),
                });
            }
            TableConstraint::Unique(UniqueConstraint {
                columns: uniq_cols,
                name,
                ..
            }) => {
                let idx_name = name.as_ref().map(extract_ident).unwrap_or_else(|| {
                    let first_col = uniq_cols
                        .first()
                        .map(extract_ident_from_index_column)
                        .unwrap_or_default();
                    format!("{}_unique", first_col)
                });
                indexes.push(IndexMetadata {
                    name: idx_name,
                    columns: uniq_cols
                        .iter()
                        .map(extract_ident_from_index_column)
                        .collect(),
                    unique: true,
                });
            }
            _ => {}
        }
    }

    Ok(TableMetadata {
        name,
        columns,
        indexes,
        primary_key,
    })
}

/// Extract column metadata from a column definition.
/// Also reports whether the column declares PRIMARY KEY or UNIQUE inline.
fn extract_column_metadata(col_def: &sqlparser::ast::ColumnDef) -> (ColumnMetadata, bool, bool) {
    let name = extract_ident(&col_def.name);
    let data_type = format!("{}", col_def.data_type);

    let mut is_auto_increment = false;
    let mut col_is_primary = false;
    let mut col_is_unique = false;

    for option in &col_def.options {
        match &option.option {
            ColumnOption::PrimaryKey(_) => {
                col_is_primary = true;
            }
            ColumnOption::Unique(_) => {
                col_is_unique = true;
            }
            ColumnOption::DialectSpecific(tokens) => {
                // AUTO_INCREMENT is a MySQL-specific option
                let token_str = tokens
                    .iter()
                    .map(|t| t.to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
                    .to_uppercase();
                if token_str.contains("AUTO_INCREMENT") {
                    is_auto_increment = true;
                }
            }
            _ => {}
        }
    }

    let column = ColumnMetadata {
        name,
        data_type,
        is_auto_increment,
    };

    (column, col_is_primary, col_is_unique)
}

/// Extract a simple string from an ObjectName
fn extract_table_name(name: &ObjectName) -> String {
    name.0
        .last()
        .and_then(|part| part.as_ident())
        .map(|ident| ident.value.clone())
        .unwrap_or_default()
}

/// Extract a string from an Ident, removing backticks if present
fn extract_ident(ident: &Ident) -> String {
    ident.value.clone()
}

/// Extract a column name string from an IndexColumn
fn extract_ident_from_index_column(ic: &IndexColumn) -> String {
    match &ic.column.expr {
        Expr::Identifier(ident) => ident.value.clone(),
        other => format!("{}", other),
    }
}

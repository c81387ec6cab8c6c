//! breeze-codegen: Generate PHP data-access classes from a database schema
//!
//! This crate provides both a CLI tool and a library. It reads the tables of
//! a schema, either from a MySQL structure dump (parsed with `sqlparser-rs`)
//! or from a JSON introspection snapshot, and generates for every table:
//!
//! - a data object class with insert, get, update and delete methods for its
//!   row identifier and for each of its unique indexes
//! - the interface of that class
//!
//! plus one factory returning the data objects and the abstract base they
//! all extend.
//!
//! # Usage
//!
//! Configure with a TOML file:
//!
//! ```toml
//! schema_file = "schema.sql"
//! output_dir = "src/Api"
//! namespace = "App\\Api"
//! table_selection = { prefix = "lud" }
//! ```
//!
//! ```bash
//! breeze-codegen --config breeze-codegen.toml generate
//! ```
//!
//! # Programmatic Configuration
//!
//! ```rust,ignore
//! fn main() {
//!     let report = breeze_codegen::CodegenBuilder::new("schema.sql")
//!         .output_dir("src/Api")
//!         .namespace("App\\Api")
//!         .table_prefix("lud")
//!         .generate()
//!         .expect("Failed to generate the data objects");
//!
//!     println!("{} files written", report.written().count());
//! }
//! ```

pub mod codegen;
pub mod config;
pub mod error;
pub mod parser;
pub mod schema;

use std::path::Path;

use tracing::info;

use crate::codegen::{DiskFileSystem, DryRunFileSystem, FileSystem, GenerationReport, Generator};
use crate::config::{ArtifactKind, TableSelection};
use crate::schema::TableDescriptor;

pub use crate::config::CodegenConfig;
pub use crate::error::{CodegenError, Result};

/// Main entry point for code generation
pub fn generate(config: &CodegenConfig) -> Result<GenerationReport> {
    info!("Reading schema: {}", config.schema_file.display());
    let source = schema::open_source(config)?;

    let fs: &dyn FileSystem = if config.dry_run {
        &DryRunFileSystem
    } else {
        &DiskFileSystem
    };

    Generator::new(config, source.as_ref(), fs).generate()
}

/// The descriptors of the selected tables, as the generator sees them
pub fn inspect(config: &CodegenConfig) -> Result<Vec<TableDescriptor>> {
    let source = schema::open_source(config)?;
    source.describe_tables(&config.table_selection)
}

/// Builder pattern for programmatic configuration
pub struct CodegenBuilder {
    config: CodegenConfig,
}

impl CodegenBuilder {
    /// Create a new builder with the given schema file
    pub fn new(schema_file: impl AsRef<Path>) -> Self {
        Self {
            config: CodegenConfig::default_with_schema(schema_file.as_ref().to_path_buf()),
        }
    }

    /// Set the root output directory
    pub fn output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.config.output_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Set the root namespace of the generated classes
    pub fn namespace(mut self, namespace: &str) -> Self {
        self.config.namespace = namespace.to_string();
        self
    }

    /// Generate exactly these tables
    pub fn tables(mut self, tables: &[&str]) -> Self {
        self.config.table_selection =
            TableSelection::Tables(tables.iter().map(|t| t.to_string()).collect());
        self
    }

    /// Generate the tables named `<prefix>_*`
    pub fn table_prefix(mut self, prefix: &str) -> Self {
        self.config.table_selection = TableSelection::Prefix(prefix.to_string());
        self
    }

    /// Set the factory class name
    pub fn factory_class_name(mut self, name: &str) -> Self {
        self.config.factory_class_name = name.to_string();
        self
    }

    /// Set the abstract base class name
    pub fn base_class_name(mut self, name: &str) -> Self {
        self.config.base_class_name = name.to_string();
        self
    }

    /// Put the files of `kind` in a subdirectory (and sub-namespace)
    pub fn directory(mut self, kind: ArtifactKind, dir: &str) -> Self {
        let dir = dir.to_string();
        let directories = &mut self.config.directories;
        match kind {
            ArtifactKind::Class => directories.classes = dir,
            ArtifactKind::Interface => directories.interfaces = dir,
            ArtifactKind::Factory => directories.factory = dir,
            ArtifactKind::Base => directories.base = dir,
            ArtifactKind::Custom => directories.custom = dir,
        }
        self
    }

    /// Whether existing files of `kind` get overwritten
    pub fn overwrite(mut self, kind: ArtifactKind, overwrite: bool) -> Self {
        let policy = &mut self.config.overwrite;
        match kind {
            ArtifactKind::Class => policy.classes = overwrite,
            ArtifactKind::Interface => policy.interfaces = overwrite,
            ArtifactKind::Factory => policy.factory = overwrite,
            ArtifactKind::Base => policy.base = overwrite,
            ArtifactKind::Custom => {}
        }
        self
    }

    /// Inject micro-permission checks into the generated methods
    pub fn micro_permission(mut self) -> Self {
        self.config.use_micro_permission = true;
        self
    }

    /// Read replacement templates from `dir`
    pub fn template_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.config.template_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Enable dry run mode (preview without writing files)
    pub fn dry_run(mut self) -> Self {
        self.config.dry_run = true;
        self
    }

    /// The configuration built so far
    pub fn config(&self) -> &CodegenConfig {
        &self.config
    }

    /// Generate the code
    pub fn generate(self) -> Result<GenerationReport> {
        self.config.validate()?;
        generate(&self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_config() {
        let builder = CodegenBuilder::new("schema.sql")
            .output_dir("out")
            .namespace("Ling\\Light_UserDatabase\\Api")
            .table_prefix("lud")
            .directory(ArtifactKind::Interface, "Interfaces")
            .overwrite(ArtifactKind::Interface, true)
            .micro_permission();

        let config = builder.config();
        assert_eq!(config.output_dir, Path::new("out"));
        assert_eq!(config.namespace, "Ling\\Light_UserDatabase\\Api");
        assert_eq!(config.table_selection, TableSelection::Prefix("lud".to_string()));
        assert_eq!(config.directories.interfaces, "Interfaces");
        assert!(config.overwrite.interfaces);
        assert!(config.use_micro_permission);
        assert!(!config.dry_run);
    }

    #[test]
    fn test_builder_validates_before_generating() {
        let err = CodegenBuilder::new("does/not/exist.sql").generate().unwrap_err();
        assert!(matches!(err, CodegenError::ValidationError(_)));
    }
}

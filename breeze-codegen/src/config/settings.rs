//! Configuration settings for breeze-codegen

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::artifact::ArtifactKind;
use super::defaults;
use crate::error::{CodegenError, Result};

/// Main configuration struct for code generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodegenConfig {
    /// Path to the schema source (DDL dump or introspection snapshot)
    #[serde(default)]
    pub schema_file: PathBuf,

    /// How to read `schema_file`
    #[serde(default)]
    pub schema_format: SchemaFormat,

    /// Root directory of the generated files
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Root namespace of the generated classes
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Name of the generated factory class
    #[serde(default = "default_factory_class_name")]
    pub factory_class_name: String,

    /// Name of the generated abstract parent class
    #[serde(default = "default_base_class_name")]
    pub base_class_name: String,

    /// Which tables to generate
    #[serde(default)]
    pub table_selection: TableSelection,

    /// Table prefix removed from class names (defaults to the selection prefix)
    #[serde(default)]
    pub class_name_prefix: Option<String>,

    /// Keep the table prefix in class names
    #[serde(default = "default_use_prefix_in_class_name")]
    pub use_prefix_in_class_name: bool,

    /// Suffix appended to each table's class name
    #[serde(default = "default_class_suffix")]
    pub class_suffix: String,

    /// Suffix appended to an object class name to form its interface name
    #[serde(default = "default_interface_suffix")]
    pub interface_suffix: String,

    /// Prefix of hand-written override classes
    #[serde(default = "default_custom_class_prefix")]
    pub custom_class_prefix: String,

    /// Inject `checkMicroPermission` calls into the generated methods
    #[serde(default = "default_use_micro_permission")]
    pub use_micro_permission: bool,

    /// Per-kind overwrite policy for files that already exist
    #[serde(default)]
    pub overwrite: OverwritePolicy,

    /// Per-kind subdirectories, relative to `output_dir`
    #[serde(default)]
    pub directories: Directories,

    /// Directory holding replacement templates (built-in set when unset)
    #[serde(default)]
    pub template_dir: Option<PathBuf>,

    /// Return the literal "0" from inserts on tables without an auto-incremented key
    #[serde(default = "default_legacy_insert_key_placeholder")]
    pub legacy_insert_key_placeholder: bool,

    /// Dry run mode - preview without writing files
    #[serde(default = "default_dry_run")]
    pub dry_run: bool,

    /// Log level (trace, debug, info, warn, error)
    /// Can be overridden by RUST_LOG env var
    #[serde(default)]
    pub log_level: Option<String>,
}

/// Format of the schema source file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaFormat {
    /// Pick from the file extension: `.json` is a snapshot, anything else is DDL
    #[default]
    Auto,
    /// MySQL `CREATE TABLE` statements
    Ddl,
    /// JSON output of a schema introspection service
    Snapshot,
}

impl SchemaFormat {
    /// Resolve `Auto` against the given path
    pub fn resolve(self, path: &Path) -> SchemaFormat {
        match self {
            SchemaFormat::Auto => {
                let is_json = path
                    .extension()
                    .map(|ext| ext.eq_ignore_ascii_case("json"))
                    .unwrap_or(false);
                if is_json {
                    SchemaFormat::Snapshot
                } else {
                    SchemaFormat::Ddl
                }
            }
            other => other,
        }
    }
}

/// Which tables of the schema to generate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableSelection {
    /// Every table of the schema source
    #[default]
    All,
    /// Exactly these tables, in this order
    Tables(Vec<String>),
    /// Tables named `<prefix>_*`
    Prefix(String),
}

/// Whether an existing file of each kind gets overwritten
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverwritePolicy {
    #[serde(default = "default_overwrite_classes")]
    pub classes: bool,
    #[serde(default = "default_overwrite_interfaces")]
    pub interfaces: bool,
    #[serde(default = "default_overwrite_factory")]
    pub factory: bool,
    #[serde(default = "default_overwrite_base")]
    pub base: bool,
}

impl OverwritePolicy {
    /// The same flag for every kind
    pub fn all(overwrite: bool) -> Self {
        Self {
            classes: overwrite,
            interfaces: overwrite,
            factory: overwrite,
            base: overwrite,
        }
    }

    pub fn for_kind(&self, kind: ArtifactKind) -> bool {
        match kind {
            ArtifactKind::Class => self.classes,
            ArtifactKind::Interface => self.interfaces,
            ArtifactKind::Factory => self.factory,
            ArtifactKind::Base => self.base,
            ArtifactKind::Custom => false,
        }
    }
}

impl Default for OverwritePolicy {
    fn default() -> Self {
        Self {
            classes: default_overwrite_classes(),
            interfaces: default_overwrite_interfaces(),
            factory: default_overwrite_factory(),
            base: default_overwrite_base(),
        }
    }
}

/// Subdirectory of each kind relative to the output directory.
/// Each subdirectory also extends the root namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directories {
    #[serde(default = "default_classes_dir")]
    pub classes: String,
    #[serde(default = "default_interfaces_dir")]
    pub interfaces: String,
    #[serde(default = "default_factory_dir")]
    pub factory: String,
    #[serde(default = "default_base_dir")]
    pub base: String,
    #[serde(default = "default_custom_dir")]
    pub custom: String,
}

impl Directories {
    pub fn for_kind(&self, kind: ArtifactKind) -> &str {
        match kind {
            ArtifactKind::Class => &self.classes,
            ArtifactKind::Interface => &self.interfaces,
            ArtifactKind::Factory => &self.factory,
            ArtifactKind::Base => &self.base,
            ArtifactKind::Custom => &self.custom,
        }
    }
}

impl Default for Directories {
    fn default() -> Self {
        Self {
            classes: default_classes_dir(),
            interfaces: default_interfaces_dir(),
            factory: default_factory_dir(),
            base: default_base_dir(),
            custom: default_custom_dir(),
        }
    }
}

// Default value functions for serde
fn default_output_dir() -> PathBuf {
    PathBuf::from(defaults::OUTPUT_DIR)
}
fn default_namespace() -> String {
    defaults::NAMESPACE.to_string()
}
fn default_factory_class_name() -> String {
    defaults::FACTORY_CLASS_NAME.to_string()
}
fn default_base_class_name() -> String {
    defaults::BASE_CLASS_NAME.to_string()
}
fn default_use_prefix_in_class_name() -> bool {
    defaults::USE_PREFIX_IN_CLASS_NAME
}
fn default_class_suffix() -> String {
    defaults::CLASS_SUFFIX.to_string()
}
fn default_interface_suffix() -> String {
    defaults::INTERFACE_SUFFIX.to_string()
}
fn default_custom_class_prefix() -> String {
    defaults::CUSTOM_CLASS_PREFIX.to_string()
}
fn default_use_micro_permission() -> bool {
    defaults::USE_MICRO_PERMISSION
}
fn default_legacy_insert_key_placeholder() -> bool {
    defaults::LEGACY_INSERT_KEY_PLACEHOLDER
}
fn default_dry_run() -> bool {
    defaults::DRY_RUN
}
fn default_overwrite_classes() -> bool {
    ArtifactKind::Class.default_overwrite()
}
fn default_overwrite_interfaces() -> bool {
    ArtifactKind::Interface.default_overwrite()
}
fn default_overwrite_factory() -> bool {
    ArtifactKind::Factory.default_overwrite()
}
fn default_overwrite_base() -> bool {
    ArtifactKind::Base.default_overwrite()
}
fn default_classes_dir() -> String {
    ArtifactKind::Class.default_directory().to_string()
}
fn default_interfaces_dir() -> String {
    ArtifactKind::Interface.default_directory().to_string()
}
fn default_factory_dir() -> String {
    ArtifactKind::Factory.default_directory().to_string()
}
fn default_base_dir() -> String {
    ArtifactKind::Base.default_directory().to_string()
}
fn default_custom_dir() -> String {
    ArtifactKind::Custom.default_directory().to_string()
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            schema_file: PathBuf::new(),
            schema_format: SchemaFormat::default(),
            output_dir: default_output_dir(),
            namespace: default_namespace(),
            factory_class_name: default_factory_class_name(),
            base_class_name: default_base_class_name(),
            table_selection: TableSelection::default(),
            class_name_prefix: None,
            use_prefix_in_class_name: default_use_prefix_in_class_name(),
            class_suffix: default_class_suffix(),
            interface_suffix: default_interface_suffix(),
            custom_class_prefix: default_custom_class_prefix(),
            use_micro_permission: default_use_micro_permission(),
            overwrite: OverwritePolicy::default(),
            directories: Directories::default(),
            template_dir: None,
            legacy_insert_key_placeholder: default_legacy_insert_key_placeholder(),
            dry_run: default_dry_run(),
            log_level: None,
        }
    }
}

impl CodegenConfig {
    /// Create a default config with the given schema file
    pub fn default_with_schema(schema_file: PathBuf) -> Self {
        Self {
            schema_file,
            ..Default::default()
        }
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CodegenError::file("read config file", path, e))?;
        let config: CodegenConfig = toml::from_str(&content).map_err(|e| {
            CodegenError::ConfigError(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(config)
    }

    /// Load configuration using config-rs (file + environment variables)
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from config file if specified
        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        } else {
            // Try default locations
            builder = builder.add_source(File::with_name("breeze-codegen").required(false));
        }

        // Override with environment variables (BREEZE_CODEGEN_*)
        builder = builder.add_source(
            Environment::with_prefix("BREEZE_CODEGEN")
                .prefix_separator("_")
                .separator("__"),
        );

        let config: CodegenConfig = builder.build()?.try_deserialize()?;

        Ok(config)
    }

    /// The table prefix to strip from class names, if any
    pub fn stripped_prefix(&self) -> Option<&str> {
        if self.use_prefix_in_class_name {
            return None;
        }
        match (&self.class_name_prefix, &self.table_selection) {
            (Some(prefix), _) => Some(prefix.as_str()),
            (None, TableSelection::Prefix(prefix)) => Some(prefix.as_str()),
            _ => None,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.schema_file.as_os_str().is_empty() {
            return Err(CodegenError::ValidationError(
                "schema_file is required".into(),
            ));
        }

        if !self.schema_file.exists() {
            return Err(CodegenError::ValidationError(format!(
                "Schema file not found: {}",
                self.schema_file.display()
            )));
        }

        if !is_valid_namespace(&self.namespace) {
            return Err(CodegenError::ValidationError(format!(
                "Invalid namespace: {:?}",
                self.namespace
            )));
        }

        for (key, name) in [
            ("factory_class_name", &self.factory_class_name),
            ("base_class_name", &self.base_class_name),
        ] {
            if !is_valid_identifier(name) {
                return Err(CodegenError::ValidationError(format!(
                    "{} is not a valid class name: {:?}",
                    key, name
                )));
            }
        }

        match &self.table_selection {
            TableSelection::Tables(tables) if tables.is_empty() => {
                return Err(CodegenError::ValidationError(
                    "table_selection.tables must name at least one table".into(),
                ));
            }
            TableSelection::Prefix(prefix) if prefix.trim().is_empty() => {
                return Err(CodegenError::ValidationError(
                    "table_selection.prefix must not be empty".into(),
                ));
            }
            _ => {}
        }

        let kinds = ArtifactKind::GENERATED
            .into_iter()
            .chain(std::iter::once(ArtifactKind::Custom));
        for kind in kinds {
            let dir = self.directories.for_kind(kind);
            let valid = dir_segments(dir).all(is_valid_identifier);
            if !valid {
                return Err(CodegenError::ValidationError(format!(
                    "directories.{} must be a relative path of identifiers: {:?}",
                    kind, dir
                )));
            }
        }

        let same_dir = dir_segments(&self.directories.custom)
            .eq(dir_segments(&self.directories.classes));
        if same_dir && self.custom_class_prefix.is_empty() {
            return Err(CodegenError::ValidationError(
                "custom_class_prefix must not be empty when directories.custom is the classes directory"
                    .into(),
            ));
        }

        Ok(())
    }
}

fn dir_segments(dir: &str) -> impl Iterator<Item = &str> {
    dir.split('/').filter(|segment| !segment.is_empty())
}

/// Check a PHP class-like identifier
fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

fn is_valid_namespace(namespace: &str) -> bool {
    !namespace.is_empty() && namespace.split('\\').all(is_valid_identifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CodegenConfig::default();
        assert_eq!(config.table_selection, TableSelection::All);
        assert_eq!(config.class_suffix, "Object");
        assert_eq!(config.custom_class_prefix, "Custom");
        assert!(!config.use_micro_permission);
        assert!(config.log_level.is_none());
    }

    #[test]
    fn test_default_overwrite_policy() {
        let policy = OverwritePolicy::default();
        assert!(policy.classes);
        assert!(!policy.interfaces);
        assert!(policy.factory);
        assert!(!policy.base);
    }

    #[test]
    fn test_validation_missing_schema() {
        let config = CodegenConfig::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_toml() {
        let toml_content = r#"
            schema_file = "test.sql"
            namespace = "Ling\\Light_UserDatabase\\Api"
            log_level = "debug"
            table_selection = { prefix = "lud" }

            [overwrite]
            interfaces = true

            [directories]
            interfaces = "Interfaces"
        "#;
        let config: CodegenConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.log_level, Some("debug".to_string()));
        assert_eq!(config.namespace, "Ling\\Light_UserDatabase\\Api");
        assert_eq!(config.table_selection, TableSelection::Prefix("lud".into()));
        // Unset flags keep their per-kind defaults
        assert!(config.overwrite.interfaces);
        assert!(config.overwrite.classes);
        assert!(!config.overwrite.base);
        assert_eq!(config.directories.interfaces, "Interfaces");
        assert_eq!(config.directories.custom, "Custom");
    }

    #[test]
    fn test_table_list_selection_from_toml() {
        let config: CodegenConfig = toml::from_str(
            r#"
            table_selection = { tables = ["user", "orders"] }
        "#,
        )
        .unwrap();
        assert_eq!(
            config.table_selection,
            TableSelection::Tables(vec!["user".into(), "orders".into()])
        );
    }

    #[test]
    fn test_stripped_prefix() {
        let mut config = CodegenConfig {
            table_selection: TableSelection::Prefix("lud".into()),
            ..Default::default()
        };
        assert_eq!(config.stripped_prefix(), Some("lud"));

        config.class_name_prefix = Some("app".into());
        assert_eq!(config.stripped_prefix(), Some("app"));

        config.use_prefix_in_class_name = true;
        assert_eq!(config.stripped_prefix(), None);
    }

    #[test]
    fn test_schema_format_resolution() {
        let auto = SchemaFormat::Auto;
        assert_eq!(auto.resolve(Path::new("db.json")), SchemaFormat::Snapshot);
        assert_eq!(auto.resolve(Path::new("db.sql")), SchemaFormat::Ddl);
        assert_eq!(
            SchemaFormat::Ddl.resolve(Path::new("db.json")),
            SchemaFormat::Ddl
        );
    }

    #[test]
    fn test_validation_rejects_bad_names() {
        let dir = tempfile::tempdir().unwrap();
        let schema = dir.path().join("schema.sql");
        std::fs::write(&schema, "").unwrap();

        let config = CodegenConfig::default_with_schema(schema.clone());
        assert!(config.validate().is_ok());

        let config = CodegenConfig {
            factory_class_name: "1Factory".into(),
            ..CodegenConfig::default_with_schema(schema.clone())
        };
        assert!(config.validate().is_err());

        let config = CodegenConfig {
            namespace: "App\\\\Api".into(),
            ..CodegenConfig::default_with_schema(schema.clone())
        };
        assert!(config.validate().is_err());

        let config = CodegenConfig {
            table_selection: TableSelection::Tables(vec![]),
            ..CodegenConfig::default_with_schema(schema)
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_custom_class_shadowing_generated_class() {
        let dir = tempfile::tempdir().unwrap();
        let schema = dir.path().join("schema.sql");
        std::fs::write(&schema, "").unwrap();

        let mut config = CodegenConfig::default_with_schema(schema);
        config.custom_class_prefix = String::new();
        config.directories.custom = "Classes/".into();
        config.directories.classes = "Classes".into();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, CodegenError::ValidationError(_)));

        config.directories.custom = "Custom".into();
        assert!(config.validate().is_ok());

        config.directories.custom = "Classes".into();
        config.custom_class_prefix = "Custom".into();
        assert!(config.validate().is_ok());
    }
}

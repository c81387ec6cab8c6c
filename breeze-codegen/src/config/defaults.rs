//! Default configuration values - single source of truth

use super::artifact::ArtifactKind;

/// Default output directory for generated PHP files
pub const OUTPUT_DIR: &str = "./generated";

/// Default root namespace of the generated classes
pub const NAMESPACE: &str = "App\\Api";

/// Default name of the generated factory class
pub const FACTORY_CLASS_NAME: &str = "ObjectFactory";

/// Default name of the generated abstract parent class
pub const BASE_CLASS_NAME: &str = "BaseObject";

/// Suffix appended to each table's class name
pub const CLASS_SUFFIX: &str = "Object";

/// Suffix appended to each object class name to form its interface name
pub const INTERFACE_SUFFIX: &str = "Interface";

/// Prefix of hand-written override classes, also their default directory
pub const CUSTOM_CLASS_PREFIX: &str = "Custom";

/// Whether to keep the table prefix in generated class names
pub const USE_PREFIX_IN_CLASS_NAME: bool = false;

/// Whether generated methods call the micro-permission hook
pub const USE_MICRO_PERMISSION: bool = false;

/// Whether inserts without an auto-incremented key return the literal "0"
pub const LEGACY_INSERT_KEY_PLACEHOLDER: bool = true;

/// Whether to run in dry-run mode by default
pub const DRY_RUN: bool = false;

/// Overwrite policy per artifact kind when the output file already exists
pub const OVERWRITE: &[(ArtifactKind, bool)] = &[
    (ArtifactKind::Class, true),
    (ArtifactKind::Interface, false),
    (ArtifactKind::Factory, true),
    (ArtifactKind::Base, false),
    (ArtifactKind::Custom, false),
];

/// Relative subdirectory per artifact kind ("" means the output directory itself)
pub const DIRECTORIES: &[(ArtifactKind, &str)] = &[
    (ArtifactKind::Class, ""),
    (ArtifactKind::Interface, ""),
    (ArtifactKind::Factory, ""),
    (ArtifactKind::Base, ""),
    (ArtifactKind::Custom, CUSTOM_CLASS_PREFIX),
];

//! Code generation module

pub mod fs;
mod generator;
mod layout;
mod naming;
mod permission;
mod renderer;
mod templates;
mod variables;

pub use fs::{DiskFileSystem, DryRunFileSystem, FileSystem};
pub use generator::{GeneratedFile, GenerationReport, Generator, WriteOutcome};
pub use layout::ArtifactLayout;
pub use naming::*;
pub use permission::{permission_for_tag, KeyMethod, PermissionKind};
pub use renderer::{FactoryAccessor, ObjectModel, RenderOptions, Renderer};
pub use templates::{TemplateId, TemplateStore};
pub use variables::{derive_unique_index_variables, derive_variables, TypeBucket, VariableBundle};

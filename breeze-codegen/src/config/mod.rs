//! Configuration for breeze-codegen

mod artifact;
pub mod defaults;
mod settings;

pub use artifact::ArtifactKind;
pub use settings::*;

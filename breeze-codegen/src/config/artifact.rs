//! Kinds of generated artifacts

use serde::{Deserialize, Serialize};
use std::fmt;

use super::defaults;

/// The categories of files the generator deals with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    /// One data object class per table
    Class,
    /// One data object interface per table
    Interface,
    /// The factory, one per run
    Factory,
    /// The abstract parent of all data objects, one per run
    Base,
    /// Hand-written override classes; only ever read, never written
    Custom,
}

impl ArtifactKind {
    /// Kinds the generator writes, in the order it writes them
    pub const GENERATED: [ArtifactKind; 4] = [
        ArtifactKind::Class,
        ArtifactKind::Interface,
        ArtifactKind::Factory,
        ArtifactKind::Base,
    ];

    /// Whether an existing file of this kind is overwritten when nothing is configured
    pub fn default_overwrite(self) -> bool {
        defaults::OVERWRITE
            .iter()
            .find(|(kind, _)| *kind == self)
            .map(|(_, overwrite)| *overwrite)
            .unwrap_or(false)
    }

    /// Relative subdirectory used when nothing is configured
    pub fn default_directory(self) -> &'static str {
        defaults::DIRECTORIES
            .iter()
            .find(|(kind, _)| *kind == self)
            .map(|(_, dir)| *dir)
            .unwrap_or("")
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ArtifactKind::Class => "class",
            ArtifactKind::Interface => "interface",
            ArtifactKind::Factory => "factory",
            ArtifactKind::Base => "base",
            ArtifactKind::Custom => "custom",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//! File system access used by the generator

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{CodegenError, Result};

/// The file operations generation needs
pub trait FileSystem {
    fn exists(&self, path: &Path) -> bool;

    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Write `content` to `path`, creating parent directories as needed
    fn write(&self, path: &Path, content: &str) -> Result<()>;
}

/// The real disk
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskFileSystem;

impl FileSystem for DiskFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|e| CodegenError::file("read", path, e))
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| CodegenError::file("create directory", parent, e))?;
        }
        fs::write(path, content).map_err(|e| CodegenError::file("write", path, e))
    }
}

/// Reads from disk but only reports the writes
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunFileSystem;

impl FileSystem for DryRunFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        DiskFileSystem.read_to_string(path)
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        info!("Dry run: would write {} ({} bytes)", path.display(), content.len());
        Ok(())
    }
}

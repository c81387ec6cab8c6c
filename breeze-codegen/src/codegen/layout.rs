//! Where each kind of artifact lives, on disk and in the namespace tree

use std::path::{Path, PathBuf};

use crate::config::{ArtifactKind, CodegenConfig, Directories};

/// Directory and namespace of every artifact kind.
///
/// A kind's subdirectory is relative to the output directory and extends the
/// root namespace segment by segment: `Interfaces/Store` under `App\Api`
/// holds classes of the `App\Api\Interfaces\Store` namespace.
#[derive(Debug, Clone)]
pub struct ArtifactLayout {
    output_dir: PathBuf,
    namespace: String,
    directories: Directories,
}

impl ArtifactLayout {
    pub fn new(output_dir: impl Into<PathBuf>, namespace: impl Into<String>, directories: Directories) -> Self {
        Self {
            output_dir: output_dir.into(),
            namespace: namespace.into(),
            directories,
        }
    }

    pub fn from_config(config: &CodegenConfig) -> Self {
        Self::new(
            config.output_dir.clone(),
            config.namespace.clone(),
            config.directories.clone(),
        )
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn segments(&self, kind: ArtifactKind) -> impl Iterator<Item = &str> {
        self.directories
            .for_kind(kind)
            .split('/')
            .filter(|segment| !segment.is_empty())
    }

    /// Directory holding the files of `kind`
    pub fn dir(&self, kind: ArtifactKind) -> PathBuf {
        self.segments(kind)
            .fold(self.output_dir.clone(), |dir, segment| dir.join(segment))
    }

    /// Namespace of the classes of `kind`
    pub fn namespace(&self, kind: ArtifactKind) -> String {
        std::iter::once(self.namespace.as_str())
            .chain(self.segments(kind))
            .collect::<Vec<_>>()
            .join("\\")
    }

    /// File of the class `class_name` of `kind`
    pub fn path(&self, kind: ArtifactKind, class_name: &str) -> PathBuf {
        self.dir(kind).join(format!("{}.php", class_name))
    }

    /// Fully qualified name of the class `class_name` of `kind`
    pub fn qualified(&self, kind: ArtifactKind, class_name: &str) -> String {
        format!("{}\\{}", self.namespace(kind), class_name)
    }

    /// The `use` line an artifact of kind `from` needs to refer to
    /// `class_name` of kind `target`; none when they share a namespace
    pub fn import_for(&self, from: ArtifactKind, target: ArtifactKind, class_name: &str) -> Option<String> {
        if self.namespace(from) == self.namespace(target) {
            None
        } else {
            Some(format!("use {};", self.qualified(target, class_name)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> ArtifactLayout {
        let directories = Directories {
            interfaces: "Interfaces".to_string(),
            custom: "Custom/Store".to_string(),
            ..Directories::default()
        };
        ArtifactLayout::new("/out", "App\\Api", directories)
    }

    #[test]
    fn test_dir_and_path() {
        let layout = layout();
        assert_eq!(layout.dir(ArtifactKind::Class), PathBuf::from("/out"));
        assert_eq!(
            layout.path(ArtifactKind::Interface, "UserObjectInterface"),
            PathBuf::from("/out/Interfaces/UserObjectInterface.php")
        );
        assert_eq!(
            layout.path(ArtifactKind::Custom, "CustomUserObject"),
            PathBuf::from("/out/Custom/Store/CustomUserObject.php")
        );
    }

    #[test]
    fn test_namespace_follows_directories() {
        let layout = layout();
        assert_eq!(layout.namespace(ArtifactKind::Class), "App\\Api");
        assert_eq!(layout.namespace(ArtifactKind::Interface), "App\\Api\\Interfaces");
        assert_eq!(layout.namespace(ArtifactKind::Custom), "App\\Api\\Custom\\Store");
        assert_eq!(
            layout.qualified(ArtifactKind::Interface, "UserObjectInterface"),
            "App\\Api\\Interfaces\\UserObjectInterface"
        );
    }

    #[test]
    fn test_import_only_across_namespaces() {
        let layout = layout();
        assert_eq!(layout.import_for(ArtifactKind::Class, ArtifactKind::Base, "BaseObject"), None);
        assert_eq!(
            layout.import_for(ArtifactKind::Class, ArtifactKind::Interface, "UserObjectInterface"),
            Some("use App\\Api\\Interfaces\\UserObjectInterface;".to_string())
        );
    }
}

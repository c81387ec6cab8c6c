//! Micro-permission checks injected into generated methods

use std::fmt;

use super::templates::TemplateId;
use crate::error::{CodegenError, Result};

/// Operation checked by a generated `checkMicroPermission` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionKind {
    Read,
    Update,
    Delete,
    Create,
}

impl PermissionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PermissionKind::Read => "read",
            PermissionKind::Update => "update",
            PermissionKind::Delete => "delete",
            PermissionKind::Create => "create",
        }
    }
}

impl fmt::Display for PermissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Permission checked by each key method template
const KEY_METHOD_PERMISSIONS: &[(&str, PermissionKind)] = &[
    ("getUserById", PermissionKind::Read),
    ("updateUserById", PermissionKind::Update),
    ("deleteUserById", PermissionKind::Delete),
];

/// Look up the permission checked by a key method template
pub fn permission_for_tag(tag: &str) -> Result<PermissionKind> {
    KEY_METHOD_PERMISSIONS
        .iter()
        .find(|(known, _)| *known == tag)
        .map(|(_, kind)| *kind)
        .ok_or_else(|| {
            CodegenError::ConfigError(format!(
                "no micro-permission is defined for the method template `{}`",
                tag
            ))
        })
}

/// The per-key method families of a data object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMethod {
    Get,
    Update,
    Delete,
}

impl KeyMethod {
    pub const ALL: [KeyMethod; 3] = [KeyMethod::Get, KeyMethod::Update, KeyMethod::Delete];

    /// Name of the method in its class template
    pub fn tag(self) -> &'static str {
        match self {
            KeyMethod::Get => "getUserById",
            KeyMethod::Update => "updateUserById",
            KeyMethod::Delete => "deleteUserById",
        }
    }

    pub fn verb(self) -> &'static str {
        match self {
            KeyMethod::Get => "get",
            KeyMethod::Update => "update",
            KeyMethod::Delete => "delete",
        }
    }

    /// Insertion marker, repeated at the end of each rendered method
    pub fn marker(self) -> &'static str {
        match self {
            KeyMethod::Get => "// getXXX",
            KeyMethod::Update => "// updateXXX",
            KeyMethod::Delete => "// deleteXXX",
        }
    }

    pub fn class_template(self) -> TemplateId {
        match self {
            KeyMethod::Get => TemplateId::GetMethod,
            KeyMethod::Update => TemplateId::UpdateMethod,
            KeyMethod::Delete => TemplateId::DeleteMethod,
        }
    }

    pub fn interface_template(self) -> TemplateId {
        match self {
            KeyMethod::Get => TemplateId::InterfaceGet,
            KeyMethod::Update => TemplateId::InterfaceUpdate,
            KeyMethod::Delete => TemplateId::InterfaceDelete,
        }
    }

    /// Signature placeholder in the interface template: `getXXXById`
    pub fn interface_placeholder(self) -> &'static str {
        match self {
            KeyMethod::Get => "getXXXById",
            KeyMethod::Update => "updateXXXById",
            KeyMethod::Delete => "deleteXXXById",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_method_tags_map_to_crud() {
        assert_eq!(permission_for_tag("getUserById").unwrap(), PermissionKind::Read);
        assert_eq!(permission_for_tag("updateUserById").unwrap(), PermissionKind::Update);
        assert_eq!(permission_for_tag("deleteUserById").unwrap(), PermissionKind::Delete);
    }

    #[test]
    fn test_every_key_method_has_a_permission() {
        for method in KeyMethod::ALL {
            assert!(permission_for_tag(method.tag()).is_ok(), "{:?}", method);
        }
    }

    #[test]
    fn test_unknown_tag_is_a_config_error() {
        let err = permission_for_tag("purgeUserById").unwrap_err();
        assert!(matches!(err, CodegenError::ConfigError(msg) if msg.contains("purgeUserById")));
    }

    #[test]
    fn test_permission_names() {
        assert_eq!(PermissionKind::Create.to_string(), "create");
        assert_eq!(PermissionKind::Read.as_str(), "read");
    }
}

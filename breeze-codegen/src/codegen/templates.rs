//! Template set used by the renderer
//!
//! Templates are valid PHP written for a sample `user` table with an `id`
//! key. The renderer rewrites the sample names with literal replacements,
//! so a replacement template set must keep the same sample names and
//! markers.

use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use super::fs::FileSystem;
use crate::error::Result;

/// Every template the renderer uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateId {
    ObjectClass,
    ObjectInterface,
    Factory,
    ObjectBase,
    GetMethod,
    UpdateMethod,
    DeleteMethod,
    InsertMethod,
    GetAllMethod,
    FactoryMethod,
    InterfaceInsert,
    InterfaceGet,
    InterfaceGetAll,
    InterfaceUpdate,
    InterfaceDelete,
    ContainerProperty,
    SetContainerMethod,
}

impl TemplateId {
    pub const ALL: [TemplateId; 17] = [
        TemplateId::ObjectClass,
        TemplateId::ObjectInterface,
        TemplateId::Factory,
        TemplateId::ObjectBase,
        TemplateId::GetMethod,
        TemplateId::UpdateMethod,
        TemplateId::DeleteMethod,
        TemplateId::InsertMethod,
        TemplateId::GetAllMethod,
        TemplateId::FactoryMethod,
        TemplateId::InterfaceInsert,
        TemplateId::InterfaceGet,
        TemplateId::InterfaceGetAll,
        TemplateId::InterfaceUpdate,
        TemplateId::InterfaceDelete,
        TemplateId::ContainerProperty,
        TemplateId::SetContainerMethod,
    ];

    /// Path of the template relative to a template directory
    pub fn file_name(self) -> &'static str {
        match self {
            TemplateId::ObjectClass => "UserObject.phtml",
            TemplateId::ObjectInterface => "UserObjectInterface.phtml",
            TemplateId::Factory => "MyFactory.phtml",
            TemplateId::ObjectBase => "MyObjectBase.phtml",
            TemplateId::GetMethod => "partials/getUserById.tpl.txt",
            TemplateId::UpdateMethod => "partials/updateUserById.tpl.txt",
            TemplateId::DeleteMethod => "partials/deleteUserById.tpl.txt",
            TemplateId::InsertMethod => "partials/insertUser.tpl.txt",
            TemplateId::GetAllMethod => "partials/getAllIds.tpl.txt",
            TemplateId::FactoryMethod => "partials/getUserObject.tpl.txt",
            TemplateId::InterfaceInsert => "partials/interface/insertXXX.tpl.txt",
            TemplateId::InterfaceGet => "partials/interface/getXXXById.tpl.txt",
            TemplateId::InterfaceGetAll => "partials/interface/getAllXXX.tpl.txt",
            TemplateId::InterfaceUpdate => "partials/interface/updateXXXById.tpl.txt",
            TemplateId::InterfaceDelete => "partials/interface/deleteXXXById.tpl.txt",
            TemplateId::ContainerProperty => "extra/container-property.tpl.txt",
            TemplateId::SetContainerMethod => "extra/set-container.tpl.txt",
        }
    }

    /// The template shipped with the crate
    pub fn builtin(self) -> &'static str {
        match self {
            TemplateId::ObjectClass => include_str!("../../templates/UserObject.phtml"),
            TemplateId::ObjectInterface => {
                include_str!("../../templates/UserObjectInterface.phtml")
            }
            TemplateId::Factory => include_str!("../../templates/MyFactory.phtml"),
            TemplateId::ObjectBase => include_str!("../../templates/MyObjectBase.phtml"),
            TemplateId::GetMethod => include_str!("../../templates/partials/getUserById.tpl.txt"),
            TemplateId::UpdateMethod => {
                include_str!("../../templates/partials/updateUserById.tpl.txt")
            }
            TemplateId::DeleteMethod => {
                include_str!("../../templates/partials/deleteUserById.tpl.txt")
            }
            TemplateId::InsertMethod => include_str!("../../templates/partials/insertUser.tpl.txt"),
            TemplateId::GetAllMethod => include_str!("../../templates/partials/getAllIds.tpl.txt"),
            TemplateId::FactoryMethod => {
                include_str!("../../templates/partials/getUserObject.tpl.txt")
            }
            TemplateId::InterfaceInsert => {
                include_str!("../../templates/partials/interface/insertXXX.tpl.txt")
            }
            TemplateId::InterfaceGet => {
                include_str!("../../templates/partials/interface/getXXXById.tpl.txt")
            }
            TemplateId::InterfaceGetAll => {
                include_str!("../../templates/partials/interface/getAllXXX.tpl.txt")
            }
            TemplateId::InterfaceUpdate => {
                include_str!("../../templates/partials/interface/updateXXXById.tpl.txt")
            }
            TemplateId::InterfaceDelete => {
                include_str!("../../templates/partials/interface/deleteXXXById.tpl.txt")
            }
            TemplateId::ContainerProperty => {
                include_str!("../../templates/extra/container-property.tpl.txt")
            }
            TemplateId::SetContainerMethod => {
                include_str!("../../templates/extra/set-container.tpl.txt")
            }
        }
    }
}

/// Template texts by id
#[derive(Debug, Clone)]
pub struct TemplateStore {
    templates: HashMap<TemplateId, String>,
}

impl TemplateStore {
    /// The templates shipped with the crate
    pub fn builtin() -> Self {
        let templates = TemplateId::ALL
            .iter()
            .map(|id| (*id, id.builtin().to_string()))
            .collect();
        Self { templates }
    }

    /// Templates from `dir`; files missing there fall back to the built-in ones
    pub fn from_dir(dir: &Path, fs: &dyn FileSystem) -> Result<Self> {
        let mut store = Self::builtin();
        for id in TemplateId::ALL {
            let path = dir.join(id.file_name());
            if fs.exists(&path) {
                debug!("Using template {}", path.display());
                store.templates.insert(id, fs.read_to_string(&path)?);
            }
        }
        Ok(store)
    }

    pub fn get(&self, id: TemplateId) -> &str {
        self.templates
            .get(&id)
            .map(String::as_str)
            .unwrap_or_else(|| id.builtin())
    }
}

impl Default for TemplateStore {
    fn default() -> Self {
        Self::builtin()
    }
}

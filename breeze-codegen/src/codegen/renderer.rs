//! Template rendering
//!
//! Every artifact is produced from its template by literal substitution of
//! the sample names (`User`, `user`, `id`) and of the insertion markers
//! (`// getXXX`, `// use`, ...). Method templates end with their own
//! insertion marker, so a method family grows by replacing the marker once
//! per key column set. Markers still present after the last method are
//! removed.

use tracing::debug;

use super::naming::{get_all_method_name, lc_first, pluralize};
use super::permission::{permission_for_tag, KeyMethod, PermissionKind};
use super::templates::{TemplateId, TemplateStore};
use super::variables::{derive_unique_index_variables, derive_variables, VariableBundle};
use crate::config::CodegenConfig;
use crate::error::Result;
use crate::schema::TableDescriptor;

const NAMESPACE_TOKEN: &str = "The\\ObjectNamespace";
const USE_MARKER: &str = "// use\n";
const MICRO_PERMISSION_MARKER: &str = "//microperm";
const INSERT_MARKER: &str = "// insertXXX";
const GET_ALL_MARKER: &str = "// getAllXXX";
const ACCESSORS_MARKER: &str = "// getXXX";
const EXTRA_PROPERTIES_MARKER: &str = "//::extraProperties--definition";
const EXTRA_INSTANTIATION_MARKER: &str = "//::extraProperties--instantiation";
const EXTRA_METHODS_MARKER: &str = "//::extraPublicMethods";
const CONTAINER_IMPORT: &str = "use Ling\\Light\\ServiceContainer\\LightServiceContainerInterface;";
const TABLE_PROPERTY: &str = "$this->table";
const QUOTED_TABLE_PROPERTY: &str = "`$this->table`";

/// Switches that change the rendered code
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Emit a `checkMicroPermission` call at the top of every data method
    pub use_micro_permission: bool,
    /// Return `"0"` rather than `null` as the duplicate key of a table
    /// without auto-incremented column
    pub legacy_insert_key_placeholder: bool,
}

impl RenderOptions {
    pub fn from_config(config: &CodegenConfig) -> Self {
        Self {
            use_micro_permission: config.use_micro_permission,
            legacy_insert_key_placeholder: config.legacy_insert_key_placeholder,
        }
    }
}

/// Names and key variables of one table's data object
#[derive(Debug, Clone)]
pub struct ObjectModel<'a> {
    pub table: &'a TableDescriptor,
    /// `UserGroup`
    pub class_name: String,
    /// `UserGroupObject`
    pub object_class_name: String,
    /// `UserGroupObjectInterface`
    pub interface_name: String,
    /// `userGroup`, the record argument of insert and update
    pub variable: String,
    pub ric: VariableBundle,
    pub unique_indexes: Vec<VariableBundle>,
}

impl<'a> ObjectModel<'a> {
    pub fn new(
        table: &'a TableDescriptor,
        class_name: String,
        class_suffix: &str,
        interface_suffix: &str,
    ) -> Result<Self> {
        let ric = derive_variables(&table.ric, &table.column_types)?;
        let unique_indexes =
            derive_unique_index_variables(&table.unique_indexes, &table.column_types)?;
        let object_class_name = format!("{}{}", class_name, class_suffix);
        let interface_name = format!("{}{}", object_class_name, interface_suffix);
        let variable = lc_first(&class_name);

        Ok(Self {
            table,
            class_name,
            object_class_name,
            interface_name,
            variable,
            ric,
            unique_indexes,
        })
    }

    /// The RIC bundle first, then one per unique index
    pub fn key_bundles(&self) -> impl Iterator<Item = &VariableBundle> {
        std::iter::once(&self.ric).chain(self.unique_indexes.iter())
    }

    /// The column listed by the get-all accessor, when the RIC has a single column
    pub fn get_all_column(&self) -> Option<&str> {
        match self.table.ric.as_slice() {
            [column] => Some(column.as_str()),
            _ => None,
        }
    }
}

/// One `get<ObjectClassName>` method of the factory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactoryAccessor {
    pub object_class_name: String,
    /// Declared return type: the interface, or the override class when one exists
    pub returned_class: String,
    /// Class instantiated by the accessor
    pub instantiated_class: String,
}

/// Renders artifacts from a template set
pub struct Renderer<'a> {
    templates: &'a TemplateStore,
    options: RenderOptions,
}

impl<'a> Renderer<'a> {
    pub fn new(templates: &'a TemplateStore, options: RenderOptions) -> Self {
        Self { templates, options }
    }

    /// The data object class of a table
    pub fn render_object_class(
        &self,
        model: &ObjectModel<'_>,
        namespace: &str,
        base_class: &str,
        imports: &[String],
    ) -> Result<String> {
        debug!("Rendering class {}", model.object_class_name);
        let mut content = substitute(
            self.templates.get(TemplateId::ObjectClass),
            &[
                (NAMESPACE_TOKEN, namespace),
                ("UserObjectInterface", &model.interface_name),
                ("UserObject", &model.object_class_name),
                ("BaseParent", base_class),
                ("theTableName", &model.table.name),
            ],
        );
        content = content.replacen(USE_MARKER, &use_block(imports), 1);
        content = content.replacen(INSERT_MARKER, &self.render_insert(model), 1);

        for method in KeyMethod::ALL {
            for bundle in model.key_bundles() {
                let rendered = self.render_key_method(method, model, bundle)?;
                content = content.replacen(method.marker(), &rendered, 1);
            }
            content = clear_marker(&content, method.marker());
        }

        content = match model.get_all_column() {
            Some(column) => content.replacen(GET_ALL_MARKER, &self.render_get_all(column), 1),
            None => clear_marker(&content, GET_ALL_MARKER),
        };

        Ok(content)
    }

    /// The interface of a table's data object
    pub fn render_interface(&self, model: &ObjectModel<'_>, namespace: &str) -> String {
        debug!("Rendering interface {}", model.interface_name);
        let mut content = substitute(
            self.templates.get(TemplateId::ObjectInterface),
            &[
                (NAMESPACE_TOKEN, namespace),
                ("UserObjectInterface", &model.interface_name),
            ],
        );
        content = content.replacen(INSERT_MARKER, &self.render_interface_insert(model), 1);

        for method in KeyMethod::ALL {
            for bundle in model.key_bundles() {
                let rendered = self.render_interface_key_method(method, model, bundle);
                content = content.replacen(method.marker(), &rendered, 1);
            }
            content = clear_marker(&content, method.marker());
        }

        match model.get_all_column() {
            Some(column) => {
                content.replacen(GET_ALL_MARKER, &self.render_interface_get_all(model, column), 1)
            }
            None => clear_marker(&content, GET_ALL_MARKER),
        }
    }

    /// The factory returning one data object per table
    pub fn render_factory(
        &self,
        namespace: &str,
        class_name: &str,
        accessors: &[FactoryAccessor],
        imports: &[String],
    ) -> String {
        debug!("Rendering factory {} ({} accessors)", class_name, accessors.len());
        let mut content = substitute(
            self.templates.get(TemplateId::Factory),
            &[(NAMESPACE_TOKEN, namespace), ("MyFactory", class_name)],
        );

        let mut imports = imports.to_vec();
        if self.options.use_micro_permission && !imports.iter().any(|i| i == CONTAINER_IMPORT) {
            imports.push(CONTAINER_IMPORT.to_string());
        }
        content = content.replacen(USE_MARKER, &use_block(&imports), 1);

        let methods = accessors
            .iter()
            .map(|accessor| self.render_factory_accessor(accessor))
            .collect::<Vec<_>>();
        content = if methods.is_empty() {
            clear_marker(&content, ACCESSORS_MARKER)
        } else {
            content.replacen(ACCESSORS_MARKER, &methods.join("\n\n    "), 1)
        };

        if self.options.use_micro_permission {
            content = content
                .replacen(
                    EXTRA_PROPERTIES_MARKER,
                    self.templates.get(TemplateId::ContainerProperty).trim_end(),
                    1,
                )
                .replacen(EXTRA_INSTANTIATION_MARKER, "$this->container = null;", 1)
                .replacen(
                    EXTRA_METHODS_MARKER,
                    self.templates.get(TemplateId::SetContainerMethod).trim_end(),
                    1,
                );
        } else {
            for marker in [
                EXTRA_PROPERTIES_MARKER,
                EXTRA_INSTANTIATION_MARKER,
                EXTRA_METHODS_MARKER,
            ] {
                content = clear_marker(&content, marker);
            }
        }

        content
    }

    /// The abstract base every data object extends
    pub fn render_base(&self, namespace: &str, class_name: &str) -> String {
        debug!("Rendering base class {}", class_name);
        substitute(
            self.templates.get(TemplateId::ObjectBase),
            &[
                (NAMESPACE_TOKEN, namespace),
                ("BaseLightUserDatabaseApi", class_name),
            ],
        )
    }

    fn permission_call(&self, kind: PermissionKind) -> String {
        if self.options.use_micro_permission {
            format!("\n        $this->checkMicroPermission(\"{}\");", kind)
        } else {
            String::new()
        }
    }

    fn render_key_method(
        &self,
        method: KeyMethod,
        model: &ObjectModel<'_>,
        bundle: &VariableBundle,
    ) -> Result<String> {
        let permission = if self.options.use_micro_permission {
            self.permission_call(permission_for_tag(method.tag())?)
        } else {
            String::new()
        };
        let array_variable = format!("array ${}", model.variable);
        let variable_argument = format!("${},", model.variable);
        let arguments = format!("({}", bundle.arg_string);

        let content = substitute(
            self.templates.get(method.class_template()),
            &[
                (MICRO_PERMISSION_MARKER, &permission),
                ("User", &model.class_name),
                ("array $user", &array_variable),
                ("$user,", &variable_argument),
                ("`user`", QUOTED_TABLE_PROPERTY),
                ("\"user\"", TABLE_PROPERTY),
                ("ById", &bundle.by_string),
                ("(int $id", &arguments),
                ("id=:id", &bundle.marker_string),
                ("id=$id", &bundle.variable_string),
            ],
        );
        let content = replace_lines(&content, "\"id\" => $id,", &bundle.marker_lines);
        Ok(content.trim_end().to_string())
    }

    fn render_insert(&self, model: &ObjectModel<'_>) -> String {
        let table = model.table;
        let permission = self.permission_call(PermissionKind::Create);
        let variable = format!("${}", model.variable);

        let mut fetched_columns = table.ric.clone();
        if let Some(aik) = &table.auto_increment_column {
            if !fetched_columns.contains(aik) {
                fetched_columns.push(aik.clone());
            }
        }
        let fetched = fetched_columns.join(", ");

        let duplicate_return = match &table.auto_increment_column {
            Some(aik) => format!("return $res['{}'];", aik),
            None if self.options.legacy_insert_key_placeholder => "return \"0\";".to_string(),
            None => "return null;".to_string(),
        };

        let content = substitute(
            self.templates.get(TemplateId::InsertMethod),
            &[
                (MICRO_PERMISSION_MARKER, &permission),
                ("User", &model.class_name),
                ("$user", &variable),
                ("\"user\"", TABLE_PROPERTY),
                ("`user`", QUOTED_TABLE_PROPERTY),
                ("$implodedRicAndAik", &fetched),
                ("return $res['id'];", &duplicate_return),
            ],
        );

        let inserted_ric = table
            .ric
            .iter()
            .map(|column| {
                if table.auto_increment_column.as_deref() == Some(column.as_str()) {
                    format!("'{}' => $lastInsertId,", column)
                } else {
                    format!("'{}' => {}[\"{}\"],", column, variable, column)
                }
            })
            .collect::<Vec<_>>();
        let existing_ric = table
            .ric
            .iter()
            .map(|column| format!("\"{}\" => $res['{}'],", column, column))
            .collect::<Vec<_>>();

        let content = replace_lines(&content, "'id' => $lastInsertId,", &inserted_ric);
        let content = replace_lines(&content, "\"id\" => $res['id'],", &existing_ric);
        content.trim_end().to_string()
    }

    fn render_get_all(&self, column: &str) -> String {
        let permission = self.permission_call(PermissionKind::Read);
        let method = get_all_method_name(column);
        let select = format!("select {} from", column);

        substitute(
            self.templates.get(TemplateId::GetAllMethod),
            &[
                (MICRO_PERMISSION_MARKER, &permission),
                ("getAllIds", &method),
                ("`user`", QUOTED_TABLE_PROPERTY),
                ("select id from", &select),
            ],
        )
        .trim_end()
        .to_string()
    }

    fn render_factory_accessor(&self, accessor: &FactoryAccessor) -> String {
        let instantiation = format!("new {}", accessor.instantiated_class);
        let method = format!("get{}", accessor.object_class_name);
        let more_calls = if self.options.use_micro_permission {
            "\n        $o->setContainer($this->container);"
        } else {
            ""
        };

        substitute(
            self.templates.get(TemplateId::FactoryMethod),
            &[
                ("UserObjectInterface", &accessor.returned_class),
                ("new UserObject", &instantiation),
                ("//moreCalls", more_calls),
                ("getUserObject", &method),
            ],
        )
        .trim_end()
        .to_string()
    }

    fn render_interface_insert(&self, model: &ObjectModel<'_>) -> String {
        let method = format!("insert{}", model.class_name);
        substitute(
            self.templates.get(TemplateId::InterfaceInsert),
            &[("user", &model.variable), ("insertXXX", &method)],
        )
        .trim_end()
        .to_string()
    }

    fn render_interface_key_method(
        &self,
        method: KeyMethod,
        model: &ObjectModel<'_>,
        bundle: &VariableBundle,
    ) -> String {
        let name = format!("{}{}{}", method.verb(), model.class_name, bundle.by_string);
        let arguments = format!("({}", bundle.arg_string);

        let content = substitute(
            self.templates.get(method.interface_template()),
            &[
                ("user", &model.variable),
                ("by the given id", &bundle.by_the_given_string),
                (method.interface_placeholder(), &name),
                ("(int $id", &arguments),
            ],
        );
        replace_lines(&content, "* @param int $id", &bundle.param_declarations)
            .trim_end()
            .to_string()
    }

    fn render_interface_get_all(&self, model: &ObjectModel<'_>, column: &str) -> String {
        let description = format!("all {} {}", model.variable, pluralize(column));
        let signature = format!("{}(", get_all_method_name(column));

        substitute(
            self.templates.get(TemplateId::InterfaceGetAll),
            &[("all user ids", &description), ("getAll(", &signature)],
        )
        .trim_end()
        .to_string()
    }
}

/// Replace every pattern in a single left to right pass.
///
/// At each position the first matching pattern wins and the scan resumes
/// after it, so substituted text is never matched again.
fn substitute(content: &str, replacements: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(content.len());
    let mut rest = content;

    'scan: while !rest.is_empty() {
        for (from, to) in replacements {
            if !from.is_empty() && rest.starts_with(from) {
                out.push_str(to);
                rest = &rest[from.len()..];
                continue 'scan;
            }
        }
        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            out.push(c);
        }
        rest = chars.as_str();
    }

    out
}

/// Replace each line consisting of `token` with `lines`, keeping its indentation
fn replace_lines(content: &str, token: &str, lines: &[String]) -> String {
    let mut out: Vec<String> = Vec::new();
    for line in content.split('\n') {
        if line.trim() == token {
            let indent = &line[..line.len() - line.trim_start().len()];
            out.extend(lines.iter().map(|l| format!("{}{}", indent, l)));
        } else {
            out.push(line.to_string());
        }
    }
    out.join("\n")
}

/// Remove the lines holding `marker`, with the blank line above each
fn clear_marker(content: &str, marker: &str) -> String {
    let mut out: Vec<&str> = Vec::new();
    for line in content.split('\n') {
        if line.trim() == marker {
            if out.last().is_some_and(|previous| previous.trim().is_empty()) {
                out.pop();
            }
            continue;
        }
        out.push(line);
    }
    out.join("\n")
}

fn use_block(imports: &[String]) -> String {
    imports.iter().map(|line| format!("{}\n", line)).collect()
}

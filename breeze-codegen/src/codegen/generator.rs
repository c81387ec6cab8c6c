//! Generation run: schema in, PHP files out

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::fs::FileSystem;
use super::layout::ArtifactLayout;
use super::naming::class_name_from_table;
use super::renderer::{FactoryAccessor, ObjectModel, RenderOptions, Renderer};
use super::templates::TemplateStore;
use crate::config::{ArtifactKind, CodegenConfig};
use crate::error::Result;
use crate::schema::SchemaSource;

/// What happened to one artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    /// The file existed and its kind is not overwritten
    KeptExisting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub kind: ArtifactKind,
    pub path: PathBuf,
    /// Source table; `None` for the factory and the base
    pub table: Option<String>,
    pub outcome: WriteOutcome,
}

/// Every artifact of a run, in the order they were handled
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub files: Vec<GeneratedFile>,
}

impl GenerationReport {
    pub fn written(&self) -> impl Iterator<Item = &GeneratedFile> {
        self.files
            .iter()
            .filter(|file| file.outcome == WriteOutcome::Written)
    }

    pub fn kept(&self) -> impl Iterator<Item = &GeneratedFile> {
        self.files
            .iter()
            .filter(|file| file.outcome == WriteOutcome::KeptExisting)
    }

    /// The entry for `path`, if the run handled it
    pub fn file(&self, path: &Path) -> Option<&GeneratedFile> {
        self.files.iter().find(|file| file.path == path)
    }
}

/// Generates the data objects, interfaces, factory and base of a schema
pub struct Generator<'a> {
    config: &'a CodegenConfig,
    source: &'a dyn SchemaSource,
    fs: &'a dyn FileSystem,
}

impl<'a> Generator<'a> {
    pub fn new(config: &'a CodegenConfig, source: &'a dyn SchemaSource, fs: &'a dyn FileSystem) -> Self {
        Self { config, source, fs }
    }

    /// Run the generation.
    ///
    /// Stops at the first error; files written before it stay on disk.
    pub fn generate(&self) -> Result<GenerationReport> {
        let layout = ArtifactLayout::from_config(self.config);
        info!("Generating PHP classes in {}", layout.output_dir().display());

        let tables = self.source.describe_tables(&self.config.table_selection)?;
        info!("Found {} tables", tables.len());

        let templates = self.load_templates()?;
        let renderer = Renderer::new(&templates, RenderOptions::from_config(self.config));
        let mut report = GenerationReport::default();
        let mut accessors = Vec::with_capacity(tables.len());
        let mut factory_imports = Vec::new();

        for table in &tables {
            let class_name = class_name_from_table(&table.name, self.config.stripped_prefix());
            let model = ObjectModel::new(
                table,
                class_name,
                &self.config.class_suffix,
                &self.config.interface_suffix,
            )?;
            info!("Table {} -> {}", table.name, model.object_class_name);

            let class_imports = [
                layout.import_for(ArtifactKind::Class, ArtifactKind::Base, &self.config.base_class_name),
                layout.import_for(ArtifactKind::Class, ArtifactKind::Interface, &model.interface_name),
            ]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>();
            let class = renderer.render_object_class(
                &model,
                &layout.namespace(ArtifactKind::Class),
                &self.config.base_class_name,
                &class_imports,
            )?;
            self.write(
                &mut report,
                ArtifactKind::Class,
                layout.path(ArtifactKind::Class, &model.object_class_name),
                &class,
                Some(&table.name),
            )?;

            let interface =
                renderer.render_interface(&model, &layout.namespace(ArtifactKind::Interface));
            self.write(
                &mut report,
                ArtifactKind::Interface,
                layout.path(ArtifactKind::Interface, &model.interface_name),
                &interface,
                Some(&table.name),
            )?;

            accessors.push(self.factory_accessor(&layout, &model, &mut factory_imports));
        }

        let factory = renderer.render_factory(
            &layout.namespace(ArtifactKind::Factory),
            &self.config.factory_class_name,
            &accessors,
            &factory_imports,
        );
        self.write(
            &mut report,
            ArtifactKind::Factory,
            layout.path(ArtifactKind::Factory, &self.config.factory_class_name),
            &factory,
            None,
        )?;

        let base = renderer.render_base(
            &layout.namespace(ArtifactKind::Base),
            &self.config.base_class_name,
        );
        self.write(
            &mut report,
            ArtifactKind::Base,
            layout.path(ArtifactKind::Base, &self.config.base_class_name),
            &base,
            None,
        )?;

        info!(
            "Code generation complete: {} written, {} kept",
            report.written().count(),
            report.kept().count()
        );
        Ok(report)
    }

    fn load_templates(&self) -> Result<TemplateStore> {
        match &self.config.template_dir {
            Some(dir) => {
                info!("Loading templates from {}", dir.display());
                TemplateStore::from_dir(dir, self.fs)
            }
            None => Ok(TemplateStore::builtin()),
        }
    }

    /// The factory accessor of a table, preferring a hand-written override class
    fn factory_accessor(
        &self,
        layout: &ArtifactLayout,
        model: &ObjectModel<'_>,
        imports: &mut Vec<String>,
    ) -> FactoryAccessor {
        let custom_class = format!("{}{}", self.config.custom_class_prefix, model.object_class_name);
        let custom_path = layout.path(ArtifactKind::Custom, &custom_class);

        let mut add_import = |import: Option<String>| {
            if let Some(import) = import {
                if !imports.contains(&import) {
                    imports.push(import);
                }
            }
        };

        if self.fs.exists(&custom_path) {
            debug!("Override class found: {}", custom_path.display());
            add_import(layout.import_for(ArtifactKind::Factory, ArtifactKind::Custom, &custom_class));
            FactoryAccessor {
                object_class_name: model.object_class_name.clone(),
                returned_class: custom_class.clone(),
                instantiated_class: custom_class,
            }
        } else {
            add_import(layout.import_for(
                ArtifactKind::Factory,
                ArtifactKind::Interface,
                &model.interface_name,
            ));
            add_import(layout.import_for(
                ArtifactKind::Factory,
                ArtifactKind::Class,
                &model.object_class_name,
            ));
            FactoryAccessor {
                object_class_name: model.object_class_name.clone(),
                returned_class: model.interface_name.clone(),
                instantiated_class: model.object_class_name.clone(),
            }
        }
    }

    fn write(
        &self,
        report: &mut GenerationReport,
        kind: ArtifactKind,
        path: PathBuf,
        content: &str,
        table: Option<&str>,
    ) -> Result<()> {
        let outcome = if self.fs.exists(&path) && !self.config.overwrite.for_kind(kind) {
            debug!("Keeping existing {} {}", kind, path.display());
            WriteOutcome::KeptExisting
        } else {
            debug!("Writing {} {}", kind, path.display());
            self.fs.write(&path, content)?;
            WriteOutcome::Written
        };

        report.files.push(GeneratedFile {
            kind,
            path,
            table: table.map(str::to_string),
            outcome,
        });
        Ok(())
    }
}

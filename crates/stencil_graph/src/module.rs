//! Modules: a named set of root entities rendered into one header and one or
//! more source files.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use stencil_foundation::{EngineConfig, Error, ErrorContext, Result};
use tracing::debug;

use crate::entity::{Entity, EntityId};
use crate::graph::EntityGraph;
use crate::render::Renderer;
use crate::scheduler::{Schedule, Scheduler};

/// First line of every generated file.
pub const BANNER: &str = concat!(
    "/* Automatically generated by Stencil ",
    env!("CARGO_PKG_VERSION"),
    " */\n"
);

// =============================================================================
// Module
// =============================================================================

/// A unit of output: a graph of entities plus the roots that select what is
/// emitted.
#[derive(Debug)]
pub struct Module {
    name: String,
    graph: EntityGraph,
    roots: Vec<EntityId>,
    config: EngineConfig,
}

impl Module {
    /// Creates an empty module.
    #[must_use]
    pub fn new(name: impl Into<String>, config: EngineConfig) -> Self {
        Self {
            name: name.into(),
            graph: EntityGraph::new(),
            roots: Vec::new(),
            config,
        }
    }

    /// Module name, used as the file name stem.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Engine configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The entity graph.
    #[must_use]
    pub fn graph(&self) -> &EntityGraph {
        &self.graph
    }

    /// Mutable access to the entity graph for registration.
    pub fn graph_mut(&mut self) -> &mut EntityGraph {
        &mut self.graph
    }

    /// Root entities.
    #[must_use]
    pub fn roots(&self) -> &[EntityId] {
        &self.roots
    }

    /// Registers an entity and marks it as a root.
    ///
    /// # Errors
    /// Returns `Frozen` if the module has already been rendered.
    pub fn add(&mut self, entity: Entity) -> Result<EntityId> {
        let id = self.graph.register(entity)?;
        self.add_root(id);
        Ok(id)
    }

    /// Marks a registered entity as a root.
    pub fn add_root(&mut self, id: EntityId) {
        if !self.roots.contains(&id) {
            self.roots.push(id);
        }
    }

    /// Name of the interface file.
    #[must_use]
    pub fn header_name(&self) -> String {
        format!("{}_auto.h", self.name)
    }

    /// Name of the `index`-th (1-based) of `count` source files.
    #[must_use]
    pub fn source_name(&self, index: usize, count: usize) -> String {
        if count < 2 {
            format!("{}_auto.c", self.name)
        } else {
            format!("{}_auto{index}.c", self.name)
        }
    }

    fn guard(&self) -> String {
        format!("{}_AUTO_H", self.name.to_uppercase())
    }

    /// Freezes the graph, schedules it and renders every file.
    ///
    /// # Errors
    /// Returns configuration errors from validation or scheduling.
    #[tracing::instrument(level = "debug", skip_all, fields(module = %self.name))]
    pub fn render(&mut self, renderer: &dyn Renderer) -> Result<RenderedModule> {
        let context = || ErrorContext::new().with_module(&self.name);
        self.config
            .validate()
            .map_err(|e| e.with_context(context()))?;
        self.graph.freeze();

        let schedule = Scheduler::new(self.config.partitions)
            .schedule(&self.graph, &self.roots, |e| renderer.size(e))
            .map_err(|e| e.with_context(context()))?;

        let header = self.render_header(&schedule, renderer);
        let count = schedule.partitions().len();
        let sources = schedule
            .partitions()
            .iter()
            .map(|partition| {
                let mut references = BTreeSet::new();
                for id in &partition.entities {
                    references.extend(self.graph.total_references(*id));
                }
                let mut contents = String::from(BANNER);
                contents.push_str(&format!("#include \"{}\"\n", self.header_name()));
                for id in schedule.sorted(&references) {
                    if let Some(entity) = self.graph.get(id) {
                        renderer.forward_declarations(entity, &mut contents);
                    }
                }
                for id in &partition.entities {
                    if let Some(entity) = self.graph.get(*id) {
                        renderer.implementation(entity, &mut contents);
                    }
                }
                RenderedFile {
                    name: self.source_name(partition.index, count),
                    contents,
                }
            })
            .collect();

        debug!(entities = schedule.order().len(), sources = count, "module rendered");
        Ok(RenderedModule {
            header,
            sources,
            schedule,
        })
    }

    fn render_header(&self, schedule: &Schedule, renderer: &dyn Renderer) -> RenderedFile {
        let guard = self.guard();
        let mut contents = String::from(BANNER);
        contents.push_str(&format!("#ifndef {guard}\n#define {guard}\n"));
        for id in schedule.order() {
            if let Some(entity) = self.graph.get(*id) {
                renderer.interface(entity, &mut contents);
            }
        }
        contents.push_str("#endif\n");
        RenderedFile {
            name: self.header_name(),
            contents,
        }
    }
}

// =============================================================================
// Rendered output
// =============================================================================

/// One generated file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedFile {
    /// File name relative to the output directory.
    pub name: String,
    /// Full file contents.
    pub contents: String,
}

/// All files of a rendered module.
#[derive(Clone, Debug)]
pub struct RenderedModule {
    /// The interface file.
    pub header: RenderedFile,
    /// Source files, one per partition.
    pub sources: Vec<RenderedFile>,
    /// The schedule the files were rendered from.
    pub schedule: Schedule,
}

impl RenderedModule {
    /// Header first, then sources in partition order.
    pub fn files(&self) -> impl Iterator<Item = &RenderedFile> {
        std::iter::once(&self.header).chain(&self.sources)
    }

    /// Writes every file into `dir`, leaving files whose contents are
    /// already identical untouched. Returns the paths actually written.
    ///
    /// # Errors
    /// Returns `Io` if a file cannot be read or written.
    pub fn write_to(&self, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        let mut written = Vec::new();
        for file in self.files() {
            let path = dir.join(&file.name);
            match fs::read_to_string(&path) {
                Ok(existing) if existing == file.contents => {
                    debug!(path = %path.display(), "unchanged, skipped");
                    continue;
                }
                Ok(_) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(Error::from(e)),
            }
            fs::write(&path, &file.contents)?;
            debug!(path = %path.display(), bytes = file.contents.len(), "written");
            written.push(path);
        }
        Ok(written)
    }
}

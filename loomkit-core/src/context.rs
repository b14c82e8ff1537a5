//! The shared handle plugins receive, bundling the Ref Resolver,
//! Identifier Service, File Registry, the read-only IR, and the run
//! configuration behind cooperative-scheduling-friendly shared
//! ownership.
//!
//! Scheduling is single-threaded and cooperative: at most one plugin
//! callback runs at a time, so `atomic_refcell::AtomicRefCell` (a
//! `RefCell` that also implements `Sync`, without a mutex's cost) is
//! enough to let every plugin closure hold a clone of the same handle
//! without fighting the borrow checker over `'static` closures stored
//! in the [`crate::events::EventBus`].
//!
//! `subscribe`/`broadcast` are deliberately not duplicated onto
//! `Context`: [`crate::orchestrator::run`] already threads the single
//! [`crate::events::EventBus`] explicitly into
//! [`crate::plugin::Plugin::handler`] alongside `Context`, so a
//! plugin-facing handle never carries a duplicate path to state it
//! already receives as a sibling parameter.

use std::rc::Rc;

use atomic_refcell::{AtomicRef, AtomicRefCell, AtomicRefMut};

use crate::config::{Config, PluginConfig};
use crate::error::LoomError;
use crate::files::FileRegistry;
use crate::identifier::IdentifierService;
use crate::ir::{ComponentEntry, IrModel};
use crate::spec::{Document, RefOr, RefOrSchema, Schema};
use loomkit_pointer::JsonPointee;

/// Shared across every plugin instance for the duration of one run.
///
/// Built once parsing and the transform pass have finished: the IR
/// is read-only for the rest of the run, which is exactly the point
/// at which plugins, and therefore `Context`, start existing.
#[derive(Clone)]
pub struct Context {
    doc: Rc<Document>,
    ir: Rc<IrModel>,
    config: Rc<Config>,
    identifiers: Rc<AtomicRefCell<IdentifierService>>,
    files: Rc<AtomicRefCell<FileRegistry>>,
}

impl Context {
    pub fn new(doc: Document, ir: IrModel, config: Config, output_root: impl Into<std::path::PathBuf>) -> Self {
        Self {
            doc: Rc::new(doc),
            ir: Rc::new(ir),
            config: Rc::new(config),
            identifiers: Rc::new(AtomicRefCell::new(IdentifierService::new())),
            files: Rc::new(AtomicRefCell::new(FileRegistry::new(output_root))),
        }
    }

    /// The raw spec document, for ref resolution beyond what's
    /// already folded into the IR.
    pub fn doc(&self) -> &Document {
        &self.doc
    }

    /// The read-only, post-transform IR every plugin consumes.
    pub fn ir(&self) -> &IrModel {
        &self.ir
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The plugin registry: a given plugin's declared
    /// `dependencies`/`options`, looked up by name.
    pub fn plugin_config(&self, name: &str) -> Option<&PluginConfig> {
        self.config.plugins.get(name)
    }

    pub fn identifiers(&self) -> AtomicRef<'_, IdentifierService> {
        self.identifiers.borrow()
    }

    pub fn identifiers_mut(&self) -> AtomicRefMut<'_, IdentifierService> {
        self.identifiers.borrow_mut()
    }

    pub fn files(&self) -> AtomicRef<'_, FileRegistry> {
        self.files.borrow()
    }

    pub fn files_mut(&self) -> AtomicRefMut<'_, FileRegistry> {
        self.files.borrow_mut()
    }

    /// Resolves a `$ref` against the raw spec document, for
    /// plugins that need a node the IR doesn't carry verbatim (e.g. a
    /// `SecurityScheme`'s raw fields).
    pub fn resolve_ref<T: JsonPointee>(&self, ref_: &crate::spec::ComponentRef) -> Result<&T, LoomError> {
        self.doc
            .resolve(ref_.pointer().clone())
            .map_err(|cause| LoomError::RefNotFound { pointer: ref_.as_str(), cause: Some(cause) })?
            .downcast_ref::<T>()
            .ok_or_else(|| LoomError::RefNotFound { pointer: ref_.as_str(), cause: None })
    }

    /// Resolves a `$ref` against the IR's own component map, the
    /// IR-level counterpart to `resolve_ref` for plugins that only
    /// ever want to look at already-normalized components.
    pub fn resolve_ir_ref(&self, ref_: &str) -> Option<&ComponentEntry> {
        self.ir.components.get(ref_)
    }

    /// Dereferences a schema-or-`$ref` site to the schema it actually
    /// denotes.
    ///
    /// A site that holds both a `$ref` and sibling keywords alongside
    /// it would call for merging the referent into the holder and
    /// stripping `$ref`. This crate's [`RefOr`] is
    /// `#[serde(untagged)]` over exactly one of `{ $ref }` or the
    /// inline schema, so a `$ref` site can never carry sibling
    /// keywords in the first place; dereferencing simply returns the
    /// referent.
    pub fn dereference<'a>(&'a self, schema_or_ref: &'a RefOrSchema) -> &'a Schema {
        match schema_or_ref {
            RefOr::Other(schema) => schema,
            RefOr::Ref(r) => self
                .doc
                .resolve(r.path.pointer().clone())
                .ok()
                .and_then(|p| p.downcast_ref::<Schema>())
                .unwrap_or_else(empty_schema),
        }
    }
}

fn empty_schema() -> &'static Schema {
    static EMPTY: std::sync::OnceLock<Schema> = std::sync::OnceLock::new();
    EMPTY.get_or_init(Schema::default)
}

//! The file registry: owns emitted files, their declarations and
//! imports, resolved against the configured output root.

use indexmap::{IndexMap, IndexSet};
use std::path::{Path, PathBuf};

use crate::diagnostics::Diagnostics;
use crate::error::LoomError;
use crate::identifier::IdentifierCase;

/// A file emitted by a plugin: an ordered sequence of top-level
/// declarations, with deduplicated imports at the head.
pub struct GeneratedFile {
    pub id: String,
    pub path: String,
    pub identifier_case: IdentifierCase,
    pub export_from_index: bool,
    nodes: Vec<String>,
    imports: IndexSet<(String, String)>,
}

impl GeneratedFile {
    fn new(id: impl Into<String>, path: impl Into<String>, identifier_case: IdentifierCase, export_from_index: bool) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
            identifier_case,
            export_from_index,
            nodes: Vec::new(),
            imports: IndexSet::new(),
        }
    }

    /// Appends a declaration. Declaration order within a file is the
    /// order nodes were appended.
    pub fn add(&mut self, decl: impl Into<String>) {
        self.nodes.push(decl.into());
    }

    /// Records an import of `symbol` from `module`. Imports are
    /// deduplicated.
    pub fn import(&mut self, module: impl Into<String>, symbol: impl Into<String>) {
        self.imports.insert((module.into(), symbol.into()));
    }

    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    pub fn imports(&self) -> impl Iterator<Item = (&str, &str)> {
        self.imports.iter().map(|(module, symbol)| (module.as_str(), symbol.as_str()))
    }

    fn render(&self) -> String {
        let mut imports_by_module: IndexMap<&str, Vec<&str>> = IndexMap::new();
        for (module, symbol) in &self.imports {
            imports_by_module.entry(module.as_str()).or_default().push(symbol.as_str());
        }
        let mut out = String::new();
        for (module, symbols) in &imports_by_module {
            out.push_str(&format!("use {module}::{{{}}};\n", symbols.join(", ")));
        }
        if !imports_by_module.is_empty() {
            out.push('\n');
        }
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(node);
            out.push('\n');
        }
        out
    }
}

/// Creates and owns [`GeneratedFile`]s, keyed by id, rooted at a
/// configured output directory.
pub struct FileRegistry {
    output_root: PathBuf,
    files: IndexMap<String, GeneratedFile>,
}

impl FileRegistry {
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        Self { output_root: output_root.into(), files: IndexMap::new() }
    }

    /// Creates a file at `relative_path` under the output root.
    /// Duplicate creation with the same id is a programmer error: the
    /// existing file wins, and a warning is emitted rather than
    /// failing the run.
    pub fn create_file(
        &mut self,
        id: impl Into<String>,
        relative_path: impl Into<String>,
        identifier_case: IdentifierCase,
        export_from_index: bool,
        diagnostics: &mut dyn Diagnostics,
    ) -> &mut GeneratedFile {
        let id = id.into();
        if self.files.contains_key(&id) {
            diagnostics.warn(&format!("file `{id}` already created; reusing the existing file"));
        } else {
            self.files
                .insert(id.clone(), GeneratedFile::new(id.clone(), relative_path, identifier_case, export_from_index));
        }
        self.files.get_mut(&id).expect("just inserted or already present")
    }

    pub fn file(&self, id: &str) -> Option<&GeneratedFile> {
        self.files.get(id)
    }

    pub fn file_mut(&mut self, id: &str) -> Option<&mut GeneratedFile> {
        self.files.get_mut(id)
    }

    pub fn files(&self) -> impl Iterator<Item = &GeneratedFile> {
        self.files.values()
    }

    /// Finalizes every registered file by writing it to disk under
    /// the output root, creating parent directories as needed.
    pub fn write_to_disk(&self) -> Result<(), LoomError> {
        for file in self.files.values() {
            let path = self.output_root.join(&file.path);
            write_file(&path, &file.render())?;
        }
        Ok(())
    }
}

fn write_file(path: &Path, contents: &str) -> Result<(), LoomError> {
    let to_emission_error = |cause: std::io::Error| {
        LoomError::Emission(crate::error::EmissionError::Write { path: path.display().to_string(), cause })
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(to_emission_error)?;
    }
    std::fs::write(path, contents).map_err(to_emission_error)?;
    Ok(())
}

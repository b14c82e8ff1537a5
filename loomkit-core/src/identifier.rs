//! The stable `$ref → emitted symbol name` mapping, with case
//! conversion and per-file collision discipline.

use heck::{ToLowerCamelCase, ToPascalCase, ToShoutySnakeCase, ToSnakeCase};
use rustc_hash::FxHashMap;
use unicase::UniCase;

use crate::naming::WordSegments;

/// Case convention applied to a derived base name before it's
/// recorded.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IdentifierCase {
    Camel,
    Pascal,
    Snake,
    ScreamingSnake,
    Preserve,
}

impl IdentifierCase {
    fn apply(self, name: &str) -> String {
        match self {
            IdentifierCase::Camel => name.to_lower_camel_case(),
            IdentifierCase::Pascal => name.to_pascal_case(),
            IdentifierCase::Snake => name.to_snake_case(),
            IdentifierCase::ScreamingSnake => name.to_shouty_snake_case(),
            IdentifierCase::Preserve => name.to_string(),
        }
    }
}

/// A `nameTransformer`: applied to the base name derived from a
/// `$ref`'s last segment before case conversion.
///
/// Modeled as an enum over a boxed closure and a compiled pattern,
/// rather than a runtime type check on a callback value.
pub enum NameTransformer {
    Fn(Box<dyn Fn(&str) -> String>),
    /// A printf-like pattern containing the literal placeholder
    /// `{{name}}`.
    Pattern(String),
}

impl NameTransformer {
    pub fn identity() -> Self {
        NameTransformer::Pattern("{{name}}".to_string())
    }

    fn apply(&self, name: &str) -> String {
        match self {
            NameTransformer::Fn(f) => f(name),
            NameTransformer::Pattern(pattern) => pattern.replace("{{name}}", name),
        }
    }
}

/// Separates colliding names used for distinct purposes, e.g. a
/// runtime schema value versus a static type sharing a base name.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Namespace(String);

impl Namespace {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn value() -> Self {
        Self::new("value")
    }

    pub fn ty() -> Self {
        Self::new("type")
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Identifier {
    pub ref_: String,
    pub namespace: Namespace,
    pub name: String,
    pub created: bool,
}

/// Request record for [`IdentifierService::identifier`].
pub struct IdentifierRequest<'a> {
    pub ref_: &'a str,
    pub namespace: Namespace,
    pub create: bool,
    pub case: IdentifierCase,
    pub name_transformer: &'a NameTransformer,
}

/// Owns the `$ref → name` map, scoped per file.
///
/// Each file gets its own collision table: the same `$ref` emitted
/// into two different files may legitimately produce the same local
/// name in each, since nothing forces cross-file uniqueness.
#[derive(Default)]
pub struct IdentifierService {
    files: FxHashMap<String, FileNames>,
}

#[derive(Default)]
struct FileNames {
    assigned: FxHashMap<(String, Namespace), Identifier>,
    taken: FxHashMap<Namespace, FxHashMap<Vec<UniCase<String>>, usize>>,
}

impl IdentifierService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up or creates the identifier for `request.ref_` within
    /// `file_id`.
    ///
    /// Returns `None` when no mapping exists and `request.create` is
    /// `false`; the caller should treat this as "not yet generated,
    /// inline fallback". Modeled as `Option` rather than an
    /// identifier carrying an empty name.
    pub fn identifier(&mut self, file_id: &str, request: IdentifierRequest<'_>) -> Option<Identifier> {
        let file = self.files.entry(file_id.to_string()).or_default();
        let key = (request.ref_.to_string(), request.namespace.clone());
        if let Some(existing) = file.assigned.get(&key) {
            return Some(Identifier { created: false, ..existing.clone() });
        }
        if !request.create {
            return None;
        }

        let base = last_segment(request.ref_);
        let transformed = request.name_transformer.apply(base);
        let cased = request.case.apply(&transformed);
        let name = uniquify(file.taken.entry(request.namespace.clone()).or_default(), &cased);

        let identifier = Identifier { ref_: request.ref_.to_string(), namespace: request.namespace, name, created: true };
        file.assigned.insert(key, identifier.clone());
        Some(identifier)
    }
}

fn last_segment(ref_: &str) -> &str {
    ref_.rsplit('/').next().unwrap_or(ref_)
}

fn uniquify(table: &mut FxHashMap<Vec<UniCase<String>>, usize>, name: &str) -> String {
    let key: Vec<_> = WordSegments::new(name).map(|s| UniCase::new(s.to_string())).collect();
    match table.entry(key) {
        std::collections::hash_map::Entry::Occupied(mut entry) => {
            let count = entry.get_mut();
            *count += 1;
            format!("{name}{count}")
        }
        std::collections::hash_map::Entry::Vacant(entry) => {
            entry.insert(1);
            name.to_string()
        }
    }
}

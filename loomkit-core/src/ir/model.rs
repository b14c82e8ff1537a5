//! The owned, dialect-independent intermediate representation.
//!
//! Unlike a borrowed, `Document`-lifetime-tied IR, this tree owns its
//! data: the enum-lifting and read/write-split transforms synthesize
//! brand-new components after parsing, which isn't expressible if
//! every node borrows from the original `Spec`. The IR is built once,
//! mutated by transforms, then treated as read-only, so owned nodes
//! suit its lifecycle.

use indexmap::IndexMap;
use serde_json::Value;

use crate::spec::Method;

/// The mutable IR root. Built during dialect parsing, mutated
/// in-place by the transform pass, then treated as read-only by
/// every plugin.
#[derive(Debug, Default)]
pub struct IrModel {
    /// Keyed by canonical `$ref`, e.g. `#/components/schemas/Pet`.
    pub components: IndexMap<String, ComponentEntry>,
    pub paths: IndexMap<String, IndexMap<Method, OperationObject>>,
    pub servers: Vec<ServerObject>,
}

impl IrModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schema(&self, ref_: &str) -> Option<&SchemaObject> {
        match self.components.get(ref_)? {
            ComponentEntry::Schema(schema) => Some(schema),
            _ => None,
        }
    }

    pub fn schema_mut(&mut self, ref_: &str) -> Option<&mut SchemaObject> {
        match self.components.get_mut(ref_)? {
            ComponentEntry::Schema(schema) => Some(schema),
            _ => None,
        }
    }

    pub fn schemas(&self) -> impl Iterator<Item = (&str, &SchemaObject)> {
        self.components.iter().filter_map(|(ref_, entry)| match entry {
            ComponentEntry::Schema(schema) => Some((ref_.as_str(), schema)),
            _ => None,
        })
    }

    pub fn operations(&self) -> impl Iterator<Item = &OperationObject> {
        self.paths.values().flat_map(|methods| methods.values())
    }
}

#[derive(Clone, Debug)]
pub enum ComponentEntry {
    Schema(SchemaObject),
    Parameter(ParameterObject),
    RequestBody(RequestBodyObject),
    SecurityScheme(SecuritySchemeObject),
}

/// A security scheme component. The core preserves it only as a
/// pass-through extension bag, with no vendor-extension
/// interpretation beyond preservation; a plugin that wants to
/// emit auth wiring reads `extensions` for `type`/`scheme`/`flows`
/// itself, same as any other spec-defined keyword this IR doesn't
/// model structurally.
#[derive(Clone, Debug, Default)]
pub struct SecuritySchemeObject {
    pub extensions: IndexMap<String, Value>,
}

#[derive(Clone, Debug)]
pub struct ServerObject {
    pub url: String,
    pub description: Option<String>,
}

/// One HTTP method applied to one path.
#[derive(Clone, Debug)]
pub struct OperationObject {
    pub id: String,
    pub method: Method,
    pub path: String,
    pub description: Option<String>,
    pub summary: Option<String>,
    /// Grouped by location; within a group, keyed by parameter name.
    pub parameters: ParameterGroups,
    pub body: Option<RequestBodyObject>,
    pub responses: IndexMap<String, ResponseObject>,
    pub security: Vec<IndexMap<String, Vec<String>>>,
    pub servers: Vec<ServerObject>,
}

#[derive(Clone, Debug, Default)]
pub struct ParameterGroups {
    pub header: IndexMap<String, ParameterObject>,
    pub path: IndexMap<String, ParameterObject>,
    pub query: IndexMap<String, ParameterObject>,
    pub cookie: IndexMap<String, ParameterObject>,
}

impl ParameterGroups {
    pub fn iter(&self) -> impl Iterator<Item = (ParameterIn, &ParameterObject)> {
        itertools::chain!(
            self.header.values().map(|p| (ParameterIn::Header, p)),
            self.path.values().map(|p| (ParameterIn::Path, p)),
            self.query.values().map(|p| (ParameterIn::Query, p)),
            self.cookie.values().map(|p| (ParameterIn::Cookie, p)),
        )
    }

    /// Merges path-item-level parameters under method-level
    /// parameters, per the merge precedence invariant: on a name
    /// collision within the same group, the method's parameter wins.
    pub fn merge_method_over_path_item(path_item: Self, method: Self) -> Self {
        fn merge_group(
            path_item: IndexMap<String, ParameterObject>,
            method: IndexMap<String, ParameterObject>,
        ) -> IndexMap<String, ParameterObject> {
            let mut merged = path_item;
            for (name, param) in method {
                merged.insert(name, param);
            }
            merged
        }
        Self {
            header: merge_group(path_item.header, method.header),
            path: merge_group(path_item.path, method.path),
            query: merge_group(path_item.query, method.query),
            cookie: merge_group(path_item.cookie, method.cookie),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParameterIn {
    Header,
    Path,
    Query,
    Cookie,
}

#[derive(Clone, Debug)]
pub struct ParameterObject {
    pub name: String,
    pub required: bool,
    pub description: Option<String>,
    pub schema: SchemaObject,
}

#[derive(Clone, Debug)]
pub struct RequestBodyObject {
    pub description: Option<String>,
    pub required: bool,
    /// Keyed by media type, e.g. `application/json`.
    pub content: IndexMap<String, SchemaObject>,
}

#[derive(Clone, Debug)]
pub struct ResponseObject {
    pub description: Option<String>,
    pub content: IndexMap<String, SchemaObject>,
}

/// A schema node: shared metadata plus a kind-specific payload.
#[derive(Clone, Debug)]
pub struct SchemaObject {
    pub kind: SchemaKind,
    pub description: Option<String>,
    pub default: Option<Value>,
    pub access_scope: AccessScope,
}

impl SchemaObject {
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            kind,
            description: None,
            default: None,
            access_scope: AccessScope::Undefined,
        }
    }

    pub fn unknown() -> Self {
        Self::new(SchemaKind::Unknown)
    }

    pub fn is_ref(&self) -> bool {
        matches!(self.kind, SchemaKind::Ref(_))
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AccessScope {
    Read,
    Write,
    Undefined,
}

#[derive(Clone, Debug)]
pub enum SchemaKind {
    String(StringSchema),
    Integer(NumberSchema),
    Number(NumberSchema),
    Boolean(BooleanSchema),
    Null,
    Undefined,
    Unknown,
    Never,
    Void,
    Array(ArraySchema),
    Tuple(TupleSchema),
    Enum(EnumSchema),
    Object(ObjectSchema),
    /// A `type`-less schema with `items` and a `logicalOperator`,
    /// representing a union (`or`) or intersection (`and`).
    Composite(CompositeSchema),
    /// A pointer to another schema, terminating recursion through
    /// the Identifier Service rather than inlining the target.
    Ref(String),
}

#[derive(Clone, Debug, Default)]
pub struct StringSchema {
    pub format: Option<String>,
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
    pub pattern: Option<String>,
    pub constant: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct NumberSchema {
    pub format: Option<NumberFormat>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub exclusive_minimum: bool,
    pub exclusive_maximum: bool,
    pub constant: Option<serde_json::Number>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NumberFormat {
    Int32,
    Int64,
    Float,
    Double,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct BooleanSchema {
    pub constant: Option<bool>,
}

#[derive(Clone, Debug)]
pub struct ArraySchema {
    pub items: Vec<SchemaObject>,
    pub min_items: Option<u64>,
    pub max_items: Option<u64>,
    pub logical_operator: LogicalOperator,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LogicalOperator {
    And,
    Or,
}

#[derive(Clone, Debug)]
pub struct TupleSchema {
    pub items: Vec<SchemaObject>,
    pub constant: Option<Vec<Value>>,
}

#[derive(Clone, Debug)]
pub struct EnumSchema {
    pub variants: Vec<EnumVariant>,
    pub nullable: bool,
}

#[derive(Clone, Debug)]
pub enum EnumVariant {
    String(String),
    Number(serde_json::Number),
    Bool(bool),
}

#[derive(Clone, Debug, Default)]
pub struct ObjectSchema {
    /// Insertion-ordered, per the determinism invariant.
    pub properties: IndexMap<String, SchemaObject>,
    pub required: indexmap::IndexSet<String>,
    pub additional_properties: Option<AdditionalProperties>,
}

#[derive(Clone, Debug)]
pub enum AdditionalProperties {
    Bool(bool),
    Schema(Box<SchemaObject>),
}

#[derive(Clone, Debug)]
pub struct CompositeSchema {
    pub items: Vec<SchemaObject>,
    pub logical_operator: LogicalOperator,
}

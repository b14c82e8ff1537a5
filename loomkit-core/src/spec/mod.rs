//! The raw, dialect-tagged OpenAPI document tree.
//!
//! These types deserialize the document more or less as written, with
//! one exception: the `type` keyword already accepts both a single
//! type name (2.0/3.0) and an array of type names (3.1), and
//! `nullable`/`x-nullable` are both recognized, because otherwise
//! every downstream consumer would have to special-case the dialect
//! at every schema site. Deeper per-dialect normalization (folding
//! `nullable` into a composite-or-with-null shape, collapsing
//! single-member `allOf`, synthesizing a `ServerObject` from
//! `host`/`basePath`/`schemes`) happens in [`crate::dialect`], which
//! walks this tree to build the [`crate::ir`].
//!
//! Kept immutable after [`Document::from_yaml`] returns, per the
//! Spec/IR split: the IR is the only thing any transform mutates.

pub mod path;

use std::str::FromStr;

use indexmap::IndexMap;
use loomkit_pointer::{JsonPointee, JsonPointer};
use serde::{Deserialize, Deserializer};

use crate::error::SerdeError;

/// The dialect of an OpenAPI document, detected from its top-level
/// version key before any typed deserialization is attempted.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Dialect {
    Swagger2,
    OpenApi3_0,
    OpenApi3_1,
}

impl Dialect {
    /// Peeks at a document's `swagger`/`openapi` key without fully
    /// deserializing it, per the detection rule: `swagger: "2.0"`
    /// selects the 2.0 parser; `openapi: "3.0.x"`/`"3.1.x"` selects
    /// the matching 3.x parser. An unrecognized or missing version
    /// key is a [`crate::error::SpecError`].
    pub fn detect(yaml: &str) -> Result<Self, crate::error::SpecError> {
        #[derive(Deserialize)]
        struct VersionProbe {
            swagger: Option<String>,
            openapi: Option<String>,
        }
        let probe: VersionProbe = serde_yaml::from_str(yaml).map_err(|cause| {
            crate::error::SpecError::MalformedRoot {
                reason: cause.to_string(),
            }
        })?;
        match (probe.swagger.as_deref(), probe.openapi.as_deref()) {
            (Some(v), _) if v.starts_with("2.0") => Ok(Dialect::Swagger2),
            (_, Some(v)) if v.starts_with("3.0") => Ok(Dialect::OpenApi3_0),
            (_, Some(v)) if v.starts_with("3.1") => Ok(Dialect::OpenApi3_1),
            (None, None) => Err(crate::error::SpecError::MissingVersion),
            (Some(found), _) | (None, Some(found)) => {
                Err(crate::error::SpecError::UnrecognizedVersion {
                    found: found.to_string(),
                })
            }
        }
    }
}

/// An OpenAPI (or Swagger 2.0) document, dialect-tolerant.
///
/// Fields that only exist in one dialect are `Option`/`default`, so
/// the same struct deserializes all three dialects; [`crate::dialect`]
/// is responsible for knowing which fields a given [`Dialect`]
/// actually populates.
#[derive(Debug, Deserialize, JsonPointee)]
#[serde(rename_all = "camelCase")]
#[loomkit(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub swagger: Option<String>,
    #[serde(default)]
    pub openapi: Option<String>,
    pub info: Info,
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,
    #[serde(default)]
    pub components: Option<Components>,
    /// Swagger 2.0 flat component maps.
    #[serde(default)]
    pub definitions: IndexMap<String, Schema>,
    #[serde(default)]
    pub parameters: IndexMap<String, Parameter>,
    #[serde(default)]
    pub responses: IndexMap<String, Response>,
    #[serde(default)]
    pub security_definitions: IndexMap<String, SecurityScheme>,
    /// Swagger 2.0 server synthesis inputs.
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub base_path: Option<String>,
    #[serde(default)]
    pub schemes: Vec<String>,
    #[serde(default)]
    pub servers: Vec<Server>,
    #[serde(flatten)]
    pub extensions: IndexMap<String, serde_json::Value>,
}

impl Document {
    /// Parses an OpenAPI document from a YAML or JSON string.
    ///
    /// Errors carry the exact field path via `serde_path_to_error`,
    /// so a malformed spec points at the offending key rather than
    /// just "invalid document".
    pub fn from_yaml(yaml: &str) -> Result<Self, SerdeError> {
        let deserializer = serde_yaml::Deserializer::from_str(yaml);
        serde_path_to_error::deserialize(deserializer).map_err(SerdeError::from)
    }
}

#[derive(Clone, Debug, Deserialize, JsonPointee)]
pub struct Info {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
}

#[derive(Clone, Debug, Deserialize, JsonPointee)]
pub struct Server {
    pub url: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Operation definitions for a single path, plus shared parameters
/// that every method on this path inherits (merged, method-wins, by
/// [`crate::dialect`]).
#[derive(Debug, Default, Deserialize, JsonPointee)]
pub struct PathItem {
    #[serde(default)]
    pub parameters: Vec<RefOrParameter>,
    #[serde(default)]
    pub get: Option<Operation>,
    #[serde(default)]
    pub post: Option<Operation>,
    #[serde(default)]
    pub put: Option<Operation>,
    #[serde(default)]
    pub delete: Option<Operation>,
    #[serde(default)]
    pub patch: Option<Operation>,
    #[serde(default)]
    pub head: Option<Operation>,
    #[serde(default)]
    pub options: Option<Operation>,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "get",
            Method::Post => "post",
            Method::Put => "put",
            Method::Delete => "delete",
            Method::Patch => "patch",
            Method::Head => "head",
            Method::Options => "options",
        }
    }
}

impl PathItem {
    /// Returns an iterator over the operations for each HTTP method,
    /// in a fixed, deterministic order.
    pub fn operations(&self) -> impl Iterator<Item = (Method, &Operation)> {
        [
            (Method::Get, self.get.as_ref()),
            (Method::Put, self.put.as_ref()),
            (Method::Post, self.post.as_ref()),
            (Method::Delete, self.delete.as_ref()),
            (Method::Options, self.options.as_ref()),
            (Method::Head, self.head.as_ref()),
            (Method::Patch, self.patch.as_ref()),
        ]
        .into_iter()
        .filter_map(|(method, op)| op.map(|o| (method, o)))
    }
}

/// An HTTP operation. Swagger 2.0's `consumes`/`produces` and
/// `parameters[].in == "body"` are folded into `request_body` and
/// `content` by [`crate::dialect::v2`]; everything downstream only
/// ever sees the 3.x shape.
#[derive(Debug, Deserialize, JsonPointee)]
#[serde(rename_all = "camelCase")]
#[loomkit(rename_all = "camelCase")]
pub struct Operation {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    pub operation_id: Option<String>,
    #[serde(default)]
    pub parameters: Vec<RefOrParameter>,
    #[serde(default)]
    pub request_body: Option<RefOrRequestBody>,
    #[serde(default)]
    pub responses: IndexMap<String, RefOrResponse>,
    #[serde(default)]
    pub servers: Vec<Server>,
    #[serde(default)]
    pub security: Vec<IndexMap<String, Vec<String>>>,
    #[serde(flatten)]
    pub extensions: IndexMap<String, serde_json::Value>,
}

impl Operation {
    pub fn extension<'a, X: FromExtension<'a>>(&'a self, name: &str) -> Option<X> {
        X::from_extension(self.extensions.get(name)?)
    }
}

/// A path, query, header, or cookie parameter (or, pre-normalization
/// in 2.0, a `body`/`formData` parameter).
#[derive(Clone, Debug, Deserialize, JsonPointee)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    #[loomkit(rename = "in")]
    pub location: ParameterLocation,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub schema: Option<RefOrSchema>,
    /// 2.0 inlines the schema's fields directly on the parameter
    /// rather than nesting a `schema` object; [`crate::dialect::v2`]
    /// lifts them into a synthesized schema.
    #[serde(rename = "type", default, deserialize_with = "deserialize_type")]
    #[loomkit(rename = "type")]
    pub ty: Vec<Ty>,
    #[serde(default)]
    pub format: Option<Format>,
    #[serde(default)]
    pub style: Option<ParameterStyle>,
    #[serde(default)]
    pub explode: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonPointee)]
#[serde(rename_all = "lowercase")]
#[loomkit(untagged, rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
    Body,
    #[serde(rename = "formData")]
    #[loomkit(rename = "formData")]
    FormData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonPointee)]
#[serde(rename_all = "camelCase")]
#[loomkit(untagged, rename_all = "camelCase")]
pub enum ParameterStyle {
    Matrix,
    Label,
    Form,
    Simple,
    SpaceDelimited,
    PipeDelimited,
    DeepObject,
}

/// Request body definition (3.x). 2.0's `body` parameter is
/// normalized into one of these by [`crate::dialect::v2`].
#[derive(Clone, Debug, Deserialize, JsonPointee)]
pub struct RequestBody {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub content: IndexMap<String, MediaType>,
}

#[derive(Clone, Debug, Deserialize, JsonPointee)]
pub struct Response {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub content: Option<IndexMap<String, MediaType>>,
    /// 2.0 nests the response schema directly, rather than under a
    /// media-type content map.
    #[serde(default)]
    pub schema: Option<RefOrSchema>,
}

#[derive(Clone, Debug, Deserialize, JsonPointee)]
pub struct MediaType {
    #[serde(default)]
    pub schema: Option<RefOrSchema>,
}

/// Reusable components (3.x `#/components/*`). 2.0's flat
/// `definitions`/`parameters`/`responses` maps populate the
/// corresponding fields here during normalization, so that both
/// dialects funnel through the same `$ref` shape,
/// `#/components/<kind>/<name>`.
#[derive(Debug, Default, Deserialize, JsonPointee)]
#[serde(rename_all = "camelCase")]
#[loomkit(rename_all = "camelCase")]
pub struct Components {
    #[serde(default)]
    pub schemas: IndexMap<String, Schema>,
    #[serde(default)]
    pub responses: IndexMap<String, Response>,
    #[serde(default)]
    pub parameters: IndexMap<String, Parameter>,
    #[serde(default)]
    pub request_bodies: IndexMap<String, RequestBody>,
    #[serde(default)]
    pub security_schemes: IndexMap<String, SecurityScheme>,
}

#[derive(Debug, Deserialize, JsonPointee)]
pub struct SecurityScheme {
    #[serde(flatten)]
    pub extensions: IndexMap<String, serde_json::Value>,
}

/// Either a reference to a component or an inline component
/// definition. Used throughout the parse tree wherever the OpenAPI
/// spec allows a `$ref`, via `#[serde(untagged)]`, mirrored with
/// `#[loomkit(untagged)]` for JSON Pointer traversal.
#[derive(Clone, Debug, Deserialize, JsonPointee)]
#[serde(untagged)]
#[loomkit(untagged)]
pub enum RefOr<T> {
    #[loomkit(skip)]
    Ref(Ref),
    Other(T),
}

pub type RefOrSchema = RefOr<Box<Schema>>;
pub type RefOrParameter = RefOr<Parameter>;
pub type RefOrRequestBody = RefOr<RequestBody>;
pub type RefOrResponse = RefOr<Response>;

#[derive(Debug, Clone, Deserialize)]
pub struct Ref {
    #[serde(rename = "$ref")]
    pub path: ComponentRef,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, JsonPointee)]
#[serde(rename_all = "lowercase")]
#[loomkit(untagged, rename_all = "lowercase")]
pub enum Ty {
    String,
    Integer,
    Number,
    Boolean,
    Array,
    Object,
    Null,
    /// Swagger 2.0's `type: file` parameter shape, normalized to
    /// `string`/`format: binary` by [`crate::dialect::v2`].
    File,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, JsonPointee)]
#[serde(rename_all = "kebab-case")]
#[loomkit(untagged, rename_all = "kebab-case")]
pub enum Format {
    DateTime,
    Date,
    Time,
    Uri,
    Uuid,
    Email,
    Ipv4,
    Ipv6,
    Byte,
    Binary,
    Int32,
    Int64,
    Float,
    Double,
    #[serde(other)]
    Other,
}

#[derive(Clone, Debug, Deserialize, JsonPointee)]
#[serde(untagged)]
#[loomkit(untagged)]
pub enum AdditionalProperties {
    Bool(bool),
    RefOrSchema(RefOrSchema),
}

/// Where a property is readable/writable, per OpenAPI's
/// `readOnly`/`writeOnly`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AccessScope {
    Read,
    Write,
    Undefined,
}

/// A JSON Schema subset, dialect-tolerant:
///
/// - `nullable` (3.0) and the vendor `x-nullable` extension (2.0)
///   both deserialize to the same field; [`crate::dialect`] folds
///   either one into the IR's composite-or-with-null shape.
/// - `ty` already accepts 3.1's `type` array via
///   [`deserialize_type`]; 2.0 and 3.0 just produce a one-element
///   vector.
#[derive(Debug, Clone, Default, Deserialize, JsonPointee)]
#[serde(rename_all = "camelCase")]
#[loomkit(rename_all = "camelCase")]
pub struct Schema {
    #[serde(rename = "type", default, deserialize_with = "deserialize_type")]
    #[loomkit(rename = "type")]
    pub ty: Vec<Ty>,
    #[serde(default)]
    pub format: Option<Format>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub nullable: bool,
    #[serde(rename = "x-nullable", default)]
    #[loomkit(rename = "x-nullable")]
    pub x_nullable: bool,
    #[serde(default)]
    pub read_only: bool,
    #[serde(default)]
    pub write_only: bool,
    #[serde(default)]
    pub default: Option<serde_json::Value>,
    #[serde(rename = "const", default)]
    #[loomkit(rename = "const")]
    pub constant: Option<serde_json::Value>,

    // String constraints.
    #[serde(default)]
    pub min_length: Option<u64>,
    #[serde(default)]
    pub max_length: Option<u64>,
    #[serde(default)]
    pub pattern: Option<String>,

    // Numeric constraints.
    #[serde(default)]
    pub minimum: Option<f64>,
    #[serde(default)]
    pub maximum: Option<f64>,
    #[serde(default)]
    pub exclusive_minimum: Option<ExclusiveBound>,
    #[serde(default)]
    pub exclusive_maximum: Option<ExclusiveBound>,

    // Object properties.
    #[serde(default)]
    pub properties: Option<IndexMap<String, RefOrSchema>>,
    #[serde(default)]
    pub required: Vec<String>,
    #[serde(default)]
    pub additional_properties: Option<AdditionalProperties>,

    // Array/tuple items.
    #[serde(default)]
    pub items: Option<RefOrSchema>,
    #[serde(default)]
    pub prefix_items: Option<Vec<RefOrSchema>>,
    #[serde(default)]
    pub min_items: Option<u64>,
    #[serde(default)]
    pub max_items: Option<u64>,

    // Enum variants.
    #[serde(rename = "enum", default)]
    #[loomkit(rename = "enum")]
    pub variants: Option<Vec<serde_json::Value>>,

    // Composition.
    #[serde(default)]
    pub all_of: Option<Vec<RefOrSchema>>,
    #[serde(default)]
    pub one_of: Option<Vec<RefOrSchema>>,
    #[serde(default)]
    pub any_of: Option<Vec<RefOrSchema>>,
    #[serde(default)]
    pub discriminator: Option<Discriminator>,

    #[serde(flatten)]
    pub extensions: IndexMap<String, serde_json::Value>,
}

impl Schema {
    pub fn extension<'a, X: FromExtension<'a>>(&'a self, name: &str) -> Option<X> {
        X::from_extension(self.extensions.get(name)?)
    }

    /// The fold of `nullable` and `x-nullable` into one flag:
    /// downstream dialect normalization only ever reads this, never
    /// the two fields directly.
    pub fn is_nullable(&self) -> bool {
        self.nullable || self.x_nullable || self.ty.contains(&Ty::Null)
    }

    pub fn access_scope(&self) -> AccessScope {
        match (self.read_only, self.write_only) {
            (true, false) => AccessScope::Read,
            (false, true) => AccessScope::Write,
            _ => AccessScope::Undefined,
        }
    }
}

/// A 3.0/3.1 `exclusiveMinimum`/`exclusiveMaximum`, which is a bool
/// in 3.0 (paired with `minimum`/`maximum`) but a number in 3.1 and
/// JSON Schema proper (standing alone).
#[derive(Clone, Copy, Debug, Deserialize, JsonPointee)]
#[serde(untagged)]
#[loomkit(untagged)]
pub enum ExclusiveBound {
    Flag(bool),
    Value(f64),
}

#[derive(Debug, Clone, Deserialize, JsonPointee)]
#[serde(rename_all = "camelCase")]
#[loomkit(rename_all = "camelCase")]
pub struct Discriminator {
    pub property_name: String,
    #[serde(default)]
    pub mapping: IndexMap<String, ComponentRef>,
}

/// A JSON Pointer reference to a component in the current document.
/// External (cross-document) references are rejected at parse time:
/// the core only resolves same-document pointers.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, JsonPointee)]
pub struct ComponentRef {
    #[loomkit(skip)]
    pointer: JsonPointer<'static>,
}

impl ComponentRef {
    pub fn pointer(&self) -> &JsonPointer<'static> {
        &self.pointer
    }

    /// The component name: the pointer's final segment, unescaped.
    pub fn name(&self) -> &str {
        self.pointer
            .segments()
            .next_back()
            .map(|s| s.as_str())
            .unwrap_or("")
    }

    /// Builds a pointer of the form `#/components/<kind>/<name>`.
    pub fn of_kind(kind: &str, name: &str) -> Self {
        let escaped = name.replace('~', "~0").replace('/', "~1");
        format!("#/components/{kind}/{escaped}")
            .parse()
            .expect("component kind and name always produce a valid pointer")
    }

    pub fn as_str(&self) -> String {
        format!("#{}", self.pointer)
    }
}

impl FromStr for ComponentRef {
    type Err = BadComponentRef;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some(s) = s
            .trim_matches(|c| c <= ' ')
            .strip_prefix('#')
            .map(|rest| &rest[..rest.find(['\t', '\n', '\r']).unwrap_or(rest.len())])
        else {
            return Err(BadComponentRef::NotSameDocument);
        };
        let pointer = JsonPointer::parse_owned(s).map_err(BadComponentRef::Syntax)?;
        Ok(Self { pointer })
    }
}

impl<'de> Deserialize<'de> for ComponentRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct Visitor;
        impl<'de> serde::de::Visitor<'de> for Visitor {
            type Value = ComponentRef;
            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a component reference")
            }
            fn visit_str<E: serde::de::Error>(self, s: &str) -> Result<Self::Value, E> {
                s.parse().map_err(E::custom)
            }
        }
        deserializer.deserialize_str(Visitor)
    }
}

fn deserialize_type<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Ty>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TypesOr {
        /// A 3.1-style `type` array.
        Types(Vec<Ty>),
        Type(Ty),
    }
    Ok(match Option::<TypesOr>::deserialize(deserializer)? {
        Some(TypesOr::Types(types)) => types,
        Some(TypesOr::Type(ty)) => vec![ty],
        None => Vec::new(),
    })
}

#[derive(Debug, thiserror::Error)]
pub enum BadComponentRef {
    #[error("references must start with `#`; external references aren't supported")]
    NotSameDocument,
    #[error("invalid JSON Pointer syntax: {0}")]
    Syntax(#[from] loomkit_pointer::BadJsonPointerSyntax),
}

pub trait FromExtension<'a>: Sized {
    fn from_extension(value: &'a serde_json::Value) -> Option<Self>;
}

impl<'a> FromExtension<'a> for &'a str {
    fn from_extension(value: &'a serde_json::Value) -> Option<&'a str> {
        value.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_schema_ref() {
        let r: ComponentRef = "#/components/schemas/Pet".parse().unwrap();
        assert_eq!(r.name(), "Pet");
    }

    #[test]
    fn reject_external_ref() {
        let err = "other.yaml#/components/schemas/Pet".parse::<ComponentRef>();
        assert!(matches!(err, Err(BadComponentRef::NotSameDocument)));
    }

    #[test]
    fn handle_escaping() {
        let r: ComponentRef = "#/components/schemas/Foo~1Bar".parse().unwrap();
        assert_eq!(r.name(), "Foo/Bar");
    }

    #[test]
    fn of_kind_round_trips_through_name() {
        let r = ComponentRef::of_kind("schemas", "Foo/Bar");
        assert_eq!(r.name(), "Foo/Bar");
    }

    #[test]
    fn detects_swagger_2() {
        assert_eq!(
            Dialect::detect("swagger: '2.0'\ninfo: {}\n").unwrap(),
            Dialect::Swagger2
        );
    }

    #[test]
    fn detects_openapi_3_1() {
        assert_eq!(
            Dialect::detect("openapi: 3.1.0\ninfo: {}\n").unwrap(),
            Dialect::OpenApi3_1
        );
    }

    #[test]
    fn rejects_missing_version() {
        assert!(matches!(
            Dialect::detect("info: {}\n"),
            Err(crate::error::SpecError::MissingVersion)
        ));
    }

    #[test]
    fn type_array_normalizes_to_vec() {
        let schema: Schema = serde_yaml::from_str("type: [string, 'null']\n").unwrap();
        assert_eq!(schema.ty, vec![Ty::String, Ty::Null]);
        assert!(schema.is_nullable());
    }

    #[test]
    fn x_nullable_extension_folds_into_is_nullable() {
        let schema: Schema = serde_yaml::from_str("type: string\nx-nullable: true\n").unwrap();
        assert!(schema.is_nullable());
    }
}

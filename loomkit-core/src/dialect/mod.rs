//! Dialect parsers: walk a [`crate::spec::Document`] and populate the
//! [`IrModel`] via [`EventBus`] broadcasts.
//!
//! All three dialects share one entry point, [`parse`]. Per-dialect
//! differences are folded away in [`normalize`] before the
//! dialect-blind conversion in this module runs, so everything past
//! that point never again asks "which dialect is this".

mod normalize;
mod schema;

use indexmap::{IndexMap, IndexSet};

use crate::diagnostics::Diagnostics;
use crate::error::{LoomError, ParseError};
use crate::events::{EventBus, Payload, Event};
use crate::filter::Filters;
use crate::ir::{
    ComponentEntry, IrModel, OperationObject, ParameterGroups, ParameterObject,
    RequestBodyObject, ResponseObject, ServerObject,
};
use crate::spec::{self, ComponentRef, Dialect, Document, Method, RefOr};

pub use normalize::normalize;
pub use schema::schema_to_ir;

/// Shared state threaded through a single parse run: the operation
/// ids already assigned (for dedup-by-counter) and a strictness flag
/// controlling whether a [`ParseError`] escalates or degrades to
/// `unknown` with a warning.
pub struct ParseState {
    pub operation_ids: IndexSet<String>,
    pub strict: bool,
}

impl ParseState {
    pub fn new(strict: bool) -> Self {
        Self {
            operation_ids: IndexSet::new(),
            strict,
        }
    }

    /// Synthesizes a stable operation id: the declared `operationId`
    /// if present and not yet seen, otherwise `method_pathSegments`
    /// deduplicated with a numeric counter.
    fn next_operation_id(&mut self, declared: Option<&str>, method: Method, path: &str) -> String {
        let candidate = declared.map(str::to_string).unwrap_or_else(|| {
            let slug = path
                .trim_matches('/')
                .replace(['/', '{', '}'], "_")
                .replace("__", "_");
            format!("{}_{slug}", method.as_str())
        });
        if self.operation_ids.insert(candidate.clone()) {
            return candidate;
        }
        let mut counter = 2;
        loop {
            let deduped = format!("{candidate}{counter}");
            if self.operation_ids.insert(deduped.clone()) {
                return deduped;
            }
            counter += 1;
        }
    }
}

/// Parses a dialect-tagged [`Document`] into an [`IrModel`],
/// broadcasting `schema`, `parameter`, `requestBody`, `operation`,
/// and `server` events as it goes.
///
/// Ordering guarantee: component kinds are visited in the fixed
/// order security, parameters, requestBodies, schemas; within a kind,
/// entries are delivered in spec insertion order; paths are visited
/// in input order; methods within a path follow a fixed order.
pub fn parse(
    doc: &Document,
    dialect: Dialect,
    filters: &Filters,
    bus: &mut EventBus,
    diagnostics: &mut dyn Diagnostics,
) -> Result<IrModel, LoomError> {
    let mut ir = IrModel::new();
    let mut state = ParseState::new(false);

    if let Some(components) = &doc.components {
        for (name, scheme) in &components.security_schemes {
            let ref_ = ComponentRef::of_kind("securitySchemes", name).as_str();
            if !filters.accepts(&ref_) {
                continue;
            }
            let scheme_ir = crate::ir::SecuritySchemeObject { extensions: scheme.extensions.clone() };
            ir.components
                .insert(ref_.clone(), ComponentEntry::SecurityScheme(scheme_ir.clone()));
            bus.broadcast(
                &ir,
                Event::SecurityScheme,
                &Payload::SecurityScheme { ref_: &ref_, security_scheme: &scheme_ir },
            )?;
        }
        for (name, parameter) in &components.parameters {
            let ref_ = ComponentRef::of_kind("parameters", name).as_str();
            if !filters.accepts(&ref_) {
                continue;
            }
            let parameter_ir = parameter_to_ir(doc, parameter, &mut state, diagnostics);
            ir.components
                .insert(ref_.clone(), ComponentEntry::Parameter(parameter_ir.clone()));
            bus.broadcast(
                &ir,
                Event::Parameter,
                &Payload::Parameter { ref_: &ref_, parameter: &parameter_ir },
            )?;
        }
        for (name, body) in &components.request_bodies {
            let ref_ = ComponentRef::of_kind("requestBodies", name).as_str();
            if !filters.accepts(&ref_) {
                continue;
            }
            let body_ir = request_body_to_ir(doc, body, &mut state, diagnostics);
            ir.components
                .insert(ref_.clone(), ComponentEntry::RequestBody(body_ir.clone()));
            bus.broadcast(
                &ir,
                Event::RequestBody,
                &Payload::RequestBody { ref_: &ref_, request_body: &body_ir },
            )?;
        }
        for (name, schema) in &components.schemas {
            let ref_ = ComponentRef::of_kind("schemas", name).as_str();
            if !filters.accepts(&ref_) {
                continue;
            }
            let schema_ir = schema_to_ir(doc, schema, diagnostics, state.strict)?;
            ir.components
                .insert(ref_.clone(), ComponentEntry::Schema(schema_ir.clone()));
            bus.broadcast(
                &ir,
                Event::Schema,
                &Payload::Schema { ref_: &ref_, schema: &schema_ir },
            )?;
        }
    }

    for (path, item) in &doc.paths {
        let path_item_params = parameter_groups_from_refs(doc, &item.parameters, &mut state, diagnostics);
        for (method, op) in item.operations() {
            let method_params = parameter_groups_from_refs(doc, &op.parameters, &mut state, diagnostics);
            let parameters =
                ParameterGroups::merge_method_over_path_item(path_item_params.clone(), method_params);

            let id = state.next_operation_id(op.operation_id.as_deref(), method, path);

            let body = op
                .request_body
                .as_ref()
                .and_then(|request_or_ref| resolve_request_body(doc, request_or_ref))
                .map(|body| request_body_to_ir(doc, body, &mut state, diagnostics));

            let mut responses = IndexMap::new();
            for (status, response_or_ref) in &op.responses {
                if let Some(response) = resolve_response(doc, response_or_ref) {
                    responses.insert(status.clone(), response_to_ir(doc, response, &mut state, diagnostics));
                }
            }

            let operation = OperationObject {
                id,
                method,
                path: path.clone(),
                description: op.description.clone(),
                summary: op.summary.clone(),
                parameters,
                body,
                responses,
                security: op.security.clone(),
                servers: op.servers.iter().map(to_server).collect(),
            };

            bus.broadcast(&ir, Event::Operation, &Payload::Operation(&operation))?;
            ir.paths.entry(path.clone()).or_default().insert(method, operation);
        }
    }

    for server in &doc.servers {
        let server_ir = to_server(server);
        bus.broadcast(&ir, Event::Server, &Payload::Server(&server_ir))?;
        ir.servers.push(server_ir);
    }

    let _ = dialect;
    Ok(ir)
}

fn to_server(server: &spec::Server) -> ServerObject {
    ServerObject {
        url: server.url.clone(),
        description: server.description.clone(),
    }
}

fn resolve_request_body<'a>(
    doc: &'a Document,
    request_or_ref: &'a spec::RefOrRequestBody,
) -> Option<&'a spec::RequestBody> {
    match request_or_ref {
        RefOr::Other(rb) => Some(rb),
        RefOr::Ref(r) => doc
            .resolve(r.path.pointer().clone())
            .ok()
            .and_then(|p| p.downcast_ref::<spec::RequestBody>()),
    }
}

fn resolve_response<'a>(
    doc: &'a Document,
    response_or_ref: &'a spec::RefOrResponse,
) -> Option<&'a spec::Response> {
    match response_or_ref {
        RefOr::Other(r) => Some(r),
        RefOr::Ref(r) => doc
            .resolve(r.path.pointer().clone())
            .ok()
            .and_then(|p| p.downcast_ref::<spec::Response>()),
    }
}

fn parameter_to_ir(
    doc: &Document,
    parameter: &spec::Parameter,
    state: &mut ParseState,
    diagnostics: &mut dyn Diagnostics,
) -> ParameterObject {
    let schema = match &parameter.schema {
        Some(schema_or_ref) => ref_or_schema_to_ir(doc, schema_or_ref, state, diagnostics),
        None => schema_to_ir(doc, &parameter_inline_schema(parameter), diagnostics, state.strict)
            .unwrap_or_else(|_| crate::ir::SchemaObject::unknown()),
    };
    ParameterObject {
        name: parameter.name.clone(),
        required: parameter.required,
        description: parameter.description.clone(),
        schema,
    }
}

/// 2.0 inlines a parameter's schema fields directly on the
/// parameter rather than nesting a `schema` object; this lifts them
/// into a synthesized schema so the rest of the pipeline only ever
/// sees `parameter.schema`.
fn parameter_inline_schema(parameter: &spec::Parameter) -> spec::Schema {
    spec::Schema {
        ty: parameter.ty.clone(),
        format: parameter.format,
        ..Default::default()
    }
}

fn ref_or_schema_to_ir(
    doc: &Document,
    schema_or_ref: &spec::RefOrSchema,
    state: &mut ParseState,
    diagnostics: &mut dyn Diagnostics,
) -> crate::ir::SchemaObject {
    match schema_or_ref {
        RefOr::Ref(r) => crate::ir::SchemaObject::new(crate::ir::SchemaKind::Ref(r.path.as_str())),
        RefOr::Other(schema) => {
            schema_to_ir(doc, schema, diagnostics, state.strict).unwrap_or_else(|_| crate::ir::SchemaObject::unknown())
        }
    }
}

fn parameter_groups_from_refs(
    doc: &Document,
    refs: &[spec::RefOrParameter],
    state: &mut ParseState,
    diagnostics: &mut dyn Diagnostics,
) -> ParameterGroups {
    let mut groups = ParameterGroups::default();
    for param_or_ref in refs {
        let Some(param) = (match param_or_ref {
            RefOr::Other(p) => Some(p),
            RefOr::Ref(r) => doc
                .resolve(r.path.pointer().clone())
                .ok()
                .and_then(|p| p.downcast_ref::<spec::Parameter>()),
        }) else {
            continue;
        };
        let info = parameter_to_ir(doc, param, state, diagnostics);
        match param.location {
            spec::ParameterLocation::Path => groups.path.insert(info.name.clone(), info),
            spec::ParameterLocation::Query => groups.query.insert(info.name.clone(), info),
            spec::ParameterLocation::Header => groups.header.insert(info.name.clone(), info),
            spec::ParameterLocation::Cookie => groups.cookie.insert(info.name.clone(), info),
            // Body/formData parameters don't belong to a parameter group;
            // `normalize` folds them into the operation's request body.
            spec::ParameterLocation::Body | spec::ParameterLocation::FormData => None,
        };
    }
    groups
}

fn request_body_to_ir(
    doc: &Document,
    body: &spec::RequestBody,
    state: &mut ParseState,
    diagnostics: &mut dyn Diagnostics,
) -> RequestBodyObject {
    let content = body
        .content
        .iter()
        .filter_map(|(media_type, content)| {
            let schema = content.schema.as_ref()?;
            Some((media_type.clone(), ref_or_schema_to_ir(doc, schema, state, diagnostics)))
        })
        .collect();
    RequestBodyObject {
        description: body.description.clone(),
        required: body.required,
        content,
    }
}

fn response_to_ir(
    doc: &Document,
    response: &spec::Response,
    state: &mut ParseState,
    diagnostics: &mut dyn Diagnostics,
) -> ResponseObject {
    let mut content = IndexMap::new();
    if let Some(schema) = &response.schema {
        // 2.0 nests the schema directly; treat it as the implicit JSON content type.
        content.insert(
            "application/json".to_string(),
            ref_or_schema_to_ir(doc, schema, state, diagnostics),
        );
    }
    for (media_type, media) in response.content.iter().flatten() {
        if let Some(schema) = &media.schema {
            content.insert(media_type.clone(), ref_or_schema_to_ir(doc, schema, state, diagnostics));
        }
    }
    ResponseObject {
        description: response.description.clone(),
        content,
    }
}

/// A convenience for call sites that need to distinguish
/// "normalizable, but this particular shape isn't" from a hard
/// parse failure.
pub fn unsupported_keyword(keyword: &str) -> ParseError {
    ParseError::UnsupportedKeyword { keyword: keyword.into() }
}

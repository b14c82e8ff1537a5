//! Per-dialect structural normalization, run once before
//! [`super::parse`] walks the document.
//!
//! 3.0.x and 3.1.x already share enough raw shape (via
//! [`crate::spec::Schema`]'s dialect-tolerant fields) that no
//! structural rewrite is needed; only 2.0 (Swagger) requires folding
//! its flat component maps, `body` parameters, and
//! `host`/`basePath`/`schemes` triad into the 3.x shape everything
//! downstream expects.

use indexmap::IndexMap;

use crate::spec::{
    Components, Dialect, Document, MediaType, ParameterLocation, RequestBody, Server,
};

pub fn normalize(doc: &mut Document, dialect: Dialect) {
    if dialect == Dialect::Swagger2 {
        normalize_swagger2(doc);
    }
}

fn normalize_swagger2(doc: &mut Document) {
    let components = doc.components.get_or_insert_with(Components::default);
    for (name, schema) in std::mem::take(&mut doc.definitions) {
        components.schemas.insert(name, schema);
    }
    for (name, parameter) in std::mem::take(&mut doc.parameters) {
        components.parameters.insert(name, parameter);
    }
    for (name, response) in std::mem::take(&mut doc.responses) {
        components.responses.insert(name, response);
    }
    for (name, scheme) in std::mem::take(&mut doc.security_definitions) {
        components.security_schemes.insert(name, scheme);
    }

    if doc.servers.is_empty()
        && let Some(host) = &doc.host
    {
        let scheme = doc.schemes.first().map(String::as_str).unwrap_or("https");
        let base_path = doc.base_path.as_deref().unwrap_or("");
        doc.servers.push(Server {
            url: format!("{scheme}://{host}{base_path}"),
            description: None,
        });
    }

    for item in doc.paths.values_mut() {
        for op in [
            &mut item.get,
            &mut item.post,
            &mut item.put,
            &mut item.delete,
            &mut item.patch,
            &mut item.head,
            &mut item.options,
        ]
        .into_iter()
        .flatten()
        {
            lift_body_parameter(op);
        }
    }
}

/// Folds a 2.0 `in: body`/`in: formData` parameter into the
/// operation's `requestBody`, so operation construction only ever
/// reads `request_body`.
fn lift_body_parameter(op: &mut crate::spec::Operation) {
    let mut form_data = IndexMap::new();
    let mut body_schema = None;

    op.parameters.retain(|param_or_ref| {
        let crate::spec::RefOr::Other(param) = param_or_ref else {
            return true;
        };
        match param.location {
            ParameterLocation::Body => {
                body_schema = param.schema.clone();
                false
            }
            ParameterLocation::FormData => {
                if let Some(schema) = &param.schema {
                    form_data.insert(param.name.clone(), schema.clone());
                }
                false
            }
            _ => true,
        }
    });

    if op.request_body.is_some() {
        return;
    }

    if let Some(schema) = body_schema {
        let mut content = IndexMap::new();
        content.insert("application/json".to_string(), MediaType { schema: Some(schema) });
        op.request_body = Some(crate::spec::RefOr::Other(RequestBody {
            description: None,
            required: true,
            content,
        }));
    } else if !form_data.is_empty() {
        let properties: IndexMap<_, _> = form_data.into_iter().collect();
        let schema = crate::spec::Schema {
            ty: vec![crate::spec::Ty::Object],
            properties: Some(properties),
            ..Default::default()
        };
        let mut content = IndexMap::new();
        content.insert(
            "multipart/form-data".to_string(),
            MediaType { schema: Some(crate::spec::RefOr::Other(Box::new(schema))) },
        );
        op.request_body = Some(crate::spec::RefOr::Other(RequestBody {
            description: None,
            required: false,
            content,
        }));
    }
}

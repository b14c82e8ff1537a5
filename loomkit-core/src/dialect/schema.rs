//! Converts a raw [`spec::Schema`] into an [`ir::SchemaObject`].
//!
//! Dispatch mirrors an `or_else`-chained transform: try the most
//! specific shape first, fall through to the next, and land on
//! `unknown` rather than failing outright. A schema that doesn't
//! normalize degrades to `unknown` with a warning unless the
//! strictness flag escalates it to a hard [`ParseError`].

use indexmap::IndexSet;

use crate::diagnostics::Diagnostics;
use crate::error::{LoomError, ParseError};
use crate::ir::{
    AccessScope, AdditionalProperties as IrAdditionalProperties, ArraySchema, BooleanSchema,
    CompositeSchema, EnumSchema, EnumVariant, LogicalOperator, NumberFormat, NumberSchema,
    ObjectSchema, SchemaKind, SchemaObject, StringSchema, TupleSchema,
};
use crate::spec::{AdditionalProperties, Document, Format, RefOr, Schema, Ty};

pub fn schema_to_ir(
    doc: &Document,
    schema: &Schema,
    diagnostics: &mut dyn Diagnostics,
    strict: bool,
) -> Result<SchemaObject, LoomError> {
    let kind = schema_kind(doc, schema, diagnostics, strict)?;
    Ok(SchemaObject {
        kind,
        description: schema.description.clone(),
        default: schema.default.clone(),
        access_scope: match schema.access_scope() {
            crate::spec::AccessScope::Read => AccessScope::Read,
            crate::spec::AccessScope::Write => AccessScope::Write,
            crate::spec::AccessScope::Undefined => AccessScope::Undefined,
        },
    })
}

fn schema_kind(
    doc: &Document,
    schema: &Schema,
    diagnostics: &mut dyn Diagnostics,
    strict: bool,
) -> Result<SchemaKind, LoomError> {
    if let Some(variants) = &schema.variants {
        return Ok(enum_kind(variants, schema.is_nullable()));
    }

    if let Some(all_of) = &schema.all_of {
        // A single member with no siblings collapses to that member;
        // otherwise it's an intersection.
        if all_of.len() == 1 && !has_siblings(schema) {
            return schema_kind(doc, unwrap(doc, &all_of[0]), diagnostics, strict);
        }
        let items = all_of
            .iter()
            .map(|s| schema_to_ir(doc, unwrap(doc, s), diagnostics, strict))
            .collect::<Result<_, _>>()?;
        return Ok(SchemaKind::Composite(CompositeSchema {
            items,
            logical_operator: LogicalOperator::And,
        }));
    }

    if let Some(one_of) = schema.one_of.as_ref().or(schema.any_of.as_ref()) {
        let items = one_of
            .iter()
            .map(|s| schema_to_ir(doc, unwrap(doc, s), diagnostics, strict))
            .collect::<Result<_, _>>()?;
        return Ok(SchemaKind::Composite(CompositeSchema {
            items,
            logical_operator: LogicalOperator::Or,
        }));
    }

    // 3.1 `type` arrays with more than one non-null member normalize
    // to the same composite-or representation as `oneOf`.
    let non_null_types: Vec<_> = schema.ty.iter().copied().filter(|&t| t != Ty::Null).collect();
    if non_null_types.len() > 1 {
        let items = non_null_types
            .iter()
            .map(|&ty| typed_kind(doc, schema, ty, diagnostics, strict).map(|kind| {
                SchemaObject::new(kind)
            }))
            .collect::<Result<_, _>>()?;
        return Ok(SchemaKind::Composite(CompositeSchema {
            items,
            logical_operator: LogicalOperator::Or,
        }));
    }

    match non_null_types.first().copied() {
        Some(ty) => typed_kind(doc, schema, ty, diagnostics, strict),
        None if schema.properties.is_some() => {
            typed_kind(doc, schema, Ty::Object, diagnostics, strict)
        }
        None if schema.items.is_some() || schema.prefix_items.is_some() => {
            typed_kind(doc, schema, Ty::Array, diagnostics, strict)
        }
        None => {
            if strict {
                Err(LoomError::Parse {
                    path: String::new(),
                    cause: ParseError::UnrecognizedShape,
                })
            } else {
                diagnostics.warn("schema has no recognizable shape; emitting `unknown`");
                Ok(SchemaKind::Unknown)
            }
        }
    }
}

fn has_siblings(schema: &Schema) -> bool {
    schema.properties.is_some()
        || schema.one_of.is_some()
        || schema.any_of.is_some()
        || schema.variants.is_some()
        || !schema.ty.iter().any(|&t| t != Ty::Null) && !schema.ty.is_empty()
}

fn unwrap<'a>(doc: &'a Document, schema_or_ref: &'a crate::spec::RefOrSchema) -> &'a Schema {
    match schema_or_ref {
        RefOr::Other(schema) => schema,
        RefOr::Ref(r) => doc
            .resolve(r.path.pointer().clone())
            .ok()
            .and_then(|p| p.downcast_ref::<Schema>())
            .unwrap_or_else(empty_schema),
    }
}

/// A dangling `$ref` degrades to an empty schema (which in turn
/// normalizes to `unknown`) rather than failing the whole run; the
/// ref itself is surfaced separately via `RefNotFound` by callers
/// that need to resolve it directly rather than through this
/// best-effort fallback.
fn empty_schema() -> &'static Schema {
    static EMPTY: std::sync::OnceLock<Schema> = std::sync::OnceLock::new();
    EMPTY.get_or_init(Schema::default)
}

fn typed_kind(
    doc: &Document,
    schema: &Schema,
    ty: Ty,
    diagnostics: &mut dyn Diagnostics,
    strict: bool,
) -> Result<SchemaKind, LoomError> {
    Ok(match ty {
        Ty::String => SchemaKind::String(StringSchema {
            format: schema.format.map(format_name),
            min_length: schema.min_length,
            max_length: schema.max_length,
            pattern: schema.pattern.clone(),
            constant: schema.constant.as_ref().and_then(|v| v.as_str()).map(str::to_string),
        }),
        Ty::Integer | Ty::Number => {
            let format = schema.format.and_then(number_format).or(match ty {
                Ty::Integer => Some(NumberFormat::Int32),
                _ => None,
            });
            let exclusive_minimum = match schema.exclusive_minimum {
                Some(crate::spec::ExclusiveBound::Flag(b)) => b,
                Some(crate::spec::ExclusiveBound::Value(_)) => true,
                None => false,
            };
            let exclusive_maximum = match schema.exclusive_maximum {
                Some(crate::spec::ExclusiveBound::Flag(b)) => b,
                Some(crate::spec::ExclusiveBound::Value(_)) => true,
                None => false,
            };
            let info = NumberSchema {
                format,
                minimum: schema.minimum,
                maximum: schema.maximum,
                exclusive_minimum,
                exclusive_maximum,
                constant: schema.constant.as_ref().and_then(|v| match v {
                    serde_json::Value::Number(n) => Some(n.clone()),
                    _ => None,
                }),
            };
            if ty == Ty::Integer {
                SchemaKind::Integer(info)
            } else {
                SchemaKind::Number(info)
            }
        }
        Ty::Boolean => SchemaKind::Boolean(BooleanSchema {
            constant: schema.constant.as_ref().and_then(|v| v.as_bool()),
        }),
        Ty::Null => SchemaKind::Null,
        Ty::Array => {
            let items = schema
                .prefix_items
                .as_ref()
                .map(|prefix| {
                    prefix
                        .iter()
                        .map(|s| schema_to_ir(doc, unwrap(doc, s), diagnostics, strict))
                        .collect::<Result<Vec<_>, _>>()
                })
                .transpose()?;
            if let Some(items) = items {
                return Ok(SchemaKind::Tuple(TupleSchema {
                    items,
                    constant: schema.constant.as_ref().and_then(|v| v.as_array().cloned()),
                }));
            }
            let items = match &schema.items {
                Some(item) => vec![schema_to_ir(doc, unwrap(doc, item), diagnostics, strict)?],
                None => Vec::new(),
            };
            SchemaKind::Array(ArraySchema {
                items,
                min_items: schema.min_items,
                max_items: schema.max_items,
                logical_operator: LogicalOperator::Or,
            })
        }
        Ty::Object => {
            let mut properties = indexmap::IndexMap::new();
            for (name, prop) in schema.properties.iter().flatten() {
                properties.insert(name.clone(), schema_to_ir(doc, unwrap(doc, prop), diagnostics, strict)?);
            }
            let additional_properties = match &schema.additional_properties {
                Some(AdditionalProperties::Bool(b)) => Some(IrAdditionalProperties::Bool(*b)),
                Some(AdditionalProperties::RefOrSchema(s)) => Some(IrAdditionalProperties::Schema(Box::new(
                    schema_to_ir(doc, unwrap(doc, s), diagnostics, strict)?,
                ))),
                None => None,
            };
            SchemaKind::Object(ObjectSchema {
                properties,
                required: IndexSet::from_iter(schema.required.iter().cloned()),
                additional_properties,
            })
        }
        Ty::File => SchemaKind::String(StringSchema {
            format: Some("binary".to_string()),
            ..Default::default()
        }),
    })
}

fn format_name(format: Format) -> String {
    match format {
        Format::DateTime => "date-time",
        Format::Date => "date",
        Format::Time => "time",
        Format::Uri => "uri",
        Format::Uuid => "uuid",
        Format::Email => "email",
        Format::Ipv4 => "ipv4",
        Format::Ipv6 => "ipv6",
        Format::Byte => "byte",
        Format::Binary => "binary",
        Format::Int32 | Format::Int64 | Format::Float | Format::Double | Format::Other => "",
    }
    .to_string()
}

fn number_format(format: Format) -> Option<NumberFormat> {
    match format {
        Format::Int32 => Some(NumberFormat::Int32),
        Format::Int64 => Some(NumberFormat::Int64),
        Format::Float => Some(NumberFormat::Float),
        Format::Double => Some(NumberFormat::Double),
        _ => None,
    }
}

fn enum_kind(variants: &[serde_json::Value], nullable: bool) -> SchemaKind {
    let mut members = Vec::new();
    let mut nullable = nullable;
    for value in variants {
        match value {
            serde_json::Value::String(s) => members.push(EnumVariant::String(s.clone())),
            serde_json::Value::Number(n) => members.push(EnumVariant::Number(n.clone())),
            serde_json::Value::Bool(b) => members.push(EnumVariant::Bool(*b)),
            serde_json::Value::Null => nullable = true,
            _ => {}
        }
    }
    SchemaKind::Enum(EnumSchema { variants: members, nullable })
}

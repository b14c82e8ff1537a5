//! Two independent, idempotent IR rewrites, each guarded by a config
//! flag. Transforms add components but never remove referenced ones,
//! and never touch the source [`spec::Document`].

use indexmap::IndexMap;

use crate::config::{EnumTransformMode, TransformsConfig};
use crate::diagnostics::Diagnostics;
use crate::identifier::{IdentifierCase, IdentifierService, Namespace, NameTransformer};
use crate::ir::{AccessScope, ComponentEntry, IrModel, SchemaKind, SchemaObject};

const ENUM_SCOPE_FILE: &str = "__loomkit_synthesized_enums__";

/// Runs the configured transforms over `ir` in place.
pub fn apply(
    ir: &mut IrModel,
    config: &TransformsConfig,
    identifiers: &mut IdentifierService,
    diagnostics: &mut dyn Diagnostics,
) {
    if config.enums.enabled && config.enums.mode == EnumTransformMode::Lift {
        lift_enums(ir, identifiers, diagnostics);
    }
    if config.read_write.enabled {
        split_read_write(ir, identifiers, diagnostics);
    }
}

/// Moves every inline `enum` schema reachable from a named component
/// into its own synthesized component, replacing the inline site with
/// a `$ref`. Idempotent: once lifted, a site holds a `Ref`, which this
/// pass never descends into, so a second run finds nothing left to
/// lift.
fn lift_enums(ir: &mut IrModel, identifiers: &mut IdentifierService, diagnostics: &mut dyn Diagnostics) {
    let component_refs: Vec<String> = ir.components.keys().cloned().collect();
    let mut synthesized = Vec::new();

    for ref_ in &component_refs {
        let Some(ComponentEntry::Schema(schema)) = ir.components.get_mut(ref_) else { continue };
        let parent_name = last_segment(ref_);
        walk_and_lift(schema, parent_name, None, identifiers, &mut synthesized);
    }

    for (ref_, schema) in synthesized {
        diagnostics.info(&format!("lifted inline enum to `{ref_}`"));
        ir.components.insert(ref_, ComponentEntry::Schema(schema));
    }
}

fn walk_and_lift(
    schema: &mut SchemaObject,
    parent_name: &str,
    field_hint: Option<&str>,
    identifiers: &mut IdentifierService,
    synthesized: &mut Vec<(String, SchemaObject)>,
) {
    if matches!(schema.kind, SchemaKind::Enum(_)) {
        let base = match field_hint {
            Some(field) => format!("{parent_name}_{field}"),
            None => return, // a component that's already a bare top-level enum needs no lifting
        };
        let transformer = NameTransformer::identity();
        let identifier = identifiers
            .identifier(
                ENUM_SCOPE_FILE,
                crate::identifier::IdentifierRequest {
                    ref_: &base,
                    namespace: Namespace::ty(),
                    create: true,
                    case: IdentifierCase::Pascal,
                    name_transformer: &transformer,
                },
            )
            .expect("create=true always returns Some");
        let new_ref = format!("#/components/schemas/{}", identifier.name);
        let lifted = std::mem::replace(schema, SchemaObject::new(SchemaKind::Ref(new_ref.clone())));
        synthesized.push((new_ref, lifted));
        return;
    }

    match &mut schema.kind {
        SchemaKind::Object(object) => {
            for (name, prop) in object.properties.iter_mut() {
                walk_and_lift(prop, parent_name, Some(name), identifiers, synthesized);
            }
        }
        SchemaKind::Array(array) => {
            for item in &mut array.items {
                walk_and_lift(item, parent_name, field_hint, identifiers, synthesized);
            }
        }
        SchemaKind::Tuple(tuple) => {
            for item in &mut tuple.items {
                walk_and_lift(item, parent_name, field_hint, identifiers, synthesized);
            }
        }
        SchemaKind::Composite(composite) => {
            for item in &mut composite.items {
                walk_and_lift(item, parent_name, field_hint, identifiers, synthesized);
            }
        }
        _ => {}
    }
}

fn last_segment(ref_: &str) -> &str {
    ref_.rsplit('/').next().unwrap_or(ref_)
}

/// For every object schema component with at least one read- or
/// write-scoped property, synthesizes `…Readable`/`…Writable`
/// variants and rewrites request-body/response references to point
/// at the matching variant.
fn split_read_write(ir: &mut IrModel, identifiers: &mut IdentifierService, diagnostics: &mut dyn Diagnostics) {
    let component_refs: Vec<String> = ir.components.keys().cloned().collect();
    let mut variants: IndexMap<String, (String, String)> = IndexMap::new();

    for ref_ in &component_refs {
        let Some(ComponentEntry::Schema(schema)) = ir.components.get(ref_) else { continue };
        let SchemaKind::Object(object) = &schema.kind else { continue };
        let has_scoped_property =
            object.properties.values().any(|p| !matches!(p.access_scope, AccessScope::Undefined));
        if !has_scoped_property {
            continue;
        }

        let name = last_segment(ref_);
        let readable_ref = format!("#/components/schemas/{name}Readable");
        let writable_ref = format!("#/components/schemas/{name}Writable");

        let readable = bifurcate(schema, |scope| !matches!(scope, AccessScope::Write));
        let writable = bifurcate(schema, |scope| !matches!(scope, AccessScope::Read));

        ir.components.insert(readable_ref.clone(), ComponentEntry::Schema(readable));
        ir.components.insert(writable_ref.clone(), ComponentEntry::Schema(writable));
        variants.insert(ref_.clone(), (readable_ref, writable_ref));
        diagnostics.info(&format!("split `{ref_}` into readable/writable variants"));
    }

    for methods in ir.paths.values_mut() {
        for operation in methods.values_mut() {
            if let Some(body) = &mut operation.body {
                for schema in body.content.values_mut() {
                    rewrite_ref(schema, &variants, |(_, writable)| writable.clone());
                }
            }
            for response in operation.responses.values_mut() {
                for schema in response.content.values_mut() {
                    rewrite_ref(schema, &variants, |(readable, _)| readable.clone());
                }
            }
        }
    }

    let _ = identifiers; // naming is fixed (`{Name}Readable`/`{Name}Writable`); no collision service needed here
}

fn bifurcate(schema: &SchemaObject, keep: impl Fn(AccessScope) -> bool) -> SchemaObject {
    let SchemaKind::Object(object) = &schema.kind else {
        return schema.clone();
    };
    let mut kept = object.clone();
    kept.properties.retain(|_, prop| keep(prop.access_scope));
    kept.required.retain(|name| kept.properties.contains_key(name));
    // The variant no longer needs the read/write marker on its kept
    // properties; clearing it keeps a second `split_read_write` pass
    // from treating `UserReadable`/`UserWritable` as having scoped
    // properties of their own and re-splitting them.
    for prop in kept.properties.values_mut() {
        prop.access_scope = AccessScope::Undefined;
    }
    SchemaObject { kind: SchemaKind::Object(kept), ..schema.clone() }
}

fn rewrite_ref(
    schema: &mut SchemaObject,
    variants: &IndexMap<String, (String, String)>,
    pick: impl Fn(&(String, String)) -> String,
) {
    if let SchemaKind::Ref(ref_) = &schema.kind
        && let Some(pair) = variants.get(ref_)
    {
        schema.kind = SchemaKind::Ref(pick(pair));
    }
}

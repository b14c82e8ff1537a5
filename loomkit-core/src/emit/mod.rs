//! The schema emitter: translates an IR `SchemaObject` tree into an
//! expression in a target schema-library vocabulary (root symbol
//! `S`), handling forced decl-before-use recursion and safe expansion
//! of recursive schema graphs.
//!
//! The emitter never writes to the file registry itself; it returns
//! rendered declaration text that a plugin appends via
//! [`crate::files::GeneratedFile::add`], same as any other plugin
//! output.

pub mod cycles;
pub mod expr;

use indexmap::IndexMap;

use crate::diagnostics::Diagnostics;
use crate::files::GeneratedFile;
use crate::identifier::{IdentifierCase, IdentifierRequest, IdentifierService, NameTransformer, Namespace};
use crate::ir::{
    AccessScope, ArraySchema, BooleanSchema, CompositeSchema, EnumSchema, EnumVariant, IrModel, LogicalOperator,
    NumberFormat, NumberSchema, ObjectSchema, OperationObject, ParameterObject, SchemaKind, SchemaObject,
    StringSchema, TupleSchema,
};

use cycles::CycleAnalysis;
use expr::{sanitize_key, Expression, PropertyKey};

/// Emitter-wide configuration plus the precomputed cycle analysis.
/// Built once per run, shared read-only across every [`SchemaEmitter`]
/// call.
pub struct EmitState {
    pub name_case: IdentifierCase,
    pub name_transformer: NameTransformer,
    pub emit_metadata: bool,
    cycles: CycleAnalysis,
}

impl EmitState {
    pub fn new(ir: &IrModel, name_case: IdentifierCase, name_transformer: NameTransformer, emit_metadata: bool) -> Self {
        Self { name_case, name_transformer, emit_metadata, cycles: CycleAnalysis::build(ir) }
    }
}

pub struct SchemaEmitter<'a> {
    ir: &'a IrModel,
    identifiers: &'a mut IdentifierService,
    diagnostics: &'a mut dyn Diagnostics,
}

impl<'a> SchemaEmitter<'a> {
    pub fn new(ir: &'a IrModel, identifiers: &'a mut IdentifierService, diagnostics: &'a mut dyn Diagnostics) -> Self {
        Self { ir, identifiers, diagnostics }
    }

    /// Emits `ref_`'s top-level `const Name = …` declaration into
    /// `file`, forcing emission of any not-yet-created dependency
    /// first so declarations precede their uses. A no-op, returning
    /// the already-assigned name, if `ref_` was already emitted by
    /// an earlier call into this file: every emitted identifier has
    /// exactly one top-level declaration.
    pub fn emit_component(&mut self, file: &mut GeneratedFile, ref_: &str, state: &EmitState) -> Option<String> {
        let schema = match self.ir.schema(ref_) {
            Some(schema) => schema.clone(),
            None => {
                self.diagnostics.warn(&format!("schema `{ref_}` not found; skipping emission"));
                return None;
            }
        };
        Some(self.emit_declaration(file, ref_, &schema, state))
    }

    fn emit_declaration(&mut self, file: &mut GeneratedFile, ref_: &str, schema: &SchemaObject, state: &EmitState) -> String {
        let identifier = self
            .identifiers
            .identifier(
                &file.id,
                IdentifierRequest {
                    ref_,
                    namespace: Namespace::value(),
                    create: true,
                    case: state.name_case,
                    name_transformer: &state.name_transformer,
                },
            )
            .expect("create=true always returns Some");
        if !identifier.created {
            return identifier.name;
        }

        let body = self.emit(file, schema, ref_, false, state);
        let annotation = if state.cycles.is_in_cycle(ref_) {
            Some(if matches!(schema.kind, SchemaKind::Object(_)) { "S.AnyObjectSchema" } else { "S.AnySchema" })
        } else {
            None
        };
        file.add(render_declaration(&identifier.name, &body, annotation));
        identifier.name
    }

    /// The dispatch contract. `owner` names the `$ref` of the
    /// top-level declaration currently being built; it's threaded
    /// through recursive calls purely to let a `$ref` child look up
    /// whether it's that declaration's one cycle-breaking lazy edge.
    /// It carries no other state.
    fn emit(&mut self, file: &mut GeneratedFile, schema: &SchemaObject, owner: &str, optional: bool, state: &EmitState) -> Expression {
        let base = match &schema.kind {
            SchemaKind::Ref(target) => self.emit_ref(file, target, owner, state),
            SchemaKind::String(s) => emit_string(s),
            SchemaKind::Integer(n) => emit_number(n),
            SchemaKind::Number(n) => emit_number(n),
            SchemaKind::Boolean(b) => emit_boolean(b),
            SchemaKind::Null => Expression::call("S.null", vec![]),
            SchemaKind::Undefined => Expression::call("S.undefined", vec![]),
            SchemaKind::Never => Expression::call("S.never", vec![]),
            SchemaKind::Void => Expression::call("S.void", vec![]),
            SchemaKind::Unknown => Expression::call("S.unknown", vec![]),
            SchemaKind::Array(array) => self.emit_array(file, array, owner, state),
            SchemaKind::Tuple(tuple) => self.emit_tuple(file, tuple, owner, state),
            SchemaKind::Enum(e) => emit_enum(e),
            SchemaKind::Object(object) => self.emit_object(file, object, owner, state),
            SchemaKind::Composite(composite) => self.emit_composite(file, composite, owner, state),
        };
        apply_modifiers(base, schema, optional, state)
    }

    fn emit_ref(&mut self, file: &mut GeneratedFile, target_ref: &str, owner: &str, state: &EmitState) -> Expression {
        let existing = self.identifiers.identifier(
            &file.id,
            IdentifierRequest {
                ref_: target_ref,
                namespace: Namespace::value(),
                create: false,
                case: state.name_case,
                name_transformer: &state.name_transformer,
            },
        );
        let name = match existing {
            Some(identifier) => identifier.name,
            None => match self.ir.schema(target_ref) {
                Some(target_schema) => {
                    let target_schema = target_schema.clone();
                    self.emit_declaration(file, target_ref, &target_schema, state)
                }
                None => {
                    self.diagnostics.warn(&format!("dangling reference `{target_ref}`; emitting `unknown`"));
                    return Expression::call("S.unknown", vec![]);
                }
            },
        };
        if state.cycles.is_lazy_edge(owner, target_ref) {
            Expression::Lazy(name)
        } else {
            Expression::Name(name)
        }
    }

    fn emit_array(&mut self, file: &mut GeneratedFile, array: &ArraySchema, owner: &str, state: &EmitState) -> Expression {
        let item = match array.items.len() {
            0 => Expression::call("S.unknown", vec![]),
            1 => self.emit(file, &array.items[0], owner, false, state),
            _ => {
                let items = array.items.iter().map(|item| self.emit(file, item, owner, false, state)).collect();
                Expression::call("S.union", vec![Expression::Array(items)])
            }
        };
        length_modifiers(Expression::call("S.array", vec![item]), array.min_items, array.max_items)
    }

    fn emit_tuple(&mut self, file: &mut GeneratedFile, tuple: &TupleSchema, owner: &str, state: &EmitState) -> Expression {
        if let Some(constant) = &tuple.constant {
            let items = constant.iter().map(Expression::from_json_value).collect();
            return Expression::call("S.tuple", vec![Expression::Array(items)]);
        }
        let items = tuple.items.iter().map(|item| self.emit(file, item, owner, false, state)).collect();
        Expression::call("S.tuple", vec![Expression::Array(items)])
    }

    fn emit_object(&mut self, file: &mut GeneratedFile, object: &ObjectSchema, owner: &str, state: &EmitState) -> Expression {
        let mut props = Vec::with_capacity(object.properties.len());
        for (name, prop) in &object.properties {
            let optional = !object.required.contains(name);
            let value = self.emit(file, prop, owner, optional, state);
            props.push((sanitize_key(name), value));
        }
        // additionalProperties: no catchall refinement is emitted,
        // since the target vocabulary's exact shape for it is unknown.
        Expression::call("S.object", vec![Expression::Object(props)])
    }

    fn emit_composite(&mut self, file: &mut GeneratedFile, composite: &CompositeSchema, owner: &str, state: &EmitState) -> Expression {
        let mut seen = std::collections::HashSet::new();
        let deduped: Vec<&SchemaObject> = composite
            .items
            .iter()
            .filter(|item| seen.insert(composite_item_key(*item)))
            .collect();
        let exprs: Vec<Expression> = deduped.iter().map(|item| self.emit(file, item, owner, false, state)).collect();
        match composite.logical_operator {
            LogicalOperator::And => {
                let all_object = deduped.iter().all(|item| matches!(item.kind, SchemaKind::Object(_) | SchemaKind::Ref(_)));
                if all_object && !exprs.is_empty() {
                    let mut iter = exprs.into_iter();
                    let first = iter.next().expect("checked non-empty above");
                    iter.fold(first, |acc, next| acc.method("and", vec![next]))
                } else {
                    Expression::call("S.intersection", vec![Expression::Array(exprs)])
                }
            }
            LogicalOperator::Or => Expression::call("S.union", vec![Expression::Array(exprs)]),
        }
    }

    /// Synthesizes the per-operation request bundle: `{ body, headers,
    /// path, query }`, each either the parameter group's object schema
    /// or `S.never()` when the group is empty. Cookie parameters have
    /// no slot in this bundle, so they're not represented here.
    pub fn emit_operation_request(&mut self, file: &mut GeneratedFile, operation: &OperationObject, state: &EmitState) -> Expression {
        let owner = operation.id.as_str();
        let body = match &operation.body {
            Some(body) => match body.content.values().next() {
                Some(schema) => self.emit(file, schema, owner, !body.required, state),
                None => Expression::call("S.never", vec![]),
            },
            None => Expression::call("S.never", vec![]),
        };
        let headers = self.emit_parameter_group(file, &operation.parameters.header, owner, state);
        let path = self.emit_parameter_group(file, &operation.parameters.path, owner, state);
        let query = self.emit_parameter_group(file, &operation.parameters.query, owner, state);

        Expression::call(
            "S.object",
            vec![Expression::Object(vec![
                (PropertyKey::Bare("body".into()), body),
                (PropertyKey::Bare("headers".into()), headers),
                (PropertyKey::Bare("path".into()), path),
                (PropertyKey::Bare("query".into()), query),
            ])],
        )
    }

    fn emit_parameter_group(
        &mut self,
        file: &mut GeneratedFile,
        group: &IndexMap<String, ParameterObject>,
        owner: &str,
        state: &EmitState,
    ) -> Expression {
        if group.is_empty() {
            return Expression::call("S.never", vec![]);
        }
        let mut props = Vec::with_capacity(group.len());
        for (name, param) in group {
            let value = self.emit(file, &param.schema, owner, !param.required, state);
            props.push((sanitize_key(name), value));
        }
        let any_required = group.values().any(|p| p.required);
        let expr = Expression::call("S.object", vec![Expression::Object(props)]);
        if any_required {
            expr
        } else {
            expr.method("optional", vec![])
        }
    }
}

fn render_declaration(name: &str, body: &Expression, annotation: Option<&str>) -> String {
    match annotation {
        Some(annotation) => format!("const {name}: {annotation} = {}", body.render()),
        None => format!("const {name} = {}", body.render()),
    }
}

fn emit_string(schema: &StringSchema) -> Expression {
    if let Some(constant) = &schema.constant {
        return Expression::call("S.literal", vec![Expression::string(constant.as_str())]);
    }
    let mut expr = Expression::call("S.string", vec![]);
    if let Some(format) = schema.format.as_deref() {
        expr = match format {
            "date-time" => expr.method("datetime", vec![]),
            "ipv4" | "ipv6" => expr.method("ip", vec![]),
            "uri" => expr.method("url", vec![]),
            "date" => expr.method("date", vec![]),
            "email" => expr.method("email", vec![]),
            "time" => expr.method("time", vec![]),
            "uuid" => expr.method("uuid", vec![]),
            _ => expr,
        };
    }
    expr = length_modifiers(expr, schema.min_length, schema.max_length);
    if let Some(pattern) = &schema.pattern {
        expr = expr.method("regex", vec![Expression::regex(pattern)]);
    }
    expr
}

fn emit_number(schema: &NumberSchema) -> Expression {
    if let Some(constant) = &schema.constant {
        return Expression::call("S.literal", vec![Expression::json_number(constant)]);
    }
    let mut expr = if matches!(schema.format, Some(NumberFormat::Int64)) {
        Expression::call("S.coerce.bigint", vec![])
    } else {
        Expression::call("S.number", vec![])
    };
    if let Some(minimum) = schema.minimum {
        expr = expr.method(if schema.exclusive_minimum { "gt" } else { "gte" }, vec![Expression::float(minimum)]);
    }
    if let Some(maximum) = schema.maximum {
        expr = expr.method(if schema.exclusive_maximum { "lt" } else { "lte" }, vec![Expression::float(maximum)]);
    }
    expr
}

fn emit_boolean(schema: &BooleanSchema) -> Expression {
    match schema.constant {
        Some(value) => Expression::call("S.literal", vec![Expression::bool(value)]),
        None => Expression::call("S.boolean", vec![]),
    }
}

fn emit_enum(schema: &EnumSchema) -> Expression {
    if schema.variants.is_empty() {
        return Expression::call("S.unknown", vec![]);
    }
    let members: Vec<Expression> = schema
        .variants
        .iter()
        .map(|variant| match variant {
            EnumVariant::String(s) => Expression::string(s.as_str()),
            EnumVariant::Number(n) => Expression::json_number(n),
            EnumVariant::Bool(b) => Expression::bool(*b),
        })
        .collect();
    let expr = Expression::call("S.enum", vec![Expression::Array(members)]);
    if schema.nullable {
        expr.method("nullable", vec![])
    } else {
        expr
    }
}

fn length_modifiers(expr: Expression, min: Option<u64>, max: Option<u64>) -> Expression {
    match (min, max) {
        (Some(min), Some(max)) if min == max => expr.method("length", vec![Expression::uint(min)]),
        (min, max) => {
            let mut expr = expr;
            if let Some(min) = min {
                expr = expr.method("min", vec![Expression::uint(min)]);
            }
            if let Some(max) = max {
                expr = expr.method("max", vec![Expression::uint(max)]);
            }
            expr
        }
    }
}

fn apply_modifiers(mut expr: Expression, schema: &SchemaObject, optional: bool, state: &EmitState) -> Expression {
    if schema.access_scope == AccessScope::Read {
        expr = expr.method("readonly", vec![]);
    }
    if optional {
        expr = expr.method("optional", vec![]);
    }
    if let Some(default) = &schema.default {
        let is_bigint = matches!(&schema.kind, SchemaKind::Integer(n) if matches!(n.format, Some(NumberFormat::Int64)));
        let default_expr = if is_bigint {
            Expression::call("BigInt", vec![Expression::from_json_value(default)])
        } else {
            Expression::from_json_value(default)
        };
        expr = expr.method("default", vec![default_expr]);
    }
    if state.emit_metadata
        && let Some(description) = &schema.description
    {
        expr = expr.method("describe", vec![Expression::string(description.as_str())]);
    }
    expr
}

/// A crude structural key for composite-member dedup: `$ref` items
/// compare by pointer, everything else by its `Debug` rendering. Good
/// enough to catch the literal duplicate `oneOf`/`allOf` entries this
/// guards against without requiring `SchemaObject` to implement
/// `PartialEq`.
fn composite_item_key(schema: &SchemaObject) -> String {
    match &schema.kind {
        SchemaKind::Ref(target) => format!("ref:{target}"),
        kind => format!("{kind:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::RecordingDiagnostics;
    use crate::identifier::IdentifierCase;
    use crate::ir::{ComponentEntry, IrModel, ObjectSchema};

    fn new_state(ir: &IrModel) -> EmitState {
        EmitState::new(ir, IdentifierCase::Pascal, NameTransformer::identity(), false)
    }

    // S1: object with an int64 id and a minLength-constrained name.
    #[test]
    fn s1_object_schema_emits_expected_declaration() {
        let mut pet = ObjectSchema::default();
        pet.properties.insert(
            "id".to_string(),
            SchemaObject::new(SchemaKind::Integer(NumberSchema { format: Some(NumberFormat::Int64), ..Default::default() })),
        );
        pet.properties.insert(
            "name".to_string(),
            SchemaObject::new(SchemaKind::String(StringSchema { min_length: Some(1), ..Default::default() })),
        );
        pet.required.insert("id".to_string());

        let mut ir = IrModel::new();
        ir.components.insert(
            "#/components/schemas/Pet".to_string(),
            ComponentEntry::Schema(SchemaObject::new(SchemaKind::Object(pet))),
        );

        let state = new_state(&ir);
        let mut identifiers = IdentifierService::new();
        let mut diagnostics = RecordingDiagnostics::default();
        let mut registry = crate::files::FileRegistry::new("/out");
        registry.create_file("models", "models.rs", IdentifierCase::Pascal, false, &mut diagnostics);
        let file = registry.file_mut("models").unwrap();

        let mut emitter = SchemaEmitter::new(&ir, &mut identifiers, &mut diagnostics);
        emitter.emit_component(file, "#/components/schemas/Pet", &state);

        assert_eq!(
            file.nodes(),
            ["const Pet = S.object({ id: S.coerce.bigint(), name: S.string().min(1).optional() })"]
        );
    }

    // S2: mutually recursive A/B, exactly one lazy edge, both
    // declarations annotated with `S.AnyObjectSchema`.
    #[test]
    fn s2_circular_schemas_emit_both_declarations_once_with_one_lazy_edge() {
        let mut a = ObjectSchema::default();
        a.properties.insert("b".to_string(), SchemaObject::new(SchemaKind::Ref("#/components/schemas/B".to_string())));
        let mut b = ObjectSchema::default();
        b.properties.insert("a".to_string(), SchemaObject::new(SchemaKind::Ref("#/components/schemas/A".to_string())));

        let mut ir = IrModel::new();
        ir.components.insert("#/components/schemas/A".to_string(), ComponentEntry::Schema(SchemaObject::new(SchemaKind::Object(a))));
        ir.components.insert("#/components/schemas/B".to_string(), ComponentEntry::Schema(SchemaObject::new(SchemaKind::Object(b))));

        let state = new_state(&ir);
        let mut identifiers = IdentifierService::new();
        let mut diagnostics = RecordingDiagnostics::default();
        let mut registry = crate::files::FileRegistry::new("/out");
        registry.create_file("models", "models.rs", IdentifierCase::Pascal, false, &mut diagnostics);
        let file = registry.file_mut("models").unwrap();

        let mut emitter = SchemaEmitter::new(&ir, &mut identifiers, &mut diagnostics);
        emitter.emit_component(file, "#/components/schemas/A", &state);
        emitter.emit_component(file, "#/components/schemas/B", &state);

        assert_eq!(file.nodes().len(), 2, "each declaration is emitted exactly once");
        assert!(file.nodes().iter().all(|n| n.contains("S.AnyObjectSchema")));
        let lazy_count = file.nodes().iter().filter(|n| n.contains("S.lazy")).count();
        assert_eq!(lazy_count, 1, "exactly one edge in the cycle uses S.lazy");
    }

    // S5: enum with a null member.
    #[test]
    fn s5_enum_with_null_member_is_nullable() {
        let schema = EnumSchema {
            variants: vec![EnumVariant::String("red".to_string()), EnumVariant::String("green".to_string())],
            nullable: true,
        };
        assert_eq!(emit_enum(&schema).render(), "S.enum(['red','green']).nullable()");
    }

    // S6: operation with no parameters and no body.
    #[test]
    fn s6_empty_operation_emits_all_never_bundle() {
        let ir = IrModel::new();
        let state = new_state(&ir);
        let mut identifiers = IdentifierService::new();
        let mut diagnostics = RecordingDiagnostics::default();
        let mut registry = crate::files::FileRegistry::new("/out");
        registry.create_file("ops", "ops.rs", IdentifierCase::Pascal, false, &mut diagnostics);
        let file = registry.file_mut("ops").unwrap();

        let operation = OperationObject {
            id: "getPets".to_string(),
            method: crate::spec::Method::Get,
            path: "/pets".to_string(),
            description: None,
            summary: None,
            parameters: Default::default(),
            body: None,
            responses: Default::default(),
            security: Vec::new(),
            servers: Vec::new(),
        };

        let mut emitter = SchemaEmitter::new(&ir, &mut identifiers, &mut diagnostics);
        let expr = emitter.emit_operation_request(file, &operation, &state);

        assert_eq!(
            expr.render(),
            "S.object({ body: S.never(), headers: S.never(), path: S.never(), query: S.never() })"
        );
    }
}

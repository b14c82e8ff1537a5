//! The intermediate representation: dialect-independent, mutated in
//! place by the transform pass, then read-only once plugins run.

mod model;

pub use model::{
    AccessScope, AdditionalProperties, ArraySchema, BooleanSchema, ComponentEntry,
    CompositeSchema, EnumSchema, EnumVariant, IrModel, LogicalOperator, NumberFormat,
    NumberSchema, ObjectSchema, OperationObject, ParameterGroups, ParameterIn, ParameterObject,
    RequestBodyObject, ResponseObject, SchemaKind, SchemaObject, SecuritySchemeObject, ServerObject,
    StringSchema, TupleSchema,
};

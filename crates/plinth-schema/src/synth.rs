//! Default-value synthesis.
//!
//! Derives a concrete example value for any shape node so authoring tools
//! and the catalog export have a usable default without hand-written
//! fixtures. Synthesis never fails: unresolvable or cyclic references
//! degrade to `null` rather than erroring or looping.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::shape::{Shape, ShapeKind};

/// How many lazy indirections synthesis will follow before giving up.
///
/// One hop is enough to show the shape of a self-referential node; deeper
/// expansion would only terminate if a cycle-breaking default exists, and
/// defaults already win before any expansion happens.
const MAX_LAZY_HOPS: usize = 1;

/// Synthesize an example value for `shape`.
///
/// Rules, in order:
/// - a node-level default always wins;
/// - nullable nodes without a default synthesize `null`;
/// - objects synthesize each field, omitting optional fields that have no
///   default of their own;
/// - arrays synthesize an empty sequence;
/// - enums pick the first declared variant, unions the first shape;
/// - lazy references expand their definition at most once -- a nested
///   reference, or a name missing from `definitions`, yields `null`.
#[must_use]
pub fn synthesize(shape: &Shape, definitions: &BTreeMap<String, Shape>) -> Value {
    expand(shape, definitions, 0)
}

fn expand(shape: &Shape, definitions: &BTreeMap<String, Shape>, lazy_hops: usize) -> Value {
    if let Some(default) = &shape.default {
        return default.clone();
    }
    if shape.nullable {
        return Value::Null;
    }

    match &shape.kind {
        ShapeKind::String => Value::String(String::new()),
        ShapeKind::Number | ShapeKind::Integer => Value::from(0),
        ShapeKind::Bool => Value::Bool(false),
        ShapeKind::Object(fields) => {
            let mut object = Map::new();
            for field in fields {
                if field.optional && field.shape.default.is_none() {
                    continue;
                }
                object.insert(
                    field.name.clone(),
                    expand(&field.shape, definitions, lazy_hops),
                );
            }
            Value::Object(object)
        }
        ShapeKind::Array(_) => Value::Array(Vec::new()),
        ShapeKind::Enum(variants) => variants
            .first()
            .map_or(Value::Null, |variant| Value::String(variant.clone())),
        ShapeKind::Union(variants) => variants
            .first()
            .map_or(Value::Null, |variant| expand(variant, definitions, lazy_hops)),
        ShapeKind::Lazy(name) => {
            if lazy_hops >= MAX_LAZY_HOPS {
                return Value::Null;
            }
            definitions.get(name).map_or_else(
                || {
                    tracing::warn!(name, "lazy reference to undefined shape");
                    Value::Null
                },
                |definition| expand(definition, definitions, lazy_hops + 1),
            )
        }
    }
}

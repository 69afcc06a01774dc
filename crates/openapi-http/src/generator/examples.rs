//! Example value synthesis.
//!
//! Turns a schema into one representative value. Rules are applied in order and the
//! first match wins, regardless of the declared type:
//!
//! 1. an explicit `example`
//! 2. a `default`
//! 3. the first `enum` value
//! 4. a type-based value (see [`ExampleSynthesizer::synthesize`])
//!
//! Composed schemas (`allOf`/`oneOf`/`anyOf`) are not interpreted.

use oas3::{
  Spec,
  spec::{ObjectOrReference, ObjectSchema, Schema},
};
use serde_json::{Map, Value, json};

use crate::utils::{SchemaExt, schema_ext::SchemaKind};

pub const EXAMPLE_DATE: &str = "2024-01-01";
pub const EXAMPLE_DATE_TIME: &str = "2024-01-01T00:00:00Z";
pub const EXAMPLE_EMAIL: &str = "user@example.com";
pub const EXAMPLE_STRING: &str = "string";

/// Produces deterministic example values from schemas of one document.
///
/// `$ref`s are resolved against the document. A reference that is already being
/// expanded further up the current branch is treated as unresolved, which keeps
/// self-referential schemas finite.
#[derive(Debug, Clone, Copy)]
pub struct ExampleSynthesizer<'a> {
  spec: &'a Spec,
}

impl<'a> ExampleSynthesizer<'a> {
  #[must_use]
  pub const fn new(spec: &'a Spec) -> Self {
    Self { spec }
  }

  /// Synthesizes a value for an inline schema.
  ///
  /// Type-based values:
  /// - `string`: fixed literals for `date`, `date-time` and `email`, otherwise `"string"`
  /// - `integer`: the minimum truncated to an integer, otherwise `0`
  /// - `number`: the minimum as declared, otherwise `0.0`
  /// - `boolean`: `false`
  /// - `array`: one synthesized item, or `[]` without an item schema
  /// - `object`: every resolvable property; `{"key": "value"}` when that leaves the
  ///   object empty and additional properties are allowed
  ///
  /// Returns `None` for untyped (or `null`-typed) schemas without properties.
  #[must_use]
  pub fn synthesize(&self, schema: &ObjectSchema) -> Option<Value> {
    self.synthesize_with(schema, &mut Vec::new())
  }

  /// Synthesizes a value for an inline or referenced schema.
  ///
  /// Returns `None` when the reference cannot be resolved.
  #[must_use]
  pub fn synthesize_ref(&self, schema_ref: &ObjectOrReference<ObjectSchema>) -> Option<Value> {
    self
      .with_resolved(schema_ref, &mut Vec::new(), |this, schema, trail| {
        this.synthesize_with(schema, trail)
      })
      .flatten()
  }

  fn synthesize_with(&self, schema: &ObjectSchema, trail: &mut Vec<String>) -> Option<Value> {
    if let Some(example) = &schema.example {
      return Some(example.clone());
    }
    if let Some(default) = &schema.default {
      return Some(default.clone());
    }
    if let Some(first) = schema.enum_values.first() {
      return Some(first.clone());
    }

    match schema.primary_kind() {
      SchemaKind::String => Some(Self::string_example(schema)),
      SchemaKind::Integer => Some(Self::integer_example(schema)),
      SchemaKind::Number => Some(schema.minimum.clone().map_or_else(|| json!(0.0), Value::Number)),
      SchemaKind::Boolean => Some(Value::Bool(false)),
      SchemaKind::Array => Some(self.array_example(schema, trail)),
      SchemaKind::Object => Some(self.object_example(schema, trail)),
      SchemaKind::Null | SchemaKind::Untyped => {
        if schema.properties.is_empty() {
          None
        } else {
          Some(self.object_example(schema, trail))
        }
      }
    }
  }

  fn string_example(schema: &ObjectSchema) -> Value {
    let literal = match schema.known_string_format() {
      Some("date") => EXAMPLE_DATE,
      Some("date-time") => EXAMPLE_DATE_TIME,
      Some("email") => EXAMPLE_EMAIL,
      _ => EXAMPLE_STRING,
    };
    Value::String(literal.to_string())
  }

  #[allow(clippy::cast_possible_truncation)]
  fn integer_example(schema: &ObjectSchema) -> Value {
    match schema.minimum_f64() {
      Some(minimum) => json!(minimum.trunc() as i64),
      None => json!(0),
    }
  }

  fn array_example(&self, schema: &ObjectSchema, trail: &mut Vec<String>) -> Value {
    let item = match schema.items.as_deref() {
      Some(Schema::Object(item_ref)) => self.with_resolved(item_ref, trail, |this, item, trail| {
        this.synthesize_with(item, trail).unwrap_or(Value::Null)
      }),
      Some(Schema::Boolean(_)) | None => None,
    };
    Value::Array(item.into_iter().collect())
  }

  fn object_example(&self, schema: &ObjectSchema, trail: &mut Vec<String>) -> Value {
    let mut object = Map::new();
    for (name, property_ref) in &schema.properties {
      let value = self.with_resolved(property_ref, trail, |this, property, trail| {
        this.synthesize_with(property, trail).unwrap_or(Value::Null)
      });
      if let Some(value) = value {
        object.insert(name.clone(), value);
      }
    }

    if object.is_empty() && schema.allows_additional_properties() {
      object.insert("key".to_string(), Value::String("value".to_string()));
    }

    Value::Object(object)
  }

  /// Runs `f` on the resolved schema, tracking `$ref`s on the current branch.
  ///
  /// Returns `None` for dangling references and for references already on the trail.
  fn with_resolved<R>(
    &self,
    schema_ref: &ObjectOrReference<ObjectSchema>,
    trail: &mut Vec<String>,
    f: impl FnOnce(&Self, &ObjectSchema, &mut Vec<String>) -> R,
  ) -> Option<R> {
    match schema_ref {
      ObjectOrReference::Object(schema) => Some(f(self, schema, trail)),
      ObjectOrReference::Ref { ref_path, .. } => {
        if trail.contains(ref_path) {
          return None;
        }
        let schema = schema_ref.resolve(self.spec).ok()?;
        trail.push(ref_path.clone());
        let result = f(self, &schema, trail);
        trail.pop();
        Some(result)
      }
    }
  }
}

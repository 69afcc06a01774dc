use oas3::spec::{ObjectSchema, Schema, SchemaType, SchemaTypeSet};
use strum::Display;

/// The primitive shape that drives example synthesis for a schema.
///
/// A schema may declare several types (e.g. `["string", "null"]`); only the first
/// one found in [`SchemaKind::PRIORITY`] order governs synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum SchemaKind {
  String,
  Integer,
  Number,
  Boolean,
  Array,
  Object,
  Null,
  Untyped,
}

impl SchemaKind {
  /// Type detection order. `Untyped` is the fallback when nothing matches.
  pub const PRIORITY: [(SchemaType, Self); 7] = [
    (SchemaType::String, Self::String),
    (SchemaType::Integer, Self::Integer),
    (SchemaType::Number, Self::Number),
    (SchemaType::Boolean, Self::Boolean),
    (SchemaType::Array, Self::Array),
    (SchemaType::Object, Self::Object),
    (SchemaType::Null, Self::Null),
  ];
}

/// Extension methods for `ObjectSchema` used while synthesizing example values.
pub(crate) trait SchemaExt {
  /// Returns true if the schema's type set includes the given type.
  fn declares_type(&self, schema_type: SchemaType) -> bool;

  /// Returns the governing [`SchemaKind`] for synthesis.
  fn primary_kind(&self) -> SchemaKind;

  /// Returns true if `additionalProperties` is `true` or a schema.
  fn allows_additional_properties(&self) -> bool;

  /// Returns the declared `minimum` as a float, if any.
  fn minimum_f64(&self) -> Option<f64>;

  /// Returns the declared `format` when it is one of the formats with a fixed example.
  fn known_string_format(&self) -> Option<&str>;
}

impl SchemaExt for ObjectSchema {
  fn declares_type(&self, schema_type: SchemaType) -> bool {
    match &self.schema_type {
      Some(SchemaTypeSet::Single(t)) => *t == schema_type,
      Some(SchemaTypeSet::Multiple(types)) => types.contains(&schema_type),
      None => false,
    }
  }

  fn primary_kind(&self) -> SchemaKind {
    SchemaKind::PRIORITY
      .iter()
      .find(|(schema_type, _)| self.declares_type(*schema_type))
      .map_or(SchemaKind::Untyped, |(_, kind)| *kind)
  }

  fn allows_additional_properties(&self) -> bool {
    match &self.additional_properties {
      Some(Schema::Boolean(b)) => b.0,
      Some(Schema::Object(_)) => true,
      None => false,
    }
  }

  fn minimum_f64(&self) -> Option<f64> {
    self.minimum.as_ref().and_then(serde_json::Number::as_f64)
  }

  fn known_string_format(&self) -> Option<&str> {
    self
      .format
      .as_deref()
      .filter(|format| matches!(*format, "date" | "date-time" | "email"))
  }
}

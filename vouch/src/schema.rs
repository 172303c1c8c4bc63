//! Static argument schemas for tools.
//!
//! Each tool declares an [`InputSchema`] once, at registration time. The
//! schema is a fixed mapping from field name to one of six validator
//! variants ([`FieldType`]); no per-call validator construction and no
//! dynamic typed-record generation. The same schema renders the JSON-schema
//! object sent to the model provider.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// The fixed set of argument validator variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// A JSON string.
    String,
    /// A JSON number with an integral value.
    Integer,
    /// Any JSON number.
    Float,
    /// A JSON boolean.
    Boolean,
    /// A JSON array.
    List,
    /// A JSON object.
    Object,
}

impl FieldType {
    /// The JSON-schema `type` keyword for this variant.
    #[must_use]
    pub const fn json_type(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "number",
            Self::Boolean => "boolean",
            Self::List => "array",
            Self::Object => "object",
        }
    }

    /// Check a JSON value against this variant.
    #[must_use]
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Float => value.is_number(),
            Self::Boolean => value.is_boolean(),
            Self::List => value.is_array(),
            Self::Object => value.is_object(),
        }
    }
}

/// Declaration of a single argument field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSpec {
    /// The validator variant for this field.
    pub field_type: FieldType,
    /// Whether the field must be present.
    pub required: bool,
    /// Human/model-readable description.
    pub description: String,
}

/// The declared argument structure of a tool.
///
/// Field order is stable (`BTreeMap`) so rendered schemas and error messages
/// are deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputSchema {
    fields: BTreeMap<String, FieldSpec>,
}

impl InputSchema {
    /// Create an empty schema (a tool taking no arguments).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a required field.
    #[must_use]
    pub fn required(
        mut self,
        name: impl Into<String>,
        field_type: FieldType,
        description: impl Into<String>,
    ) -> Self {
        self.fields.insert(
            name.into(),
            FieldSpec {
                field_type,
                required: true,
                description: description.into(),
            },
        );
        self
    }

    /// Add an optional field.
    #[must_use]
    pub fn optional(
        mut self,
        name: impl Into<String>,
        field_type: FieldType,
        description: impl Into<String>,
    ) -> Self {
        self.fields.insert(
            name.into(),
            FieldSpec {
                field_type,
                required: false,
                description: description.into(),
            },
        );
        self
    }

    /// Validate an argument object against this schema.
    ///
    /// # Errors
    ///
    /// Returns a human-readable description of the first violation found:
    /// non-object arguments, a missing required field, a type mismatch, or
    /// a field the schema does not declare.
    pub fn validate(&self, args: &Value) -> Result<(), String> {
        let Some(object) = args.as_object() else {
            return Err(format!("expected a JSON object, got {}", json_kind(args)));
        };

        for (name, spec) in &self.fields {
            match object.get(name) {
                Some(value) => {
                    if !spec.field_type.accepts(value) {
                        return Err(format!(
                            "field '{name}' must be of type {}, got {}",
                            spec.field_type.json_type(),
                            json_kind(value)
                        ));
                    }
                }
                None if spec.required => {
                    return Err(format!("missing required field '{name}'"));
                }
                None => {}
            }
        }

        for name in object.keys() {
            if !self.fields.contains_key(name) {
                return Err(format!("unknown field '{name}'"));
            }
        }

        Ok(())
    }

    /// Render the provider-facing JSON schema object.
    #[must_use]
    pub fn to_json_value(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for (name, spec) in &self.fields {
            properties.insert(
                name.clone(),
                json!({
                    "type": spec.field_type.json_type(),
                    "description": spec.description,
                }),
            );
            if spec.required {
                required.push(Value::String(name.clone()));
            }
        }

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// Number of declared fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the schema declares no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

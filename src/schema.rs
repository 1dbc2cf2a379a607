//! Structural schema for agent answers
//!
//! Schemas are written as data in the same shape as the payload they describe:
//! a leaf string names the type (`"string"`, `"number"`, `"integer"`), a
//! placeholder such as `"YYYY-MM-DD"` stands for a string, a one-element array
//! describes an array of that element, and an object lists required fields.
//! [`Schema::from_description`] turns that description into a typed tree.

use std::fmt;
use std::sync::LazyLock;

use serde_json::Value;
use thiserror::Error;

const REFERENCE_SCHEMA: &str = include_str!("resources/output_schema.json");

static REFERENCE: LazyLock<Schema> = LazyLock::new(|| {
    let description: Value = serde_json::from_str(REFERENCE_SCHEMA)
        .unwrap_or_else(|e| panic!("embedded output schema is not valid JSON: {e}"));
    Schema::from_description(&description)
        .unwrap_or_else(|e| panic!("embedded output schema is malformed: {e}"))
});

/// Leaf types a schema can require
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveType {
    String,
    /// Any JSON number, integral or not
    Number,
    /// A JSON number without fractional part
    Integer,
}

impl PrimitiveType {
    fn matches(self, value: &Value) -> bool {
        match self {
            PrimitiveType::String => value.is_string(),
            PrimitiveType::Number => value.is_number(),
            PrimitiveType::Integer => match value {
                Value::Number(n) if n.is_i64() || n.is_u64() => true,
                Value::Number(n) => n.as_f64().is_some_and(|f| f.fract() == 0.0),
                _ => false,
            },
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PrimitiveType::String => "string",
            PrimitiveType::Number => "number",
            PrimitiveType::Integer => "integer",
        };
        f.write_str(name)
    }
}

/// Typed schema tree
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    Primitive(PrimitiveType),
    /// Required fields; unknown fields in the payload are allowed
    Object(Vec<(String, Schema)>),
    Array(Box<Schema>),
}

/// Problems with a schema description itself
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaDescriptionError {
    #[error("unknown type name {name:?} at `{path}`")]
    UnknownType { path: String, name: String },

    #[error("array description at `{path}` must contain exactly one element, found {len}")]
    ArrayArity { path: String, len: usize },

    #[error("unsupported schema literal at `{path}`: {value}")]
    UnsupportedLiteral { path: String, value: String },
}

/// One step into a JSON document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Location of a value inside a payload, e.g. `results[0].resort.check_in`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JsonPath(Vec<PathSegment>);

impl JsonPath {
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn key(&self, key: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Key(key.to_string()));
        Self(segments)
    }

    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Index(index));
        Self(segments)
    }

    /// Index of the package this path points into, for `results[i]...` paths
    #[must_use]
    pub fn package_index(&self) -> Option<usize> {
        match self.0.as_slice() {
            [PathSegment::Key(key), PathSegment::Index(i), ..] if key == "results" => Some(*i),
            _ => None,
        }
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("$");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if i == 0 => write!(f, "{key}")?,
                PathSegment::Key(key) => write!(f, ".{key}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

/// A place where the payload does not match the schema
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaMismatch {
    pub path: JsonPath,
    pub expected: String,
    pub found: String,
}

impl fmt::Display for SchemaMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}`: expected {}, found {}", self.path, self.expected, self.found)
    }
}

impl Schema {
    /// Schema of the `{"results": [...]}` document agents must produce
    #[must_use]
    pub fn reference() -> &'static Schema {
        &REFERENCE
    }

    /// The embedded reference description, as shipped
    #[must_use]
    pub fn reference_description() -> &'static str {
        REFERENCE_SCHEMA
    }

    /// Build a schema from its example-literal description
    pub fn from_description(description: &Value) -> Result<Self, SchemaDescriptionError> {
        Self::describe(description, &JsonPath::root())
    }

    /// Parse a description from JSON text
    pub fn from_description_str(text: &str) -> Result<Self, crate::DiveTripError> {
        let description: Value = serde_json::from_str(text)
            .map_err(|e| crate::DiveTripError::config(format!("schema is not valid JSON: {e}")))?;
        Self::from_description(&description)
            .map_err(|e| crate::DiveTripError::config(e.to_string()))
    }

    fn describe(description: &Value, path: &JsonPath) -> Result<Self, SchemaDescriptionError> {
        match description {
            Value::String(name) => match name.as_str() {
                "string" => Ok(Schema::Primitive(PrimitiveType::String)),
                "number" => Ok(Schema::Primitive(PrimitiveType::Number)),
                "integer" => Ok(Schema::Primitive(PrimitiveType::Integer)),
                placeholder if placeholder.contains("YYYY") => {
                    Ok(Schema::Primitive(PrimitiveType::String))
                }
                other => Err(SchemaDescriptionError::UnknownType {
                    path: path.to_string(),
                    name: other.to_string(),
                }),
            },
            Value::Array(items) => match items.as_slice() {
                [item] => Ok(Schema::Array(Box::new(Self::describe(item, &path.index(0))?))),
                _ => Err(SchemaDescriptionError::ArrayArity {
                    path: path.to_string(),
                    len: items.len(),
                }),
            },
            Value::Object(fields) => fields
                .iter()
                .map(|(key, field)| Ok((key.clone(), Self::describe(field, &path.key(key))?)))
                .collect::<Result<Vec<_>, _>>()
                .map(Schema::Object),
            other => Err(SchemaDescriptionError::UnsupportedLiteral {
                path: path.to_string(),
                value: other.to_string(),
            }),
        }
    }

    /// Short description of what this schema node expects
    #[must_use]
    pub fn expected(&self) -> String {
        match self {
            Schema::Primitive(primitive) => primitive.to_string(),
            Schema::Object(_) => "object".to_string(),
            Schema::Array(item) => format!("array of {}", item.expected()),
        }
    }

    /// Collect every mismatch between `value` and this schema
    #[must_use]
    pub fn validate(&self, value: &Value) -> Vec<SchemaMismatch> {
        let mut mismatches = Vec::new();
        self.validate_at(value, &JsonPath::root(), &mut mismatches);
        mismatches
    }

    /// `true` when `value` conforms
    #[must_use]
    pub fn conforms(&self, value: &Value) -> bool {
        self.validate(value).is_empty()
    }

    fn validate_at(&self, value: &Value, path: &JsonPath, out: &mut Vec<SchemaMismatch>) {
        match (self, value) {
            (Schema::Primitive(primitive), value) => {
                if !primitive.matches(value) {
                    out.push(mismatch(path, self, value));
                }
            }
            (Schema::Object(fields), Value::Object(map)) => {
                for (key, field_schema) in fields {
                    let field_path = path.key(key);
                    match map.get(key) {
                        Some(field_value) => field_schema.validate_at(field_value, &field_path, out),
                        None => out.push(SchemaMismatch {
                            path: field_path,
                            expected: field_schema.expected(),
                            found: "nothing (missing field)".to_string(),
                        }),
                    }
                }
            }
            (Schema::Array(item_schema), Value::Array(items)) => {
                for (i, item) in items.iter().enumerate() {
                    item_schema.validate_at(item, &path.index(i), out);
                }
            }
            (_, value) => out.push(mismatch(path, self, value)),
        }
    }
}

fn mismatch(path: &JsonPath, schema: &Schema, value: &Value) -> SchemaMismatch {
    SchemaMismatch {
        path: path.clone(),
        expected: schema.expected(),
        found: json_type_name(value).to_string(),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

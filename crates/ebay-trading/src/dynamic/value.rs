// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Attribute values held by an [`Instance`].

use crate::dynamic::Instance;
use serde_json::Value as JsonValue;

/// A value stored in an instance attribute.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    // Absent / unset
    #[default]
    Null,

    // Scalars
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),

    // Composites
    Instance(Box<Instance>),
    Sequence(Vec<Value>),
}

impl Value {
    /// Check if value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Try to get as bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as f64 (integers widen).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Try to get as string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v),
            _ => None,
        }
    }

    /// Try to get as nested instance.
    pub fn as_instance(&self) -> Option<&Instance> {
        match self {
            Self::Instance(v) => Some(v),
            _ => None,
        }
    }

    /// Try to get as mutable nested instance.
    pub fn as_instance_mut(&mut self) -> Option<&mut Instance> {
        match self {
            Self::Instance(v) => Some(v),
            _ => None,
        }
    }

    /// Try to get as sequence.
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Self::Sequence(v) => Some(v),
            _ => None,
        }
    }

    /// Convert a decoded scalar unchanged.
    ///
    /// Objects and arrays have no scalar form; they become their compact
    /// JSON text (opaque leaf).
    pub fn from_json_scalar(json: &JsonValue) -> Self {
        match json {
            JsonValue::Null => Self::Null,
            JsonValue::Bool(b) => Self::Bool(*b),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => Self::Integer(i),
                None => match n.as_f64() {
                    Some(f) if n.is_f64() => Self::Float(f),
                    _ => Self::Text(n.to_string()),
                },
            },
            JsonValue::String(s) => Self::Text(s.clone()),
            JsonValue::Array(_) | JsonValue::Object(_) => Self::opaque(json),
        }
    }

    /// Textual representation of a decoded value (sequence of simple types).
    pub fn text_of(json: &JsonValue) -> Self {
        match json {
            JsonValue::String(s) => Self::Text(s.clone()),
            JsonValue::Null => Self::Text(String::new()),
            other => Self::Text(other.to_string()),
        }
    }

    /// Opaque leaf for a subtree that could not be typed.
    pub fn opaque(json: &JsonValue) -> Self {
        Self::Text(json.to_string())
    }

    /// Wire form of this value. Nested instances use wire-keyed mappings.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Null => JsonValue::Null,
            Self::Bool(b) => JsonValue::Bool(*b),
            Self::Integer(i) => JsonValue::from(*i),
            Self::Float(f) => serde_json::Number::from_f64(*f)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            Self::Text(s) => JsonValue::String(s.clone()),
            Self::Instance(inst) => JsonValue::Object(inst.to_wire_mapping()),
            Self::Sequence(items) => JsonValue::Array(items.iter().map(Self::to_json).collect()),
        }
    }
}

// Conversion traits
impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Integer(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::Integer(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<Instance> for Value {
    fn from(v: Instance) -> Self {
        Self::Instance(Box::new(v))
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::Sequence(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type descriptors for schema complex types.

use crate::naming::{is_local_name, to_local_name, to_wire_name};
use crate::schema::AttributeInfo;

/// Field descriptor for one declared attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Local attribute name (`category_id`).
    pub name: String,
    /// Element name as declared in the schema (`CategoryID`).
    pub wire_name: String,
    /// Declared type, namespace prefix stripped (`CategoryType`, `xs:string`).
    pub wire_type: String,
    /// Whether `wire_type` is a complex type known to the schema.
    pub complex: bool,
}

impl FieldDescriptor {
    /// Build a field from a schema attribute.
    pub fn from_attribute(attr: &AttributeInfo, complex: bool) -> Self {
        let name = if is_local_name(&attr.name) {
            attr.name.clone()
        } else {
            to_local_name(&attr.name)
        };
        Self {
            name,
            wire_name: attr.name.clone(),
            wire_type: attr.resolved_type().to_string(),
            complex,
        }
    }
}

/// Runtime description of a schema complex type.
///
/// Immutable once built; shared through the registry cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    /// Type name, without namespace prefix.
    pub name: String,
    fields: Vec<FieldDescriptor>,
}

impl TypeDescriptor {
    /// Create a descriptor. Later fields whose local name collides with an
    /// earlier one are dropped, keeping the attribute set unique.
    pub fn new(name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        let mut unique: Vec<FieldDescriptor> = Vec::with_capacity(fields.len());
        for field in fields {
            if unique.iter().any(|f| f.name == field.name) {
                continue;
            }
            unique.push(field);
        }
        Self {
            name: name.into(),
            fields: unique,
        }
    }

    /// Declared fields, in schema order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Local attribute names, in schema order.
    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Get field by local name, falling back to the declared wire name.
    ///
    /// When neither matches exactly, `name` is converted with
    /// [`to_wire_name`] and compared to the wire names case-insensitively,
    /// the same rule the subtype resolver applies.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.field_index(name).and_then(|index| self.fields.get(index))
    }

    /// Get field index by local or wire name.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields
            .iter()
            .position(|f| f.name == name)
            .or_else(|| self.fields.iter().position(|f| f.wire_name == name))
            .or_else(|| {
                let wire = to_wire_name(name);
                self.fields
                    .iter()
                    .position(|f| f.wire_name.eq_ignore_ascii_case(&wire))
            })
    }

    /// Number of declared attributes.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` for types without attributes.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

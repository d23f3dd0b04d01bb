// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Instance container for runtime attribute access.
//!
//! Reads are strict: only declared attributes can be read. Writes are
//! permissive: an undeclared attribute is accepted, kept aside and reported
//! through [`WriteOutcome::Undeclared`] so schema drift never aborts a
//! request or a materialization.

use crate::dynamic::{TypeDescriptor, Value};
use crate::naming::to_wire_name;
use serde_json::Map;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Errors for instance attribute access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstanceError {
    #[error("Attribute {attribute} is not declared on {type_name}")]
    Undeclared {
        type_name: String,
        attribute: String,
    },
}

/// Result of a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "an undeclared write should be surfaced or deliberately ignored"]
pub enum WriteOutcome {
    /// The attribute is declared on the descriptor.
    Declared,
    /// The attribute is unknown to the descriptor; value kept aside.
    Undeclared,
}

impl WriteOutcome {
    /// Returns `true` for [`WriteOutcome::Undeclared`].
    pub fn is_undeclared(self) -> bool {
        matches!(self, Self::Undeclared)
    }
}

/// A live value of a [`TypeDescriptor`].
#[derive(Debug, Clone)]
pub struct Instance {
    descriptor: Arc<TypeDescriptor>,
    /// One slot per declared field, same order as the descriptor.
    values: Vec<Value>,
    /// Writes to attributes the descriptor does not declare.
    undeclared: BTreeMap<String, Value>,
}

impl Instance {
    /// Create an instance with every attribute unset.
    pub fn new(descriptor: &Arc<TypeDescriptor>) -> Self {
        Self {
            descriptor: descriptor.clone(),
            values: vec![Value::Null; descriptor.len()],
            undeclared: BTreeMap::new(),
        }
    }

    /// Get the type descriptor.
    pub fn descriptor(&self) -> &Arc<TypeDescriptor> {
        &self.descriptor
    }

    /// Get the type name.
    pub fn type_name(&self) -> &str {
        &self.descriptor.name
    }

    /// Read a declared attribute (local or wire name).
    ///
    /// Unset attributes read as [`Value::Null`].
    pub fn get(&self, name: &str) -> Result<&Value, InstanceError> {
        self.descriptor
            .field_index(name)
            .map(|idx| &self.values[idx])
            .ok_or_else(|| self.undeclared_error(name))
    }

    /// Mutable access to a declared attribute.
    pub fn get_mut(&mut self, name: &str) -> Result<&mut Value, InstanceError> {
        match self.descriptor.field_index(name) {
            Some(idx) => Ok(&mut self.values[idx]),
            None => Err(self.undeclared_error(name)),
        }
    }

    /// Write an attribute.
    ///
    /// Undeclared attributes are accepted and logged.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> WriteOutcome {
        let value = value.into();
        match self.descriptor.field_index(name) {
            Some(idx) => {
                self.values[idx] = value;
                WriteOutcome::Declared
            }
            None => {
                log::warn!(
                    "[instance] write to undeclared attribute {}.{}",
                    self.descriptor.name,
                    name
                );
                self.undeclared.insert(name.to_string(), value);
                WriteOutcome::Undeclared
            }
        }
    }

    /// Attributes written without being declared.
    pub fn undeclared(&self) -> &BTreeMap<String, Value> {
        &self.undeclared
    }

    /// Iterate over declared attributes and their values, in schema order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.descriptor
            .fields()
            .iter()
            .zip(&self.values)
            .map(|(field, value)| (field.name.as_str(), value))
    }

    /// Request view: populated attributes keyed by wire name.
    ///
    /// Declared fields are keyed by the element name exactly as the schema
    /// declares it, which is not always `to_wire_name(local)`: `eBayAuthToken`
    /// stays `eBayAuthToken` rather than becoming `EBayAuthToken`. Undeclared
    /// writes have no schema name, so they are converted with
    /// [`to_wire_name`] and appended. Unset attributes are omitted.
    pub fn to_wire_mapping(&self) -> Map<String, serde_json::Value> {
        let mut map = Map::new();
        for (field, value) in self.descriptor.fields().iter().zip(&self.values) {
            if !value.is_null() {
                map.insert(field.wire_name.clone(), value.to_json());
            }
        }
        for (name, value) in &self.undeclared {
            if !value.is_null() {
                map.insert(to_wire_name(name), value.to_json());
            }
        }
        map
    }

    fn undeclared_error(&self, name: &str) -> InstanceError {
        InstanceError::Undeclared {
            type_name: self.descriptor.name.clone(),
            attribute: name.to_string(),
        }
    }
}

impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        self.descriptor.name == other.descriptor.name
            && self.values == other.values
            && self.undeclared == other.undeclared
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.descriptor.name)
    }
}

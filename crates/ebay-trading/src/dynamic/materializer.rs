// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Response materializer: decoded response tree -> typed [`Instance`] graph.
//!
//! The walk is driven by the shape of each value, with the parent type name
//! as context:
//!
//! ```text
//!   mapping   -> resolve child type -> nested Instance
//!   sequence  -> complex element type? -> Vec<Instance> | Vec<Text>
//!   scalar    -> assigned unchanged
//! ```
//!
//! Anything that cannot be typed degrades to an opaque scalar and is
//! reported as a [`Diagnostic`]; a single unknown field never aborts the
//! materialization. Only a malformed root or an unknown root type fail.

use crate::dynamic::registry::{RegistryError, TypeRegistry};
use crate::dynamic::resolver::SubtypeResolver;
use crate::dynamic::{Instance, Value};
use crate::naming::{to_local_name, to_wire_name};
use serde_json::{Map, Value as JsonValue};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Default nesting limit below the root instance.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Materialization errors surfaced to the caller.
#[derive(Debug, Error)]
pub enum MaterializeError {
    #[error("Malformed response: expected exactly one top-level key, found {0}")]
    MalformedResponseShape(usize),

    #[error("Malformed response: root {0} is not a mapping")]
    RootNotMapping(String),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Non-fatal event recorded while materializing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Attribute written although the descriptor does not declare it.
    UndeclaredWrite { type_name: String, attribute: String },
    /// Structured child whose type could not be resolved; kept as opaque text.
    Unresolved {
        type_name: String,
        attribute: String,
        reason: String,
    },
    /// Subtree below the depth limit; kept as opaque text.
    DepthLimit {
        type_name: String,
        attribute: String,
        depth: usize,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UndeclaredWrite {
                type_name,
                attribute,
            } => write!(f, "undeclared attribute {}.{}", type_name, attribute),
            Self::Unresolved {
                type_name,
                attribute,
                reason,
            } => write!(f, "unresolved {}.{}: {}", type_name, attribute, reason),
            Self::DepthLimit {
                type_name,
                attribute,
                depth,
            } => write!(f, "depth limit {} reached at {}.{}", depth, type_name, attribute),
        }
    }
}

/// Builds typed instance graphs from decoded responses.
#[derive(Debug, Clone)]
pub struct Materializer {
    registry: Arc<TypeRegistry>,
    resolver: SubtypeResolver,
    max_depth: usize,
}

impl Materializer {
    /// Create a materializer resolving against the registry's schema.
    pub fn new(registry: Arc<TypeRegistry>) -> Self {
        let resolver = SubtypeResolver::new(Arc::clone(registry.schema()));
        Self {
            registry,
            resolver,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Set the nesting limit below the root instance.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The registry instances are created from.
    pub fn registry(&self) -> &Arc<TypeRegistry> {
        &self.registry
    }

    /// The resolver used for child attributes.
    pub fn resolver(&self) -> &SubtypeResolver {
        &self.resolver
    }

    /// Materialize a response whose single top-level key names the root type.
    pub fn materialize_root(&self, node: &JsonValue) -> Result<Instance, MaterializeError> {
        self.materialize_root_with_diagnostics(node)
            .map(|(instance, _)| instance)
    }

    /// Same as [`materialize_root`](Self::materialize_root), also returning
    /// every degradation and undeclared write.
    pub fn materialize_root_with_diagnostics(
        &self,
        node: &JsonValue,
    ) -> Result<(Instance, Vec<Diagnostic>), MaterializeError> {
        let root = match node {
            JsonValue::Object(map) if map.len() == 1 => map,
            JsonValue::Object(map) => return Err(MaterializeError::MalformedResponseShape(map.len())),
            _ => return Err(MaterializeError::MalformedResponseShape(0)),
        };
        let Some((key, value)) = root.iter().next() else {
            return Err(MaterializeError::MalformedResponseShape(0));
        };
        let JsonValue::Object(attributes) = value else {
            return Err(MaterializeError::RootNotMapping(key.clone()));
        };

        let type_name = root_type_name(key);
        let mut diagnostics = Vec::new();
        let instance = self.build(&type_name, attributes, 0, &mut diagnostics)?;
        Ok((instance, diagnostics))
    }

    /// Materialize `attributes` as an instance of a known type.
    pub fn materialize_as(
        &self,
        type_name: &str,
        attributes: &Map<String, JsonValue>,
    ) -> Result<(Instance, Vec<Diagnostic>), MaterializeError> {
        let mut diagnostics = Vec::new();
        let instance = self.build(type_name, attributes, 0, &mut diagnostics)?;
        Ok((instance, diagnostics))
    }

    fn build(
        &self,
        type_name: &str,
        attributes: &Map<String, JsonValue>,
        depth: usize,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Instance, RegistryError> {
        let mut instance = self.registry.new_instance(type_name)?;
        self.fill_attributes(&mut instance, attributes, depth, diagnostics);
        Ok(instance)
    }

    /// Assign every attribute of `attributes` to `instance`.
    pub fn fill_attributes(
        &self,
        instance: &mut Instance,
        attributes: &Map<String, JsonValue>,
        depth: usize,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        let parent = instance.type_name().to_string();
        for (key, value) in attributes {
            if is_namespace_declaration(key) {
                continue;
            }

            let value = match value {
                JsonValue::Object(map) => self.nested(&parent, key, value, map, depth, diagnostics),
                JsonValue::Array(items) => self.sequence(&parent, key, items, depth, diagnostics),
                scalar => Value::from_json_scalar(scalar),
            };

            let attribute = to_local_name(key);
            if instance.set(&attribute, value).is_undeclared() {
                diagnostics.push(Diagnostic::UndeclaredWrite {
                    type_name: parent.clone(),
                    attribute,
                });
            }
        }
    }

    fn nested(
        &self,
        parent: &str,
        key: &str,
        raw: &JsonValue,
        map: &Map<String, JsonValue>,
        depth: usize,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Value {
        if depth >= self.max_depth {
            return self.truncate(parent, key, raw, diagnostics);
        }

        let child_type = match self.resolver.resolve(parent, key) {
            Ok(ty) if self.registry.schema().has_type(&ty) => ty,
            Ok(ty) => {
                return unresolved(parent, key, raw, format!("{} is not a complex type", ty), diagnostics)
            }
            Err(err) => return unresolved(parent, key, raw, err.to_string(), diagnostics),
        };

        match self.build(&child_type, map, depth + 1, diagnostics) {
            Ok(child) => Value::from(child),
            Err(err) => unresolved(parent, key, raw, err.to_string(), diagnostics),
        }
    }

    fn sequence(
        &self,
        parent: &str,
        key: &str,
        items: &[JsonValue],
        depth: usize,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Value {
        let element_type = if items.is_empty() {
            None
        } else {
            self.resolver.resolve_complex(parent, key)
        };

        let Some(element_type) = element_type else {
            return Value::Sequence(items.iter().map(Value::text_of).collect());
        };

        let values = items
            .iter()
            .map(|item| match item {
                JsonValue::Object(_) if depth >= self.max_depth => {
                    self.truncate(parent, key, item, diagnostics)
                }
                JsonValue::Object(map) => {
                    match self.build(&element_type, map, depth + 1, diagnostics) {
                        Ok(child) => Value::from(child),
                        Err(err) => unresolved(parent, key, item, err.to_string(), diagnostics),
                    }
                }
                scalar => Value::from_json_scalar(scalar),
            })
            .collect();
        Value::Sequence(values)
    }

    fn truncate(
        &self,
        parent: &str,
        key: &str,
        raw: &JsonValue,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Value {
        log::warn!(
            "[materializer] depth limit {} reached at {}.{}",
            self.max_depth,
            parent,
            key
        );
        diagnostics.push(Diagnostic::DepthLimit {
            type_name: parent.to_string(),
            attribute: to_local_name(key),
            depth: self.max_depth,
        });
        Value::opaque(raw)
    }
}

fn unresolved(
    parent: &str,
    key: &str,
    raw: &JsonValue,
    reason: String,
    diagnostics: &mut Vec<Diagnostic>,
) -> Value {
    log::debug!("[materializer] {}.{} kept opaque: {}", parent, key, reason);
    diagnostics.push(Diagnostic::Unresolved {
        type_name: parent.to_string(),
        attribute: to_local_name(key),
        reason,
    });
    Value::opaque(raw)
}

/// Root type name from the single top-level response key.
///
/// `get_categories_response_type` and `GetCategoriesResponseType` are used
/// as is; any other key gets a `_type` suffix. The result is in wire form.
pub fn root_type_name(key: &str) -> String {
    if key.ends_with("Type") || key.ends_with("_type") {
        to_wire_name(key)
    } else {
        to_wire_name(&format!("{}_type", key))
    }
}

fn is_namespace_declaration(key: &str) -> bool {
    let key = key.strip_prefix('@').unwrap_or(key);
    key == "xmlns" || key.starts_with("xmlns:")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_type_name() {
        assert_eq!(
            root_type_name("get_categories_response_type"),
            "GetCategoriesResponseType"
        );
        assert_eq!(root_type_name("get_categories_response"), "GetCategoriesResponseType");
        assert_eq!(root_type_name("GetCategoriesResponseType"), "GetCategoriesResponseType");
        assert_eq!(root_type_name("GetCategoriesResponse"), "GetCategoriesResponseType");
    }

    #[test]
    fn test_namespace_declaration_keys() {
        assert!(is_namespace_declaration("xmlns"));
        assert!(is_namespace_declaration("@xmlns"));
        assert!(is_namespace_declaration("@xmlns:ns"));
        assert!(!is_namespace_declaration("xmlns_version"));
        assert!(!is_namespace_declaration("version"));
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::UndeclaredWrite {
            type_name: "CategoryType".into(),
            attribute: "leaf".into(),
        };
        assert_eq!(diag.to_string(), "undeclared attribute CategoryType.leaf");
    }
}

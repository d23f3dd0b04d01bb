// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! In-memory [`SchemaAccessor`].

use super::{AttributeInfo, OperationInfo, SchemaAccessor, SchemaError};
use crate::naming::to_local_name;
use std::collections::{BTreeMap, HashMap};

/// Simple [`HashMap`]-backed schema.
///
/// Suitable for tests and for callers that assemble a schema subset in code.
///
/// ```
/// use ebay_trading::schema::{MemorySchema, SchemaAccessor};
///
/// let schema = MemorySchema::new()
///     .with_type("CategoryType", &[("CategoryID", "xs:string")])
///     .with_action("GetCategories");
///
/// assert!(schema.has_type("CategoryType"));
/// assert!(schema.operations().unwrap().contains_key("get_categories"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySchema {
    types: HashMap<String, Vec<AttributeInfo>>,
    operations: BTreeMap<String, OperationInfo>,
    namespace_identifier: String,
    version: Option<String>,
}

impl MemorySchema {
    /// Create an empty schema using the `ns` namespace identifier.
    #[must_use]
    pub fn new() -> Self {
        Self {
            namespace_identifier: "ns".to_string(),
            ..Self::default()
        }
    }

    /// Register a complex type from `(attribute, wire type)` pairs.
    #[must_use]
    pub fn with_type(mut self, name: &str, attributes: &[(&str, &str)]) -> Self {
        self.register_type(
            name,
            attributes
                .iter()
                .map(|(attr, ty)| AttributeInfo::new(*attr, *ty))
                .collect(),
        );
        self
    }

    /// Register an operation named after its action.
    #[must_use]
    pub fn with_action(mut self, action: &str) -> Self {
        self.register_operation(OperationInfo::from_action(
            action,
            self.namespace_identifier.clone(),
        ));
        self
    }

    /// Set the reported protocol version.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Register (or replace) a complex type.
    pub fn register_type(&mut self, name: impl Into<String>, attributes: Vec<AttributeInfo>) {
        self.types.insert(name.into(), attributes);
    }

    /// Register (or replace) an operation, keyed by the local form of its action.
    pub fn register_operation(&mut self, operation: OperationInfo) {
        self.operations
            .insert(to_local_name(&operation.action), operation);
    }

    /// Number of registered complex types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if no types are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl SchemaAccessor for MemorySchema {
    fn operations(&self) -> Result<BTreeMap<String, OperationInfo>, SchemaError> {
        Ok(self.operations.clone())
    }

    fn type_attributes(&self, type_name: &str) -> Result<Vec<AttributeInfo>, SchemaError> {
        self.types
            .get(type_name)
            .cloned()
            .ok_or_else(|| SchemaError::TypeNotFound(type_name.to_string()))
    }

    fn has_type(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    fn version(&self) -> Option<String> {
        self.version.clone()
    }
}

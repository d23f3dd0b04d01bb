// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Schema access for the Trading service description.
//!
//! The registry, resolver and materializer never parse anything themselves;
//! they ask a [`SchemaAccessor`] for operation metadata and for the attribute
//! table of a complex type. Two implementations ship with the crate:
//!
//! - [`MemorySchema`]: programmatic schema, built in code (tests, fixtures)
//! - [`WsdlSchema`]: parsed from a WSDL document
//!
//! ```text
//!   TypeRegistry ---+
//!                   +--> SchemaAccessor --> MemorySchema | WsdlSchema
//!   SubtypeResolver +
//! ```

mod memory;
mod wsdl;

pub use memory::MemorySchema;
pub use wsdl::WsdlSchema;

use std::collections::BTreeMap;
use thiserror::Error;

/// Prefixes bound to the XML Schema namespace. Types carrying these prefixes
/// are built-in scalars and keep their prefix when resolved.
pub const XML_SCHEMA_PREFIXES: &[&str] = &["xs", "xsd"];

/// Schema access errors.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Type not found in schema: {0}")]
    TypeNotFound(String),

    #[error("Operation not found in schema: {0}")]
    OperationNotFound(String),

    #[error("XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid schema: {0}")]
    Invalid(String),
}

/// Metadata for one remote operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationInfo {
    /// SOAP action / call name (e.g. `GetCategories`).
    pub action: String,
    /// Request type name (e.g. `GetCategoriesRequestType`).
    pub input: String,
    /// Response type name (e.g. `GetCategoriesResponseType`).
    pub output: String,
    /// Prefix bound to the service namespace (e.g. `ns`).
    pub namespace_identifier: String,
}

impl OperationInfo {
    /// Derive request/response type names from the action name.
    pub fn from_action(action: impl Into<String>, namespace_identifier: impl Into<String>) -> Self {
        let action = action.into();
        Self {
            input: format!("{}RequestType", action),
            output: format!("{}ResponseType", action),
            action,
            namespace_identifier: namespace_identifier.into(),
        }
    }
}

/// One attribute (child element) of a complex type, as declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeInfo {
    /// Declared element name, usually in wire convention (`CategoryID`).
    pub name: String,
    /// Declared type, possibly prefixed (`ns:CategoryType`, `xs:string`).
    pub wire_type: String,
    /// Prefix of `wire_type`, if any.
    pub namespace_prefix: Option<String>,
}

impl AttributeInfo {
    /// Create an attribute; the prefix is split off `wire_type`.
    pub fn new(name: impl Into<String>, wire_type: impl Into<String>) -> Self {
        let wire_type = wire_type.into();
        let namespace_prefix = wire_type
            .split_once(':')
            .map(|(prefix, _)| prefix.to_string());
        Self {
            name: name.into(),
            wire_type,
            namespace_prefix,
        }
    }

    /// Declared type with the namespace prefix stripped.
    ///
    /// XML Schema built-ins (`xs:string`) are returned unchanged so that
    /// callers can tell scalars from schema complex types.
    pub fn resolved_type(&self) -> &str {
        strip_namespace_prefix(&self.wire_type)
    }
}

/// Strip a `prefix:` from a qualified type name, except for XML Schema
/// built-in prefixes.
pub fn strip_namespace_prefix(qualified: &str) -> &str {
    match qualified.split_once(':') {
        Some((prefix, local)) if !XML_SCHEMA_PREFIXES.contains(&prefix) => local,
        _ => qualified,
    }
}

/// Source of operation metadata and complex-type attribute tables.
pub trait SchemaAccessor: Send + Sync {
    /// All operations keyed by local name (`get_categories`).
    fn operations(&self) -> Result<BTreeMap<String, OperationInfo>, SchemaError>;

    /// Declared attributes of `type_name`, in declaration order.
    ///
    /// Fails with [`SchemaError::TypeNotFound`] for unknown types.
    fn type_attributes(&self, type_name: &str) -> Result<Vec<AttributeInfo>, SchemaError>;

    /// Whether `type_name` is a complex type known to the schema.
    fn has_type(&self, type_name: &str) -> bool {
        self.type_attributes(type_name).is_ok()
    }

    /// Protocol version reported by the schema, if any.
    fn version(&self) -> Option<String> {
        None
    }

    /// Look up a single operation by its local key.
    fn operation(&self, key: &str) -> Result<OperationInfo, SchemaError> {
        self.operations()?
            .remove(key)
            .ok_or_else(|| SchemaError::OperationNotFound(key.to_string()))
    }
}

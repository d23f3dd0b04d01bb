// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Subtype resolution: which schema type does a child attribute carry?
//!
//! Element names in responses and attribute names in schema declarations do
//! not always agree on case, so the lookup is two-pass: exact match on the
//! wire form of the child name, then a case-insensitive match.

use crate::naming::to_wire_name;
use crate::schema::{SchemaAccessor, SchemaError};
use std::sync::Arc;
use thiserror::Error;

/// Reasons a child attribute could not be resolved.
#[derive(Debug, Error)]
pub enum SubtypeResolutionError {
    #[error("No schema type for parent {0}")]
    UnknownParent(String),

    #[error("No attribute matching {attribute} on {parent}")]
    NoMatchingAttribute { parent: String, attribute: String },

    #[error("Schema error while resolving {parent}.{attribute}: {source}")]
    Schema {
        parent: String,
        attribute: String,
        source: SchemaError,
    },
}

/// Resolves child attribute types against a [`SchemaAccessor`].
#[derive(Clone)]
pub struct SubtypeResolver {
    schema: Arc<dyn SchemaAccessor>,
}

impl SubtypeResolver {
    /// Create a resolver over `schema`.
    pub fn new(schema: Arc<dyn SchemaAccessor>) -> Self {
        Self { schema }
    }

    /// Declared type of `child` on `parent`, namespace prefix stripped.
    ///
    /// XML Schema built-ins keep their prefix (`xs:string`).
    pub fn resolve(&self, parent: &str, child: &str) -> Result<String, SubtypeResolutionError> {
        let attributes = self.schema.type_attributes(parent).map_err(|err| match err {
            SchemaError::TypeNotFound(_) => SubtypeResolutionError::UnknownParent(parent.into()),
            source => SubtypeResolutionError::Schema {
                parent: parent.into(),
                attribute: child.into(),
                source,
            },
        })?;

        let wire = to_wire_name(child);
        attributes
            .iter()
            .find(|attr| attr.name == wire)
            .or_else(|| {
                attributes
                    .iter()
                    .find(|attr| attr.name.eq_ignore_ascii_case(&wire))
            })
            .map(|attr| attr.resolved_type().to_string())
            .ok_or_else(|| SubtypeResolutionError::NoMatchingAttribute {
                parent: parent.into(),
                attribute: child.into(),
            })
    }

    /// Like [`resolve`](Self::resolve), but only succeeds when the resolved
    /// type is a complex type known to the schema.
    pub fn resolve_complex(&self, parent: &str, child: &str) -> Option<String> {
        match self.resolve(parent, child) {
            Ok(ty) if self.schema.has_type(&ty) => Some(ty),
            Ok(ty) => {
                log::debug!("[resolver] {}.{} is simple ({})", parent, child, ty);
                None
            }
            Err(err) => {
                log::debug!("[resolver] {}", err);
                None
            }
        }
    }
}

impl std::fmt::Debug for SubtypeResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubtypeResolver").finish_non_exhaustive()
    }
}

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type registry: schema complex type name -> cached [`TypeDescriptor`].
//!
//! Descriptors are built on first request and never change afterwards.
//! The cache is a `DashMap`, so concurrent callers asking for the same name
//! converge on a single `Arc<TypeDescriptor>`.

use crate::dynamic::{FieldDescriptor, Instance, TypeDescriptor};
use crate::schema::{SchemaAccessor, SchemaError};
use dashmap::DashMap;
use std::sync::Arc;
use thiserror::Error;

/// Registry errors.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Schema type not found: {0}")]
    SchemaNotFound(String),

    #[error("Schema error: {0}")]
    Schema(SchemaError),
}

impl From<SchemaError> for RegistryError {
    fn from(err: SchemaError) -> Self {
        match err {
            SchemaError::TypeNotFound(name) => Self::SchemaNotFound(name),
            other => Self::Schema(other),
        }
    }
}

/// Append-only cache of descriptors backed by a [`SchemaAccessor`].
pub struct TypeRegistry {
    schema: Arc<dyn SchemaAccessor>,
    cache: DashMap<String, Arc<TypeDescriptor>>,
}

impl TypeRegistry {
    /// Create an empty registry over `schema`.
    pub fn new(schema: Arc<dyn SchemaAccessor>) -> Self {
        Self {
            schema,
            cache: DashMap::new(),
        }
    }

    /// The schema this registry reads from.
    pub fn schema(&self) -> &Arc<dyn SchemaAccessor> {
        &self.schema
    }

    /// Get the descriptor for `type_name`, building and caching it on first use.
    ///
    /// A cache hit performs no schema query.
    pub fn get_or_create(&self, type_name: &str) -> Result<Arc<TypeDescriptor>, RegistryError> {
        if let Some(cached) = self.cache.get(type_name) {
            return Ok(Arc::clone(cached.value()));
        }

        let built = Arc::new(self.build(type_name)?);
        let entry = self.cache.entry(type_name.to_string()).or_insert(built);
        Ok(Arc::clone(entry.value()))
    }

    /// Fresh instance of `type_name` with every attribute unset.
    pub fn new_instance(&self, type_name: &str) -> Result<Instance, RegistryError> {
        let descriptor = self.get_or_create(type_name)?;
        Ok(Instance::new(&descriptor))
    }

    /// Whether a descriptor for `type_name` is already cached.
    pub fn contains(&self, type_name: &str) -> bool {
        self.cache.contains_key(type_name)
    }

    /// Number of cached descriptors.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Returns `true` if nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    fn build(&self, type_name: &str) -> Result<TypeDescriptor, RegistryError> {
        let attributes = self.schema.type_attributes(type_name)?;
        let fields = attributes
            .iter()
            .map(|attr| {
                let complex = self.schema.has_type(attr.resolved_type());
                FieldDescriptor::from_attribute(attr, complex)
            })
            .collect();

        log::debug!(
            "[registry] created descriptor {} ({} attributes)",
            type_name,
            attributes.len()
        );
        Ok(TypeDescriptor::new(type_name, fields))
    }
}

impl std::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("cached", &self.cache.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{AttributeInfo, MemorySchema, OperationInfo};
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts attribute-table queries reaching the inner schema.
    struct CountingSchema {
        inner: MemorySchema,
        queries: AtomicUsize,
    }

    impl SchemaAccessor for CountingSchema {
        fn operations(&self) -> Result<BTreeMap<String, OperationInfo>, SchemaError> {
            self.inner.operations()
        }

        fn type_attributes(&self, type_name: &str) -> Result<Vec<AttributeInfo>, SchemaError> {
            self.queries.fetch_add(1, Ordering::SeqCst);
            self.inner.type_attributes(type_name)
        }

        fn has_type(&self, type_name: &str) -> bool {
            self.inner.has_type(type_name)
        }
    }

    fn counting_schema() -> Arc<CountingSchema> {
        Arc::new(CountingSchema {
            inner: MemorySchema::new()
                .with_type(
                    "GetCategoriesRequestType",
                    &[
                        ("CategorySiteID", "xs:string"),
                        ("CategoryParent", "xs:string"),
                        ("DetailLevel", "ns:DetailLevelCodeType"),
                        ("LevelLimit", "xs:int"),
                        ("ViewAllNodes", "xs:boolean"),
                    ],
                )
                .with_type("CategoryType", &[("CategoryID", "xs:string")])
                .with_type("CategoryArrayType", &[("Category", "ns:CategoryType")]),
            queries: AtomicUsize::new(0),
        })
    }

    #[test]
    fn test_descriptor_is_cached() {
        let schema = counting_schema();
        let registry = TypeRegistry::new(schema.clone());

        let first = registry
            .get_or_create("GetCategoriesRequestType")
            .expect("known type");
        assert_eq!(schema.queries.load(Ordering::SeqCst), 1);

        let second = registry
            .get_or_create("GetCategoriesRequestType")
            .expect("known type");
        assert_eq!(schema.queries.load(Ordering::SeqCst), 1);

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(
            first.attribute_names().collect::<Vec<_>>(),
            second.attribute_names().collect::<Vec<_>>()
        );
        assert_eq!(registry.len(), 1);
        assert!(registry.contains("GetCategoriesRequestType"));
    }

    #[test]
    fn test_attribute_names_are_local() {
        let registry = TypeRegistry::new(counting_schema());
        let desc = registry
            .get_or_create("GetCategoriesRequestType")
            .expect("known type");
        assert_eq!(
            desc.attribute_names().collect::<Vec<_>>(),
            [
                "category_site_id",
                "category_parent",
                "detail_level",
                "level_limit",
                "view_all_nodes"
            ]
        );
    }

    #[test]
    fn test_complex_flag() {
        let registry = TypeRegistry::new(counting_schema());
        let desc = registry
            .get_or_create("CategoryArrayType")
            .expect("known type");
        let field = desc.field("category").expect("declared");
        assert!(field.complex);
        assert_eq!(field.wire_type, "CategoryType");

        let desc = registry
            .get_or_create("GetCategoriesRequestType")
            .expect("known type");
        // Enum-like simple type, not defined as a complex type.
        assert!(!desc.field("detail_level").expect("declared").complex);
    }

    #[test]
    fn test_unknown_type() {
        let registry = TypeRegistry::new(counting_schema());
        let err = registry.new_instance("NoSuchType").unwrap_err();
        assert!(matches!(err, RegistryError::SchemaNotFound(ref n) if n == "NoSuchType"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_new_instance() {
        let registry = TypeRegistry::new(counting_schema());
        let inst = registry
            .new_instance("GetCategoriesRequestType")
            .expect("known type");
        assert_eq!(inst.type_name(), "GetCategoriesRequestType");
        assert!(inst.attributes().all(|(_, v)| v.is_null()));
    }
}

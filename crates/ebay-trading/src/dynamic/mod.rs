// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Dynamic types for Trading schema complex types.
//!
//! Runtime type handling without generated code: one [`TypeDescriptor`] per
//! schema complex type, one generic [`Instance`] container per value.
//!
//! # Features
//!
//! - **TypeRegistry**: create-once, cache, reuse descriptors by type name
//! - **Instance**: permissive writes, strict reads, wire-keyed request view
//! - **SubtypeResolver**: child attribute -> declared schema type
//! - **Materializer**: decoded response tree -> typed instance graph
//!
//! # Example
//!
//! ```rust
//! use ebay_trading::dynamic::{Materializer, TypeRegistry};
//! use ebay_trading::schema::MemorySchema;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let schema = MemorySchema::new()
//!     .with_type("GetCategoriesResponseType", &[("Version", "xs:string")]);
//! let registry = Arc::new(TypeRegistry::new(Arc::new(schema)));
//!
//! let materializer = Materializer::new(registry);
//! let response = materializer
//!     .materialize_root(&json!({"get_categories_response": {"version": "785"}}))
//!     .unwrap();
//!
//! assert_eq!(response.type_name(), "GetCategoriesResponseType");
//! assert_eq!(response.get("version").unwrap().as_str(), Some("785"));
//! ```

mod descriptor;
mod instance;
pub mod materializer;
pub mod registry;
pub mod resolver;
mod value;

pub use descriptor::{FieldDescriptor, TypeDescriptor};
pub use instance::{Instance, InstanceError, WriteOutcome};
pub use materializer::{Diagnostic, MaterializeError, Materializer, DEFAULT_MAX_DEPTH};
pub use registry::{RegistryError, TypeRegistry};
pub use resolver::{SubtypeResolutionError, SubtypeResolver};
pub use value::Value;

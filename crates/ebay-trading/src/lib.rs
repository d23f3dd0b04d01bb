// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # ebay-trading - dynamic client-side mapper for the eBay Trading API
//!
//! Turns the complex types of the Trading WSDL into runtime type descriptors,
//! hands out writable request instances, and materializes decoded responses
//! into typed instance graphs, without generated code.
//!
//! ## Quick Start
//!
//! ```rust
//! use ebay_trading::dynamic::{Materializer, TypeRegistry};
//! use ebay_trading::schema::{MemorySchema, SchemaAccessor};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let schema = Arc::new(
//!     MemorySchema::new()
//!         .with_type("GetCategoriesRequestType", &[("CategorySiteID", "xs:string")])
//!         .with_type("GetCategoriesResponseType", &[("Version", "xs:string")])
//!         .with_action("GetCategories"),
//! );
//! let registry = Arc::new(TypeRegistry::new(schema.clone()));
//!
//! // Request side
//! let op = schema.operation("get_categories").unwrap();
//! let mut request = registry.new_instance(&op.input).unwrap();
//! let _ = request.set("category_site_id", "77");
//! assert_eq!(request.to_wire_mapping()["CategorySiteID"], "77");
//!
//! // Response side
//! let response = Materializer::new(registry)
//!     .materialize_root(&json!({"get_categories_response": {"version": "777"}}))
//!     .unwrap();
//! assert_eq!(response.type_name(), "GetCategoriesResponseType");
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +---------------------------------------------------------------------+
//! |                           TradingClient                             |
//! |   config | request builder | Transport (pluggable) | materializer   |
//! +---------------------------------------------------------------------+
//! |                           Dynamic Layer                             |
//! |   TypeRegistry -> TypeDescriptor/Instance | SubtypeResolver         |
//! +---------------------------------------------------------------------+
//! |                           Schema Layer                              |
//! |   SchemaAccessor: WsdlSchema | MemorySchema        naming converter |
//! +---------------------------------------------------------------------+
//! ```
//!
//! ## Modules Overview
//!
//! - [`naming`] - local <-> wire name conversion
//! - [`schema`] - schema access (WSDL, in-memory)
//! - [`dynamic`] - descriptors, instances, resolver, materializer
//! - [`config`] - client configuration
//! - [`request`] - SOAP request assembly
//! - [`transport`] - transport seam
//! - [`client`] - client facade

pub mod client;
pub mod config;
pub mod dynamic;
pub mod naming;
pub mod request;
pub mod schema;
pub mod transport;

pub use client::{ClientError, TradingClient};
pub use config::{ConfigError, Credentials, TradingConfig};
pub use dynamic::{
    Diagnostic, Instance, InstanceError, MaterializeError, Materializer, RegistryError,
    SubtypeResolutionError, SubtypeResolver, TypeDescriptor, TypeRegistry, Value, WriteOutcome,
};
pub use naming::{to_local_name, to_wire_name};
pub use request::SoapRequest;
pub use schema::{AttributeInfo, MemorySchema, OperationInfo, SchemaAccessor, SchemaError, WsdlSchema};
pub use transport::{Transport, TransportError};

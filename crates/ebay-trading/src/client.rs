// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Trading client: schema + registry + transport + materializer.

use crate::config::{ConfigError, TradingConfig};
use crate::dynamic::{Instance, MaterializeError, Materializer, RegistryError, TypeRegistry};
use crate::request::SoapRequest;
use crate::schema::{OperationInfo, SchemaAccessor, SchemaError, WsdlSchema};
use crate::transport::{Transport, TransportError};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

/// Client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Materialization error: {0}")]
    Materialize(#[from] MaterializeError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("No WSDL document configured")]
    MissingWsdl,
}

/// Dynamic Trading client.
///
/// ```ignore
/// let config = TradingConfig::from_file("trading.toml")?;
/// let client = TradingClient::from_config(config, my_transport)?;
///
/// let mut request = client.new_request("get_categories")?;
/// request.set("category_site_id", "77");
/// let response = client.call("get_categories", &request)?;
/// println!("{}", response.get("version")?.as_str().unwrap_or_default());
/// ```
pub struct TradingClient<T: Transport> {
    config: TradingConfig,
    registry: Arc<TypeRegistry>,
    materializer: Materializer,
    transport: T,
}

impl<T: Transport> TradingClient<T> {
    /// Create a client over an already loaded schema.
    pub fn new(config: TradingConfig, schema: Arc<dyn SchemaAccessor>, transport: T) -> Self {
        let registry = Arc::new(TypeRegistry::new(schema));
        let materializer = Materializer::new(Arc::clone(&registry)).with_max_depth(config.max_depth);
        Self {
            config,
            registry,
            materializer,
            transport,
        }
    }

    /// Create a client, parsing the WSDL named by `config.wsdl_path`.
    pub fn from_config(config: TradingConfig, transport: T) -> Result<Self, ClientError> {
        config.validate()?;
        let path = config.wsdl_path.as_ref().ok_or(ClientError::MissingWsdl)?;
        let schema = WsdlSchema::from_file(path)?;
        log::info!(
            "[client] loaded {} ({} complex types)",
            path.display(),
            schema.type_count()
        );
        Ok(Self::new(config, Arc::new(schema), transport))
    }

    /// Client configuration.
    pub fn config(&self) -> &TradingConfig {
        &self.config
    }

    /// Shared type registry.
    pub fn registry(&self) -> &Arc<TypeRegistry> {
        &self.registry
    }

    /// Operations declared by the schema, keyed by local name.
    pub fn operations(&self) -> Result<BTreeMap<String, OperationInfo>, ClientError> {
        Ok(self.registry.schema().operations()?)
    }

    /// Fresh, writable instance of `type_name`.
    pub fn new_request_instance(&self, type_name: &str) -> Result<Instance, ClientError> {
        Ok(self.registry.new_instance(type_name)?)
    }

    /// Fresh instance of the input type of `operation_key`.
    pub fn new_request(&self, operation_key: &str) -> Result<Instance, ClientError> {
        let operation = self.registry.schema().operation(operation_key)?;
        self.new_request_instance(&operation.input)
    }

    /// Turn a decoded response into a typed instance tree.
    pub fn materialize_response(&self, node: &JsonValue) -> Result<Instance, ClientError> {
        Ok(self.materializer.materialize_root(node)?)
    }

    /// Build the request for `operation_key` without sending it.
    pub fn prepare(&self, operation_key: &str, request: &Instance) -> Result<SoapRequest, ClientError> {
        let schema = self.registry.schema();
        let operation = schema.operation(operation_key)?;
        if request.type_name() != operation.input {
            log::warn!(
                "[client] {} called with {}, expected {}",
                operation.action,
                request.type_name(),
                operation.input
            );
        }
        let version = schema.version();
        Ok(SoapRequest::build(
            &self.config,
            &operation,
            version.as_deref(),
            request,
        ))
    }

    /// Perform `operation_key` with `request` and materialize the response.
    pub fn call(&self, operation_key: &str, request: &Instance) -> Result<Instance, ClientError> {
        let soap = self.prepare(operation_key, request)?;
        log::debug!("[client] calling {} at {}", soap.action, soap.endpoint);

        let node = self.transport.call(&soap)?;
        let (response, diagnostics) = self.materializer.materialize_root_with_diagnostics(&node)?;
        for diagnostic in &diagnostics {
            log::debug!("[client] {}: {}", soap.action, diagnostic);
        }
        Ok(response)
    }
}

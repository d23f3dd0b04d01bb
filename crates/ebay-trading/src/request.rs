// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! SOAP request assembly: endpoint, credentials header, wire-keyed body.
//!
//! The request is plain data; a [`Transport`](crate::transport::Transport)
//! turns it into an envelope and performs the call.

use crate::config::TradingConfig;
use crate::dynamic::Instance;
use crate::schema::OperationInfo;
use serde_json::{json, Map, Value as JsonValue};

/// Sandbox SOAP endpoint.
pub const SANDBOX_ENDPOINT: &str = "https://api.sandbox.ebay.com/wsapi";

/// Production SOAP endpoint.
pub const PRODUCTION_ENDPOINT: &str = "https://api.ebay.com/wsapi";

/// A ready-to-send Trading call.
#[derive(Debug, Clone, PartialEq)]
pub struct SoapRequest {
    /// Endpoint URL including routing query parameters.
    pub endpoint: String,
    /// Call name (`GetCategories`).
    pub action: String,
    /// Prefix bound to the service namespace.
    pub namespace_identifier: String,
    /// SOAP header content (credentials).
    pub header: Map<String, JsonValue>,
    /// SOAP body content, keyed by wire names.
    pub body: Map<String, JsonValue>,
}

impl SoapRequest {
    /// Build the request for `operation` with `body` as payload.
    ///
    /// `version` is the protocol version reported by the schema, if any.
    pub fn build(
        config: &TradingConfig,
        operation: &OperationInfo,
        version: Option<&str>,
        body: &Instance,
    ) -> Self {
        let mut payload = body.to_wire_mapping();
        if let Some(version) = version {
            payload
                .entry("Version")
                .or_insert_with(|| JsonValue::String(version.to_string()));
        }

        Self {
            endpoint: endpoint_url(config, &operation.action, version),
            action: operation.action.clone(),
            namespace_identifier: operation.namespace_identifier.clone(),
            header: credentials_header(config, &operation.namespace_identifier),
            body: payload,
        }
    }
}

/// Endpoint URL with `callname`, `siteid`, `appid`, `version` and `routing`.
pub fn endpoint_url(config: &TradingConfig, action: &str, version: Option<&str>) -> String {
    let base = if config.sandbox {
        SANDBOX_ENDPOINT
    } else {
        PRODUCTION_ENDPOINT
    };

    let mut url = format!("{}?callname={}&siteid={}", base, action, config.site_id);
    if !config.credentials.app_id.is_empty() {
        url.push_str("&appid=");
        url.push_str(&config.credentials.app_id);
    }
    if let Some(version) = version {
        url.push_str("&version=");
        url.push_str(version);
    }
    url.push_str("&routing=default");
    url
}

/// `RequesterCredentials` header, keys qualified with `namespace`.
pub fn credentials_header(config: &TradingConfig, namespace: &str) -> Map<String, JsonValue> {
    let q = |name: &str| format!("{}:{}", namespace, name);
    let creds = &config.credentials;

    let mut credentials = Map::new();
    credentials.insert(q("AppId"), json!(creds.app_id));
    credentials.insert(q("DevId"), json!(creds.dev_id));
    credentials.insert(q("AuthCert"), json!(creds.cert_id));

    let mut requester = Map::new();
    requester.insert(q("eBayAuthToken"), json!(creds.auth_token));
    requester.insert(q("Credentials"), JsonValue::Object(credentials));

    let mut header = Map::new();
    header.insert(q("RequesterCredentials"), JsonValue::Object(requester));
    header
}

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Transport seam.
//!
//! The crate does not ship a SOAP stack. A transport takes a
//! [`SoapRequest`], performs the wire call, and returns the decoded response
//! body as a keyed tree whose single top-level key names the response
//! element (e.g. `get_categories_response`).

use crate::request::SoapRequest;
use serde_json::Value as JsonValue;
use thiserror::Error;

/// Transport errors.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Transport failed: {0}")]
    Failed(String),

    #[error("Response decode failed: {0}")]
    Decode(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Performs Trading calls.
pub trait Transport: Send + Sync {
    /// Send `request` and return the decoded response body.
    fn call(&self, request: &SoapRequest) -> Result<JsonValue, TransportError>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn call(&self, request: &SoapRequest) -> Result<JsonValue, TransportError> {
        (**self).call(request)
    }
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn call(&self, request: &SoapRequest) -> Result<JsonValue, TransportError> {
        (**self).call(request)
    }
}

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! WSDL-backed end-to-end tests.
//!
//! The fixture is a trimmed Trading WSDL (v777) with the GetCategories and
//! GetCategoryFeatures types, including the abstract request/response bases.

use ebay_trading::dynamic::{Diagnostic, Materializer, SubtypeResolver, TypeRegistry, Value};
use ebay_trading::schema::{SchemaAccessor, WsdlSchema};
use ebay_trading::{SoapRequest, TradingClient, TradingConfig, Transport, TransportError};
use serde_json::{json, Value as JsonValue};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/trading.wsdl")
}

fn schema() -> Arc<WsdlSchema> {
    Arc::new(WsdlSchema::from_file(fixture()).expect("fixture parses"))
}

#[test]
fn operations_list_action_input_namespace_output() {
    let ops = schema().operations().expect("operations");
    assert!(ops.contains_key("get_categories"));
    assert!(ops.contains_key("add_item"));

    let get_categories = &ops["get_categories"];
    assert_eq!(get_categories.action, "GetCategories");
    assert_eq!(get_categories.input, "GetCategoriesRequestType");
    assert_eq!(get_categories.output, "GetCategoriesResponseType");
    assert_eq!(get_categories.namespace_identifier, "ns");
}

#[test]
fn request_type_includes_inherited_attributes() {
    let schema = schema();
    let input = schema.operation("get_categories").expect("operation").input;
    let registry = TypeRegistry::new(schema);

    let request = registry.new_instance(&input).expect("request type");
    let names: Vec<_> = request.descriptor().attribute_names().collect();
    assert_eq!(
        names,
        [
            "detail_level",
            "error_language",
            "version",
            "category_site_id",
            "category_parent",
            "level_limit",
            "view_all_nodes"
        ]
    );
}

#[test]
fn subtype_resolution_against_wsdl() {
    let resolver = SubtypeResolver::new(schema());
    assert_eq!(
        resolver
            .resolve("GetCategoryFeaturesResponseType", "Category")
            .expect("resolved"),
        "CategoryFeatureType"
    );
    assert_eq!(
        resolver
            .resolve("GetCategoryFeaturesResponseType", "category_version")
            .expect("resolved"),
        "xs:string"
    );
    // Inherited attribute.
    assert_eq!(
        resolver
            .resolve("GetCategoryFeaturesResponseType", "errors")
            .expect("resolved"),
        "ErrorType"
    );
}

#[test]
fn materialize_full_response() {
    let registry = Arc::new(TypeRegistry::new(schema()));
    let materializer = Materializer::new(registry);

    let response = json!({
        "get_category_features_response": {
            "@xmlns": "urn:ebay:apis:eBLBaseComponents",
            "timestamp": "2012-05-04T10:00:00.000Z",
            "ack": "Warning",
            "errors": [
                {"short_message": "Deprecated", "error_code": "21917", "severity_code": "Warning"}
            ],
            "version": "777",
            "build": "E777_CORE_BUNDLED",
            "category_version": "113",
            "category": [
                {"category_id": "1", "best_offer_enabled": true},
                {"category_id": "2"},
                {"category_id": "3", "best_offer_enabled": false}
            ],
            "site_defaults": {"listing_duration": ["Days_7", "Days_30"]}
        }
    });

    let (root, diagnostics) = materializer
        .materialize_root_with_diagnostics(&response)
        .expect("materialize");
    assert_eq!(root.type_name(), "GetCategoryFeaturesResponseType");
    assert_eq!(root.get("ack").expect("declared").as_str(), Some("Warning"));
    assert_eq!(root.get("category_version").expect("declared").as_str(), Some("113"));

    let errors = root.get("errors").expect("declared").as_sequence().expect("sequence");
    let error = errors[0].as_instance().expect("error instance");
    assert_eq!(error.type_name(), "ErrorType");
    assert_eq!(error.get("error_code").expect("declared").as_str(), Some("21917"));

    let ids: Vec<_> = root
        .get("category")
        .expect("declared")
        .as_sequence()
        .expect("sequence")
        .iter()
        .map(|c| {
            let c = c.as_instance().expect("instance");
            assert_eq!(c.type_name(), "CategoryFeatureType");
            c.get("category_id").ok().and_then(Value::as_str).unwrap_or_default().to_string()
        })
        .collect();
    assert_eq!(ids, ["1", "2", "3"]);

    // Unknown to this schema snapshot: kept, reported, not fatal.
    assert!(root.undeclared().contains_key("site_defaults"));
    assert!(diagnostics.iter().any(|d| matches!(
        d,
        Diagnostic::UndeclaredWrite { attribute, .. } if attribute == "site_defaults"
    )));
    assert!(diagnostics.iter().any(|d| matches!(
        d,
        Diagnostic::Unresolved { attribute, .. } if attribute == "site_defaults"
    )));
}

struct CannedTransport;

impl Transport for CannedTransport {
    fn call(&self, request: &SoapRequest) -> Result<JsonValue, TransportError> {
        if request.action != "GetCategories" {
            return Err(TransportError::Failed(format!("unexpected {}", request.action)));
        }
        Ok(json!({
            "get_categories_response": {
                "ack": "Success",
                "version": "777",
                "category_array": {
                    "category": [
                        {"category_id": "20081", "category_name": "Antiques", "category_parent_id": ["20081"], "leaf_category": false},
                        {"category_id": "37903", "category_name": "Antiquities", "category_parent_id": ["20081"], "leaf_category": true}
                    ]
                },
                "category_count": 2
            }
        }))
    }
}

#[test]
fn client_from_config_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config_path = dir.path().join("trading.toml");
    let mut file = std::fs::File::create(&config_path).expect("create");
    writeln!(
        file,
        "wsdl_path = {:?}\nsite_id = 77\n\n[credentials]\napp_id = \"app\"\nauth_token = \"token\"",
        fixture().display().to_string()
    )
    .expect("write");

    let config = TradingConfig::from_file(&config_path).expect("config");
    let client = TradingClient::from_config(config, CannedTransport).expect("client");

    let mut request = client.new_request("get_categories").expect("request");
    let _ = request.set("category_site_id", "77");
    let _ = request.set("level_limit", 2);
    let _ = request.set("detail_level", vec!["ReturnAll"]);

    let soap = client.prepare("get_categories", &request).expect("prepare");
    assert_eq!(
        soap.endpoint,
        "https://api.sandbox.ebay.com/wsapi?callname=GetCategories&siteid=77&appid=app&version=777&routing=default"
    );
    assert_eq!(
        JsonValue::Object(soap.body.clone()),
        json!({
            "DetailLevel": ["ReturnAll"],
            "CategorySiteID": "77",
            "LevelLimit": 2,
            "Version": "777"
        })
    );

    let response = client.call("get_categories", &request).expect("call");
    assert_eq!(response.type_name(), "GetCategoriesResponseType");
    let categories = response
        .get("category_array")
        .ok()
        .and_then(Value::as_instance)
        .and_then(|a| a.get("category").ok())
        .and_then(Value::as_sequence)
        .expect("category sequence");
    assert_eq!(categories.len(), 2);

    let second = categories[1].as_instance().expect("instance");
    assert_eq!(second.get("leaf_category").expect("declared"), &Value::Bool(true));
    assert_eq!(
        second.get("category_parent_id").expect("declared"),
        &Value::Sequence(vec![Value::Text("20081".into())])
    );
}

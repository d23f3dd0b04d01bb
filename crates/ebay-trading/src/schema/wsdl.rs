// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! WSDL-backed [`SchemaAccessor`].
//!
//! Parses the `portType` operations and the named `complexType` definitions
//! of the embedded XML Schema. Only what the mapper needs is extracted:
//! element children (through nested `sequence`/`all`/`choice`) and the base
//! type of `complexContent` extensions, whose attributes are inherited.

use super::{AttributeInfo, OperationInfo, SchemaAccessor, SchemaError};
use crate::naming::to_local_name;
use roxmltree::{Document, Node};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::Path;

/// Type used for elements declared without a `type` attribute.
const ANY_TYPE: &str = "xs:anyType";

/// Namespace identifier used when the target namespace has no prefix.
const DEFAULT_NAMESPACE_IDENTIFIER: &str = "tns";

#[derive(Debug, Clone, Default)]
struct ComplexType {
    base: Option<String>,
    attributes: Vec<AttributeInfo>,
}

/// Schema parsed from a WSDL document.
#[derive(Debug, Clone)]
pub struct WsdlSchema {
    types: HashMap<String, ComplexType>,
    operations: BTreeMap<String, OperationInfo>,
    version: Option<String>,
}

impl WsdlSchema {
    /// Load and parse a WSDL file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SchemaError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse WSDL content.
    pub fn parse(content: &str) -> Result<Self, SchemaError> {
        let doc = Document::parse(content)?;
        let root = doc.root_element();
        if root.tag_name().name() != "definitions" {
            return Err(SchemaError::Invalid(format!(
                "expected <definitions> root, found <{}>",
                root.tag_name().name()
            )));
        }

        let namespace_identifier = target_namespace_prefix(&root);

        let mut operations = BTreeMap::new();
        for port_type in root.children().filter(|n| is_tag(n, "portType")) {
            for op in port_type.children().filter(|n| is_tag(n, "operation")) {
                if let Some(action) = op.attribute("name") {
                    operations.insert(
                        to_local_name(action),
                        OperationInfo::from_action(action, namespace_identifier.clone()),
                    );
                }
            }
        }

        let mut types = HashMap::new();
        for schema in root.descendants().filter(|n| is_tag(n, "schema")) {
            for node in schema.children().filter(|n| is_tag(n, "complexType")) {
                let Some(name) = node.attribute("name") else {
                    continue;
                };
                let mut complex = ComplexType::default();
                collect_particles(&node, &mut complex, false);
                types.insert(name.to_string(), complex);
            }
        }

        let version = root
            .descendants()
            .find(|n| {
                is_tag(n, "Version") && n.parent().is_some_and(|p| is_tag(&p, "documentation"))
            })
            .and_then(|n| n.text())
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        log::debug!(
            "[wsdl] parsed {} operations, {} complex types (version {:?})",
            operations.len(),
            types.len(),
            version
        );

        Ok(Self {
            types,
            operations,
            version,
        })
    }

    /// Number of complex types in the document.
    #[must_use]
    pub fn type_count(&self) -> usize {
        self.types.len()
    }
}

impl SchemaAccessor for WsdlSchema {
    fn operations(&self) -> Result<BTreeMap<String, OperationInfo>, SchemaError> {
        Ok(self.operations.clone())
    }

    fn type_attributes(&self, type_name: &str) -> Result<Vec<AttributeInfo>, SchemaError> {
        // Base chain first, so inherited attributes precede declared ones.
        let mut chain = Vec::new();
        let mut visited = HashSet::new();
        let mut current = Some(type_name);
        while let Some(name) = current {
            if !visited.insert(name) {
                log::warn!("[wsdl] cyclic extension chain through {}", name);
                break;
            }
            match self.types.get(name) {
                Some(complex) => {
                    chain.push(complex);
                    current = complex.base.as_deref();
                }
                None if name == type_name => {
                    return Err(SchemaError::TypeNotFound(type_name.to_string()))
                }
                None => break,
            }
        }

        let mut seen = HashSet::new();
        let mut attributes = Vec::new();
        for complex in chain.iter().rev() {
            for attr in &complex.attributes {
                if seen.insert(attr.name.clone()) {
                    attributes.push(attr.clone());
                }
            }
        }
        Ok(attributes)
    }

    fn has_type(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    fn version(&self) -> Option<String> {
        self.version.clone()
    }
}

fn is_tag(node: &Node, name: &str) -> bool {
    node.is_element() && node.tag_name().name() == name
}

fn target_namespace_prefix(root: &Node) -> String {
    root.attribute("targetNamespace")
        .and_then(|target| {
            root.namespaces()
                .find(|ns| ns.uri() == target && ns.name().is_some())
                .and_then(|ns| ns.name())
        })
        .unwrap_or(DEFAULT_NAMESPACE_IDENTIFIER)
        .to_string()
}

fn collect_particles(node: &Node, complex: &mut ComplexType, simple_content: bool) {
    for child in node.children().filter(Node::is_element) {
        match child.tag_name().name() {
            "sequence" | "all" | "choice" => collect_particles(&child, complex, simple_content),
            "complexContent" => collect_particles(&child, complex, false),
            "simpleContent" => collect_particles(&child, complex, true),
            "extension" | "restriction" => {
                if !simple_content {
                    if let Some(base) = child.attribute("base") {
                        complex.base = Some(super::strip_namespace_prefix(base).to_string());
                    }
                }
                collect_particles(&child, complex, simple_content);
            }
            "element" => {
                if let Some(name) = child.attribute("name") {
                    let wire_type = child.attribute("type").unwrap_or(ANY_TYPE);
                    complex.attributes.push(AttributeInfo::new(name, wire_type));
                } else if let Some(reference) = child.attribute("ref") {
                    let name = reference
                        .split_once(':')
                        .map_or(reference, |(_, local)| local);
                    complex.attributes.push(AttributeInfo::new(name, reference));
                }
            }
            _ => {}
        }
    }
}

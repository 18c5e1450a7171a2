// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! The registry of service operations and the catalog of types they may use.
//!
//! A registry is populated once when the host starts and is only read afterwards, so it can be
//! shared between concurrent requests behind an `Arc` without any locking.

use std::io::Read;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::MetadataError;
use crate::types::TypeDescriptor;

/// A registered service operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationType {
    /// The operation name. Defaults to the request type name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// The request message type
    pub request: String,
    /// The response message type; `None` for one-way operations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
}

impl OperationType {
    pub fn new(request: impl Into<String>) -> Self {
        Self {
            name: None,
            request: request.into(),
            response: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.response = Some(response.into());
        self
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.request)
    }

    pub fn is_one_way(&self) -> bool {
        self.response.is_none()
    }
}

/// The serialized form of a registry.
#[derive(Debug, Default, Serialize, Deserialize)]
struct RegistryDocument {
    #[serde(default)]
    types: Vec<TypeDescriptor>,
    #[serde(default)]
    operations: Vec<OperationType>,
}

#[derive(Debug, Clone, Default)]
pub struct OperationRegistry {
    /// Every public type of the service, in declaration order
    catalog: IndexMap<String, TypeDescriptor>,
    /// Operations in registration order
    operations: Vec<OperationType>,
}

impl OperationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, MetadataError> {
        Self::from_document(serde_json::from_str(json)?)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, MetadataError> {
        Self::from_document(serde_json::from_reader(reader)?)
    }

    fn from_document(document: RegistryDocument) -> Result<Self, MetadataError> {
        let mut registry = Self::new();
        for descriptor in document.types {
            registry.add_type(descriptor)?;
        }
        for operation in document.operations {
            registry.register(operation)?;
        }

        tracing::debug!(
            types = registry.catalog.len(),
            operations = registry.operations.len(),
            "Loaded operation registry"
        );
        Ok(registry)
    }

    pub fn to_json(&self) -> Result<String, MetadataError> {
        let document = RegistryDocument {
            types: self.catalog.values().cloned().collect(),
            operations: self.operations.clone(),
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }

    /// Add a type to the catalog. Type names are unique.
    pub fn add_type(&mut self, descriptor: TypeDescriptor) -> Result<&mut Self, MetadataError> {
        if self.catalog.contains_key(&descriptor.name) {
            return Err(MetadataError::DuplicateType(descriptor.name));
        }
        self.catalog.insert(descriptor.name.clone(), descriptor);
        Ok(self)
    }

    /// Register an operation. Operation names are unique.
    ///
    /// The message types are not checked here: they may be added to the catalog later, and are
    /// validated when metadata is resolved.
    pub fn register(&mut self, operation: OperationType) -> Result<&mut Self, MetadataError> {
        if self.operation(operation.name()).is_some() {
            return Err(MetadataError::DuplicateOperation(
                operation.name().to_string(),
            ));
        }
        self.operations.push(operation);
        Ok(self)
    }

    pub fn get_type(&self, name: &str) -> Option<&TypeDescriptor> {
        self.catalog.get(name)
    }

    pub fn types(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.catalog.values()
    }

    pub fn operations(&self) -> &[OperationType] {
        &self.operations
    }

    pub fn operation(&self, name: &str) -> Option<&OperationType> {
        self.operations.iter().find(|op| op.name() == name)
    }
}

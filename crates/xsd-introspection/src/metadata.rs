// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Resolution of the metadata needed to describe a service: the types that must appear in the
//! schema and the operations, split into request/reply and one-way operations.

use indexmap::IndexMap;

use crate::error::MetadataError;
use crate::registry::{OperationRegistry, OperationType};
use crate::types::TypeDescriptor;

/// Per-request generation switches, taken from the query string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationModes {
    /// Emit only schema constructs that legacy Flash SOAP clients understand
    pub optimize_for_flash: bool,
    /// Describe every catalog type, not only those reachable from operations
    pub include_all_types_in_assembly: bool,
}

impl GenerationModes {
    pub fn new(optimize_for_flash: bool, include_all_types_in_assembly: bool) -> Self {
        Self {
            optimize_for_flash,
            include_all_types_in_assembly,
        }
    }
}

/// A type selected for the schema.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedType<'a> {
    pub descriptor: &'a TypeDescriptor,
    /// The request or response message of at least one operation
    pub is_operation_root: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationNameLists {
    pub reply_operation_names: Vec<String>,
    pub one_way_operation_names: Vec<String>,
}

/// Element names of the messages exchanged by an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationMessages {
    pub request: String,
    pub response: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ResolvedMetadata<'a> {
    /// The type closure, in first-discovered order
    pub types: Vec<ResolvedType<'a>>,
    pub names: OperationNameLists,
    /// Keyed by operation name, in registration order
    pub messages: IndexMap<String, OperationMessages>,
}

impl ResolvedMetadata<'_> {
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types
            .iter()
            .map(|resolved| resolved.descriptor.name.as_str())
    }
}

pub struct XsdMetadata<'a> {
    registry: &'a OperationRegistry,
    modes: GenerationModes,
}

impl<'a> XsdMetadata<'a> {
    pub fn new(registry: &'a OperationRegistry, modes: GenerationModes) -> Self {
        Self { registry, modes }
    }

    pub fn resolve(&self) -> Result<ResolvedMetadata<'a>, MetadataError> {
        let mut types = IndexMap::new();
        let mut names = OperationNameLists::default();
        let mut messages = IndexMap::new();

        for operation in self.registry.operations() {
            let referenced_by = format!("operation '{}'", operation.name());

            self.visit_message(operation, &operation.request, &mut types)?;
            if let Some(response) = &operation.response {
                self.visit_message(operation, response, &mut types)?;
            }

            // Visit the fields only once both messages are marked as roots, so a response type
            // referenced from the request is still recognized as a root.
            self.visit_fields(&operation.request, &referenced_by, &mut types)?;
            if let Some(response) = &operation.response {
                self.visit_fields(response, &referenced_by, &mut types)?;
            }

            match operation.response {
                Some(_) => names
                    .reply_operation_names
                    .push(operation.name().to_string()),
                None => names
                    .one_way_operation_names
                    .push(operation.name().to_string()),
            }
            messages.insert(
                operation.name().to_string(),
                OperationMessages {
                    request: operation.request.clone(),
                    response: operation.response.clone(),
                },
            );
        }

        if self.modes.include_all_types_in_assembly {
            for descriptor in self.registry.types() {
                self.visit(&descriptor.name, "the type catalog", &mut types)?;
            }
        }

        tracing::debug!(
            types = types.len(),
            reply_operations = names.reply_operation_names.len(),
            one_way_operations = names.one_way_operation_names.len(),
            include_all_types = self.modes.include_all_types_in_assembly,
            "Resolved service metadata"
        );

        Ok(ResolvedMetadata {
            types: types.into_values().collect(),
            names,
            messages,
        })
    }

    fn visit_message(
        &self,
        operation: &OperationType,
        type_name: &str,
        types: &mut IndexMap<&'a str, ResolvedType<'a>>,
    ) -> Result<(), MetadataError> {
        let descriptor = self.lookup(type_name, &format!("operation '{}'", operation.name()))?;
        if !descriptor.is_complex() {
            return Err(MetadataError::InvalidMessageType {
                operation: operation.name().to_string(),
                type_name: type_name.to_string(),
            });
        }

        types
            .entry(descriptor.name.as_str())
            .or_insert(ResolvedType {
                descriptor,
                is_operation_root: true,
            })
            .is_operation_root = true;
        Ok(())
    }

    /// Record `type_name` (if not yet seen) and everything reachable from it, depth first.
    fn visit(
        &self,
        type_name: &str,
        referenced_by: &str,
        types: &mut IndexMap<&'a str, ResolvedType<'a>>,
    ) -> Result<(), MetadataError> {
        if types.contains_key(type_name) {
            return Ok(());
        }

        let descriptor = self.lookup(type_name, referenced_by)?;
        types.insert(
            descriptor.name.as_str(),
            ResolvedType {
                descriptor,
                is_operation_root: false,
            },
        );

        self.visit_fields(type_name, referenced_by, types)
    }

    fn visit_fields(
        &self,
        type_name: &str,
        referenced_by: &str,
        types: &mut IndexMap<&'a str, ResolvedType<'a>>,
    ) -> Result<(), MetadataError> {
        let descriptor = self.lookup(type_name, referenced_by)?;
        let referenced_by = format!("type '{}'", descriptor.name);

        for field_type in descriptor.referenced_types() {
            self.visit(field_type, &referenced_by, types)?;
        }
        Ok(())
    }

    fn lookup(
        &self,
        type_name: &str,
        referenced_by: &str,
    ) -> Result<&'a TypeDescriptor, MetadataError> {
        self.registry
            .get_type(type_name)
            .ok_or_else(|| MetadataError::UnknownType {
                type_name: type_name.to_string(),
                referenced_by: referenced_by.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FieldDescriptor, PrimitiveType, TypeDescriptor};

    fn foo_registry() -> OperationRegistry {
        let mut registry = OperationRegistry::new();
        registry
            .add_type(
                TypeDescriptor::complex("GetFoo")
                    .with_field(FieldDescriptor::primitive("Id", PrimitiveType::Int)),
            )
            .unwrap()
            .add_type(
                TypeDescriptor::complex("FooResponse")
                    .with_field(FieldDescriptor::named("Foo", "Foo").optional()),
            )
            .unwrap()
            .add_type(
                TypeDescriptor::complex("Foo")
                    .with_field(FieldDescriptor::named("Status", "FooStatus"))
                    .with_field(FieldDescriptor::named("Children", "Foo").array()),
            )
            .unwrap()
            .add_type(TypeDescriptor::enumeration("FooStatus", ["Active", "Retired"]))
            .unwrap()
            .add_type(TypeDescriptor::complex("Ping"))
            .unwrap()
            .add_type(
                TypeDescriptor::complex("AuditEntry")
                    .with_field(FieldDescriptor::named("Actor", "Actor")),
            )
            .unwrap()
            .add_type(TypeDescriptor::alias("Actor", PrimitiveType::String))
            .unwrap();

        registry
            .register(
                OperationType::new("GetFoo")
                    .with_name("Op1")
                    .with_response("FooResponse"),
            )
            .unwrap()
            .register(OperationType::new("Ping").with_name("Op2"))
            .unwrap();
        registry
    }

    #[test]
    fn operation_partition() {
        let registry = foo_registry();
        let metadata = XsdMetadata::new(&registry, GenerationModes::default())
            .resolve()
            .unwrap();

        assert_eq!(metadata.names.reply_operation_names, vec!["Op1"]);
        assert_eq!(metadata.names.one_way_operation_names, vec!["Op2"]);
        assert_eq!(
            metadata.messages["Op1"],
            OperationMessages {
                request: "GetFoo".to_string(),
                response: Some("FooResponse".to_string()),
            }
        );
        assert_eq!(metadata.messages["Op2"].response, None);
    }

    #[test]
    fn type_closure_order() {
        let registry = foo_registry();
        let metadata = XsdMetadata::new(&registry, GenerationModes::default())
            .resolve()
            .unwrap();

        assert_eq!(
            metadata.type_names().collect::<Vec<_>>(),
            vec!["GetFoo", "FooResponse", "Foo", "FooStatus", "Ping"]
        );

        let roots = metadata
            .types
            .iter()
            .filter(|resolved| resolved.is_operation_root)
            .map(|resolved| resolved.descriptor.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(roots, vec!["GetFoo", "FooResponse", "Ping"]);
    }

    #[test]
    fn include_all_types_is_superset() {
        let registry = foo_registry();
        let default = XsdMetadata::new(&registry, GenerationModes::new(false, false))
            .resolve()
            .unwrap();
        let all = XsdMetadata::new(&registry, GenerationModes::new(false, true))
            .resolve()
            .unwrap();

        let default_names = default.type_names().collect::<Vec<_>>();
        let all_names = all.type_names().collect::<Vec<_>>();

        assert_eq!(&all_names[..default_names.len()], &default_names[..]);
        assert_eq!(&all_names[default_names.len()..], &["AuditEntry", "Actor"]);
        assert_eq!(all.names, default.names);
    }

    #[test]
    fn flash_does_not_change_types() {
        let registry = foo_registry();
        let default = XsdMetadata::new(&registry, GenerationModes::new(false, false))
            .resolve()
            .unwrap();
        let flash = XsdMetadata::new(&registry, GenerationModes::new(true, false))
            .resolve()
            .unwrap();

        assert!(default.type_names().eq(flash.type_names()));
    }

    #[test]
    fn cycle_terminates() {
        let mut registry = OperationRegistry::new();
        registry
            .add_type(TypeDescriptor::complex("A").with_field(FieldDescriptor::named("B", "B")))
            .unwrap()
            .add_type(TypeDescriptor::complex("B").with_field(FieldDescriptor::named("A", "A")))
            .unwrap();
        registry.register(OperationType::new("A")).unwrap();

        let metadata = XsdMetadata::new(&registry, GenerationModes::default())
            .resolve()
            .unwrap();
        assert_eq!(metadata.type_names().collect::<Vec<_>>(), vec!["A", "B"]);
    }

    #[test]
    fn response_referenced_by_request_is_root() {
        let mut registry = OperationRegistry::new();
        registry
            .add_type(
                TypeDescriptor::complex("Echo").with_field(FieldDescriptor::named("Last", "Echoed")),
            )
            .unwrap()
            .add_type(TypeDescriptor::complex("Echoed"))
            .unwrap();
        registry
            .register(OperationType::new("Echo").with_response("Echoed"))
            .unwrap();

        let metadata = XsdMetadata::new(&registry, GenerationModes::default())
            .resolve()
            .unwrap();
        assert!(metadata.types.iter().all(|resolved| resolved.is_operation_root));
    }

    #[test]
    fn empty_registry() {
        let registry = OperationRegistry::new();
        let metadata = XsdMetadata::new(&registry, GenerationModes::new(true, true))
            .resolve()
            .unwrap();

        assert!(metadata.types.is_empty());
        assert_eq!(metadata.names, OperationNameLists::default());
    }

    #[test]
    fn unknown_type() {
        let mut registry = OperationRegistry::new();
        registry
            .add_type(
                TypeDescriptor::complex("GetBar").with_field(FieldDescriptor::named("Bar", "Bar")),
            )
            .unwrap();
        registry.register(OperationType::new("GetBar")).unwrap();

        let err = XsdMetadata::new(&registry, GenerationModes::default())
            .resolve()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Type 'Bar' referenced by type 'GetBar' is not registered"
        );

        let mut registry = OperationRegistry::new();
        registry.register(OperationType::new("Missing")).unwrap();
        assert!(matches!(
            XsdMetadata::new(&registry, GenerationModes::default()).resolve(),
            Err(MetadataError::UnknownType { type_name, .. }) if type_name == "Missing"
        ));
    }

    #[test]
    fn enum_message_rejected() {
        let mut registry = OperationRegistry::new();
        registry
            .add_type(TypeDescriptor::enumeration("Color", ["Red"]))
            .unwrap();
        registry.register(OperationType::new("Color")).unwrap();

        assert!(matches!(
            XsdMetadata::new(&registry, GenerationModes::default()).resolve(),
            Err(MetadataError::InvalidMessageType { operation, .. }) if operation == "Color"
        ));
    }
}

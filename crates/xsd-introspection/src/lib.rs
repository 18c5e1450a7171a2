// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! XSD introspection for SOAP service hosts.
//!
//! This crate provides types and utilities for:
//! - Describing the data shapes exchanged by service operations
//! - Registering operations (request type, optional response type)
//! - Resolving the closure of types reachable from the registered operations
//! - Generating an XML Schema document for those types
//!
//! # Example
//!
//! ```
//! use xsd_introspection::metadata::{GenerationModes, XsdMetadata};
//! use xsd_introspection::registry::{OperationRegistry, OperationType};
//! use xsd_introspection::types::{FieldDescriptor, PrimitiveType, TypeDescriptor};
//! use xsd_introspection::xsd::XsdGenerator;
//!
//! let mut registry = OperationRegistry::new();
//! registry.add_type(
//!     TypeDescriptor::complex("Hello")
//!         .with_field(FieldDescriptor::primitive("Name", PrimitiveType::String)),
//! )?;
//! registry.add_type(TypeDescriptor::complex("HelloResponse"))?;
//! registry.register(OperationType::new("Hello").with_response("HelloResponse"))?;
//!
//! let modes = GenerationModes::default();
//! let metadata = XsdMetadata::new(&registry, modes).resolve()?;
//! let xsd = XsdGenerator::new(&metadata.types, "http://tempuri.org/types", modes).generate()?;
//! assert!(xsd.contains(r#"<xs:complexType name="Hello">"#));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod metadata;
pub mod registry;
pub mod types;
pub mod xml;
pub mod xsd;

pub use error::{MetadataError, XsdError};
pub use metadata::{GenerationModes, OperationNameLists, ResolvedMetadata, XsdMetadata};
pub use registry::{OperationRegistry, OperationType};
pub use types::{FieldDescriptor, FieldType, PrimitiveType, TypeDescriptor, TypeKind};
pub use xsd::XsdGenerator;

// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Type descriptors: the shapes of the data exchanged by service operations.
//!
//! Descriptors refer to each other by name (see [`FieldType::Named`]), which lets a type graph
//! contain cycles without any ownership gymnastics. Names are resolved against the
//! [`crate::registry::OperationRegistry`] they are registered with.

use serde::{Deserialize, Serialize};

/// Scalar kinds with a fixed XML Schema representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    String,
    Char,
    Bool,
    Byte,
    SByte,
    Short,
    UShort,
    Int,
    UInt,
    Long,
    ULong,
    Float,
    Double,
    Decimal,
    DateTime,
    Date,
    Time,
    Duration,
    Guid,
    Binary,
    Uri,
}

impl PrimitiveType {
    /// The local name of the built-in XML Schema type this primitive maps to.
    pub fn xsd_name(self) -> &'static str {
        match self {
            Self::String | Self::Char | Self::Guid => "string",
            Self::Uri => "anyURI",
            Self::Bool => "boolean",
            Self::Byte => "unsignedByte",
            Self::SByte => "byte",
            Self::Short => "short",
            Self::UShort => "unsignedShort",
            Self::Int => "int",
            Self::UInt => "unsignedInt",
            Self::Long => "long",
            Self::ULong => "unsignedLong",
            Self::Float => "float",
            Self::Double => "double",
            Self::Decimal => "decimal",
            Self::DateTime => "dateTime",
            Self::Date => "date",
            Self::Time => "time",
            Self::Duration => "duration",
            Self::Binary => "base64Binary",
        }
    }

    /// The element name of this primitive inside an `ArrayOf` wrapper. Primitives that share an
    /// XSD type keep their own name, so their wrappers stay distinct.
    pub fn array_item_name(self) -> &'static str {
        match self {
            Self::Char => "char",
            Self::Guid => "guid",
            _ => self.xsd_name(),
        }
    }

    /// Value types always carry a value unless explicitly made optional; reference types
    /// (strings, URIs, binary blobs) may be nil.
    pub fn is_value_type(self) -> bool {
        !matches!(self, Self::String | Self::Uri | Self::Binary)
    }
}

/// The type of a field: a primitive, or a reference to a named descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Primitive(PrimitiveType),
    Named(String),
}

impl FieldType {
    pub fn named(type_name: impl Into<String>) -> Self {
        Self::Named(type_name.into())
    }

    pub fn type_name(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name),
            Self::Primitive(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// The field may be absent (or nil).
    #[serde(default)]
    pub optional: bool,
    /// The field holds a sequence of `field_type` values.
    #[serde(default)]
    pub array: bool,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            optional: false,
            array: false,
        }
    }

    pub fn primitive(name: impl Into<String>, primitive: PrimitiveType) -> Self {
        Self::new(name, FieldType::Primitive(primitive))
    }

    pub fn named(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::new(name, FieldType::named(type_name))
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn array(mut self) -> Self {
        self.array = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeKind {
    /// A named alias of a scalar (emitted as a simple type restricting the scalar)
    Primitive {
        #[serde(rename = "type")]
        primitive: PrimitiveType,
    },
    /// A structure with an ordered list of fields
    Complex {
        #[serde(default)]
        fields: Vec<FieldDescriptor>,
    },
    /// A closed set of string values
    Enum { members: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    pub name: String,
    /// The XML namespace of the type. `None` means the schema's target namespace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(flatten)]
    pub kind: TypeKind,
}

impl TypeDescriptor {
    pub fn complex(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            kind: TypeKind::Complex { fields: Vec::new() },
        }
    }

    pub fn enumeration<S: Into<String>>(
        name: impl Into<String>,
        members: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            kind: TypeKind::Enum {
                members: members.into_iter().map(Into::into).collect(),
            },
        }
    }

    pub fn alias(name: impl Into<String>, primitive: PrimitiveType) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            kind: TypeKind::Primitive { primitive },
        }
    }

    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Append a field. Has no effect on enum and primitive types.
    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        if let TypeKind::Complex { fields } = &mut self.kind {
            fields.push(field);
        }
        self
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        match &self.kind {
            TypeKind::Complex { fields } => fields,
            TypeKind::Primitive { .. } | TypeKind::Enum { .. } => &[],
        }
    }

    pub fn is_complex(&self) -> bool {
        matches!(self.kind, TypeKind::Complex { .. })
    }

    /// Names of the types directly referenced by this type's fields, in field order.
    pub fn referenced_types(&self) -> impl Iterator<Item = &str> {
        self.fields()
            .iter()
            .filter_map(|field| field.field_type.type_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_builder() {
        let order = TypeDescriptor::complex("Order")
            .with_field(FieldDescriptor::primitive("Id", PrimitiveType::Long))
            .with_field(FieldDescriptor::named("Customer", "Customer").optional())
            .with_field(FieldDescriptor::named("Lines", "OrderLine").array())
            .with_field(FieldDescriptor::primitive("Tags", PrimitiveType::String).array());

        assert!(order.is_complex());
        assert_eq!(order.fields().len(), 4);
        assert_eq!(
            order.referenced_types().collect::<Vec<_>>(),
            vec!["Customer", "OrderLine"]
        );

        let status = TypeDescriptor::enumeration("Status", ["Open", "Closed"])
            .with_field(FieldDescriptor::primitive("Ignored", PrimitiveType::Int));
        assert!(status.fields().is_empty());
    }

    #[test]
    fn descriptor_json_shape() {
        let json = serde_json::json!({
            "name": "Customer",
            "kind": "complex",
            "fields": [
                { "name": "Name", "type": { "primitive": "string" } },
                { "name": "Orders", "type": { "named": "Order" }, "array": true, "optional": true }
            ]
        });

        let customer: TypeDescriptor = serde_json::from_value(json).unwrap();
        assert_eq!(
            customer,
            TypeDescriptor::complex("Customer")
                .with_field(FieldDescriptor::primitive("Name", PrimitiveType::String))
                .with_field(FieldDescriptor::named("Orders", "Order").array().optional())
        );

        let alias: TypeDescriptor = serde_json::from_value(serde_json::json!({
            "name": "CustomerId",
            "namespace": "http://example.org/other",
            "kind": "primitive",
            "type": "guid"
        }))
        .unwrap();
        assert_eq!(
            alias,
            TypeDescriptor::alias("CustomerId", PrimitiveType::Guid)
                .in_namespace("http://example.org/other")
        );
    }

    #[test]
    fn primitive_mapping() {
        assert_eq!(PrimitiveType::DateTime.xsd_name(), "dateTime");
        assert_eq!(PrimitiveType::Binary.xsd_name(), "base64Binary");
        assert_eq!(PrimitiveType::Guid.xsd_name(), "string");
        assert_eq!(PrimitiveType::Guid.array_item_name(), "guid");
        assert_eq!(PrimitiveType::String.array_item_name(), "string");
        assert!(PrimitiveType::Int.is_value_type());
        assert!(!PrimitiveType::String.is_value_type());
    }
}

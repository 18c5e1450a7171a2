// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! XML Schema generation for a resolved set of types.
//!
//! Types always refer to each other by qualified name (`tns:Name`), so every type is defined
//! exactly once no matter how the type graph is shaped, cycles included.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::error::XsdError;
use crate::metadata::{GenerationModes, ResolvedType};
use crate::types::{FieldDescriptor, FieldType, TypeDescriptor, TypeKind};
use crate::xml::XmlWriter;

pub const XML_SCHEMA_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

/// How a field's item type appears in the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ItemType {
    qualified_name: String,
    local_name: String,
    nillable: bool,
}

impl ItemType {
    fn array_type_name(&self) -> String {
        format!("ArrayOf{}", self.local_name)
    }
}

pub struct XsdGenerator<'a> {
    types: &'a [ResolvedType<'a>],
    target_namespace: &'a str,
    modes: GenerationModes,
}

impl<'a> XsdGenerator<'a> {
    pub fn new(
        types: &'a [ResolvedType<'a>],
        target_namespace: &'a str,
        modes: GenerationModes,
    ) -> Self {
        Self {
            types,
            target_namespace,
            modes,
        }
    }

    pub fn generate(&self) -> Result<String, XsdError> {
        self.check_namespaces()?;

        let by_name: HashMap<&str, &TypeDescriptor> = self
            .types
            .iter()
            .map(|resolved| (resolved.descriptor.name.as_str(), resolved.descriptor))
            .collect();

        let array_types = if self.modes.optimize_for_flash {
            IndexMap::new()
        } else {
            self.collect_array_types(&by_name)?
        };

        let mut writer = XmlWriter::new();
        writer.start(
            "xs:schema",
            &[
                ("xmlns:xs", XML_SCHEMA_NAMESPACE),
                ("xmlns:tns", self.target_namespace),
                ("elementFormDefault", "qualified"),
                ("targetNamespace", self.target_namespace),
            ],
        )?;

        for resolved in self.types {
            self.write_type(&mut writer, resolved.descriptor, &by_name)?;

            if resolved.is_operation_root || self.modes.include_all_types_in_assembly {
                self.write_global_element(&mut writer, &resolved.descriptor.name)?;
            }
        }

        for (array_type_name, item) in &array_types {
            self.write_array_type(&mut writer, array_type_name, item)?;

            if self.modes.include_all_types_in_assembly {
                self.write_global_element(&mut writer, array_type_name)?;
            }
        }

        writer.end("xs:schema")?;

        tracing::debug!(
            types = self.types.len(),
            array_types = array_types.len(),
            flash = self.modes.optimize_for_flash,
            "Generated XSD"
        );

        Ok(writer.finish()?)
    }

    fn check_namespaces(&self) -> Result<(), XsdError> {
        for resolved in self.types {
            let descriptor = resolved.descriptor;
            match &descriptor.namespace {
                Some(namespace) if namespace.as_str() != self.target_namespace => {
                    return Err(XsdError::ForeignNamespace {
                        type_name: descriptor.name.clone(),
                        namespace: namespace.clone(),
                        target_namespace: self.target_namespace.to_string(),
                    });
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// The `ArrayOfX` wrapper types needed by array fields, in first-use order.
    fn collect_array_types(
        &self,
        by_name: &HashMap<&str, &TypeDescriptor>,
    ) -> Result<IndexMap<String, ItemType>, XsdError> {
        let mut array_types = IndexMap::new();

        for resolved in self.types {
            for field in resolved.descriptor.fields().iter().filter(|f| f.array) {
                let item = item_type(&field.field_type, &resolved.descriptor.name, by_name)?;
                let array_type_name = item.array_type_name();

                if by_name.contains_key(array_type_name.as_str()) {
                    return Err(XsdError::NameCollision(array_type_name));
                }
                match array_types.get(&array_type_name) {
                    Some(existing) if *existing != item => {
                        return Err(XsdError::NameCollision(array_type_name));
                    }
                    Some(_) => {}
                    None => {
                        array_types.insert(array_type_name, item);
                    }
                }
            }
        }

        Ok(array_types)
    }

    fn write_type(
        &self,
        writer: &mut XmlWriter,
        descriptor: &TypeDescriptor,
        by_name: &HashMap<&str, &TypeDescriptor>,
    ) -> Result<(), XsdError> {
        let name = descriptor.name.as_str();

        match &descriptor.kind {
            TypeKind::Complex { fields } => {
                writer.start("xs:complexType", &[("name", name)])?;
                if fields.is_empty() {
                    writer.empty("xs:sequence", &[])?;
                } else {
                    writer.start("xs:sequence", &[])?;
                    for field in fields {
                        self.write_field(writer, field, name, by_name)?;
                    }
                    writer.end("xs:sequence")?;
                }
                writer.end("xs:complexType")?;
            }
            TypeKind::Enum { members } => {
                writer.start("xs:simpleType", &[("name", name)])?;
                if members.is_empty() {
                    writer.empty("xs:restriction", &[("base", "xs:string")])?;
                } else {
                    writer.start("xs:restriction", &[("base", "xs:string")])?;
                    for member in members {
                        writer.empty("xs:enumeration", &[("value", member.as_str())])?;
                    }
                    writer.end("xs:restriction")?;
                }
                writer.end("xs:simpleType")?;
            }
            TypeKind::Primitive { primitive } => {
                let base = format!("xs:{}", primitive.xsd_name());
                writer.start("xs:simpleType", &[("name", name)])?;
                writer.empty("xs:restriction", &[("base", base.as_str())])?;
                writer.end("xs:simpleType")?;
            }
        }

        Ok(())
    }

    fn write_field(
        &self,
        writer: &mut XmlWriter,
        field: &FieldDescriptor,
        owner: &str,
        by_name: &HashMap<&str, &TypeDescriptor>,
    ) -> Result<(), XsdError> {
        let flash = self.modes.optimize_for_flash;
        let item = item_type(&field.field_type, owner, by_name)?;

        let type_name = if field.array && !flash {
            format!("tns:{}", item.array_type_name())
        } else {
            item.qualified_name
        };

        let mut attributes = vec![];
        if flash && field.array {
            // Flash clients do not understand wrapper types; repeat the element instead
            attributes.push(("minOccurs", "0"));
            attributes.push(("maxOccurs", "unbounded"));
        } else if field.optional {
            attributes.push(("minOccurs", "0"));
        }
        attributes.push(("name", field.name.as_str()));
        if field.optional && !flash {
            attributes.push(("nillable", "true"));
        }
        attributes.push(("type", type_name.as_str()));

        writer.empty("xs:element", &attributes)?;
        Ok(())
    }

    fn write_array_type(
        &self,
        writer: &mut XmlWriter,
        array_type_name: &str,
        item: &ItemType,
    ) -> Result<(), XsdError> {
        let mut attributes = vec![
            ("minOccurs", "0"),
            ("maxOccurs", "unbounded"),
            ("name", item.local_name.as_str()),
        ];
        if item.nillable {
            attributes.push(("nillable", "true"));
        }
        attributes.push(("type", item.qualified_name.as_str()));

        writer.start("xs:complexType", &[("name", array_type_name)])?;
        writer.start("xs:sequence", &[])?;
        writer.empty("xs:element", &attributes)?;
        writer.end("xs:sequence")?;
        writer.end("xs:complexType")?;
        Ok(())
    }

    fn write_global_element(&self, writer: &mut XmlWriter, name: &str) -> Result<(), XsdError> {
        let type_name = format!("tns:{name}");

        if self.modes.optimize_for_flash {
            writer.empty("xs:element", &[("name", name), ("type", type_name.as_str())])?;
        } else {
            writer.empty(
                "xs:element",
                &[("name", name), ("nillable", "true"), ("type", type_name.as_str())],
            )?;
        }
        Ok(())
    }
}

fn item_type(
    field_type: &FieldType,
    owner: &str,
    by_name: &HashMap<&str, &TypeDescriptor>,
) -> Result<ItemType, XsdError> {
    match field_type {
        FieldType::Primitive(primitive) => Ok(ItemType {
            qualified_name: format!("xs:{}", primitive.xsd_name()),
            local_name: primitive.array_item_name().to_string(),
            nillable: !primitive.is_value_type(),
        }),
        FieldType::Named(type_name) => {
            let descriptor =
                by_name
                    .get(type_name.as_str())
                    .ok_or_else(|| XsdError::MissingType {
                        type_name: type_name.clone(),
                        referenced_by: owner.to_string(),
                    })?;

            let nillable = match &descriptor.kind {
                TypeKind::Complex { .. } => true,
                TypeKind::Enum { .. } => false,
                TypeKind::Primitive { primitive } => !primitive.is_value_type(),
            };

            Ok(ItemType {
                qualified_name: format!("tns:{type_name}"),
                local_name: type_name.clone(),
                nillable,
            })
        }
    }
}

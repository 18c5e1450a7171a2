// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use thiserror::Error;
use xsd_introspection::xml::{XmlError, XmlWriter};
use xsd_introspection::xsd::XML_SCHEMA_NAMESPACE;

use crate::template::WsdlTemplate;

pub const WSDL_NAMESPACE: &str = "http://schemas.xmlsoap.org/wsdl/";
pub const SOAP_HTTP_TRANSPORT: &str = "http://schemas.xmlsoap.org/soap/http";

const SYNC_REPLY_PORT_TYPE: &str = "ISyncReply";
const ONE_WAY_PORT_TYPE: &str = "IOneWay";
const SYNC_REPLY_SERVICE: &str = "SyncReply";
const ONE_WAY_SERVICE: &str = "AsyncOneWay";

#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    Xml(#[from] XmlError),
}

/// Turns a populated [`WsdlTemplate`] into document text.
pub trait WsdlRenderer: Send + Sync {
    fn render(&self, template: &WsdlTemplate) -> Result<String, RenderError>;
}

/// Renders WSDL 1.1 with a streaming XML writer.
#[derive(Debug, Default, Clone, Copy)]
pub struct XmlWsdlRenderer;

impl WsdlRenderer for XmlWsdlRenderer {
    fn render(&self, template: &WsdlTemplate) -> Result<String, RenderError> {
        let mut writer = XmlWriter::new();
        let soap_prefix = template.binding_kind.soap_prefix();
        let soap_namespace_declaration = format!("xmlns:{soap_prefix}");

        writer.declaration()?;
        writer.start(
            "wsdl:definitions",
            &[
                ("name", template.service_name.as_str()),
                ("targetNamespace", template.target_namespace.as_str()),
                ("xmlns:wsdl", WSDL_NAMESPACE),
                (
                    soap_namespace_declaration.as_str(),
                    template.binding_kind.soap_namespace(),
                ),
                ("xmlns:xs", XML_SCHEMA_NAMESPACE),
                ("xmlns:tns", template.target_namespace.as_str()),
            ],
        )?;

        writer.start("wsdl:types", &[])?;
        writer.raw(&template.xsd)?;
        writer.end("wsdl:types")?;

        write_messages(&mut writer, template)?;

        let reply = template.reply_operation_names.as_slice();
        let one_way = template.one_way_operation_names.as_slice();

        if !reply.is_empty() {
            write_port_type(&mut writer, SYNC_REPLY_PORT_TYPE, reply, true)?;
        }
        if !one_way.is_empty() {
            write_port_type(&mut writer, ONE_WAY_PORT_TYPE, one_way, false)?;
        }

        if !reply.is_empty() {
            write_binding(&mut writer, template, SYNC_REPLY_PORT_TYPE, reply, true)?;
        }
        if !one_way.is_empty() {
            write_binding(&mut writer, template, ONE_WAY_PORT_TYPE, one_way, false)?;
        }

        if !reply.is_empty() {
            write_service(
                &mut writer,
                template,
                SYNC_REPLY_SERVICE,
                SYNC_REPLY_PORT_TYPE,
                &template.reply_endpoint_uri,
            )?;
        }
        if !one_way.is_empty() {
            write_service(
                &mut writer,
                template,
                ONE_WAY_SERVICE,
                ONE_WAY_PORT_TYPE,
                &template.one_way_endpoint_uri,
            )?;
        }

        writer.end("wsdl:definitions")?;

        Ok(writer.finish()?)
    }
}

fn write_messages(writer: &mut XmlWriter, template: &WsdlTemplate) -> Result<(), XmlError> {
    for operation in &template.reply_operation_names {
        let messages = template.messages_for(operation);
        let response = messages
            .response
            .unwrap_or_else(|| format!("{operation}Response"));

        write_message(writer, &format!("{operation}In"), &messages.request)?;
        write_message(writer, &format!("{operation}Out"), &response)?;
    }

    for operation in &template.one_way_operation_names {
        let messages = template.messages_for(operation);
        write_message(writer, &format!("{operation}In"), &messages.request)?;
    }
    Ok(())
}

fn write_message(writer: &mut XmlWriter, name: &str, element: &str) -> Result<(), XmlError> {
    let element = format!("tns:{element}");

    writer.start("wsdl:message", &[("name", name)])?;
    writer.empty("wsdl:part", &[("name", "par"), ("element", element.as_str())])?;
    writer.end("wsdl:message")
}

fn write_port_type(
    writer: &mut XmlWriter,
    port_type: &str,
    operations: &[String],
    with_output: bool,
) -> Result<(), XmlError> {
    writer.start("wsdl:portType", &[("name", port_type)])?;
    for operation in operations {
        let input = format!("tns:{operation}In");

        writer.start("wsdl:operation", &[("name", operation.as_str())])?;
        writer.empty("wsdl:input", &[("message", input.as_str())])?;
        if with_output {
            let output = format!("tns:{operation}Out");
            writer.empty("wsdl:output", &[("message", output.as_str())])?;
        }
        writer.end("wsdl:operation")?;
    }
    writer.end("wsdl:portType")
}

fn write_binding(
    writer: &mut XmlWriter,
    template: &WsdlTemplate,
    port_type: &str,
    operations: &[String],
    with_output: bool,
) -> Result<(), XmlError> {
    let soap_prefix = template.binding_kind.soap_prefix();
    let soap_binding = format!("{soap_prefix}:binding");
    let soap_operation = format!("{soap_prefix}:operation");
    let soap_body = format!("{soap_prefix}:body");

    let name = template.binding_name(port_type);
    let port_type = format!("tns:{port_type}");

    writer.start(
        "wsdl:binding",
        &[("name", name.as_str()), ("type", port_type.as_str())],
    )?;
    writer.empty(&soap_binding, &[("transport", SOAP_HTTP_TRANSPORT)])?;

    for operation in operations {
        let soap_action = template.soap_action(operation);

        writer.start("wsdl:operation", &[("name", operation.as_str())])?;
        writer.empty(
            &soap_operation,
            &[("soapAction", soap_action.as_str()), ("style", "document")],
        )?;

        writer.start("wsdl:input", &[])?;
        writer.empty(&soap_body, &[("use", "literal")])?;
        writer.end("wsdl:input")?;

        if with_output {
            writer.start("wsdl:output", &[])?;
            writer.empty(&soap_body, &[("use", "literal")])?;
            writer.end("wsdl:output")?;
        }
        writer.end("wsdl:operation")?;
    }

    writer.end("wsdl:binding")
}

fn write_service(
    writer: &mut XmlWriter,
    template: &WsdlTemplate,
    service: &str,
    port_type: &str,
    location: &str,
) -> Result<(), XmlError> {
    let soap_address = format!("{}:address", template.binding_kind.soap_prefix());
    let name = template.binding_name(port_type);
    let binding = format!("tns:{name}");

    writer.start("wsdl:service", &[("name", service)])?;
    writer.start(
        "wsdl:port",
        &[("name", name.as_str()), ("binding", binding.as_str())],
    )?;
    writer.empty(&soap_address, &[("location", location)])?;
    writer.end("wsdl:port")?;
    writer.end("wsdl:service")
}

// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! The WSDL document model.
//!
//! A template is created per request, fully populated by [`WsdlTemplate::assemble`], handed to a
//! [`crate::render::WsdlRenderer`] and then dropped.

use common::env_const::{get_service_name, get_target_namespace};
use indexmap::IndexMap;
use soap_env::Environment;
use xsd_introspection::metadata::{OperationMessages, ResolvedMetadata};

use crate::endpoint::{BindingKind, EndpointUris};

/// Host-wide settings that name the described service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSettings {
    pub service_name: String,
    pub target_namespace: String,
}

impl ServiceSettings {
    pub fn new(service_name: impl Into<String>, target_namespace: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            target_namespace: target_namespace.into(),
        }
    }

    pub fn from_env(env: &dyn Environment) -> Self {
        Self::new(get_service_name(env), get_target_namespace(env))
    }
}

#[derive(Debug, Clone)]
pub struct WsdlTemplate {
    /// The schema document, embedded verbatim in `wsdl:types`
    pub xsd: String,
    pub reply_operation_names: Vec<String>,
    pub one_way_operation_names: Vec<String>,
    pub reply_endpoint_uri: String,
    pub one_way_endpoint_uri: String,
    /// Message element names, keyed by operation name
    pub messages: IndexMap<String, OperationMessages>,
    pub service_name: String,
    pub target_namespace: String,
    pub binding_kind: BindingKind,
}

impl WsdlTemplate {
    pub fn assemble(
        xsd: String,
        metadata: &ResolvedMetadata<'_>,
        endpoints: EndpointUris,
        binding_kind: BindingKind,
        settings: &ServiceSettings,
    ) -> Self {
        Self {
            xsd,
            reply_operation_names: metadata.names.reply_operation_names.clone(),
            one_way_operation_names: metadata.names.one_way_operation_names.clone(),
            reply_endpoint_uri: endpoints.reply,
            one_way_endpoint_uri: endpoints.one_way,
            messages: metadata.messages.clone(),
            service_name: settings.service_name.clone(),
            target_namespace: settings.target_namespace.clone(),
            binding_kind,
        }
    }

    /// The message elements of `operation`. Operations without a recorded entry use
    /// `{operation}` and `{operation}Response`.
    pub fn messages_for(&self, operation: &str) -> OperationMessages {
        self.messages
            .get(operation)
            .cloned()
            .unwrap_or_else(|| OperationMessages {
                request: operation.to_string(),
                response: Some(format!("{operation}Response")),
            })
    }

    pub fn soap_action(&self, operation: &str) -> String {
        if self.target_namespace.ends_with('/') {
            format!("{}{operation}", self.target_namespace)
        } else {
            format!("{}/{operation}", self.target_namespace)
        }
    }

    pub fn binding_name(&self, port_type: &str) -> String {
        format!("{}_{port_type}", self.binding_kind.binding_name_prefix())
    }
}

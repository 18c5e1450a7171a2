// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use common::env_const::is_constrained_runtime;
use common::features::{Feature, FeatureError, assert_features};
use common::http::{RequestHead, ResponsePayload, has_query_param};
use http::StatusCode;
use soap_env::Environment;
use xsd_introspection::metadata::{GenerationModes, XsdMetadata};
use xsd_introspection::registry::OperationRegistry;
use xsd_introspection::xsd::XsdGenerator;

use crate::endpoint::{BindingKind, EndpointUris};
use crate::error::WsdlError;
use crate::render::{WsdlRenderer, XmlWsdlRenderer};
use crate::request_url::{base_url, parent_base_url};
use crate::template::{ServiceSettings, WsdlTemplate};

pub const FLASH_QUERY_PARAM: &str = "flash";
pub const INCLUDE_ALL_TYPES_QUERY_PARAM: &str = "includeAllTypes";

pub const CONSTRAINED_RUNTIME_FALLBACK: &str = "Autogenerated WSDLs are not supported on Mono";
pub const UNSUPPORTED_CONFIGURATION_FALLBACK: &str =
    "Autogenerated WSDLs are not supported with this configuration";

const TEXT_XML: &str = "text/xml";

/// Serves the WSDL document of one SOAP binding.
pub struct WsdlMetadataHandler {
    registry: Arc<OperationRegistry>,
    env: Arc<dyn Environment>,
    binding_kind: BindingKind,
    settings: ServiceSettings,
    constrained_runtime: bool,
    renderer: Box<dyn WsdlRenderer>,
}

impl WsdlMetadataHandler {
    pub fn new(
        registry: Arc<OperationRegistry>,
        env: Arc<dyn Environment>,
        binding_kind: BindingKind,
    ) -> Self {
        let settings = ServiceSettings::from_env(env.as_ref());
        let constrained_runtime = is_constrained_runtime(env.as_ref());

        Self {
            registry,
            env,
            binding_kind,
            settings,
            constrained_runtime,
            renderer: Box::new(XmlWsdlRenderer),
        }
    }

    pub fn with_renderer(mut self, renderer: impl WsdlRenderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    pub fn binding_kind(&self) -> BindingKind {
        self.binding_kind
    }

    /// Respond to a WSDL request.
    ///
    /// Generation failures are logged and answered with a fixed explanation (still `200 OK`
    /// and `text/xml`); only a disabled metadata feature rejects the request.
    pub fn handle(&self, head: &(dyn RequestHead + Sync)) -> ResponsePayload {
        match assert_features(self.env.as_ref(), &[Feature::Metadata]) {
            Ok(()) => {}
            Err(e @ FeatureError::Disabled(_)) => {
                tracing::debug!("Rejected WSDL request: {e}");
                return ResponsePayload::status(StatusCode::FORBIDDEN, e.to_string());
            }
            Err(e) => {
                tracing::error!("Invalid feature configuration: {e}");
                return ResponsePayload::status(StatusCode::INTERNAL_SERVER_ERROR, e.to_string());
            }
        }

        let modes = GenerationModes::new(
            has_query_param(head, FLASH_QUERY_PARAM),
            has_query_param(head, INCLUDE_ALL_TYPES_QUERY_PARAM),
        );

        match self.generate(head, modes) {
            Ok(wsdl) => ResponsePayload::text(TEXT_XML, wsdl),
            Err(e) => {
                tracing::error!(binding = %self.binding_kind, "Autogeneration of WSDL failed: {e}");
                ResponsePayload::text(TEXT_XML, self.fallback_message())
            }
        }
    }

    /// Generate the WSDL document for a request, reporting failures to the caller.
    pub fn generate(
        &self,
        head: &(dyn RequestHead + Sync),
        modes: GenerationModes,
    ) -> Result<String, WsdlError> {
        let base_uri = parent_base_url(head, self.env.as_ref())?;
        let raw_url = base_url(head)?;

        self.generate_document(&raw_url, &base_uri, modes)
    }

    pub fn generate_document(
        &self,
        raw_url: &str,
        base_uri: &str,
        modes: GenerationModes,
    ) -> Result<String, WsdlError> {
        let metadata = XsdMetadata::new(&self.registry, modes).resolve()?;
        let xsd =
            XsdGenerator::new(&metadata.types, &self.settings.target_namespace, modes).generate()?;

        let endpoints = EndpointUris::resolve(raw_url, base_uri, self.binding_kind);
        tracing::debug!(
            binding = %self.binding_kind,
            endpoint = %endpoints.reply,
            flash = modes.optimize_for_flash,
            include_all_types = modes.include_all_types_in_assembly,
            "Assembling WSDL"
        );

        let template =
            WsdlTemplate::assemble(xsd, &metadata, endpoints, self.binding_kind, &self.settings);
        Ok(self.renderer.render(&template)?)
    }

    fn fallback_message(&self) -> &'static str {
        if self.constrained_runtime {
            CONSTRAINED_RUNTIME_FALLBACK
        } else {
            UNSUPPORTED_CONFIGURATION_FALLBACK
        }
    }
}

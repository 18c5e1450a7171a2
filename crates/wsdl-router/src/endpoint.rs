// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::fmt;

use common::env_const::{get_soap11_http_path, get_soap12_http_path};
use soap_env::Environment;

/// The SOAP protocol version a WSDL document binds its port types to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingKind {
    Soap11,
    Soap12,
}

impl BindingKind {
    pub fn path_segment(self) -> &'static str {
        match self {
            BindingKind::Soap11 => "soap11",
            BindingKind::Soap12 => "soap12",
        }
    }

    /// The namespace prefix of the WSDL SOAP binding extension elements.
    pub fn soap_prefix(self) -> &'static str {
        match self {
            BindingKind::Soap11 => "soap",
            BindingKind::Soap12 => "soap12",
        }
    }

    pub fn soap_namespace(self) -> &'static str {
        match self {
            BindingKind::Soap11 => "http://schemas.xmlsoap.org/wsdl/soap/",
            BindingKind::Soap12 => "http://schemas.xmlsoap.org/wsdl/soap12/",
        }
    }

    pub fn binding_name_prefix(self) -> &'static str {
        match self {
            BindingKind::Soap11 => "BasicHttpBinding",
            BindingKind::Soap12 => "WSHttpBinding",
        }
    }

    /// The route serving this binding's WSDL.
    pub fn http_path(self, env: &dyn Environment) -> String {
        match self {
            BindingKind::Soap11 => get_soap11_http_path(env),
            BindingKind::Soap12 => get_soap12_http_path(env),
        }
    }
}

impl fmt::Display for BindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingKind::Soap11 => write!(f, "SOAP 1.1"),
            BindingKind::Soap12 => write!(f, "SOAP 1.2"),
        }
    }
}

/// The address advertised by a WSDL document.
///
/// A request made under the service's base URI is advertised as is, so clients keep talking to
/// the URL they discovered the service through. Otherwise (for example behind a proxy that
/// rewrites paths) the canonical binding endpoint under the base URI is used.
pub fn resolve_endpoint_uri(raw_url: &str, base_uri: &str, binding_kind: BindingKind) -> String {
    if raw_url
        .to_lowercase()
        .starts_with(&base_uri.to_lowercase())
    {
        raw_url.to_string()
    } else {
        format!("{base_uri}{}", binding_kind.path_segment())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointUris {
    pub reply: String,
    pub one_way: String,
}

impl EndpointUris {
    pub fn resolve(raw_url: &str, base_uri: &str, binding_kind: BindingKind) -> Self {
        let uri = resolve_endpoint_uri(raw_url, base_uri, binding_kind);
        Self {
            reply: uri.clone(),
            one_way: uri,
        }
    }
}

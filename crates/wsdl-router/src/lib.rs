// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! WSDL endpoints for SOAP service hosts.
//!
//! Each request regenerates the document from the operation registry: metadata is resolved,
//! the XSD generated, the advertised endpoint chosen, and the WSDL template assembled and
//! rendered for the requested SOAP binding.

pub mod endpoint;
pub mod error;
pub mod handler;
pub mod render;
pub mod request_url;
pub mod template;
mod wsdl_router;

pub use endpoint::BindingKind;
pub use error::WsdlError;
pub use handler::WsdlMetadataHandler;
pub use wsdl_router::{WsdlRouter, create_wsdl_router};

// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use soap_env::EnvError;
use thiserror::Error;
use xsd_introspection::{MetadataError, XsdError};

use crate::render::RenderError;

/// Any failure while producing a WSDL document.
#[derive(Error, Debug)]
pub enum WsdlError {
    #[error("Failed to resolve service metadata: {0}")]
    Metadata(#[from] MetadataError),

    #[error("Failed to generate XSD: {0}")]
    Xsd(#[from] XsdError),

    #[error("{0}")]
    Render(#[from] RenderError),

    #[error("Invalid request URL: {0}")]
    RequestUrl(#[from] url::ParseError),

    #[error(transparent)]
    Env(#[from] EnvError),
}

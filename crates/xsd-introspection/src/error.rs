// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use thiserror::Error;

use crate::xml::XmlError;

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("Type '{type_name}' referenced by {referenced_by} is not registered")]
    UnknownType {
        type_name: String,
        referenced_by: String,
    },

    #[error("Operation '{operation}' uses '{type_name}' as a message, but it is not a complex type")]
    InvalidMessageType { operation: String, type_name: String },

    #[error("Operation '{0}' is already registered")]
    DuplicateOperation(String),

    #[error("Type '{0}' is already registered")]
    DuplicateType(String),

    #[error("Invalid operation registry: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum XsdError {
    #[error(
        "Type '{type_name}' belongs to namespace '{namespace}', but the schema targets '{target_namespace}'"
    )]
    ForeignNamespace {
        type_name: String,
        namespace: String,
        target_namespace: String,
    },

    #[error("Schema type '{0}' is defined more than once")]
    NameCollision(String),

    #[error("Type '{type_name}' referenced by type '{referenced_by}' is not part of the schema")]
    MissingType {
        type_name: String,
        referenced_by: String,
    },

    #[error(transparent)]
    Xml(#[from] XmlError),
}

// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::fmt;

use soap_env::{EnvError, Environment};

use crate::env_const::SOAP_ENABLE_METADATA;

/// Host features that can be switched off through configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    /// Metadata endpoints (WSDL and XSD generation).
    Metadata,
}

impl Feature {
    fn env_key(self) -> &'static str {
        match self {
            Feature::Metadata => SOAP_ENABLE_METADATA,
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feature::Metadata => write!(f, "Metadata"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FeatureError {
    #[error("Feature '{0}' is disabled in the host configuration")]
    Disabled(Feature),

    #[error(transparent)]
    Env(#[from] EnvError),
}

/// Fail unless every feature in `features` is enabled. Features are enabled unless configured
/// otherwise.
pub fn assert_features(env: &dyn Environment, features: &[Feature]) -> Result<(), FeatureError> {
    for feature in features {
        if !env.enabled(feature.env_key(), true)? {
            return Err(FeatureError::Disabled(*feature));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use soap_env::MapEnvironment;

    #[test]
    fn metadata_enabled_by_default() {
        assert!(assert_features(&MapEnvironment::new(), &[Feature::Metadata]).is_ok());
    }

    #[test]
    fn metadata_disabled() {
        let env = MapEnvironment::from([(SOAP_ENABLE_METADATA, "false")]);
        let err = assert_features(&env, &[Feature::Metadata]).unwrap_err();

        assert!(matches!(err, FeatureError::Disabled(Feature::Metadata)));
        assert_eq!(
            err.to_string(),
            "Feature 'Metadata' is disabled in the host configuration"
        );
    }

    #[test]
    fn invalid_flag_is_an_error() {
        let env = MapEnvironment::from([(SOAP_ENABLE_METADATA, "perhaps")]);
        assert!(matches!(
            assert_features(&env, &[Feature::Metadata]),
            Err(FeatureError::Env(EnvError::InvalidBoolean { .. }))
        ));
    }
}

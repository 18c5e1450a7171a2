// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use soap_env::{EnvError, Environment};

pub const SOAP_ENABLE_METADATA: &str = "SOAP_ENABLE_METADATA";

pub const SOAP_SOAP11_HTTP_PATH: &str = "SOAP_SOAP11_HTTP_PATH";
pub const SOAP_SOAP12_HTTP_PATH: &str = "SOAP_SOAP12_HTTP_PATH";

pub const SOAP_WEB_HOST_URL: &str = "SOAP_WEB_HOST_URL";
pub const SOAP_TARGET_NAMESPACE: &str = "SOAP_TARGET_NAMESPACE";
pub const SOAP_SERVICE_NAME: &str = "SOAP_SERVICE_NAME";

pub const SOAP_CONSTRAINED_RUNTIME: &str = "SOAP_CONSTRAINED_RUNTIME";

pub const DEFAULT_TARGET_NAMESPACE: &str = "http://tempuri.org/types";

pub fn get_soap11_http_path(env: &dyn Environment) -> String {
    env.get_non_empty(SOAP_SOAP11_HTTP_PATH)
        .unwrap_or_else(|| "/soap11".to_string())
}

pub fn get_soap12_http_path(env: &dyn Environment) -> String {
    env.get_non_empty(SOAP_SOAP12_HTTP_PATH)
        .unwrap_or_else(|| "/soap12".to_string())
}

pub fn get_target_namespace(env: &dyn Environment) -> String {
    env.get_non_empty(SOAP_TARGET_NAMESPACE)
        .unwrap_or_else(|| DEFAULT_TARGET_NAMESPACE.to_string())
}

pub fn get_service_name(env: &dyn Environment) -> String {
    env.get_non_empty(SOAP_SERVICE_NAME)
        .unwrap_or_else(|| "Soap".to_string())
}

/// The externally visible base URL of the host, if configured. Always ends with a `/`.
pub fn get_web_host_url(env: &dyn Environment) -> Result<Option<String>, EnvError> {
    let Some(value) = env.get_non_empty(SOAP_WEB_HOST_URL) else {
        return Ok(None);
    };

    let url = url::Url::parse(&value).map_err(|e| EnvError::InvalidValue {
        env_key: SOAP_WEB_HOST_URL,
        env_value: value.clone(),
        message: format!("Must be an absolute URL ({e})"),
    })?;

    let mut url = url.to_string();
    if !url.ends_with('/') {
        url.push('/');
    }
    Ok(Some(url))
}

/// Whether the host runs in the constrained runtime that cannot generate WSDLs reliably. Only
/// affects the wording of the generation failure message.
pub fn is_constrained_runtime(env: &dyn Environment) -> bool {
    env.enabled(SOAP_CONSTRAINED_RUNTIME, false)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use soap_env::MapEnvironment;

    #[test]
    fn defaults() {
        let env = MapEnvironment::new();

        assert_eq!(get_soap11_http_path(&env), "/soap11");
        assert_eq!(get_soap12_http_path(&env), "/soap12");
        assert_eq!(get_target_namespace(&env), DEFAULT_TARGET_NAMESPACE);
        assert_eq!(get_service_name(&env), "Soap");
        assert!(get_web_host_url(&env).unwrap().is_none());
        assert!(!is_constrained_runtime(&env));
    }

    #[test]
    fn web_host_url_is_normalized() {
        let env = MapEnvironment::from([(SOAP_WEB_HOST_URL, "https://Api.Example.com/services")]);
        assert_eq!(
            get_web_host_url(&env).unwrap(),
            Some("https://api.example.com/services/".to_string())
        );

        let env = MapEnvironment::from([(SOAP_WEB_HOST_URL, "not a url")]);
        assert!(matches!(
            get_web_host_url(&env),
            Err(EnvError::InvalidValue { env_key, .. }) if env_key == SOAP_WEB_HOST_URL
        ));
    }

    #[test]
    fn constrained_runtime_flag() {
        let env = MapEnvironment::from([(SOAP_CONSTRAINED_RUNTIME, "true")]);
        assert!(is_constrained_runtime(&env));

        // An unparseable flag keeps the default wording
        let env = MapEnvironment::from([(SOAP_CONSTRAINED_RUNTIME, "sometimes")]);
        assert!(!is_constrained_runtime(&env));
    }
}

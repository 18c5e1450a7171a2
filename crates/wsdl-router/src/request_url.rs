// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Absolute URLs of the current request, as seen by the client.

use common::env_const::get_web_host_url;
use common::http::RequestHead;
use soap_env::Environment;
use url::Url;

use crate::error::WsdlError;

/// The absolute request URL without its query string.
///
/// Proxies may forward the original scheme and host in `X-Forwarded-Proto` and
/// `X-Forwarded-Host`; those take precedence over the `Host` header.
pub fn base_url(head: &(dyn RequestHead + Sync)) -> Result<String, WsdlError> {
    let scheme = forwarded_value(head, "x-forwarded-proto").unwrap_or_else(|| "http".to_string());
    let authority = forwarded_value(head, "x-forwarded-host")
        .or_else(|| head.get_header("host"))
        .unwrap_or_else(|| "localhost".to_string());

    let path = head.get_path();
    let path = if path.starts_with('/') {
        path
    } else {
        format!("/{path}")
    };

    let url = Url::parse(&format!("{scheme}://{authority}{path}"))?;
    Ok(url.to_string())
}

/// The URL the service's endpoints live under, ending with `/`.
///
/// A configured web host URL wins; otherwise this is the request URL up to (and including) its
/// last `/`.
pub fn parent_base_url(
    head: &(dyn RequestHead + Sync),
    env: &dyn Environment,
) -> Result<String, WsdlError> {
    if let Some(web_host_url) = get_web_host_url(env)? {
        return Ok(web_host_url);
    }

    let base_url = base_url(head)?;
    match base_url.rfind('/') {
        Some(index) => Ok(base_url[..=index].to_string()),
        None => Ok(format!("{base_url}/")),
    }
}

// With several proxies the header holds a comma-separated list; the first entry is the client's
fn forwarded_value(head: &(dyn RequestHead + Sync), key: &str) -> Option<String> {
    head.get_header(key)
        .and_then(|value| value.split(',').next().map(|v| v.trim().to_string()))
        .filter(|value| !value.is_empty())
}

// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use http::StatusCode;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default)]
pub struct Headers {
    inner: Vec<(String, String)>,
}

impl Headers {
    pub fn new() -> Self {
        Self { inner: vec![] }
    }

    pub fn from_vec(vec: Vec<(String, String)>) -> Self {
        let mut headers = vec![];
        for (key, value) in vec {
            headers.push((key.to_lowercase(), value));
        }
        Self { inner: headers }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.inner
            .iter()
            .find(|(k, _)| k == &key.to_lowercase())
            .map(|(_, v)| v.clone())
    }

    pub fn get_all(&self, key: &str) -> Vec<String> {
        let key = key.to_lowercase();
        self.inner
            .iter()
            .filter(|(k, _)| k == &key)
            .map(|(_, v)| v.clone())
            .collect()
    }

    pub fn insert(&mut self, key: String, value: String) {
        self.inner.push((key.to_lowercase(), value));
    }
}

pub struct ResponsePayload {
    pub body: ResponseBody,
    pub headers: Headers,
    pub status_code: StatusCode,
}

impl ResponsePayload {
    /// A `200 OK` response with the given content type and text body.
    pub fn text(content_type: &str, body: impl Into<String>) -> Self {
        Self {
            body: ResponseBody::Bytes(body.into().into_bytes()),
            headers: Headers::from_vec(vec![(
                http::header::CONTENT_TYPE.to_string(),
                content_type.to_string(),
            )]),
            status_code: StatusCode::OK,
        }
    }

    pub fn status(status_code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            body: ResponseBody::Bytes(message.into().into_bytes()),
            headers: Headers::new(),
            status_code,
        }
    }
}

pub enum ResponseBody {
    Bytes(Vec<u8>),
    None,
}

impl ResponseBody {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            ResponseBody::Bytes(bytes) => bytes,
            ResponseBody::None => &[],
        }
    }
}

/// Represents a HTTP request from which information can be extracted.
///
/// Transports implement this for their own request type; metadata handlers only ever see this
/// view of the request.
pub trait RequestHead {
    // return all header values that have the following key
    fn get_headers(&self, key: &str) -> Vec<String>;

    // return the first header
    fn get_header(&self, key: &str) -> Option<String> {
        self.get_headers(&key.to_lowercase()).first().cloned()
    }

    fn get_path(&self) -> String;

    /// The query string decoded into a JSON object (parameter name to value). A parameter
    /// present without a value (`?wsdl`) maps to an empty string.
    fn get_query(&self) -> Value;

    fn get_method(&self) -> http::Method;
}

/// Whether the query string carries `name`, with any value (including none at all).
pub fn has_query_param(head: &(dyn RequestHead + Sync), name: &str) -> bool {
    match head.get_query() {
        Value::Object(params) => params.contains_key(name),
        _ => false,
    }
}

/// A self-contained request head, for transports that have already buffered the request and for
/// callers that synthesize requests (tests, offline generation).
#[derive(Debug, Clone)]
pub struct PlainRequestHead {
    method: http::Method,
    path: String,
    query: Value,
    headers: Headers,
}

impl PlainRequestHead {
    pub fn new(method: http::Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Value::Object(Map::new()),
            headers: Headers::new(),
        }
    }

    /// Build a head from an absolute URL; the URL's authority becomes the `Host` header.
    pub fn from_url(method: http::Method, url: &str) -> Result<Self, url::ParseError> {
        let url = url::Url::parse(url)?;

        let mut head = Self::new(method, url.path());
        for (key, value) in url.query_pairs() {
            head = head.with_query(&key, &value);
        }

        if let Some(host) = url.host_str() {
            let host = match url.port() {
                Some(port) => format!("{host}:{port}"),
                None => host.to_string(),
            };
            head = head.with_header("host", &host);
        }
        if url.scheme() != "http" {
            head = head.with_header("x-forwarded-proto", url.scheme());
        }

        Ok(head)
    }

    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        if let Value::Object(params) = &mut self.query {
            params.insert(key.to_string(), Value::String(value.to_string()));
        }
        self
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }
}

impl RequestHead for PlainRequestHead {
    fn get_headers(&self, key: &str) -> Vec<String> {
        self.headers.get_all(key)
    }

    fn get_path(&self) -> String {
        self.path.clone()
    }

    fn get_query(&self) -> Value {
        self.query.clone()
    }

    fn get_method(&self) -> http::Method {
        self.method.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn head_from_url() {
        let head = PlainRequestHead::from_url(
            http::Method::GET,
            "https://api.example.com:8443/services/soap12?wsdl&flash=1",
        )
        .unwrap();

        assert_eq!(head.get_path(), "/services/soap12");
        assert_eq!(
            head.get_header("Host"),
            Some("api.example.com:8443".to_string())
        );
        assert_eq!(
            head.get_header("X-Forwarded-Proto"),
            Some("https".to_string())
        );
        assert!(has_query_param(&head, "wsdl"));
        assert!(has_query_param(&head, "flash"));
        assert!(!has_query_param(&head, "includeAllTypes"));
    }

    #[test]
    fn presence_flags_ignore_values() {
        let head = PlainRequestHead::new(http::Method::GET, "/soap11")
            .with_query("includeAllTypes", "")
            .with_query("flash", "false");

        assert!(has_query_param(&head, "includeAllTypes"));
        assert!(has_query_param(&head, "flash"));
    }

    #[test]
    fn headers_are_case_insensitive() {
        let mut headers = Headers::from_vec(vec![("Content-Type".into(), "text/xml".into())]);
        headers.insert("X-Forwarded-Host".into(), "a.example.com".into());
        headers.insert("x-forwarded-host".into(), "b.example.com".into());

        assert_eq!(headers.get("content-type"), Some("text/xml".to_string()));
        assert_eq!(headers.get_all("X-FORWARDED-HOST").len(), 2);
        assert!(headers.get("x-original-host").is_none());
    }
}

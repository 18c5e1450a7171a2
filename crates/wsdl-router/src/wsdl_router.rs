// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use async_trait::async_trait;
use common::http::{RequestHead, ResponsePayload};
use common::router::{CompositeRouter, Router};
use soap_env::Environment;
use xsd_introspection::registry::OperationRegistry;

use crate::endpoint::BindingKind;
use crate::handler::WsdlMetadataHandler;

pub struct WsdlRouter {
    handler: WsdlMetadataHandler,
    http_path: String,
}

impl WsdlRouter {
    pub fn new(handler: WsdlMetadataHandler, env: &dyn Environment) -> Self {
        let http_path = handler.binding_kind().http_path(env);
        Self { handler, http_path }
    }

    fn suitable(&self, request_head: &(dyn RequestHead + Sync)) -> bool {
        request_head.get_method() == http::Method::GET && request_head.get_path() == self.http_path
    }
}

#[async_trait]
impl Router for WsdlRouter {
    async fn route(&self, request: &(dyn RequestHead + Send + Sync)) -> Option<ResponsePayload> {
        if !self.suitable(request) {
            return None;
        }

        Some(self.handler.handle(request))
    }
}

/// A router serving the SOAP 1.1 and SOAP 1.2 WSDL documents of `registry`.
pub fn create_wsdl_router(
    registry: Arc<OperationRegistry>,
    env: Arc<dyn Environment>,
) -> CompositeRouter {
    let routers = [BindingKind::Soap11, BindingKind::Soap12]
        .into_iter()
        .map(|binding_kind| {
            let handler = WsdlMetadataHandler::new(registry.clone(), env.clone(), binding_kind);
            Box::new(WsdlRouter::new(handler, env.as_ref())) as Box<dyn Router + Send + Sync>
        })
        .collect();

    CompositeRouter::new(routers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::env_const::SOAP_SOAP11_HTTP_PATH;
    use common::http::PlainRequestHead;
    use http::StatusCode;
    use soap_env::MapEnvironment;
    use xsd_introspection::registry::OperationType;
    use xsd_introspection::types::TypeDescriptor;

    fn router(env: MapEnvironment) -> CompositeRouter {
        let mut registry = OperationRegistry::new();
        registry
            .add_type(TypeDescriptor::complex("Hello"))
            .unwrap()
            .add_type(TypeDescriptor::complex("HelloResponse"))
            .unwrap();
        registry
            .register(OperationType::new("Hello").with_response("HelloResponse"))
            .unwrap();

        create_wsdl_router(Arc::new(registry), Arc::new(env))
    }

    fn body(response: &ResponsePayload) -> String {
        String::from_utf8(response.body.as_bytes().to_vec()).unwrap()
    }

    #[tokio::test]
    async fn routes_both_bindings() {
        let router = router(MapEnvironment::new());

        let response = router
            .route(&PlainRequestHead::from_url(http::Method::GET, "http://host/soap11").unwrap())
            .await
            .unwrap();
        assert_eq!(response.status_code, StatusCode::OK);
        assert!(body(&response).contains(r#"name="BasicHttpBinding_ISyncReply""#));

        let response = router
            .route(&PlainRequestHead::from_url(http::Method::GET, "http://host/soap12").unwrap())
            .await
            .unwrap();
        assert_eq!(response.status_code, StatusCode::OK);
        assert!(body(&response).contains(r#"name="WSHttpBinding_ISyncReply""#));
    }

    #[tokio::test]
    async fn ignores_other_requests() {
        let router = router(MapEnvironment::new());

        let response = router
            .route(&PlainRequestHead::new(http::Method::POST, "/soap11"))
            .await
            .unwrap();
        assert_eq!(response.status_code, StatusCode::NOT_FOUND);

        let response = router
            .route(&PlainRequestHead::new(http::Method::GET, "/soap11/extra"))
            .await
            .unwrap();
        assert_eq!(response.status_code, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn configured_path() {
        let router = router(MapEnvironment::from([(SOAP_SOAP11_HTTP_PATH, "/wsdl/basic")]));

        let response = router
            .route(&PlainRequestHead::new(http::Method::GET, "/wsdl/basic"))
            .await
            .unwrap();
        assert_eq!(response.status_code, StatusCode::OK);
        assert!(
            body(&response).contains(r#"<soap:address location="http://localhost/wsdl/basic"/>"#)
        );
    }
}

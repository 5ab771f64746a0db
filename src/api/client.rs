use super::error::{ApiError, ApiResult, TransportError};
use super::transport::{ApiRequest, ApiResponse, Method, RequestBody, ReqwestTransport, Transport};
use crate::config::ApiConfig;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Observes every request sent through an [`HttpClient`].
///
/// Middleware sees requests and outcomes but cannot change them.
pub trait Middleware: Send + Sync {
    fn before(&self, _request: &ApiRequest) {}

    fn after(&self, _request: &ApiRequest, _outcome: &Result<ApiResponse, TransportError>) {}
}

/// Structured request/response logging, installed when debug is on.
pub struct DebugLog;

impl Middleware for DebugLog {
    fn before(&self, request: &ApiRequest) {
        tracing::debug!(
            method = %request.method,
            url = %request.url,
            body = %request.body.summary(),
            "api request"
        );
    }

    fn after(&self, request: &ApiRequest, outcome: &Result<ApiResponse, TransportError>) {
        match outcome {
            Ok(response) => tracing::debug!(
                method = %request.method,
                url = %request.url,
                status = response.status,
                body = %response.body,
                "api response"
            ),
            Err(err) => tracing::error!(
                method = %request.method,
                url = %request.url,
                error = %err,
                "api error"
            ),
        }
    }
}

/// Transport preconfigured with the resolved base URL and a middleware chain.
#[derive(Clone)]
pub struct HttpClient {
    config: ApiConfig,
    transport: Arc<dyn Transport>,
    middleware: Vec<Arc<dyn Middleware>>,
}

impl HttpClient {
    pub fn new(config: ApiConfig, transport: Arc<dyn Transport>) -> Self {
        let mut middleware: Vec<Arc<dyn Middleware>> = Vec::new();
        if config.debug {
            middleware.push(Arc::new(DebugLog));
        }
        Self {
            config,
            transport,
            middleware,
        }
    }

    pub fn from_config(config: ApiConfig) -> ApiResult<Self> {
        let transport = ReqwestTransport::new(config.timeout)?;
        Ok(Self::new(config, Arc::new(transport)))
    }

    pub fn with_middleware(mut self, middleware: Arc<dyn Middleware>) -> Self {
        self.middleware.push(middleware);
        self
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResult<T> {
        self.send(Method::Get, endpoint, RequestBody::Empty).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResult<T> {
        self.send(Method::Delete, endpoint, RequestBody::Empty).await
    }

    pub async fn post<T: DeserializeOwned>(&self, endpoint: &str, body: RequestBody) -> ApiResult<T> {
        self.send(Method::Post, endpoint, body).await
    }

    /// Runs one exchange through the chain and normalizes any failure.
    pub async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: RequestBody,
    ) -> ApiResult<T> {
        let request = ApiRequest {
            method,
            url: self.config.request_url(endpoint),
            body,
        };

        for layer in &self.middleware {
            layer.before(&request);
        }

        let outcome = match self.transport.send(request.clone()).await {
            Ok(response) if response.is_success() => Ok(response),
            Ok(response) => Err(TransportError::Status {
                status: response.status,
                body: response.body,
            }),
            Err(err) => Err(err),
        };

        for layer in self.middleware.iter().rev() {
            layer.after(&request, &outcome);
        }

        let response = outcome.map_err(ApiError::from_transport)?;
        serde_json::from_str(&response.body)
            .map_err(|err| ApiError::from_transport(TransportError::from(err)))
    }
}

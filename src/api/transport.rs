//! HTTP Transport
//!
//! The data layer talks to the network through [`Transport`]. In the browser
//! that is `window.fetch` with an abort-on-timeout controller.

use std::cell::Cell;
use std::rc::Rc;

use async_trait::async_trait;
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, Headers, Request, RequestInit, Response};

use super::error::{error_detail, ApiError, ConnectivityCause};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            body: Some(body),
        }
    }
}

/// One request, one tagged outcome. Successful empty bodies decode as `Null`.
#[async_trait(?Send)]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError>;
}

/// `window.fetch` against a base URL
#[derive(Debug, Clone)]
pub struct FetchTransport {
    base_url: String,
    timeout_ms: u32,
}

impl FetchTransport {
    pub fn new(base_url: impl Into<String>, timeout_ms: u32) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout_ms,
        }
    }

    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    fn build(&self, request: &ApiRequest, controller: &AbortController) -> Result<Request, ApiError> {
        let init = RequestInit::new();
        init.set_method(request.method.as_str());
        init.set_signal(Some(&controller.signal()));

        let headers = Headers::new().map_err(|e| invalid("headers", &e))?;
        let _ = headers.set("Accept", "application/json");
        if let Some(body) = &request.body {
            let text = serde_json::to_string(body).map_err(|e| ApiError::Decode(e.to_string()))?;
            let _ = headers.set("Content-Type", "application/json");
            init.set_body(&JsValue::from_str(&text));
        }
        init.set_headers(&headers);

        let url = self.url(&request.path);
        Request::new_with_str_and_init(&url, &init).map_err(|e| invalid(&url, &e))
    }
}

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let window = web_sys::window().ok_or_else(|| ApiError::Invalid("no window".to_string()))?;
        let controller = AbortController::new().map_err(|e| invalid("abort controller", &e))?;
        let fetch_request = self.build(&request, &controller)?;

        let timed_out = Rc::new(Cell::new(false));
        // Dropping the timer before it fires cancels it
        let _timer = {
            let timed_out = timed_out.clone();
            let controller = controller.clone();
            gloo_timers::callback::Timeout::new(self.timeout_ms, move || {
                timed_out.set(true);
                controller.abort();
            })
        };

        let aborted = |_: JsValue| rejection(timed_out.get());

        let response: Response = JsFuture::from(window.fetch_with_request(&fetch_request))
            .await
            .map_err(aborted)?
            .dyn_into()
            .map_err(|_| ApiError::Decode("fetch resolved to a non-Response value".to_string()))?;

        let status = response.status();
        let text_promise: js_sys::Promise = response.text().map_err(aborted)?;
        let body = JsFuture::from(text_promise)
            .await
            .map_err(aborted)?
            .as_string()
            .unwrap_or_default();

        tracing::debug!(method = request.method.as_str(), path = %request.path, status, "response");

        if status == 0 {
            return Err(ApiError::Connectivity(ConnectivityCause::ZeroStatus));
        }
        if !response.ok() {
            return Err(ApiError::from_status(status, error_detail(&body)));
        }
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Classify a rejected fetch promise
fn rejection(timed_out: bool) -> ApiError {
    if timed_out {
        ApiError::Connectivity(ConnectivityCause::Timeout)
    } else {
        ApiError::Connectivity(ConnectivityCause::Refused)
    }
}

fn invalid(what: &str, err: &JsValue) -> ApiError {
    tracing::error!(what, error = ?err, "could not build request");
    ApiError::Invalid(what.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_base_and_path() {
        let transport = FetchTransport::new("http://localhost:8000/api/", 5000);
        assert_eq!(transport.url("/vehicles"), "http://localhost:8000/api/vehicles");
        assert_eq!(transport.url("tickets"), "http://localhost:8000/api/tickets");
    }

    #[test]
    fn test_rejection_distinguishes_timeout() {
        assert_eq!(rejection(true), ApiError::Connectivity(ConnectivityCause::Timeout));
        assert_eq!(rejection(false), ApiError::Connectivity(ConnectivityCause::Refused));
        assert!(rejection(true).is_connectivity());
    }
}

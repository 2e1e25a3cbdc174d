//! Transports that carry a built request to the network.
//!
//! On `wasm32` requests go through Spin's outbound HTTP. Native builds use
//! `reqwest` with a cookie store so credentialed requests keep the session.
//! `ScriptedTransport` answers from a route table and records what it saw.

use crate::{FetchError, Method, RequestBuilder, Response};
use async_trait::async_trait;
use std::cell::RefCell;
use std::collections::HashMap;

/// Sends a request and returns the raw response.
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError>;
}

/// Spin outbound HTTP.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct SpinTransport;

#[cfg(target_arch = "wasm32")]
#[async_trait(?Send)]
impl Transport for SpinTransport {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        use spin_sdk::http::{Method as SpinMethod, Request};

        let method = match request.method {
            Method::Get => SpinMethod::Get,
            Method::Post => SpinMethod::Post,
            Method::Put => SpinMethod::Put,
            Method::Patch => SpinMethod::Patch,
            Method::Delete => SpinMethod::Delete,
            Method::Head => SpinMethod::Head,
            Method::Options => SpinMethod::Options,
        };

        let mut builder = Request::builder();
        builder.method(method).uri(request.url.as_str());
        for (key, value) in &request.headers {
            builder.header(key.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder.body(body);
        }

        let resp: spin_sdk::http::Response = spin_sdk::http::send(builder.build())
            .await
            .map_err(|e| FetchError::RequestError(e.to_string()))?;

        let status = *resp.status();
        let headers: HashMap<String, String> = resp
            .headers()
            .map(|(k, v)| (k.to_string(), v.as_str().unwrap_or("").to_string()))
            .collect();

        Ok(Response::new(status, headers, resp.into_body()))
    }
}

/// Native HTTP via `reqwest`.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

#[cfg(not(target_arch = "wasm32"))]
impl ReqwestTransport {
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| FetchError::RequestError(e.to_string()))?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[async_trait(?Send)]
impl Transport for ReqwestTransport {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        let method = reqwest::Method::from_bytes(request.method.as_str().as_bytes())
            .map_err(|e| FetchError::RequestError(e.to_string()))?;

        let mut builder = self.client.request(method, request.url.as_str());
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let resp = builder.send().await.map_err(|e| {
            if e.is_builder() {
                FetchError::InvalidUrl(request.url.clone())
            } else {
                FetchError::RequestError(e.to_string())
            }
        })?;

        let status = resp.status().as_u16();
        let headers: HashMap<String, String> = resp
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.as_str().to_string(), v.to_string())))
            .collect();
        let body = resp
            .bytes()
            .await
            .map_err(|e| FetchError::ParseError(e.to_string()))?
            .to_vec();

        Ok(Response::new(status, headers, body))
    }
}

struct Route {
    method: Method,
    path_suffix: String,
    reply: Result<Response, FetchError>,
}

/// In-memory transport answering from a route table.
///
/// Routes match on method and a suffix of the URL path, first match wins.
/// Unmatched requests get a 404 with an empty body.
#[derive(Default)]
pub struct ScriptedTransport {
    routes: Vec<Route>,
    sent: RefCell<Vec<RequestBuilder>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method path_suffix` with `response`.
    pub fn respond(mut self, method: Method, path_suffix: &str, response: Response) -> Self {
        self.routes.push(Route {
            method,
            path_suffix: path_suffix.to_string(),
            reply: Ok(response),
        });
        self
    }

    /// Answer `GET path_suffix` with a 200 JSON body.
    pub fn get_json(self, path_suffix: &str, value: serde_json::Value) -> Self {
        self.respond(Method::Get, path_suffix, Response::from_json(200, &value))
    }

    /// Fail `method path_suffix` with a transport error.
    pub fn fail(mut self, method: Method, path_suffix: &str, error: FetchError) -> Self {
        self.routes.push(Route {
            method,
            path_suffix: path_suffix.to_string(),
            reply: Err(error),
        });
        self
    }

    /// Requests seen so far, oldest first.
    pub fn sent(&self) -> Vec<RequestBuilder> {
        self.sent.borrow().clone()
    }

    pub fn last_sent(&self) -> Option<RequestBuilder> {
        self.sent.borrow().last().cloned()
    }
}

#[async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        let reply = self
            .routes
            .iter()
            .find(|route| {
                route.method == request.method && request.path().ends_with(&route.path_suffix)
            })
            .map(|route| route.reply.clone());
        self.sent.borrow_mut().push(request);
        reply.unwrap_or_else(|| Ok(Response::new(404, HashMap::new(), Vec::new())))
    }
}

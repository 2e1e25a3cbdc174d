//! HTTP plumbing and the product API client for the salon storefront.
//!
//! Requests are built with [`RequestBuilder`] and carried by a [`Transport`]:
//! Spin's outbound HTTP on `wasm32`, `reqwest` elsewhere, or a
//! [`ScriptedTransport`] in tests. [`HttpProductApi`] sits on top and turns
//! responses into validated products.
//!
//! # Example
//!
//! ```rust,ignore
//! use salon_data::{FetchClient, HttpProductApi, ProductApi, ReqwestTransport};
//! use salon_commerce::search::FilterState;
//!
//! let client = FetchClient::new(ReqwestTransport::new()?)
//!     .with_base_url("https://api.example.com");
//! let api = HttpProductApi::new(client);
//!
//! let listing = api.list_products(&FilterState::default()).await?;
//! for product in &listing.value {
//!     println!("{} {}", product.name, product.price);
//! }
//! ```

mod api;
mod error;
pub mod query;
mod request;
mod response;
mod transport;

pub use api::{parse_product_list, HttpProductApi, Parsed, ProductApi, ShapeDiagnostic};
pub use error::{ApiError, FetchError};
pub use request::{Credentials, Method, RequestBuilder};
pub use response::Response;
#[cfg(not(target_arch = "wasm32"))]
pub use transport::ReqwestTransport;
#[cfg(target_arch = "wasm32")]
pub use transport::SpinTransport;
pub use transport::{ScriptedTransport, Transport};

use std::collections::HashMap;

/// HTTP client for making outbound requests.
///
/// Wraps a [`Transport`] with a base URL, default headers and a default
/// credentials mode.
pub struct FetchClient<T: Transport> {
    transport: T,
    base_url: Option<String>,
    default_headers: HashMap<String, String>,
    credentials: Credentials,
}

impl<T: Transport> FetchClient<T> {
    /// Create a new HTTP client over `transport`.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            base_url: None,
            default_headers: HashMap::new(),
            credentials: Credentials::default(),
        }
    }

    /// Create a client with a base URL that will be prepended to all requests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Default credentials mode for every request.
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Create a GET request.
    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder<'_, T> {
        self.request(Method::Get, url)
    }

    /// Create a POST request.
    pub fn post(&self, url: impl Into<String>) -> ClientRequestBuilder<'_, T> {
        self.request(Method::Post, url)
    }

    /// Create a request with a custom method.
    pub fn request(&self, method: Method, url: impl Into<String>) -> ClientRequestBuilder<'_, T> {
        let url = url.into();
        let full_url = match &self.base_url {
            Some(base) if !(url.starts_with("http://") || url.starts_with("https://")) => {
                format!("{}{}", base.trim_end_matches('/'), url)
            }
            _ => url,
        };

        let mut builder = RequestBuilder::new(method, full_url).credentials(self.credentials);
        for (key, value) in &self.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }

        ClientRequestBuilder {
            transport: &self.transport,
            builder,
        }
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder<'a, T: Transport> {
    transport: &'a T,
    builder: RequestBuilder,
}

impl<T: Transport> ClientRequestBuilder<'_, T> {
    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.header(key, value);
        self
    }

    /// Append query parameters.
    pub fn query<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.builder = self.builder.query(pairs);
        self
    }

    /// Set the request body as a string.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.builder = self.builder.text(text);
        self
    }

    /// Set the request body as JSON.
    pub fn json<S: serde::Serialize>(mut self, value: &S) -> Result<Self, FetchError> {
        self.builder = self.builder.json(value)?;
        Ok(self)
    }

    /// Set the request body as an url-encoded form.
    pub fn form<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.builder = self.builder.form(pairs);
        self
    }

    /// Set the Accept header.
    pub fn accept(mut self, content_type: impl Into<String>) -> Self {
        self.builder = self.builder.accept(content_type);
        self
    }

    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.builder = self.builder.credentials(credentials);
        self
    }

    /// Send the request and return the response.
    pub async fn send(self) -> Result<Response, FetchError> {
        self.transport.send(self.builder).await
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        ApiError, Credentials, FetchClient, FetchError, HttpProductApi, Method, ProductApi,
        Response, Transport,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_base_url_and_default_headers() {
        let client = FetchClient::new(ScriptedTransport::new().get_json("/brands", serde_json::json!([])))
            .with_base_url("https://api.example.com/")
            .with_default_header("Accept", "application/json")
            .with_credentials(Credentials::Include);

        client.get("/products/brands").send().await.unwrap();

        let sent = client.transport().last_sent().unwrap();
        assert_eq!(sent.url(), "https://api.example.com/products/brands");
        assert_eq!(sent.header_value("accept"), Some("application/json"));
        assert_eq!(sent.credentials_mode(), Credentials::Include);
    }

    #[tokio::test]
    async fn test_absolute_url_skips_base() {
        let client = FetchClient::new(ScriptedTransport::new()).with_base_url("https://api.example.com");
        let resp = client.post("https://forms.example.com/contact.php").send().await.unwrap();
        assert_eq!(resp.status, 404);
        assert_eq!(
            client.transport().last_sent().unwrap().url(),
            "https://forms.example.com/contact.php"
        );
    }
}

//! HTTP client and product API error types.

use thiserror::Error;

/// Errors that can occur when making HTTP requests.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// Failed to send the request.
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP error response.
    #[error("HTTP {status}: {message}")]
    HttpError { status: u16, message: String },

    /// Failed to parse response body.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::JsonError(e.to_string())
    }
}

/// Errors surfaced by the product API to views.
///
/// Views map these onto three outcomes: not-found, generic failure, or (for
/// shape problems inside an otherwise good response) a logged diagnostic.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("Network error: {0}")]
    Network(String),

    /// The slug does not name a product.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Non-2xx response other than a product 404.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The body could not be decoded into the expected type.
    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::ProductNotFound(_))
    }
}

impl From<FetchError> for ApiError {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::HttpError { status, message } => ApiError::Http { status, message },
            FetchError::ParseError(msg) | FetchError::JsonError(msg) => ApiError::Malformed(msg),
            FetchError::RequestError(msg) | FetchError::InvalidUrl(msg) => ApiError::Network(msg),
        }
    }
}

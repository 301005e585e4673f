//! HTTP response handling.

use http::StatusCode;
use serde::de::DeserializeOwned;

use crate::FetchError;

/// A raw HTTP response from the transport.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Create a new response.
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Check if the response was successful (2xx status).
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Parse the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Return an error carrying `context` for non-2xx status codes.
    pub fn error_for_status(self, url: &str, context: &'static str) -> Result<Self, FetchError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(FetchError::Status {
                status: self.status.as_u16(),
                url: url.to_string(),
                context,
            })
        }
    }
}

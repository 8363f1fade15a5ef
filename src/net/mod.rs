//! JSON-over-HTTP client.
//!
//! SYSTEM CONTEXT
//! ==============
//! `request` holds the [`RequestClient`] that pages and exports call;
//! `types` defines request/response shapes; transports adapt the client to
//! `gloo-net` in the browser or `reqwest` natively.
//!
//! ERROR HANDLING
//! ==============
//! Every failure is logged by the client and returned to the caller as a
//! [`RequestError`]. Nothing is retried.

pub mod request;
pub mod types;

#[cfg(feature = "hydrate")]
pub mod gloo_transport;
#[cfg(feature = "native")]
pub mod reqwest_transport;

use futures::future::LocalBoxFuture;

pub use request::RequestClient;
pub use types::{Credentials, HttpRequest, HttpResponse, Method, RequestOptions};

/// Network-level failure: DNS, refused connection, aborted fetch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("transport failure: {0}")]
pub struct TransportError(pub String);

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("HTTP error! status: {status} ({url})")]
    Status { status: u16, url: String },
    #[error("invalid JSON from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),
}

impl RequestError {
    /// HTTP status for [`RequestError::Status`].
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Performs one HTTP round trip. Implementations do not interpret status
/// codes or bodies.
pub trait HttpTransport {
    fn send(
        &self,
        request: HttpRequest,
    ) -> LocalBoxFuture<'_, Result<HttpResponse, TransportError>>;
}

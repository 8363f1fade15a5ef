//! Fetch wrapper with default JSON headers and status normalization.
//!
//! Client-side (hydrate): pair with `GlooTransport`.
//! Native: pair with `ReqwestTransport` (feature `native`) or a test stub.

#[cfg(test)]
#[path = "request_test.rs"]
mod request_test;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::types::{HttpRequest, RequestOptions};
use super::{HttpTransport, RequestError};

const CONTENT_TYPE: &str = "Content-Type";
const JSON_MIME: &str = "application/json";

pub struct RequestClient<T> {
    transport: T,
    default_headers: Vec<(String, String)>,
}

impl<T: HttpTransport> RequestClient<T> {
    /// Client whose only default header is `Content-Type: application/json`.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            default_headers: vec![(CONTENT_TYPE.to_owned(), JSON_MIME.to_owned())],
        }
    }

    /// Add or replace a default header.
    #[must_use]
    pub fn with_default_header(mut self, name: &str, value: &str) -> Self {
        self.default_headers
            .retain(|(existing, _)| !existing.eq_ignore_ascii_case(name));
        self.default_headers.push((name.to_owned(), value.to_owned()));
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Issue one request and parse the JSON response.
    ///
    /// # Errors
    ///
    /// - [`RequestError::Transport`] when the round trip fails.
    /// - [`RequestError::Status`] for any status outside 200-299; the body
    ///   is not parsed.
    /// - [`RequestError::Parse`] when a 2xx body is not valid JSON (an empty
    ///   body counts as invalid).
    pub async fn request(
        &self,
        url: &str,
        options: RequestOptions,
    ) -> Result<serde_json::Value, RequestError> {
        self.request_json(url, options).await
    }

    /// Like [`Self::request`], decoding into `R`.
    ///
    /// # Errors
    ///
    /// See [`Self::request`]; a body that is JSON but not an `R` is a
    /// [`RequestError::Parse`].
    pub async fn request_json<R: DeserializeOwned>(
        &self,
        url: &str,
        options: RequestOptions,
    ) -> Result<R, RequestError> {
        let result = self.round_trip(url, options).await;
        if let Err(err) = &result {
            log::error!("Request failed: {err}");
        }
        result
    }

    /// GET `url` and parse the JSON response.
    ///
    /// # Errors
    ///
    /// See [`Self::request`].
    pub async fn get_json<R: DeserializeOwned>(&self, url: &str) -> Result<R, RequestError> {
        self.request_json(url, RequestOptions::get()).await
    }

    /// POST `body` as JSON to `url` and parse the JSON response.
    ///
    /// # Errors
    ///
    /// See [`Self::request`]; also [`RequestError::Encode`].
    pub async fn post_json<B, R>(&self, url: &str, body: &B) -> Result<R, RequestError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let options = match RequestOptions::post().json_body(body) {
            Ok(options) => options,
            Err(err) => {
                log::error!("Request failed: {err}");
                return Err(err);
            }
        };
        self.request_json(url, options).await
    }

    async fn round_trip<R: DeserializeOwned>(
        &self,
        url: &str,
        options: RequestOptions,
    ) -> Result<R, RequestError> {
        let request = self.build(url, options);
        log::debug!("{} {url}", request.method.as_str());
        let response = self.transport.send(request).await?;
        if !response.is_success() {
            return Err(RequestError::Status { status: response.status, url: url.to_owned() });
        }
        serde_json::from_str(&response.body)
            .map_err(|source| RequestError::Parse { url: url.to_owned(), source })
    }

    fn build(&self, url: &str, options: RequestOptions) -> HttpRequest {
        HttpRequest {
            url: url.to_owned(),
            method: options.method,
            headers: merge_headers(&self.default_headers, options.headers),
            body: options.body,
            credentials: options.credentials,
        }
    }
}

/// Defaults first, then caller headers; a caller header replaces any default
/// with the same name (ASCII case-insensitive).
fn merge_headers(
    defaults: &[(String, String)],
    overrides: Vec<(String, String)>,
) -> Vec<(String, String)> {
    let mut merged: Vec<(String, String)> = defaults
        .iter()
        .filter(|(name, _)| !overrides.iter().any(|(o, _)| o.eq_ignore_ascii_case(name)))
        .cloned()
        .collect();
    merged.extend(overrides);
    merged
}

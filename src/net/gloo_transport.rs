//! Browser transport over `gloo-net` (the Fetch API).

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use gloo_net::http::RequestBuilder;
use web_sys::RequestCredentials;

use super::types::{Credentials, HttpRequest, HttpResponse, Method};
use super::{HttpTransport, TransportError};

#[derive(Clone, Copy, Debug, Default)]
pub struct GlooTransport;

impl HttpTransport for GlooTransport {
    fn send(
        &self,
        request: HttpRequest,
    ) -> LocalBoxFuture<'_, Result<HttpResponse, TransportError>> {
        async move {
            let mut builder =
                RequestBuilder::new(&request.url).method(gloo_method(request.method));
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }
            if let Some(credentials) = request.credentials {
                builder = builder.credentials(gloo_credentials(credentials));
            }
            let built = match request.body {
                Some(body) if request.method.allows_body() => builder.body(body),
                Some(_) => {
                    log::warn!("dropping body on {} {}", request.method.as_str(), request.url);
                    builder.build()
                }
                None => builder.build(),
            }
            .map_err(|e| TransportError(e.to_string()))?;

            let response = built.send().await.map_err(|e| TransportError(e.to_string()))?;
            let status = response.status();
            let body = response.text().await.map_err(|e| TransportError(e.to_string()))?;
            Ok(HttpResponse { status, body })
        }
        .boxed_local()
    }
}

fn gloo_method(method: Method) -> gloo_net::http::Method {
    use gloo_net::http::Method as M;
    match method {
        Method::Get => M::GET,
        Method::Post => M::POST,
        Method::Put => M::PUT,
        Method::Patch => M::PATCH,
        Method::Delete => M::DELETE,
        Method::Head => M::HEAD,
    }
}

fn gloo_credentials(credentials: Credentials) -> RequestCredentials {
    match credentials {
        Credentials::Omit => RequestCredentials::Omit,
        Credentials::SameOrigin => RequestCredentials::SameOrigin,
        Credentials::Include => RequestCredentials::Include,
    }
}

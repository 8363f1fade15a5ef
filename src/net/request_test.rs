use super::*;

use std::cell::RefCell;
use std::collections::VecDeque;

use futures::FutureExt;
use futures::executor::block_on;
use futures::future::LocalBoxFuture;
use serde::Deserialize;
use serde_json::json;

use crate::net::types::{Credentials, HttpResponse, Method};
use crate::net::TransportError;

#[derive(Default)]
struct StubTransport {
    replies: RefCell<VecDeque<Result<HttpResponse, TransportError>>>,
    seen: RefCell<Vec<HttpRequest>>,
}

impl StubTransport {
    fn replying(status: u16, body: &str) -> Self {
        let stub = Self::default();
        stub.replies
            .borrow_mut()
            .push_back(Ok(HttpResponse { status, body: body.to_owned() }));
        stub
    }

    fn failing(message: &str) -> Self {
        let stub = Self::default();
        stub.replies
            .borrow_mut()
            .push_back(Err(TransportError(message.to_owned())));
        stub
    }

    fn last_request(&self) -> HttpRequest {
        self.seen.borrow().last().cloned().expect("a request was sent")
    }
}

impl HttpTransport for StubTransport {
    fn send(
        &self,
        request: HttpRequest,
    ) -> LocalBoxFuture<'_, Result<HttpResponse, TransportError>> {
        self.seen.borrow_mut().push(request);
        let reply = self
            .replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError("no stub reply".to_owned())));
        futures::future::ready(reply).boxed_local()
    }
}

fn header<'a>(request: &'a HttpRequest, name: &str) -> Vec<&'a str> {
    request
        .headers
        .iter()
        .filter(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
        .collect()
}

#[test]
fn success_resolves_with_parsed_json() {
    let client =
        RequestClient::new(StubTransport::replying(200, r#"{"summary":"ok","tokens":12}"#));
    let value = block_on(client.request("/api/summarize", RequestOptions::get())).expect("ok");
    assert_eq!(value, json!({ "summary": "ok", "tokens": 12 }));
}

#[test]
fn not_found_fails_with_status_and_no_body() {
    let client = RequestClient::new(StubTransport::replying(404, r#"{"error":"missing"}"#));
    let err = block_on(client.request("/api/missing", RequestOptions::get())).expect_err("404");
    assert_eq!(err.status(), Some(404));
    assert!(matches!(err, RequestError::Status { status: 404, ref url } if url == "/api/missing"));
    assert_eq!(err.to_string(), "HTTP error! status: 404 (/api/missing)");
}

#[test]
fn any_non_2xx_status_is_an_error() {
    for status in [199_u16, 301, 400, 500, 503] {
        let client = RequestClient::new(StubTransport::replying(status, "{}"));
        let err = block_on(client.request("/x", RequestOptions::get())).expect_err("non-2xx");
        assert_eq!(err.status(), Some(status));
    }
}

#[test]
fn malformed_body_is_a_parse_error() {
    let client = RequestClient::new(StubTransport::replying(200, "<html>oops</html>"));
    let err = block_on(client.request("/api/chat", RequestOptions::get())).expect_err("bad json");
    assert!(matches!(err, RequestError::Parse { .. }));
    assert_eq!(err.status(), None);
}

#[test]
fn empty_success_body_is_a_parse_error() {
    let client = RequestClient::new(StubTransport::replying(204, ""));
    let err = block_on(client.request("/api/ping", RequestOptions::get())).expect_err("empty");
    assert!(matches!(err, RequestError::Parse { .. }));
}

#[test]
fn transport_failure_is_propagated() {
    let client = RequestClient::new(StubTransport::failing("connection refused"));
    let err = block_on(client.request("/api/chat", RequestOptions::get())).expect_err("down");
    assert!(matches!(
        err,
        RequestError::Transport(TransportError(ref m)) if m == "connection refused"
    ));
}

#[test]
fn default_content_type_is_sent() {
    let client = RequestClient::new(StubTransport::replying(200, "null"));
    block_on(client.request("/x", RequestOptions::get())).expect("ok");
    let sent = client.transport().last_request();
    assert_eq!(header(&sent, "content-type"), vec!["application/json"]);
}

#[test]
fn caller_headers_win_on_conflict_and_pass_through() {
    let client = RequestClient::new(StubTransport::replying(200, "{}"));
    let options = RequestOptions::post()
        .header("content-type", "text/plain")
        .header("X-CSRF-Token", "abc")
        .body("raw")
        .credentials(Credentials::Include);
    block_on(client.request("/upload", options)).expect("ok");

    let sent = client.transport().last_request();
    assert_eq!(header(&sent, "Content-Type"), vec!["text/plain"]);
    assert_eq!(header(&sent, "x-csrf-token"), vec!["abc"]);
    assert_eq!(sent.method, Method::Post);
    assert_eq!(sent.body.as_deref(), Some("raw"));
    assert_eq!(sent.credentials, Some(Credentials::Include));
    assert_eq!(sent.url, "/upload");
}

#[test]
fn extra_default_headers_are_merged() {
    let client = RequestClient::new(StubTransport::replying(200, "{}"))
        .with_default_header("Accept", "application/json")
        .with_default_header("accept", "application/vnd.api+json");
    block_on(client.request("/x", RequestOptions::get())).expect("ok");
    let sent = client.transport().last_request();
    assert_eq!(header(&sent, "accept"), vec!["application/vnd.api+json"]);
    assert_eq!(sent.headers.len(), 2);
}

#[derive(Debug, Deserialize, PartialEq)]
struct ChatReply {
    reply: String,
}

#[test]
fn post_json_serializes_body_and_decodes_reply() {
    let client = RequestClient::new(StubTransport::replying(200, r#"{"reply":"hi"}"#));
    let reply: ChatReply =
        block_on(client.post_json("/api/chat", &json!({ "message": "hello" }))).expect("ok");
    assert_eq!(reply, ChatReply { reply: "hi".into() });
    let sent = client.transport().last_request();
    assert_eq!(sent.method, Method::Post);
    assert_eq!(sent.body.as_deref(), Some(r#"{"message":"hello"}"#));
}

#[test]
fn wrong_shape_is_a_parse_error() {
    let client = RequestClient::new(StubTransport::replying(200, r#"{"other":1}"#));
    let result: Result<ChatReply, _> = block_on(client.get_json("/api/chat"));
    assert!(matches!(result, Err(RequestError::Parse { .. })));
}

#[test]
fn each_call_is_one_round_trip() {
    let stub = StubTransport::replying(500, "{}");
    stub.replies
        .borrow_mut()
        .push_back(Ok(HttpResponse { status: 200, body: "{}".into() }));
    let client = RequestClient::new(stub);
    assert!(block_on(client.request("/x", RequestOptions::get())).is_err());
    assert_eq!(client.transport().seen.borrow().len(), 1);
    assert!(block_on(client.request("/x", RequestOptions::get())).is_ok());
    assert_eq!(client.transport().seen.borrow().len(), 2);
}

#[test]
fn get_and_head_do_not_allow_bodies() {
    assert!(!Method::Get.allows_body());
    assert!(!Method::Head.allows_body());
    assert!(Method::Post.allows_body());
}

#[test]
fn method_and_credentials_names_parse() {
    assert_eq!(Method::from_name("post"), Some(Method::Post));
    assert_eq!(Method::from_name(" DELETE "), Some(Method::Delete));
    assert_eq!(Method::from_name("BREW"), None);
    assert_eq!(Credentials::from_name("same-origin"), Some(Credentials::SameOrigin));
    assert_eq!(Credentials::from_name("Include"), None);
}

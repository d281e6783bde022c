//! Fixtures shared by the unit and route tests.

use super::{
    api::stub::StubBackend,
    app,
    crypto::Signer,
    extractors::Viewer,
    models::{AppState, Role, User},
    session::{self, Session},
};
use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
};
use std::sync::Arc;
use tower::ServiceExt;

pub const SECRET: &str = "test-secret";

pub fn user(role: Role) -> User {
    User {
        id: format!("{role}-1"),
        name: match role {
            Role::Owner => "Olive Owner".into(),
            Role::Tenant => "Terry Tenant".into(),
        },
        email: format!("{role}@example.com"),
        phone: Some("555-0100".into()),
        role,
        created_at: None,
    }
}

pub fn session(role: Role) -> Session {
    Session {
        token: format!("{role}-token"),
        user: user(role),
    }
}

pub fn viewer(role: Role) -> Viewer {
    Viewer::from_session(Some(session(role)))
}

pub fn owner() -> Viewer {
    viewer(Role::Owner)
}

pub fn tenant() -> Viewer {
    viewer(Role::Tenant)
}

pub fn state(backend: StubBackend) -> (AppState, Arc<StubBackend>) {
    let backend = Arc::new(backend);
    let state = AppState {
        backend: backend.clone(),
        signer: Signer::new(SECRET),
    };
    (state, backend)
}

/// `Cookie` header value for a signed-in `role`.
pub fn cookie(role: Role) -> String {
    let signer = Signer::new(SECRET);
    format!(
        "{}={}",
        session::COOKIE_NAME,
        session::serialize_session(&signer, &session(role))
    )
}

fn builder(method: &str, uri: &str, role: Option<Role>) -> axum::http::request::Builder {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Hx-Request", "true");
    match role {
        Some(role) => builder.header("Cookie", cookie(role)),
        None => builder,
    }
}

/// An HTMX `GET`, as issued by a container or a modal button.
pub fn get(uri: &str, role: Option<Role>) -> Request<Body> {
    builder("GET", uri, role)
        .body(Body::empty())
        .expect("request")
}

/// A plain browser navigation.
pub fn navigate(uri: &str, role: Option<Role>) -> Request<Body> {
    let builder = Request::builder().uri(uri);
    let builder = match role {
        Some(role) => builder.header("Cookie", cookie(role)),
        None => builder,
    };
    builder.body(Body::empty()).expect("request")
}

/// An HTMX form submission.
pub fn form(method: &str, uri: &str, role: Option<Role>, body: &str) -> Request<Body> {
    builder(method, uri, role)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .expect("request")
}

#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Drive one request through the full router.
pub async fn send(
    backend: StubBackend,
    request: Request<Body>,
) -> (TestResponse, Arc<StubBackend>) {
    let (state, backend) = state(backend);
    let response = app(state).oneshot(request).await.expect("infallible");
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = hyper::body::to_bytes(response.into_body())
        .await
        .expect("body");
    let body = String::from_utf8(bytes.to_vec()).expect("utf-8 body");
    (
        TestResponse {
            status,
            headers,
            body,
        },
        backend,
    )
}

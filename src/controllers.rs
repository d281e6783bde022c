use super::{
    components,
    components::{CloseModal, Component, Notification},
    extractors::Viewer,
    htmx,
    models::AppState,
    session,
};
use axum::{
    extract::State,
    http::{HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
    Form,
};
use serde::Deserialize;

/// Bare fragments for HTMX swaps; a full page shell for a browser
/// navigation.
pub fn page_or_fragment<'a>(
    headers: &HeaderMap,
    title: &'a str,
    viewer: &'a Viewer,
    body: Box<dyn Component + 'a>,
) -> String {
    if htmx::is_htmx(headers) {
        body.render()
    } else {
        components::Page {
            title,
            viewer,
            children: body,
        }
        .render()
    }
}

/// A mutation went through: close the modal, toast, and have every
/// container listening for `event` reload itself.
pub fn saved(event: &str, message: impl Into<String>) -> Response {
    saved_with(event, message, &String::new())
}

/// [`saved`], plus `extra` markup (usually another out-of-band swap).
pub fn saved_with(
    event: &str,
    message: impl Into<String>,
    extra: &dyn Component,
) -> Response {
    (
        htmx::trigger(event),
        format!(
            "{}{}{}",
            CloseModal.render(),
            Notification::success(message).render(),
            extra.render()
        ),
    )
        .into_response()
}

/// Just a toast; the modal (if any) stays open so the user can fix the
/// form.
pub fn toast(notification: Notification) -> Response {
    notification.render().into_response()
}

pub async fn root(viewer: Viewer) -> impl IntoResponse {
    components::Page {
        title: "Home",
        viewer: &viewer,
        children: Box::new(components::Home { viewer: &viewer }),
    }
    .render()
}

pub async fn pong() -> impl IntoResponse {
    "pong"
}

pub async fn get_stylesheet() -> impl IntoResponse {
    let mut headers = HeaderMap::new();
    headers.insert(
        "content-type",
        HeaderValue::from_static("text/css; charset=utf-8"),
    );
    headers.insert(
        "cache-control",
        HeaderValue::from_static("public, max-age=3600"),
    );
    (headers, include_str!("./static/style.css"))
}

/// Loaded by every page's `#notifications` container; turns a message left
/// behind by a redirect into a toast, once.
pub async fn flash(
    State(AppState { signer, .. }): State<AppState>,
    headers: HeaderMap,
) -> Response {
    match session::flash_message(&signer, &headers) {
        Some(message) => (
            session::clear_flash_header(),
            Notification::success(message).render(),
        )
            .into_response(),
        None => "".into_response(),
    }
}

#[derive(Deserialize)]
pub struct ContactForm {
    name: String,
    email: String,
    message: String,
}

/// There is no backend endpoint for this; the message is acknowledged and
/// dropped.
pub async fn handle_contact(
    Form(ContactForm {
        name,
        email,
        message,
    }): Form<ContactForm>,
) -> impl IntoResponse {
    tracing::info!(%name, %email, len = message.len(), "contact form submitted");
    Notification::success(
        "Thank you for your message! We will get back to you soon.",
    )
    .render()
}

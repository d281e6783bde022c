use super::{
    api_ops::{self, Credentials, Registration},
    components, dashboard_for,
};
use crate::{
    api::ApiError,
    components::{Component, Notification},
    controllers::page_or_fragment,
    extractors::{SignedIn, Viewer},
    htmx,
    models::{AppState, Role},
    routes::Route,
    session,
};
use axum::{
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Response},
    Form,
};
use serde::Deserialize;

pub async fn login_form(viewer: Viewer, headers: HeaderMap) -> impl IntoResponse {
    page_or_fragment(&headers, "Login", &viewer, Box::new(components::LoginForm))
}

pub async fn register_form(
    viewer: Viewer,
    headers: HeaderMap,
) -> impl IntoResponse {
    page_or_fragment(
        &headers,
        "Register",
        &viewer,
        Box::new(components::RegisterForm),
    )
}

fn signed_in_response(
    state: &AppState,
    headers: &HeaderMap,
    signed_in: api_ops::SignedIn,
) -> Response {
    let api_ops::SignedIn { session, message } = signed_in;
    tracing::info!(user = %session.user.id, role = %session.user.role, %message, "signed in");
    let dashboard = dashboard_for(session.user.role);
    let mut cookies = session::set_cookie_header(&state.signer, &session);
    if let Some(flash) = session::set_flash_header(&state.signer, &message)
        .remove("Set-Cookie")
    {
        cookies.append("Set-Cookie", flash);
    }
    htmx::navigate_with(headers, &dashboard.to_string(), cookies)
}

fn auth_failure(err: ApiError, fallback: &str) -> Response {
    let message = match err {
        ApiError::Rejected { message } => message,
        other => {
            tracing::error!(error = %other, "auth request failed");
            fallback.to_string()
        }
    };
    Notification::error(message).render().into_response()
}

#[derive(Deserialize)]
pub struct LoginPayload {
    email: String,
    password: String,
}

pub async fn handle_login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(LoginPayload { email, password }): Form<LoginPayload>,
) -> Response {
    let credentials = Credentials {
        email: &email,
        password: &password,
    };
    match api_ops::login(state.backend.as_ref(), &credentials).await {
        Ok(signed_in) => signed_in_response(&state, &headers, signed_in),
        Err(e) => auth_failure(e, "Login failed. Please try again."),
    }
}

#[derive(Deserialize)]
pub struct RegisterPayload {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    role: String,
    #[serde(default)]
    phone: String,
}

impl RegisterPayload {
    fn role(&self) -> Option<Role> {
        match self.role.as_str() {
            "owner" => Some(Role::Owner),
            "tenant" => Some(Role::Tenant),
            _ => None,
        }
    }
}

pub async fn handle_register(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(payload): Form<RegisterPayload>,
) -> Response {
    let role = payload.role();
    let (Some(role), false) = (
        role,
        [&payload.name, &payload.email, &payload.password]
            .iter()
            .any(|v| v.trim().is_empty()),
    ) else {
        return Notification::error("Please fill all required fields")
            .render()
            .into_response();
    };
    let registration = Registration {
        name: payload.name.trim(),
        email: payload.email.trim(),
        password: &payload.password,
        role,
        phone: payload.phone.trim(),
    };
    match api_ops::register(state.backend.as_ref(), &registration).await {
        Ok(signed_in) => signed_in_response(&state, &headers, signed_in),
        Err(e) => auth_failure(e, "Registration failed. Please try again."),
    }
}

pub async fn logout(headers: HeaderMap) -> Response {
    htmx::navigate_with(
        &headers,
        &Route::Root.to_string(),
        session::clear_cookie_header(),
    )
}

/// The backend copy of the profile, or the one cached in the session when
/// the backend is unreachable.
pub async fn profile(
    State(AppState { backend, .. }): State<AppState>,
    SignedIn(viewer): SignedIn,
    headers: HeaderMap,
) -> impl IntoResponse {
    let (token, cached) = match viewer.session() {
        Some(s) => (s.token.as_str(), &s.user),
        None => return htmx::navigate(&headers, &Route::Login.to_string()),
    };
    let fetched = api_ops::profile(backend.as_ref(), token)
        .await
        .map_err(|e| tracing::warn!(error = %e, "using cached profile"))
        .ok();
    let user = fetched.as_ref().unwrap_or(cached);
    page_or_fragment(
        &headers,
        "My Profile",
        &viewer,
        Box::new(components::Profile { user }),
    )
    .into_response()
}

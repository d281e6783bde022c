use super::{
    htmx,
    models::{AppState, Role, User},
    routes::Route,
    session::{self, Session},
};
use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts, response::Response};
use std::convert::Infallible;

/// Who is looking at the page. Every render that gates actions by role takes
/// one of these.
#[derive(Clone, Debug)]
pub enum Viewer {
    Anonymous,
    Owner(Session),
    Tenant(Session),
}

impl Viewer {
    pub fn from_session(session: Option<Session>) -> Self {
        match session {
            None => Viewer::Anonymous,
            Some(s) => match s.user.role {
                Role::Owner => Viewer::Owner(s),
                Role::Tenant => Viewer::Tenant(s),
            },
        }
    }
    pub fn session(&self) -> Option<&Session> {
        match self {
            Viewer::Anonymous => None,
            Viewer::Owner(s) | Viewer::Tenant(s) => Some(s),
        }
    }
    pub fn user(&self) -> Option<&User> {
        self.session().map(|s| &s.user)
    }
    pub fn token(&self) -> Option<&str> {
        self.session().map(|s| s.token.as_str())
    }
    pub fn is_owner(&self) -> bool {
        matches!(self, Viewer::Owner(_))
    }
    pub fn is_tenant(&self) -> bool {
        matches!(self, Viewer::Tenant(_))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for Viewer {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(viewer_from_parts(parts, state))
    }
}

fn viewer_from_parts(parts: &Parts, state: &AppState) -> Viewer {
    let session = session::session_cookie(&parts.headers).and_then(|c| {
        session::deserialize_session(&state.signer, c)
            .map_err(|e| tracing::debug!(error = %e, "ignoring session"))
            .ok()
    });
    Viewer::from_session(session)
}

/// Any signed-in user; anonymous visitors are sent to the login page.
pub struct SignedIn(pub Viewer);

#[async_trait]
impl FromRequestParts<AppState> for SignedIn {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let viewer = viewer_from_parts(parts, state);
        match viewer {
            Viewer::Anonymous => {
                Err(htmx::navigate(&parts.headers, &Route::Login.to_string()))
            }
            viewer => Ok(SignedIn(viewer)),
        }
    }
}

/// Owner-only routes. Tenants are bounced to their own dashboard.
pub struct OwnerOnly(pub Session);

#[async_trait]
impl FromRequestParts<AppState> for OwnerOnly {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let viewer = viewer_from_parts(parts, state);
        match viewer {
            Viewer::Owner(s) => Ok(OwnerOnly(s)),
            Viewer::Tenant(_) => Err(htmx::navigate(
                &parts.headers,
                &Route::TenantDashboard.to_string(),
            )),
            Viewer::Anonymous => {
                Err(htmx::navigate(&parts.headers, &Route::Login.to_string()))
            }
        }
    }
}

/// Tenant-only routes. Owners are bounced to their own dashboard.
pub struct TenantOnly(pub Session);

#[async_trait]
impl FromRequestParts<AppState> for TenantOnly {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let viewer = viewer_from_parts(parts, state);
        match viewer {
            Viewer::Tenant(s) => Ok(TenantOnly(s)),
            Viewer::Owner(_) => Err(htmx::navigate(
                &parts.headers,
                &Route::OwnerDashboard.to_string(),
            )),
            Viewer::Anonymous => {
                Err(htmx::navigate(&parts.headers, &Route::Login.to_string()))
            }
        }
    }
}

use super::{
    api_ops, components, models::ApplicationStatus, ApplicationsManager, CHANGED,
};
use crate::{
    components::Notification,
    controllers::{page_or_fragment, saved, toast},
    errors::ServerError,
    extractors::{OwnerOnly, Viewer},
    models::AppState,
};
use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    Form,
};
use serde::Deserialize;

pub async fn list_applications(
    State(AppState { backend, .. }): State<AppState>,
    OwnerOnly(session): OwnerOnly,
    headers: HeaderMap,
) -> impl IntoResponse {
    let manager = ApplicationsManager::load(backend.as_ref(), &session.token).await;
    let body = manager.respond(&manager.display());
    let viewer = Viewer::Owner(session);
    page_or_fragment(&headers, "Applications", &viewer, Box::new(body))
}

pub async fn view_application(
    State(AppState { backend, .. }): State<AppState>,
    OwnerOnly(session): OwnerOnly,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ServerError> {
    let manager = ApplicationsManager::load(backend.as_ref(), &session.token).await;
    let application = manager.find(&id)?;
    let viewer = Viewer::Owner(session);
    Ok(page_or_fragment(
        &headers,
        "Application Details",
        &viewer,
        Box::new(components::ApplicationDetails { application }),
    ))
}

#[derive(Deserialize)]
pub struct StatusPayload {
    status: ApplicationStatus,
}

pub async fn update_status(
    State(AppState { backend, .. }): State<AppState>,
    OwnerOnly(session): OwnerOnly,
    Path(id): Path<String>,
    Form(StatusPayload { status }): Form<StatusPayload>,
) -> Response {
    if status == ApplicationStatus::Pending {
        return toast(Notification::error(
            "Applications can only be approved or rejected",
        ));
    }
    match api_ops::update_status(backend.as_ref(), &session.token, &id, status)
        .await
    {
        Ok(()) => saved(CHANGED, format!("Application {status} successfully!")),
        Err(e) => toast(Notification::error(format!(
            "Error updating application: {e}"
        ))),
    }
}

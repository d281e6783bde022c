use super::{
    api_ops, components,
    models::{RequestForm, StatusForm},
    MaintenanceManager, CHANGED,
};
use crate::{
    components::{Component, Notification},
    controllers::{page_or_fragment, saved, toast},
    errors::ServerError,
    extractors::{OwnerOnly, SignedIn, TenantOnly, Viewer},
    models::AppState,
};
use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    Form,
};

pub async fn list_requests(
    State(AppState { backend, .. }): State<AppState>,
    SignedIn(viewer): SignedIn,
    headers: HeaderMap,
) -> impl IntoResponse {
    let token = viewer.token().unwrap_or_default();
    let manager = MaintenanceManager::load(backend.as_ref(), token).await;
    let body = manager.respond(&manager.display(&viewer));
    page_or_fragment(&headers, "Maintenance", &viewer, Box::new(body))
}

pub async fn view_request(
    State(AppState { backend, .. }): State<AppState>,
    SignedIn(viewer): SignedIn,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ServerError> {
    let token = viewer.token().unwrap_or_default();
    let manager = MaintenanceManager::load(backend.as_ref(), token).await;
    let request = manager.find(&id)?;
    Ok(page_or_fragment(
        &headers,
        "Maintenance Request",
        &viewer,
        Box::new(components::RequestDetails {
            request,
            viewer: &viewer,
        }),
    ))
}

pub async fn new_request_form(
    TenantOnly(session): TenantOnly,
    headers: HeaderMap,
) -> impl IntoResponse {
    let viewer = Viewer::Tenant(session);
    page_or_fragment(
        &headers,
        "New Maintenance Request",
        &viewer,
        Box::new(components::NewRequestModal),
    )
}

pub async fn handle_new_request(
    State(AppState { backend, .. }): State<AppState>,
    TenantOnly(session): TenantOnly,
    Form(form): Form<RequestForm>,
) -> Response {
    let draft = match form.validate() {
        Ok(draft) => draft,
        Err(message) => return toast(Notification::error(message)),
    };
    match api_ops::create(backend.as_ref(), &session.token, &draft).await {
        Ok(()) => saved(CHANGED, "Maintenance request submitted successfully!"),
        Err(e) => toast(Notification::error(format!(
            "Error submitting request: {e}"
        ))),
    }
}

pub async fn status_form(
    State(AppState { backend, .. }): State<AppState>,
    OwnerOnly(session): OwnerOnly,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ServerError> {
    let manager = MaintenanceManager::load(backend.as_ref(), &session.token).await;
    let viewer = Viewer::Owner(session);
    let request = manager.find(&id)?;
    Ok(page_or_fragment(
        &headers,
        "Update Status",
        &viewer,
        Box::new(components::StatusFormModal { request }),
    ))
}

pub async fn update_status(
    State(AppState { backend, .. }): State<AppState>,
    OwnerOnly(session): OwnerOnly,
    Path(id): Path<String>,
    Form(form): Form<StatusForm>,
) -> Response {
    let update = match form.validate() {
        Ok(update) => update,
        Err(message) => return toast(Notification::error(message)),
    };
    match api_ops::update_status(backend.as_ref(), &session.token, &id, &update).await
    {
        Ok(()) => saved(CHANGED, "Status updated successfully!"),
        Err(e) => toast(Notification::error(format!(
            "Error updating status: {e}"
        ))),
    }
}

pub async fn my_stats(
    State(AppState { backend, .. }): State<AppState>,
    SignedIn(viewer): SignedIn,
    headers: HeaderMap,
) -> impl IntoResponse {
    let token = viewer.token().unwrap_or_default();
    let (stats, notice) = match api_ops::my_stats(backend.as_ref(), token).await {
        Ok(stats) => (stats, None),
        Err(e) => {
            tracing::error!(error = %e, "loading maintenance stats");
            (
                Default::default(),
                Some(Notification::error("Error loading maintenance stats")),
            )
        }
    };
    let mut body = components::MaintenanceStatCards { stats: &stats }.render();
    if let Some(n) = notice {
        body.push_str(&n.render());
    }
    page_or_fragment(&headers, "Maintenance", &viewer, Box::new(body))
}

use super::{
    api_ops, components,
    models::{PropertyDraft, PropertyForm},
    PropertiesManager, CHANGED,
};
use crate::{
    api::ApiError,
    applications::{self, models::ApplicationForm},
    auth::components::LoginForm,
    components::{with_toast, Notification},
    controllers::{page_or_fragment, saved, toast},
    errors::ServerError,
    extractors::{OwnerOnly, TenantOnly, Viewer},
    models::AppState,
};
use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    Form,
};

pub async fn list_properties(
    State(AppState { backend, .. }): State<AppState>,
    viewer: Viewer,
    headers: HeaderMap,
) -> impl IntoResponse {
    let manager = PropertiesManager::load(backend.as_ref(), &viewer).await;
    let body = manager.respond(&manager.display(&viewer));
    page_or_fragment(&headers, "Properties", &viewer, Box::new(body))
}

pub async fn new_property_form(
    OwnerOnly(session): OwnerOnly,
    headers: HeaderMap,
) -> impl IntoResponse {
    let viewer = Viewer::Owner(session);
    page_or_fragment(
        &headers,
        "Add Property",
        &viewer,
        Box::new(components::PropertyFormModal { property: None }),
    )
}

pub async fn edit_property_form(
    State(AppState { backend, .. }): State<AppState>,
    OwnerOnly(session): OwnerOnly,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ServerError> {
    let viewer = Viewer::Owner(session);
    let manager = PropertiesManager::load(backend.as_ref(), &viewer).await;
    let property = manager.find(&id)?;
    Ok(page_or_fragment(
        &headers,
        "Edit Property",
        &viewer,
        Box::new(components::PropertyFormModal {
            property: Some(property),
        }),
    ))
}

fn save_failed(e: ApiError) -> Response {
    toast(Notification::error(format!("Error saving property: {e}")))
}

async fn save(
    state: &AppState,
    token: &str,
    id: Option<&str>,
    form: &PropertyForm,
) -> Response {
    let draft: PropertyDraft = match form.validate() {
        Ok(draft) => draft,
        Err(message) => return toast(Notification::error(message)),
    };
    let backend = state.backend.as_ref();
    let (result, message) = match id {
        Some(id) => (
            api_ops::update(backend, token, id, &draft).await,
            "Property updated successfully!",
        ),
        None => (
            api_ops::create(backend, token, &draft).await,
            "Property added successfully!",
        ),
    };
    match result {
        Ok(()) => saved(CHANGED, message),
        Err(e) => save_failed(e),
    }
}

pub async fn create_property(
    State(state): State<AppState>,
    OwnerOnly(session): OwnerOnly,
    Form(form): Form<PropertyForm>,
) -> Response {
    save(&state, &session.token, None, &form).await
}

pub async fn update_property(
    State(state): State<AppState>,
    OwnerOnly(session): OwnerOnly,
    Path(id): Path<String>,
    Form(form): Form<PropertyForm>,
) -> Response {
    save(&state, &session.token, Some(&id), &form).await
}

pub async fn delete_property(
    State(AppState { backend, .. }): State<AppState>,
    OwnerOnly(session): OwnerOnly,
    Path(id): Path<String>,
) -> Response {
    match api_ops::delete(backend.as_ref(), &session.token, &id).await {
        Ok(()) => saved(CHANGED, "Property deleted successfully!"),
        Err(e) => toast(Notification::error(format!(
            "Error deleting property: {e}"
        ))),
    }
}

pub async fn view_property(
    State(AppState { backend, .. }): State<AppState>,
    viewer: Viewer,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ServerError> {
    let manager = PropertiesManager::load(backend.as_ref(), &viewer).await;
    let property = manager.find(&id)?;
    Ok(page_or_fragment(
        &headers,
        &property.name,
        &viewer,
        Box::new(components::PropertyDetails {
            property,
            viewer: &viewer,
        }),
    ))
}

pub async fn apply_form(
    State(AppState { backend, .. }): State<AppState>,
    viewer: Viewer,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let user = match &viewer {
        Viewer::Anonymous => {
            let login = with_toast(
                &LoginForm,
                Some(&Notification::info(
                    "Please login to apply for this property",
                )),
            );
            return Ok(
                page_or_fragment(&headers, "Login", &viewer, Box::new(login))
                    .into_response(),
            );
        }
        Viewer::Owner(_) => {
            return Ok(toast(Notification::info(
                "Only tenants can apply for properties",
            )));
        }
        Viewer::Tenant(session) => &session.user,
    };
    let manager = PropertiesManager::load(backend.as_ref(), &viewer).await;
    let property = manager.find(&id)?;
    Ok(page_or_fragment(
        &headers,
        "Apply",
        &viewer,
        Box::new(components::ApplyForm { property, user }),
    )
    .into_response())
}

pub async fn submit_application(
    State(AppState { backend, .. }): State<AppState>,
    TenantOnly(session): TenantOnly,
    Path(id): Path<String>,
    Form(form): Form<ApplicationForm>,
) -> Response {
    let draft = match form.validate(&id, &session.user) {
        Ok(draft) => draft,
        Err(message) => return toast(Notification::error(message)),
    };
    match applications::api_ops::submit(backend.as_ref(), &session.token, &draft)
        .await
    {
        Ok(()) => saved(
            applications::CHANGED,
            "Application submitted successfully! The owner will contact you soon.",
        ),
        Err(e) => toast(Notification::error(format!(
            "Error submitting application: {e}"
        ))),
    }
}

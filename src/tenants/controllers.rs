use super::{api_ops, components, models::TenantForm, TenantsManager, CHANGED};
use crate::{
    api::ApiError,
    components::{Component, Notification},
    controllers::{page_or_fragment, saved, toast},
    errors::ServerError,
    extractors::{OwnerOnly, SignedIn, TenantOnly, Viewer},
    models::AppState,
    properties::{self, PropertiesManager},
};
use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    Form,
};

pub async fn list_tenants(
    State(AppState { backend, .. }): State<AppState>,
    OwnerOnly(session): OwnerOnly,
    headers: HeaderMap,
) -> impl IntoResponse {
    let manager = TenantsManager::load(backend.as_ref(), &session.token).await;
    let viewer = Viewer::Owner(session);
    let body = manager.respond(&manager.display(&viewer));
    page_or_fragment(&headers, "Tenants", &viewer, Box::new(body))
}

pub async fn view_tenant(
    State(AppState { backend, .. }): State<AppState>,
    SignedIn(viewer): SignedIn,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let Some(token) = viewer.token() else {
        return Err(ServerError::NotFound("tenant"));
    };
    let manager = TenantsManager::load(backend.as_ref(), token).await;
    let tenant = manager.find(&id)?;
    Ok(page_or_fragment(
        &headers,
        "Tenant Details",
        &viewer,
        Box::new(components::TenantDetails { tenant }),
    )
    .into_response())
}

pub async fn new_tenant_form(
    State(AppState { backend, .. }): State<AppState>,
    OwnerOnly(session): OwnerOnly,
    headers: HeaderMap,
) -> impl IntoResponse {
    let viewer = Viewer::Owner(session);
    let properties = PropertiesManager::load(backend.as_ref(), &viewer).await;
    let form = components::TenantFormModal {
        tenant: None,
        properties: &properties.items,
    };
    page_or_fragment(
        &headers,
        "Add Tenant",
        &viewer,
        Box::new(properties.respond(&form)),
    )
}

pub async fn edit_tenant_form(
    State(AppState { backend, .. }): State<AppState>,
    OwnerOnly(session): OwnerOnly,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ServerError> {
    let viewer = Viewer::Owner(session);
    let token = viewer.token().unwrap_or_default();
    let (tenants, properties) = futures::join!(
        TenantsManager::load(backend.as_ref(), token),
        PropertiesManager::load(backend.as_ref(), &viewer)
    );
    let tenant = tenants.find(&id)?;
    Ok(page_or_fragment(
        &headers,
        "Edit Tenant",
        &viewer,
        Box::new(components::TenantFormModal {
            tenant: Some(tenant),
            properties: &properties.items,
        }),
    ))
}

pub async fn add_tenant(
    State(AppState { backend, .. }): State<AppState>,
    OwnerOnly(session): OwnerOnly,
    Form(form): Form<TenantForm>,
) -> Response {
    let draft = match form.validate(true) {
        Ok(draft) => draft,
        Err(message) => return toast(Notification::error(message)),
    };
    match api_ops::create(backend.as_ref(), &session.token, &draft).await {
        // Adding a tenant occupies the property, so the listings change too.
        Ok(()) => saved(
            &format!("{CHANGED}, {}", properties::CHANGED),
            "Tenant added successfully!",
        ),
        Err(e) => toast(Notification::error(format!("Error adding tenant: {e}"))),
    }
}

pub async fn update_tenant(
    State(AppState { backend, .. }): State<AppState>,
    OwnerOnly(session): OwnerOnly,
    Path(id): Path<String>,
    Form(form): Form<TenantForm>,
) -> Response {
    let draft = match form.validate(false) {
        Ok(draft) => draft,
        Err(message) => return toast(Notification::error(message)),
    };
    match api_ops::update(backend.as_ref(), &session.token, &id, &draft).await {
        Ok(()) => saved(CHANGED, "Tenant updated successfully!"),
        Err(e) => toast(Notification::error(format!(
            "Error updating tenant: {e}"
        ))),
    }
}

pub async fn remove_tenant(
    State(AppState { backend, .. }): State<AppState>,
    OwnerOnly(session): OwnerOnly,
    Path(id): Path<String>,
) -> Response {
    match api_ops::remove(backend.as_ref(), &session.token, &id).await {
        Ok(()) => saved(
            &format!("{CHANGED}, {}", properties::CHANGED),
            "Tenant removed successfully!",
        ),
        Err(e) => toast(Notification::error(format!(
            "Error removing tenant: {e}"
        ))),
    }
}

pub async fn my_lease(
    State(AppState { backend, .. }): State<AppState>,
    TenantOnly(session): TenantOnly,
    headers: HeaderMap,
) -> impl IntoResponse {
    let result = api_ops::my_lease(backend.as_ref(), &session.token).await;
    let viewer = Viewer::Tenant(session);
    let (lease, notice) = match result {
        Ok(lease) => (lease, None),
        // A tenant without a lease is an ordinary state, not an outage.
        Err(ApiError::Rejected { message }) => {
            (None, Some(Notification::info(message)))
        }
        Err(e) => {
            tracing::error!(error = %e, "loading lease");
            (None, Some(Notification::error("Error loading lease")))
        }
    };
    let mut body = components::LeaseSummary {
        lease: lease.as_ref(),
    }
    .render();
    if let Some(n) = notice {
        body.push_str(&n.render());
    }
    page_or_fragment(&headers, "My Lease", &viewer, Box::new(body))
}

#[cfg(test)]
mod tests {
    use crate::{
        api::{stub::StubBackend, Method},
        models::Role,
        testing::{self, send},
    };
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_empty_tenants_render_empty_row() {
        let backend = StubBackend::new().reply(
            Method::Get,
            "/tenants",
            json!({"success": true, "tenants": []}),
        );
        let (res, _) =
            send(backend, testing::get("/tenants", Some(Role::Owner))).await;
        assert_eq!(res.status, StatusCode::OK);
        assert!(res.body.contains("No Tenants Found"));
    }

    #[tokio::test]
    async fn test_add_tenant_posts_and_reloads_both_lists() {
        let backend = StubBackend::new().reply(
            Method::Post,
            "/tenants",
            json!({"success": true}),
        );
        let (res, backend) = send(
            backend,
            testing::form(
                "POST",
                "/tenants",
                Some(Role::Owner),
                "email=t%40example.com&property=p1&unit=4B&rent=1200&lease_start=2024-01-01&lease_end=2024-12-31",
            ),
        )
        .await;
        assert!(res.body.contains("Tenant added successfully!"));
        assert_eq!(
            res.header("Hx-Trigger"),
            Some("tenants-changed, properties-changed")
        );
        let sent = backend.last_request(Method::Post, "/tenants").expect("sent");
        assert_eq!(sent.body.expect("body")["unit"], json!("4B"));
    }

    #[tokio::test]
    async fn test_add_tenant_requires_fields() {
        let (res, backend) = send(
            StubBackend::new(),
            testing::form("POST", "/tenants", Some(Role::Owner), "unit=4B"),
        )
        .await;
        assert!(res.body.contains("Please fill all required fields"));
        assert!(backend.requests().is_empty());
    }

    #[tokio::test]
    async fn test_remove_tenant() {
        let backend = StubBackend::new().reply(
            Method::Delete,
            "/tenants/t1",
            json!({"success": true}),
        );
        let (res, _) = send(
            backend,
            testing::form("DELETE", "/tenants/t1", Some(Role::Owner), ""),
        )
        .await;
        assert!(res.body.contains("Tenant removed successfully!"));
    }

    #[tokio::test]
    async fn test_my_lease_without_lease() {
        let backend = StubBackend::new().reply(
            Method::Get,
            "/tenants/my-lease",
            json!({"success": false, "message": "No active lease found"}),
        );
        let (res, _) = send(
            backend,
            testing::get("/tenants/my-lease", Some(Role::Tenant)),
        )
        .await;
        assert!(res.body.contains("No Active Lease"));
        assert!(res.body.contains("No active lease found"));
        assert!(res.body.contains("notification-info"));
    }

    #[tokio::test]
    async fn test_owner_cannot_open_my_lease() {
        let (res, _) = send(
            StubBackend::new(),
            testing::get("/tenants/my-lease", Some(Role::Owner)),
        )
        .await;
        assert_eq!(res.header("Hx-Redirect"), Some("/dashboard/owner"));
    }
}

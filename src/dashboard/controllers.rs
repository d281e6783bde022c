use super::{
    components::{
        DashboardShell, DashboardStatsCards, OwnerContent, RecentActivity,
        TenantContent,
    },
    Dashboard, OwnerView, TenantView,
};
use crate::{
    components::{self, with_toast, Component},
    errors::ServerError,
    extractors::{OwnerOnly, SignedIn, TenantOnly, Viewer},
    htmx,
    models::AppState,
    payments::PaymentsManager,
};
use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::IntoResponse,
};

fn full_page(title: &str, viewer: &Viewer, shell: DashboardShell) -> String {
    components::Page {
        title,
        viewer,
        children: Box::new(shell),
    }
    .render()
}

pub async fn owner_dashboard(OwnerOnly(session): OwnerOnly) -> impl IntoResponse {
    let viewer = Viewer::Owner(session);
    full_page(
        "Owner Dashboard",
        &viewer,
        DashboardShell::owner(&viewer, OwnerView::Overview),
    )
}

pub async fn tenant_dashboard(
    TenantOnly(session): TenantOnly,
) -> impl IntoResponse {
    let viewer = Viewer::Tenant(session);
    full_page(
        "Tenant Dashboard",
        &viewer,
        DashboardShell::tenant(&viewer, TenantView::Overview),
    )
}

/// Nav links swap just the view; a reload or a pushed url renders the whole
/// dashboard around it.
pub async fn owner_view(
    OwnerOnly(session): OwnerOnly,
    Path(view): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ServerError> {
    let view: OwnerView = view
        .parse()
        .map_err(|_| ServerError::NotFound("view"))?;
    let viewer = Viewer::Owner(session);
    Ok(if htmx::is_htmx(&headers) {
        OwnerContent { view }.render()
    } else {
        full_page(
            "Owner Dashboard",
            &viewer,
            DashboardShell::owner(&viewer, view),
        )
    })
}

pub async fn tenant_view(
    TenantOnly(session): TenantOnly,
    Path(view): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ServerError> {
    let view: TenantView = view
        .parse()
        .map_err(|_| ServerError::NotFound("view"))?;
    let viewer = Viewer::Tenant(session);
    Ok(if htmx::is_htmx(&headers) {
        TenantContent { view }.render()
    } else {
        full_page(
            "Tenant Dashboard",
            &viewer,
            DashboardShell::tenant(&viewer, view),
        )
    })
}

pub async fn stats(
    State(AppState { backend, .. }): State<AppState>,
    SignedIn(viewer): SignedIn,
) -> impl IntoResponse {
    let dashboard = Dashboard::load(backend.as_ref(), &viewer).await;
    let summary = dashboard.summary(&viewer);
    tracing::debug!(?summary, "dashboard figures");
    with_toast(
        &DashboardStatsCards {
            summary: &summary,
            viewer: &viewer,
        },
        dashboard.toast(),
    )
}

pub async fn recent_activity(
    State(AppState { backend, .. }): State<AppState>,
    SignedIn(viewer): SignedIn,
) -> impl IntoResponse {
    let token = viewer.token().unwrap_or_default();
    let manager = PaymentsManager::load(backend.as_ref(), token).await;
    let feed = RecentActivity {
        payments: manager.visible_to(&viewer),
    };
    manager.respond(&feed)
}

#[cfg(test)]
mod tests {
    use crate::{
        api::{stub::StubBackend, ApiError, Method},
        models::Role,
        testing::{self, send},
    };
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_owner_dashboard_is_a_full_page() {
        let (res, _) = send(
            StubBackend::new(),
            testing::navigate("/dashboard/owner", Some(Role::Owner)),
        )
        .await;
        assert_eq!(res.status, StatusCode::OK);
        assert!(res.body.contains("<!DOCTYPE html>"));
        assert!(res.body.contains(r#"id="dashboardContent""#));
        assert!(res.body.contains(r#"id="recentActivity""#));
    }

    #[tokio::test]
    async fn test_roles_are_sent_to_their_own_dashboard() {
        let (res, _) = send(
            StubBackend::new(),
            testing::get("/dashboard/owner", Some(Role::Tenant)),
        )
        .await;
        assert_eq!(res.header("Hx-Redirect"), Some("/dashboard/tenant"));

        let (res, _) = send(
            StubBackend::new(),
            testing::get("/dashboard/tenant/payments", Some(Role::Owner)),
        )
        .await;
        assert_eq!(res.header("Hx-Redirect"), Some("/dashboard/owner"));

        let (res, _) = send(
            StubBackend::new(),
            testing::get("/dashboard/tenant", None),
        )
        .await;
        assert_eq!(res.header("Hx-Redirect"), Some("/auth/login"));
    }

    #[tokio::test]
    async fn test_view_is_a_fragment_for_htmx() {
        let (res, _) = send(
            StubBackend::new(),
            testing::get("/dashboard/owner/tenants", Some(Role::Owner)),
        )
        .await;
        assert_eq!(res.status, StatusCode::OK);
        assert!(!res.body.contains("<!DOCTYPE html>"));
        assert!(res.body.contains(r#"id="tenantsList""#));

        let (res, _) = send(
            StubBackend::new(),
            testing::navigate("/dashboard/tenant/payments", Some(Role::Tenant)),
        )
        .await;
        assert!(res.body.contains("<!DOCTYPE html>"));
        assert!(res.body.contains(r#"id="tenantPaymentsList""#));
    }

    #[tokio::test]
    async fn test_unknown_view_is_not_found() {
        let (res, _) = send(
            StubBackend::new(),
            testing::get("/dashboard/tenant/tenants", Some(Role::Tenant)),
        )
        .await;
        assert_eq!(res.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_owner_stats() {
        let backend = StubBackend::new()
            .reply(
                Method::Get,
                "/properties/my-properties",
                json!({"success": true, "properties": [{"_id": "p1", "name": "A"}]}),
            )
            .reply(Method::Get, "/tenants", json!({"success": true, "tenants": []}))
            .reply(
                Method::Get,
                "/payments",
                json!({"success": true, "payments": [
                    {"_id": "a", "amount": 1500, "status": "paid"}
                ]}),
            )
            .reply(
                Method::Get,
                "/payments/stats",
                json!({"success": true, "stats": {"monthlyRevenue": 1500}}),
            );
        let (res, _) = send(
            backend,
            testing::get("/dashboard/stats", Some(Role::Owner)),
        )
        .await;
        assert!(res.body.contains("Total Properties"));
        assert!(res.body.contains("$1,500"));
        assert!(!res.body.contains("notification-error"));
    }

    #[tokio::test]
    async fn test_recent_activity_failure_shows_empty_feed_and_toast() {
        let backend = StubBackend::new().fail(
            Method::Get,
            "/payments",
            ApiError::Transport("down".into()),
        );
        let (res, _) = send(
            backend,
            testing::get("/dashboard/activity", Some(Role::Owner)),
        )
        .await;
        assert!(res.body.contains("No recent activity"));
        assert!(res.body.contains("Error loading payments"));
    }
}

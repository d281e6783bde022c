use super::DocumentsManager;
use crate::{
    components::Notification,
    controllers::{page_or_fragment, toast},
    extractors::SignedIn,
    models::AppState,
};
use axum::{
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Response},
};

pub async fn list_documents(
    State(AppState { backend, .. }): State<AppState>,
    SignedIn(viewer): SignedIn,
    headers: HeaderMap,
) -> impl IntoResponse {
    let token = viewer.token().unwrap_or_default();
    let manager = DocumentsManager::load(backend.as_ref(), token).await;
    let body = manager.respond(&manager.display());
    page_or_fragment(&headers, "Documents", &viewer, Box::new(body))
}

pub async fn upload_document(SignedIn(_): SignedIn) -> Response {
    toast(Notification::info(
        "Document upload is not available yet. Please share files with your property manager directly.",
    ))
}

#[cfg(test)]
mod tests {
    use crate::{
        api::{stub::StubBackend, Method},
        models::Role,
        testing::{self, send},
    };
    use serde_json::json;

    #[tokio::test]
    async fn test_list_documents() {
        let backend = StubBackend::new().reply(
            Method::Get,
            "/documents",
            json!({"success": true, "documents": [{"_id": "d1", "name": "Lease 2024"}]}),
        );
        let (res, _) =
            send(backend, testing::get("/documents", Some(Role::Tenant))).await;
        assert!(res.body.contains("Lease 2024"));
    }

    #[tokio::test]
    async fn test_upload_is_an_info_toast() {
        let (res, backend) = send(
            StubBackend::new(),
            testing::form("POST", "/documents/upload", Some(Role::Owner), ""),
        )
        .await;
        assert!(res.body.contains("notification-info"));
        assert!(backend.requests().is_empty());
    }
}

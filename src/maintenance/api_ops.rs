use super::models::{MaintenanceRequest, MaintenanceStats, RequestDraft, StatusUpdate};
use crate::api::{call, ApiError, ApiRequest, Backend};

pub async fn list(
    backend: &dyn Backend,
    token: &str,
) -> Result<Vec<MaintenanceRequest>, ApiError> {
    call(backend, ApiRequest::get("/maintenance").bearer(Some(token)))
        .await?
        .take_list("requests")
}

pub async fn create(
    backend: &dyn Backend,
    token: &str,
    draft: &RequestDraft,
) -> Result<(), ApiError> {
    call(
        backend,
        ApiRequest::post("/maintenance").bearer(Some(token)).json(draft)?,
    )
    .await?;
    Ok(())
}

pub async fn update_status(
    backend: &dyn Backend,
    token: &str,
    id: &str,
    update: &StatusUpdate,
) -> Result<(), ApiError> {
    call(
        backend,
        ApiRequest::put(format!("/maintenance/{id}"))
            .bearer(Some(token))
            .json(update)?,
    )
    .await?;
    Ok(())
}

pub async fn my_stats(
    backend: &dyn Backend,
    token: &str,
) -> Result<MaintenanceStats, ApiError> {
    call(
        backend,
        ApiRequest::get("/maintenance/my-stats").bearer(Some(token)),
    )
    .await?
    .take("stats")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{stub::StubBackend, Method};
    use crate::maintenance::models::MaintenanceStatus;
    use serde_json::json;

    #[tokio::test]
    async fn test_update_status_puts_status_only() {
        let backend = StubBackend::new().reply(
            Method::Put,
            "/maintenance/m1",
            json!({"success": true}),
        );
        update_status(
            &backend,
            "tok",
            "m1",
            &StatusUpdate {
                status: MaintenanceStatus::Completed,
            },
        )
        .await
        .expect("updated");
        let sent = backend
            .last_request(Method::Put, "/maintenance/m1")
            .expect("sent");
        assert_eq!(sent.body, Some(json!({"status": "completed"})));
    }

    #[tokio::test]
    async fn test_missing_requests_key_is_empty() {
        let backend = StubBackend::new().reply(
            Method::Get,
            "/maintenance",
            json!({"success": true}),
        );
        assert!(list(&backend, "tok").await.expect("list").is_empty());
    }
}

use super::models::{Application, ApplicationDraft, ApplicationStatus};
use crate::api::{call, ApiError, ApiRequest, Backend};
use serde_json::json;

/// Applications for the owner's properties.
pub async fn list(
    backend: &dyn Backend,
    token: &str,
) -> Result<Vec<Application>, ApiError> {
    call(
        backend,
        ApiRequest::get("/applications/my-properties").bearer(Some(token)),
    )
    .await?
    .take_list("applications")
}

pub async fn submit(
    backend: &dyn Backend,
    token: &str,
    draft: &ApplicationDraft,
) -> Result<(), ApiError> {
    call(
        backend,
        ApiRequest::post("/applications").bearer(Some(token)).json(draft)?,
    )
    .await?;
    Ok(())
}

pub async fn update_status(
    backend: &dyn Backend,
    token: &str,
    id: &str,
    status: ApplicationStatus,
) -> Result<(), ApiError> {
    call(
        backend,
        ApiRequest::put(format!("/applications/{id}/status"))
            .bearer(Some(token))
            .json(&json!({ "status": status }))?,
    )
    .await?;
    Ok(())
}

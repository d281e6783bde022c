use super::models::Document;
use crate::api::{call, ApiError, ApiRequest, Backend};

pub async fn list(backend: &dyn Backend, token: &str) -> Result<Vec<Document>, ApiError> {
    call(backend, ApiRequest::get("/documents").bearer(Some(token)))
        .await?
        .take_list("documents")
}

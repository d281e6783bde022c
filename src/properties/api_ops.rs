use super::models::{Property, PropertyDraft};
use crate::{
    api::{call, ApiError, ApiRequest, Backend},
    extractors::Viewer,
};

/// Owners manage their own listings; everybody else browses the public
/// catalogue.
pub fn list_path(viewer: &Viewer) -> &'static str {
    if viewer.is_owner() {
        "/properties/my-properties"
    } else {
        "/properties"
    }
}

pub async fn list(
    backend: &dyn Backend,
    viewer: &Viewer,
) -> Result<Vec<Property>, ApiError> {
    let request = ApiRequest::get(list_path(viewer)).bearer(viewer.token());
    call(backend, request).await?.take_list("properties")
}

pub async fn create(
    backend: &dyn Backend,
    token: &str,
    draft: &PropertyDraft,
) -> Result<(), ApiError> {
    call(
        backend,
        ApiRequest::post("/properties").bearer(Some(token)).json(draft)?,
    )
    .await?;
    Ok(())
}

pub async fn update(
    backend: &dyn Backend,
    token: &str,
    id: &str,
    draft: &PropertyDraft,
) -> Result<(), ApiError> {
    call(
        backend,
        ApiRequest::put(format!("/properties/{id}"))
            .bearer(Some(token))
            .json(draft)?,
    )
    .await?;
    Ok(())
}

pub async fn delete(
    backend: &dyn Backend,
    token: &str,
    id: &str,
) -> Result<(), ApiError> {
    call(
        backend,
        ApiRequest::delete(format!("/properties/{id}")).bearer(Some(token)),
    )
    .await?;
    Ok(())
}

use super::models::{Tenant, TenantDraft};
use crate::api::{call, ApiError, ApiRequest, Backend};

pub async fn list(backend: &dyn Backend, token: &str) -> Result<Vec<Tenant>, ApiError> {
    call(backend, ApiRequest::get("/tenants").bearer(Some(token)))
        .await?
        .take_list("tenants")
}

pub async fn create(
    backend: &dyn Backend,
    token: &str,
    draft: &TenantDraft,
) -> Result<(), ApiError> {
    call(
        backend,
        ApiRequest::post("/tenants").bearer(Some(token)).json(draft)?,
    )
    .await?;
    Ok(())
}

pub async fn update(
    backend: &dyn Backend,
    token: &str,
    id: &str,
    draft: &TenantDraft,
) -> Result<(), ApiError> {
    call(
        backend,
        ApiRequest::put(format!("/tenants/{id}"))
            .bearer(Some(token))
            .json(draft)?,
    )
    .await?;
    Ok(())
}

/// The backend also marks the property as available again.
pub async fn remove(backend: &dyn Backend, token: &str, id: &str) -> Result<(), ApiError> {
    call(
        backend,
        ApiRequest::delete(format!("/tenants/{id}")).bearer(Some(token)),
    )
    .await?;
    Ok(())
}

/// The signed-in tenant's own lease, if they have one.
pub async fn my_lease(
    backend: &dyn Backend,
    token: &str,
) -> Result<Option<Tenant>, ApiError> {
    let mut reply = call(
        backend,
        ApiRequest::get("/tenants/my-lease").bearer(Some(token)),
    )
    .await?;
    reply.take("tenant").or_else(|_| reply.take("lease"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{stub::StubBackend, Method};
    use serde_json::json;

    #[tokio::test]
    async fn test_my_lease_accepts_either_key() {
        let backend = StubBackend::new().reply(
            Method::Get,
            "/tenants/my-lease",
            json!({"success": true, "lease": {"_id": "t1", "unit": "4B"}}),
        );
        let lease = my_lease(&backend, "tok").await.expect("lease");
        assert_eq!(lease.map(|t| t.unit), Some("4B".to_string()));

        let backend = StubBackend::new().reply(
            Method::Get,
            "/tenants/my-lease",
            json!({"success": true, "tenant": null}),
        );
        assert!(my_lease(&backend, "tok").await.expect("none").is_none());
    }
}

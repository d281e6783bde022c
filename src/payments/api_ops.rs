use super::models::{Payment, PaymentDraft, PaymentStats, TenantPaymentStatus};
use crate::api::{call, ApiError, ApiRequest, Backend};

/// Owners get every payment on their properties; tenants get their own.
pub async fn list(backend: &dyn Backend, token: &str) -> Result<Vec<Payment>, ApiError> {
    call(backend, ApiRequest::get("/payments").bearer(Some(token)))
        .await?
        .take_list("payments")
}

pub async fn create(
    backend: &dyn Backend,
    token: &str,
    draft: &PaymentDraft,
) -> Result<(), ApiError> {
    call(
        backend,
        ApiRequest::post("/payments").bearer(Some(token)).json(draft)?,
    )
    .await?;
    Ok(())
}

pub async fn update(
    backend: &dyn Backend,
    token: &str,
    id: &str,
    draft: &PaymentDraft,
) -> Result<(), ApiError> {
    call(
        backend,
        ApiRequest::put(format!("/payments/{id}"))
            .bearer(Some(token))
            .json(draft)?,
    )
    .await?;
    Ok(())
}

pub async fn stats(backend: &dyn Backend, token: &str) -> Result<PaymentStats, ApiError> {
    call(backend, ApiRequest::get("/payments/stats").bearer(Some(token)))
        .await?
        .take("stats")
}

pub async fn my_status(
    backend: &dyn Backend,
    token: &str,
) -> Result<TenantPaymentStatus, ApiError> {
    call(
        backend,
        ApiRequest::get("/payments/my-status").bearer(Some(token)),
    )
    .await?
    .take("status")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{stub::StubBackend, Method};
    use serde_json::json;

    #[tokio::test]
    async fn test_list_sends_bearer_token() {
        let backend = StubBackend::new().reply(
            Method::Get,
            "/payments",
            json!({"success": true, "payments": [{"_id": "pay1", "amount": 1200}]}),
        );
        let payments = list(&backend, "tok").await.expect("payments");
        assert_eq!(payments.len(), 1);
        let sent = backend.last_request(Method::Get, "/payments").expect("sent");
        assert_eq!(sent.token.as_deref(), Some("tok"));
    }

    #[tokio::test]
    async fn test_stats_payload() {
        let backend = StubBackend::new().reply(
            Method::Get,
            "/payments/stats",
            json!({"success": true, "stats": {"monthlyRevenue": 4500, "yearlyRevenue": 54000}}),
        );
        let stats = stats(&backend, "tok").await.expect("stats");
        assert_eq!(stats.yearly_revenue, 54000.0);
        assert!(stats.payment_methods.is_empty());
    }

    #[tokio::test]
    async fn test_my_status_payload() {
        let backend = StubBackend::new().reply(
            Method::Get,
            "/payments/my-status",
            json!({"success": true, "status": {
                "nextDueDate": "2024-07-01",
                "amountDue": 1200,
                "lastPayment": {"_id": "pay1", "amount": 1200, "status": "paid"},
                "status": "current"
            }}),
        );
        let status = my_status(&backend, "tok").await.expect("status");
        assert_eq!(status.amount_due, 1200.0);
        assert_eq!(status.status, "current");
        assert!(status.next_due_date.is_some());
        assert_eq!(status.last_payment.map(|p| p.id), Some("pay1".to_string()));
    }
}

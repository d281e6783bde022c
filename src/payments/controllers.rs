use super::{
    api_ops, components,
    models::{PayNowForm, PaymentForm, SELECT_TENANT},
    stats_or_zero, PaymentsManager, CHANGED,
};
use crate::{
    components::{Component, Notification},
    config::MONTH_OPTION_COUNT,
    controllers::{page_or_fragment, saved, saved_with, toast},
    errors::ServerError,
    extractors::{OwnerOnly, SignedIn, TenantOnly, Viewer},
    format,
    models::AppState,
    tenants::TenantsManager,
};
use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    Form,
};
use chrono::{NaiveDate, Utc};

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub async fn list_payments(
    State(AppState { backend, .. }): State<AppState>,
    SignedIn(viewer): SignedIn,
    headers: HeaderMap,
) -> impl IntoResponse {
    let token = viewer.token().unwrap_or_default();
    let manager = PaymentsManager::load(backend.as_ref(), token).await;
    let body = manager.respond(&manager.display(&viewer));
    page_or_fragment(&headers, "Payments", &viewer, Box::new(body))
}

pub async fn view_payment(
    State(AppState { backend, .. }): State<AppState>,
    SignedIn(viewer): SignedIn,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ServerError> {
    let token = viewer.token().unwrap_or_default();
    let manager = PaymentsManager::load(backend.as_ref(), token).await;
    let payment = manager.find(&id)?;
    Ok(page_or_fragment(
        &headers,
        "Payment Details",
        &viewer,
        Box::new(components::PaymentDetails {
            payment,
            viewer: &viewer,
        }),
    ))
}

pub async fn record_payment_form(
    State(AppState { backend, .. }): State<AppState>,
    OwnerOnly(session): OwnerOnly,
    headers: HeaderMap,
) -> impl IntoResponse {
    let tenants = TenantsManager::load(backend.as_ref(), &session.token).await;
    let viewer = Viewer::Owner(session);
    let form = components::PaymentFormModal {
        payment: None,
        tenants: &tenants.items,
        months: format::month_options(today(), MONTH_OPTION_COUNT),
    };
    page_or_fragment(
        &headers,
        "Record Payment",
        &viewer,
        Box::new(tenants.respond(&form)),
    )
}

pub async fn edit_payment_form(
    State(AppState { backend, .. }): State<AppState>,
    OwnerOnly(session): OwnerOnly,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ServerError> {
    let manager = PaymentsManager::load(backend.as_ref(), &session.token).await;
    let viewer = Viewer::Owner(session);
    let payment = manager.find(&id)?;
    Ok(page_or_fragment(
        &headers,
        "Update Payment",
        &viewer,
        Box::new(components::PaymentFormModal {
            payment: Some(payment),
            tenants: &[],
            months: format::month_options(today(), MONTH_OPTION_COUNT),
        }),
    ))
}

pub async fn record_payment(
    State(AppState { backend, .. }): State<AppState>,
    OwnerOnly(session): OwnerOnly,
    Form(form): Form<PaymentForm>,
) -> Response {
    let mut draft = match form.validate() {
        Ok(draft) => draft,
        Err(message) => return toast(Notification::error(message)),
    };
    let tenant_id = form.tenant.trim();
    if tenant_id.is_empty() {
        return toast(Notification::error(SELECT_TENANT));
    }
    // The payment is recorded against the lease's property, which the form
    // does not carry.
    let tenants = TenantsManager::load(backend.as_ref(), &session.token).await;
    let Ok(tenant) = tenants.find(tenant_id) else {
        return toast(Notification::error(SELECT_TENANT));
    };
    draft.tenant_id = Some(tenant.id.clone());
    draft.property_id = tenant.property_id().map(str::to_string);
    draft.due_date = Some(today());

    match api_ops::create(backend.as_ref(), &session.token, &draft).await {
        Ok(()) => saved_with(
            CHANGED,
            "Payment recorded successfully!",
            &components::RecordedActivity { draft: &draft },
        ),
        Err(e) => toast(Notification::error(format!("Error saving payment: {e}"))),
    }
}

pub async fn update_payment(
    State(AppState { backend, .. }): State<AppState>,
    OwnerOnly(session): OwnerOnly,
    Path(id): Path<String>,
    Form(form): Form<PaymentForm>,
) -> Response {
    let draft = match form.validate() {
        Ok(draft) => draft,
        Err(message) => return toast(Notification::error(message)),
    };
    match api_ops::update(backend.as_ref(), &session.token, &id, &draft).await {
        Ok(()) => saved(CHANGED, "Payment updated successfully!"),
        Err(e) => toast(Notification::error(format!("Error saving payment: {e}"))),
    }
}

/// Pay-now with whatever the tenant currently owes.
pub async fn pay_now_form(
    State(AppState { backend, .. }): State<AppState>,
    TenantOnly(session): TenantOnly,
    headers: HeaderMap,
) -> impl IntoResponse {
    let status = api_ops::my_status(backend.as_ref(), &session.token)
        .await
        .map_err(|e| tracing::warn!(error = %e, "payment status unavailable"))
        .ok();
    let viewer = Viewer::Tenant(session);
    page_or_fragment(
        &headers,
        "Make Payment",
        &viewer,
        Box::new(components::PayNowModal {
            amount_due: status
                .as_ref()
                .map(|s| s.amount_due)
                .filter(|a| *a > 0.0),
            due_date: status.as_ref().and_then(|s| s.next_due_date.as_ref()),
        }),
    )
}

/// Pay-now for one pending payment.
pub async fn pay_payment_form(
    State(AppState { backend, .. }): State<AppState>,
    TenantOnly(session): TenantOnly,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ServerError> {
    let manager = PaymentsManager::load(backend.as_ref(), &session.token).await;
    let viewer = Viewer::Tenant(session);
    let payment = manager.find(&id)?;
    Ok(page_or_fragment(
        &headers,
        "Make Payment",
        &viewer,
        Box::new(components::PayNowModal {
            amount_due: Some(payment.amount),
            due_date: payment.due_date.as_ref(),
        }),
    ))
}

pub async fn handle_pay_now(
    State(AppState { backend, .. }): State<AppState>,
    TenantOnly(session): TenantOnly,
    Form(form): Form<PayNowForm>,
) -> Response {
    let draft = match form.validate(today()) {
        Ok(draft) => draft,
        Err(message) => return toast(Notification::error(message)),
    };
    tracing::info!(
        user = %session.user.id,
        method = %draft.method,
        "recording simulated payment"
    );
    match api_ops::create(backend.as_ref(), &session.token, &draft).await {
        Ok(()) => saved(CHANGED, "Payment processed successfully!"),
        Err(e) => toast(Notification::error(format!(
            "Error processing payment: {e}"
        ))),
    }
}

pub async fn payment_stats(
    State(AppState { backend, .. }): State<AppState>,
    OwnerOnly(session): OwnerOnly,
    headers: HeaderMap,
) -> impl IntoResponse {
    let (stats, payments) = futures::join!(
        stats_or_zero(backend.as_ref(), &session.token),
        PaymentsManager::load(backend.as_ref(), &session.token)
    );
    let viewer = Viewer::Owner(session);
    let cards = components::PaymentStatCards {
        stats: &stats,
        collection_rate: payments.collection_rate(),
    };
    page_or_fragment(
        &headers,
        "Payment Statistics",
        &viewer,
        Box::new(cards.render()),
    )
}

pub async fn my_status(
    State(AppState { backend, .. }): State<AppState>,
    TenantOnly(session): TenantOnly,
    headers: HeaderMap,
) -> impl IntoResponse {
    let result = api_ops::my_status(backend.as_ref(), &session.token).await;
    let viewer = Viewer::Tenant(session);
    let body = match result {
        Ok(status) => components::StatusSummary { status: &status }.render(),
        Err(e) => {
            tracing::error!(error = %e, "loading payment status");
            format!(
                "{}{}",
                components::StatusSummary {
                    status: &Default::default()
                }
                .render(),
                Notification::error("Error loading payment status").render()
            )
        }
    };
    page_or_fragment(&headers, "Payment Status", &viewer, Box::new(body))
}

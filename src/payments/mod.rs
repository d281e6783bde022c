//! Rent payments: the owner's ledger, the tenant's history and pay-now
//! form, and the revenue figures the dashboard shows.

pub mod api_ops;
pub mod components;
pub mod controllers;
pub mod models;

use super::{api::Backend, extractors::Viewer, listing::Listing};
use models::{Payment, PaymentStats, PaymentStatus};

pub type PaymentsManager = Listing<Payment>;

pub const CHANGED: &str = "payments-changed";

impl PaymentsManager {
    pub async fn load(backend: &dyn Backend, token: &str) -> Self {
        Listing::new(api_ops::list(backend, token).await, "payments")
    }

    /// Owners see every payment. Tenants only see the ones made under their
    /// own user.
    pub fn visible_to<'a>(&'a self, viewer: &Viewer) -> Vec<&'a Payment> {
        match viewer {
            Viewer::Owner(_) => self.items.iter().collect(),
            Viewer::Tenant(session) => self
                .items
                .iter()
                .filter(|p| p.tenant_user_id() == Some(session.user.id.as_str()))
                .collect(),
            Viewer::Anonymous => Vec::new(),
        }
    }

    pub fn display<'a>(&'a self, viewer: &'a Viewer) -> components::PaymentRows<'a> {
        components::PaymentRows {
            payments: self.visible_to(viewer),
            viewer,
        }
    }

    fn paid(&self) -> impl Iterator<Item = &Payment> {
        self.items.iter().filter(|p| p.status == PaymentStatus::Paid)
    }

    pub fn paid_total(&self) -> f64 {
        self.paid().map(|p| p.amount).sum()
    }

    /// Percent of payments that are paid; 0 with no payments at all.
    pub fn collection_rate(&self) -> f64 {
        if self.items.is_empty() {
            return 0.0;
        }
        self.paid().count() as f64 / self.items.len() as f64 * 100.0
    }
}

/// `/payments/stats`, or zeroes when the backend can't say.
pub async fn stats_or_zero(backend: &dyn Backend, token: &str) -> PaymentStats {
    api_ops::stats(backend, token).await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "payment stats unavailable");
        PaymentStats::default()
    })
}

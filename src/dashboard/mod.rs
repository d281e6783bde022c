//! The owner and tenant dashboards: a shell with one swappable view, the
//! headline figures and the recent activity feed.

pub mod components;
pub mod controllers;

use super::{
    api::Backend,
    components::Notification,
    extractors::Viewer,
    listing::Listing,
    payments::{
        self,
        models::{PaymentStats, PaymentStatus},
        PaymentsManager,
    },
    properties::PropertiesManager,
    tenants::TenantsManager,
};
use std::{fmt::Display, str::FromStr};

/// Sections of `/dashboard/owner`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OwnerView {
    Overview,
    Properties,
    Tenants,
    Payments,
    Applications,
    Maintenance,
    Documents,
    Profile,
}

impl OwnerView {
    pub const ALL: [OwnerView; 8] = [
        Self::Overview,
        Self::Properties,
        Self::Tenants,
        Self::Payments,
        Self::Applications,
        Self::Maintenance,
        Self::Documents,
        Self::Profile,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Properties => "properties",
            Self::Tenants => "tenants",
            Self::Payments => "payments",
            Self::Applications => "applications",
            Self::Maintenance => "maintenance",
            Self::Documents => "documents",
            Self::Profile => "profile",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Properties => "Properties",
            Self::Tenants => "Tenants",
            Self::Payments => "Payments",
            Self::Applications => "Applications",
            Self::Maintenance => "Maintenance",
            Self::Documents => "Documents",
            Self::Profile => "Profile",
        }
    }
}

impl Display for OwnerView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OwnerView {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|v| v.as_str() == s).ok_or(())
    }
}

/// Sections of `/dashboard/tenant`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TenantView {
    Overview,
    Payments,
    Maintenance,
    Documents,
    Profile,
}

impl TenantView {
    pub const ALL: [TenantView; 5] = [
        Self::Overview,
        Self::Payments,
        Self::Maintenance,
        Self::Documents,
        Self::Profile,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Payments => "payments",
            Self::Maintenance => "maintenance",
            Self::Documents => "documents",
            Self::Profile => "profile",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Payments => "Payments",
            Self::Maintenance => "Maintenance",
            Self::Documents => "Documents",
            Self::Profile => "Profile",
        }
    }
}

impl Display for TenantView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TenantView {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|v| v.as_str() == s).ok_or(())
    }
}

/// Events after which the headline figures are stale.
pub const STATS_EVENTS: &str =
    "properties-changed, tenants-changed, payments-changed";

/// The headline figures.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Summary {
    pub total_properties: usize,
    pub available_properties: usize,
    pub total_tenants: usize,
    /// Sum of paid amounts.
    pub total_revenue: f64,
    pub pending_payments: usize,
    /// Owners only.
    pub payment_stats: Option<PaymentStats>,
}

/// Everything the dashboard figures are computed from, loaded at once.
#[derive(Debug)]
pub struct Dashboard {
    pub properties: PropertiesManager,
    pub tenants: TenantsManager,
    pub payments: PaymentsManager,
    pub payment_stats: Option<PaymentStats>,
}

impl Dashboard {
    /// Tenants can't list leases, so only owners load them (and the payment
    /// stats).
    pub async fn load(backend: &dyn Backend, viewer: &Viewer) -> Self {
        let token = viewer.token().unwrap_or_default();
        let owner = viewer.is_owner();
        let (properties, tenants, payments, payment_stats) = futures::join!(
            PropertiesManager::load(backend, viewer),
            async {
                if owner {
                    TenantsManager::load(backend, token).await
                } else {
                    Listing::new(Ok(Vec::new()), "tenants")
                }
            },
            PaymentsManager::load(backend, token),
            async {
                if owner {
                    Some(payments::stats_or_zero(backend, token).await)
                } else {
                    None
                }
            }
        );
        Self {
            properties,
            tenants,
            payments,
            payment_stats,
        }
    }

    pub fn summary(&self, viewer: &Viewer) -> Summary {
        let visible = self.payments.visible_to(viewer);
        Summary {
            total_properties: self.properties.items.len(),
            available_properties: self.properties.available_count(),
            total_tenants: self.tenants.items.len(),
            total_revenue: if viewer.is_owner() {
                self.payments.paid_total()
            } else {
                visible
                    .iter()
                    .filter(|p| p.status == PaymentStatus::Paid)
                    .map(|p| p.amount)
                    .sum()
            },
            pending_payments: visible
                .iter()
                .filter(|p| p.status == PaymentStatus::Pending)
                .count(),
            payment_stats: self.payment_stats.clone(),
        }
    }

    /// One toast at a time; the first failed load wins.
    pub fn toast(&self) -> Option<&Notification> {
        self.properties
            .toast
            .as_ref()
            .or(self.tenants.toast.as_ref())
            .or(self.payments.toast.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        api::{stub::StubBackend, Method},
        testing,
    };
    use serde_json::json;

    #[test]
    fn test_views_round_trip_through_their_slugs() {
        for view in OwnerView::ALL {
            assert_eq!(view.to_string().parse::<OwnerView>(), Ok(view));
        }
        assert_eq!("payments".parse::<TenantView>(), Ok(TenantView::Payments));
        assert!("tenants".parse::<TenantView>().is_err());
    }

    fn backend() -> StubBackend {
        StubBackend::new()
            .reply(
                Method::Get,
                "/properties/my-properties",
                json!({"success": true, "properties": [
                    {"_id": "p1", "name": "A", "isAvailable": true},
                    {"_id": "p2", "name": "B", "isAvailable": false}
                ]}),
            )
            .reply(
                Method::Get,
                "/tenants",
                json!({"success": true, "tenants": [{"_id": "t1"}]}),
            )
            .reply(
                Method::Get,
                "/payments",
                json!({"success": true, "payments": [
                    {"_id": "a", "amount": 1200, "status": "paid"},
                    {"_id": "b", "amount": 800, "status": "paid"},
                    {"_id": "c", "amount": 500, "status": "pending"}
                ]}),
            )
            .reply(
                Method::Get,
                "/payments/stats",
                json!({"success": true, "stats": {"monthlyRevenue": 2000}}),
            )
    }

    #[tokio::test]
    async fn test_owner_summary() {
        let owner = testing::owner();
        let dashboard = Dashboard::load(&backend(), &owner).await;
        let summary = dashboard.summary(&owner);
        assert_eq!(summary.total_properties, 2);
        assert_eq!(summary.available_properties, 1);
        assert_eq!(summary.total_tenants, 1);
        assert_eq!(summary.total_revenue, 2000.0);
        assert_eq!(summary.pending_payments, 1);
        assert_eq!(
            summary.payment_stats.map(|s| s.monthly_revenue),
            Some(2000.0)
        );
        assert!(dashboard.toast().is_none());
    }

    #[tokio::test]
    async fn test_tenant_skips_owner_only_loads() {
        let tenant = testing::tenant();
        let backend = StubBackend::new()
            .reply(Method::Get, "/properties", json!({"success": true, "properties": []}))
            .reply(Method::Get, "/payments", json!({"success": true, "payments": []}));
        let dashboard = Dashboard::load(&backend, &tenant).await;
        assert!(dashboard.payment_stats.is_none());
        assert!(backend.last_request(Method::Get, "/tenants").is_none());
        assert!(backend.last_request(Method::Get, "/payments/stats").is_none());
        assert_eq!(dashboard.summary(&tenant), Summary::default());
    }

    #[tokio::test]
    async fn test_failed_load_surfaces_one_toast() {
        let owner = testing::owner();
        let dashboard = Dashboard::load(&StubBackend::new(), &owner).await;
        assert_eq!(
            dashboard.toast(),
            Some(&Notification::error("Error loading properties"))
        );
        let summary = dashboard.summary(&owner);
        assert_eq!(summary.total_revenue, 0.0);
        assert_eq!(
            summary.payment_stats.map(|s| s.yearly_revenue),
            Some(0.0)
        );
    }
}

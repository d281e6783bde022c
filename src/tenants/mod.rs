//! Leases, from the owner's side (`/tenants`) and the tenant's side
//! (`/tenants/my-lease`).

pub mod api_ops;
pub mod components;
pub mod controllers;
pub mod models;

use super::{api::Backend, extractors::Viewer, listing::Listing};
use models::Tenant;

pub type TenantsManager = Listing<Tenant>;

pub const CHANGED: &str = "tenants-changed";

impl TenantsManager {
    pub async fn load(backend: &dyn Backend, token: &str) -> Self {
        Listing::new(api_ops::list(backend, token).await, "tenants")
    }

    pub fn display<'a>(&'a self, viewer: &'a Viewer) -> components::TenantRows<'a> {
        components::TenantRows {
            tenants: &self.items,
            viewer,
        }
    }
}

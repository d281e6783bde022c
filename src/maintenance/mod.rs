//! Maintenance requests. Tenants file them; owners move them through
//! pending, in-progress, completed or cancelled.

pub mod api_ops;
pub mod components;
pub mod controllers;
pub mod models;

use super::{api::Backend, extractors::Viewer, listing::Listing};
use models::MaintenanceRequest;

pub type MaintenanceManager = Listing<MaintenanceRequest>;

pub const CHANGED: &str = "maintenance-changed";

impl MaintenanceManager {
    pub async fn load(backend: &dyn Backend, token: &str) -> Self {
        Listing::new(api_ops::list(backend, token).await, "maintenance requests")
    }

    pub fn display<'a>(&'a self, viewer: &'a Viewer) -> components::RequestList<'a> {
        components::RequestList {
            requests: &self.items,
            viewer,
        }
    }
}

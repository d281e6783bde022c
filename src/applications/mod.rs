//! Rental applications. Tenants submit them from a property card; owners
//! review them here.

pub mod api_ops;
pub mod components;
pub mod controllers;
pub mod models;

use super::{api::Backend, listing::Listing};
use models::Application;

pub type ApplicationsManager = Listing<Application>;

pub const CHANGED: &str = "applications-changed";

impl ApplicationsManager {
    pub async fn load(backend: &dyn Backend, token: &str) -> Self {
        Listing::new(api_ops::list(backend, token).await, "applications")
    }

    pub fn display(&self) -> components::ApplicationList<'_> {
        components::ApplicationList {
            applications: &self.items,
        }
    }
}

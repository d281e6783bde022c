//! Property listings. Owners manage their own; tenants and visitors browse
//! and apply.

pub mod api_ops;
pub mod components;
pub mod controllers;
pub mod models;

use super::{api::Backend, extractors::Viewer, listing::Listing};
use models::Property;

pub type PropertiesManager = Listing<Property>;

/// Fired after any property mutation; `#propertiesList` and the dashboard
/// tables reload on it.
pub const CHANGED: &str = "properties-changed";

impl PropertiesManager {
    pub async fn load(backend: &dyn Backend, viewer: &Viewer) -> Self {
        Listing::new(api_ops::list(backend, viewer).await, "properties")
    }

    pub fn display<'a>(
        &'a self,
        viewer: &'a Viewer,
    ) -> components::PropertyGrid<'a> {
        components::PropertyGrid {
            properties: &self.items,
            viewer,
        }
    }

    pub fn available_count(&self) -> usize {
        self.items.iter().filter(|p| p.is_available).count()
    }
}

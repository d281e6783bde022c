//! Documents shared between owners and tenants. Read-only here; uploads
//! need file storage this client does not have.

pub mod api_ops;
pub mod components;
pub mod controllers;
pub mod models;

use super::{api::Backend, listing::Listing};
use models::Document;

pub type DocumentsManager = Listing<Document>;

impl DocumentsManager {
    pub async fn load(backend: &dyn Backend, token: &str) -> Self {
        Listing::new(api_ops::list(backend, token).await, "documents")
    }

    pub fn display(&self) -> components::DocumentRows<'_> {
        components::DocumentRows {
            documents: &self.items,
        }
    }
}

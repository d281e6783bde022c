//! Sign in, sign up, sign out. The backend hands us a bearer token and a
//! user record, which live in the signed `session` cookie until logout.

pub mod api_ops;
pub mod components;
pub mod controllers;

use super::{models::Role, routes::Route};

/// Where a freshly signed-in user lands.
pub fn dashboard_for(role: Role) -> Route {
    match role {
        Role::Owner => Route::OwnerDashboard,
        Role::Tenant => Route::TenantDashboard,
    }
}

use super::{
    applications, auth, controllers, dashboard,
    dashboard::{OwnerView, TenantView},
    documents, maintenance,
    models::AppState,
    payments, properties, tenants,
};
use axum::routing::{get, post, Router};
use std::{borrow::Cow, fmt::Display};

/// Every path the app serves. Variants that take an id render the axum path
/// template (`:id`) when given `None`, so the same enum builds both the router
/// and the links inside components.
#[derive(Clone, Debug)]
pub enum Route {
    Root,
    Ping,
    Stylesheet,
    Contact,
    Flash,

    Login,
    Register,
    Logout,
    Profile,

    Properties,
    PropertyNew,
    Property(Option<String>),
    PropertyEdit(Option<String>),
    PropertyApply(Option<String>),

    Tenants,
    TenantNew,
    Tenant(Option<String>),
    TenantEdit(Option<String>),
    MyLease,

    Payments,
    PaymentRecord,
    Payment(Option<String>),
    PaymentEdit(Option<String>),
    PayNow,
    PaymentPay(Option<String>),
    PaymentStats,
    PaymentMyStatus,

    Maintenance,
    MaintenanceNew,
    MaintenanceRequest(Option<String>),
    MaintenanceStatus(Option<String>),
    MaintenanceMyStats,

    Applications,
    Application(Option<String>),
    ApplicationStatus(Option<String>),

    Documents,
    DocumentUpload,

    OwnerDashboard,
    OwnerDashboardView(Option<OwnerView>),
    TenantDashboard,
    TenantDashboardView(Option<TenantView>),
    DashboardStats,
    DashboardActivity,
}

/// Ids are percent-encoded so a rendered route is always safe to drop into
/// an attribute.
fn id_or_param(id: &Option<String>) -> Cow<'_, str> {
    match id {
        Some(id) => urlencoding::encode(id),
        None => Cow::Borrowed(":id"),
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Root => write!(f, "/"),
            Self::Ping => write!(f, "/ping"),
            Self::Stylesheet => write!(f, "/static/style.css"),
            Self::Contact => write!(f, "/contact"),
            Self::Flash => write!(f, "/flash"),

            Self::Login => write!(f, "/auth/login"),
            Self::Register => write!(f, "/auth/register"),
            Self::Logout => write!(f, "/auth/logout"),
            Self::Profile => write!(f, "/auth/profile"),

            Self::Properties => write!(f, "/properties"),
            Self::PropertyNew => write!(f, "/properties/new"),
            Self::Property(id) => write!(f, "/properties/{}", id_or_param(id)),
            Self::PropertyEdit(id) => {
                write!(f, "/properties/{}/edit", id_or_param(id))
            }
            Self::PropertyApply(id) => {
                write!(f, "/properties/{}/apply", id_or_param(id))
            }

            Self::Tenants => write!(f, "/tenants"),
            Self::TenantNew => write!(f, "/tenants/new"),
            Self::Tenant(id) => write!(f, "/tenants/{}", id_or_param(id)),
            Self::TenantEdit(id) => {
                write!(f, "/tenants/{}/edit", id_or_param(id))
            }
            Self::MyLease => write!(f, "/tenants/my-lease"),

            Self::Payments => write!(f, "/payments"),
            Self::PaymentRecord => write!(f, "/payments/record"),
            Self::Payment(id) => write!(f, "/payments/{}", id_or_param(id)),
            Self::PaymentEdit(id) => {
                write!(f, "/payments/{}/edit", id_or_param(id))
            }
            Self::PayNow => write!(f, "/payments/pay"),
            Self::PaymentPay(id) => {
                write!(f, "/payments/{}/pay", id_or_param(id))
            }
            Self::PaymentStats => write!(f, "/payments/stats"),
            Self::PaymentMyStatus => write!(f, "/payments/my-status"),

            Self::Maintenance => write!(f, "/maintenance"),
            Self::MaintenanceNew => write!(f, "/maintenance/new"),
            Self::MaintenanceRequest(id) => {
                write!(f, "/maintenance/{}", id_or_param(id))
            }
            Self::MaintenanceStatus(id) => {
                write!(f, "/maintenance/{}/status", id_or_param(id))
            }
            Self::MaintenanceMyStats => write!(f, "/maintenance/my-stats"),

            Self::Applications => write!(f, "/applications"),
            Self::Application(id) => {
                write!(f, "/applications/{}", id_or_param(id))
            }
            Self::ApplicationStatus(id) => {
                write!(f, "/applications/{}/status", id_or_param(id))
            }

            Self::Documents => write!(f, "/documents"),
            Self::DocumentUpload => write!(f, "/documents/upload"),

            Self::OwnerDashboard => write!(f, "/dashboard/owner"),
            Self::OwnerDashboardView(view) => match view {
                Some(v) => write!(f, "/dashboard/owner/{v}"),
                None => write!(f, "/dashboard/owner/:view"),
            },
            Self::TenantDashboard => write!(f, "/dashboard/tenant"),
            Self::TenantDashboardView(view) => match view {
                Some(v) => write!(f, "/dashboard/tenant/{v}"),
                None => write!(f, "/dashboard/tenant/:view"),
            },
            Self::DashboardStats => write!(f, "/dashboard/stats"),
            Self::DashboardActivity => write!(f, "/dashboard/activity"),
        }
    }
}

impl Route {
    pub fn property(id: &str) -> Self {
        Self::Property(Some(id.to_string()))
    }
    pub fn tenant(id: &str) -> Self {
        Self::Tenant(Some(id.to_string()))
    }
    pub fn payment(id: &str) -> Self {
        Self::Payment(Some(id.to_string()))
    }
    pub fn maintenance_request(id: &str) -> Self {
        Self::MaintenanceRequest(Some(id.to_string()))
    }
    pub fn application(id: &str) -> Self {
        Self::Application(Some(id.to_string()))
    }
}

fn path(route: Route) -> String {
    route.to_string()
}

#[rustfmt::skip]
pub fn get_routes() -> Router<AppState> {
    Router::new()
        .route(&path(Route::Root), get(controllers::root))
        .route(&path(Route::Ping), get(controllers::pong))
        .route(&path(Route::Stylesheet), get(controllers::get_stylesheet))
        .route(&path(Route::Contact), post(controllers::handle_contact))
        .route(&path(Route::Flash), get(controllers::flash))

        .route(&path(Route::Login), get(auth::controllers::login_form).post(auth::controllers::handle_login))
        .route(&path(Route::Register), get(auth::controllers::register_form).post(auth::controllers::handle_register))
        .route(&path(Route::Logout), get(auth::controllers::logout).post(auth::controllers::logout))
        .route(&path(Route::Profile), get(auth::controllers::profile))

        .route(&path(Route::Properties), get(properties::controllers::list_properties).post(properties::controllers::create_property))
        .route(&path(Route::PropertyNew), get(properties::controllers::new_property_form))
        .route(&path(Route::Property(None)), get(properties::controllers::view_property).post(properties::controllers::update_property).delete(properties::controllers::delete_property))
        .route(&path(Route::PropertyEdit(None)), get(properties::controllers::edit_property_form))
        .route(&path(Route::PropertyApply(None)), get(properties::controllers::apply_form).post(properties::controllers::submit_application))

        .route(&path(Route::Tenants), get(tenants::controllers::list_tenants).post(tenants::controllers::add_tenant))
        .route(&path(Route::TenantNew), get(tenants::controllers::new_tenant_form))
        .route(&path(Route::MyLease), get(tenants::controllers::my_lease))
        .route(&path(Route::Tenant(None)), get(tenants::controllers::view_tenant).post(tenants::controllers::update_tenant).delete(tenants::controllers::remove_tenant))
        .route(&path(Route::TenantEdit(None)), get(tenants::controllers::edit_tenant_form))

        .route(&path(Route::Payments), get(payments::controllers::list_payments).post(payments::controllers::record_payment))
        .route(&path(Route::PaymentRecord), get(payments::controllers::record_payment_form))
        .route(&path(Route::PayNow), get(payments::controllers::pay_now_form).post(payments::controllers::handle_pay_now))
        .route(&path(Route::PaymentStats), get(payments::controllers::payment_stats))
        .route(&path(Route::PaymentMyStatus), get(payments::controllers::my_status))
        .route(&path(Route::Payment(None)), get(payments::controllers::view_payment).post(payments::controllers::update_payment))
        .route(&path(Route::PaymentEdit(None)), get(payments::controllers::edit_payment_form))
        .route(&path(Route::PaymentPay(None)), get(payments::controllers::pay_payment_form))

        .route(&path(Route::Maintenance), get(maintenance::controllers::list_requests).post(maintenance::controllers::handle_new_request))
        .route(&path(Route::MaintenanceNew), get(maintenance::controllers::new_request_form))
        .route(&path(Route::MaintenanceMyStats), get(maintenance::controllers::my_stats))
        .route(&path(Route::MaintenanceRequest(None)), get(maintenance::controllers::view_request))
        .route(&path(Route::MaintenanceStatus(None)), get(maintenance::controllers::status_form).post(maintenance::controllers::update_status))

        .route(&path(Route::Applications), get(applications::controllers::list_applications))
        .route(&path(Route::Application(None)), get(applications::controllers::view_application))
        .route(&path(Route::ApplicationStatus(None)), post(applications::controllers::update_status))

        .route(&path(Route::Documents), get(documents::controllers::list_documents))
        .route(&path(Route::DocumentUpload), post(documents::controllers::upload_document))

        .route(&path(Route::OwnerDashboard), get(dashboard::controllers::owner_dashboard))
        .route(&path(Route::OwnerDashboardView(None)), get(dashboard::controllers::owner_view))
        .route(&path(Route::TenantDashboard), get(dashboard::controllers::tenant_dashboard))
        .route(&path(Route::TenantDashboardView(None)), get(dashboard::controllers::tenant_view))
        .route(&path(Route::DashboardStats), get(dashboard::controllers::stats))
        .route(&path(Route::DashboardActivity), get(dashboard::controllers::recent_activity))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_render_templates_and_links() {
        assert_eq!(Route::Property(None).to_string(), "/properties/:id");
        assert_eq!(Route::property("abc").to_string(), "/properties/abc");
        assert_eq!(
            Route::ApplicationStatus(Some("a1".into())).to_string(),
            "/applications/a1/status"
        );
        assert_eq!(
            Route::tenant("a\"b c").to_string(),
            "/tenants/a%22b%20c"
        );
        assert_eq!(
            Route::OwnerDashboardView(Some(OwnerView::Payments)).to_string(),
            "/dashboard/owner/payments"
        );
        assert_eq!(
            Route::TenantDashboardView(None).to_string(),
            "/dashboard/tenant/:view"
        );
    }
}

use super::{OwnerView, Summary, TenantView, STATS_EVENTS};
use crate::{
    components::{Component, LiveList, ModalButton, StatCard},
    config::RECENT_ACTIVITY_LIMIT,
    documents::components::UploadButton,
    extractors::Viewer,
    format, maintenance,
    payments::{
        self,
        components::{ActivityItem, RECENT_ACTIVITY},
        models::Payment,
    },
    properties,
    routes::Route,
    tenants,
};
use ammonia::clean;

/// Id of the element the dashboard views are swapped into.
pub const DASHBOARD_CONTENT: &str = "dashboardContent";

/// A link that swaps one view into the dashboard and pushes its url. The
/// `href` keeps it working as a plain link.
struct ViewLink<'a> {
    href: Route,
    label: &'a str,
    active: bool,
}
impl Component for ViewLink<'_> {
    fn render(&self) -> String {
        let href = &self.href;
        let label = clean(self.label);
        let active = if self.active { "active" } else { "" };
        format!(
            r##"<a class="nav-link {active}" href="{href}" hx-get="{href}" hx-target="#{DASHBOARD_CONTENT}" hx-swap="innerHTML" hx-push-url="true">{label}</a>"##
        )
    }
}

/// The welcome header, view nav, headline figures and the current view.
pub struct DashboardShell<'a> {
    pub viewer: &'a Viewer,
    pub links: Vec<(Route, &'a str, bool)>,
    pub content: Box<dyn Component + 'a>,
}
impl Component for DashboardShell<'_> {
    fn render(&self) -> String {
        let name = clean(
            self.viewer.user().map(|u| u.name.as_str()).unwrap_or_default(),
        );
        let subtitle = if self.viewer.is_owner() {
            "Manage your properties, tenants and payments"
        } else {
            "Your lease, payments and requests"
        };
        let links = self
            .links
            .iter()
            .map(|(href, label, active)| {
                ViewLink {
                    href: href.clone(),
                    label,
                    active: *active,
                }
                .render()
            })
            .collect::<Vec<String>>()
            .join("");
        let stats = LiveList {
            id: "dashboardStats",
            tag: "div",
            class: "dashboard-stats",
            href: Route::DashboardStats,
            events: STATS_EVENTS,
        }
        .render();
        let content = self.content.render();
        format!(
            r#"
            <div class="dashboard">
                <div class="dashboard-header">
                    <h1>Welcome back, {name}</h1>
                    <p>{subtitle}</p>
                </div>
                <nav class="dashboard-nav">{links}</nav>
                {stats}
                <div id="{DASHBOARD_CONTENT}" class="dashboard-content">{content}</div>
            </div>
            "#
        )
    }
}

impl<'a> DashboardShell<'a> {
    pub fn owner(viewer: &'a Viewer, view: OwnerView) -> Self {
        Self {
            viewer,
            links: OwnerView::ALL
                .into_iter()
                .map(|v| (Route::OwnerDashboardView(Some(v)), v.label(), v == view))
                .collect(),
            content: Box::new(OwnerContent { view }),
        }
    }

    pub fn tenant(viewer: &'a Viewer, view: TenantView) -> Self {
        Self {
            viewer,
            links: TenantView::ALL
                .into_iter()
                .map(|v| (Route::TenantDashboardView(Some(v)), v.label(), v == view))
                .collect(),
            content: Box::new(TenantContent { view }),
        }
    }
}

struct Section<'a> {
    title: &'a str,
    actions: String,
    body: String,
}
impl Component for Section<'_> {
    fn render(&self) -> String {
        format!(
            r#"
            <section class="dashboard-section">
                <div class="section-header">
                    <h2>{title}</h2>
                    <div class="section-actions">{actions}</div>
                </div>
                {body}
            </section>
            "#,
            title = clean(self.title),
            actions = self.actions,
            body = self.body,
        )
    }
}

/// A table whose body is a [`LiveList`].
struct LiveTable<'a> {
    columns: &'a [&'a str],
    list: LiveList<'a>,
}
impl Component for LiveTable<'_> {
    fn render(&self) -> String {
        let head = self
            .columns
            .iter()
            .map(|c| format!("<th>{}</th>", clean(c)))
            .collect::<Vec<String>>()
            .join("");
        format!(
            r#"
            <div class="table-container">
                <table class="data-table">
                    <thead><tr>{head}</tr></thead>
                    {body}
                </table>
            </div>
            "#,
            body = self.list.render()
        )
    }
}

const OWNER_PAYMENT_COLUMNS: [&str; 10] = [
    "Tenant",
    "Property",
    "Amount",
    "Payment Date",
    "Due Date",
    "Month",
    "Status",
    "Method",
    "Reference",
    "Actions",
];

const TENANT_PAYMENT_COLUMNS: [&str; 8] = [
    "Property",
    "Amount",
    "Payment Date",
    "Due Date",
    "Month",
    "Status",
    "Method",
    "Actions",
];

const TENANT_COLUMNS: [&str; 10] = [
    "Name",
    "Email",
    "Phone",
    "Property",
    "Unit",
    "Rent",
    "Lease Start",
    "Lease End",
    "Status",
    "Actions",
];

const DOCUMENT_COLUMNS: [&str; 5] =
    ["Name", "Type", "Property", "Uploaded", "Actions"];

fn quick_action(href: Route, icon: &str, label: &str) -> String {
    let label = clean(label);
    format!(
        r#"<a class="quick-action" href="{href}"><i class="fas {icon}"></i><span>{label}</span></a>"#
    )
}

fn modal_action(href: Route, label: &str) -> String {
    ModalButton {
        href,
        class: "quick-action",
        label,
    }
    .render()
}

fn maintenance_body() -> String {
    let stats = LiveList {
        id: "maintenanceStats",
        tag: "div",
        class: "dashboard-stats",
        href: Route::MaintenanceMyStats,
        events: maintenance::CHANGED,
    }
    .render();
    let list = LiveList {
        id: "maintenanceList",
        tag: "div",
        class: "maintenance-list",
        href: Route::Maintenance,
        events: maintenance::CHANGED,
    }
    .render();
    format!("{stats}{list}")
}

fn documents_body() -> String {
    LiveTable {
        columns: &DOCUMENT_COLUMNS,
        list: LiveList {
            id: "documentsList",
            tag: "tbody",
            class: "",
            href: Route::Documents,
            events: "",
        },
    }
    .render()
}

fn profile_body() -> String {
    LiveList {
        id: "profileInfo",
        tag: "div",
        class: "profile-info",
        href: Route::Profile,
        events: "",
    }
    .render()
}

fn activity_feed() -> String {
    LiveList {
        id: RECENT_ACTIVITY,
        tag: "div",
        class: "activity-list",
        href: Route::DashboardActivity,
        events: "",
    }
    .render()
}

/// The body of one owner view.
pub struct OwnerContent {
    pub view: OwnerView,
}
impl Component for OwnerContent {
    fn render(&self) -> String {
        let section = match self.view {
            OwnerView::Overview => Section {
                title: "Overview",
                actions: String::new(),
                body: format!(
                    r#"
                    <div class="overview-grid">
                        <div class="recent-activity">
                            <h3>Recent Activity</h3>
                            {activity}
                        </div>
                        <div class="quick-actions">
                            <h3>Quick Actions</h3>
                            {add_property}
                            {manage_tenants}
                            {view_payments}
                            {record_payment}
                        </div>
                    </div>
                    "#,
                    activity = activity_feed(),
                    add_property = modal_action(Route::PropertyNew, "Add Property"),
                    manage_tenants = quick_action(
                        Route::OwnerDashboardView(Some(OwnerView::Tenants)),
                        "fa-users",
                        "Manage Tenants"
                    ),
                    view_payments = quick_action(
                        Route::OwnerDashboardView(Some(OwnerView::Payments)),
                        "fa-credit-card",
                        "View Payments"
                    ),
                    record_payment =
                        modal_action(Route::PaymentRecord, "Record Payment"),
                ),
            },
            OwnerView::Properties => Section {
                title: "My Properties",
                actions: ModalButton {
                    href: Route::PropertyNew,
                    class: "btn-primary",
                    label: "Add Property",
                }
                .render(),
                body: LiveList {
                    id: "propertiesList",
                    tag: "div",
                    class: "properties-grid",
                    href: Route::Properties,
                    events: properties::CHANGED,
                }
                .render(),
            },
            OwnerView::Tenants => Section {
                title: "Tenants",
                actions: ModalButton {
                    href: Route::TenantNew,
                    class: "btn-primary",
                    label: "Add Tenant",
                }
                .render(),
                body: LiveTable {
                    columns: &TENANT_COLUMNS,
                    list: LiveList {
                        id: "tenantsList",
                        tag: "tbody",
                        class: "",
                        href: Route::Tenants,
                        events: tenants::CHANGED,
                    },
                }
                .render(),
            },
            OwnerView::Payments => Section {
                title: "Payments",
                actions: ModalButton {
                    href: Route::PaymentRecord,
                    class: "btn-primary",
                    label: "Record Payment",
                }
                .render(),
                body: format!(
                    "{}{}",
                    LiveList {
                        id: "paymentStats",
                        tag: "div",
                        class: "dashboard-stats",
                        href: Route::PaymentStats,
                        events: payments::CHANGED,
                    }
                    .render(),
                    LiveTable {
                        columns: &OWNER_PAYMENT_COLUMNS,
                        list: LiveList {
                            id: "paymentsList",
                            tag: "tbody",
                            class: "",
                            href: Route::Payments,
                            events: payments::CHANGED,
                        },
                    }
                    .render()
                ),
            },
            OwnerView::Applications => Section {
                title: "Rental Applications",
                actions: String::new(),
                body: LiveList {
                    id: "applicationsList",
                    tag: "div",
                    class: "applications-list",
                    href: Route::Applications,
                    events: crate::applications::CHANGED,
                }
                .render(),
            },
            OwnerView::Maintenance => Section {
                title: "Maintenance Requests",
                actions: String::new(),
                body: maintenance_body(),
            },
            OwnerView::Documents => Section {
                title: "Documents",
                actions: UploadButton.render(),
                body: documents_body(),
            },
            OwnerView::Profile => Section {
                title: "Profile",
                actions: String::new(),
                body: profile_body(),
            },
        };
        section.render()
    }
}

/// The body of one tenant view.
pub struct TenantContent {
    pub view: TenantView,
}
impl Component for TenantContent {
    fn render(&self) -> String {
        let section = match self.view {
            TenantView::Overview => Section {
                title: "Overview",
                actions: String::new(),
                body: format!(
                    r#"
                    <div class="overview-grid">
                        {lease}
                        {status}
                        <div class="quick-actions">
                            <h3>Quick Actions</h3>
                            {pay}
                            {request}
                            {browse}
                        </div>
                    </div>
                    "#,
                    lease = LiveList {
                        id: "myLease",
                        tag: "div",
                        class: "lease-summary",
                        href: Route::MyLease,
                        events: "",
                    }
                    .render(),
                    status = LiveList {
                        id: "paymentStatus",
                        tag: "div",
                        class: "payment-status",
                        href: Route::PaymentMyStatus,
                        events: payments::CHANGED,
                    }
                    .render(),
                    pay = modal_action(Route::PayNow, "Pay Rent"),
                    request =
                        modal_action(Route::MaintenanceNew, "Request Maintenance"),
                    browse =
                        quick_action(Route::Root, "fa-search", "Browse Properties"),
                ),
            },
            TenantView::Payments => Section {
                title: "My Payments",
                actions: ModalButton {
                    href: Route::PayNow,
                    class: "btn-primary",
                    label: "Make Payment",
                }
                .render(),
                body: LiveTable {
                    columns: &TENANT_PAYMENT_COLUMNS,
                    list: LiveList {
                        id: "tenantPaymentsList",
                        tag: "tbody",
                        class: "",
                        href: Route::Payments,
                        events: payments::CHANGED,
                    },
                }
                .render(),
            },
            TenantView::Maintenance => Section {
                title: "Maintenance Requests",
                actions: ModalButton {
                    href: Route::MaintenanceNew,
                    class: "btn-primary",
                    label: "Submit Request",
                }
                .render(),
                body: maintenance_body(),
            },
            TenantView::Documents => Section {
                title: "My Documents",
                actions: UploadButton.render(),
                body: documents_body(),
            },
            TenantView::Profile => Section {
                title: "Profile",
                actions: String::new(),
                body: profile_body(),
            },
        };
        section.render()
    }
}

/// Headline figures above every view.
pub struct DashboardStatsCards<'a> {
    pub summary: &'a Summary,
    pub viewer: &'a Viewer,
}
impl Component for DashboardStatsCards<'_> {
    fn render(&self) -> String {
        let s = self.summary;
        let cards = if self.viewer.is_owner() {
            vec![
                StatCard {
                    icon: "fa-building",
                    value: s.total_properties.to_string(),
                    label: "Total Properties",
                },
                StatCard {
                    icon: "fa-users",
                    value: s.total_tenants.to_string(),
                    label: "Active Tenants",
                },
                StatCard {
                    icon: "fa-dollar-sign",
                    value: format::money(s.total_revenue),
                    label: "Total Revenue",
                },
                StatCard {
                    icon: "fa-calendar-alt",
                    value: format::money(
                        s.payment_stats
                            .as_ref()
                            .map_or(0.0, |p| p.monthly_revenue),
                    ),
                    label: "This Month",
                },
            ]
        } else {
            vec![
                StatCard {
                    icon: "fa-dollar-sign",
                    value: format::money(s.total_revenue),
                    label: "Total Paid",
                },
                StatCard {
                    icon: "fa-clock",
                    value: s.pending_payments.to_string(),
                    label: "Pending Payments",
                },
                StatCard {
                    icon: "fa-home",
                    value: s.available_properties.to_string(),
                    label: "Available Properties",
                },
            ]
        };
        cards
            .iter()
            .map(|c| c.render())
            .collect::<Vec<String>>()
            .join("")
    }
}

/// The newest payments, as activity items.
pub struct RecentActivity<'a> {
    pub payments: Vec<&'a Payment>,
}
impl Component for RecentActivity<'_> {
    fn render(&self) -> String {
        let items = self
            .payments
            .iter()
            .take(RECENT_ACTIVITY_LIMIT)
            .map(|p| ActivityItem::for_payment(p).render())
            .collect::<Vec<String>>()
            .join("");
        // Stays in the markup so a prepended item can hide it with CSS.
        format!(
            r#"{items}<div class="empty-activity"><i class="fas fa-clock"></i><p>No recent activity</p></div>"#
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;
    use serde_json::json;

    #[test]
    fn test_owner_shell_links_every_view() {
        let owner = testing::owner();
        let html = DashboardShell::owner(&owner, OwnerView::Payments).render();
        assert!(html.contains("Welcome back, Olive Owner"));
        for view in OwnerView::ALL {
            assert!(html.contains(&format!(r#"hx-get="/dashboard/owner/{view}""#)));
        }
        assert!(html.contains(r#"class="nav-link active" href="/dashboard/owner/payments""#));
        assert!(html.contains(r#"id="paymentsList""#));
        assert!(html.contains(r#"id="dashboardStats""#));
        assert!(html.contains("Record Payment"));
    }

    #[test]
    fn test_activity_feed_loads_once() {
        let html = DashboardShell::owner(&testing::owner(), OwnerView::Overview)
            .render();
        assert!(html.contains(
            r#"id="recentActivity" class="activity-list" hx-get="/dashboard/activity" hx-trigger="load""#
        ));
    }

    #[test]
    fn test_tenant_overview_has_quick_actions() {
        let tenant = testing::tenant();
        let html = DashboardShell::tenant(&tenant, TenantView::Overview).render();
        assert!(html.contains(r#"hx-get="/tenants/my-lease""#));
        assert!(html.contains(r#"hx-get="/payments/my-status""#));
        assert!(html.contains(r#"hx-get="/payments/pay""#));
        assert!(html.contains(r#"hx-get="/maintenance/new""#));
        assert!(!html.contains("/dashboard/owner"));
    }

    #[test]
    fn test_tables_match_their_row_widths() {
        let html = OwnerContent {
            view: OwnerView::Tenants,
        }
        .render();
        assert_eq!(html.matches("<th>").count(), 10);
        let html = TenantContent {
            view: TenantView::Payments,
        }
        .render();
        assert_eq!(html.matches("<th>").count(), 8);
        assert!(html.contains(r#"id="tenantPaymentsList""#));
    }

    #[test]
    fn test_stats_cards_by_role() {
        let summary = Summary {
            total_properties: 3,
            total_revenue: 2500.0,
            pending_payments: 2,
            ..Default::default()
        };
        let owner = testing::owner();
        let html = DashboardStatsCards {
            summary: &summary,
            viewer: &owner,
        }
        .render();
        assert!(html.contains("Total Properties"));
        assert!(html.contains("$2,500"));
        assert!(html.contains("This Month"));

        let tenant = testing::tenant();
        let html = DashboardStatsCards {
            summary: &summary,
            viewer: &tenant,
        }
        .render();
        assert!(html.contains("Total Paid"));
        assert!(html.contains("Pending Payments"));
        assert!(!html.contains("Total Properties"));
    }

    #[test]
    fn test_recent_activity_shows_first_five() {
        let payments: Vec<Payment> = serde_json::from_value(json!([
            {"_id": "1", "amount": 100, "status": "paid"},
            {"_id": "2", "amount": 200, "status": "pending"},
            {"_id": "3", "amount": 300, "status": "paid"},
            {"_id": "4", "amount": 400, "status": "paid"},
            {"_id": "5", "amount": 500, "status": "paid"},
            {"_id": "6", "amount": 600, "status": "paid"}
        ]))
        .expect("payments");
        let html = RecentActivity {
            payments: payments.iter().collect(),
        }
        .render();
        assert_eq!(html.matches(r#"class="activity-item""#).count(), 5);
        assert!(html.contains("Payment of $200 due"));
        assert!(!html.contains("$600"));

        let html = RecentActivity { payments: vec![] }.render();
        assert!(html.contains("No recent activity"));
    }
}

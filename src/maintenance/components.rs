use super::models::{MaintenanceRequest, MaintenanceStats, MaintenanceStatus, Priority};
use crate::{
    components::{
        CloseButton, Component, DetailItem, DetailSection, EmptyState, Modal,
        ModalButton, Select, StatCard, StatusBadge,
    },
    extractors::Viewer,
    format,
    routes::Route,
};
use ammonia::clean;

pub struct PriorityBadge {
    pub priority: Priority,
}
impl Component for PriorityBadge {
    fn render(&self) -> String {
        let priority = self.priority.as_str();
        format!(r#"<span class="priority-badge priority-{priority}">{priority}</span>"#)
    }
}

fn update_button(request: &MaintenanceRequest, label: &str) -> String {
    ModalButton {
        href: Route::MaintenanceStatus(Some(request.id.clone())),
        class: "btn-primary btn-sm",
        label,
    }
    .render()
}

pub struct RequestCard<'a> {
    pub request: &'a MaintenanceRequest,
    pub viewer: &'a Viewer,
}
impl Component for RequestCard<'_> {
    fn render(&self) -> String {
        let request = self.request;
        let priority = PriorityBadge {
            priority: request.priority,
        }
        .render();
        let status = StatusBadge {
            status: request.status.as_str(),
        }
        .render();
        let view = ModalButton {
            href: Route::maintenance_request(&request.id),
            class: "btn-outline btn-sm",
            label: "View",
        }
        .render();
        let update = if self.viewer.is_owner() {
            update_button(request, "Update")
        } else {
            "".to_string()
        };
        format!(
            r#"
            <div class="maintenance-card">
                <div class="maintenance-header">
                    <h4>{title}</h4>
                    {priority}
                </div>
                <div class="maintenance-content">
                    <p>{description}</p>
                    <div class="maintenance-meta">
                        <span><i class="fas fa-home"></i> {property}</span>
                        <span><i class="fas fa-calendar"></i> {created}</span>
                    </div>
                </div>
                <div class="maintenance-footer">
                    {status}
                    <div class="maintenance-actions">{view}{update}</div>
                </div>
            </div>
            "#,
            title = clean(&request.title),
            description = clean(&request.description),
            property = clean(format::or_na(request.property_name())),
            created = format::date(request.created_at.as_ref()),
        )
    }
}

/// Contents of `#maintenanceList`.
pub struct RequestList<'a> {
    pub requests: &'a [MaintenanceRequest],
    pub viewer: &'a Viewer,
}
impl Component for RequestList<'_> {
    fn render(&self) -> String {
        if self.requests.is_empty() {
            let tenant = self.viewer.is_tenant();
            return EmptyState {
                icon: "fa-tools",
                title: "No Maintenance Requests",
                message: if tenant {
                    "Submit your first maintenance request"
                } else {
                    "No maintenance requests found"
                },
                action: if tenant {
                    Some(Box::new(ModalButton {
                        href: Route::MaintenanceNew,
                        class: "btn-primary",
                        label: "Submit Request",
                    }))
                } else {
                    None
                },
            }
            .render();
        }
        self.requests
            .iter()
            .map(|request| {
                RequestCard {
                    request,
                    viewer: self.viewer,
                }
                .render()
            })
            .collect::<Vec<String>>()
            .join("")
    }
}

pub struct NewRequestModal;
impl Component for NewRequestModal {
    fn render(&self) -> String {
        let action = Route::Maintenance;
        let priority = Select {
            name: "priority",
            placeholder: Some("Select Priority"),
            options: Priority::ALL
                .iter()
                .map(|p| (p.as_str().to_string(), p.label().to_string()))
                .collect(),
            selected: None,
        }
        .render();
        let form = format!(
            r#"
            <form id="maintenanceForm" hx-post="{action}" hx-swap="none" hx-disabled-elt="find button[type='submit']">
                <div class="form-group">
                    <label for="maintenanceTitle">Title *</label>
                    <input type="text" id="maintenanceTitle" name="title" required />
                </div>
                <div class="form-group">
                    <label for="maintenanceDescription">Description *</label>
                    <textarea id="maintenanceDescription" name="description" rows="4" required></textarea>
                </div>
                <div class="form-group">
                    <label for="priority">Priority *</label>
                    {priority}
                </div>
                <div class="form-actions">
                    <button type="button" class="btn btn-outline" onclick="this.closest('.modal').remove()">Cancel</button>
                    <button type="submit" class="btn btn-primary">Submit Request</button>
                </div>
            </form>
            "#
        );
        Modal {
            id: "newMaintenanceModal",
            title: "New Maintenance Request",
            children: Box::new(form),
            footer: None,
        }
        .render()
    }
}

pub struct RequestDetails<'a> {
    pub request: &'a MaintenanceRequest,
    pub viewer: &'a Viewer,
}
impl Component for RequestDetails<'_> {
    fn render(&self) -> String {
        let request = self.request;
        let info = DetailSection {
            title: "Request Information",
            items: vec![
                DetailItem {
                    label: "Title",
                    value: clean(&request.title),
                },
                DetailItem {
                    label: "Priority",
                    value: PriorityBadge {
                        priority: request.priority,
                    }
                    .render(),
                },
                DetailItem {
                    label: "Status",
                    value: StatusBadge {
                        status: request.status.as_str(),
                    }
                    .render(),
                },
                DetailItem {
                    label: "Submitted",
                    value: format::date(request.created_at.as_ref()),
                },
            ],
        }
        .render();
        let description = format!(
            r#"<div class="detail-section"><h3>Description</h3><p>{}</p></div>"#,
            clean(&request.description)
        );
        let property = request
            .property_name()
            .map(|name| {
                format!(
                    r#"<div class="detail-section"><h3>Property</h3><p>{}</p></div>"#,
                    clean(name)
                )
            })
            .unwrap_or_default();
        let update = if self.viewer.is_owner() {
            update_button(request, "Update Status")
        } else {
            "".to_string()
        };
        let footer = format!(
            r#"<div class="modal-actions">{}{update}</div>"#,
            CloseButton.render()
        );
        Modal {
            id: "viewMaintenanceModal",
            title: "Maintenance Request Details",
            children: Box::new(format!(
                r#"<div class="maintenance-details">{info}{description}{property}</div>"#
            )),
            footer: Some(Box::new(footer)),
        }
        .render()
    }
}

/// The owner's status picker.
pub struct StatusFormModal<'a> {
    pub request: &'a MaintenanceRequest,
}
impl Component for StatusFormModal<'_> {
    fn render(&self) -> String {
        let action = Route::MaintenanceStatus(Some(self.request.id.clone()));
        let status = Select {
            name: "status",
            placeholder: None,
            options: MaintenanceStatus::ALL
                .iter()
                .map(|s| (s.as_str().to_string(), s.label().to_string()))
                .collect(),
            selected: Some(self.request.status.as_str()),
        }
        .render();
        let form = format!(
            r#"
            <form id="maintenanceStatusForm" hx-post="{action}" hx-swap="none">
                <p>{title}</p>
                <div class="form-group">
                    <label for="status">Status *</label>
                    {status}
                </div>
                <div class="form-actions">
                    <button type="button" class="btn btn-outline" onclick="this.closest('.modal').remove()">Cancel</button>
                    <button type="submit" class="btn btn-primary">Update Status</button>
                </div>
            </form>
            "#,
            title = clean(&self.request.title),
        );
        Modal {
            id: "maintenanceStatusModal",
            title: "Update Status",
            children: Box::new(form),
            footer: None,
        }
        .render()
    }
}

pub struct MaintenanceStatCards<'a> {
    pub stats: &'a MaintenanceStats,
}
impl Component for MaintenanceStatCards<'_> {
    fn render(&self) -> String {
        [
            StatCard {
                icon: "fa-tools",
                value: self.stats.total.to_string(),
                label: "Total Requests",
            },
            StatCard {
                icon: "fa-clock",
                value: self.stats.pending.to_string(),
                label: "Pending",
            },
            StatCard {
                icon: "fa-spinner",
                value: self.stats.in_progress.to_string(),
                label: "In Progress",
            },
            StatCard {
                icon: "fa-check-circle",
                value: self.stats.completed.to_string(),
                label: "Completed",
            },
        ]
        .iter()
        .map(|c| c.render())
        .collect::<Vec<String>>()
        .join("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;
    use serde_json::json;

    fn request() -> MaintenanceRequest {
        serde_json::from_value(json!({
            "_id": "m1",
            "title": "Leaky faucet",
            "description": "<b>Kitchen</b> sink drips",
            "priority": "high",
            "status": "pending",
            "property": {"_id": "p1", "name": "Maple Loft"}
        }))
        .expect("request")
    }

    #[test]
    fn test_card_update_only_for_owner() {
        let r = request();
        let owner = testing::owner();
        let html = RequestCard {
            request: &r,
            viewer: &owner,
        }
        .render();
        assert!(html.contains("priority-high"));
        assert!(html.contains("/maintenance/m1/status"));
        assert!(html.contains("Maple Loft"));

        let tenant = testing::tenant();
        let html = RequestCard {
            request: &r,
            viewer: &tenant,
        }
        .render();
        assert!(!html.contains("/maintenance/m1/status"));
    }

    #[test]
    fn test_empty_state_by_role() {
        let tenant = testing::tenant();
        let html = RequestList {
            requests: &[],
            viewer: &tenant,
        }
        .render();
        assert!(html.contains("Submit your first maintenance request"));
        assert!(html.contains("Submit Request"));

        let owner = testing::owner();
        let html = RequestList {
            requests: &[],
            viewer: &owner,
        }
        .render();
        assert!(html.contains("No maintenance requests found"));
        assert!(!html.contains("Submit Request"));
    }

    #[test]
    fn test_status_form_preselects_current() {
        let r = request();
        let html = StatusFormModal { request: &r }.render();
        assert!(html.contains(r#"<option value="pending" selected>Pending</option>"#));
        assert!(html.contains(r#"<option value="in-progress" >In Progress</option>"#));
    }

    #[test]
    fn test_details_sanitize_description() {
        let r = request();
        let html = RequestDetails {
            request: &r,
            viewer: &testing::tenant(),
        }
        .render();
        assert!(html.contains("<b>Kitchen</b> sink drips"));
        assert!(!html.contains("Update Status"));
    }
}

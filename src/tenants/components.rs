use super::models::Tenant;
use crate::{
    components::{
        CloseButton, Component, DetailItem, DetailSection, EmptyRow, EmptyState,
        Modal, ModalButton, Select, StatusBadge,
    },
    extractors::Viewer,
    format,
    properties::models::Property,
    routes::Route,
};
use ammonia::{clean, clean_text};
use chrono::{DateTime, Utc};

fn rent_per_month(rent: f64) -> String {
    format!("{}/month", format::money(rent))
}

pub struct TenantRow<'a> {
    pub tenant: &'a Tenant,
    pub viewer: &'a Viewer,
}
impl Component for TenantRow<'_> {
    fn render(&self) -> String {
        let tenant = self.tenant;
        let id = &tenant.id;
        let view = ModalButton {
            href: Route::tenant(id),
            class: "btn-outline btn-sm",
            label: "View",
        }
        .render();
        let owner_actions = if self.viewer.is_owner() {
            let edit = ModalButton {
                href: Route::TenantEdit(Some(id.clone())),
                class: "btn-primary btn-sm",
                label: "Edit",
            }
            .render();
            let remove = Route::tenant(id);
            format!(
                r#"{edit}<button
                    class="btn btn-danger btn-sm"
                    hx-delete="{remove}"
                    hx-swap="none"
                    hx-confirm="Are you sure you want to remove this tenant? This will mark the property as available."
                >Remove</button>"#
            )
        } else {
            "".to_string()
        };
        format!(
            r#"
            <tr>
                <td>{name}</td>
                <td>{email}</td>
                <td>{phone}</td>
                <td>{property}</td>
                <td>{unit}</td>
                <td>{rent}</td>
                <td>{lease_start}</td>
                <td>{lease_end}</td>
                <td>{status}</td>
                <td><div class="action-buttons">{view}{owner_actions}</div></td>
            </tr>
            "#,
            name = clean(tenant.name()),
            email = clean(tenant.email()),
            phone = clean(tenant.phone()),
            property = clean(tenant.property_name()),
            unit = clean(format::or_na(Some(tenant.unit.as_str()))),
            rent = rent_per_month(tenant.rent),
            lease_start = format::date(tenant.lease_start.as_ref()),
            lease_end = format::date(tenant.lease_end.as_ref()),
            status = StatusBadge {
                status: &tenant.status
            }
            .render(),
        )
    }
}

/// Rows for `#tenantsList`.
pub struct TenantRows<'a> {
    pub tenants: &'a [Tenant],
    pub viewer: &'a Viewer,
}
impl Component for TenantRows<'_> {
    fn render(&self) -> String {
        if self.tenants.is_empty() {
            return EmptyRow {
                colspan: 10,
                state: EmptyState {
                    icon: "fa-users",
                    title: "No Tenants Found",
                    message: if self.viewer.is_owner() {
                        "Add your first tenant to get started"
                    } else {
                        "No tenant information available"
                    },
                    action: None,
                },
            }
            .render();
        }
        self.tenants
            .iter()
            .map(|tenant| {
                TenantRow {
                    tenant,
                    viewer: self.viewer,
                }
                .render()
            })
            .collect::<Vec<String>>()
            .join("")
    }
}

pub struct TenantDetails<'a> {
    pub tenant: &'a Tenant,
}
impl Component for TenantDetails<'_> {
    fn render(&self) -> String {
        let tenant = self.tenant;
        let personal = DetailSection {
            title: "Personal Information",
            items: vec![
                DetailItem {
                    label: "Name",
                    value: clean(tenant.name()),
                },
                DetailItem {
                    label: "Email",
                    value: clean(tenant.email()),
                },
                DetailItem {
                    label: "Phone",
                    value: clean(tenant.phone()),
                },
                DetailItem {
                    label: "Unit",
                    value: clean(format::or_na(Some(tenant.unit.as_str()))),
                },
            ],
        }
        .render();
        let lease = DetailSection {
            title: "Lease Information",
            items: vec![
                DetailItem {
                    label: "Property",
                    value: clean(tenant.property_name()),
                },
                DetailItem {
                    label: "Rent",
                    value: rent_per_month(tenant.rent),
                },
                DetailItem {
                    label: "Lease Start",
                    value: format::date(tenant.lease_start.as_ref()),
                },
                DetailItem {
                    label: "Lease End",
                    value: format::date(tenant.lease_end.as_ref()),
                },
                DetailItem {
                    label: "Security Deposit",
                    value: format::money(tenant.security_deposit),
                },
                DetailItem {
                    label: "Status",
                    value: StatusBadge {
                        status: &tenant.status,
                    }
                    .render(),
                },
            ],
        }
        .render();
        let emergency = match &tenant.emergency_contact {
            Some(contact) => DetailSection {
                title: "Emergency Contact",
                items: vec![
                    DetailItem {
                        label: "Name",
                        value: clean(format::or_na(Some(contact.name.as_str()))),
                    },
                    DetailItem {
                        label: "Phone",
                        value: clean(format::or_na(Some(contact.phone.as_str()))),
                    },
                    DetailItem {
                        label: "Relationship",
                        value: clean(format::or_na(Some(
                            contact.relationship.as_str(),
                        ))),
                    },
                ],
            }
            .render(),
            None => "".to_string(),
        };
        Modal {
            id: "tenantDetailsModal",
            title: "Tenant Details",
            children: Box::new(format!(
                r#"<div class="tenant-details">{personal}{lease}{emergency}</div>"#
            )),
            footer: Some(Box::new(CloseButton)),
        }
        .render()
    }
}

fn date_value(date: Option<&DateTime<Utc>>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Add a tenant to one of the owner's properties, or edit an existing
/// lease.
pub struct TenantFormModal<'a> {
    pub tenant: Option<&'a Tenant>,
    pub properties: &'a [Property],
}
impl Component for TenantFormModal<'_> {
    fn render(&self) -> String {
        let t = self.tenant;
        let (title, submit_label, action) = match t {
            Some(t) => ("Edit Tenant", "Update Tenant", Route::tenant(&t.id)),
            None => ("Add Tenant", "Add Tenant", Route::Tenants),
        };
        let email = match t {
            Some(t) => format!(
                r#"<input type="email" id="tenantEmail" value="{}" readonly />"#,
                clean_text(t.email())
            ),
            None => r#"<input type="email" id="tenantEmail" name="email" placeholder="Tenant's account email" required />"#
                .to_string(),
        };
        let property = Select {
            name: "property",
            placeholder: Some("Select property"),
            options: self
                .properties
                .iter()
                .map(|p| (p.id.clone(), p.name.clone()))
                .collect(),
            selected: t.and_then(|t| t.property_id()),
        }
        .render();
        let unit = t.map(|t| clean_text(&t.unit)).unwrap_or_default();
        let rent = t.map(|t| t.rent.to_string()).unwrap_or_default();
        let lease_start = date_value(t.and_then(|t| t.lease_start.as_ref()));
        let lease_end = date_value(t.and_then(|t| t.lease_end.as_ref()));
        let deposit = t
            .map(|t| t.security_deposit.to_string())
            .unwrap_or_default();
        let contact = t.and_then(|t| t.emergency_contact.as_ref());
        let emergency_name = contact.map(|c| clean_text(&c.name)).unwrap_or_default();
        let emergency_phone = contact.map(|c| clean_text(&c.phone)).unwrap_or_default();
        let emergency_relationship = contact
            .map(|c| clean_text(&c.relationship))
            .unwrap_or_default();
        let form = format!(
            r#"
            <form id="tenantForm" hx-post="{action}" hx-swap="none">
                <div class="form-group">
                    <label for="tenantEmail">Tenant Email *</label>
                    {email}
                </div>
                <div class="form-row">
                    <div class="form-group">
                        <label for="property">Property *</label>
                        {property}
                    </div>
                    <div class="form-group">
                        <label for="unit">Unit *</label>
                        <input type="text" id="unit" name="unit" value="{unit}" required />
                    </div>
                </div>
                <div class="form-row">
                    <div class="form-group">
                        <label for="tenantRent">Monthly Rent ($) *</label>
                        <input type="number" id="tenantRent" name="rent" value="{rent}" min="0" step="any" required />
                    </div>
                    <div class="form-group">
                        <label for="securityDeposit">Security Deposit ($)</label>
                        <input type="number" id="securityDeposit" name="security_deposit" value="{deposit}" min="0" step="any" />
                    </div>
                </div>
                <div class="form-row">
                    <div class="form-group">
                        <label for="leaseStart">Lease Start *</label>
                        <input type="date" id="leaseStart" name="lease_start" value="{lease_start}" required />
                    </div>
                    <div class="form-group">
                        <label for="leaseEnd">Lease End *</label>
                        <input type="date" id="leaseEnd" name="lease_end" value="{lease_end}" required />
                    </div>
                </div>
                <h3>Emergency Contact</h3>
                <div class="form-row">
                    <div class="form-group">
                        <label for="emergencyName">Name</label>
                        <input type="text" id="emergencyName" name="emergency_name" value="{emergency_name}" />
                    </div>
                    <div class="form-group">
                        <label for="emergencyPhone">Phone</label>
                        <input type="tel" id="emergencyPhone" name="emergency_phone" value="{emergency_phone}" />
                    </div>
                    <div class="form-group">
                        <label for="emergencyRelationship">Relationship</label>
                        <input type="text" id="emergencyRelationship" name="emergency_relationship" value="{emergency_relationship}" />
                    </div>
                </div>
                <div class="form-actions">
                    <button type="button" class="btn btn-outline" onclick="this.closest('.modal').remove()">Cancel</button>
                    <button type="submit" class="btn btn-primary">{submit_label}</button>
                </div>
            </form>
            "#
        );
        Modal {
            id: "tenantModal",
            title,
            children: Box::new(form),
            footer: None,
        }
        .render()
    }
}

/// The tenant's view of their own lease.
pub struct LeaseSummary<'a> {
    pub lease: Option<&'a Tenant>,
}
impl Component for LeaseSummary<'_> {
    fn render(&self) -> String {
        let Some(lease) = self.lease else {
            return EmptyState {
                icon: "fa-file-contract",
                title: "No Active Lease",
                message: "Your lease details will appear here once your landlord adds you",
                action: None,
            }
            .render();
        };
        let address = lease
            .property()
            .and_then(|p| p.address.as_ref())
            .map(|a| clean(&a.one_line()))
            .unwrap_or_else(|| format::NOT_AVAILABLE.to_string());
        DetailSection {
            title: "My Lease",
            items: vec![
                DetailItem {
                    label: "Property",
                    value: clean(lease.property_name()),
                },
                DetailItem {
                    label: "Address",
                    value: address,
                },
                DetailItem {
                    label: "Unit",
                    value: clean(format::or_na(Some(lease.unit.as_str()))),
                },
                DetailItem {
                    label: "Rent",
                    value: rent_per_month(lease.rent),
                },
                DetailItem {
                    label: "Lease Start",
                    value: format::date(lease.lease_start.as_ref()),
                },
                DetailItem {
                    label: "Lease End",
                    value: format::date(lease.lease_end.as_ref()),
                },
            ],
        }
        .render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;
    use serde_json::json;

    fn tenant() -> Tenant {
        serde_json::from_value(json!({
            "_id": "t1",
            "user": {"_id": "tenant-1", "name": "Terry Tenant", "email": "tenant@example.com"},
            "property": {"_id": "p1", "name": "Maple Loft"},
            "unit": "4B",
            "rent": 1200,
            "leaseStart": "2024-01-01T00:00:00.000Z",
            "leaseEnd": "2024-12-31T00:00:00.000Z",
            "securityDeposit": 1200,
            "status": "active",
            "emergencyContact": {"name": "Pat", "phone": "555-0101", "relationship": "Sister"}
        }))
        .expect("tenant")
    }

    #[test]
    fn test_row_shows_lease() {
        let t = tenant();
        let html = TenantRow {
            tenant: &t,
            viewer: &testing::owner(),
        }
        .render();
        assert!(html.contains("<td>Terry Tenant</td>"));
        assert!(html.contains("<td>N/A</td>"));
        assert!(html.contains("<td>$1,200/month</td>"));
        assert!(html.contains("<td>01/01/2024</td>"));
        assert!(html.contains("This will mark the property as available."));
    }

    #[test]
    fn test_row_actions_for_non_owner() {
        let t = tenant();
        let html = TenantRow {
            tenant: &t,
            viewer: &testing::tenant(),
        }
        .render();
        assert!(html.contains(">View</button>"));
        assert!(!html.contains("hx-delete"));
    }

    #[test]
    fn test_empty_rows_by_role() {
        let owner = TenantRows {
            tenants: &[],
            viewer: &testing::owner(),
        }
        .render();
        assert!(owner.contains(r#"colspan="10""#));
        assert!(owner.contains("No Tenants Found"));
        assert!(owner.contains("Add your first tenant to get started"));
    }

    #[test]
    fn test_details_include_emergency_contact() {
        let t = tenant();
        let html = TenantDetails { tenant: &t }.render();
        assert!(html.contains("Emergency Contact"));
        assert!(html.contains("Sister"));
        assert!(html.contains("Security Deposit:</strong> $1,200"));
    }

    #[test]
    fn test_edit_form_prefills() {
        let t = tenant();
        let html = TenantFormModal {
            tenant: Some(&t),
            properties: &[],
        }
        .render();
        assert!(html.contains("Edit Tenant"));
        assert!(html.contains(r#"hx-post="/tenants/t1""#));
        assert!(html.contains(r#"value="2024-12-31""#));
        assert!(html.contains("readonly"));
    }

    #[test]
    fn test_lease_summary_without_lease() {
        let html = LeaseSummary { lease: None }.render();
        assert!(html.contains("No Active Lease"));
    }
}

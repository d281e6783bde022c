use super::models::{Application, ApplicationStatus};
use crate::{
    components::{
        CloseButton, Component, DetailItem, DetailSection, EmptyState, Modal,
        ModalButton, StatusBadge,
    },
    format,
    routes::Route,
};
use ammonia::clean;

/// Approve or reject a pending application.
pub struct DecisionButton<'a> {
    pub application_id: &'a str,
    pub decision: ApplicationStatus,
    pub label: &'a str,
}
impl Component for DecisionButton<'_> {
    fn render(&self) -> String {
        let href = Route::ApplicationStatus(Some(self.application_id.to_string()));
        let (class, verb) = match self.decision {
            ApplicationStatus::Approved => ("btn-success", "approve"),
            _ => ("btn-danger", "reject"),
        };
        let status = self.decision;
        let label = clean(self.label);
        format!(
            r#"<button
                class="btn {class} btn-sm"
                hx-post="{href}"
                hx-vals='{{"status": "{status}"}}'
                hx-swap="none"
                hx-confirm="Are you sure you want to {verb} this application?"
            >{label}</button>"#
        )
    }
}

fn applicant_items(application: &Application) -> Vec<DetailItem<'static>> {
    vec![
        DetailItem {
            label: "Name",
            value: clean(&application.applicant_name),
        },
        DetailItem {
            label: "Email",
            value: clean(&application.applicant_email),
        },
        DetailItem {
            label: "Phone",
            value: clean(format::or_na(Some(application.applicant_phone.as_str()))),
        },
        DetailItem {
            label: "Occupation",
            value: clean(format::or_na(application.occupation.as_deref())),
        },
        DetailItem {
            label: "Monthly Income",
            value: format::money(application.monthly_income),
        },
        DetailItem {
            label: "Move-in Date",
            value: format::date(application.move_in_date.as_ref()),
        },
    ]
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

pub struct ApplicationCard<'a> {
    pub application: &'a Application,
}
impl Component for ApplicationCard<'_> {
    fn render(&self) -> String {
        let application = self.application;
        let id = &application.id;
        let property = application
            .property()
            .map(|p| p.name.as_str())
            .filter(|n| !n.is_empty())
            .unwrap_or("Unknown Property");
        let status = StatusBadge {
            status: application.status.as_str(),
        }
        .render();
        let details = applicant_items(application)
            .iter()
            .map(|i| i.render())
            .collect::<Vec<String>>()
            .join("");
        let message = non_empty(application.message.as_deref())
            .map(|m| {
                format!(
                    r#"<div class="application-message"><h5>Message from Applicant</h5><p>"{}"</p></div>"#,
                    clean(m)
                )
            })
            .unwrap_or_default();
        let references = non_empty(application.references.as_deref())
            .map(|r| {
                format!(
                    r#"<div class="application-references"><h5>References</h5><p>{}</p></div>"#,
                    clean(r)
                )
            })
            .unwrap_or_default();
        let applied_on = format::date(application.created_at.as_ref());
        let view = ModalButton {
            href: Route::application(id),
            class: "btn-outline btn-sm",
            label: "View Details",
        }
        .render();
        let decisions = if application.status == ApplicationStatus::Pending {
            format!(
                "{}{}",
                DecisionButton {
                    application_id: id,
                    decision: ApplicationStatus::Approved,
                    label: "Approve",
                }
                .render(),
                DecisionButton {
                    application_id: id,
                    decision: ApplicationStatus::Rejected,
                    label: "Reject",
                }
                .render()
            )
        } else {
            "".to_string()
        };
        format!(
            r#"
            <div class="application-card">
                <div class="application-header">
                    <h4>Application for {property}</h4>
                    {status}
                </div>
                <div class="application-content">
                    <div class="applicant-info">
                        <h5>Applicant Details</h5>
                        <div class="detail-grid">{details}</div>
                    </div>
                    {message}
                    {references}
                    <div class="application-meta"><small>Applied on: {applied_on}</small></div>
                </div>
                <div class="application-actions">{view}{decisions}</div>
            </div>
            "#,
            property = clean(property),
        )
    }
}

pub struct ApplicationList<'a> {
    pub applications: &'a [Application],
}
impl Component for ApplicationList<'_> {
    fn render(&self) -> String {
        if self.applications.is_empty() {
            return EmptyState {
                icon: "fa-file-alt",
                title: "No Applications Found",
                message: "Tenant applications for your properties will appear here",
                action: None,
            }
            .render();
        }
        self.applications
            .iter()
            .map(|application| ApplicationCard { application }.render())
            .collect::<Vec<String>>()
            .join("")
    }
}

pub struct ApplicationDetails<'a> {
    pub application: &'a Application,
}
impl Component for ApplicationDetails<'_> {
    fn render(&self) -> String {
        let application = self.application;
        let property = application.property();
        let address = property
            .and_then(|p| p.address.as_ref())
            .map(|a| {
                format!(
                    "{}, {}",
                    format::or_na(Some(a.street.as_str())),
                    format::or_na(Some(a.city.as_str()))
                )
            })
            .unwrap_or_else(|| "N/A, N/A".to_string());
        let property_section = DetailSection {
            title: "Property Information",
            items: vec![
                DetailItem {
                    label: "Property",
                    value: clean(format::or_na(property.map(|p| p.name.as_str()))),
                },
                DetailItem {
                    label: "Rent",
                    value: match property.and_then(|p| p.rent) {
                        Some(rent) => format!("{}/month", format::money(rent)),
                        None => format::NOT_AVAILABLE.to_string(),
                    },
                },
                DetailItem {
                    label: "Address",
                    value: clean(&address),
                },
            ],
        }
        .render();
        let applicant_section = DetailSection {
            title: "Applicant Information",
            items: applicant_items(application),
        }
        .render();
        let message = non_empty(application.message.as_deref())
            .map(|m| {
                format!(
                    r#"<div class="detail-section"><h3>Applicant Message</h3><p>{}</p></div>"#,
                    clean(m)
                )
            })
            .unwrap_or_default();
        let references = non_empty(application.references.as_deref())
            .map(|r| {
                format!(
                    r#"<div class="detail-section"><h3>References</h3><p>{}</p></div>"#,
                    clean(r)
                )
            })
            .unwrap_or_default();
        let status_section = DetailSection {
            title: "Application Status",
            items: vec![
                DetailItem {
                    label: "Status",
                    value: StatusBadge {
                        status: application.status.as_str(),
                    }
                    .render(),
                },
                DetailItem {
                    label: "Applied On",
                    value: format::date(application.created_at.as_ref()),
                },
                DetailItem {
                    label: "Last Updated",
                    value: format::date(application.updated_at.as_ref()),
                },
            ],
        }
        .render();
        let body = format!(
            r#"<div class="application-details">{property_section}{applicant_section}{message}{references}{status_section}</div>"#
        );
        let decisions = if application.status == ApplicationStatus::Pending {
            format!(
                "{}{}",
                DecisionButton {
                    application_id: &application.id,
                    decision: ApplicationStatus::Approved,
                    label: "Approve Application",
                }
                .render(),
                DecisionButton {
                    application_id: &application.id,
                    decision: ApplicationStatus::Rejected,
                    label: "Reject Application",
                }
                .render()
            )
        } else {
            "".to_string()
        };
        let footer = format!(
            r#"<div class="modal-actions">{}{decisions}</div>"#,
            CloseButton.render()
        );
        Modal {
            id: "viewApplicationModal",
            title: "Application Details",
            children: Box::new(body),
            footer: Some(Box::new(footer)),
        }
        .render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn application(status: &str) -> Application {
        serde_json::from_value(json!({
            "_id": "a1",
            "property": {"_id": "p1", "name": "Maple Loft", "rent": 1200},
            "applicantName": "Terry Tenant",
            "applicantEmail": "tenant@example.com",
            "applicantPhone": "555-0100",
            "monthlyIncome": 4200,
            "message": "I love it",
            "status": status,
            "createdAt": "2024-03-01T10:00:00.000Z"
        }))
        .expect("application")
    }

    #[test]
    fn test_pending_card_offers_decisions() {
        let a = application("pending");
        let html = ApplicationCard { application: &a }.render();
        assert!(html.contains("Application for Maple Loft"));
        assert!(html.contains(r#""status": "approved""#));
        assert!(html.contains(r#""status": "rejected""#));
        assert!(html.contains("Are you sure you want to approve this application?"));
        assert!(html.contains("Applied on: 03/01/2024"));
        assert!(html.contains("$4,200"));
    }

    #[test]
    fn test_decided_card_has_no_decisions() {
        let a = application("approved");
        let html = ApplicationCard { application: &a }.render();
        assert!(!html.contains("hx-vals"));
        assert!(html.contains("View Details"));
    }

    #[test]
    fn test_empty_list() {
        let html = ApplicationList { applications: &[] }.render();
        assert!(html.contains("No Applications Found"));
    }

    #[test]
    fn test_details_modal() {
        let a = application("pending");
        let html = ApplicationDetails { application: &a }.render();
        assert!(html.contains("Property Information"));
        assert!(html.contains("$1,200/month"));
        assert!(html.contains("Approve Application"));
        assert!(html.contains("Last Updated:</strong> N/A"));
    }
}

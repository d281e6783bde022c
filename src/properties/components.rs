use super::models::Property;
use crate::{
    components::{
        CloseButton, Component, DetailItem, DetailSection, EmptyState, Modal,
        ModalButton,
    },
    extractors::Viewer,
    format,
    models::{Linked, User},
    routes::Route,
};
use ammonia::{clean, clean_text};

fn description_html(description: &str) -> String {
    clean(&markdown::to_html(description))
}

fn rent_per_month(rent: f64) -> String {
    format!("{}/month", format::money(rent))
}

/// Buttons under a property card. Every viewer can open the details; what
/// else shows up depends on who is looking.
pub struct PropertyActions<'a> {
    pub property: &'a Property,
    pub viewer: &'a Viewer,
}
impl Component for PropertyActions<'_> {
    fn render(&self) -> String {
        let id = &self.property.id;
        let details = ModalButton {
            href: Route::property(id),
            class: "btn-outline",
            label: "View Details",
        }
        .render();
        let role_actions = match self.viewer {
            Viewer::Owner(_) => {
                let edit = ModalButton {
                    href: Route::PropertyEdit(Some(id.clone())),
                    class: "btn-primary",
                    label: "Edit",
                }
                .render();
                let delete = Route::property(id);
                format!(
                    r#"{edit}
                    <button
                        class="btn btn-danger"
                        hx-delete="{delete}"
                        hx-swap="none"
                        hx-confirm="Are you sure you want to delete this property? This action cannot be undone."
                    >Delete</button>"#
                )
            }
            Viewer::Tenant(_) => ModalButton {
                href: Route::PropertyApply(Some(id.clone())),
                class: "btn-primary",
                label: "Apply Now",
            }
            .render(),
            Viewer::Anonymous => ModalButton {
                href: Route::PropertyApply(Some(id.clone())),
                class: "btn-primary",
                label: "Login to Apply",
            }
            .render(),
        };
        format!(r#"<div class="property-actions">{details}{role_actions}</div>"#)
    }
}

pub struct AvailabilityBadge {
    pub is_available: bool,
}
impl Component for AvailabilityBadge {
    fn render(&self) -> String {
        let (class, label) = if self.is_available {
            ("status-active", "Available")
        } else {
            ("status-pending", "Occupied")
        };
        format!(
            r#"<div class="property-status"><span class="status-badge {class}">{label}</span></div>"#
        )
    }
}

pub struct PropertyCard<'a> {
    pub property: &'a Property,
    pub viewer: &'a Viewer,
}
impl Component for PropertyCard<'_> {
    fn render(&self) -> String {
        let property = self.property;
        let id = clean_text(&property.id);
        let name = clean(&property.name);
        let price = rent_per_month(property.rent);
        let address = clean(&property.address.one_line());
        let beds = property.bedrooms;
        let baths = property.bathrooms;
        let area = clean(&property.area);
        let description = property
            .description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .map(|d| {
                format!(
                    r#"<div class="property-description">{}</div>"#,
                    description_html(d)
                )
            })
            .unwrap_or_default();
        let tags = if property.features.is_empty() {
            "".to_string()
        } else {
            let tags = property
                .features
                .iter()
                .map(|f| format!(r#"<span class="tag">{}</span>"#, clean(f)))
                .collect::<Vec<String>>()
                .join("");
            format!(r#"<div class="property-tags">{tags}</div>"#)
        };
        let actions = PropertyActions {
            property,
            viewer: self.viewer,
        }
        .render();
        let status = if self.viewer.is_owner() {
            AvailabilityBadge {
                is_available: property.is_available,
            }
            .render()
        } else {
            "".to_string()
        };
        format!(
            r#"
            <div class="property-card" data-property-id="{id}">
                <div class="property-image"><i class="fas fa-home"></i></div>
                <div class="property-content">
                    <h3>{name}</h3>
                    <div class="property-price">{price}</div>
                    <p>{address}</p>
                    <div class="property-features">
                        <span><i class="fas fa-bed"></i> {beds} beds</span>
                        <span><i class="fas fa-bath"></i> {baths} baths</span>
                        <span><i class="fas fa-ruler-combined"></i> {area}</span>
                    </div>
                    {description}
                    {tags}
                    {actions}
                    {status}
                </div>
            </div>
            "#
        )
    }
}

pub struct PropertyGrid<'a> {
    pub properties: &'a [Property],
    pub viewer: &'a Viewer,
}
impl Component for PropertyGrid<'_> {
    fn render(&self) -> String {
        if self.properties.is_empty() {
            let is_owner = self.viewer.is_owner();
            return EmptyState {
                icon: "fa-home",
                title: "No Properties Found",
                message: if is_owner {
                    "Add your first property to get started"
                } else {
                    "No properties available at the moment"
                },
                action: is_owner.then(|| -> Box<dyn Component> {
                    Box::new(ModalButton {
                        href: Route::PropertyNew,
                        class: "btn-primary",
                        label: "Add First Property",
                    })
                }),
            }
            .render();
        }
        self.properties
            .iter()
            .map(|property| {
                PropertyCard {
                    property,
                    viewer: self.viewer,
                }
                .render()
            })
            .collect::<Vec<String>>()
            .join("")
    }
}

/// Add or edit. With a property the form is pre-filled and submits to
/// that property's route.
pub struct PropertyFormModal<'a> {
    pub property: Option<&'a Property>,
}
impl Component for PropertyFormModal<'_> {
    fn render(&self) -> String {
        let p = self.property;
        let value = |f: fn(&Property) -> String| {
            p.map(|p| clean_text(&f(p))).unwrap_or_default()
        };
        let (title, submit_label, action) = match p {
            Some(p) => ("Edit Property", "Update Property", Route::property(&p.id)),
            None => ("Add New Property", "Add Property", Route::Properties),
        };
        let name = value(|p| p.name.clone());
        let rent = value(|p| p.rent.to_string());
        let street = value(|p| p.address.street.clone());
        let city = value(|p| p.address.city.clone());
        let state = value(|p| p.address.state.clone());
        let zip_code = value(|p| p.address.zip_code.clone());
        let bedrooms = value(|p| p.bedrooms.to_string());
        let bathrooms = value(|p| p.bathrooms.to_string());
        let area = value(|p| p.area.clone());
        let features = value(|p| p.features.join(", "));
        let description = p
            .and_then(|p| p.description.as_deref())
            .map(clean)
            .unwrap_or_default();
        let form = format!(
            r#"
            <form id="propertyForm" hx-post="{action}" hx-swap="none">
                <div class="form-row">
                    <div class="form-group">
                        <label for="propertyName">Property Name *</label>
                        <input type="text" id="propertyName" name="name" value="{name}" required />
                    </div>
                    <div class="form-group">
                        <label for="propertyRent">Monthly Rent ($) *</label>
                        <input type="number" id="propertyRent" name="rent" value="{rent}" required min="0" step="any" />
                    </div>
                </div>
                <div class="form-group">
                    <label for="propertyAddress">Street Address *</label>
                    <input type="text" id="propertyAddress" name="street" value="{street}" required />
                </div>
                <div class="form-row">
                    <div class="form-group">
                        <label for="propertyCity">City *</label>
                        <input type="text" id="propertyCity" name="city" value="{city}" required />
                    </div>
                    <div class="form-group">
                        <label for="propertyState">State *</label>
                        <input type="text" id="propertyState" name="state" value="{state}" required />
                    </div>
                    <div class="form-group">
                        <label for="propertyZip">ZIP Code *</label>
                        <input type="text" id="propertyZip" name="zip_code" value="{zip_code}" required />
                    </div>
                </div>
                <div class="form-row">
                    <div class="form-group">
                        <label for="propertyBedrooms">Bedrooms *</label>
                        <input type="number" id="propertyBedrooms" name="bedrooms" value="{bedrooms}" required min="0" />
                    </div>
                    <div class="form-group">
                        <label for="propertyBathrooms">Bathrooms *</label>
                        <input type="number" id="propertyBathrooms" name="bathrooms" value="{bathrooms}" required min="0" step="0.5" />
                    </div>
                    <div class="form-group">
                        <label for="propertyArea">Area *</label>
                        <input type="text" id="propertyArea" name="area" value="{area}" required placeholder="e.g., 1000 sq ft" />
                    </div>
                </div>
                <div class="form-group">
                    <label for="propertyDescription">Description</label>
                    <textarea id="propertyDescription" name="description" rows="3" placeholder="Describe the property features, amenities, etc.">{description}</textarea>
                </div>
                <div class="form-group">
                    <label for="propertyFeatures">Features (comma separated)</label>
                    <input type="text" id="propertyFeatures" name="features" value="{features}" placeholder="e.g., Parking, Laundry, Gym, Pool" />
                </div>
                <div class="form-actions">
                    <button type="button" class="btn btn-outline" onclick="this.closest('.modal').remove()">Cancel</button>
                    <button type="submit" class="btn btn-primary">{submit_label}</button>
                </div>
            </form>
            "#
        );
        Modal {
            id: "propertyModal",
            title,
            children: Box::new(form),
            footer: None,
        }
        .render()
    }
}

pub struct PropertyDetails<'a> {
    pub property: &'a Property,
    pub viewer: &'a Viewer,
}
impl Component for PropertyDetails<'_> {
    fn render(&self) -> String {
        let property = self.property;
        let basics = DetailSection {
            title: "Basic Information",
            items: vec![
                DetailItem {
                    label: "Rent",
                    value: rent_per_month(property.rent),
                },
                DetailItem {
                    label: "Bedrooms",
                    value: property.bedrooms.to_string(),
                },
                DetailItem {
                    label: "Bathrooms",
                    value: property.bathrooms.to_string(),
                },
                DetailItem {
                    label: "Area",
                    value: clean(format::or_na(Some(property.area.as_str()))),
                },
            ],
        }
        .render();
        let owner = match property.owner.as_ref().and_then(Linked::populated) {
            Some(owner) => DetailSection {
                title: "Owner",
                items: vec![
                    DetailItem {
                        label: "Name",
                        value: clean(&owner.name),
                    },
                    DetailItem {
                        label: "Email",
                        value: clean(format::or_na(Some(owner.email.as_str()))),
                    },
                ],
            }
            .render(),
            None => "".to_string(),
        };
        let address = &property.address;
        let description = property
            .description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .map(|d| {
                format!(
                    r#"<div class="detail-section"><h3>Description</h3>{}</div>"#,
                    description_html(d)
                )
            })
            .unwrap_or_default();
        let features = if property.features.is_empty() {
            "".to_string()
        } else {
            let tags = property
                .features
                .iter()
                .map(|f| format!(r#"<span class="feature-tag">{}</span>"#, clean(f)))
                .collect::<Vec<String>>()
                .join("");
            format!(
                r#"<div class="detail-section"><h3>Features</h3><div class="features-list">{tags}</div></div>"#
            )
        };
        let body = format!(
            r#"
            <div class="property-details">
                {basics}
                <div class="detail-section">
                    <h3>Address</h3>
                    <p>{street}<br />{city}, {state} {zip}</p>
                </div>
                {description}
                {features}
                {owner}
            </div>
            "#,
            street = clean(&address.street),
            city = clean(&address.city),
            state = clean(&address.state),
            zip = clean(&address.zip_code),
        );
        let id = &property.id;
        let action = match self.viewer {
            Viewer::Owner(_) => ModalButton {
                href: Route::PropertyEdit(Some(id.clone())),
                class: "btn-primary",
                label: "Edit Property",
            },
            Viewer::Tenant(_) => ModalButton {
                href: Route::PropertyApply(Some(id.clone())),
                class: "btn-primary",
                label: "Apply Now",
            },
            Viewer::Anonymous => ModalButton {
                href: Route::PropertyApply(Some(id.clone())),
                class: "btn-primary",
                label: "Login to Apply",
            },
        };
        let footer = format!(
            r#"<div class="modal-actions">{}{}</div>"#,
            action.render(),
            CloseButton.render()
        );
        Modal {
            id: "propertyDetailsModal",
            title: &property.name,
            children: Box::new(body),
            footer: Some(Box::new(footer)),
        }
        .render()
    }
}

/// Rental application for a tenant. Name and email come from the session
/// and cannot be edited here.
pub struct ApplyForm<'a> {
    pub property: &'a Property,
    pub user: &'a User,
}
impl Component for ApplyForm<'_> {
    fn render(&self) -> String {
        let property = self.property;
        let action = Route::PropertyApply(Some(property.id.clone()));
        let rent = rent_per_month(property.rent);
        let address = clean(&property.address.one_line());
        let name = clean_text(&self.user.name);
        let email = clean_text(&self.user.email);
        let phone = self
            .user
            .phone
            .as_deref()
            .map(clean_text)
            .unwrap_or_default();
        let form = format!(
            r#"
            <form id="applyForm" class="application-form" hx-post="{action}" hx-swap="none">
                <div class="property-summary">
                    <p><strong>Rent:</strong> {rent}</p>
                    <p><strong>Address:</strong> {address}</p>
                </div>
                <div class="form-group">
                    <label for="applicantName">Full Name</label>
                    <input type="text" id="applicantName" value="{name}" readonly />
                </div>
                <div class="form-group">
                    <label for="applicantEmail">Email</label>
                    <input type="email" id="applicantEmail" value="{email}" readonly />
                </div>
                <div class="form-group">
                    <label for="applicantPhone">Phone *</label>
                    <input type="tel" id="applicantPhone" name="phone" value="{phone}" placeholder="Your phone number" required />
                </div>
                <div class="form-row">
                    <div class="form-group">
                        <label for="occupation">Occupation</label>
                        <input type="text" id="occupation" name="occupation" />
                    </div>
                    <div class="form-group">
                        <label for="monthlyIncome">Monthly Income ($)</label>
                        <input type="number" id="monthlyIncome" name="monthly_income" min="0" step="any" />
                    </div>
                    <div class="form-group">
                        <label for="moveInDate">Move-in Date</label>
                        <input type="date" id="moveInDate" name="move_in_date" />
                    </div>
                </div>
                <div class="form-group">
                    <label for="applicantMessage">Message to Owner (Optional)</label>
                    <textarea id="applicantMessage" name="message" rows="3" placeholder="Tell the owner why you're interested..."></textarea>
                </div>
                <div class="form-group">
                    <label for="references">References (Optional)</label>
                    <textarea id="references" name="references" rows="2"></textarea>
                </div>
                <div class="form-actions">
                    <button type="button" class="btn btn-outline" onclick="this.closest('.modal').remove()">Cancel</button>
                    <button type="submit" class="btn btn-primary">Submit Application</button>
                </div>
            </form>
            "#
        );
        Modal {
            id: "applyModal",
            title: &format!("Apply for {}", property.name),
            children: Box::new(form),
            footer: None,
        }
        .render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::Role, testing};
    use serde_json::json;

    fn property() -> Property {
        serde_json::from_value(json!({
            "_id": "p1",
            "name": "Maple Loft",
            "rent": 1200,
            "address": {"street": "12 Elm St", "city": "Springfield", "state": "IL", "zipCode": "62704"},
            "bedrooms": 2,
            "bathrooms": 1,
            "area": "900 sq ft",
            "description": "Sunny **corner** unit<script>alert(1)</script>",
            "features": ["Parking", "Gym"],
            "isAvailable": false
        }))
        .expect("property")
    }

    #[test]
    fn test_card_shows_listing_details() {
        let p = property();
        let html = PropertyCard {
            property: &p,
            viewer: &Viewer::Anonymous,
        }
        .render();
        assert!(html.contains("<h3>Maple Loft</h3>"));
        assert!(html.contains("$1,200/month"));
        assert!(html.contains("12 Elm St, Springfield, IL 62704"));
        assert!(html.contains("2 beds"));
        assert!(html.contains("<strong>corner</strong>"));
        assert!(!html.contains("<script>"));
        assert!(html.contains(r#"<span class="tag">Gym</span>"#));
    }

    #[test]
    fn test_actions_follow_role() {
        let p = property();
        let owner = PropertyCard {
            property: &p,
            viewer: &testing::owner(),
        }
        .render();
        assert!(owner.contains(">Edit</button>"));
        assert!(owner.contains(r#"hx-delete="/properties/p1""#));
        assert!(owner.contains("Occupied"));
        assert!(!owner.contains("Apply Now"));

        let tenant = PropertyCard {
            property: &p,
            viewer: &testing::tenant(),
        }
        .render();
        assert!(tenant.contains("Apply Now"));
        assert!(!tenant.contains("hx-delete"));
        assert!(!tenant.contains("Occupied"));

        let anonymous = PropertyCard {
            property: &p,
            viewer: &Viewer::Anonymous,
        }
        .render();
        assert!(anonymous.contains("Login to Apply"));
        assert!(anonymous.contains("View Details"));
        assert!(!anonymous.contains("Apply Now"));
    }

    #[test]
    fn test_empty_grid_depends_on_role() {
        let owner = PropertyGrid {
            properties: &[],
            viewer: &testing::owner(),
        }
        .render();
        assert!(owner.contains("No Properties Found"));
        assert!(owner.contains("Add your first property to get started"));
        assert!(owner.contains("Add First Property"));

        let visitor = PropertyGrid {
            properties: &[],
            viewer: &Viewer::Anonymous,
        }
        .render();
        assert!(visitor.contains("No properties available at the moment"));
        assert!(!visitor.contains("Add First Property"));
    }

    #[test]
    fn test_form_modal_titles() {
        let add = PropertyFormModal { property: None }.render();
        assert!(add.contains("Add New Property"));
        assert!(add.contains(">Add Property</button>"));
        assert!(add.contains(r#"hx-post="/properties""#));

        let p = property();
        let edit = PropertyFormModal { property: Some(&p) }.render();
        assert!(edit.contains("Edit Property"));
        assert!(edit.contains(">Update Property</button>"));
        assert!(edit.contains(r#"hx-post="/properties/p1""#));
        assert!(edit.contains(r#"value="1200""#));
    }

    #[test]
    fn test_details_action_by_role() {
        let p = property();
        let owner = PropertyDetails {
            property: &p,
            viewer: &testing::owner(),
        }
        .render();
        assert!(owner.contains("Edit Property"));
        assert!(owner.contains("Basic Information"));

        let tenant = PropertyDetails {
            property: &p,
            viewer: &testing::tenant(),
        }
        .render();
        assert!(tenant.contains("Apply Now"));
    }

    #[test]
    fn test_apply_form_prefills_user() {
        let p = property();
        let user = testing::user(Role::Tenant);
        let html = ApplyForm {
            property: &p,
            user: &user,
        }
        .render();
        assert!(html.contains("Apply for Maple Loft"));
        assert!(html.contains(r#"hx-post="/properties/p1/apply""#));
        assert!(html.contains("readonly"));
        assert!(html.contains(r#"name="phone" value="555-0100""#));
    }
}

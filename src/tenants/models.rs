use crate::{
    format,
    models::{lenient_date, lenient_number, lenient_string, Identified, Linked, UserSummary},
    properties::models::PropertyRef,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EmergencyContact {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub phone: String,
    #[serde(default)]
    pub relationship: String,
}

fn active() -> String {
    "active".to_string()
}

/// A lease: which user rents which property, and on what terms.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub user: Option<Linked<UserSummary>>,
    #[serde(default)]
    pub property: Option<Linked<PropertyRef>>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub unit: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub rent: f64,
    #[serde(default, deserialize_with = "lenient_date")]
    pub lease_start: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub lease_end: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub security_deposit: f64,
    #[serde(default = "active")]
    pub status: String,
    #[serde(default)]
    pub emergency_contact: Option<EmergencyContact>,
}

impl Identified for Tenant {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Tenant {
    pub fn user(&self) -> Option<&UserSummary> {
        self.user.as_ref().and_then(Linked::populated)
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(Linked::id)
    }

    pub fn name(&self) -> &str {
        format::or_na(self.user().map(|u| u.name.as_str()))
    }

    pub fn email(&self) -> &str {
        format::or_na(self.user().map(|u| u.email.as_str()))
    }

    pub fn phone(&self) -> &str {
        format::or_na(self.user().and_then(|u| u.phone.as_deref()))
    }

    pub fn property(&self) -> Option<&PropertyRef> {
        self.property.as_ref().and_then(Linked::populated)
    }

    pub fn property_id(&self) -> Option<&str> {
        self.property.as_ref().map(Linked::id)
    }

    pub fn property_name(&self) -> &str {
        format::or_na(self.property().map(|p| p.name.as_str()))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TenantForm {
    pub email: String,
    pub property: String,
    pub unit: String,
    pub rent: String,
    pub lease_start: String,
    pub lease_end: String,
    pub security_deposit: String,
    pub emergency_name: String,
    pub emergency_phone: String,
    pub emergency_relationship: String,
}

/// Body of `POST /tenants` and `PUT /tenants/:id`.
#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantDraft {
    /// Identifies the tenant's user account; only sent when adding.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub property: String,
    pub unit: String,
    pub rent: f64,
    pub lease_start: NaiveDate,
    pub lease_end: NaiveDate,
    pub security_deposit: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<EmergencyContact>,
}

pub const REQUIRED_FIELDS: &str = "Please fill all required fields";
pub const LEASE_ORDER: &str = "Lease end must be after lease start";

fn required(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

impl TenantForm {
    /// `adding` requires the email of the user being added; edits keep the
    /// existing user.
    pub fn validate(&self, adding: bool) -> Result<TenantDraft, &'static str> {
        let email = required(&self.email);
        if adding && email.is_none() {
            return Err(REQUIRED_FIELDS);
        }
        let draft = (|| {
            Some(TenantDraft {
                email: if adding { email } else { None },
                property: required(&self.property)?,
                unit: required(&self.unit)?,
                rent: self.rent.trim().parse::<f64>().ok().filter(|r| *r > 0.0)?,
                lease_start: date(&self.lease_start)?,
                lease_end: date(&self.lease_end)?,
                security_deposit: self
                    .security_deposit
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|d| *d >= 0.0)
                    .unwrap_or_default(),
                emergency_contact: self.emergency_contact(),
            })
        })()
        .ok_or(REQUIRED_FIELDS)?;
        if draft.lease_end <= draft.lease_start {
            return Err(LEASE_ORDER);
        }
        Ok(draft)
    }

    fn emergency_contact(&self) -> Option<EmergencyContact> {
        let contact = EmergencyContact {
            name: self.emergency_name.trim().to_string(),
            phone: self.emergency_phone.trim().to_string(),
            relationship: self.emergency_relationship.trim().to_string(),
        };
        (contact != EmergencyContact::default()).then_some(contact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form() -> TenantForm {
        TenantForm {
            email: "tenant@example.com".into(),
            property: "p1".into(),
            unit: "4B".into(),
            rent: "1200".into(),
            lease_start: "2024-01-01".into(),
            lease_end: "2024-12-31".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_add_requires_email() {
        let mut f = form();
        f.email = "".into();
        assert_eq!(f.validate(true), Err(REQUIRED_FIELDS));
        let draft = f.validate(false).expect("edit keeps user");
        assert!(draft.email.is_none());
    }

    #[test]
    fn test_lease_must_end_after_start() {
        let mut f = form();
        f.lease_end = "2023-12-31".into();
        assert_eq!(f.validate(true), Err(LEASE_ORDER));
    }

    #[test]
    fn test_draft_shape() {
        let mut f = form();
        f.emergency_name = "Pat".into();
        let draft = f.validate(true).expect("valid");
        let body = serde_json::to_value(&draft).expect("json");
        assert_eq!(body["leaseStart"], json!("2024-01-01"));
        assert_eq!(body["securityDeposit"], json!(0.0));
        assert_eq!(body["emergencyContact"]["name"], json!("Pat"));
        assert_eq!(body["email"], json!("tenant@example.com"));
    }

    #[test]
    fn test_tenant_accessors_fall_back() {
        let tenant: Tenant = serde_json::from_value(json!({
            "_id": "t1",
            "user": "u1",
            "property": {"_id": "p1", "name": "Maple Loft"},
            "unit": 4,
            "rent": 1200
        }))
        .expect("tenant");
        assert_eq!(tenant.name(), "N/A");
        assert_eq!(tenant.user_id(), Some("u1"));
        assert_eq!(tenant.property_name(), "Maple Loft");
        assert_eq!(tenant.unit, "4");
        assert_eq!(tenant.status, "active");
    }
}

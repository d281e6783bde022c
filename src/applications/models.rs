use crate::{
    models::{lenient_date, lenient_number, lenient_string, Identified, Linked, User},
    properties::models::PropertyRef,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub property: Option<Linked<PropertyRef>>,
    #[serde(default)]
    pub applicant_name: String,
    #[serde(default)]
    pub applicant_email: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub applicant_phone: String,
    #[serde(default)]
    pub occupation: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub monthly_income: f64,
    #[serde(default, deserialize_with = "lenient_date")]
    pub move_in_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub references: Option<String>,
    #[serde(default)]
    pub status: ApplicationStatus,
    #[serde(default, deserialize_with = "lenient_date")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Identified for Application {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Application {
    pub fn property(&self) -> Option<&PropertyRef> {
        self.property.as_ref().and_then(Linked::populated)
    }
}

/// The tenant's half of the apply form; name and email come from the
/// session.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ApplicationForm {
    pub phone: String,
    pub occupation: String,
    pub monthly_income: String,
    pub move_in_date: String,
    pub message: String,
    pub references: String,
}

/// Body of `POST /applications`.
#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDraft {
    pub property: String,
    pub applicant_name: String,
    pub applicant_email: String,
    pub applicant_phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_income: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub move_in_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub references: Option<String>,
}

pub const PHONE_REQUIRED: &str = "Please provide your phone number";

fn optional(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl ApplicationForm {
    pub fn validate(
        &self,
        property_id: &str,
        applicant: &User,
    ) -> Result<ApplicationDraft, &'static str> {
        let applicant_phone = optional(&self.phone).ok_or(PHONE_REQUIRED)?;
        Ok(ApplicationDraft {
            property: property_id.to_string(),
            applicant_name: applicant.name.clone(),
            applicant_email: applicant.email.clone(),
            applicant_phone,
            occupation: optional(&self.occupation),
            monthly_income: self
                .monthly_income
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| *n >= 0.0),
            move_in_date: NaiveDate::parse_from_str(
                self.move_in_date.trim(),
                "%Y-%m-%d",
            )
            .ok(),
            message: optional(&self.message),
            references: optional(&self.references),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::Role, testing};
    use serde_json::json;

    #[test]
    fn test_phone_is_required() {
        let user = testing::user(Role::Tenant);
        let form = ApplicationForm {
            phone: "   ".into(),
            ..Default::default()
        };
        assert_eq!(form.validate("p1", &user), Err(PHONE_REQUIRED));
    }

    #[test]
    fn test_draft_skips_blank_optionals() {
        let user = testing::user(Role::Tenant);
        let form = ApplicationForm {
            phone: "555-0199".into(),
            monthly_income: "4200".into(),
            move_in_date: "2024-06-01".into(),
            ..Default::default()
        };
        let draft = form.validate("p1", &user).expect("valid");
        assert_eq!(
            serde_json::to_value(&draft).expect("json"),
            json!({
                "property": "p1",
                "applicantName": "Terry Tenant",
                "applicantEmail": "tenant@example.com",
                "applicantPhone": "555-0199",
                "monthlyIncome": 4200.0,
                "moveInDate": "2024-06-01"
            })
        );
    }

    #[test]
    fn test_application_decodes_populated_property() {
        let app: Application = serde_json::from_value(json!({
            "_id": "a1",
            "property": {"_id": "p1", "name": "Maple Loft", "rent": 1200},
            "applicantName": "Terry",
            "applicantEmail": "t@example.com",
            "applicantPhone": 5550100,
            "monthlyIncome": "4200",
            "status": "approved",
            "createdAt": "2024-03-01T10:00:00.000Z"
        }))
        .expect("application");
        assert_eq!(app.status, ApplicationStatus::Approved);
        assert_eq!(app.property().map(|p| p.name.as_str()), Some("Maple Loft"));
        assert_eq!(app.applicant_phone, "5550100");
        assert_eq!(app.monthly_income, 4200.0);
    }
}

use crate::{
    format,
    models::{lenient_date, lenient_number, lenient_string, Identified, Linked, UserSummary},
    properties::models::PropertyRef,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    #[default]
    Pending,
    Overdue,
    Partial,
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 4] =
        [Self::Pending, Self::Paid, Self::Overdue, Self::Partial];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paid => "paid",
            Self::Pending => "pending",
            Self::Overdue => "overdue",
            Self::Partial => "partial",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Paid => "Paid",
            Self::Pending => "Pending",
            Self::Overdue => "Overdue",
            Self::Partial => "Partial",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == raw.trim())
    }
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "cash")]
    Cash,
    #[serde(rename = "check")]
    Check,
    #[serde(rename = "bank transfer")]
    BankTransfer,
    #[serde(rename = "credit card")]
    CreditCard,
    #[serde(rename = "online")]
    Online,
    /// Anything older records were saved with.
    #[serde(other, rename = "other")]
    Other,
}

impl PaymentMethod {
    /// What an owner can record.
    pub const ALL: [PaymentMethod; 5] = [
        Self::Cash,
        Self::Check,
        Self::BankTransfer,
        Self::CreditCard,
        Self::Online,
    ];

    /// What a tenant can pay with from the site.
    pub const ONLINE: [PaymentMethod; 3] =
        [Self::CreditCard, Self::BankTransfer, Self::Online];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Check => "check",
            Self::BankTransfer => "bank transfer",
            Self::CreditCard => "credit card",
            Self::Online => "online",
            Self::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::Check => "Check",
            Self::BankTransfer => "Bank Transfer",
            Self::CreditCard => "Credit Card",
            Self::Online => "Online",
            Self::Other => "Other",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == raw.trim())
    }
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The lease a payment was made against. Only the user matters here.
#[derive(Clone, Debug, Deserialize)]
pub struct PaymentTenant {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub user: Option<Linked<UserSummary>>,
}

impl Identified for PaymentTenant {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub tenant: Option<Linked<PaymentTenant>>,
    #[serde(default)]
    pub property: Option<Linked<PropertyRef>>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub amount: f64,
    #[serde(default, deserialize_with = "lenient_date")]
    pub payment_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub due_date: Option<DateTime<Utc>>,
    /// `YYYY-MM`
    #[serde(default, deserialize_with = "lenient_string")]
    pub month: String,
    #[serde(default)]
    pub status: PaymentStatus,
    #[serde(default)]
    pub method: Option<PaymentMethod>,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Identified for Payment {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Payment {
    fn tenant_user(&self) -> Option<&Linked<UserSummary>> {
        self.tenant
            .as_ref()
            .and_then(Linked::populated)
            .and_then(|t| t.user.as_ref())
    }

    /// The id of the user who pays this, when the backend populated it.
    pub fn tenant_user_id(&self) -> Option<&str> {
        self.tenant_user().map(Linked::id)
    }

    pub fn tenant_name(&self) -> Option<&str> {
        self.tenant_user()
            .and_then(Linked::populated)
            .map(|u| u.name.as_str())
            .filter(|n| !n.trim().is_empty())
    }

    pub fn property_name(&self) -> Option<&str> {
        self.property
            .as_ref()
            .and_then(Linked::populated)
            .map(|p| p.name.as_str())
            .filter(|n| !n.trim().is_empty())
    }

    pub fn method_label(&self) -> &'static str {
        self.method
            .map(|m| m.label())
            .unwrap_or(format::NOT_AVAILABLE)
    }

    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref().filter(|r| !r.trim().is_empty())
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref().filter(|n| !n.trim().is_empty())
    }
}

/// Revenue for one payment method, as grouped by `/payments/stats`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MethodTotal {
    #[serde(rename = "_id", deserialize_with = "lenient_string")]
    pub method: String,
    #[serde(deserialize_with = "lenient_number")]
    pub count: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub total: f64,
}

/// `/payments/stats`. The zero value stands in when the backend can't
/// produce one.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentStats {
    #[serde(deserialize_with = "lenient_number")]
    pub monthly_revenue: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub yearly_revenue: f64,
    pub payment_methods: Vec<MethodTotal>,
}

/// `/payments/my-status`: where the signed-in tenant stands.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TenantPaymentStatus {
    #[serde(deserialize_with = "lenient_date")]
    pub next_due_date: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient_number")]
    pub amount_due: f64,
    pub last_payment: Option<Payment>,
    #[serde(deserialize_with = "lenient_string")]
    pub status: String,
}

/// The owner's record/edit form. Everything arrives as text.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PaymentForm {
    /// Only present when recording; edits keep the original lease.
    pub tenant: String,
    pub amount: String,
    pub method: String,
    pub month: String,
    pub status: String,
    pub reference: String,
    pub notes: String,
}

/// The tenant's pay-now form. The card fields in the markup are never
/// deserialized; nothing is charged.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PayNowForm {
    pub amount: String,
    pub method: String,
    pub reference: String,
}

/// Body of `POST /payments` and `PUT /payments/:id`.
#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_id: Option<String>,
    pub amount: f64,
    pub method: PaymentMethod,
    pub month: String,
    pub status: PaymentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

pub const REQUIRED_FIELDS: &str = "Please fill all required fields";
pub const INVALID_AMOUNT: &str = "Please enter a valid amount";
pub const SELECT_TENANT: &str = "Please select a tenant";
pub const SELECT_METHOD: &str = "Please select a payment method";

fn optional(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn amount(raw: &str) -> Result<f64, &'static str> {
    if raw.trim().is_empty() {
        return Err(REQUIRED_FIELDS);
    }
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|a| a.is_finite() && *a > 0.0)
        .ok_or(INVALID_AMOUNT)
}

/// `YYYY-MM`
fn is_month(raw: &str) -> bool {
    raw.len() == 7
        && NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d").is_ok()
}

impl PaymentForm {
    /// The tenant and property are filled in by the caller, which has to look
    /// the lease up.
    pub fn validate(&self) -> Result<PaymentDraft, &'static str> {
        let amount = amount(&self.amount)?;
        let method = PaymentMethod::parse(&self.method).ok_or(REQUIRED_FIELDS)?;
        let month = self.month.trim();
        if !is_month(month) {
            return Err(REQUIRED_FIELDS);
        }
        let status = PaymentStatus::parse(&self.status).ok_or(REQUIRED_FIELDS)?;
        Ok(PaymentDraft {
            tenant_id: None,
            property_id: None,
            amount,
            method,
            month: month.to_string(),
            status,
            reference: optional(&self.reference),
            notes: optional(&self.notes),
            due_date: None,
        })
    }
}

impl PayNowForm {
    /// A successful pay-now is recorded as a paid payment for the month
    /// containing `today`.
    pub fn validate(&self, today: NaiveDate) -> Result<PaymentDraft, &'static str> {
        let amount = amount(&self.amount)?;
        let method = PaymentMethod::parse(&self.method)
            .filter(|m| PaymentMethod::ONLINE.contains(m))
            .ok_or(SELECT_METHOD)?;
        Ok(PaymentDraft {
            tenant_id: None,
            property_id: None,
            amount,
            method,
            month: format::month_value(today),
            status: PaymentStatus::Paid,
            reference: optional(&self.reference),
            notes: None,
            due_date: None,
        })
    }
}

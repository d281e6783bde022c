use super::{api::Backend, crypto::Signer};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::{fmt::Display, sync::Arc};

#[derive(Clone, Debug)]
pub struct AppState {
    pub backend: Arc<dyn Backend>,
    pub signer: Signer,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Owner,
    Tenant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Owner => "owner",
            Role::Tenant => "tenant",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The signed-in user, as returned by `/auth/login`, `/auth/register` and
/// `/auth/profile`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "_id", alias = "userId")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub role: Role,
    #[serde(default, deserialize_with = "lenient_date")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A user as it appears when populated inside another document (a tenant's
/// `user`, for example). The backend does not always include the role.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    #[serde(alias = "_id", alias = "userId")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

pub trait Identified {
    fn id(&self) -> &str;
}

impl Identified for UserSummary {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A reference to another document. The backend sends either the bare id or
/// the populated document, depending on the endpoint.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Linked<T> {
    Populated(T),
    Id(String),
}

impl<T: Identified> Linked<T> {
    pub fn id(&self) -> &str {
        match self {
            Linked::Populated(doc) => doc.id(),
            Linked::Id(id) => id,
        }
    }
}

impl<T> Linked<T> {
    pub fn populated(&self) -> Option<&T> {
        match self {
            Linked::Populated(doc) => Some(doc),
            Linked::Id(_) => None,
        }
    }
}

/// Free-text fields such as `area` or `unit` come back as strings or as
/// numbers depending on who created the document.
pub fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    })
}

/// Amounts typed into a form are sometimes stored as strings.
pub fn lenient_number<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Number(n) => n.as_f64().unwrap_or_default(),
        Value::String(s) => s.trim().parse().unwrap_or_default(),
        _ => 0.0,
    })
}

/// Dates arrive as full RFC 3339 timestamps, as bare `YYYY-MM-DD` dates
/// from `<input type="date">`, or not at all. Anything unparseable is
/// treated as missing.
pub fn lenient_date<'de, D: Deserializer<'de>>(
    d: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    let Some(raw) = Option::<String>::deserialize(d)? else {
        return Ok(None);
    };
    if let Ok(at) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(at.with_timezone(&Utc)));
    }
    Ok(NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|d| d.and_utc()))
}

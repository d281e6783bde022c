use crate::models::{lenient_number, lenient_string, Identified, Linked, UserSummary};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip_code: String,
}

impl Address {
    /// `12 Elm St, Springfield, IL 62704`
    pub fn one_line(&self) -> String {
        format!(
            "{}, {}, {} {}",
            self.street, self.city, self.state, self.zip_code
        )
    }
}

fn available_by_default() -> bool {
    true
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub rent: f64,
    #[serde(default)]
    pub address: Address,
    #[serde(default, deserialize_with = "lenient_number")]
    pub bedrooms: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub bathrooms: f64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub area: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default = "available_by_default")]
    pub is_available: bool,
    #[serde(default)]
    pub owner: Option<Linked<UserSummary>>,
}

impl Identified for Property {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A property as populated inside a tenant, payment or application.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRef {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub rent: Option<f64>,
    #[serde(default)]
    pub address: Option<Address>,
}

impl Identified for PropertyRef {
    fn id(&self) -> &str {
        &self.id
    }
}

/// The property form as the browser posts it. Everything arrives as text.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PropertyForm {
    pub name: String,
    pub rent: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub bedrooms: String,
    pub bathrooms: String,
    pub area: String,
    pub description: String,
    pub features: String,
}

/// What `POST /properties` and `PUT /properties/:id` take.
#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDraft {
    pub name: String,
    pub address: Address,
    pub rent: f64,
    pub bedrooms: f64,
    pub bathrooms: f64,
    pub area: String,
    pub description: String,
    pub features: Vec<String>,
}

pub const REQUIRED_FIELDS: &str = "Please fill all required fields";

fn positive(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| *n > 0.0)
}

fn required(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl PropertyForm {
    pub fn validate(&self) -> Result<PropertyDraft, &'static str> {
        let draft = (|| {
            Some(PropertyDraft {
                name: required(&self.name)?,
                rent: positive(&self.rent)?,
                address: Address {
                    street: required(&self.street)?,
                    city: required(&self.city)?,
                    state: required(&self.state)?,
                    zip_code: required(&self.zip_code)?,
                },
                bedrooms: positive(&self.bedrooms)?,
                bathrooms: positive(&self.bathrooms)?,
                area: required(&self.area)?,
                description: self.description.trim().to_string(),
                features: self
                    .features
                    .split(',')
                    .map(str::trim)
                    .filter(|f| !f.is_empty())
                    .map(str::to_string)
                    .collect(),
            })
        })();
        draft.ok_or(REQUIRED_FIELDS)
    }
}

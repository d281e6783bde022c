use crate::{
    models::{lenient_date, Identified, Linked},
    properties::models::PropertyRef,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "type")]
    pub doc_type: String,
    #[serde(default)]
    pub property: Option<Linked<PropertyRef>>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, alias = "createdAt", deserialize_with = "lenient_date")]
    pub uploaded_at: Option<DateTime<Utc>>,
}

impl Identified for Document {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Document {
    pub fn property_name(&self) -> Option<&str> {
        self.property
            .as_ref()
            .and_then(Linked::populated)
            .map(|p| p.name.as_str())
            .filter(|n| !n.trim().is_empty())
    }

    /// The url, if it is one a browser can safely open from a link.
    pub fn link(&self) -> Option<&str> {
        self.url.as_deref().map(str::trim).filter(|u| {
            u.starts_with("https://") || u.starts_with("http://") || u.starts_with('/')
        })
    }
}

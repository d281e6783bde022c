//! The load half of every manager. A [`Listing`] is the list the backend
//! returned, or an empty list plus the toast explaining why.

use super::{
    api::ApiError,
    components::{with_toast, Component, Notification},
    errors::ServerError,
    models::Identified,
};

#[derive(Debug)]
pub struct Listing<T> {
    pub items: Vec<T>,
    pub toast: Option<Notification>,
    what: &'static str,
}

impl<T> Listing<T> {
    /// `what` is the plural noun used in the toast, i.e, `"properties"`.
    pub fn new(result: Result<Vec<T>, ApiError>, what: &'static str) -> Self {
        match result {
            Ok(items) => Self {
                items,
                toast: None,
                what,
            },
            Err(e) => {
                tracing::error!(error = %e, what, "falling back to empty list");
                Self {
                    items: Vec::new(),
                    toast: Some(Notification::error(format!(
                        "Error loading {what}"
                    ))),
                    what,
                }
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Render `body` (built from the items) with the load toast, if any,
    /// riding along.
    pub fn respond(&self, body: &dyn Component) -> String {
        with_toast(body, self.toast.as_ref())
    }
}

impl<T: Identified> Listing<T> {
    pub fn find(&self, id: &str) -> Result<&T, ServerError> {
        self.items
            .iter()
            .find(|item| item.id() == id)
            .ok_or(ServerError::NotFound(self.what))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserSummary;

    fn summary(id: &str) -> UserSummary {
        UserSummary {
            id: id.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_failure_falls_back_to_empty_with_toast() {
        let listing: Listing<UserSummary> = Listing::new(
            Err(ApiError::Transport("timeout".into())),
            "tenants",
        );
        assert!(listing.is_empty());
        assert_eq!(
            listing.toast,
            Some(Notification::error("Error loading tenants"))
        );
        let html = listing.respond(&"<table></table>".to_string());
        assert!(html.starts_with("<table></table>"));
        assert!(html.contains("Error loading tenants"));
    }

    #[test]
    fn test_find_by_id() {
        let listing = Listing::new(Ok(vec![summary("a"), summary("b")]), "users");
        assert!(listing.toast.is_none());
        assert_eq!(listing.find("b").map(|u| u.id.as_str()).ok(), Some("b"));
        assert!(matches!(
            listing.find("zzz"),
            Err(ServerError::NotFound("users"))
        ));
    }
}

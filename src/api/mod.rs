//! Plumbing for the SmartRent REST backend.
//!
//! Every endpoint answers with a JSON envelope of the form
//! `{ "success": bool, "message": "...", "<payload key>": ... }`. The
//! [`Backend`] trait is the transport; [`call`] unwraps the envelope into a
//! [`Reply`] from which the feature modules pull their payloads.

pub mod http;
#[cfg(test)]
pub mod stub;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use std::fmt::Debug;
use thiserror::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

#[derive(Clone, Debug)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the API base, i.e, `/properties/my-properties`
    pub path: String,
    pub token: Option<String>,
    pub body: Option<Value>,
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            token: None,
            body: None,
        }
    }
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Attach `Authorization: Bearer <token>`.
    pub fn bearer(mut self, token: Option<&str>) -> Self {
        self.token = token.map(str::to_string);
        self
    }

    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self, ApiError> {
        self.body = Some(
            serde_json::to_value(body)
                .map_err(|e| ApiError::Decode(e.to_string()))?,
        );
        Ok(self)
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("could not reach the server: {0}")]
    Transport(String),
    /// The backend answered `success: false`; the message is user-facing.
    #[error("{message}")]
    Rejected { message: String },
    #[error("unexpected response from the server: {0}")]
    Decode(String),
}

#[async_trait]
pub trait Backend: Debug + Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError>;
}

/// The unwrapped body of a successful envelope.
#[derive(Debug)]
pub struct Reply {
    pub message: Option<String>,
    fields: Map<String, Value>,
}

impl Reply {
    pub fn from_value(value: Value) -> Result<Self, ApiError> {
        let Value::Object(mut fields) = value else {
            return Err(ApiError::Decode("envelope is not an object".into()));
        };
        let message = match fields.remove("message") {
            Some(Value::String(m)) => Some(m),
            _ => None,
        };
        let success = matches!(fields.remove("success"), Some(Value::Bool(true)));
        if success {
            Ok(Self { message, fields })
        } else {
            Err(ApiError::Rejected {
                message: message.unwrap_or_else(|| "Request failed".into()),
            })
        }
    }

    /// Take a required payload field.
    pub fn take<T: DeserializeOwned>(&mut self, key: &str) -> Result<T, ApiError> {
        let value = self
            .fields
            .remove(key)
            .ok_or_else(|| ApiError::Decode(format!("missing `{key}`")))?;
        serde_json::from_value(value)
            .map_err(|e| ApiError::Decode(format!("`{key}`: {e}")))
    }

    /// Take a list payload; an absent or null list is an empty one.
    pub fn take_list<T: DeserializeOwned>(
        &mut self,
        key: &str,
    ) -> Result<Vec<T>, ApiError> {
        match self.fields.remove(key) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(value) => serde_json::from_value(value)
                .map_err(|e| ApiError::Decode(format!("`{key}`: {e}"))),
        }
    }

    pub fn message_or(&self, fallback: &str) -> String {
        self.message
            .clone()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| fallback.to_string())
    }
}

pub async fn call(
    backend: &dyn Backend,
    request: ApiRequest,
) -> Result<Reply, ApiError> {
    let path = request.path.clone();
    let value = backend.send(request).await?;
    let reply = Reply::from_value(value);
    if let Err(e) = &reply {
        tracing::warn!(%path, error = %e, "backend rejected request");
    }
    reply
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reply_requires_success_flag() {
        let err = Reply::from_value(json!({
            "success": false,
            "message": "Invalid credentials"
        }))
        .unwrap_err();
        assert_eq!(
            err,
            ApiError::Rejected {
                message: "Invalid credentials".into()
            }
        );
        assert_eq!(err.to_string(), "Invalid credentials");

        let err = Reply::from_value(json!({"properties": []})).unwrap_err();
        assert_eq!(
            err,
            ApiError::Rejected {
                message: "Request failed".into()
            }
        );
    }

    #[test]
    fn test_missing_list_is_empty() {
        let mut reply =
            Reply::from_value(json!({"success": true})).expect("reply");
        let list: Vec<String> = reply.take_list("requests").expect("list");
        assert!(list.is_empty());

        let mut reply =
            Reply::from_value(json!({"success": true, "requests": null}))
                .expect("reply");
        let list: Vec<String> = reply.take_list("requests").expect("list");
        assert!(list.is_empty());
    }

    #[test]
    fn test_take_reports_missing_field() {
        let mut reply = Reply::from_value(json!({
            "success": true,
            "message": "Login successful"
        }))
        .expect("reply");
        assert_eq!(reply.message_or("fallback"), "Login successful");
        assert!(matches!(
            reply.take::<String>("token"),
            Err(ApiError::Decode(_))
        ));
    }

    #[test]
    fn test_non_object_envelope_is_a_decode_error() {
        assert!(matches!(
            Reply::from_value(json!([1, 2, 3])),
            Err(ApiError::Decode(_))
        ));
    }
}

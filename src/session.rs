use super::{crypto::Signer, models::User};
use axum::http::{HeaderMap, HeaderValue};
use base64::{engine::general_purpose, Engine as _};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use thiserror::Error;

pub const COOKIE_NAME: &str = "session";
pub const FLASH_COOKIE_NAME: &str = "flash";

/// HMAC-secured session string holding the bearer token and user record the
/// REST backend handed us at login.
///
/// Note: since this guy is stored in a browser cookie, it's important to
/// ensure it does not get too large.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("invalid session")]
    Malformed,
    #[error("cannot base64 decode the session")]
    Encoding,
    #[error("failed to validate session signature")]
    Signature,
    #[error("cannot deserialize session JSON")]
    Json,
}

/// `<b64 payload>:<b64 digest>`
fn sign(signer: &Signer, payload: &[u8]) -> String {
    let b64 = general_purpose::STANDARD_NO_PAD.encode(payload);
    let raw_digest = signer.digest(b64.as_bytes());
    let digest = general_purpose::STANDARD_NO_PAD.encode(raw_digest);

    format!("{b64}:{digest}")
}

fn verify(signer: &Signer, value: &str) -> Result<Vec<u8>, SessionError> {
    let (b64_payload, b64_digest) =
        value.split_once(':').ok_or(SessionError::Malformed)?;
    if b64_digest.contains(':') {
        return Err(SessionError::Malformed);
    }
    let digest = general_purpose::STANDARD_NO_PAD
        .decode(b64_digest)
        .map_err(|_| SessionError::Encoding)?;
    if !signer.is_valid(b64_payload.as_bytes(), &digest) {
        return Err(SessionError::Signature);
    }
    general_purpose::STANDARD_NO_PAD
        .decode(b64_payload)
        .map_err(|_| SessionError::Encoding)
}

pub fn serialize_session(signer: &Signer, session: &Session) -> String {
    let json_bytes = serde_json::to_string(&session)
        .expect("session can be JSON serialized");
    sign(signer, json_bytes.as_bytes())
}

pub fn deserialize_session(
    signer: &Signer,
    cookie: &str,
) -> Result<Session, SessionError> {
    let json = verify(signer, cookie)?;
    serde_json::from_slice(&json).map_err(|_| SessionError::Json)
}

/// Pull the raw value of cookie `name` out of the request headers, if any.
fn cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"(?:^|;\s*)([^=;\s]+)=([^;]*)").expect("valid regex")
    });
    headers
        .get_all("Cookie")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|cookie| re.captures_iter(cookie))
        .find(|c| c.get(1).map(|m| m.as_str()) == Some(name))
        .and_then(|c| c.get(2))
        .map(|m| m.as_str())
        .filter(|v| !v.is_empty())
}

pub fn session_cookie(headers: &HeaderMap) -> Option<&str> {
    cookie(headers, COOKIE_NAME)
}

pub fn set_cookie_header(signer: &Signer, session: &Session) -> HeaderMap {
    let value = format!(
        "{COOKIE_NAME}={}; Path=/; HttpOnly; SameSite=Lax",
        serialize_session(signer, session)
    );
    let mut headers = HeaderMap::new();
    headers.insert(
        "Set-Cookie",
        HeaderValue::from_str(&value)
            .expect("base64 session cookie is a valid header value"),
    );
    headers
}

pub fn clear_cookie_header() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        "Set-Cookie",
        HeaderValue::from_static(
            "session=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
        ),
    );
    headers
}

/// A one-shot message that survives a redirect; shown as a toast on the next
/// full page and then cleared.
pub fn set_flash_header(signer: &Signer, message: &str) -> HeaderMap {
    let value = format!(
        "{FLASH_COOKIE_NAME}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age=60",
        sign(signer, message.as_bytes())
    );
    let mut headers = HeaderMap::new();
    headers.insert(
        "Set-Cookie",
        HeaderValue::from_str(&value)
            .expect("base64 flash cookie is a valid header value"),
    );
    headers
}

pub fn flash_message(signer: &Signer, headers: &HeaderMap) -> Option<String> {
    let bytes = verify(signer, cookie(headers, FLASH_COOKIE_NAME)?).ok()?;
    String::from_utf8(bytes).ok()
}

pub fn clear_flash_header() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        "Set-Cookie",
        HeaderValue::from_static(
            "flash=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
        ),
    );
    headers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn get_session() -> Session {
        Session {
            token: "tok-123".to_string(),
            user: User {
                id: "u1".to_string(),
                name: "Jack".to_string(),
                email: "jack@jack.com".to_string(),
                phone: None,
                role: Role::Tenant,
                created_at: None,
            },
        }
    }

    #[test]
    fn test_session_survives_signing() {
        let signer = Signer::new("foo");
        let cookie = serialize_session(&signer, &get_session());
        let result = deserialize_session(&signer, &cookie).expect("session");
        assert_eq!(result.user, get_session().user);
        assert_eq!(result.token, "tok-123");
    }

    #[test]
    fn test_tampered_session_is_rejected() {
        let signer = Signer::new("foo");
        let cookie = serialize_session(&signer, &get_session());
        let (_, digest) = cookie.split_once(':').expect("two parts");
        let mut forged = get_session();
        forged.user.role = Role::Owner;
        let forged_json =
            serde_json::to_string(&forged).expect("serializable");
        let forged_b64 = general_purpose::STANDARD_NO_PAD.encode(forged_json);

        assert_eq!(
            deserialize_session(&signer, &format!("{forged_b64}:{digest}"))
                .unwrap_err(),
            SessionError::Signature
        );
        assert_eq!(
            deserialize_session(&Signer::new("bar"), &cookie).unwrap_err(),
            SessionError::Signature
        );
    }

    #[test]
    fn test_malformed_session_is_rejected() {
        let signer = Signer::new("foo");
        assert_eq!(
            deserialize_session(&signer, "no-separator").unwrap_err(),
            SessionError::Malformed
        );
        assert_eq!(
            deserialize_session(&signer, "a:b:c").unwrap_err(),
            SessionError::Malformed
        );
        assert_eq!(
            deserialize_session(&signer, "abc:!!!").unwrap_err(),
            SessionError::Encoding
        );
    }

    #[test]
    fn test_session_cookie_is_found_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "Cookie",
            HeaderValue::from_static("theme=dark; session=abc:def; other=1"),
        );
        assert_eq!(session_cookie(&headers), Some("abc:def"));

        let mut headers = HeaderMap::new();
        headers.insert("Cookie", HeaderValue::from_static("mysession=nope"));
        assert_eq!(session_cookie(&headers), None);
    }

    #[test]
    fn test_flash_round_trips_and_rejects_forgery() {
        let signer = Signer::new("foo");
        let set = set_flash_header(&signer, "Welcome back!");
        let set = set
            .get("Set-Cookie")
            .and_then(|v| v.to_str().ok())
            .expect("flash set");
        assert!(set.contains("Max-Age=60"));
        let pair = set.split(';').next().expect("name=value");

        let mut headers = HeaderMap::new();
        headers.insert(
            "Cookie",
            HeaderValue::from_str(&format!("session=x:y; {pair}"))
                .expect("header"),
        );
        assert_eq!(
            flash_message(&signer, &headers).as_deref(),
            Some("Welcome back!")
        );
        assert_eq!(flash_message(&Signer::new("bar"), &headers), None);

        let forged = general_purpose::STANDARD_NO_PAD.encode("Pay me");
        let mut headers = HeaderMap::new();
        headers.insert(
            "Cookie",
            HeaderValue::from_str(&format!("flash={forged}:abc"))
                .expect("header"),
        );
        assert_eq!(flash_message(&signer, &headers), None);
    }
}

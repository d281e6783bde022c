use crate::{
    api::{call, ApiError, ApiRequest, Backend, Reply},
    models::{Role, User},
    session::Session,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Credentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct Registration<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub role: Role,
    pub phone: &'a str,
}

/// A session plus the backend's greeting (`"Login successful"`, ...).
#[derive(Debug)]
pub struct SignedIn {
    pub session: Session,
    pub message: String,
}

fn signed_in(mut reply: Reply, fallback: &str) -> Result<SignedIn, ApiError> {
    let token = reply.take("token")?;
    let user = reply.take("user")?;
    Ok(SignedIn {
        message: reply.message_or(fallback),
        session: Session { token, user },
    })
}

pub async fn login(
    backend: &dyn Backend,
    credentials: &Credentials<'_>,
) -> Result<SignedIn, ApiError> {
    let reply =
        call(backend, ApiRequest::post("/auth/login").json(credentials)?)
            .await?;
    signed_in(reply, "Login successful")
}

pub async fn register(
    backend: &dyn Backend,
    registration: &Registration<'_>,
) -> Result<SignedIn, ApiError> {
    let reply = call(
        backend,
        ApiRequest::post("/auth/register").json(registration)?,
    )
    .await?;
    signed_in(reply, "Registration successful!")
}

pub async fn profile(backend: &dyn Backend, token: &str) -> Result<User, ApiError> {
    let mut reply =
        call(backend, ApiRequest::get("/auth/profile").bearer(Some(token)))
            .await?;
    reply.take("user")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{stub::StubBackend, Method};
    use serde_json::json;

    #[tokio::test]
    async fn test_login_builds_session() {
        let backend = StubBackend::new().reply(
            Method::Post,
            "/auth/login",
            json!({
                "success": true,
                "message": "Login successful",
                "token": "jwt",
                "user": {"id": "u1", "name": "Ann", "email": "a@b.c", "role": "tenant"}
            }),
        );
        let result = login(
            &backend,
            &Credentials {
                email: "a@b.c",
                password: "pw",
            },
        )
        .await
        .expect("signed in");
        assert_eq!(result.session.token, "jwt");
        assert_eq!(result.session.user.role, Role::Tenant);
        assert_eq!(result.message, "Login successful");

        let sent = backend
            .last_request(Method::Post, "/auth/login")
            .expect("request sent");
        assert_eq!(sent.body, Some(json!({"email": "a@b.c", "password": "pw"})));
        assert!(sent.token.is_none());
    }

    #[tokio::test]
    async fn test_register_sends_role_lowercase() {
        let backend = StubBackend::new().reply(
            Method::Post,
            "/auth/register",
            json!({
                "success": true,
                "token": "jwt",
                "user": {"_id": "u2", "name": "Bo", "email": "b@b.c", "role": "owner"}
            }),
        );
        let result = register(
            &backend,
            &Registration {
                name: "Bo",
                email: "b@b.c",
                password: "pw",
                role: Role::Owner,
                phone: "",
            },
        )
        .await
        .expect("registered");
        assert_eq!(result.message, "Registration successful!");
        let sent = backend
            .last_request(Method::Post, "/auth/register")
            .expect("request sent");
        assert_eq!(sent.body.as_ref().and_then(|b| b.get("role")), Some(&json!("owner")));
    }

    #[tokio::test]
    async fn test_profile_sends_bearer_token() {
        let backend = StubBackend::new().reply(
            Method::Get,
            "/auth/profile",
            json!({
                "success": true,
                "user": {"id": "u1", "name": "Ann", "email": "a@b.c", "role": "tenant"}
            }),
        );
        let user = profile(&backend, "jwt").await.expect("profile");
        assert_eq!(user.name, "Ann");
        let sent = backend
            .last_request(Method::Get, "/auth/profile")
            .expect("request sent");
        assert_eq!(sent.token.as_deref(), Some("jwt"));
    }
}

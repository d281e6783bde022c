use super::dashboard_for;
use crate::{
    components::{Component, Modal, ModalButton, Select},
    extractors::Viewer,
    format,
    models::{Role, User},
    routes::Route,
};
use ammonia::clean;

/// Navbar controls.
pub struct AuthButtons<'a> {
    pub viewer: &'a Viewer,
}
impl Component for AuthButtons<'_> {
    fn render(&self) -> String {
        let Some(user) = self.viewer.user() else {
            let login = ModalButton {
                href: Route::Login,
                class: "btn-outline",
                label: "Login",
            }
            .render();
            let register = ModalButton {
                href: Route::Register,
                class: "btn-primary",
                label: "Register",
            }
            .render();
            return format!("{login}{register}");
        };
        let dashboard = dashboard_for(user.role);
        let dashboard_label = match user.role {
            Role::Owner => "Dashboard",
            Role::Tenant => "My Dashboard",
        };
        let logout = Route::Logout;
        format!(
            r#"
            <span class="welcome">Welcome, {name}</span>
            <a class="btn btn-primary" href="{dashboard}">{dashboard_label}</a>
            <button class="btn btn-outline" hx-post="{logout}">Logout</button>
            "#,
            name = clean(&user.name)
        )
    }
}

pub struct LoginForm;
impl Component for LoginForm {
    fn render(&self) -> String {
        let login = Route::Login;
        let register = Route::Register;
        let form = format!(
            r##"
            <form id="loginForm" hx-post="{login}" hx-swap="none">
                <div class="form-group">
                    <label for="email">Email</label>
                    <input type="email" id="email" name="email" required />
                </div>
                <div class="form-group">
                    <label for="password">Password</label>
                    <input type="password" id="password" name="password" required />
                </div>
                <button type="submit" class="btn btn-primary btn-full">Login</button>
                <p class="form-switch">
                    Don't have an account?
                    <a hx-get="{register}" hx-target="#modal-root" href="{register}">Register here</a>
                </p>
            </form>
            "##
        );
        Modal {
            id: "loginModal",
            title: "Login",
            children: Box::new(form),
            footer: None,
        }
        .render()
    }
}

pub struct RegisterForm;
impl Component for RegisterForm {
    fn render(&self) -> String {
        let register = Route::Register;
        let login = Route::Login;
        let role = Select {
            name: "role",
            placeholder: Some("Select role"),
            options: vec![
                ("tenant".into(), "Tenant".into()),
                ("owner".into(), "Property Owner".into()),
            ],
            selected: None,
        }
        .render();
        let form = format!(
            r##"
            <form id="registerForm" hx-post="{register}" hx-swap="none">
                <div class="form-group">
                    <label for="name">Full Name *</label>
                    <input type="text" id="name" name="name" required />
                </div>
                <div class="form-group">
                    <label for="email">Email *</label>
                    <input type="email" id="email" name="email" required />
                </div>
                <div class="form-group">
                    <label for="phone">Phone</label>
                    <input type="tel" id="phone" name="phone" />
                </div>
                <div class="form-group">
                    <label for="password">Password *</label>
                    <input type="password" id="password" name="password" required />
                </div>
                <div class="form-group">
                    <label for="role">I am a *</label>
                    {role}
                </div>
                <button type="submit" class="btn btn-primary btn-full">Register</button>
                <p class="form-switch">
                    Already have an account?
                    <a hx-get="{login}" hx-target="#modal-root" href="{login}">Login here</a>
                </p>
            </form>
            "##
        );
        Modal {
            id: "registerModal",
            title: "Create Account",
            children: Box::new(form),
            footer: None,
        }
        .render()
    }
}

pub struct Profile<'a> {
    pub user: &'a User,
}
impl Component for Profile<'_> {
    fn render(&self) -> String {
        let user = self.user;
        format!(
            r#"
            <div class="dashboard-section">
                <div class="section-header"><h3>My Profile</h3></div>
                <div class="profile-info">
                    <p><strong>Name:</strong> {name}</p>
                    <p><strong>Email:</strong> {email}</p>
                    <p><strong>Phone:</strong> {phone}</p>
                    <p><strong>Role:</strong> {role}</p>
                </div>
            </div>
            "#,
            name = clean(format::or_na(Some(user.name.as_str()))),
            email = clean(format::or_na(Some(user.email.as_str()))),
            phone = clean(format::or_na(user.phone.as_deref())),
            role = user.role,
        )
    }
}

// In many cases, we need to do a let binding to satisfy the borrow checker
// and for some reason, clippy identifies those as unnecessary.
#![allow(clippy::let_and_return)]

use super::{
    auth::components::AuthButtons, config::NOTIFICATION_TTL_MS,
    extractors::Viewer, routes::Route,
};
use ammonia::{clean, clean_text};
use std::sync::atomic::{AtomicU64, Ordering};

pub trait Component {
    /// Render the component to a HTML string. By convention, the
    /// implementation should sanitize all string properties at render-time
    fn render(&self) -> String;
}

impl Component for String {
    fn render(&self) -> String {
        self.clone()
    }
}

/// Id of the element modals are swapped into.
pub const MODAL_ROOT: &str = "modal-root";

pub struct Page<'a> {
    pub title: &'a str,
    pub viewer: &'a Viewer,
    pub children: Box<dyn Component + 'a>,
}

impl Component for Page<'_> {
    fn render(&self) -> String {
        let stylesheet = Route::Stylesheet;
        let home = Route::Root;
        let flash = Route::Flash;
        let auth_buttons = AuthButtons {
            viewer: self.viewer,
        }
        .render();
        format!(
            r#"<!DOCTYPE html>
            <html>
                <head>
                    <meta name="viewport" content="width=device-width, initial-scale=1.0"></meta>
                    <title>{title} | SmartRent</title>
                    <link rel="stylesheet" href="{stylesheet}" />
                    <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.4.0/css/all.min.css" />
                    <script src="https://unpkg.com/htmx.org@1.9.6"></script>
                </head>
                <body hx-boost="true">
                    <header class="navbar">
                        <a class="logo" href="{home}">SmartRent</a>
                        <div class="auth-buttons">{auth_buttons}</div>
                    </header>
                    <div id="notifications" hx-get="{flash}" hx-trigger="load" hx-swap="none"></div>
                    <div id="{MODAL_ROOT}"></div>
                    {body_html}
                </body>
            </html>
            "#,
            title = clean(self.title),
            body_html = self.children.render()
        )
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Error,
}

impl NotificationKind {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// A toast. It is rendered as an out-of-band swap of `#notifications`, so
/// showing one replaces whatever toast was already there.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Info,
        }
    }
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Success,
        }
    }
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Error,
        }
    }
}

static NEXT_NOTIFICATION: AtomicU64 = AtomicU64::new(0);

impl Component for Notification {
    fn render(&self) -> String {
        let id = NEXT_NOTIFICATION.fetch_add(1, Ordering::Relaxed);
        let kind = self.kind.as_str();
        let message = clean(&self.message);
        format!(
            r#"
            <div id="notifications" hx-swap-oob="true">
                <div id="notification-{id}" class="notification notification-{kind}" role="status">{message}</div>
                <script>
                    setTimeout(() => document.getElementById("notification-{id}")?.remove(), {NOTIFICATION_TTL_MS});
                </script>
            </div>
            "#
        )
    }
}

/// Append a toast to a fragment.
pub fn with_toast(body: &dyn Component, toast: Option<&Notification>) -> String {
    let mut html = body.render();
    if let Some(t) = toast {
        html.push_str(&t.render());
    }
    html
}

pub struct Modal<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub children: Box<dyn Component + 'a>,
    pub footer: Option<Box<dyn Component + 'a>>,
}

impl Component for Modal<'_> {
    fn render(&self) -> String {
        let id = clean_text(self.id);
        let title = clean(self.title);
        let body = self.children.render();
        let footer = self
            .footer
            .as_ref()
            .map(|f| format!(r#"<div class="modal-footer">{}</div>"#, f.render()))
            .unwrap_or_default();
        format!(
            r#"
            <div id="{id}" class="modal">
                <div class="modal-content scrollable-modal">
                    <div class="modal-header">
                        <h2>{title}</h2>
                        <span class="close" onclick="this.closest('.modal').remove()">&times;</span>
                    </div>
                    <div class="modal-body">{body}</div>
                    {footer}
                </div>
            </div>
            "#
        )
    }
}

/// Out-of-band swap that empties the modal root, closing whatever modal is
/// open.
pub struct CloseModal;
impl Component for CloseModal {
    fn render(&self) -> String {
        format!(r#"<div id="{MODAL_ROOT}" hx-swap-oob="true"></div>"#)
    }
}

/// A button that loads `href` into the modal root.
pub struct ModalButton<'a> {
    pub href: Route,
    pub class: &'a str,
    pub label: &'a str,
}
impl Component for ModalButton<'_> {
    fn render(&self) -> String {
        let href = &self.href;
        let class = self.class;
        let label = clean(self.label);
        format!(
            r##"<button class="btn {class}" hx-get="{href}" hx-target="#{MODAL_ROOT}" hx-swap="innerHTML">{label}</button>"##
        )
    }
}

pub struct CloseButton;
impl Component for CloseButton {
    fn render(&self) -> String {
        r#"<button type="button" class="btn btn-outline" onclick="this.closest('.modal').remove()">Close</button>"#
            .to_string()
    }
}

/// A container that loads itself from `href` and reloads whenever one of
/// `events` fires on the body. `events` is comma separated, the same way
/// `Hx-Trigger` lists them, and may be empty.
pub struct LiveList<'a> {
    pub id: &'a str,
    pub tag: &'a str,
    pub class: &'a str,
    pub href: Route,
    pub events: &'a str,
}
impl Component for LiveList<'_> {
    fn render(&self) -> String {
        let LiveList {
            id,
            tag,
            class,
            href,
            events,
        } = self;
        let trigger = std::iter::once("load".to_string())
            .chain(
                events
                    .split(',')
                    .map(str::trim)
                    .filter(|e| !e.is_empty())
                    .map(|e| format!("{e} from:body")),
            )
            .collect::<Vec<String>>()
            .join(", ");
        format!(
            r#"<{tag} id="{id}" class="{class}" hx-get="{href}" hx-trigger="{trigger}" hx-swap="innerHTML"></{tag}>"#
        )
    }
}

pub struct EmptyState<'a> {
    pub icon: &'a str,
    pub title: &'a str,
    pub message: &'a str,
    pub action: Option<Box<dyn Component + 'a>>,
}
impl Component for EmptyState<'_> {
    fn render(&self) -> String {
        let icon = self.icon;
        let title = clean(self.title);
        let message = clean(self.message);
        let action = self
            .action
            .as_ref()
            .map(|a| a.render())
            .unwrap_or_default();
        format!(
            r#"
            <div class="empty-state">
                <i class="fas {icon}"></i>
                <h3>{title}</h3>
                <p>{message}</p>
                {action}
            </div>
            "#
        )
    }
}

/// An [`EmptyState`] spanning a whole table.
pub struct EmptyRow<'a> {
    pub colspan: usize,
    pub state: EmptyState<'a>,
}
impl Component for EmptyRow<'_> {
    fn render(&self) -> String {
        format!(
            r#"<tr><td colspan="{}">{}</td></tr>"#,
            self.colspan,
            self.state.render()
        )
    }
}

pub struct StatusBadge<'a> {
    pub status: &'a str,
}
impl Component for StatusBadge<'_> {
    fn render(&self) -> String {
        let status = clean_text(self.status);
        format!(r#"<span class="status-badge status-{status}">{status}</span>"#)
    }
}

pub struct StatCard<'a> {
    pub icon: &'a str,
    pub value: String,
    pub label: &'a str,
}
impl Component for StatCard<'_> {
    fn render(&self) -> String {
        format!(
            r#"
            <div class="stat-card">
                <i class="fas {icon}"></i>
                <div class="stat-number">{value}</div>
                <div class="stat-label">{label}</div>
            </div>
            "#,
            icon = self.icon,
            value = clean(&self.value),
            label = clean(self.label),
        )
    }
}

/// `<strong>Label:</strong> value` inside a detail grid. The value is
/// rendered HTML.
pub struct DetailItem<'a> {
    pub label: &'a str,
    pub value: String,
}
impl Component for DetailItem<'_> {
    fn render(&self) -> String {
        format!(
            r#"<div class="detail-item"><strong>{}:</strong> {}</div>"#,
            clean(self.label),
            self.value
        )
    }
}

pub struct DetailSection<'a> {
    pub title: &'a str,
    pub items: Vec<DetailItem<'a>>,
}
impl Component for DetailSection<'_> {
    fn render(&self) -> String {
        let items = self
            .items
            .iter()
            .map(|i| i.render())
            .collect::<Vec<String>>()
            .join("");
        format!(
            r#"
            <div class="detail-section">
                <h3>{}</h3>
                <div class="detail-grid">{items}</div>
            </div>
            "#,
            clean(self.title)
        )
    }
}

/// `<select>` with the matching option selected.
pub struct Select<'a> {
    pub name: &'a str,
    pub placeholder: Option<&'a str>,
    pub options: Vec<(String, String)>,
    pub selected: Option<&'a str>,
}
impl Component for Select<'_> {
    fn render(&self) -> String {
        let name = clean_text(self.name);
        let placeholder = self
            .placeholder
            .map(|p| format!(r#"<option value="">{}</option>"#, clean(p)))
            .unwrap_or_default();
        let options = self
            .options
            .iter()
            .map(|(value, label)| {
                let selected = if Some(value.as_str()) == self.selected {
                    "selected"
                } else {
                    ""
                };
                format!(
                    r#"<option value="{}" {selected}>{}</option>"#,
                    clean_text(value),
                    clean(label)
                )
            })
            .collect::<Vec<String>>()
            .join("");
        format!(
            r#"<select id="{name}" name="{name}" required>{placeholder}{options}</select>"#
        )
    }
}

pub struct Home<'a> {
    pub viewer: &'a Viewer,
}
impl Component for Home<'_> {
    fn render(&self) -> String {
        let add_property = if self.viewer.is_owner() {
            ModalButton {
                href: Route::PropertyNew,
                class: "btn-primary",
                label: "Add Property",
            }
            .render()
        } else {
            "".to_string()
        };
        let properties = LiveList {
            id: "propertiesList",
            tag: "div",
            class: "properties-grid",
            href: Route::Properties,
            events: crate::properties::CHANGED,
        }
        .render();
        let contact = Route::Contact;
        format!(
            r##"
            <section class="hero">
                <h1>Smart Property Management</h1>
                <p>
                    SmartRent provides complete property management solutions
                    including tenant management, rent collection, maintenance
                    tracking, and financial reporting.
                </p>
                <a class="btn btn-primary" href="#properties">Get Started</a>
            </section>
            <section id="properties" class="container">
                <h2>Available Properties</h2>
                {add_property}
                {properties}
            </section>
            <section id="contact" class="container">
                <h2>Contact Us</h2>
                <form id="contactForm" hx-post="{contact}" hx-swap="none" hx-on::after-request="this.reset()">
                    <input type="text" name="name" placeholder="Your name" required />
                    <input type="email" name="email" placeholder="Your email" required />
                    <textarea name="message" rows="4" placeholder="Your message" required></textarea>
                    <button class="btn btn-primary">Send Message</button>
                </form>
            </section>
            "##
        )
    }
}

use super::models::{
    Payment, PaymentDraft, PaymentMethod, PaymentStats, PaymentStatus,
    TenantPaymentStatus,
};
use crate::{
    components::{
        CloseButton, Component, DetailItem, DetailSection, EmptyRow, EmptyState,
        Modal, ModalButton, Select, StatCard, StatusBadge,
    },
    extractors::Viewer,
    format::{self, MonthOption},
    routes::Route,
    tenants::models::Tenant,
};
use ammonia::{clean, clean_text};
use chrono::{DateTime, Utc};

/// Id of the dashboard's activity feed.
pub const RECENT_ACTIVITY: &str = "recentActivity";

pub struct PaymentRow<'a> {
    pub payment: &'a Payment,
    pub viewer: &'a Viewer,
}
impl Component for PaymentRow<'_> {
    fn render(&self) -> String {
        let payment = self.payment;
        let id = &payment.id;
        let view = ModalButton {
            href: Route::payment(id),
            class: "btn-outline btn-sm",
            label: "View",
        }
        .render();
        let amount = format::money(payment.amount);
        let paid_on = format::date(payment.payment_date.as_ref());
        let due = format::date(payment.due_date.as_ref());
        let month = clean(format::or_na(Some(payment.month.as_str())));
        let status = StatusBadge {
            status: payment.status.as_str(),
        }
        .render();
        let method = payment.method_label();
        if self.viewer.is_owner() {
            let edit = ModalButton {
                href: Route::PaymentEdit(Some(id.clone())),
                class: "btn-primary btn-sm",
                label: "Edit",
            }
            .render();
            format!(
                r#"
                <tr>
                    <td>{tenant}</td>
                    <td>{property}</td>
                    <td>{amount}</td>
                    <td>{paid_on}</td>
                    <td>{due}</td>
                    <td>{month}</td>
                    <td>{status}</td>
                    <td>{method}</td>
                    <td>{reference}</td>
                    <td><div class="action-buttons">{view}{edit}</div></td>
                </tr>
                "#,
                tenant = clean(format::or_na(payment.tenant_name())),
                property = clean(format::or_na(payment.property_name())),
                reference = clean(format::or_na(payment.reference())),
            )
        } else {
            let pay = if payment.status == PaymentStatus::Pending {
                ModalButton {
                    href: Route::PaymentPay(Some(id.clone())),
                    class: "btn-primary btn-sm",
                    label: "Pay",
                }
                .render()
            } else {
                "".to_string()
            };
            format!(
                r#"
                <tr>
                    <td>{property}</td>
                    <td>{amount}</td>
                    <td>{paid_on}</td>
                    <td>{due}</td>
                    <td>{month}</td>
                    <td>{status}</td>
                    <td>{method}</td>
                    <td><div class="action-buttons">{view}{pay}</div></td>
                </tr>
                "#,
                property = clean(format::or_na(payment.property_name())),
            )
        }
    }
}

/// Rows for `#paymentsList` (owners) or `#tenantPaymentsList` (tenants).
pub struct PaymentRows<'a> {
    pub payments: Vec<&'a Payment>,
    pub viewer: &'a Viewer,
}
impl Component for PaymentRows<'_> {
    fn render(&self) -> String {
        if self.payments.is_empty() {
            return if self.viewer.is_owner() {
                EmptyRow {
                    colspan: 10,
                    state: EmptyState {
                        icon: "fa-money-bill-wave",
                        title: "No Payments Found",
                        message: "No payment records available yet",
                        action: Some(Box::new(ModalButton {
                            href: Route::PaymentRecord,
                            class: "btn-primary",
                            label: "Record First Payment",
                        })),
                    },
                }
                .render()
            } else {
                EmptyRow {
                    colspan: 8,
                    state: EmptyState {
                        icon: "fa-money-bill-wave",
                        title: "No Payments Found",
                        message: "Your payment history will appear here",
                        action: Some(Box::new(ModalButton {
                            href: Route::PayNow,
                            class: "btn-primary",
                            label: "Make Your First Payment",
                        })),
                    },
                }
                .render()
            };
        }
        self.payments
            .iter()
            .map(|payment| {
                PaymentRow {
                    payment,
                    viewer: self.viewer,
                }
                .render()
            })
            .collect::<Vec<String>>()
            .join("")
    }
}

fn text_section(title: &str, text: Option<&str>) -> String {
    text.map(|t| {
        format!(
            r#"<div class="detail-section"><h3>{}</h3><p>{}</p></div>"#,
            clean(title),
            clean(t)
        )
    })
    .unwrap_or_default()
}

pub struct PaymentDetails<'a> {
    pub payment: &'a Payment,
    pub viewer: &'a Viewer,
}
impl Component for PaymentDetails<'_> {
    fn render(&self) -> String {
        let payment = self.payment;
        let info = DetailSection {
            title: "Payment Information",
            items: vec![
                DetailItem {
                    label: "Amount",
                    value: format::money(payment.amount),
                },
                DetailItem {
                    label: "Status",
                    value: StatusBadge {
                        status: payment.status.as_str(),
                    }
                    .render(),
                },
                DetailItem {
                    label: "Method",
                    value: payment.method_label().to_string(),
                },
                DetailItem {
                    label: "Month",
                    value: clean(format::or_na(Some(payment.month.as_str()))),
                },
            ],
        }
        .render();
        let dates = DetailSection {
            title: "Dates",
            items: vec![
                DetailItem {
                    label: "Payment Date",
                    value: format::date(payment.payment_date.as_ref()),
                },
                DetailItem {
                    label: "Due Date",
                    value: format::date(payment.due_date.as_ref()),
                },
            ],
        }
        .render();
        let reference = text_section("Reference", payment.reference());
        let notes = text_section("Notes", payment.notes());
        let edit = if self.viewer.is_owner() {
            ModalButton {
                href: Route::PaymentEdit(Some(payment.id.clone())),
                class: "btn-primary",
                label: "Edit Payment",
            }
            .render()
        } else {
            "".to_string()
        };
        let footer = format!(
            r#"<div class="modal-actions">{}{edit}</div>"#,
            CloseButton.render()
        );
        Modal {
            id: "viewPaymentModal",
            title: "Payment Details",
            children: Box::new(format!(
                r#"<div class="payment-details">{info}{dates}{reference}{notes}</div>"#
            )),
            footer: Some(Box::new(footer)),
        }
        .render()
    }
}

fn method_options(methods: &[PaymentMethod]) -> Vec<(String, String)> {
    methods
        .iter()
        .map(|m| (m.as_str().to_string(), m.label().to_string()))
        .collect()
}

/// Record a new payment, or correct an existing one.
pub struct PaymentFormModal<'a> {
    pub payment: Option<&'a Payment>,
    /// Leases to record against; unused when editing.
    pub tenants: &'a [Tenant],
    pub months: Vec<MonthOption>,
}
impl Component for PaymentFormModal<'_> {
    fn render(&self) -> String {
        let p = self.payment;
        let (title, submit_label, action) = match p {
            Some(p) => ("Update Payment", "Update Payment", Route::payment(&p.id)),
            None => ("Record New Payment", "Record Payment", Route::Payments),
        };
        let tenant = if p.is_none() {
            let select = Select {
                name: "tenant",
                placeholder: Some("Select Tenant"),
                options: self
                    .tenants
                    .iter()
                    .map(|t| {
                        (
                            t.id.clone(),
                            format!("{} ({})", t.name(), t.property_name()),
                        )
                    })
                    .collect(),
                selected: None,
            }
            .render();
            format!(
                r#"<div class="form-group"><label for="tenant">Tenant *</label>{select}</div>"#
            )
        } else {
            "".to_string()
        };
        let amount = p.map(|p| p.amount.to_string()).unwrap_or_default();
        let method = Select {
            name: "method",
            placeholder: Some("Select Method"),
            options: method_options(&PaymentMethod::ALL),
            selected: p.and_then(|p| p.method).map(|m| m.as_str()),
        }
        .render();
        let mut months: Vec<(String, String)> = self
            .months
            .iter()
            .map(|m| (m.value.clone(), m.label.clone()))
            .collect();
        // Keep an older payment's month selectable.
        if let Some(p) = p.filter(|p| !p.month.is_empty()) {
            if !months.iter().any(|(value, _)| *value == p.month) {
                months.insert(0, (p.month.clone(), p.month.clone()));
            }
        }
        let month = Select {
            name: "month",
            placeholder: Some("Select Month"),
            options: months,
            selected: p.map(|p| p.month.as_str()),
        }
        .render();
        let status = Select {
            name: "status",
            placeholder: None,
            options: PaymentStatus::ALL
                .iter()
                .map(|s| (s.as_str().to_string(), s.label().to_string()))
                .collect(),
            selected: p.map(|p| p.status.as_str()),
        }
        .render();
        let reference = p
            .and_then(|p| p.reference())
            .map(clean_text)
            .unwrap_or_default();
        let notes = p.and_then(|p| p.notes()).map(clean).unwrap_or_default();
        let form = format!(
            r#"
            <form id="paymentForm" hx-post="{action}" hx-swap="none">
                {tenant}
                <div class="form-row">
                    <div class="form-group">
                        <label for="paymentAmount">Amount ($) *</label>
                        <input type="number" id="paymentAmount" name="amount" value="{amount}" min="0" step="0.01" required />
                    </div>
                    <div class="form-group">
                        <label for="method">Payment Method *</label>
                        {method}
                    </div>
                </div>
                <div class="form-row">
                    <div class="form-group">
                        <label for="month">Month *</label>
                        {month}
                    </div>
                    <div class="form-group">
                        <label for="status">Status *</label>
                        {status}
                    </div>
                </div>
                <div class="form-group">
                    <label for="paymentReference">Reference Number</label>
                    <input type="text" id="paymentReference" name="reference" value="{reference}" placeholder="Check number, transaction ID, etc." />
                </div>
                <div class="form-group">
                    <label for="paymentNotes">Notes</label>
                    <textarea id="paymentNotes" name="notes" rows="3" placeholder="Any additional notes...">{notes}</textarea>
                </div>
                <div class="form-actions">
                    <button type="button" class="btn btn-outline" onclick="this.closest('.modal').remove()">Cancel</button>
                    <button type="submit" class="btn btn-primary">{submit_label}</button>
                </div>
            </form>
            "#
        );
        Modal {
            id: "recordPaymentModal",
            title,
            children: Box::new(form),
            footer: None,
        }
        .render()
    }
}

/// The tenant's "Make Payment" form. Card fields are shown for credit cards
/// but never leave the browser.
pub struct PayNowModal<'a> {
    pub amount_due: Option<f64>,
    pub due_date: Option<&'a DateTime<Utc>>,
}
impl Component for PayNowModal<'_> {
    fn render(&self) -> String {
        let action = Route::PayNow;
        let amount_due = self
            .amount_due
            .map(format::money)
            .unwrap_or_else(|| format::NOT_AVAILABLE.to_string());
        let due_date = format::date(self.due_date);
        let amount = self
            .amount_due
            .map(|a| format!("{a:.2}"))
            .unwrap_or_default();
        let methods = method_options(&PaymentMethod::ONLINE)
            .into_iter()
            .map(|(value, label)| {
                format!(
                    r#"<option value="{}">{}</option>"#,
                    clean_text(&value),
                    clean(&label)
                )
            })
            .collect::<Vec<String>>()
            .join("");
        let form = format!(
            r#"
            <form id="payNowForm" hx-post="{action}" hx-swap="none" hx-disabled-elt="find button[type='submit']">
                <div class="payment-summary">
                    <h3>Payment Details</h3>
                    <div class="summary-item"><span>Amount Due:</span><span class="amount">{amount_due}</span></div>
                    <div class="summary-item"><span>Due Date:</span><span>{due_date}</span></div>
                </div>
                <div class="form-group">
                    <label for="payAmount">Payment Amount ($) *</label>
                    <input type="number" id="payAmount" name="amount" value="{amount}" min="0" step="0.01" required />
                </div>
                <div class="form-group">
                    <label for="payMethod">Payment Method *</label>
                    <select
                        id="payMethod"
                        name="method"
                        required
                        onchange="document.getElementById('cardDetails').style.display = this.value === 'credit card' ? 'block' : 'none'"
                    >
                        <option value="">Select Method</option>
                        {methods}
                    </select>
                </div>
                <div class="form-group" id="cardDetails" style="display: none;">
                    <div class="form-row">
                        <div class="form-group">
                            <label for="cardNumber">Card Number</label>
                            <input type="text" id="cardNumber" placeholder="1234 5678 9012 3456" autocomplete="off" />
                        </div>
                        <div class="form-group">
                            <label for="cardExpiry">Expiry Date</label>
                            <input type="text" id="cardExpiry" placeholder="MM/YY" autocomplete="off" />
                        </div>
                        <div class="form-group">
                            <label for="cardCVC">CVC</label>
                            <input type="text" id="cardCVC" placeholder="123" autocomplete="off" />
                        </div>
                    </div>
                </div>
                <div class="form-group">
                    <label for="payReference">Reference (Optional)</label>
                    <input type="text" id="payReference" name="reference" placeholder="Transaction reference" />
                </div>
                <div class="form-actions">
                    <button type="button" class="btn btn-outline" onclick="this.closest('.modal').remove()">Cancel</button>
                    <button type="submit" class="btn btn-primary"><i class="fas fa-credit-card"></i> Process Payment</button>
                </div>
            </form>
            "#
        );
        Modal {
            id: "payNowModal",
            title: "Make Payment",
            children: Box::new(form),
            footer: None,
        }
        .render()
    }
}

/// The four cards under "Payment Statistics".
pub struct PaymentStatCards<'a> {
    pub stats: &'a PaymentStats,
    /// Percent of payments that are paid.
    pub collection_rate: f64,
}
impl Component for PaymentStatCards<'_> {
    fn render(&self) -> String {
        let cards = [
            StatCard {
                icon: "fa-calendar",
                value: format::money(self.stats.monthly_revenue),
                label: "This Month",
            },
            StatCard {
                icon: "fa-chart-bar",
                value: format::money(self.stats.yearly_revenue),
                label: "This Year",
            },
            StatCard {
                icon: "fa-credit-card",
                value: self.stats.payment_methods.len().to_string(),
                label: "Payment Methods",
            },
            StatCard {
                icon: "fa-percentage",
                value: format!("{:.0}%", self.collection_rate),
                label: "Collection Rate",
            },
        ]
        .iter()
        .map(|c| c.render())
        .collect::<Vec<String>>()
        .join("");
        let breakdown = self
            .stats
            .payment_methods
            .iter()
            .map(|m| {
                format!(
                    "<li>{}: {} payment(s), {}</li>",
                    clean(format::or_na(Some(m.method.as_str()))),
                    m.count,
                    format::money(m.total)
                )
            })
            .collect::<Vec<String>>()
            .join("");
        if breakdown.is_empty() {
            cards
        } else {
            format!(r#"{cards}<ul class="method-breakdown">{breakdown}</ul>"#)
        }
    }
}

/// The tenant's standing, from `/payments/my-status`.
pub struct StatusSummary<'a> {
    pub status: &'a TenantPaymentStatus,
}
impl Component for StatusSummary<'_> {
    fn render(&self) -> String {
        let status = self.status;
        let last = status
            .last_payment
            .as_ref()
            .map(|p| format::money(p.amount))
            .unwrap_or_else(|| format::NOT_AVAILABLE.to_string());
        let cards = [
            StatCard {
                icon: "fa-dollar-sign",
                value: format::money(status.amount_due),
                label: "Amount Due",
            },
            StatCard {
                icon: "fa-calendar",
                value: format::date(status.next_due_date.as_ref()),
                label: "Next Due Date",
            },
            StatCard {
                icon: "fa-receipt",
                value: last,
                label: "Last Payment",
            },
            StatCard {
                icon: "fa-info-circle",
                value: format::or_na(Some(status.status.as_str())).to_string(),
                label: "Status",
            },
        ];
        cards
            .iter()
            .map(|c| c.render())
            .collect::<Vec<String>>()
            .join("")
    }
}

/// One line of the dashboard's recent activity feed.
pub struct ActivityItem<'a> {
    pub title: String,
    pub meta: String,
    pub time: String,
    pub status: &'a str,
}
impl Component for ActivityItem<'_> {
    fn render(&self) -> String {
        let status = clean_text(self.status);
        format!(
            r#"
            <div class="activity-item">
                <div class="activity-icon"><i class="fas fa-money-bill-wave"></i></div>
                <div class="activity-content">
                    <div class="activity-title">{title}</div>
                    <div class="activity-meta">{meta}</div>
                    <div class="activity-time">{time}</div>
                </div>
                <div class="activity-status status-{status}">{status}</div>
            </div>
            "#,
            title = clean(&self.title),
            meta = clean(&self.meta),
            time = clean(&self.time),
        )
    }
}

impl<'a> ActivityItem<'a> {
    pub fn for_payment(payment: &'a Payment) -> Self {
        let verb = if payment.status == PaymentStatus::Paid {
            "received"
        } else {
            "due"
        };
        Self {
            title: format!(
                "Payment of {} {verb}",
                format::money(payment.amount)
            ),
            meta: format!(
                "From {} for {}",
                payment.tenant_name().unwrap_or("Tenant"),
                payment.property_name().unwrap_or("Property")
            ),
            time: format::date(payment.payment_date.as_ref()),
            status: payment.status.as_str(),
        }
    }
}

/// Prepends a just-recorded payment to the activity feed, if one is on the
/// page.
pub struct RecordedActivity<'a> {
    pub draft: &'a PaymentDraft,
}
impl Component for RecordedActivity<'_> {
    fn render(&self) -> String {
        let draft = self.draft;
        let item = ActivityItem {
            title: format!("New payment of {} recorded", format::money(draft.amount)),
            meta: format!(
                "{} • {}",
                draft.method,
                draft.reference.as_deref().unwrap_or("No reference")
            ),
            time: "Just now".to_string(),
            status: draft.status.as_str(),
        }
        .render();
        format!(
            r#"<div hx-swap-oob="afterbegin:#{RECENT_ACTIVITY}">{item}</div>"#
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;
    use serde_json::json;

    fn payment(status: &str) -> Payment {
        serde_json::from_value(json!({
            "_id": "pay1",
            "tenant": {"_id": "t1", "user": {"_id": "tenant-1", "name": "Terry Tenant"}},
            "property": {"_id": "p1", "name": "Maple Loft"},
            "amount": 1200,
            "paymentDate": "2024-05-01",
            "month": "2024-05",
            "status": status,
            "method": "online",
            "notes": "Paid early"
        }))
        .expect("payment")
    }

    #[test]
    fn test_owner_row_has_edit_and_reference_fallback() {
        let p = payment("paid");
        let owner = testing::owner();
        let html = PaymentRow {
            payment: &p,
            viewer: &owner,
        }
        .render();
        assert!(html.contains("Terry Tenant"));
        assert!(html.contains("$1,200"));
        assert!(html.contains("/payments/pay1/edit"));
        assert!(html.contains("<td>N/A</td>"));
        assert!(!html.contains("Pay</button>"));
    }

    #[test]
    fn test_tenant_row_pay_button_only_when_pending() {
        let tenant = testing::tenant();
        let pending = payment("pending");
        let html = PaymentRow {
            payment: &pending,
            viewer: &tenant,
        }
        .render();
        assert!(html.contains("/payments/pay1/pay"));
        assert!(!html.contains("/edit"));
        assert!(!html.contains("Terry Tenant"));

        let paid = payment("paid");
        let html = PaymentRow {
            payment: &paid,
            viewer: &tenant,
        }
        .render();
        assert!(!html.contains("/payments/pay1/pay"));
    }

    #[test]
    fn test_empty_states_by_role() {
        let owner = testing::owner();
        let html = PaymentRows {
            payments: vec![],
            viewer: &owner,
        }
        .render();
        assert!(html.contains(r#"colspan="10""#));
        assert!(html.contains("No payment records available yet"));
        assert!(html.contains("Record First Payment"));

        let tenant = testing::tenant();
        let html = PaymentRows {
            payments: vec![],
            viewer: &tenant,
        }
        .render();
        assert!(html.contains(r#"colspan="8""#));
        assert!(html.contains("Your payment history will appear here"));
        assert!(html.contains("Make Your First Payment"));
    }

    #[test]
    fn test_details_edit_only_for_owner() {
        let p = payment("paid");
        let owner = testing::owner();
        let html = PaymentDetails {
            payment: &p,
            viewer: &owner,
        }
        .render();
        assert!(html.contains("Edit Payment"));
        assert!(html.contains("Paid early"));
        assert!(!html.contains("<h3>Reference</h3>"));

        let tenant = testing::tenant();
        let html = PaymentDetails {
            payment: &p,
            viewer: &tenant,
        }
        .render();
        assert!(!html.contains("Edit Payment"));
    }

    #[test]
    fn test_form_keeps_an_old_month_selected() {
        let p = payment("paid");
        let months = format::month_options(
            chrono::NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            12,
        );
        let html = PaymentFormModal {
            payment: Some(&p),
            tenants: &[],
            months,
        }
        .render();
        assert!(html.contains("Update Payment"));
        assert!(html.contains(r#"<option value="2024-05" selected>"#));
        assert!(html.contains(r#"hx-post="/payments/pay1""#));
        assert!(!html.contains(r#"name="tenant""#));
    }

    #[test]
    fn test_new_form_lists_tenants() {
        let tenants: Vec<Tenant> = serde_json::from_value(json!([{
            "_id": "t1",
            "user": {"_id": "tenant-1", "name": "Terry Tenant"},
            "property": {"_id": "p1", "name": "Maple Loft"}
        }]))
        .expect("tenants");
        let html = PaymentFormModal {
            payment: None,
            tenants: &tenants,
            months: vec![],
        }
        .render();
        assert!(html.contains("Record New Payment"));
        assert!(html.contains("Terry Tenant (Maple Loft)"));
        assert!(html.contains(r#"hx-post="/payments""#));
    }

    #[test]
    fn test_pay_now_prefills_amount() {
        let html = PayNowModal {
            amount_due: Some(1200.0),
            due_date: None,
        }
        .render();
        assert!(html.contains(r#"value="1200.00""#));
        assert!(html.contains("$1,200"));
        assert!(html.contains("cardDetails"));
        assert!(!html.contains(r#"name="card"#));
    }

    #[test]
    fn test_stat_cards() {
        let stats = PaymentStats::default();
        let html = PaymentStatCards {
            stats: &stats,
            collection_rate: 0.0,
        }
        .render();
        assert!(html.contains("This Month"));
        assert!(html.contains("0%"));
        assert!(!html.contains("method-breakdown"));
    }

    #[test]
    fn test_activity_item_for_payment() {
        let p = payment("pending");
        let html = ActivityItem::for_payment(&p).render();
        assert!(html.contains("Payment of $1,200 due"));
        assert!(html.contains("From Terry Tenant for Maple Loft"));
        assert!(html.contains("status-pending"));
    }
}

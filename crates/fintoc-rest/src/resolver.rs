//! Static registry mapping field names to resource kinds
//!
//! Hydration needs to decide, for every field of an API payload, whether the
//! value is a nested resource (and of which kind), a list of resources, a
//! timestamp, or a plain scalar. The mapping is a closed enum rather than a
//! runtime lookup table, so an unknown name degrades to [`ResourceKind::Generic`]
//! instead of failing.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;

/// Every resource kind the API can return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Account,
    AccountNumber,
    AccountVerification,
    Balance,
    Charge,
    CheckoutSession,
    Entity,
    Income,
    Institution,
    InstitutionInvoice,
    InstitutionTaxReturn,
    Invoice,
    Link,
    Movement,
    OtherTaxes,
    PaymentIntent,
    PaymentLink,
    Refund,
    RefreshIntent,
    ServicesInvoice,
    Subscription,
    SubscriptionIntent,
    TaxReturn,
    Taxpayer,
    TobaccoTaxes,
    Transfer,
    TransferAccount,
    WebhookEndpoint,
    /// Catch-all for names with no dedicated kind
    Generic,
}

impl ResourceKind {
    /// Kind for a singular snake_case field name
    pub fn from_name(name: &str) -> Self {
        match name {
            "account" => Self::Account,
            "account_number" => Self::AccountNumber,
            "account_verification" => Self::AccountVerification,
            "balance" => Self::Balance,
            "charge" => Self::Charge,
            "checkout_session" => Self::CheckoutSession,
            "entity" => Self::Entity,
            "income" => Self::Income,
            "institution" => Self::Institution,
            "institution_invoice" => Self::InstitutionInvoice,
            "institution_tax_return" => Self::InstitutionTaxReturn,
            "invoice" => Self::Invoice,
            "link" => Self::Link,
            "movement" => Self::Movement,
            "other_taxes" => Self::OtherTaxes,
            "payment_intent" => Self::PaymentIntent,
            "payment_link" => Self::PaymentLink,
            "refund" => Self::Refund,
            "refresh_intent" => Self::RefreshIntent,
            "services_invoice" => Self::ServicesInvoice,
            "subscription" => Self::Subscription,
            "subscription_intent" => Self::SubscriptionIntent,
            "tax_return" => Self::TaxReturn,
            "taxpayer" => Self::Taxpayer,
            "tobacco_taxes" => Self::TobaccoTaxes,
            "transfer" => Self::Transfer,
            "transfer_account" => Self::TransferAccount,
            "webhook_endpoint" => Self::WebhookEndpoint,
            _ => Self::Generic,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Account => "account",
            Self::AccountNumber => "account_number",
            Self::AccountVerification => "account_verification",
            Self::Balance => "balance",
            Self::Charge => "charge",
            Self::CheckoutSession => "checkout_session",
            Self::Entity => "entity",
            Self::Income => "income",
            Self::Institution => "institution",
            Self::InstitutionInvoice => "institution_invoice",
            Self::InstitutionTaxReturn => "institution_tax_return",
            Self::Invoice => "invoice",
            Self::Link => "link",
            Self::Movement => "movement",
            Self::OtherTaxes => "other_taxes",
            Self::PaymentIntent => "payment_intent",
            Self::PaymentLink => "payment_link",
            Self::Refund => "refund",
            Self::RefreshIntent => "refresh_intent",
            Self::ServicesInvoice => "services_invoice",
            Self::Subscription => "subscription",
            Self::SubscriptionIntent => "subscription_intent",
            Self::TaxReturn => "tax_return",
            Self::Taxpayer => "taxpayer",
            Self::TobaccoTaxes => "tobacco_taxes",
            Self::Transfer => "transfer",
            Self::TransferAccount => "transfer_account",
            Self::WebhookEndpoint => "webhook_endpoint",
            Self::Generic => "generic",
        }
    }

    /// Per-parent override: some fields hold a kind their name does not say
    ///
    /// Movements call both legs of a transfer a `transfer_account`, and
    /// invoices call both parties a `taxpayer`.
    fn field_override(&self, field: &str) -> Option<&'static str> {
        match (self, field) {
            (Self::Movement, "recipient_account") | (Self::Movement, "sender_account") => {
                Some("transfer_account")
            }
            (Self::Invoice, "issuer") | (Self::Invoice, "receiver") => Some("taxpayer"),
            _ => None,
        }
    }
}

/// Strip a trailing plural `s`, leaving non-plural names alone
pub fn singularize(name: &str) -> &str {
    name.trim_end_matches('s')
}

const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

/// Parse an API timestamp (`2023-01-15T10:30:00Z`, with optional fractional
/// seconds) into a UTC datetime
pub fn parse_iso_datetime(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, ISO_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

pub fn is_iso_datetime(raw: &str) -> bool {
    parse_iso_datetime(raw).is_some()
}

/// How a single field of a payload should be hydrated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved {
    Resource(ResourceKind),
    ListOf(ResourceKind),
    DateTime,
    Scalar,
}

/// Decide the hydration of `field` on a `parent` resource
pub fn resolve(parent: ResourceKind, field: &str, value: &Value) -> Resolved {
    match value {
        Value::Object(_) => {
            let name = parent.field_override(field).unwrap_or(field);
            Resolved::Resource(ResourceKind::from_name(name))
        }
        Value::Array(_) => {
            let name = parent.field_override(field).unwrap_or(field);
            Resolved::ListOf(ResourceKind::from_name(singularize(name)))
        }
        Value::String(raw) if is_iso_datetime(raw) => Resolved::DateTime,
        _ => Resolved::Scalar,
    }
}

//! Order intent composition, the handoff message, and the analytics lead
//! event.
//!
//! An [`OrderIntent`] is ephemeral: composed at the moment of an order
//! action, serialized into a human-readable message and a structured lead
//! event, then discarded. Nothing here is persisted.

use chrono::Utc;
use serde::Serialize;
use std::fmt;
use tracing::debug;

use crate::attribution::UtmParams;
use crate::domain::catalog::Product;
use crate::domain::value_objects::Money;
use crate::i18n::{self, Lang};
use crate::pricing;
use crate::{Result, StorefrontError};

pub const MIN_QTY: u32 = 1;
pub const MAX_QTY: u32 = 99;

pub const LEAD_EVENT: &str = "lead_intent";

#[derive(Clone, Debug)]
pub struct OrderIntent {
    pub product_id: String,
    pub product_name: String,
    pub variant_id: String,
    pub variant_name: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub subtotal: Money,
    pub session_id: String,
    pub lang: Lang,
    pub utm: UtmParams,
}

impl OrderIntent {
    /// Resolve the chosen variant and price into an intent. Quantity is
    /// clamped to the storefront's 1..=99 input range.
    pub fn compose(
        product: &Product,
        variant_id: &str,
        quantity: u32,
        lang: Lang,
        session_id: &str,
        utm: &UtmParams,
    ) -> Result<Self> {
        let variant = product.variant(variant_id).ok_or_else(|| StorefrontError::UnknownVariant {
            product: product.id.clone(),
            variant: variant_id.to_string(),
        })?;
        let quantity = quantity.clamp(MIN_QTY, MAX_QTY);
        Ok(Self {
            product_id: product.id.clone(),
            product_name: product.name_in(lang).to_string(),
            variant_id: variant.id.clone(),
            variant_name: variant.name.resolve(lang).to_string(),
            quantity,
            unit_price: product.price.clone(),
            subtotal: product.price.multiply(quantity),
            session_id: session_id.to_string(),
            lang,
            utm: utm.clone(),
        })
    }

    /// The pre-filled handoff message, in the intent's language.
    pub fn message(&self) -> String {
        let t = i18n::strings(self.lang);
        let locale = self.lang.locale();
        let mut lines = vec![
            t.order_header.to_string(),
            format!("{}: {}", t.order_product, self.product_name),
            format!("{}: {}", t.order_variant, self.variant_name),
            format!("{}: {}", t.order_qty, self.quantity),
            format!("{}: {}", t.order_unit_price, pricing::format_money(&self.unit_price, locale)),
            format!("{}: {}", t.order_subtotal_ex, pricing::format_money(&self.subtotal, locale)),
            "——".to_string(),
            format!("{}: website", t.order_source),
            format!("{}: {}", t.order_session, self.session_id),
        ];
        for (key, value) in self.utm.pairs() {
            lines.push(format!("{key}={value}"));
        }
        lines.join("\n")
    }

    /// The structured analytics value for this intent.
    pub fn lead_event(&self, page: &str) -> LeadEvent {
        LeadEvent {
            event: LEAD_EVENT,
            ts: Utc::now().timestamp_millis(),
            session_id: self.session_id.clone(),
            product_id: self.product_id.clone(),
            variant_id: self.variant_id.clone(),
            qty: self.quantity,
            utm: self.utm.clone(),
            language: self.lang,
            page: page.to_string(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadEvent {
    pub event: &'static str,
    pub ts: i64,
    pub session_id: String,
    pub product_id: String,
    pub variant_id: String,
    pub qty: u32,
    pub utm: UtmParams,
    pub language: Lang,
    pub page: String,
}

#[derive(Debug, Clone)]
pub struct BeaconError(pub String);
impl std::error::Error for BeaconError {}
impl fmt::Display for BeaconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Beacon error: {}", self.0)
    }
}

/// Outbound analytics transport.
pub trait Beacon {
    fn send_json(&self, endpoint: &str, body: &str) -> Result<(), BeaconError>;
}

/// Fire-and-forget lead transmission: serialization or transport failure is
/// logged at debug level and dropped, never retried, never surfaced.
pub fn send_lead(beacon: &dyn Beacon, endpoint: &str, event: &LeadEvent) {
    let body = match serde_json::to_string(event) {
        Ok(body) => body,
        Err(err) => {
            debug!(error = %err, "lead event serialization failed");
            return;
        }
    };
    if let Err(err) = beacon.send_json(endpoint, &body) {
        debug!(endpoint, error = %err, "lead beacon failed");
    }
}

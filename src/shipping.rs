//! Shipping fee and transit-time estimation for Australian destinations.
//!
//! The estimator is a pure function of `(region, postcode)` evaluated as a
//! sequence of overwriting rules: every matching rule replaces the running
//! result, so later rules take precedence. The order below reproduces the
//! storefront's observed behavior exactly and must not be reordered (a
//! postcode starting with "08" matches both the WA single-digit family and
//! the NT prefix pattern and resolves to NT).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::i18n::Lang;

/// Australian state or territory code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Region {
    Nsw,
    Vic,
    Qld,
    Wa,
    Sa,
    Tas,
    Act,
    Nt,
}

impl Region {
    pub const ALL: [Region; 8] = [
        Region::Nsw,
        Region::Vic,
        Region::Qld,
        Region::Wa,
        Region::Sa,
        Region::Tas,
        Region::Act,
        Region::Nt,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Nsw => "NSW",
            Region::Vic => "VIC",
            Region::Qld => "QLD",
            Region::Wa => "WA",
            Region::Sa => "SA",
            Region::Tas => "TAS",
            Region::Act => "ACT",
            Region::Nt => "NT",
        }
    }

    pub fn parse(value: &str) -> Option<Region> {
        let upper = value.trim().to_ascii_uppercase();
        Region::ALL.into_iter().find(|r| r.as_str() == upper)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Shipping-estimator-internal grouping of destinations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Zone {
    National,
    Wa,
    Nt,
    Tas,
}

impl Zone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Zone::National => "National",
            Zone::Wa => "WA",
            Zone::Nt => "NT",
            Zone::Tas => "TAS",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Estimated transit window in business days.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EtaWindow {
    pub low: u8,
    pub high: u8,
}

impl EtaWindow {
    pub fn localized(&self, lang: Lang) -> String {
        match lang {
            Lang::En => format!("{}–{} business days", self.low, self.high),
            Lang::Zh => format!("{}–{} 个工作日", self.low, self.high),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShippingEstimate {
    pub fee: Decimal,
    pub eta: EtaWindow,
    pub zone: Zone,
}

/// Indicative shipping estimate; final cost and timing are confirmed by the
/// agent during the handoff.
pub fn estimate(region: Region, postcode: &str) -> ShippingEstimate {
    let postcode = postcode.trim();
    let first = postcode.chars().next();

    let mut est = ShippingEstimate {
        fee: Decimal::new(99, 1),
        eta: EtaWindow { low: 2, high: 6 },
        zone: Zone::National,
    };
    if region == Region::Wa || first == Some('6') {
        est = ShippingEstimate {
            fee: Decimal::new(149, 1),
            eta: EtaWindow { low: 5, high: 10 },
            zone: Zone::Wa,
        };
    }
    if region == Region::Nt || has_nt_prefix(postcode) {
        est = ShippingEstimate {
            fee: Decimal::new(169, 1),
            eta: EtaWindow { low: 6, high: 12 },
            zone: Zone::Nt,
        };
    }
    if region == Region::Tas || first == Some('7') {
        est = ShippingEstimate {
            fee: Decimal::new(129, 1),
            eta: EtaWindow { low: 3, high: 7 },
            zone: Zone::Tas,
        };
    }
    est
}

// Matches ^0[89]: the remote two-digit prefix family.
fn has_nt_prefix(postcode: &str) -> bool {
    let mut chars = postcode.chars();
    chars.next() == Some('0') && matches!(chars.next(), Some('8') | Some('9'))
}

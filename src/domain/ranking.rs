//! Best-seller selection.

use std::cmp::Ordering;

use crate::domain::catalog::Product;

/// Pick the single best product: most reviews, then highest rating, then most
/// recently created. Deterministic for unchanged input; a full three-key tie
/// resolves to the first occurrence. Empty input yields `None`.
pub fn pick_best(products: &[Product]) -> Option<&Product> {
    products.iter().reduce(|best, candidate| {
        if rank_key(candidate).cmp(&rank_key(best)) == Ordering::Greater {
            candidate
        } else {
            best
        }
    })
}

fn rank_key(p: &Product) -> (u32, rust_decimal::Decimal, chrono::DateTime<chrono::Utc>) {
    (p.reviews, p.rating, p.created_at)
}

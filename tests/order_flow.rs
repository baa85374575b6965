//! End-to-end storefront flow: language resolution, best-seller pick,
//! pricing, shipping estimate, and the Telegram handoff link.

use percent_encoding::percent_decode_str;
use rust_decimal::Decimal;

use vaplus_storefront::attribution::parse_utm;
use vaplus_storefront::order::OrderIntent;
use vaplus_storefront::shipping::{self, Region, Zone};
use vaplus_storefront::storage::MemoryStore;
use vaplus_storefront::telegram::{build_link, ChatTarget};
use vaplus_storefront::{i18n, pick_best, pricing, session, Catalog, Lang, StorefrontConfig};

#[test]
fn formatted_aud_price_carries_currency_marker() {
    let out = pricing::format_currency(Decimal::ONE, "AUD", "en-AU");
    assert!(out.contains('$'), "{out}");
    assert!(out.contains('1'), "{out}");
}

#[test]
fn best_seller_is_the_review_leader() {
    let catalog = Catalog::sample();
    let best = pick_best(catalog.products()).expect("non-empty catalog");
    assert_eq!(best.id, "p5");
    assert_eq!(best.reviews, 512);
    assert!(catalog.products().iter().all(|p| p.id == "p5" || p.reviews < 512));
}

#[test]
fn handle_without_message_is_a_direct_profile_url() {
    let url = build_link(Some(&ChatTarget::Handle("lusmind_orders".into())), None);
    assert_eq!(url, "https://t.me/lusmind_orders");
    assert!(!url.contains("share/url"));
}

#[test]
fn shipping_tiers_respect_declared_rule_order() {
    let wa = shipping::estimate(Region::Wa, "6000");
    assert_eq!(wa.fee, Decimal::new(149, 1));
    assert_eq!(wa.zone, Zone::Wa);

    // "0800" also matches the single-digit family of an earlier rule; the
    // later NT rule must win.
    let nt = shipping::estimate(Region::Nt, "0800");
    assert_eq!(nt.fee, Decimal::new(169, 1));
    assert_eq!(nt.zone, Zone::Nt);
}

#[test]
fn full_order_flow_round_trips_the_message() {
    let store = MemoryStore::new();
    let query = "lang=zh&utm_source=ads&utm_campaign=spring";
    let lang = i18n::initial_lang(Some(query), &store, Some("en-AU"));
    assert_eq!(lang, Lang::Zh);

    let session_id = session::ensure_session_id(&store);
    let utm = parse_utm(query);
    let catalog = Catalog::sample();
    let config = StorefrontConfig::default();

    let best = pick_best(catalog.products()).expect("non-empty catalog");
    let intent =
        OrderIntent::compose(best, "v1", 2, lang, &session_id, &utm).expect("valid variant");
    let message = intent.message();
    assert!(message.contains("彩虹软糖"));
    assert!(message.contains(&session_id));
    assert!(message.contains("utm_source=ads"));
    assert!(message.contains("utm_campaign=spring"));

    let link = build_link(config.order_target().as_ref(), Some(&message));
    assert!(link.starts_with("https://t.me/share/url?url="));
    let encoded = link.rsplit("&text=").next().expect("text component");
    let decoded = percent_decode_str(encoded).decode_utf8().expect("utf8");
    assert_eq!(decoded, message);

    // Same session on the next visit.
    assert_eq!(session::ensure_session_id(&store), session_id);
}

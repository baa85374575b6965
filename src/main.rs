//! VAPLUS Storefront - demo walk-through
//!
//! No server: renders the localized catalog, the featured best seller, a
//! shipping estimate, and a Telegram order link to stdout.
//!
//! Usage: `vaplus-storefront [REGION] [POSTCODE] [QUERY]`, e.g.
//! `vaplus-storefront NT 0800 "lang=zh&utm_source=ad"`.

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vaplus_storefront::domain::pick_best;
use vaplus_storefront::order::{self, Beacon, BeaconError, OrderIntent};
use vaplus_storefront::shipping::{self, Region};
use vaplus_storefront::storage::MemoryStore;
use vaplus_storefront::{attribution, i18n, pricing, session, telegram};
use vaplus_storefront::{Catalog, StorefrontConfig};

/// Demo transport: logs the payload instead of POSTing it.
struct LogBeacon;

impl Beacon for LogBeacon {
    fn send_json(&self, endpoint: &str, body: &str) -> Result<(), BeaconError> {
        tracing::info!(endpoint, body, "lead event");
        Ok(())
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().collect();
    let region = args.get(1).and_then(|s| Region::parse(s)).unwrap_or(Region::Nsw);
    let postcode = args.get(2).cloned().unwrap_or_else(|| "2000".to_string());
    let query = args.get(3).cloned().unwrap_or_default();

    let config = StorefrontConfig::from_env();
    let store = MemoryStore::new();
    let lang = i18n::initial_lang(Some(&query), &store, std::env::var("LANG").ok().as_deref());
    let utm = attribution::parse_utm(&query);
    let session_id = session::ensure_session_id(&store);
    let catalog = Catalog::sample();

    println!("VAPLUS catalog ({})", lang.as_str());
    for product in catalog.products() {
        let gross = pricing::apply_tax(product.price.amount(), config.gst_rate);
        println!(
            "  {} — {} ({})",
            product.name_in(lang),
            pricing::format_currency(gross, product.price.currency(), lang.locale()),
            product.strength.as_str(),
        );
    }

    let estimate = shipping::estimate(region, &postcode);
    println!(
        "Shipping to {region} {postcode}: {} · {} · zone {}",
        pricing::format_currency(estimate.fee, &config.currency, lang.locale()),
        estimate.eta.localized(lang),
        estimate.zone,
    );

    if let Some(best) = pick_best(catalog.products()) {
        println!("Best seller: {}", best.name_in(lang));
        let variant_id = best.variants[0].id.clone();
        let intent = OrderIntent::compose(best, &variant_id, 1, lang, &session_id, &utm)?;
        order::send_lead(&LogBeacon, &config.lead_endpoint, &intent.lead_event("cli://demo"));
        let link = telegram::build_link(config.order_target().as_ref(), Some(&intent.message()));
        println!("Order link: {link}");
    }

    Ok(())
}

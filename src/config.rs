//! Storefront configuration.
//!
//! An explicit value passed down to whatever needs it, never ambient global
//! state. Defaults match the production storefront; the binary layers env
//! overrides on top.

use rust_decimal::Decimal;

use crate::telegram::ChatTarget;

#[derive(Clone, Debug)]
pub struct StorefrontConfig {
    /// Support bot username; preferred order target when set.
    pub bot: Option<String>,
    /// Plain handle used when no bot is configured.
    pub handle: Option<String>,
    /// Analytics beacon path.
    pub lead_endpoint: String,
    pub currency: String,
    pub locale: String,
    pub gst_rate: Decimal,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            bot: Some("LusmindSupportBot".to_string()),
            handle: Some("lusmind_orders".to_string()),
            lead_endpoint: "/api/lead".to_string(),
            currency: "AUD".to_string(),
            locale: "en-AU".to_string(),
            gst_rate: Decimal::new(1, 1),
        }
    }
}

impl StorefrontConfig {
    /// Defaults with `STOREFRONT_*` env overrides. An unparsable GST rate
    /// keeps the default.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(bot) = std::env::var("STOREFRONT_BOT") {
            config.bot = non_empty(bot);
        }
        if let Ok(handle) = std::env::var("STOREFRONT_HANDLE") {
            config.handle = non_empty(handle);
        }
        if let Ok(endpoint) = std::env::var("STOREFRONT_LEAD_ENDPOINT") {
            if !endpoint.is_empty() {
                config.lead_endpoint = endpoint;
            }
        }
        if let Ok(rate) = std::env::var("STOREFRONT_GST_RATE") {
            if let Ok(parsed) = rate.parse::<Decimal>() {
                config.gst_rate = parsed;
            }
        }
        config
    }

    /// The order handoff target: the bot when configured, the handle
    /// otherwise.
    pub fn order_target(&self) -> Option<ChatTarget> {
        if let Some(bot) = self.bot.as_deref().filter(|b| !b.is_empty()) {
            return Some(ChatTarget::Bot(bot.to_string()));
        }
        self.handle
            .as_deref()
            .filter(|h| !h.is_empty())
            .map(|h| ChatTarget::Handle(h.to_string()))
    }

    /// Identifier used for the mobile app-scheme redirect.
    pub fn primary_id(&self) -> Option<&str> {
        self.bot
            .as_deref()
            .filter(|b| !b.is_empty())
            .or_else(|| self.handle.as_deref().filter(|h| !h.is_empty()))
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

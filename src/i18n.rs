//! Language selection and localized text resolution.
//!
//! The display language is a two-valued preference (`en` | `zh`). It is never
//! ambient state: callers resolve it once via [`initial_lang`] and pass the
//! resulting [`Lang`] down explicitly. [`set_lang`] is the single update
//! entry point.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::attribution;
use crate::storage::{self, KvStore, LANG_KEY};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    En,
    Zh,
}

impl Lang {
    pub fn as_str(&self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Zh => "zh",
        }
    }

    /// BCP 47 tag used when formatting prices in this language.
    pub fn locale(&self) -> &'static str {
        match self {
            Lang::En => "en-AU",
            Lang::Zh => "zh-CN",
        }
    }

    pub fn parse(value: &str) -> Option<Lang> {
        match value {
            "en" => Some(Lang::En),
            "zh" => Some(Lang::Zh),
            _ => None,
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct UnknownLang(pub String);
impl std::error::Error for UnknownLang {}
impl fmt::Display for UnknownLang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown language: {}", self.0)
    }
}

impl FromStr for Lang {
    type Err = UnknownLang;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Lang::parse(s).ok_or_else(|| UnknownLang(s.to_string()))
    }
}

/// A text field with a canonical value plus optional per-language overrides.
///
/// Absence of a translation is an expected fallback, not a failure.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub canonical: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zh: Option<String>,
}

impl LocalizedText {
    pub fn new(canonical: impl Into<String>) -> Self {
        Self { canonical: canonical.into(), en: None, zh: None }
    }

    pub fn en(mut self, value: impl Into<String>) -> Self {
        self.en = Some(value.into());
        self
    }

    pub fn zh(mut self, value: impl Into<String>) -> Self {
        self.zh = Some(value.into());
        self
    }

    /// Language-specific value when present and non-empty, canonical otherwise.
    pub fn resolve(&self, lang: Lang) -> &str {
        let localized = match lang {
            Lang::En => self.en.as_deref(),
            Lang::Zh => self.zh.as_deref(),
        };
        match localized {
            Some(text) if !text.is_empty() => text,
            _ => &self.canonical,
        }
    }
}

/// Resolve the initial display language.
///
/// Priority: `lang` URL parameter, then stored preference, then system
/// locale. Storage failures behave as if no preference was stored.
pub fn initial_lang(query: Option<&str>, store: &dyn KvStore, system_locale: Option<&str>) -> Lang {
    if let Some(lang) = query
        .and_then(|q| attribution::query_param(q, "lang"))
        .and_then(|v| Lang::parse(&v))
    {
        return lang;
    }
    if let Some(lang) = storage::get_silent(store, LANG_KEY).and_then(|v| Lang::parse(&v)) {
        return lang;
    }
    match system_locale {
        Some(locale) if locale.to_ascii_lowercase().contains("zh") => Lang::Zh,
        _ => Lang::En,
    }
}

/// Persist a language choice. Storage failure is silent; the returned value
/// is what the document language attribute should be set to.
pub fn set_lang(store: &dyn KvStore, lang: Lang) -> &'static str {
    storage::set_silent(store, LANG_KEY, lang.as_str());
    lang.as_str()
}

/// The message-catalog subset the order flow needs.
pub struct Strings {
    pub order_header: &'static str,
    pub order_product: &'static str,
    pub order_variant: &'static str,
    pub order_qty: &'static str,
    pub order_unit_price: &'static str,
    pub order_subtotal_ex: &'static str,
    pub order_source: &'static str,
    pub order_session: &'static str,
    pub btn_order: &'static str,
    pub contact_prompt: &'static str,
}

static EN: Strings = Strings {
    order_header: "Order intent",
    order_product: "Product",
    order_variant: "Variant",
    order_qty: "Qty",
    order_unit_price: "Unit price",
    order_subtotal_ex: "Subtotal (excl. shipping/tax)",
    order_source: "Source",
    order_session: "Session ID",
    btn_order: "Order via Telegram",
    contact_prompt: "Need help to place an order",
};

static ZH: Strings = Strings {
    order_header: "【下单意向】",
    order_product: "产品",
    order_variant: "规格",
    order_qty: "数量",
    order_unit_price: "单价",
    order_subtotal_ex: "小计（未含运费/税）",
    order_source: "来源",
    order_session: "会话ID",
    btn_order: "下单",
    contact_prompt: "需要人工客服协助下单",
};

pub fn strings(lang: Lang) -> &'static Strings {
    match lang {
        Lang::En => &EN,
        Lang::Zh => &ZH,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn text() -> LocalizedText {
        LocalizedText::new("Blueberry Raspberry").zh("蓝莓树莓")
    }

    #[test]
    fn test_resolve_localized() {
        assert_eq!(text().resolve(Lang::Zh), "蓝莓树莓");
    }

    #[test]
    fn test_resolve_falls_back_to_canonical() {
        // No en override: canonical wins.
        assert_eq!(text().resolve(Lang::En), "Blueberry Raspberry");
        // Empty override is treated as absent.
        let empty = LocalizedText::new("base").en("");
        assert_eq!(empty.resolve(Lang::En), "base");
    }

    #[test]
    fn test_initial_lang_query_wins() {
        let store = MemoryStore::new();
        set_lang(&store, Lang::En);
        let lang = initial_lang(Some("lang=zh&utm_source=x"), &store, Some("en-US"));
        assert_eq!(lang, Lang::Zh);
    }

    #[test]
    fn test_initial_lang_stored_beats_system() {
        let store = MemoryStore::new();
        set_lang(&store, Lang::Zh);
        assert_eq!(initial_lang(None, &store, Some("en-AU")), Lang::Zh);
    }

    #[test]
    fn test_initial_lang_system_fallback() {
        let store = MemoryStore::new();
        assert_eq!(initial_lang(None, &store, Some("zh-CN.UTF-8")), Lang::Zh);
        assert_eq!(initial_lang(None, &store, Some("en-AU")), Lang::En);
        assert_eq!(initial_lang(None, &store, None), Lang::En);
    }

    #[test]
    fn test_initial_lang_ignores_invalid_query_value() {
        let store = MemoryStore::new();
        assert_eq!(initial_lang(Some("lang=fr"), &store, None), Lang::En);
    }

    #[test]
    fn test_strings_language_split() {
        let has_cn = |s: &str| s.chars().any(|c| ('\u{4e00}'..='\u{9fff}').contains(&c));
        assert!(!has_cn(strings(Lang::En).order_header));
        assert!(has_cn(strings(Lang::Zh).order_header));
    }
}

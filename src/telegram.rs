//! Telegram deep links and the mobile app-scheme opener.
//!
//! Link construction is pure URL assembly; the opener dispatches on platform
//! through the [`Navigator`] capability trait so tests can substitute a
//! recording fake for the browser.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::fmt;
use std::time::Duration;
use tracing::debug;

pub const BASE: &str = "https://t.me";
pub const APP_SCHEME: &str = "tg";

// The fallback timer fires after 1.2s; the web URL only opens when less than
// 1.5s of wall time has passed, i.e. the app redirect did not suspend us.
const FALLBACK_DELAY_MS: u64 = 1200;
const NAVIGATED_AWAY_MS: u64 = 1500;

/// encodeURIComponent equivalent: everything but `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

fn encode(component: &str) -> String {
    utf8_percent_encode(component, COMPONENT).to_string()
}

/// Where an order handoff lands: a support bot or a plain handle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChatTarget {
    Bot(String),
    Handle(String),
}

impl ChatTarget {
    pub fn name(&self) -> &str {
        match self {
            ChatTarget::Bot(name) | ChatTarget::Handle(name) => name,
        }
    }
}

fn profile_url(name: &str) -> String {
    format!("{BASE}/{}", encode(name))
}

fn share_url(base: &str, text: &str) -> String {
    format!("{BASE}/share/url?url={}&text={}", encode(base), encode(text))
}

/// Build the handoff URL per the target/message matrix: a direct profile URL
/// when there is no message, a share-intent URL carrying the profile URL and
/// the pre-filled text when there is, and an empty-base share intent when no
/// target is configured at all.
pub fn build_link(target: Option<&ChatTarget>, message: Option<&str>) -> String {
    match (target, message) {
        (Some(t), Some(text)) => share_url(&profile_url(t.name()), text),
        (Some(t), None) => profile_url(t.name()),
        (None, text) => share_url(&format!("{BASE}/"), text.unwrap_or("")),
    }
}

/// Deep link that opens a bot conversation with a start payload.
pub fn bot_start_link(bot: &str, payload: &str) -> String {
    format!("{BASE}/{}?start={}", encode(bot), encode(payload))
}

#[derive(Debug, Clone)]
pub struct PlatformError(pub String);
impl std::error::Error for PlatformError {}
impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Platform error: {}", self.0)
    }
}

/// Capability surface of the hosting platform. Every method is best-effort;
/// the opener treats any failure as "use the web URL".
pub trait Navigator {
    fn user_agent(&self) -> String;
    /// Navigate the current browsing context. `Err` means the platform
    /// refused the scheme.
    fn redirect(&self, url: &str) -> Result<(), PlatformError>;
    /// Open a URL in a new browsing context.
    fn open_new_tab(&self, url: &str);
    fn now_millis(&self) -> u64;
    fn schedule(&self, delay: Duration, callback: Box<dyn FnOnce() + Send + 'static>);
}

pub fn is_mobile(user_agent: &str) -> bool {
    let ua = user_agent.to_ascii_lowercase();
    ["iphone", "ipad", "ipod", "android"].iter().any(|needle| ua.contains(needle))
}

/// Open the handoff URL, preferring the app scheme on mobile.
///
/// On a mobile user agent with a known identifier this redirects to
/// `tg://resolve?domain=<id>` and schedules a fallback that opens the web URL
/// in a new context unless the page was suspended in the meantime. Everywhere
/// else (or on any platform failure) it opens the web URL directly. Never
/// surfaces an error to the caller.
pub fn open<N>(nav: &N, web_url: &str, primary_id: Option<&str>)
where
    N: Navigator + Clone + Send + 'static,
{
    if let Some(id) = primary_id {
        if is_mobile(&nav.user_agent()) {
            let deep = format!("{APP_SCHEME}://resolve?domain={}", encode(id));
            let started = nav.now_millis();
            match nav.redirect(&deep) {
                Ok(()) => {
                    let fallback_nav = nav.clone();
                    let web = web_url.to_string();
                    nav.schedule(
                        Duration::from_millis(FALLBACK_DELAY_MS),
                        Box::new(move || {
                            if fallback_nav.now_millis().saturating_sub(started) < NAVIGATED_AWAY_MS
                            {
                                fallback_nav.open_new_tab(&web);
                            }
                        }),
                    );
                    return;
                }
                Err(err) => {
                    debug!(error = %err, "app-scheme redirect refused, opening web URL");
                }
            }
        }
    }
    nav.open_new_tab(web_url);
}

#[cfg(test)]
mod tests {
    use super::*;
    use percent_encoding::percent_decode_str;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_direct_profile_links() {
        let bot = ChatTarget::Bot("LusmindSupportBot".into());
        assert_eq!(build_link(Some(&bot), None), "https://t.me/LusmindSupportBot");
        let handle = ChatTarget::Handle("lusmind_orders".into());
        assert_eq!(build_link(Some(&handle), None), "https://t.me/lusmind_orders");
    }

    #[test]
    fn test_share_intent_links() {
        let bot = ChatTarget::Bot("TestBot".into());
        let url = build_link(Some(&bot), Some("hello"));
        assert!(url.starts_with("https://t.me/share/url?url="));
        assert!(url.contains("TestBot"));
        assert!(url.ends_with("&text=hello"));

        let handle = ChatTarget::Handle("tester".into());
        let url = build_link(Some(&handle), Some("hi"));
        assert!(url.contains("t.me%2Ftester") && url.contains("text=hi"));
    }

    #[test]
    fn test_no_target_share_intent() {
        let url = build_link(None, Some("msg"));
        assert_eq!(url, "https://t.me/share/url?url=https%3A%2F%2Ft.me%2F&text=msg");
        assert_eq!(
            build_link(None, None),
            "https://t.me/share/url?url=https%3A%2F%2Ft.me%2F&text="
        );
    }

    #[test]
    fn test_message_encoding_round_trips() {
        let message = "2 x 30ml / 5% & more #order\nline2";
        let url = build_link(Some(&ChatTarget::Bot("B".into())), Some(message));
        let encoded = url.rsplit("&text=").next().expect("text component");
        assert!(!encoded.contains(' ') && !encoded.contains('&') && !encoded.contains('#'));
        let decoded = percent_decode_str(encoded).decode_utf8().expect("utf8");
        assert_eq!(decoded, message);
    }

    #[test]
    fn test_bot_start_link() {
        assert_eq!(bot_start_link("TestBot", "ref 1"), "https://t.me/TestBot?start=ref%201");
    }

    #[test]
    fn test_is_mobile() {
        assert!(is_mobile("Mozilla/5.0 (iPhone; CPU iPhone OS 17_0)"));
        assert!(is_mobile("Mozilla/5.0 (Linux; Android 14)"));
        assert!(!is_mobile("Mozilla/5.0 (Macintosh; Intel Mac OS X)"));
    }

    #[derive(Clone)]
    struct FakeNavigator {
        inner: Arc<Inner>,
    }

    struct Inner {
        user_agent: String,
        refuse_redirect: bool,
        now: AtomicU64,
        redirects: Mutex<Vec<String>>,
        opened: Mutex<Vec<String>>,
        scheduled: Mutex<Vec<Box<dyn FnOnce() + Send>>>,
    }

    impl FakeNavigator {
        fn new(user_agent: &str) -> Self {
            Self::with_refusal(user_agent, false)
        }

        fn refusing(user_agent: &str) -> Self {
            Self::with_refusal(user_agent, true)
        }

        fn with_refusal(user_agent: &str, refuse_redirect: bool) -> Self {
            Self {
                inner: Arc::new(Inner {
                    user_agent: user_agent.to_string(),
                    refuse_redirect,
                    now: AtomicU64::new(0),
                    redirects: Mutex::new(vec![]),
                    opened: Mutex::new(vec![]),
                    scheduled: Mutex::new(vec![]),
                }),
            }
        }

        fn advance(&self, millis: u64) {
            self.inner.now.fetch_add(millis, Ordering::SeqCst);
        }

        fn run_scheduled(&self) {
            let callbacks: Vec<_> = std::mem::take(&mut *self.inner.scheduled.lock().unwrap());
            for cb in callbacks {
                cb();
            }
        }

        fn redirects(&self) -> Vec<String> {
            self.inner.redirects.lock().unwrap().clone()
        }

        fn opened(&self) -> Vec<String> {
            self.inner.opened.lock().unwrap().clone()
        }
    }

    impl Navigator for FakeNavigator {
        fn user_agent(&self) -> String {
            self.inner.user_agent.clone()
        }

        fn redirect(&self, url: &str) -> Result<(), PlatformError> {
            if self.inner.refuse_redirect {
                return Err(PlatformError("scheme blocked".into()));
            }
            self.inner.redirects.lock().unwrap().push(url.to_string());
            Ok(())
        }

        fn open_new_tab(&self, url: &str) {
            self.inner.opened.lock().unwrap().push(url.to_string());
        }

        fn now_millis(&self) -> u64 {
            self.inner.now.load(Ordering::SeqCst)
        }

        fn schedule(&self, _delay: Duration, callback: Box<dyn FnOnce() + Send + 'static>) {
            self.inner.scheduled.lock().unwrap().push(callback);
        }
    }

    #[test]
    fn test_desktop_opens_web_directly() {
        let nav = FakeNavigator::new("Mozilla/5.0 (Macintosh)");
        open(&nav, "https://t.me/xyz", Some("xyz"));
        assert_eq!(nav.opened(), vec!["https://t.me/xyz"]);
        assert!(nav.redirects().is_empty());
    }

    #[test]
    fn test_mobile_without_id_opens_web_directly() {
        let nav = FakeNavigator::new("iPhone");
        open(&nav, "https://t.me/xyz", None);
        assert_eq!(nav.opened(), vec!["https://t.me/xyz"]);
    }

    #[test]
    fn test_mobile_redirects_then_falls_back() {
        let nav = FakeNavigator::new("Android");
        open(&nav, "https://t.me/xyz", Some("xyz"));
        assert_eq!(nav.redirects(), vec!["tg://resolve?domain=xyz"]);
        assert!(nav.opened().is_empty());
        // The timer fires after ~1.2s of an unsuspended page.
        nav.advance(1200);
        nav.run_scheduled();
        assert_eq!(nav.opened(), vec!["https://t.me/xyz"]);
    }

    #[test]
    fn test_mobile_no_fallback_after_navigation() {
        let nav = FakeNavigator::new("Android");
        open(&nav, "https://t.me/xyz", Some("xyz"));
        // The app took over: the page was suspended well past the window.
        nav.advance(5000);
        nav.run_scheduled();
        assert!(nav.opened().is_empty());
    }

    #[test]
    fn test_refused_redirect_degrades_to_web() {
        let nav = FakeNavigator::refusing("iPad");
        open(&nav, "https://t.me/xyz", Some("xyz"));
        assert_eq!(nav.opened(), vec!["https://t.me/xyz"]);
    }
}

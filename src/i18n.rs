//! UI language negotiation.
//!
//! Catalogs live in `locales/` and are compiled in by `rust_i18n::i18n!`.
//! English is the fallback; Icelandic is the one shipped translation, kept
//! from the app family this core is bundled with. Adding a language means a
//! new `locales/<code>.yml` and a variant here.

use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    English,
    Icelandic,
}

impl Locale {
    /// Catalog name as registered with rust-i18n.
    pub const fn code(self) -> &'static str {
        match self {
            Locale::English => "en",
            Locale::Icelandic => "is",
        }
    }

    /// Map an Android language tag (`is-IS`, `en_US`, `fr`) to a catalog.
    /// Only the primary subtag matters; anything unknown reads as English.
    pub fn from_tag(tag: &str) -> Self {
        let primary = tag
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default();
        if primary.eq_ignore_ascii_case("is") {
            Locale::Icelandic
        } else {
            Locale::English
        }
    }
}

/// Record the host's language and switch the active catalog.
pub fn apply_locale(state: &mut AppState, tag: &str) -> Locale {
    let locale = Locale::from_tag(tag);
    if state.locale != locale {
        log::debug!("switching UI language to {}", locale.code());
    }
    state.locale = locale;
    rust_i18n::set_locale(locale.code());
    locale
}

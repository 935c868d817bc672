//! JSON message catalogs merged per locale.
//!
//! Each locale ships three catalogs (app, header, footer). They are deep-merged in that order,
//! so a later catalog overrides keys of an earlier one.

use serde_json::{Map, Value};
use std::sync::LazyLock;

/// Supported locale codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LocaleCode {
    /// English.
    En,
    /// Spanish.
    Es,
    /// French.
    Fr,
    /// Arabic.
    Ar,
}

impl LocaleCode {
    /// All supported locales in display order.
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [Self::En, Self::Es, Self::Fr, Self::Ar]
    }

    /// Two-letter language code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
            Self::Fr => "fr",
            Self::Ar => "ar",
        }
    }

    /// Map an arbitrary browser language tag to a supported locale, falling back to None.
    #[must_use]
    pub fn from_lang_tag(tag: &str) -> Option<Self> {
        let lowered = tag.to_ascii_lowercase();
        let base = lowered.split(['-', '_']).next().unwrap_or_default();
        Self::all()
            .iter()
            .copied()
            .find(|locale| locale.code() == base)
    }
}

/// Default fallback locale.
pub const DEFAULT_LOCALE: LocaleCode = LocaleCode::En;

/// Catalog families merged into every bundle, in merge order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageSource {
    /// Forum strings.
    App,
    /// Site header strings.
    Header,
    /// Site footer strings.
    Footer,
}

impl MessageSource {
    /// Merge order.
    pub const ALL: [Self; 3] = [Self::App, Self::Header, Self::Footer];
}

/// Translation bundle containing the merged JSON tree for the locale.
#[derive(Clone, Debug)]
pub struct TranslationBundle {
    /// Locale backing this bundle.
    pub locale: LocaleCode,
    tree: Value,
    rtl: bool,
}

impl PartialEq for TranslationBundle {
    fn eq(&self, other: &Self) -> bool {
        self.locale == other.locale
    }
}

impl TranslationBundle {
    /// Build the merged bundle for a locale.
    ///
    /// Unparseable catalogs are skipped; missing keys fall back to English at lookup time.
    #[must_use]
    pub fn new(locale: LocaleCode) -> Self {
        let mut tree = Value::Object(Map::new());
        for source in MessageSource::ALL {
            match serde_json::from_str::<Value>(raw_catalog(source, locale)) {
                Ok(catalog) => merge(&mut tree, catalog),
                Err(err) => tracing::warn!(
                    locale = locale.code(),
                    ?source,
                    error = %err,
                    "skipping unparseable message catalog"
                ),
            }
        }
        let rtl = tree
            .get("meta")
            .and_then(|meta| meta.get("rtl"))
            .and_then(Value::as_bool)
            .unwrap_or(false);
        Self { locale, tree, rtl }
    }

    /// Resolve a dotted path (`section.key`) with English fallback and caller default.
    #[must_use]
    pub fn text(&self, path: &str, default: &str) -> String {
        resolve(&self.tree, path)
            .or_else(|| resolve(&EN_FALLBACK.tree, path))
            .unwrap_or_else(|| default.to_string())
    }

    /// Whether the locale prefers RTL layout (bidi).
    #[must_use]
    pub const fn rtl(&self) -> bool {
        self.rtl
    }
}

static EN_FALLBACK: LazyLock<TranslationBundle> =
    LazyLock::new(|| TranslationBundle::new(LocaleCode::En));

fn merge(into: &mut Value, from: Value) {
    match (into, from) {
        (Value::Object(target), Value::Object(source)) => {
            for (key, value) in source {
                match target.get_mut(&key) {
                    Some(existing) => merge(existing, value),
                    None => {
                        target.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

fn resolve(tree: &Value, path: &str) -> Option<String> {
    let mut node = tree;
    for segment in path.split('.') {
        node = node.get(segment)?;
    }
    node.as_str().map(ToString::to_string)
}

const fn raw_catalog(source: MessageSource, locale: LocaleCode) -> &'static str {
    match (source, locale) {
        (MessageSource::App, LocaleCode::En) => include_str!("../../i18n/app/en.json"),
        (MessageSource::App, LocaleCode::Es) => include_str!("../../i18n/app/es.json"),
        (MessageSource::App, LocaleCode::Fr) => include_str!("../../i18n/app/fr.json"),
        (MessageSource::App, LocaleCode::Ar) => include_str!("../../i18n/app/ar.json"),
        (MessageSource::Header, LocaleCode::En) => include_str!("../../i18n/header/en.json"),
        (MessageSource::Header, LocaleCode::Es) => include_str!("../../i18n/header/es.json"),
        (MessageSource::Header, LocaleCode::Fr) => include_str!("../../i18n/header/fr.json"),
        (MessageSource::Header, LocaleCode::Ar) => include_str!("../../i18n/header/ar.json"),
        (MessageSource::Footer, LocaleCode::En) => include_str!("../../i18n/footer/en.json"),
        (MessageSource::Footer, LocaleCode::Es) => include_str!("../../i18n/footer/es.json"),
        (MessageSource::Footer, LocaleCode::Fr) => include_str!("../../i18n/footer/fr.json"),
        (MessageSource::Footer, LocaleCode::Ar) => include_str!("../../i18n/footer/ar.json"),
    }
}

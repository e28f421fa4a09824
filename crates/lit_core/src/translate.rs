//! Message catalog lookup with `{{param}}` interpolation.

use std::collections::HashMap;

use tracing::warn;

use crate::config::LitConfig;

/// Resolves a message key and its parameters into display text.
pub trait Localizer: Send + Sync {
    fn translate(&self, key: &str, params: &[(&str, String)]) -> String;
}

const EN_US: &[(&str, &str)] = &[
    (
        "views.fundNewAccountView.amountTooLow",
        "Minimum account size is {{accountMinimum}} sats",
    ),
    (
        "views.fundNewAccountView.amountTooHigh",
        "Amount must not exceed your wallet balance",
    ),
    (
        "views.fundNewAccountView.lowExpireBlocks",
        "Must be at least {{blocks}} blocks (one day)",
    ),
    (
        "views.fundNewAccountView.highExpireBlocks",
        "Must be no more than {{blocks}} blocks (one year)",
    ),
    (
        "views.fundNewAccountView.lowConfTarget",
        "Confirmation target must be greater than 1 block",
    ),
];

/// In-memory catalog for a single language. Missing keys resolve to the key itself.
#[derive(Debug, Clone)]
pub struct Translator {
    language: String,
    messages: HashMap<String, String>,
}

impl Translator {
    /// Built-in English catalog.
    pub fn en_us() -> Self {
        Self {
            language: "en-US".into(),
            messages: EN_US
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Catalog for `language`. Only en-US ships built in; any other language
    /// falls back to it.
    pub fn for_language(language: &str) -> Self {
        match language {
            "en-US" | "en" => Self::en_us(),
            other => {
                warn!("No catalog for language {other:?}, falling back to en-US");
                Self::en_us()
            }
        }
    }

    pub fn from_config(config: &LitConfig) -> Self {
        Self::for_language(&config.language)
    }

    pub fn empty(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            messages: HashMap::new(),
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn insert(&mut self, key: impl Into<String>, template: impl Into<String>) {
        self.messages.insert(key.into(), template.into());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.messages.contains_key(key)
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::en_us()
    }
}

impl Localizer for Translator {
    fn translate(&self, key: &str, params: &[(&str, String)]) -> String {
        let Some(template) = self.messages.get(key) else {
            return key.to_string();
        };
        interpolate(template, params)
    }
}

/// Binds a localizer to a key prefix, e.g. `views.fundNewAccountView`.
pub struct Prefixed<'a> {
    localizer: &'a dyn Localizer,
    prefix: &'a str,
}

pub fn prefixed<'a>(localizer: &'a dyn Localizer, prefix: &'a str) -> Prefixed<'a> {
    Prefixed { localizer, prefix }
}

impl Prefixed<'_> {
    pub fn l(&self, key: &str, params: &[(&str, String)]) -> String {
        self.localizer
            .translate(&format!("{}.{}", self.prefix, key), params)
    }
}

fn interpolate(template: &str, params: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (name, value) in params {
        out = out.replace(&format!("{{{{{name}}}}}"), value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolates_named_params() {
        let t = Translator::en_us();
        let msg = t.translate(
            "views.fundNewAccountView.amountTooLow",
            &[("accountMinimum", "100,000".into())],
        );
        assert_eq!(msg, "Minimum account size is 100,000 sats");
    }

    #[test]
    fn missing_key_falls_back_to_key() {
        let t = Translator::en_us();
        assert_eq!(t.translate("views.unknown.key", &[]), "views.unknown.key");
    }

    #[test]
    fn unused_placeholder_is_left_intact() {
        let mut t = Translator::empty("en-US");
        t.insert("a.b", "{{x}} and {{y}}");
        assert_eq!(t.translate("a.b", &[("x", "1".into())]), "1 and {{y}}");
    }

    #[test]
    fn from_config_uses_configured_language() {
        let mut config = LitConfig::default();
        let t = Translator::from_config(&config);
        assert_eq!(t.language(), "en-US");
        assert!(t.contains("views.fundNewAccountView.amountTooLow"));

        config.language = "fr-FR".into();
        let fallback = Translator::from_config(&config);
        assert_eq!(fallback.language(), "en-US");
        assert_eq!(
            fallback.translate("views.fundNewAccountView.amountTooHigh", &[]),
            "Amount must not exceed your wallet balance"
        );
    }

    #[test]
    fn prefixed_joins_key_with_dot() {
        let t = Translator::en_us();
        let l = prefixed(&t, "views.fundNewAccountView");
        assert_eq!(
            l.l("lowConfTarget", &[]),
            "Confirmation target must be greater than 1 block"
        );
        assert!(t.contains("views.fundNewAccountView.highExpireBlocks"));
        assert_eq!(t.language(), "en-US");
    }
}

//! Editor configuration, read from the environment.

use tracing::warn;

use storefront_products::{SkuFormat, SkuGenerator};

pub const SKU_SEPARATOR_ENV: &str = "STOREFRONT_SKU_SEPARATOR";
pub const SKU_WORD_SEPARATOR_ENV: &str = "STOREFRONT_SKU_WORD_SEPARATOR";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EditorConfig {
    pub sku: SkuFormat,
}

impl EditorConfig {
    /// Missing variables keep their defaults; invalid ones are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = SkuFormat::default();
        Self {
            sku: SkuFormat {
                separator: separator(&lookup, SKU_SEPARATOR_ENV, defaults.separator),
                word_separator: separator(&lookup, SKU_WORD_SEPARATOR_ENV, defaults.word_separator),
            },
        }
    }

    pub fn sku_generator(&self) -> SkuGenerator {
        SkuGenerator::new(self.sku)
    }
}

fn separator(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: char) -> char {
    let Some(raw) = lookup(key) else {
        return default;
    };

    match parse_separator(&raw) {
        Some(c) => c,
        None => {
            warn!(key, value = %raw, default = %default, "ignoring invalid SKU separator");
            default
        }
    }
}

/// Exactly one printable, non-alphanumeric ASCII character.
fn parse_separator(raw: &str) -> Option<char> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_punctuation() => Some(c),
        _ => None,
    }
}

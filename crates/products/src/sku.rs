//! Deterministic SKU derivation from product name and option labels.
//!
//! Each input is folded into an uppercase ASCII token: diacritics are stripped
//! (stroked letters and ligatures mapped to their base letters, then canonical
//! decomposition with combining marks dropped), every run of other
//! characters becomes a single word separator, and leading/trailing
//! separators are trimmed. Tokens are then joined as `PRODUCT_COLOR_SIZE`.

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Separators used when assembling a SKU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkuFormat {
    /// Placed between the product, color and size tokens.
    pub separator: char,
    /// Replaces runs of non-alphanumerics inside a token.
    pub word_separator: char,
}

impl Default for SkuFormat {
    fn default() -> Self {
        Self {
            separator: '_',
            word_separator: '-',
        }
    }
}

/// Pure SKU generator. Same inputs always yield the same SKU.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SkuGenerator {
    format: SkuFormat,
}

impl SkuGenerator {
    pub fn new(format: SkuFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> SkuFormat {
        self.format
    }

    /// `Tee`, `Navy Blue`, `XL` → `TEE_NAVY-BLUE_XL`.
    pub fn generate(&self, product: &str, color: &str, size: &str) -> String {
        let mut sku = self.token(product);
        for part in [color, size] {
            sku.push(self.format.separator);
            sku.push_str(&self.token(part));
        }
        sku
    }

    /// Normalize one input into an uppercase ASCII token.
    pub fn token(&self, input: &str) -> String {
        let mut folded = String::with_capacity(input.len());
        for c in input.chars() {
            match base_letters(c) {
                Some(base) => folded.push_str(base),
                None => folded.push(c),
            }
        }

        let mut out = String::with_capacity(folded.len());
        let mut gap = false;

        for c in folded.nfd().filter(|c| !is_combining_mark(*c)) {
            if c.is_ascii_alphanumeric() {
                if gap && !out.is_empty() {
                    out.push(self.format.word_separator);
                }
                gap = false;
                out.push(c.to_ascii_uppercase());
            } else {
                gap = true;
            }
        }

        out
    }
}

/// Letters whose mark is part of the glyph (strokes, ligatures) and therefore
/// have no canonical decomposition.
fn base_letters(c: char) -> Option<&'static str> {
    let base = match c {
        'Đ' | 'đ' | 'Ð' | 'ð' => "D",
        'Ø' | 'ø' => "O",
        'Ł' | 'ł' => "L",
        'Ħ' | 'ħ' => "H",
        'Ŧ' | 'ŧ' => "T",
        'ı' => "I",
        'ß' | 'ẞ' => "SS",
        'Æ' | 'æ' => "AE",
        'Œ' | 'œ' => "OE",
        'Þ' | 'þ' => "TH",
        _ => return None,
    };
    Some(base)
}

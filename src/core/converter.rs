use crate::core::numeral::from_roman;
use crate::core::table::LetterTable;
use crate::core::types::{Flavor, Letter};
use tracing::{debug, debug_span};

pub const WORD_SEPARATOR: &str = " - ";
pub const TOKEN_SEPARATOR: &str = ".";
pub const DEFAULT_PLACEHOLDER: char = '?';

/// Text to cipher and back, over the shared letter table.
pub struct CipherTransform {
    table: &'static LetterTable,
    placeholder: char,
}

impl Default for CipherTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl CipherTransform {
    pub fn new() -> Self {
        Self::with_placeholder(DEFAULT_PLACEHOLDER)
    }

    pub fn with_placeholder(placeholder: char) -> Self {
        Self {
            table: LetterTable::global(),
            placeholder,
        }
    }

    /// Encodes free text. The whole text is upper-cased first, so characters
    /// like `ß` expand to Latin letters. Words split on whitespace; inside a
    /// word every non-letter is dropped, and words left empty are dropped entirely.
    pub fn encode(&self, text: &str, flavor: Flavor) -> String {
        let _span = debug_span!("encode", ?flavor, input_len = text.len()).entered();

        let upper = text.to_uppercase();
        let words: Vec<String> = upper
            .split_whitespace()
            .filter_map(|word| {
                let tokens: Vec<String> = word
                    .chars()
                    .filter_map(|c| self.table.by_letter(c))
                    .map(|entry| match flavor {
                        Flavor::Roman => entry.roman.clone(),
                        Flavor::Numeric => entry.ordinal.to_string(),
                    })
                    .collect();
                (!tokens.is_empty()).then(|| tokens.join(TOKEN_SEPARATOR))
            })
            .collect();

        debug!(word_count = words.len());
        words.join(WORD_SEPARATOR)
    }

    pub fn encode_roman(&self, text: &str) -> String {
        self.encode(text, Flavor::Roman)
    }

    pub fn encode_numeric(&self, text: &str) -> String {
        self.encode(text, Flavor::Numeric)
    }

    /// Decodes a Roman-flavor cipher string. Separators are exact literals;
    /// a token that does not parse to 1..=26 becomes the placeholder.
    pub fn decode(&self, cipher: &str) -> String {
        let _span = debug_span!("decode", input_len = cipher.len()).entered();

        let mut unmapped = 0usize;
        let words: Vec<String> = cipher
            .split(WORD_SEPARATOR)
            .map(|word| {
                word.split(TOKEN_SEPARATOR)
                    .map(|token| {
                        let value = from_roman(&token.trim().to_uppercase());
                        match Letter::from_ordinal(value) {
                            Some(letter) => letter.as_char(),
                            None => {
                                unmapped += 1;
                                self.placeholder
                            }
                        }
                    })
                    .collect()
            })
            .collect();

        if unmapped > 0 {
            debug!(unmapped, "tokens outside the letter range");
        }
        words.join(" ")
    }
}

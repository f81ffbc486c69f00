//! Recovery of a canonical cipher string from noisy recognizer text.
//!
//! Classification runs as an ordered pipeline:
//! normalize -> extract candidates -> validity filter -> reconstruct.
//! The Roman flavor is tried first over the whole input; the numeric flavor
//! is only considered when no numeral run survives.

use crate::core::converter::{TOKEN_SEPARATOR, WORD_SEPARATOR};
use crate::core::types::{Classification, Flavor};
use crate::settings::{DetectorSettings, WordBoundaries};
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, debug_span};

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static DISALLOWED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Z0-9.\- ]").unwrap());
static SEGMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-+").unwrap());
static NUMERAL_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[IVXLCDM]+").unwrap());
static STRICT_NUMERAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^M{0,3}(CM|CD|D?C{0,3})(XC|XL|L?X{0,3})(IX|IV|V?I{0,3})$").unwrap()
});
static DIGIT_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]{1,2}").unwrap());

pub const DEFAULT_NOISY_RUN_MAX_LEN: usize = 6;

/// How a numeral run fared against the validity filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumeralValidity {
    /// Matches the strict grammar for 1..=3999.
    Canonical,
    /// Breaks the grammar but is short enough to be recognizer noise.
    Noisy,
    Rejected,
}

pub struct CipherFormatDetector {
    noisy_run_max_len: usize,
    word_boundaries: WordBoundaries,
}

impl Default for CipherFormatDetector {
    fn default() -> Self {
        Self {
            noisy_run_max_len: DEFAULT_NOISY_RUN_MAX_LEN,
            word_boundaries: WordBoundaries::Flatten,
        }
    }
}

impl CipherFormatDetector {
    pub fn new(settings: &DetectorSettings) -> Self {
        Self {
            noisy_run_max_len: settings.noisy_run_max_len,
            word_boundaries: settings.word_boundaries,
        }
    }

    pub fn classify(&self, raw: &str) -> Classification {
        let _span = debug_span!("classify", input_len = raw.len()).entered();

        let Some(normalized) = normalize(raw) else {
            debug!("nothing left after normalization");
            return Classification::Invalid;
        };
        let segments = self.segments(&normalized);

        if let Some(text) = reconstruct(&segments, |s| self.numeral_tokens(s)) {
            debug!(flavor = "roman", %text);
            return Classification::Valid {
                text,
                flavor: Flavor::Roman,
            };
        }
        if let Some(text) = reconstruct(&segments, numeric_tokens) {
            debug!(flavor = "numeric", %text);
            return Classification::Valid {
                text,
                flavor: Flavor::Numeric,
            };
        }

        debug!("no candidate survived");
        Classification::Invalid
    }

    pub fn validity(&self, run: &str) -> NumeralValidity {
        if STRICT_NUMERAL_RE.is_match(run) {
            NumeralValidity::Canonical
        } else if (1..=self.noisy_run_max_len).contains(&run.len())
            && run.chars().all(crate::core::numeral::is_numeral_char)
        {
            NumeralValidity::Noisy
        } else {
            NumeralValidity::Rejected
        }
    }

    /// Maximal numeral-alphabet runs in `segment` that pass the validity filter.
    fn numeral_tokens(&self, segment: &str) -> Vec<String> {
        NUMERAL_RUN_RE
            .find_iter(segment)
            .map(|m| m.as_str())
            .filter(|run| {
                let validity = self.validity(run);
                if validity == NumeralValidity::Rejected {
                    debug!(run, "numeral run rejected");
                }
                validity != NumeralValidity::Rejected
            })
            .map(String::from)
            .collect()
    }

    fn segments<'a>(&self, normalized: &'a str) -> Vec<&'a str> {
        match self.word_boundaries {
            WordBoundaries::Flatten => vec![normalized],
            WordBoundaries::Segments => SEGMENT_RE.split(normalized).collect(),
        }
    }
}

/// Collapse whitespace, upper-case, and keep only `[A-Z0-9.- ]`.
/// Returns `None` when nothing meaningful is left.
pub fn normalize(raw: &str) -> Option<String> {
    let collapsed = WHITESPACE_RE.replace_all(raw, " ").to_uppercase();
    let kept = DISALLOWED_RE.replace_all(&collapsed, "");
    let trimmed = kept.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Decimal runs of one or two digits whose value is a letter ordinal,
/// re-rendered without leading zeros.
fn numeric_tokens(segment: &str) -> Vec<String> {
    DIGIT_RUN_RE
        .find_iter(segment)
        .filter_map(|m| m.as_str().parse::<u8>().ok())
        .filter(|n| (1..=26).contains(n))
        .map(|n| n.to_string())
        .collect()
}

fn reconstruct<F>(segments: &[&str], extract: F) -> Option<String>
where
    F: Fn(&str) -> Vec<String>,
{
    let words: Vec<String> = segments
        .iter()
        .map(|&segment| extract(segment))
        .filter(|tokens| !tokens.is_empty())
        .map(|tokens| tokens.join(TOKEN_SEPARATOR))
        .collect();
    (!words.is_empty()).then(|| words.join(WORD_SEPARATOR))
}

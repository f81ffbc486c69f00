// --- File: src/core/table.rs
use crate::core::numeral;
use crate::core::types::{Letter, LetterEntry};
use std::collections::HashMap;
use std::sync::OnceLock;

pub const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Bijection between the 26 letters, their ordinals and their numerals.
/// Built once and shared read-only.
#[derive(Debug)]
pub struct LetterTable {
    entries: Vec<LetterEntry>,
    by_roman: HashMap<String, Letter>,
}

impl LetterTable {
    fn build() -> Self {
        let entries: Vec<LetterEntry> = ALPHABET
            .chars()
            .zip(1u8..)
            .filter_map(|(c, ordinal)| {
                Letter::from_char(c).map(|letter| LetterEntry {
                    letter,
                    ordinal,
                    roman: numeral::greedy(u32::from(ordinal)),
                })
            })
            .collect();
        let by_roman = entries
            .iter()
            .map(|entry| (entry.roman.clone(), entry.letter))
            .collect();
        Self { entries, by_roman }
    }

    /// Get or initialize the process-wide table.
    pub fn global() -> &'static LetterTable {
        static INSTANCE: OnceLock<LetterTable> = OnceLock::new();
        INSTANCE.get_or_init(Self::build)
    }

    /// Case-insensitive lookup. Non-letters yield `None`.
    pub fn by_letter(&self, c: char) -> Option<&LetterEntry> {
        let letter = Letter::from_char(c)?;
        self.entries.get(usize::from(letter.ordinal()) - 1)
    }

    /// Exact lookup of a minimal numeral such as `"XIV"`.
    pub fn by_roman(&self, roman: &str) -> Option<Letter> {
        self.by_roman.get(roman).copied()
    }

    pub fn by_ordinal(&self, ordinal: i64) -> Option<&LetterEntry> {
        let letter = Letter::from_ordinal(ordinal)?;
        self.entries.get(usize::from(letter.ordinal()) - 1)
    }

    /// All 26 entries in ordinal order.
    pub fn entries(&self) -> impl Iterator<Item = &LetterEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::numeral::{from_roman, to_roman};

    #[test]
    fn has_26_entries_in_order() {
        let table = LetterTable::global();
        let letters: String = table.entries().map(|e| e.letter.as_char()).collect();
        assert_eq!(letters, ALPHABET);
        for (i, entry) in table.entries().enumerate() {
            assert_eq!(usize::from(entry.ordinal), i + 1);
        }
    }

    #[test]
    fn roman_matches_codec() {
        for entry in LetterTable::global().entries() {
            assert_eq!(entry.roman, to_roman(u32::from(entry.ordinal)).unwrap());
            assert_eq!(from_roman(&entry.roman), i64::from(entry.ordinal));
        }
    }

    #[test]
    fn forward_and_reverse_agree() {
        let table = LetterTable::global();
        for entry in table.entries() {
            assert_eq!(table.by_roman(&entry.roman), Some(entry.letter));
            assert_eq!(table.by_letter(entry.letter.as_char()), Some(entry));
        }
    }

    #[test]
    fn lookup_by_letter_ignores_case() {
        let table = LetterTable::global();
        let entry = table.by_letter('w').unwrap();
        assert_eq!(entry.ordinal, 23);
        assert_eq!(entry.roman, "XXIII");
    }

    #[test]
    fn unknown_keys_are_absent() {
        let table = LetterTable::global();
        assert!(table.by_letter('3').is_none());
        assert!(table.by_letter('-').is_none());
        assert!(table.by_roman("IIII").is_none());
        assert!(table.by_roman("XXVII").is_none());
        assert!(table.by_ordinal(0).is_none());
        assert!(table.by_ordinal(27).is_none());
    }

    #[test]
    fn spot_values() {
        let table = LetterTable::global();
        assert_eq!(table.by_ordinal(8).unwrap().roman, "VIII");
        assert_eq!(table.by_ordinal(26).unwrap().roman, "XXVI");
        assert_eq!(table.by_roman("XIX").map(Letter::as_char), Some('S'));
    }
}

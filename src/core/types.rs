// src/core/types.rs
use serde::Serialize;
use std::fmt;

/// One of the 26 Latin letters, stored in canonical uppercase form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "char")]
pub struct Letter(u8);

impl Letter {
    /// Case-insensitive. Returns `None` for anything outside A-Z.
    pub fn from_char(c: char) -> Option<Self> {
        let upper = c.to_ascii_uppercase();
        upper.is_ascii_uppercase().then(|| Letter(upper as u8))
    }

    /// Letter for an ordinal in 1..=26.
    pub fn from_ordinal(ordinal: i64) -> Option<Self> {
        if (1..=26).contains(&ordinal) {
            Some(Letter(b'A' + (ordinal - 1) as u8))
        } else {
            None
        }
    }

    pub fn ordinal(self) -> u8 {
        self.0 - b'A' + 1
    }

    pub fn as_char(self) -> char {
        self.0 as char
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl From<Letter> for char {
    fn from(letter: Letter) -> char {
        letter.as_char()
    }
}

/// A row of the letter table: the letter, its 1-based ordinal and its numeral.
/// `roman` is always the minimal numeral for `ordinal`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LetterEntry {
    pub letter: Letter,
    pub ordinal: u8,
    pub roman: String,
}

/// Which token alphabet a cipher string uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Flavor {
    Roman,
    Numeric,
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Flavor::Roman => f.write_str("roman"),
            Flavor::Numeric => f.write_str("numeric"),
        }
    }
}

/// Outcome of classifying recognizer text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Classification {
    Valid { text: String, flavor: Flavor },
    Invalid,
}

impl Classification {
    pub fn is_valid(&self) -> bool {
        matches!(self, Classification::Valid { .. })
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Classification::Valid { text, .. } => Some(text),
            Classification::Invalid => None,
        }
    }

    pub fn flavor(&self) -> Option<Flavor> {
        match self {
            Classification::Valid { flavor, .. } => Some(*flavor),
            Classification::Invalid => None,
        }
    }
}

/// Both renderings of one piece of plain text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Encoding {
    pub roman: String,
    pub numeric: String,
}

/// Recognizer text after classification, plus the decoded text when the
/// flavor has a decode path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanOutcome {
    pub classification: Classification,
    pub decoded: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letter_is_case_insensitive() {
        assert_eq!(Letter::from_char('q'), Letter::from_char('Q'));
        assert_eq!(Letter::from_char('q').unwrap().as_char(), 'Q');
        assert_eq!(Letter::from_char('q').unwrap().ordinal(), 17);
    }

    #[test]
    fn letter_rejects_non_latin() {
        assert!(Letter::from_char('7').is_none());
        assert!(Letter::from_char('é').is_none());
        assert!(Letter::from_char(' ').is_none());
    }

    #[test]
    fn ordinal_bounds() {
        assert_eq!(Letter::from_ordinal(1).unwrap().as_char(), 'A');
        assert_eq!(Letter::from_ordinal(26).unwrap().as_char(), 'Z');
        assert!(Letter::from_ordinal(0).is_none());
        assert!(Letter::from_ordinal(27).is_none());
        assert!(Letter::from_ordinal(-3).is_none());
    }

    #[test]
    fn entry_serializes_letter_as_char() {
        let entry = LetterEntry {
            letter: Letter::from_char('n').unwrap(),
            ordinal: 14,
            roman: "XIV".into(),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["letter"], "N");
        assert_eq!(json["ordinal"], 14);
        assert_eq!(json["roman"], "XIV");
    }

    #[test]
    fn classification_serializes_with_status_tag() {
        let found = Classification::Valid {
            text: "I.II".into(),
            flavor: Flavor::Roman,
        };
        let json = serde_json::to_value(&found).unwrap();
        assert_eq!(json["status"], "valid");
        assert_eq!(json["flavor"], "roman");
        assert_eq!(json["text"], "I.II");

        let json = serde_json::to_value(Classification::Invalid).unwrap();
        assert_eq!(json["status"], "invalid");
    }
}

use crate::core::converter::CipherTransform;
use crate::core::detector::CipherFormatDetector;
use crate::core::table::LetterTable;
use crate::core::types::{Classification, Encoding, Flavor, LetterEntry, ScanOutcome};
use crate::error::CipherError;
use crate::settings::{parse_settings_toml, Settings};
use tracing::debug;

// The engine composes the transform and the detector with one set of settings.
// Holds no mutable state.
pub struct CipherEngine {
    pub transform: CipherTransform,
    pub detector: CipherFormatDetector,
    table: &'static LetterTable,
    settings: Settings,
}

impl Default for CipherEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CipherEngine {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            transform: CipherTransform::with_placeholder(settings.output.placeholder),
            detector: CipherFormatDetector::new(&settings.detector),
            table: LetterTable::global(),
            settings,
        }
    }

    pub fn from_settings_toml(toml_str: &str) -> Result<Self, CipherError> {
        Ok(Self::with_settings(parse_settings_toml(toml_str)?))
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Both renderings of `text`. Blank input yields empty renderings.
    pub fn encode(&self, text: &str) -> Encoding {
        if text.trim().is_empty() {
            return Encoding::default();
        }
        Encoding {
            roman: self.transform.encode(text, Flavor::Roman),
            numeric: self.transform.encode(text, Flavor::Numeric),
        }
    }

    /// Decodes a Roman-flavor cipher. Blank input yields an empty string.
    pub fn decode(&self, cipher: &str) -> String {
        if cipher.trim().is_empty() {
            return String::new();
        }
        self.transform.decode(cipher)
    }

    pub fn classify(&self, raw: &str) -> Classification {
        self.detector.classify(raw)
    }

    /// Classifies recognizer text and decodes it when the flavor allows.
    pub fn scan(&self, raw: &str) -> ScanOutcome {
        let classification = self.detector.classify(raw);
        let decoded = match &classification {
            Classification::Valid {
                text,
                flavor: Flavor::Roman,
            } => Some(self.transform.decode(text)),
            Classification::Valid {
                flavor: Flavor::Numeric,
                ..
            } => {
                debug!("numeric cipher recognized; no decode path");
                None
            }
            Classification::Invalid => None,
        };
        ScanOutcome {
            classification,
            decoded,
        }
    }

    pub fn reference_table(&self) -> impl Iterator<Item = &LetterEntry> {
        self.table.entries()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::default_toml;

    #[test]
    fn encode_gives_both_renderings() {
        let engine = CipherEngine::new();
        let out = engine.encode("Hello world");
        assert_eq!(out.roman, "VIII.V.XII.XII.XV - XXIII.XV.XVIII.XII.IV");
        assert_eq!(out.numeric, "8.5.12.12.15 - 23.15.18.12.4");
    }

    #[test]
    fn blank_input_is_empty_both_ways() {
        let engine = CipherEngine::new();
        assert_eq!(engine.encode("   "), Encoding::default());
        assert_eq!(engine.decode(""), "");
        assert_eq!(engine.decode(" \n"), "");
    }

    #[test]
    fn scan_decodes_roman() {
        let engine = CipherEngine::new();
        let out = engine.scan("XII XV XXII V");
        assert_eq!(out.classification.flavor(), Some(Flavor::Roman));
        assert_eq!(out.classification.text(), Some("XII.XV.XXII.V"));
        assert_eq!(out.decoded.as_deref(), Some("LOVE"));
    }

    #[test]
    fn scan_numeric_has_no_decode() {
        let engine = CipherEngine::new();
        let out = engine.scan("19 20 1 13 16");
        assert_eq!(out.classification.flavor(), Some(Flavor::Numeric));
        assert_eq!(out.classification.text(), Some("19.20.1.13.16"));
        assert!(out.decoded.is_none());
    }

    #[test]
    fn scan_invalid() {
        let out = CipherEngine::new().scan("@@@###");
        assert!(!out.classification.is_valid());
        assert!(out.decoded.is_none());
    }

    #[test]
    fn settings_flow_through() {
        let toml = default_toml()
            .replace("\"flatten\"", "\"segments\"")
            .replace("placeholder = \"?\"", "placeholder = \"*\"");
        let engine = CipherEngine::from_settings_toml(&toml).unwrap();
        assert_eq!(engine.decode("I.XL"), "A*");
        let out = engine.scan("XII.XV - XXII.V");
        assert_eq!(out.decoded.as_deref(), Some("LO VE"));
    }

    #[test]
    fn bad_settings_are_reported() {
        let err = CipherEngine::from_settings_toml("[detector]").err().unwrap();
        assert!(matches!(err, CipherError::Settings(_)));
    }

    #[test]
    fn reference_table_lists_alphabet() {
        let engine = CipherEngine::new();
        let rows: Vec<_> = engine.reference_table().collect();
        assert_eq!(rows.len(), 26);
        assert_eq!(rows[11].roman, "XII");
        assert_eq!(rows[11].letter.as_char(), 'L');
    }
}

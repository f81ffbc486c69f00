//! Settings loaded from TOML.
//!
//! Default values are embedded via `include_str!("default_settings.toml")`.
//! A custom file must carry every table; `parse_settings_toml` validates it.

use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

const MAX_NOISY_RUN_LEN: usize = 15;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub detector: DetectorSettings,
    pub output: OutputSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DetectorSettings {
    pub noisy_run_max_len: usize,
    pub word_boundaries: WordBoundaries,
}

/// How classification treats word structure in recognized text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordBoundaries {
    /// Every surviving token lands in one word.
    Flatten,
    /// Runs of `-` delimit words.
    Segments,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputSettings {
    pub numeric_breakdown: bool,
    pub placeholder: char,
}

impl Default for Settings {
    fn default() -> Self {
        parse_settings_toml(DEFAULT_SETTINGS_TOML).expect("embedded settings TOML must be valid")
    }
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    let run = s.detector.noisy_run_max_len;
    if run == 0 || run > MAX_NOISY_RUN_LEN {
        return Err(SettingsError::InvalidValue {
            field: "detector.noisy_run_max_len".into(),
            reason: format!("must be 1..={MAX_NOISY_RUN_LEN}, got {run}"),
        });
    }
    let placeholder = s.output.placeholder;
    if placeholder.is_alphabetic() || placeholder.is_whitespace() {
        return Err(SettingsError::InvalidValue {
            field: "output.placeholder".into(),
            reason: format!("must not be a letter or whitespace, got {placeholder:?}"),
        });
    }
    Ok(())
}

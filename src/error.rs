// File: src/error.rs
use crate::settings::SettingsError;

#[derive(Debug, thiserror::Error)]
pub enum CipherError {
    #[error("numeral out of range: {0} (expected 1..=3999)")]
    NumeralOutOfRange(u32),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

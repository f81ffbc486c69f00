// src/lib.rs

pub mod c_api;
pub mod core;
pub mod error;
pub mod output;
pub mod settings;
pub mod trace_init;

pub use crate::core::converter::CipherTransform;
pub use crate::core::detector::CipherFormatDetector;
pub use crate::core::engine::CipherEngine;
pub use crate::core::numeral::{from_roman, to_roman};
pub use crate::core::table::LetterTable;
pub use crate::core::types::{Classification, Encoding, Flavor, Letter, LetterEntry, ScanOutcome};
pub use crate::error::CipherError;

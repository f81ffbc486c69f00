pub mod converter;
pub mod detector;
pub mod engine;
pub mod numeral;
pub mod table;
pub mod types;

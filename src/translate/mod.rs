pub mod interface;
pub mod client;

pub use interface::{TranslateRequest, TranslateResult, Translator};
pub use client::GoogleTranslator;

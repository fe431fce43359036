pub mod config;
pub mod error;
pub mod handlers;
pub mod llm;
pub mod prompt;
pub mod routes;
pub mod sign;
pub mod state;
pub mod translate;
pub mod tts;
pub mod utils;

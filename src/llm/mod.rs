pub mod interface;
pub mod gemini_llm;

pub use interface::{GenerativeModel, ResponseMode};
pub use gemini_llm::GeminiLLM;

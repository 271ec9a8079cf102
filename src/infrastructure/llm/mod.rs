//! Completion-service clients

mod openai;

pub use openai::{OpenAiReadmeSummarizer, DEFAULT_BASE_URL, DEFAULT_MODEL};

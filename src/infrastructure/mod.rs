//! Infrastructure layer: stores, outbound clients, and services

pub mod api_key;
pub mod github;
pub mod http;
pub mod llm;
pub mod logging;
pub mod summarizer;
pub mod user;

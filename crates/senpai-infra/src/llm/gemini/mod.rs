//! Google Gemini generation provider.

mod client;
mod types;

pub use client::GeminiProvider;

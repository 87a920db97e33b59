//! Infrastructure implementations for the senpai chat relay.
//!
//! Concrete [`senpai_core::llm::GenerationProvider`] backends and
//! environment-driven configuration.

pub mod config;
pub mod llm;

//! Shared domain types for the senpai chat relay.
//!
//! This crate contains the types used across the relay: conversation turns,
//! generation request shapes, and the error taxonomy.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod chat;
pub mod error;
pub mod llm;

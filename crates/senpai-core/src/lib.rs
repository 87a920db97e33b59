//! Business logic for the senpai chat relay.
//!
//! Holds the in-process conversation store, the generation provider
//! abstraction, and the turn orchestrator that sequences a request's
//! read-history / generate / append cycle. Provider implementations live
//! in senpai-infra.

pub mod chat;
pub mod conversation;
pub mod llm;

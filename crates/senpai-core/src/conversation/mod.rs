//! Session-keyed conversation state.

pub mod store;

pub use store::ConversationStore;

//! HTTP layer for the senpai chat relay.
//!
//! Axum routes `/chat` and `/deletechat/{chatId}` with CORS support and
//! the `{error, response, status}` error envelope.

pub mod error;
pub mod handlers;
pub mod router;

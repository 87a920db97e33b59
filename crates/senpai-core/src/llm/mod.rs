//! Generation provider abstraction.
//!
//! [`provider::GenerationProvider`] is the seam between the orchestrator
//! and the remote generative-language service; [`box_provider::BoxGenerationProvider`]
//! is its object-safe dynamic-dispatch wrapper.

pub mod box_provider;
pub mod provider;

pub use box_provider::BoxGenerationProvider;
pub use provider::GenerationProvider;

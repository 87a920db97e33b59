//! Turn orchestration.

pub mod orchestrator;

pub use orchestrator::TurnOrchestrator;

//! Application state wiring the store, orchestrator, and provider together.
//!
//! The orchestrator is generic over its provider, but AppState pins it to
//! [`BoxGenerationProvider`] so axum handlers stay non-generic and tests
//! can inject a fake through the same type.

use std::sync::Arc;

use senpai_core::chat::TurnOrchestrator;
use senpai_core::conversation::ConversationStore;
use senpai_core::llm::BoxGenerationProvider;
use senpai_infra::config::RelayConfig;
use senpai_infra::llm::GeminiProvider;

/// Orchestrator type used by the HTTP layer.
pub type ConcreteTurnOrchestrator = TurnOrchestrator<BoxGenerationProvider>;

/// Shared application state for all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ConversationStore>,
    pub orchestrator: Arc<ConcreteTurnOrchestrator>,
}

impl AppState {
    /// Build state around the real Gemini provider.
    pub fn init(config: RelayConfig) -> Self {
        let provider = GeminiProvider::new(config.api_key, config.model);
        Self::with_provider(BoxGenerationProvider::new(provider), config.system_instruction)
    }

    /// Build state around an arbitrary boxed provider (tests use a fake).
    pub fn with_provider(provider: BoxGenerationProvider, system_instruction: String) -> Self {
        let store = Arc::new(ConversationStore::new());
        let orchestrator = Arc::new(TurnOrchestrator::new(
            store.clone(),
            provider,
            system_instruction,
        ));
        Self {
            store,
            orchestrator,
        }
    }
}

//! Turn orchestrator sequencing one request against conversation state.
//!
//! `process_turn` is conceptually a single transaction: fetch history,
//! call the remote provider, append the user/model pair. A per-session
//! async mutex is held across the whole sequence, so two in-flight turns
//! for the same session cannot interleave their read/append cycles.
//! Turns for different sessions never contend.
//!
//! Holding the session lock across the remote call means slow generations
//! serialize same-session requests. Conversational use is inherently
//! sequential per session, so that tradeoff is accepted.
//!
//! A delete racing an in-flight turn is last-writer-wins: delete before
//! the append leaves the log recreated with just that turn's pair; delete
//! after removes the session including the just-appended turns.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, error};

use senpai_types::chat::Turn;
use senpai_types::error::ChatError;
use senpai_types::llm::GenerationRequest;

use crate::conversation::ConversationStore;
use crate::llm::GenerationProvider;

/// Orchestrates a single chat turn: validate, serialize per session,
/// generate, append.
///
/// Generic over the provider so tests inject a fake without network access.
pub struct TurnOrchestrator<P: GenerationProvider> {
    store: Arc<ConversationStore>,
    provider: P,
    system_instruction: String,
    /// One lock per session key; same-session turns queue here.
    gates: DashMap<String, Arc<Mutex<()>>>,
}

impl<P: GenerationProvider> TurnOrchestrator<P> {
    /// Create an orchestrator over the given store and provider.
    ///
    /// `system_instruction` is the fixed persona instruction, immutable
    /// for the process lifetime.
    pub fn new(store: Arc<ConversationStore>, provider: P, system_instruction: String) -> Self {
        Self {
            store,
            provider,
            system_instruction,
            gates: DashMap::new(),
        }
    }

    /// Process one chat turn and return the model's reply.
    ///
    /// On provider failure nothing is appended -- the log never contains
    /// an orphaned user turn with no matching reply. The provider cause is
    /// logged here and carried in [`ChatError::GenerationFailed`].
    pub async fn process_turn(&self, session_id: &str, prompt: &str) -> Result<String, ChatError> {
        // Validation happens before any store or remote access.
        if session_id.trim().is_empty() {
            return Err(ChatError::InvalidRequest(
                "'chatId' must not be empty".to_string(),
            ));
        }
        if prompt.trim().is_empty() {
            return Err(ChatError::InvalidRequest(
                "'prompt' must not be empty".to_string(),
            ));
        }

        let gate = self.session_gate(session_id);
        let _guard = gate.lock().await;

        let history = self.store.history(session_id);
        debug!(
            session_id,
            history_len = history.len(),
            provider = self.provider.name(),
            "processing chat turn"
        );

        let request = GenerationRequest {
            system_instruction: self.system_instruction.clone(),
            history,
            prompt: prompt.to_string(),
        };

        let reply = match self.provider.generate(&request).await {
            Ok(reply) => reply,
            Err(cause) => {
                error!(
                    session_id,
                    provider = self.provider.name(),
                    error = %cause,
                    "generation request failed"
                );
                return Err(ChatError::GenerationFailed(cause));
            }
        };

        self.store.append_exchange(session_id, prompt, reply.clone());
        debug!(session_id, reply_len = reply.len(), "chat turn completed");

        Ok(reply)
    }

    /// Read-only view of a session's log.
    pub fn history(&self, session_id: &str) -> Vec<Turn> {
        self.store.history(session_id)
    }

    /// Drop the per-session lock entry after a session is deleted.
    ///
    /// An in-flight turn already holds its own `Arc` to the mutex and
    /// finishes normally; this only keeps the gate map from growing
    /// without bound over the process lifetime.
    pub fn forget_session(&self, session_id: &str) {
        self.gates.remove(session_id);
    }

    fn session_gate(&self, session_id: &str) -> Arc<Mutex<()>> {
        self.gates
            .entry(session_id.to_string())
            .or_default()
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};

    use tokio::sync::Semaphore;

    use senpai_types::chat::TurnRole;
    use senpai_types::llm::LlmError;

    /// Fake provider: echoes the prompt, optionally fails, and blocks on a
    /// zero-permit semaphore when the prompt is "block".
    struct FakeProvider {
        fail: bool,
        gate: Arc<Semaphore>,
        calls: AtomicUsize,
    }

    impl FakeProvider {
        fn new() -> Self {
            Self {
                fail: false,
                gate: Arc::new(Semaphore::new(usize::MAX >> 4)),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new()
            }
        }

        fn gated(gate: Arc<Semaphore>) -> Self {
            Self {
                gate,
                ..Self::new()
            }
        }
    }

    impl GenerationProvider for FakeProvider {
        fn name(&self) -> &str {
            "fake"
        }

        async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(LlmError::Provider {
                    message: "simulated outage".to_string(),
                });
            }
            if request.prompt == "block" {
                let _permit = self.gate.acquire().await.unwrap();
            }
            Ok(format!("re: {}", request.prompt))
        }
    }

    fn orchestrator(provider: FakeProvider) -> (Arc<ConversationStore>, TurnOrchestrator<FakeProvider>) {
        let store = Arc::new(ConversationStore::new());
        let orch = TurnOrchestrator::new(store.clone(), provider, "be brief".to_string());
        (store, orch)
    }

    #[tokio::test]
    async fn test_successful_turn_appends_pair_and_returns_reply() {
        let (store, orch) = orchestrator(FakeProvider::new());

        let reply = orch.process_turn("abc", "hi").await.unwrap();
        assert_eq!(reply, "re: hi");

        let log = store.history("abc");
        assert_eq!(log, vec![Turn::user("hi"), Turn::model("re: hi")]);
    }

    #[tokio::test]
    async fn test_successive_turns_interleave_in_call_order() {
        let (store, orch) = orchestrator(FakeProvider::new());

        for prompt in ["one", "two", "three"] {
            orch.process_turn("abc", prompt).await.unwrap();
        }

        let log = store.history("abc");
        assert_eq!(log.len(), 6);
        for (i, prompt) in ["one", "two", "three"].iter().enumerate() {
            assert_eq!(log[2 * i], Turn::user(*prompt));
            assert_eq!(log[2 * i + 1], Turn::model(format!("re: {prompt}")));
        }
    }

    #[tokio::test]
    async fn test_provider_sees_history_but_not_new_prompt() {
        let (store, orch) = orchestrator(FakeProvider::new());
        store.append_exchange("abc", "hi", "re: hi");

        orch.process_turn("abc", "again").await.unwrap();

        // The new pair lands after the preexisting one.
        let log = store.history("abc");
        assert_eq!(log.len(), 4);
        assert_eq!(log[2], Turn::user("again"));
    }

    #[tokio::test]
    async fn test_failed_generation_leaves_log_untouched() {
        let (store, orch) = orchestrator(FakeProvider::failing());
        store.append_exchange("abc", "hi", "re: hi");
        let before = store.history("abc").len();

        let err = orch.process_turn("abc", "boom").await.unwrap_err();
        assert!(matches!(err, ChatError::GenerationFailed(_)));
        assert_eq!(store.history("abc").len(), before);
    }

    #[tokio::test]
    async fn test_empty_inputs_rejected_before_any_access() {
        let (store, orch) = orchestrator(FakeProvider::new());

        let err = orch.process_turn("", "hi").await.unwrap_err();
        assert!(matches!(err, ChatError::InvalidRequest(_)));

        let err = orch.process_turn("abc", "   ").await.unwrap_err();
        assert!(matches!(err, ChatError::InvalidRequest(_)));

        // No provider call and no lazily-created session.
        assert_eq!(orch.provider.calls.load(Ordering::SeqCst), 0);
        assert_eq!(store.session_count(), 0);
    }

    #[tokio::test]
    async fn test_concurrent_same_session_turns_stay_atomic() {
        const N: usize = 8;

        let store = Arc::new(ConversationStore::new());
        let orch = Arc::new(TurnOrchestrator::new(
            store.clone(),
            FakeProvider::new(),
            "be brief".to_string(),
        ));

        let mut handles = Vec::new();
        for i in 0..N {
            let orch = orch.clone();
            handles.push(tokio::spawn(async move {
                orch.process_turn("abc", &format!("prompt-{i}")).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        // Exactly N intact pairs in some serial order.
        let log = store.history("abc");
        assert_eq!(log.len(), 2 * N);
        for pair in log.chunks(2) {
            assert_eq!(pair[0].role, TurnRole::User);
            assert_eq!(pair[1].role, TurnRole::Model);
            assert_eq!(pair[1].text, format!("re: {}", pair[0].text));
        }
    }

    #[tokio::test]
    async fn test_other_sessions_unblocked_by_in_flight_turn() {
        let gate = Arc::new(Semaphore::new(0));
        let store = Arc::new(ConversationStore::new());
        let orch = Arc::new(TurnOrchestrator::new(
            store.clone(),
            FakeProvider::gated(gate.clone()),
            "be brief".to_string(),
        ));

        // Session "a" parks inside the provider call, holding its gate.
        let blocked = tokio::spawn({
            let orch = orch.clone();
            async move { orch.process_turn("a", "block").await }
        });
        tokio::task::yield_now().await;

        // Session "b" completes while "a" is still in flight.
        orch.process_turn("b", "hi").await.unwrap();
        assert_eq!(store.history("b").len(), 2);
        assert!(store.history("a").is_empty());

        gate.add_permits(1);
        blocked.await.unwrap().unwrap();
        assert_eq!(store.history("a").len(), 2);
    }

    #[tokio::test]
    async fn test_delete_during_in_flight_turn_is_last_writer_wins() {
        let gate = Arc::new(Semaphore::new(0));
        let store = Arc::new(ConversationStore::new());
        let orch = Arc::new(TurnOrchestrator::new(
            store.clone(),
            FakeProvider::gated(gate.clone()),
            "be brief".to_string(),
        ));
        store.append_exchange("a", "hi", "re: hi");

        let in_flight = tokio::spawn({
            let orch = orch.clone();
            async move { orch.process_turn("a", "block").await }
        });
        tokio::task::yield_now().await;

        // Delete completes before the in-flight append.
        assert!(store.delete_session("a"));
        orch.forget_session("a");

        gate.add_permits(1);
        in_flight.await.unwrap().unwrap();

        // The append recreated the log with just that turn's pair.
        let log = store.history("a");
        assert_eq!(log, vec![Turn::user("block"), Turn::model("re: block")]);
    }

    #[tokio::test]
    async fn test_forget_session_drops_gate_entry() {
        let (_store, orch) = orchestrator(FakeProvider::new());
        orch.process_turn("abc", "hi").await.unwrap();
        assert_eq!(orch.gates.len(), 1);

        orch.forget_session("abc");
        assert!(orch.gates.is_empty());
    }
}

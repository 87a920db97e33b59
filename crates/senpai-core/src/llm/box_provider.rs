//! BoxGenerationProvider -- object-safe dynamic dispatch wrapper for
//! GenerationProvider.
//!
//! The blanket-impl pattern:
//! 1. Define an object-safe `GenerationProviderDyn` trait with boxed futures
//! 2. Blanket-impl `GenerationProviderDyn` for all `T: GenerationProvider`
//! 3. `BoxGenerationProvider` wraps `Box<dyn GenerationProviderDyn>` and
//!    itself implements `GenerationProvider` by delegating

use std::future::Future;
use std::pin::Pin;

use senpai_types::llm::{GenerationRequest, LlmError};

use super::provider::GenerationProvider;

/// Object-safe version of [`GenerationProvider`] with boxed futures.
///
/// Exists solely to enable dynamic dispatch (`dyn GenerationProviderDyn`).
/// A blanket implementation is provided for all types implementing
/// `GenerationProvider`.
pub trait GenerationProviderDyn: Send + Sync {
    fn name(&self) -> &str;

    fn generate_boxed<'a>(
        &'a self,
        request: &'a GenerationRequest,
    ) -> Pin<Box<dyn Future<Output = Result<String, LlmError>> + Send + 'a>>;
}

impl<T: GenerationProvider> GenerationProviderDyn for T {
    fn name(&self) -> &str {
        GenerationProvider::name(self)
    }

    fn generate_boxed<'a>(
        &'a self,
        request: &'a GenerationRequest,
    ) -> Pin<Box<dyn Future<Output = Result<String, LlmError>> + Send + 'a>> {
        Box::pin(self.generate(request))
    }
}

/// Boxed generation provider for call sites that cannot be generic over
/// the concrete provider type (e.g., axum application state).
pub struct BoxGenerationProvider {
    inner: Box<dyn GenerationProviderDyn>,
}

impl BoxGenerationProvider {
    /// Wrap a concrete provider for dynamic dispatch.
    pub fn new<T: GenerationProvider + 'static>(provider: T) -> Self {
        Self {
            inner: Box::new(provider),
        }
    }
}

impl GenerationProvider for BoxGenerationProvider {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmError> {
        self.inner.generate_boxed(request).await
    }
}

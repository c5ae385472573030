//! BoxInferenceBackend -- object-safe dynamic dispatch wrapper for InferenceBackend.
//!
//! 1. Define an object-safe `InferenceBackendDyn` trait with boxed futures
//! 2. Blanket-impl `InferenceBackendDyn` for all `T: InferenceBackend`
//! 3. `BoxInferenceBackend` wraps `Box<dyn InferenceBackendDyn>` and delegates

use std::future::Future;
use std::pin::Pin;

use conversai_types::inference::InferenceFailure;

use super::backend::InferenceBackend;

/// Object-safe version of [`InferenceBackend`] with boxed futures.
pub trait InferenceBackendDyn: Send + Sync {
    fn name(&self) -> &str;

    fn is_configured(&self) -> bool;

    fn generate_boxed<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, InferenceFailure>> + Send + 'a>>;
}

impl<T: InferenceBackend> InferenceBackendDyn for T {
    fn name(&self) -> &str {
        InferenceBackend::name(self)
    }

    fn is_configured(&self) -> bool {
        InferenceBackend::is_configured(self)
    }

    fn generate_boxed<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, InferenceFailure>> + Send + 'a>> {
        Box::pin(self.generate(text))
    }
}

/// Type-erased inference backend.
///
/// Lets the application state hold the production HTTP client while tests
/// substitute a scripted backend, without making every service generic
/// over the backend type.
pub struct BoxInferenceBackend {
    inner: Box<dyn InferenceBackendDyn + Send + Sync>,
}

impl BoxInferenceBackend {
    /// Wrap a concrete `InferenceBackend` in a type-erased box.
    pub fn new<T: InferenceBackend + 'static>(backend: T) -> Self {
        Self {
            inner: Box::new(backend),
        }
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub fn is_configured(&self) -> bool {
        self.inner.is_configured()
    }

    pub async fn generate(&self, text: &str) -> Result<String, InferenceFailure> {
        self.inner.generate_boxed(text).await
    }
}

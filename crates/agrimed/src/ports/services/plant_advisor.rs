//! Plant Advisor Service Port
//!
//! Abstract interface for the generative model answering plant health questions.

use async_trait::async_trait;

use crate::domain::errors::DomainError;

/// Service interface for text generation
///
/// Implementations map provider credential failures to `DomainError::Unauthorized`
/// and every other provider failure to `DomainError::ExternalService`.
#[async_trait]
pub trait PlantAdvisor: Send + Sync {
    /// Generate a response for a fully rendered prompt
    async fn generate(&self, prompt: &str) -> Result<String, DomainError>;

    /// Provider name (e.g. "gemini")
    fn provider_name(&self) -> &str;

    fn model_id(&self) -> &str;
}

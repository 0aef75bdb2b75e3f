//! Advisor Application Service (Use Case)
//!
//! Runs a consultation against the configured model and keeps the history of
//! exchanges. Storing an exchange never fails the request that produced it.

use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use agrimed::{
    Consultation, DomainError, Page, PageRequest, PlantAdvisor, PromptRecord, PromptRepository,
};

use crate::models::AdvisorReply;

const PROMPT: &str = "Prompt";

/// Application service for AI consultations and their history
pub struct AdvisorService<P: ?Sized> {
    advisor: Option<Arc<dyn PlantAdvisor>>,
    prompts: Arc<P>,
    timeout: Duration,
}

impl<P: PromptRepository + ?Sized> AdvisorService<P> {
    /// `advisor` is `None` when no API key is configured; consultations are then refused
    pub fn new(
        advisor: Option<Arc<dyn PlantAdvisor>>,
        prompts: Arc<P>,
        timeout: Duration,
    ) -> Self {
        Self {
            advisor,
            prompts,
            timeout,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.advisor.is_some()
    }

    /// Validate, ask the model and record the exchange
    pub async fn consult(&self, consultation: &Consultation) -> Result<AdvisorReply, DomainError> {
        consultation.validate()?;

        let advisor = self.advisor.as_ref().ok_or_else(|| {
            DomainError::Unauthorized("AI provider API key is not configured".into())
        })?;

        let prompt = consultation.render_prompt();
        let answer = tokio::time::timeout(self.timeout, advisor.generate(&prompt))
            .await
            .map_err(|_| DomainError::Timeout(self.timeout))??;

        tracing::info!(
            "{} consultation answered by {} ({})",
            consultation.prompt_type(),
            advisor.provider_name(),
            advisor.model_id()
        );

        let record = PromptRecord::new(consultation.to_record(&answer));
        let record_id = match self.prompts.save(&record).await {
            Ok(saved) => Some(saved.id),
            Err(e) => {
                tracing::warn!("Failed to save {} prompt: {}", consultation.prompt_type(), e);
                None
            }
        };

        Ok(AdvisorReply { answer, record_id })
    }

    /// Stored exchanges, newest first
    pub async fn history(&self, page: &PageRequest) -> Result<Page<PromptRecord>, DomainError> {
        let items = self.prompts.find_page(page).await?;
        let total = self.prompts.count().await?;
        Ok(Page::new(items, page, total))
    }

    pub async fn get_prompt(&self, id: Uuid) -> Result<PromptRecord, DomainError> {
        self.prompts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(PROMPT, id))
    }

    pub async fn delete_prompt(&self, id: Uuid) -> Result<PromptRecord, DomainError> {
        let deleted = self
            .prompts
            .delete(id)
            .await?
            .ok_or_else(|| DomainError::not_found(PROMPT, id))?;

        tracing::info!("Deleted prompt: {}", deleted.id);

        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryPromptRepository;
    use crate::test_support::{FailingPromptRepository, ScriptedAdvisor};
    use agrimed::{DiagnosisRequest, GeneralRequest, PromptType};

    fn general(prompt: &str) -> Consultation {
        Consultation::General(GeneralRequest {
            prompt: Some(prompt.to_string()),
        })
    }

    fn service_with(advisor: ScriptedAdvisor) -> AdvisorService<InMemoryPromptRepository> {
        AdvisorService::new(
            Some(Arc::new(advisor)),
            Arc::new(InMemoryPromptRepository::new()),
            Duration::from_secs(5),
        )
    }

    #[tokio::test]
    async fn test_consult_saves_exchange() {
        let service = service_with(ScriptedAdvisor::answering("Use copper spray."));
        let consultation = Consultation::Diagnosis(DiagnosisRequest {
            symptoms: Some("Yellow halos on leaves".into()),
            plant_type: Some("Tomato".into()),
            ..Default::default()
        });

        let reply = service.consult(&consultation).await.unwrap();
        assert_eq!(reply.answer, "Use copper spray.");
        assert!(reply.saved());

        let stored = service.get_prompt(reply.record_id.unwrap()).await.unwrap();
        assert_eq!(stored.prompt_type, PromptType::Diagnosis);
        assert_eq!(stored.ai_response, "Use copper spray.");
        assert_eq!(
            stored.user_prompt,
            "DIAGNOSIS REQUEST - Plant: Tomato, Symptoms: Yellow halos on leaves"
        );
        assert_eq!(stored.plant_type.as_deref(), Some("Tomato"));
    }

    #[tokio::test]
    async fn test_consult_sends_rendered_prompt() {
        let advisor = ScriptedAdvisor::answering("ok");
        let seen = advisor.seen_prompts();
        let service = service_with(advisor);

        let consultation = general("How do I prevent blight?");
        service.consult(&consultation).await.unwrap();

        let prompts = seen.lock().await;
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0], consultation.render_prompt());
    }

    #[tokio::test]
    async fn test_invalid_request_never_calls_provider() {
        let advisor = ScriptedAdvisor::answering("unused");
        let seen = advisor.seen_prompts();
        let service = service_with(advisor);

        let err = service.consult(&general("  ")).await.unwrap_err();
        assert_eq!(err.to_string(), "Prompt is required");
        assert!(seen.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_disabled_advisor_is_unauthorized() {
        let service = AdvisorService::new(
            None,
            Arc::new(InMemoryPromptRepository::new()),
            Duration::from_secs(5),
        );
        assert!(!service.is_enabled());
        assert!(matches!(
            service.consult(&general("hello")).await,
            Err(DomainError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn test_provider_failure_is_not_recorded() {
        let service = service_with(ScriptedAdvisor::failing("quota exceeded"));
        let err = service.consult(&general("hello")).await.unwrap_err();
        assert!(matches!(err, DomainError::ExternalService(_)));

        let history = service.history(&PageRequest::first(10)).await.unwrap();
        assert_eq!(history.pagination.total_items, 0);
    }

    #[tokio::test]
    async fn test_slow_provider_times_out() {
        let service = AdvisorService::new(
            Some(Arc::new(ScriptedAdvisor::slow(Duration::from_secs(5)))),
            Arc::new(InMemoryPromptRepository::new()),
            Duration::from_millis(20),
        );
        let err = service.consult(&general("hello")).await.unwrap_err();
        assert!(matches!(err, DomainError::Timeout(d) if d == Duration::from_millis(20)));
    }

    #[tokio::test]
    async fn test_save_failure_still_answers() {
        let service = AdvisorService::new(
            Some(Arc::new(ScriptedAdvisor::answering("Rotate crops."))),
            Arc::new(FailingPromptRepository),
            Duration::from_secs(5),
        );
        let reply = service.consult(&general("hello")).await.unwrap();
        assert_eq!(reply.answer, "Rotate crops.");
        assert!(!reply.saved());
        assert_eq!(reply.record_id, None);
    }

    #[tokio::test]
    async fn test_history_pages_and_delete() {
        let service = service_with(ScriptedAdvisor::answering("answer"));
        for i in 0..3 {
            service.consult(&general(&format!("question {}", i))).await.unwrap();
        }

        let page = service
            .history(&PageRequest::from_query(Some(2), Some(2), 10).unwrap())
            .await
            .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.pagination.total_items, 3);
        assert_eq!(page.pagination.total_pages, 2);

        let first = service.history(&PageRequest::first(10)).await.unwrap();
        let id = first.items[0].id;
        let deleted = service.delete_prompt(id).await.unwrap();
        assert_eq!(deleted.id, id);
        assert!(matches!(
            service.get_prompt(id).await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            service.delete_prompt(id).await,
            Err(DomainError::NotFound { .. })
        ));
    }
}

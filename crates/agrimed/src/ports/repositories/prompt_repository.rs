//! Prompt Repository Port
//!
//! Abstract interface for AI exchange history.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{errors::DomainError, PageRequest, PromptRecord};

/// Repository interface for stored advisor exchanges
#[async_trait]
pub trait PromptRepository: Send + Sync {
    async fn save(&self, record: &PromptRecord) -> Result<PromptRecord, DomainError>;

    /// One page of records, newest first
    async fn find_page(&self, page: &PageRequest) -> Result<Vec<PromptRecord>, DomainError>;

    async fn count(&self) -> Result<u64, DomainError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<PromptRecord>, DomainError>;

    /// Remove a record, returning it when it existed
    async fn delete(&self, id: Uuid) -> Result<Option<PromptRecord>, DomainError>;
}

//! Medicine Repository Port
//!
//! Abstract interface for the catalog store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{
    errors::DomainError, CatalogQuery, MedicineListing, MedicinePatch, MedicineSummary,
    PageRequest, SortSpec,
};

/// Repository interface for medicine listings
#[async_trait]
pub trait MedicineRepository: Send + Sync {
    /// Persist a freshly built listing
    async fn insert(&self, medicine: &MedicineListing) -> Result<MedicineListing, DomainError>;

    /// One page of listings matching `query`, ordered by `sort`
    async fn find_page(
        &self,
        query: &CatalogQuery,
        sort: &SortSpec,
        page: &PageRequest,
    ) -> Result<Vec<MedicineListing>, DomainError>;

    /// Total number of listings matching `query`
    async fn count(&self, query: &CatalogQuery) -> Result<u64, DomainError>;

    /// Merge `patch` into the stored listing. `None` when the id is unknown.
    async fn update(
        &self,
        id: Uuid,
        patch: MedicinePatch,
        now: DateTime<Utc>,
    ) -> Result<Option<MedicineListing>, DomainError>;

    /// Atomically bump the view counter and return the listing as stored afterwards.
    /// `updated_at` is left alone.
    async fn increment_views(&self, id: Uuid) -> Result<Option<MedicineListing>, DomainError>;

    async fn delete(&self, id: Uuid) -> Result<Option<MedicineSummary>, DomainError>;
}

//! In-memory repositories
//!
//! Used when no database is configured and by the service and route tests.
//! Predicates are evaluated with the same domain query model the SQL adapter
//! translates, so both stores agree on results and counts.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use agrimed::{
    CatalogQuery, DomainError, MedicineListing, MedicinePatch, MedicineRepository,
    MedicineSummary, PageRequest, PromptRecord, PromptRepository, SortSpec,
};

#[derive(Default)]
pub struct InMemoryMedicineRepository {
    listings: RwLock<HashMap<Uuid, MedicineListing>>,
}

impl InMemoryMedicineRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn window<T>(items: Vec<T>, page: &PageRequest) -> Vec<T> {
    items
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.limit() as usize)
        .collect()
}

#[async_trait]
impl MedicineRepository for InMemoryMedicineRepository {
    async fn insert(&self, medicine: &MedicineListing) -> Result<MedicineListing, DomainError> {
        let mut listings = self.listings.write().await;
        if listings.contains_key(&medicine.id) {
            return Err(DomainError::Repository(format!(
                "duplicate medicine id {}",
                medicine.id
            )));
        }
        listings.insert(medicine.id, medicine.clone());
        Ok(medicine.clone())
    }

    async fn find_page(
        &self,
        query: &CatalogQuery,
        sort: &SortSpec,
        page: &PageRequest,
    ) -> Result<Vec<MedicineListing>, DomainError> {
        let listings = self.listings.read().await;
        let mut matching: Vec<MedicineListing> = listings
            .values()
            .filter(|listing| query.matches(listing))
            .cloned()
            .collect();
        matching.sort_by(|a, b| sort.compare(a, b));
        Ok(window(matching, page))
    }

    async fn count(&self, query: &CatalogQuery) -> Result<u64, DomainError> {
        let listings = self.listings.read().await;
        Ok(listings.values().filter(|l| query.matches(l)).count() as u64)
    }

    async fn update(
        &self,
        id: Uuid,
        patch: MedicinePatch,
        now: DateTime<Utc>,
    ) -> Result<Option<MedicineListing>, DomainError> {
        let mut listings = self.listings.write().await;
        Ok(listings.get_mut(&id).map(|listing| {
            listing.apply(patch, now);
            listing.clone()
        }))
    }

    async fn increment_views(&self, id: Uuid) -> Result<Option<MedicineListing>, DomainError> {
        let mut listings = self.listings.write().await;
        Ok(listings.get_mut(&id).map(|listing| {
            listing.views += 1;
            listing.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<Option<MedicineSummary>, DomainError> {
        let mut listings = self.listings.write().await;
        Ok(listings.remove(&id).map(|listing| listing.summary()))
    }
}

#[derive(Default)]
pub struct InMemoryPromptRepository {
    records: RwLock<HashMap<Uuid, PromptRecord>>,
}

impl InMemoryPromptRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PromptRepository for InMemoryPromptRepository {
    async fn save(&self, record: &PromptRecord) -> Result<PromptRecord, DomainError> {
        self.records
            .write()
            .await
            .insert(record.id, record.clone());
        Ok(record.clone())
    }

    async fn find_page(&self, page: &PageRequest) -> Result<Vec<PromptRecord>, DomainError> {
        let records = self.records.read().await;
        let mut all: Vec<PromptRecord> = records.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(window(all, page))
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(self.records.read().await.len() as u64)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<PromptRecord>, DomainError> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn delete(&self, id: Uuid) -> Result<Option<PromptRecord>, DomainError> {
        Ok(self.records.write().await.remove(&id))
    }
}

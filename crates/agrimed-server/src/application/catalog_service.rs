//! Catalog Application Service (Use Case)
//!
//! Single entry point for every marketplace operation:
//! validate, build the predicate, sort, paginate, execute.

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use agrimed::{
    CatalogFilter, CatalogQuery, DomainError, MedicineDraft, MedicineListing,
    MedicineRepository, MedicineSummary, Page, PageRequest, SortSpec, TextSearch,
};

const MEDICINE: &str = "Medicine";

/// Application service for marketplace listings
pub struct CatalogService<R: ?Sized> {
    repo: Arc<R>,
}

impl<R: MedicineRepository + ?Sized> CatalogService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Validate and store a new listing
    pub async fn create(&self, draft: MedicineDraft) -> Result<MedicineListing, DomainError> {
        let input = draft.validate_new()?;
        let saved = self.repo.insert(&MedicineListing::new(input)).await?;

        tracing::info!("Created medicine: {} ({})", saved.name, saved.id);

        Ok(saved)
    }

    /// Fetch a listing, counting the view
    pub async fn get_by_id(&self, id: Uuid) -> Result<MedicineListing, DomainError> {
        self.repo
            .increment_views(id)
            .await?
            .ok_or_else(|| DomainError::not_found(MEDICINE, id))
    }

    /// Apply a partial update. Unsupplied fields are left untouched.
    pub async fn update(
        &self,
        id: Uuid,
        draft: MedicineDraft,
    ) -> Result<MedicineListing, DomainError> {
        let patch = draft.validate_patch()?;
        let updated = self
            .repo
            .update(id, patch, Utc::now())
            .await?
            .ok_or_else(|| DomainError::not_found(MEDICINE, id))?;

        tracing::info!("Updated medicine: {} ({})", updated.name, updated.id);

        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> Result<MedicineSummary, DomainError> {
        let deleted = self
            .repo
            .delete(id)
            .await?
            .ok_or_else(|| DomainError::not_found(MEDICINE, id))?;

        tracing::info!("Deleted medicine: {} ({})", deleted.name, deleted.id);

        Ok(deleted)
    }

    /// One page of listings. Page and total are computed from the same query.
    pub async fn list(
        &self,
        query: &CatalogQuery,
        sort: &SortSpec,
        page: &PageRequest,
    ) -> Result<Page<MedicineListing>, DomainError> {
        let items = self.repo.find_page(query, sort, page).await?;
        let total = self.repo.count(query).await?;
        Ok(Page::new(items, page, total))
    }

    /// Text search narrowed by `filter`. A blank term is rejected before the store is touched.
    pub async fn search(
        &self,
        term: Option<&str>,
        filter: CatalogFilter,
        sort: &SortSpec,
        page: &PageRequest,
    ) -> Result<(TextSearch, Page<MedicineListing>), DomainError> {
        let search = TextSearch::new(term.unwrap_or_default())?;
        let query = CatalogQuery::new(filter).with_search(search.clone());
        let results = self.list(&query, sort, page).await?;
        Ok((search, results))
    }

    /// Newest featured, available listings
    pub async fn featured(&self, limit: u32) -> Result<Vec<MedicineListing>, DomainError> {
        let query = CatalogQuery::new(CatalogFilter::available().featured_only());
        self.repo
            .find_page(&query, &SortSpec::newest_first(), &PageRequest::first(limit))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryMedicineRepository;
    use crate::test_support::copper_draft;
    use agrimed::{Availability, Disease, FilterParams, MedicinePatch, SortField, SortOrder};

    fn service() -> CatalogService<InMemoryMedicineRepository> {
        CatalogService::new(Arc::new(InMemoryMedicineRepository::new()))
    }

    fn draft_named(name: &str, price: f64) -> MedicineDraft {
        let mut draft = copper_draft();
        draft.name = Some(name.to_string());
        draft.price = Some(price);
        draft
    }

    #[tokio::test]
    async fn test_create_assigns_unique_ids_and_defaults() {
        let service = service();
        let a = service.create(copper_draft()).await.unwrap();
        let b = service.create(copper_draft()).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(a.availability, Availability::Available);
        assert_eq!(a.views, 0);
        assert_eq!(a.target_diseases, vec![Disease::EarlyBlight, Disease::LateBlight]);
    }

    #[tokio::test]
    async fn test_invalid_create_stores_nothing() {
        let service = service();
        let mut draft = copper_draft();
        draft.target_diseases = Some(vec![]);
        assert!(matches!(
            service.create(draft).await,
            Err(DomainError::Validation { .. })
        ));

        let page = service
            .list(
                &CatalogQuery::new(CatalogFilter::available()),
                &SortSpec::newest_first(),
                &PageRequest::first(20),
            )
            .await
            .unwrap();
        assert_eq!(page.pagination.total_items, 0);
    }

    #[tokio::test]
    async fn test_get_by_id_counts_views() {
        let service = service();
        let created = service.create(copper_draft()).await.unwrap();
        service.get_by_id(created.id).await.unwrap();
        let second = service.get_by_id(created.id).await.unwrap();
        assert_eq!(second.views, 2);
        assert_eq!(second.updated_at, created.updated_at);

        assert!(matches!(
            service.get_by_id(Uuid::new_v4()).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_update_merges_and_advances_timestamp() {
        let service = service();
        let created = service.create(copper_draft()).await.unwrap();

        let draft: MedicineDraft =
            serde_json::from_value(serde_json::json!({ "price": 19.99, "quantity": 75 })).unwrap();
        let updated = service.update(created.id, draft).await.unwrap();

        assert_eq!(updated.price, 19.99);
        assert_eq!(updated.quantity, 75);
        assert!(updated.updated_at >= created.updated_at);

        let mut expected = created.clone();
        expected.apply(
            MedicinePatch {
                price: Some(19.99),
                quantity: Some(75),
                ..Default::default()
            },
            updated.updated_at,
        );
        assert_eq!(updated, expected);
    }

    #[tokio::test]
    async fn test_delete_then_missing() {
        let service = service();
        let created = service.create(copper_draft()).await.unwrap();
        let summary = service.delete(created.id).await.unwrap();
        assert_eq!(summary.name, "Copper Fungicide Pro");
        assert!(matches!(
            service.delete(created.id).await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            service.get_by_id(created.id).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_pagination_counts() {
        let service = service();
        for i in 0..7 {
            service
                .create(draft_named(&format!("Fungicide {}", i), i as f64))
                .await
                .unwrap();
        }
        let query = CatalogQuery::new(CatalogFilter::available());
        let sort = SortSpec::new(SortField::Price, SortOrder::Asc);

        let page = service
            .list(&query, &sort, &PageRequest::from_query(Some(3), Some(3), 20).unwrap())
            .await
            .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].price, 6.0);
        assert_eq!(page.pagination.total_pages, 3);
        assert!(!page.pagination.has_next_page);
        assert!(page.pagination.has_prev_page);

        let beyond = service
            .list(&query, &sort, &PageRequest::from_query(Some(9), Some(3), 20).unwrap())
            .await
            .unwrap();
        assert!(beyond.items.is_empty());
        assert_eq!(beyond.pagination.total_items, 7);
    }

    #[tokio::test]
    async fn test_repeated_list_is_identical() {
        let service = service();
        for _ in 0..4 {
            service.create(draft_named("Same", 10.0)).await.unwrap();
        }
        let query = CatalogQuery::new(CatalogFilter::available());
        let sort = SortSpec::new(SortField::Price, SortOrder::Desc);
        let page = PageRequest::first(2);

        let first = service.list(&query, &sort, &page).await.unwrap();
        let second = service.list(&query, &sort, &page).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_inverted_price_range_is_empty() {
        let service = service();
        service.create(copper_draft()).await.unwrap();
        let filter = CatalogFilter::from_params(FilterParams {
            min_price: Some(100.0),
            max_price: Some(50.0),
            ..Default::default()
        });
        let page = service
            .list(
                &CatalogQuery::new(filter),
                &SortSpec::newest_first(),
                &PageRequest::first(20),
            )
            .await
            .unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.pagination.total_items, 0);
        assert_eq!(page.pagination.total_pages, 0);
    }

    #[tokio::test]
    async fn test_search_requires_term_and_respects_filters() {
        let service = service();
        service.create(copper_draft()).await.unwrap();
        let mut sulfur = draft_named("Sulfur Dust", 12.0);
        sulfur.medicine_type = Some("Sulfur-based".into());
        sulfur.description = Some("Sulfur dust for powdery mildew".into());
        sulfur.active_ingredient = Some("Sulfur".into());
        sulfur.tags = Some(vec!["sulfur".into()]);
        service.create(sulfur).await.unwrap();

        let sort = SortSpec::newest_first();
        let page = PageRequest::first(20);

        let err = service
            .search(Some("   "), CatalogFilter::available(), &sort, &page)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Search query is required");

        let (term, results) = service
            .search(Some(" COPPER "), CatalogFilter::available(), &sort, &page)
            .await
            .unwrap();
        assert_eq!(term.term(), "COPPER");
        assert_eq!(results.items.len(), 1);
        assert_eq!(results.items[0].name, "Copper Fungicide Pro");

        let only_sulfur_type = CatalogFilter::from_params(FilterParams {
            medicine_type: Some("Sulfur-based".parse().unwrap()),
            ..Default::default()
        });
        let (_, narrowed) = service
            .search(Some("copper"), only_sulfur_type, &sort, &page)
            .await
            .unwrap();
        assert!(narrowed.items.is_empty());
        assert_eq!(narrowed.pagination.total_items, 0);
    }

    #[tokio::test]
    async fn test_featured_only_available_newest_first() {
        let service = service();
        let mut old = draft_named("Old Featured", 1.0);
        old.featured = Some(true);
        service.create(old).await.unwrap();

        let mut sold = draft_named("Sold Featured", 1.0);
        sold.featured = Some(true);
        sold.availability = Some("Sold".into());
        service.create(sold).await.unwrap();

        service.create(draft_named("Plain", 1.0)).await.unwrap();

        let mut new = draft_named("New Featured", 1.0);
        new.featured = Some(true);
        service.create(new).await.unwrap();

        let featured = service.featured(10).await.unwrap();
        let names: Vec<_> = featured.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"Old Featured"));
        assert!(names.contains(&"New Featured"));
        assert!(featured[0].created_at >= featured[1].created_at);

        assert_eq!(service.featured(1).await.unwrap().len(), 1);
    }
}

//! PostgreSQL implementation of MedicineRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{types::Json, PgPool, Postgres, QueryBuilder};
use std::collections::BTreeMap;
use uuid::Uuid;

use agrimed::{
    CatalogQuery, DomainError, ListingImage, MedicineListing, MedicinePatch, MedicineRepository,
    MedicineSummary, PackageSize, PageRequest, Seller, SortField, SortOrder, SortSpec,
};

use super::{like_pattern, repository_error};

/// PostgreSQL implementation of MedicineRepository
pub struct PgMedicineRepository {
    pool: PgPool,
}

impl PgMedicineRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct MedicineRow {
    id: Uuid,
    name: String,
    description: String,
    price: f64,
    currency: String,
    medicine_type: String,
    target_diseases: Vec<String>,
    target_plants: Vec<String>,
    active_ingredient: String,
    concentration: String,
    application_method: String,
    package_size: Json<PackageSize>,
    condition: String,
    images: Json<Vec<ListingImage>>,
    seller: Option<Json<Seller>>,
    availability: String,
    quantity: i64,
    tags: Vec<String>,
    specifications: Json<BTreeMap<String, String>>,
    views: i64,
    featured: bool,
    negotiable: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<MedicineRow> for MedicineListing {
    type Error = DomainError;

    fn try_from(row: MedicineRow) -> Result<Self, Self::Error> {
        let id = row.id;
        let corrupt = |err: String| DomainError::Repository(format!("medicine {}: {}", id, err));
        Ok(Self {
            id,
            name: row.name,
            description: row.description,
            price: row.price,
            currency: row.currency.parse().map_err(corrupt)?,
            medicine_type: row.medicine_type.parse().map_err(corrupt)?,
            target_diseases: parse_all(&row.target_diseases).map_err(corrupt)?,
            target_plants: parse_all(&row.target_plants).map_err(corrupt)?,
            active_ingredient: row.active_ingredient,
            concentration: row.concentration,
            application_method: row.application_method.parse().map_err(corrupt)?,
            package_size: row.package_size.0,
            condition: row.condition.parse().map_err(corrupt)?,
            images: row.images.0,
            seller: row.seller.map(|s| s.0),
            availability: row.availability.parse().map_err(corrupt)?,
            quantity: row.quantity,
            tags: row.tags,
            specifications: row.specifications.0,
            views: row.views,
            featured: row.featured,
            negotiable: row.negotiable,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn parse_all<T: std::str::FromStr<Err = String>>(labels: &[String]) -> Result<Vec<T>, String> {
    labels.iter().map(|l| l.parse()).collect()
}

fn labels<T: std::fmt::Display>(values: &[T]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

/// Append the WHERE clause shared by the page query and the count
fn push_predicate(qb: &mut QueryBuilder<'_, Postgres>, query: &CatalogQuery) {
    let filter = &query.filter;
    qb.push(" WHERE TRUE");

    if let Some(availability) = filter.availability {
        qb.push(" AND availability = ").push_bind(availability.as_str());
    }
    if let Some(medicine_type) = filter.medicine_type {
        qb.push(" AND medicine_type = ")
            .push_bind(medicine_type.as_str());
    }
    if let Some(method) = filter.application_method {
        qb.push(" AND application_method = ")
            .push_bind(method.as_str());
    }
    if let Some(condition) = filter.condition {
        qb.push(" AND condition = ").push_bind(condition.as_str());
    }
    if let Some(disease) = filter.target_disease {
        qb.push(" AND ")
            .push_bind(disease.as_str())
            .push(" = ANY(target_diseases)");
    }
    if let Some(plant) = filter.target_plant {
        qb.push(" AND ")
            .push_bind(plant.as_str())
            .push(" = ANY(target_plants)");
    }
    if let Some(min) = filter.min_price {
        qb.push(" AND price >= ").push_bind(min);
    }
    if let Some(max) = filter.max_price {
        qb.push(" AND price <= ").push_bind(max);
    }
    if let Some(location) = &filter.location {
        qb.push(" AND seller->'location'->>'city' ILIKE ")
            .push_bind(like_pattern(location))
            .push(" ESCAPE '\\'");
    }
    if let Some(ingredient) = &filter.active_ingredient {
        qb.push(" AND active_ingredient ILIKE ")
            .push_bind(like_pattern(ingredient))
            .push(" ESCAPE '\\'");
    }
    if let Some(featured) = filter.featured {
        qb.push(" AND featured = ").push_bind(featured);
    }

    if let Some(search) = &query.search {
        let pattern = like_pattern(search.term());
        qb.push(" AND (name ILIKE ")
            .push_bind(pattern.clone())
            .push(" ESCAPE '\\' OR description ILIKE ")
            .push_bind(pattern.clone())
            .push(" ESCAPE '\\' OR active_ingredient ILIKE ")
            .push_bind(pattern.clone())
            .push(" ESCAPE '\\' OR EXISTS (SELECT 1 FROM unnest(tags) AS tag WHERE tag ILIKE ")
            .push_bind(pattern)
            .push(" ESCAPE '\\'))");
    }
}

fn sort_column(field: SortField) -> &'static str {
    match field {
        SortField::CreatedAt => "created_at",
        SortField::UpdatedAt => "updated_at",
        SortField::Price => "price",
        // byte order over lowercased names, same as the in-memory store
        SortField::Name => "lower(name) COLLATE \"C\"",
        SortField::Views => "views",
    }
}

fn page_query<'a>(
    query: &CatalogQuery,
    sort: &SortSpec,
    page: &PageRequest,
) -> QueryBuilder<'a, Postgres> {
    let mut qb = QueryBuilder::new("SELECT * FROM medicines");
    push_predicate(&mut qb, query);

    let direction = match sort.sort_order {
        SortOrder::Asc => "ASC",
        SortOrder::Desc => "DESC",
    };
    qb.push(format!(
        " ORDER BY {} {}, id ASC",
        sort_column(sort.sort_by),
        direction
    ));
    qb.push(" LIMIT ")
        .push_bind(page.limit() as i64)
        .push(" OFFSET ")
        .push_bind(page.offset() as i64);
    qb
}

fn count_query<'a>(query: &CatalogQuery) -> QueryBuilder<'a, Postgres> {
    let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM medicines");
    push_predicate(&mut qb, query);
    qb
}

/// Only supplied columns are set. The timestamp never moves backwards.
fn update_query<'a>(
    id: Uuid,
    patch: MedicinePatch,
    now: DateTime<Utc>,
) -> QueryBuilder<'a, Postgres> {
    let mut qb = QueryBuilder::new("UPDATE medicines SET updated_at = GREATEST(updated_at, ");
    qb.push_bind(now).push(")");

    if let Some(v) = patch.name {
        qb.push(", name = ").push_bind(v);
    }
    if let Some(v) = patch.description {
        qb.push(", description = ").push_bind(v);
    }
    if let Some(v) = patch.price {
        qb.push(", price = ").push_bind(v);
    }
    if let Some(v) = patch.currency {
        qb.push(", currency = ").push_bind(v.as_str());
    }
    if let Some(v) = patch.medicine_type {
        qb.push(", medicine_type = ").push_bind(v.as_str());
    }
    if let Some(v) = patch.target_diseases {
        qb.push(", target_diseases = ").push_bind(labels(&v));
    }
    if let Some(v) = patch.target_plants {
        qb.push(", target_plants = ").push_bind(labels(&v));
    }
    if let Some(v) = patch.active_ingredient {
        qb.push(", active_ingredient = ").push_bind(v);
    }
    if let Some(v) = patch.concentration {
        qb.push(", concentration = ").push_bind(v);
    }
    if let Some(v) = patch.application_method {
        qb.push(", application_method = ").push_bind(v.as_str());
    }
    if let Some(v) = patch.package_size {
        qb.push(", package_size = ").push_bind(Json(v));
    }
    if let Some(v) = patch.condition {
        qb.push(", condition = ").push_bind(v.as_str());
    }
    if let Some(v) = patch.images {
        qb.push(", images = ").push_bind(Json(v));
    }
    if let Some(v) = patch.availability {
        qb.push(", availability = ").push_bind(v.as_str());
    }
    if let Some(v) = patch.quantity {
        qb.push(", quantity = ").push_bind(v);
    }
    if let Some(v) = patch.tags {
        qb.push(", tags = ").push_bind(v);
    }
    if let Some(v) = patch.specifications {
        qb.push(", specifications = ").push_bind(Json(v));
    }
    if let Some(v) = patch.featured {
        qb.push(", featured = ").push_bind(v);
    }
    if let Some(v) = patch.negotiable {
        qb.push(", negotiable = ").push_bind(v);
    }

    qb.push(" WHERE id = ").push_bind(id).push(" RETURNING *");
    qb
}

#[async_trait]
impl MedicineRepository for PgMedicineRepository {
    async fn insert(&self, medicine: &MedicineListing) -> Result<MedicineListing, DomainError> {
        let row = sqlx::query_as::<_, MedicineRow>(
            r#"
            INSERT INTO medicines (
                id, name, description, price, currency, medicine_type, target_diseases,
                target_plants, active_ingredient, concentration, application_method,
                package_size, condition, images, seller, availability, quantity, tags,
                specifications, views, featured, negotiable, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16,
                    $17, $18, $19, $20, $21, $22, $23, $24)
            RETURNING *
            "#,
        )
        .bind(medicine.id)
        .bind(&medicine.name)
        .bind(&medicine.description)
        .bind(medicine.price)
        .bind(medicine.currency.as_str())
        .bind(medicine.medicine_type.as_str())
        .bind(labels(&medicine.target_diseases))
        .bind(labels(&medicine.target_plants))
        .bind(&medicine.active_ingredient)
        .bind(&medicine.concentration)
        .bind(medicine.application_method.as_str())
        .bind(Json(&medicine.package_size))
        .bind(medicine.condition.as_str())
        .bind(Json(&medicine.images))
        .bind(medicine.seller.as_ref().map(Json))
        .bind(medicine.availability.as_str())
        .bind(medicine.quantity)
        .bind(&medicine.tags)
        .bind(Json(&medicine.specifications))
        .bind(medicine.views)
        .bind(medicine.featured)
        .bind(medicine.negotiable)
        .bind(medicine.created_at)
        .bind(medicine.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(repository_error)?;

        row.try_into()
    }

    async fn find_page(
        &self,
        query: &CatalogQuery,
        sort: &SortSpec,
        page: &PageRequest,
    ) -> Result<Vec<MedicineListing>, DomainError> {
        let rows = page_query(query, sort, page)
            .build_query_as::<MedicineRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(repository_error)?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn count(&self, query: &CatalogQuery) -> Result<u64, DomainError> {
        let total: i64 = count_query(query)
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(repository_error)?;

        Ok(total.max(0) as u64)
    }

    async fn update(
        &self,
        id: Uuid,
        patch: MedicinePatch,
        now: DateTime<Utc>,
    ) -> Result<Option<MedicineListing>, DomainError> {
        let row = update_query(id, patch, now)
            .build_query_as::<MedicineRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(repository_error)?;

        row.map(TryInto::try_into).transpose()
    }

    async fn increment_views(&self, id: Uuid) -> Result<Option<MedicineListing>, DomainError> {
        let row = sqlx::query_as::<_, MedicineRow>(
            "UPDATE medicines SET views = views + 1 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(repository_error)?;

        row.map(TryInto::try_into).transpose()
    }

    async fn delete(&self, id: Uuid) -> Result<Option<MedicineSummary>, DomainError> {
        let deleted = sqlx::query_as::<_, (Uuid, String)>(
            "DELETE FROM medicines WHERE id = $1 RETURNING id, name",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(repository_error)?;

        Ok(deleted.map(|(id, name)| MedicineSummary { id, name }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agrimed::{CatalogFilter, Disease, FilterParams, MedicineType, TextSearch};

    #[test]
    fn test_default_listing_is_availability_scoped() {
        let qb = page_query(
            &CatalogQuery::new(CatalogFilter::available()),
            &SortSpec::newest_first(),
            &PageRequest::first(20),
        );
        assert_eq!(
            qb.sql(),
            "SELECT * FROM medicines WHERE TRUE AND availability = $1 \
             ORDER BY created_at DESC, id ASC LIMIT $2 OFFSET $3"
        );
    }

    #[test]
    fn test_search_is_anded_with_filters() {
        let filter = CatalogFilter::from_params(FilterParams {
            medicine_type: Some(MedicineType::Fungicide),
            target_disease: Some(Disease::LateBlight),
            ..Default::default()
        });
        let query = CatalogQuery::new(filter).with_search(TextSearch::new("copper").unwrap());
        let sql = count_query(&query).sql().to_string();

        assert!(sql.starts_with("SELECT COUNT(*) FROM medicines WHERE TRUE"));
        assert!(sql.contains("AND medicine_type = $2"));
        assert!(sql.contains("AND $3 = ANY(target_diseases)"));
        assert!(sql.contains(
            "AND (name ILIKE $4 ESCAPE '\\' OR description ILIKE $5 ESCAPE '\\' \
             OR active_ingredient ILIKE $6 ESCAPE '\\' \
             OR EXISTS (SELECT 1 FROM unnest(tags) AS tag WHERE tag ILIKE $7 ESCAPE '\\'))"
        ));
    }

    #[test]
    fn test_count_and_page_share_predicate() {
        let query = CatalogQuery::new(CatalogFilter::from_params(FilterParams {
            min_price: Some(100.0),
            max_price: Some(50.0),
            location: Some("nairobi".into()),
            ..Default::default()
        }));
        let page = page_query(&query, &SortSpec::newest_first(), &PageRequest::first(10));
        let count = count_query(&query);

        let where_of = |sql: &str| {
            let start = sql.find(" WHERE ").unwrap();
            let end = sql.find(" ORDER BY ").unwrap_or(sql.len());
            sql[start..end].to_string()
        };
        assert_eq!(where_of(page.sql()), where_of(count.sql()));
        assert!(count.sql().contains("seller->'location'->>'city' ILIKE"));
    }

    #[test]
    fn test_sort_uses_whitelisted_column() {
        let qb = page_query(
            &CatalogQuery::new(CatalogFilter::available()),
            &SortSpec::new(SortField::Price, SortOrder::Asc),
            &PageRequest::first(5),
        );
        assert!(qb.sql().contains("ORDER BY price ASC, id ASC"));
    }

    #[test]
    fn test_name_sort_is_case_insensitive() {
        let qb = page_query(
            &CatalogQuery::new(CatalogFilter::available()),
            &SortSpec::new(SortField::Name, SortOrder::Desc),
            &PageRequest::first(5),
        );
        assert!(qb
            .sql()
            .contains("ORDER BY lower(name) COLLATE \"C\" DESC, id ASC"));
    }

    #[test]
    fn test_update_only_sets_supplied_columns() {
        let patch = MedicinePatch {
            price: Some(19.99),
            featured: Some(true),
            ..Default::default()
        };
        let qb = update_query(Uuid::new_v4(), patch, Utc::now());
        assert_eq!(
            qb.sql(),
            "UPDATE medicines SET updated_at = GREATEST(updated_at, $1), price = $2, \
             featured = $3 WHERE id = $4 RETURNING *"
        );
    }
}

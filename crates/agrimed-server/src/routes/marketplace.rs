//! Marketplace Routes - Medicine listing management and discovery
//!
//! HTTP handlers that delegate to CatalogService for business logic.

use axum::{extract::State, routing::get, Router};
use std::str::FromStr;

use agrimed::domain::{parse_id, DEFAULT_PAGE_LIMIT, FEATURED_LIMIT};
use agrimed::{
    CatalogFilter, CatalogQuery, Disease, FieldError, MedicineDraft, MedicineListing,
    MedicineType, Plant, TextSearch,
};

use crate::error::{ApiError, ApiResult};
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::models::{
    ApiResponse, CatalogDimension, DeletedMedicine, DimensionList, LimitQuery, ListingQuery,
    MedicineList, PagedQuery, SearchFilters, SearchResults,
};
use crate::AppState;

const MEDICINE: &str = "Medicine";

/// List available medicines with filters, sorting and pagination
#[utoipa::path(
    get,
    path = "/api/marketplace",
    params(ListingQuery),
    responses(
        (status = 200, description = "Medicines retrieved successfully", body = MedicineList),
        (status = 400, description = "Invalid query parameters"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Marketplace"
)]
pub async fn list_medicines(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListingQuery>,
) -> ApiResult<ApiResponse<MedicineList>> {
    let parsed = query.parse(DEFAULT_PAGE_LIMIT)?;

    let mut catalog = CatalogQuery::new(parsed.filter);
    if let Some(search) = TextSearch::optional(parsed.search.as_deref()) {
        catalog = catalog.with_search(search);
    }

    let page = state
        .catalog
        .list(&catalog, &parsed.sort, &parsed.page)
        .await?;

    Ok(ApiResponse::ok(
        "Medicines retrieved successfully",
        MedicineList {
            medicines: page.items,
            pagination: page.pagination,
        },
    ))
}

/// Create a new medicine listing
#[utoipa::path(
    post,
    path = "/api/marketplace",
    request_body = MedicineDraft,
    responses(
        (status = 201, description = "Medicine created successfully", body = MedicineListing),
        (status = 400, description = "Validation error"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Marketplace"
)]
pub async fn create_medicine(
    State(state): State<AppState>,
    ApiJson(draft): ApiJson<MedicineDraft>,
) -> ApiResult<ApiResponse<MedicineListing>> {
    let medicine = state.catalog.create(draft).await?;
    Ok(ApiResponse::created("Medicine created successfully", medicine))
}

/// Featured, available medicines, newest first
#[utoipa::path(
    get,
    path = "/api/marketplace/featured",
    params(LimitQuery),
    responses(
        (status = 200, description = "Featured medicines retrieved successfully", body = Vec<MedicineListing>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "Marketplace"
)]
pub async fn featured_medicines(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<LimitQuery>,
) -> ApiResult<ApiResponse<Vec<MedicineListing>>> {
    let limit = query.parse(FEATURED_LIMIT)?;
    let medicines = state.catalog.featured(limit).await?;
    Ok(ApiResponse::ok(
        "Featured medicines retrieved successfully",
        medicines,
    ))
}

/// Free-text search narrowed by the listing filters
#[utoipa::path(
    get,
    path = "/api/marketplace/search",
    params(ListingQuery),
    responses(
        (status = 200, description = "Search completed successfully", body = SearchResults),
        (status = 400, description = "Search query is required")
    ),
    tag = "Marketplace"
)]
pub async fn search_medicines(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListingQuery>,
) -> ApiResult<ApiResponse<SearchResults>> {
    let parsed = query.parse(DEFAULT_PAGE_LIMIT)?;

    let (term, page) = state
        .catalog
        .search(
            parsed.q.as_deref(),
            parsed.filter.clone(),
            &parsed.sort,
            &parsed.page,
        )
        .await?;

    tracing::debug!(
        "Search '{}' matched {} medicines",
        term.term(),
        page.pagination.total_items
    );

    Ok(ApiResponse::ok(
        "Search completed successfully",
        SearchResults {
            medicines: page.items,
            pagination: page.pagination,
            search_query: term.term().to_string(),
            filters: SearchFilters {
                filter: parsed.filter,
                sort_by: parsed.sort.sort_by,
                sort_order: parsed.sort.sort_order,
                limit: parsed.page.limit(),
                skip: parsed.page.offset(),
            },
        },
    ))
}

/// Available medicines of one medicine type
#[utoipa::path(
    get,
    path = "/api/marketplace/type/{medicineType}",
    params(
        ("medicineType" = MedicineType, Path, description = "Medicine type"),
        PagedQuery
    ),
    responses(
        (status = 200, description = "Medicines of the type", body = DimensionList),
        (status = 400, description = "Unknown medicine type")
    ),
    tag = "Marketplace"
)]
pub async fn medicines_by_type(
    State(state): State<AppState>,
    ApiPath(raw): ApiPath<String>,
    ApiQuery(query): ApiQuery<PagedQuery>,
) -> ApiResult<ApiResponse<DimensionList>> {
    let medicine_type: MedicineType = path_vocabulary("medicineType", &raw)?;
    let filter = CatalogFilter::available().with_medicine_type(medicine_type);
    let list = dimension_page(
        &state,
        filter,
        query,
        CatalogDimension::MedicineType(medicine_type),
    )
    .await?;
    Ok(ApiResponse::ok(
        format!("Medicines of type {} retrieved successfully", medicine_type),
        list,
    ))
}

/// Available medicines treating one disease
#[utoipa::path(
    get,
    path = "/api/marketplace/disease/{disease}",
    params(
        ("disease" = Disease, Path, description = "Target disease"),
        PagedQuery
    ),
    responses(
        (status = 200, description = "Medicines for the disease", body = DimensionList),
        (status = 400, description = "Unknown disease")
    ),
    tag = "Marketplace"
)]
pub async fn medicines_by_disease(
    State(state): State<AppState>,
    ApiPath(raw): ApiPath<String>,
    ApiQuery(query): ApiQuery<PagedQuery>,
) -> ApiResult<ApiResponse<DimensionList>> {
    let disease: Disease = path_vocabulary("disease", &raw)?;
    let filter = CatalogFilter::available().with_disease(disease);
    let list = dimension_page(&state, filter, query, CatalogDimension::Disease(disease)).await?;
    Ok(ApiResponse::ok(
        format!("Medicines for {} retrieved successfully", disease),
        list,
    ))
}

/// Available medicines suitable for one plant
#[utoipa::path(
    get,
    path = "/api/marketplace/plant/{plant}",
    params(
        ("plant" = Plant, Path, description = "Target plant"),
        PagedQuery
    ),
    responses(
        (status = 200, description = "Medicines for the plant", body = DimensionList),
        (status = 400, description = "Unknown plant")
    ),
    tag = "Marketplace"
)]
pub async fn medicines_by_plant(
    State(state): State<AppState>,
    ApiPath(raw): ApiPath<String>,
    ApiQuery(query): ApiQuery<PagedQuery>,
) -> ApiResult<ApiResponse<DimensionList>> {
    let plant: Plant = path_vocabulary("plant", &raw)?;
    let filter = CatalogFilter::available().with_plant(plant);
    let list = dimension_page(&state, filter, query, CatalogDimension::Plant(plant)).await?;
    Ok(ApiResponse::ok(
        format!("Medicines for {} retrieved successfully", plant),
        list,
    ))
}

/// Get a medicine by ID (counts as a view)
#[utoipa::path(
    get,
    path = "/api/marketplace/{id}",
    params(
        ("id" = Uuid, Path, description = "Medicine ID")
    ),
    responses(
        (status = 200, description = "Medicine retrieved successfully", body = MedicineListing),
        (status = 400, description = "Invalid medicine ID format"),
        (status = 404, description = "Medicine not found")
    ),
    tag = "Marketplace"
)]
pub async fn get_medicine(
    State(state): State<AppState>,
    ApiPath(raw): ApiPath<String>,
) -> ApiResult<ApiResponse<MedicineListing>> {
    let id = parse_id(MEDICINE, &raw)?;
    let medicine = state.catalog.get_by_id(id).await?;
    Ok(ApiResponse::ok("Medicine retrieved successfully", medicine))
}

/// Partially update a medicine
#[utoipa::path(
    put,
    path = "/api/marketplace/{id}",
    params(
        ("id" = Uuid, Path, description = "Medicine ID")
    ),
    request_body = MedicineDraft,
    responses(
        (status = 200, description = "Medicine updated successfully", body = MedicineListing),
        (status = 400, description = "Validation error or invalid ID"),
        (status = 404, description = "Medicine not found")
    ),
    tag = "Marketplace"
)]
pub async fn update_medicine(
    State(state): State<AppState>,
    ApiPath(raw): ApiPath<String>,
    ApiJson(draft): ApiJson<MedicineDraft>,
) -> ApiResult<ApiResponse<MedicineListing>> {
    let id = parse_id(MEDICINE, &raw)?;
    let medicine = state.catalog.update(id, draft).await?;
    Ok(ApiResponse::ok("Medicine updated successfully", medicine))
}

/// Delete a medicine
#[utoipa::path(
    delete,
    path = "/api/marketplace/{id}",
    params(
        ("id" = Uuid, Path, description = "Medicine ID")
    ),
    responses(
        (status = 200, description = "Medicine deleted successfully", body = DeletedMedicine),
        (status = 400, description = "Invalid medicine ID format"),
        (status = 404, description = "Medicine not found")
    ),
    tag = "Marketplace"
)]
pub async fn delete_medicine(
    State(state): State<AppState>,
    ApiPath(raw): ApiPath<String>,
) -> ApiResult<ApiResponse<DeletedMedicine>> {
    let id = parse_id(MEDICINE, &raw)?;
    let deleted = state.catalog.delete(id).await?;
    Ok(ApiResponse::ok(
        "Medicine deleted successfully",
        DeletedMedicine {
            deleted_medicine: deleted,
        },
    ))
}

fn path_vocabulary<T>(field: &str, raw: &str) -> Result<T, ApiError>
where
    T: FromStr<Err = String>,
{
    raw.parse().map_err(|message| {
        ApiError::invalid_fields("Invalid path parameters", vec![FieldError::new(field, message)])
    })
}

async fn dimension_page(
    state: &AppState,
    filter: CatalogFilter,
    query: PagedQuery,
    dimension: CatalogDimension,
) -> ApiResult<DimensionList> {
    let (sort, page) = query.parse(DEFAULT_PAGE_LIMIT)?;
    let results = state
        .catalog
        .list(&CatalogQuery::new(filter), &sort, &page)
        .await?;
    tracing::debug!(
        "{} listings for {}",
        results.pagination.total_items,
        dimension.label()
    );
    Ok(DimensionList {
        medicines: results.items,
        pagination: results.pagination,
        dimension,
    })
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/marketplace",
            get(list_medicines).post(create_medicine),
        )
        .route("/api/marketplace/featured", get(featured_medicines))
        .route("/api/marketplace/search", get(search_medicines))
        .route("/api/marketplace/type/:medicineType", get(medicines_by_type))
        .route("/api/marketplace/disease/:disease", get(medicines_by_disease))
        .route("/api/marketplace/plant/:plant", get(medicines_by_plant))
        .route(
            "/api/marketplace/:id",
            get(get_medicine).put(update_medicine).delete(delete_medicine),
        )
}

//! HTTP handlers for Products API

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use axum_helpers::{
    errors::responses::{BadRequestResponse, InternalServerErrorResponse},
    AppError, ErrorResponse, JsonBody,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{CreateProduct, DebugListing, ProductRecord, ProductWire};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(list_products, create_product, debug_listing),
    components(
        schemas(ProductWire, CreateProduct, ProductRecord, DebugListing, ErrorResponse),
        responses(BadRequestResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = "Products", description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/debug", get(debug_listing))
        .with_state(shared_service)
}

/// List every product
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    responses(
        (status = 200, description = "All products", body = Vec<ProductWire>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    headers: HeaderMap,
) -> ProductResult<Json<Vec<ProductWire>>> {
    let origin = headers
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");
    tracing::debug!(origin, "GET /api/products");

    let products = service.list_products().await?;
    Ok(Json(products))
}

/// Create a product
///
/// Any failure, including a failed store write, is reported as 400.
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created", body = ProductWire),
        (status = 400, response = BadRequestResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    JsonBody(input): JsonBody<CreateProduct>,
) -> Result<impl IntoResponse, AppError> {
    let product = service
        .create_product(input)
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    Ok((StatusCode::CREATED, Json(product)))
}

/// Raw records, collection names and count, for inspection
#[utoipa::path(
    get,
    path = "/debug",
    tag = "Products",
    responses(
        (status = 200, description = "Store contents", body = DebugListing),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn debug_listing<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<DebugListing>> {
    let listing = service.debug_listing().await?;
    Ok(Json(listing))
}

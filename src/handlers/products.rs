use crate::{
    dto::product::{CreateProductRequest, ProductResponse, UpdateProductRequest},
    errors::ServiceError,
    handlers::common::{created_at_response, no_content_response, read_json, success_response},
    AppState,
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Response,
    routing::{get, post},
    Json, Router,
};

/// Creates the router for product endpoints
pub fn products_routes() -> Router<AppState> {
    Router::new()
        .route("/create-product", post(create_product))
        .route("/get-all-products", get(list_products))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

#[utoipa::path(
    post,
    path = "/Product/create-product",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Missing or invalid field", body = crate::errors::ErrorResponse)
    ),
    tag = "Product"
)]
pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<Response, ServiceError> {
    let input = read_json(payload)?;
    let product = state.services.products.create(input).await?;
    let location = format!("/Product/{}", product.id);
    Ok(created_at_response(&location, product))
}

#[utoipa::path(
    get,
    path = "/Product/{id}",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product retrieved", body = ProductResponse),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Product"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, ServiceError> {
    let product = state.services.products.get_by_id(id).await?;
    Ok(success_response(product))
}

#[utoipa::path(
    get,
    path = "/Product/get-all-products",
    responses(
        (status = 200, description = "All products", body = [ProductResponse])
    ),
    tag = "Product"
)]
pub async fn list_products(State(state): State<AppState>) -> Result<Response, ServiceError> {
    let products = state.services.products.get_all().await?;
    Ok(success_response(products))
}

#[utoipa::path(
    put,
    path = "/Product/{id}",
    params(("id" = i32, Path, description = "Product ID")),
    request_body = UpdateProductRequest,
    responses(
        (status = 204, description = "Product replaced"),
        (status = 400, description = "Malformed body", body = crate::errors::ErrorResponse),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Product"
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    payload: Result<Json<UpdateProductRequest>, JsonRejection>,
) -> Result<Response, ServiceError> {
    let input = read_json(payload)?;
    state.services.products.update(id, input).await?;
    Ok(no_content_response())
}

#[utoipa::path(
    delete,
    path = "/Product/{id}",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Product is referenced by orders", body = crate::errors::ErrorResponse)
    ),
    tag = "Product"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, ServiceError> {
    state.services.products.delete(id).await?;
    Ok(no_content_response())
}

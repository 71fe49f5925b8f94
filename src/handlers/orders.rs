use crate::{
    dto::order::{
        CreateOrderRequest, OrderDetailsResponse, OrderResponse, UpdateOrderByPairRequest,
        UpdateOrderRequest,
    },
    errors::ServiceError,
    handlers::common::{created_at_response, no_content_response, read_json, success_response},
    AppState,
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Response,
    routing::{get, post, put},
    Json, Router,
};

/// Creates the router for order endpoints
#[allow(deprecated)]
pub fn orders_routes() -> Router<AppState> {
    Router::new()
        .route("/", put(update_order_by_pair))
        .route("/create-order", post(create_order))
        .route("/get-all-orders", get(list_orders))
        .route(
            "/:id",
            get(get_order).put(update_order).delete(delete_order),
        )
        .route("/:id/details", get(get_order_details))
}

#[utoipa::path(
    post,
    path = "/Order/create-order",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = OrderResponse),
        (status = 400, description = "Missing field or unknown product/customer", body = crate::errors::ErrorResponse)
    ),
    tag = "Order"
)]
pub async fn create_order(
    State(state): State<AppState>,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<Response, ServiceError> {
    let input = read_json(payload)?;
    let order = state.services.orders.create(input).await?;
    let location = format!("/Order/{}", order.id);
    Ok(created_at_response(&location, order))
}

#[utoipa::path(
    get,
    path = "/Order/{id}",
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order retrieved", body = OrderResponse),
        (status = 404, description = "Order not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Order"
)]
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, ServiceError> {
    let order = state.services.orders.get_by_id(id).await?;
    Ok(success_response(order))
}

#[utoipa::path(
    get,
    path = "/Order/{id}/details",
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order with its customer and product", body = OrderDetailsResponse),
        (status = 404, description = "Order not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Order"
)]
pub async fn get_order_details(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, ServiceError> {
    let details = state.services.orders.get_details(id).await?;
    Ok(success_response(details))
}

#[utoipa::path(
    get,
    path = "/Order/get-all-orders",
    responses(
        (status = 200, description = "All orders", body = [OrderResponse])
    ),
    tag = "Order"
)]
pub async fn list_orders(State(state): State<AppState>) -> Result<Response, ServiceError> {
    let orders = state.services.orders.get_all().await?;
    Ok(success_response(orders))
}

#[utoipa::path(
    put,
    path = "/Order/{id}",
    params(("id" = i32, Path, description = "Order ID")),
    request_body = UpdateOrderRequest,
    responses(
        (status = 204, description = "Order status replaced"),
        (status = 400, description = "Malformed body or status over 50 characters", body = crate::errors::ErrorResponse),
        (status = 404, description = "Order not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Order"
)]
pub async fn update_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    payload: Result<Json<UpdateOrderRequest>, JsonRejection>,
) -> Result<Response, ServiceError> {
    let input = read_json(payload)?;
    state.services.orders.update(id, input).await?;
    Ok(no_content_response())
}

#[utoipa::path(
    put,
    path = "/Order",
    request_body = UpdateOrderByPairRequest,
    responses(
        (status = 204, description = "Order status replaced"),
        (status = 400, description = "Malformed body or status over 50 characters", body = crate::errors::ErrorResponse),
        (status = 404, description = "No order for that product and customer", body = crate::errors::ErrorResponse)
    ),
    tag = "Order"
)]
#[deprecated(note = "address orders by id with PUT /Order/{id}")]
pub async fn update_order_by_pair(
    State(state): State<AppState>,
    payload: Result<Json<UpdateOrderByPairRequest>, JsonRejection>,
) -> Result<Response, ServiceError> {
    let input = read_json(payload)?;
    state.services.orders.update_by_pair(input).await?;
    Ok(no_content_response())
}

#[utoipa::path(
    delete,
    path = "/Order/{id}",
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 204, description = "Order deleted"),
        (status = 404, description = "Order not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Order"
)]
pub async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, ServiceError> {
    state.services.orders.delete(id).await?;
    Ok(no_content_response())
}

use crate::{
    dto::customer::{CreateCustomerRequest, CustomerResponse, UpdateCustomerRequest},
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

/// Creates the router for customer endpoints
pub fn customers_routes() -> Router<AppState> {
    Router::new()
        .route("/create-customer", post(create_customer))
        .route("/get-all-customers", get(list_customers))
        .route(
            "/:id",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
}

#[utoipa::path(
    post,
    path = "/Customer/create-customer",
    request_body = CreateCustomerRequest,
    responses(
        (status = 201, description = "Customer created", body = CustomerResponse),
        (status = 400, description = "Missing or invalid field", body = crate::errors::ErrorResponse)
    ),
    tag = "Customer"
)]
pub async fn create_customer(
    State(state): State<AppState>,
    payload: Result<Json<CreateCustomerRequest>, JsonRejection>,
) -> Result<Response, ServiceError> {
    let input = read_json(payload)?;
    let customer = state.services.customers.create(input).await?;
    let location = format!("/Customer/{}", customer.id);
    Ok(created_at_response(&location, customer))
}

#[utoipa::path(
    get,
    path = "/Customer/{id}",
    params(("id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Customer retrieved", body = CustomerResponse),
        (status = 404, description = "Customer not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Customer"
)]
pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, ServiceError> {
    let customer = state.services.customers.get_by_id(id).await?;
    Ok(success_response(customer))
}

#[utoipa::path(
    get,
    path = "/Customer/get-all-customers",
    responses(
        (status = 200, description = "All customers", body = [CustomerResponse])
    ),
    tag = "Customer"
)]
pub async fn list_customers(State(state): State<AppState>) -> Result<Response, ServiceError> {
    let customers = state.services.customers.get_all().await?;
    Ok(success_response(customers))
}

#[utoipa::path(
    put,
    path = "/Customer/{id}",
    params(("id" = i32, Path, description = "Customer ID")),
    request_body = UpdateCustomerRequest,
    responses(
        (status = 204, description = "Customer replaced"),
        (status = 400, description = "Malformed body", body = crate::errors::ErrorResponse),
        (status = 404, description = "Customer not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Customer"
)]
pub async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    payload: Result<Json<UpdateCustomerRequest>, JsonRejection>,
) -> Result<Response, ServiceError> {
    let input = read_json(payload)?;
    state.services.customers.update(id, input).await?;
    Ok(no_content_response())
}

#[utoipa::path(
    delete,
    path = "/Customer/{id}",
    params(("id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 204, description = "Customer deleted"),
        (status = 404, description = "Customer not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Customer still has orders", body = crate::errors::ErrorResponse)
    ),
    tag = "Customer"
)]
pub async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, ServiceError> {
    state.services.customers.delete(id).await?;
    Ok(no_content_response())
}

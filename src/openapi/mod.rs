use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "CRM API",
        version = "0.1.0",
        description = r#"
# CRM API

Customers, products, orders and email campaign activities over a relational store.

Every create returns `201` with a `Location` header, updates and deletes return `204`.
Unknown ids return `404`. Deleting a customer or product that still has orders returns `409`.

Errors share one body:

```json
{
  "error": "Bad Request",
  "message": "Validation error: First name is required",
  "request_id": "5f0c...",
  "timestamp": "2024-01-01T00:00:00Z"
}
```
        "#,
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    tags(
        (name = "Customer", description = "Customer records"),
        (name = "Product", description = "Product catalog"),
        (name = "Order", description = "Orders linking a customer to a product"),
        (name = "Activity", description = "Email campaign sends")
    ),
    paths(
        // Customers
        crate::handlers::customers::create_customer,
        crate::handlers::customers::get_customer,
        crate::handlers::customers::list_customers,
        crate::handlers::customers::update_customer,
        crate::handlers::customers::delete_customer,

        // Products
        crate::handlers::products::create_product,
        crate::handlers::products::get_product,
        crate::handlers::products::list_products,
        crate::handlers::products::update_product,
        crate::handlers::products::delete_product,

        // Orders
        crate::handlers::orders::create_order,
        crate::handlers::orders::get_order,
        crate::handlers::orders::get_order_details,
        crate::handlers::orders::list_orders,
        crate::handlers::orders::update_order,
        crate::handlers::orders::update_order_by_pair,
        crate::handlers::orders::delete_order,

        // Activities
        crate::handlers::activities::create_activity,
        crate::handlers::activities::get_activity,
        crate::handlers::activities::list_activities,
        crate::handlers::activities::update_activity,
        crate::handlers::activities::delete_activity,
    ),
    components(
        schemas(
            crate::dto::customer::CreateCustomerRequest,
            crate::dto::customer::UpdateCustomerRequest,
            crate::dto::customer::CustomerResponse,
            crate::dto::product::CreateProductRequest,
            crate::dto::product::UpdateProductRequest,
            crate::dto::product::ProductResponse,
            crate::dto::order::CreateOrderRequest,
            crate::dto::order::UpdateOrderRequest,
            crate::dto::order::UpdateOrderByPairRequest,
            crate::dto::order::OrderResponse,
            crate::dto::order::OrderDetailsResponse,
            crate::dto::activity::CreateActivityRequest,
            crate::dto::activity::UpdateActivityRequest,
            crate::dto::activity::ActivityResponse,

            // Error types
            crate::errors::ErrorResponse
        )
    )
)]
pub struct ApiDocV1;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDocV1::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_every_entity_route() {
        let openapi = ApiDocV1::openapi();
        let json = serde_json::to_string(&openapi).unwrap();
        assert!(json.contains("CRM API"));
        for path in [
            "/Customer/create-customer",
            "/Product/get-all-products",
            "/Order/{id}/details",
            "/Activity/{id}",
        ] {
            assert!(json.contains(path), "missing {path}");
        }
    }

    #[test]
    fn pair_matched_order_update_is_deprecated() {
        let openapi = ApiDocV1::openapi();
        let put = openapi
            .paths
            .paths
            .get("/Order")
            .and_then(|item| item.put.as_ref())
            .expect("PUT /Order documented");
        assert!(matches!(
            put.deprecated,
            Some(utoipa::openapi::Deprecated::True)
        ));
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::{customer::CustomerResponse, product::ProductResponse};
use crate::entities::order;

/// Payload for `POST /Order/create-order`
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[validate(range(min = 1, message = "ProductId must be greater than zero"))]
    #[schema(example = 1)]
    pub product_id: Option<i32>,
    #[validate(range(min = 1, message = "CustomerId must be greater than zero"))]
    #[schema(example = 1)]
    pub customer_id: Option<i32>,
    #[validate(length(max = 50, message = "Status must be at most 50 characters"))]
    #[schema(example = "Pending")]
    pub status: Option<String>,
}

/// Replaces the status of an order addressed by id; the value is stored as given
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderRequest {
    #[validate(length(max = 50, message = "Status must be at most 50 characters"))]
    #[schema(example = "Shipped")]
    pub status: String,
}

/// Legacy update body that addresses the order by its product/customer pair
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderByPairRequest {
    #[validate(range(min = 1, message = "ProductId must be greater than zero"))]
    pub product_id: i32,
    #[validate(range(min = 1, message = "CustomerId must be greater than zero"))]
    pub customer_id: i32,
    #[validate(length(max = 50, message = "Status must be at most 50 characters"))]
    pub status: String,
}

impl UpdateOrderByPairRequest {
    pub fn into_status_update(self) -> UpdateOrderRequest {
        UpdateOrderRequest {
            status: self.status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    #[schema(example = 1)]
    pub id: i32,
    pub product_id: i32,
    pub customer_id: i32,
    pub status: String,
    pub created_date: DateTime<Utc>,
    pub updated_date: Option<DateTime<Utc>>,
}

impl From<order::Model> for OrderResponse {
    fn from(model: order::Model) -> Self {
        Self {
            id: model.id,
            product_id: model.product_id,
            customer_id: model.customer_id,
            status: model.status,
            created_date: model.created_date,
            updated_date: model.updated_date,
        }
    }
}

/// An order together with the customer and product it references
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetailsResponse {
    #[serde(flatten)]
    pub order: OrderResponse,
    pub customer: CustomerResponse,
    pub product: ProductResponse,
}

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::entities::product;

/// Payload for `POST /Product/create-product`
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    #[validate(length(max = 50, message = "Name must be at most 50 characters"))]
    #[schema(example = "Product A")]
    pub name: Option<String>,
    #[validate(length(max = 100, message = "Description must be at most 100 characters"))]
    #[schema(example = "Description for Product A")]
    pub description: Option<String>,
    #[validate(length(max = 50, message = "SKU must be at most 50 characters"))]
    #[schema(example = "SKU-001")]
    pub sku: Option<String>,
}

/// Full replacement of a product's fields; values are stored as given
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    #[validate(length(max = 50, message = "Name must be at most 50 characters"))]
    pub name: String,
    #[validate(length(max = 100, message = "Description must be at most 100 characters"))]
    pub description: String,
    #[validate(length(max = 50, message = "SKU must be at most 50 characters"))]
    pub sku: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    #[schema(example = 1)]
    pub id: i32,
    pub name: String,
    pub description: String,
    pub sku: String,
}

impl From<product::Model> for ProductResponse {
    fn from(model: product::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            sku: model.sku,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn length_limits() {
        let req = CreateProductRequest {
            name: Some("n".repeat(50)),
            description: Some("d".repeat(101)),
            sku: Some("SKU-001".into()),
        };
        let errors = req.validate().unwrap_err();
        assert!(!errors.field_errors().contains_key("name"));
        assert!(errors.field_errors().contains_key("description"));
    }

    #[test]
    fn update_request_rejects_missing_sku() {
        let result = serde_json::from_value::<UpdateProductRequest>(json!({
            "name": "Product A",
            "description": "Description for Product A"
        }));
        assert!(result.is_err());
    }
}

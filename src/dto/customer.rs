use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::{validate_email_or_blank, validate_phone};
use crate::entities::customer;

/// Payload for `POST /Customer/create-customer`
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerRequest {
    #[validate(length(max = 50, message = "First name must be at most 50 characters"))]
    #[schema(example = "John")]
    pub first_name: Option<String>,
    #[validate(length(max = 50, message = "Last name must be at most 50 characters"))]
    #[schema(example = "Doe")]
    pub last_name: Option<String>,
    #[validate(
        length(max = 20, message = "Phone must be at most 20 characters"),
        custom = "validate_phone"
    )]
    #[schema(example = "1234567890")]
    pub phone: Option<String>,
    #[validate(
        email(message = "Invalid email address"),
        length(max = 100, message = "Email must be at most 100 characters")
    )]
    #[schema(example = "john@example.com")]
    pub email: Option<String>,
}

/// Full replacement of a customer's fields; values are stored as given
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerRequest {
    #[validate(length(max = 50, message = "First name must be at most 50 characters"))]
    pub first_name: String,
    #[validate(length(max = 50, message = "Last name must be at most 50 characters"))]
    pub last_name: String,
    #[validate(
        length(max = 20, message = "Phone must be at most 20 characters"),
        custom = "validate_phone"
    )]
    pub phone: String,
    #[validate(
        length(max = 100, message = "Email must be at most 100 characters"),
        custom = "validate_email_or_blank"
    )]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    #[schema(example = 1)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
}

impl From<customer::Model> for CustomerResponse {
    fn from(model: customer::Model) -> Self {
        Self {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            phone: model.phone,
            email: model.email,
        }
    }
}

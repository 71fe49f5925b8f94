use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::{double_option, validate_email_or_blank};
use crate::entities::activity;

/// Payload for `POST /Activity/create-activity`
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateActivityRequest {
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    #[schema(example = "Welcome Email")]
    pub name: Option<String>,
    #[validate(
        email(message = "Invalid email address"),
        length(max = 100, message = "Email must be at most 100 characters")
    )]
    #[schema(example = "noreply@company.com")]
    pub from_address: Option<String>,
    #[validate(length(max = 100, message = "From name must be at most 100 characters"))]
    #[schema(example = "Company Team")]
    pub from_name: Option<String>,
    #[validate(
        email(message = "Invalid email address"),
        length(max = 100, message = "Email must be at most 100 characters")
    )]
    #[schema(example = "john@example.com")]
    pub to_email_address: Option<String>,
    /// Defaults to the time of the request
    pub created_date: Option<DateTime<Utc>>,
}

/// Partial update: absent fields are kept and present text is stored as given;
/// for the milestone dates an explicit `null` clears the stored value
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateActivityRequest {
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: Option<String>,
    #[validate(
        length(max = 100, message = "Email must be at most 100 characters"),
        custom = "validate_email_or_blank"
    )]
    pub from_address: Option<String>,
    #[validate(length(max = 100, message = "From name must be at most 100 characters"))]
    pub from_name: Option<String>,
    #[validate(
        length(max = 100, message = "Email must be at most 100 characters"),
        custom = "validate_email_or_blank"
    )]
    pub to_email_address: Option<String>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub sent_date: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub opened_date: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub bounced_date: Option<Option<DateTime<Utc>>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityResponse {
    #[schema(example = "11111111-1111-1111-1111-111111111111")]
    pub id: Uuid,
    pub name: String,
    pub from_address: String,
    pub from_name: String,
    pub to_email_address: String,
    pub created_date: DateTime<Utc>,
    pub sent_date: Option<DateTime<Utc>>,
    pub opened_date: Option<DateTime<Utc>>,
    pub bounced_date: Option<DateTime<Utc>>,
}

impl From<activity::Model> for ActivityResponse {
    fn from(model: activity::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            from_address: model.from_address,
            from_name: model.from_name,
            to_email_address: model.to_email_address,
            created_date: model.created_date,
            sent_date: model.sent_date,
            opened_date: model.opened_date,
            bounced_date: model.bounced_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn patch_distinguishes_absent_from_null() {
        let req: UpdateActivityRequest = serde_json::from_value(json!({
            "openedDate": null,
            "bouncedDate": "2024-03-02T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(req.sent_date, None);
        assert_eq!(req.opened_date, Some(None));
        assert!(matches!(req.bounced_date, Some(Some(_))));
        assert!(req.name.is_none());
    }

    #[test]
    fn patch_allows_blank_but_not_malformed_addresses() {
        let blank = UpdateActivityRequest {
            from_address: Some(String::new()),
            ..Default::default()
        };
        assert!(blank.validate().is_ok());

        let malformed = UpdateActivityRequest {
            to_email_address: Some("mike-at-example".into()),
            ..Default::default()
        };
        let errors = malformed.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("to_email_address"));
    }

    #[test]
    fn create_rejects_malformed_addresses() {
        let req = CreateActivityRequest {
            name: Some("Newsletter".into()),
            from_address: Some("news-at-company".into()),
            from_name: Some("Marketing Team".into()),
            to_email_address: Some("mike@example.com".into()),
            created_date: None,
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("from_address"));
        assert!(!errors.field_errors().contains_key("to_email_address"));
    }

    #[test]
    fn create_reads_optional_created_date() {
        let req: CreateActivityRequest = serde_json::from_value(json!({
            "name": "Welcome Email",
            "fromAddress": "noreply@company.com",
            "fromName": "Company Team",
            "toEmailAddress": "john@example.com",
            "createdDate": "2024-01-01T00:00:00Z"
        }))
        .unwrap();
        assert!(req.created_date.is_some());
        assert!(req.validate().is_ok());
    }
}

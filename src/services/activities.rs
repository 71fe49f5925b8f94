use crate::{
    db::DatabaseAccess,
    dto::{
        activity::{ActivityResponse, CreateActivityRequest, UpdateActivityRequest},
        require_text,
    },
    entities::activity,
    errors::ServiceError,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use std::sync::Arc;
use tracing::{debug, info, instrument};
use uuid::Uuid;
use validator::Validate;

use super::insert_rejected;

/// Email campaign sends
#[derive(Clone)]
pub struct ActivityService {
    db: DatabaseAccess,
}

impl ActivityService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            db: DatabaseAccess::new(db),
        }
    }

    /// Record a new send. The send time is the time of the request.
    #[instrument(skip(self))]
    pub async fn create(
        &self,
        input: CreateActivityRequest,
    ) -> Result<ActivityResponse, ServiceError> {
        let name = require_text(&input.name, "Name is required")?;
        let from_address = require_text(&input.from_address, "From address is required")?;
        let from_name = require_text(&input.from_name, "From name is required")?;
        let to_email_address =
            require_text(&input.to_email_address, "To email address is required")?;
        input.validate()?;

        let now = Utc::now();
        let activity = activity::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.trim().to_string()),
            from_address: Set(from_address.trim().to_string()),
            from_name: Set(from_name.trim().to_string()),
            to_email_address: Set(to_email_address.trim().to_string()),
            created_date: Set(input.created_date.unwrap_or(now)),
            sent_date: Set(Some(now)),
            opened_date: Set(None),
            bounced_date: Set(None),
        };

        let activity = self
            .db
            .execute("activity.create", activity.insert(self.db.pool()))
            .await
            .map_err(insert_rejected("Activity"))?;

        info!(activity_id = %activity.id, "Created activity");
        Ok(activity.into())
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: Uuid) -> Result<ActivityResponse, ServiceError> {
        self.find(id).await.map(Into::into)
    }

    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<ActivityResponse>, ServiceError> {
        let activities = self
            .db
            .execute(
                "activity.list",
                activity::Entity::find()
                    .order_by_asc(activity::Column::Id)
                    .all(self.db.pool()),
            )
            .await?;

        Ok(activities.into_iter().map(Into::into).collect())
    }

    /// Apply the fields present in `input`; absent fields keep their value
    #[instrument(skip(self))]
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateActivityRequest,
    ) -> Result<ActivityResponse, ServiceError> {
        input.validate()?;

        let existing = self.find(id).await?;
        let mut active: activity::ActiveModel = existing.clone().into();

        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(from_address) = input.from_address {
            active.from_address = Set(from_address);
        }
        if let Some(from_name) = input.from_name {
            active.from_name = Set(from_name);
        }
        if let Some(to_email_address) = input.to_email_address {
            active.to_email_address = Set(to_email_address);
        }
        if let Some(sent_date) = input.sent_date {
            active.sent_date = Set(sent_date);
        }
        if let Some(opened_date) = input.opened_date {
            active.opened_date = Set(opened_date);
        }
        if let Some(bounced_date) = input.bounced_date {
            active.bounced_date = Set(bounced_date);
        }

        if !active.is_changed() {
            debug!(activity_id = %id, "Empty activity patch; nothing to write");
            return Ok(existing.into());
        }

        let updated = self
            .db
            .execute("activity.update", active.update(self.db.pool()))
            .await?;

        info!(activity_id = %id, "Updated activity");
        Ok(updated.into())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let result = self
            .db
            .execute(
                "activity.delete",
                activity::Entity::delete_by_id(id).exec(self.db.pool()),
            )
            .await?;

        if result.rows_affected == 0 {
            return Err(ServiceError::not_found("Activity", id));
        }

        info!(activity_id = %id, "Deleted activity");
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<activity::Model, ServiceError> {
        self.db
            .execute(
                "activity.find",
                activity::Entity::find_by_id(id).one(self.db.pool()),
            )
            .await?
            .ok_or_else(|| ServiceError::not_found("Activity", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::TimeZone;
    use fake::faker::internet::en::SafeEmail;
    use fake::faker::name::en::Name;
    use fake::Fake;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn seeded(id: Uuid) -> activity::Model {
        let day = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        activity::Model {
            id,
            name: "Welcome Email".into(),
            from_address: "noreply@company.com".into(),
            from_name: "Company Team".into(),
            to_email_address: "john@example.com".into(),
            created_date: day,
            sent_date: Some(day),
            opened_date: Some(day),
            bounced_date: None,
        }
    }

    #[tokio::test]
    async fn create_without_recipient_touches_nothing() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = ActivityService::new(db.clone());

        let input = CreateActivityRequest {
            name: Some(Name().fake()),
            from_address: Some(SafeEmail().fake()),
            from_name: Some("Company Team".into()),
            to_email_address: None,
            created_date: None,
        };
        assert_matches!(
            service.create(input).await,
            Err(ServiceError::ValidationError(_))
        );

        drop(service);
        let db = Arc::try_unwrap(db).expect("service dropped");
        assert!(db.into_transaction_log().is_empty());
    }

    #[tokio::test]
    async fn blank_patch_field_is_stored_as_given() {
        let id = Uuid::new_v4();
        let current = seeded(id);
        let stored = activity::Model {
            from_name: String::new(),
            ..current.clone()
        };
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![current]])
                .append_query_results([vec![stored]])
                .into_connection(),
        );
        let service = ActivityService::new(db.clone());

        let input = UpdateActivityRequest {
            from_name: Some(String::new()),
            ..Default::default()
        };
        let updated = service.update(id, input).await.unwrap();
        assert_eq!(updated.from_name, "");
        assert_eq!(updated.name, "Welcome Email");

        drop(service);
        let db = Arc::try_unwrap(db).expect("service dropped");
        // Lookup then write
        assert_eq!(db.into_transaction_log().len(), 2);
    }

    #[tokio::test]
    async fn empty_patch_returns_current_row_without_writing() {
        let id = Uuid::new_v4();
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![seeded(id)]])
                .into_connection(),
        );
        let service = ActivityService::new(db.clone());

        let result = service
            .update(id, UpdateActivityRequest::default())
            .await
            .unwrap();
        assert_eq!(result.name, "Welcome Email");

        drop(service);
        let db = Arc::try_unwrap(db).expect("service dropped");
        assert_eq!(db.into_transaction_log().len(), 1);
    }

    #[tokio::test]
    async fn patch_clears_opened_date() {
        let id = Uuid::new_v4();
        let current = seeded(id);
        let stored = activity::Model {
            opened_date: None,
            ..current.clone()
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![current]])
            .append_query_results([vec![stored]])
            .into_connection();
        let service = ActivityService::new(Arc::new(db));

        let input = UpdateActivityRequest {
            opened_date: Some(None),
            ..Default::default()
        };
        let updated = service.update(id, input).await.unwrap();
        assert!(updated.opened_date.is_none());
        assert!(updated.sent_date.is_some());
    }
}

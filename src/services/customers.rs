use crate::{
    db::DatabaseAccess,
    dto::{
        customer::{CreateCustomerRequest, CustomerResponse, UpdateCustomerRequest},
        require_text,
    },
    entities::{customer, order},
    errors::ServiceError,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use validator::Validate;

use super::{insert_rejected, restricted_delete};

/// Customer records
#[derive(Clone)]
pub struct CustomerService {
    db: DatabaseAccess,
}

impl CustomerService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            db: DatabaseAccess::new(db),
        }
    }

    /// Create a new customer
    #[instrument(skip(self))]
    pub async fn create(
        &self,
        input: CreateCustomerRequest,
    ) -> Result<CustomerResponse, ServiceError> {
        let first_name = require_text(&input.first_name, "First name is required")?;
        let last_name = require_text(&input.last_name, "Last name is required")?;
        let phone = require_text(&input.phone, "Phone number is required")?;
        let email = require_text(&input.email, "Email address is required")?;
        input.validate()?;

        let customer = customer::ActiveModel {
            first_name: Set(first_name.trim().to_string()),
            last_name: Set(last_name.trim().to_string()),
            phone: Set(phone.trim().to_string()),
            email: Set(email.trim().to_string()),
            ..Default::default()
        };

        let customer = self
            .db
            .execute("customer.create", customer.insert(self.db.pool()))
            .await
            .map_err(insert_rejected("Customer"))?;

        info!(customer_id = customer.id, "Created customer");
        Ok(customer.into())
    }

    /// Get a customer by id
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i32) -> Result<CustomerResponse, ServiceError> {
        self.find(id).await.map(Into::into)
    }

    /// List every customer in ascending id order
    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<CustomerResponse>, ServiceError> {
        let customers = self
            .db
            .execute(
                "customer.list",
                customer::Entity::find()
                    .order_by_asc(customer::Column::Id)
                    .all(self.db.pool()),
            )
            .await?;

        Ok(customers.into_iter().map(Into::into).collect())
    }

    /// Replace every field of an existing customer
    #[instrument(skip(self))]
    pub async fn update(
        &self,
        id: i32,
        input: UpdateCustomerRequest,
    ) -> Result<CustomerResponse, ServiceError> {
        input.validate()?;

        let existing = self.find(id).await?;
        let mut active: customer::ActiveModel = existing.into();
        active.first_name = Set(input.first_name);
        active.last_name = Set(input.last_name);
        active.phone = Set(input.phone);
        active.email = Set(input.email);

        let updated = self
            .db
            .execute("customer.update", active.update(self.db.pool()))
            .await?;

        info!(customer_id = id, "Updated customer");
        Ok(updated.into())
    }

    /// Delete a customer that has no orders
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let order_count = self
            .db
            .execute(
                "customer.count_orders",
                order::Entity::find()
                    .filter(order::Column::CustomerId.eq(id))
                    .count(self.db.pool()),
            )
            .await?;

        if order_count > 0 {
            warn!(customer_id = id, order_count, "Refusing to delete customer with orders");
            return Err(ServiceError::Conflict(format!(
                "Customer with id {} still has {} order(s) and cannot be deleted",
                id, order_count
            )));
        }

        let result = self
            .db
            .execute(
                "customer.delete",
                customer::Entity::delete_by_id(id).exec(self.db.pool()),
            )
            .await
            .map_err(restricted_delete("Customer", id))?;

        if result.rows_affected == 0 {
            return Err(ServiceError::not_found("Customer", id));
        }

        info!(customer_id = id, "Deleted customer");
        Ok(())
    }

    async fn find(&self, id: i32) -> Result<customer::Model, ServiceError> {
        self.db
            .execute(
                "customer.find",
                customer::Entity::find_by_id(id).one(self.db.pool()),
            )
            .await?
            .ok_or_else(|| ServiceError::not_found("Customer", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rstest::rstest;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Value};
    use std::collections::BTreeMap;

    fn valid_input() -> CreateCustomerRequest {
        CreateCustomerRequest {
            first_name: Some("John".into()),
            last_name: Some("Doe".into()),
            phone: Some("1234567890".into()),
            email: Some("john@example.com".into()),
        }
    }

    #[rstest]
    #[case::first_name(|r: &mut CreateCustomerRequest| r.first_name = None)]
    #[case::blank_first_name(|r: &mut CreateCustomerRequest| r.first_name = Some("  ".into()))]
    #[case::last_name(|r: &mut CreateCustomerRequest| r.last_name = Some(String::new()))]
    #[case::phone(|r: &mut CreateCustomerRequest| r.phone = None)]
    #[case::email(|r: &mut CreateCustomerRequest| r.email = Some("\t".into()))]
    #[case::bad_email(|r: &mut CreateCustomerRequest| r.email = Some("john-at-example".into()))]
    #[tokio::test]
    async fn create_rejects_invalid_input_without_touching_store(
        #[case] mutate: fn(&mut CreateCustomerRequest),
    ) {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let db = Arc::new(db);
        let service = CustomerService::new(db.clone());

        let mut input = valid_input();
        mutate(&mut input);

        let result = service.create(input).await;
        assert_matches!(result, Err(ServiceError::ValidationError(_)));

        drop(service);
        let db = Arc::try_unwrap(db).expect("service dropped");
        assert!(db.into_transaction_log().is_empty());
    }

    #[tokio::test]
    async fn create_returns_stored_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![customer::Model {
                id: 4,
                first_name: "John".into(),
                last_name: "Doe".into(),
                phone: "1234567890".into(),
                email: "john@example.com".into(),
            }]])
            .into_connection();
        let service = CustomerService::new(Arc::new(db));

        let created = service.create(valid_input()).await.unwrap();
        assert_eq!(created.id, 4);
        assert_eq!(created.first_name, "John");
    }

    #[tokio::test]
    async fn get_by_id_missing_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<customer::Model>::new()])
            .into_connection();
        let service = CustomerService::new(Arc::new(db));

        assert_matches!(service.get_by_id(99).await, Err(ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_unknown_id_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![count_row(0)]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();
        let service = CustomerService::new(Arc::new(db));

        assert_matches!(service.delete(42).await, Err(ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_with_orders_is_conflict_and_skips_delete() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![count_row(2)]])
                .into_connection(),
        );
        let service = CustomerService::new(db.clone());

        assert_matches!(service.delete(1).await, Err(ServiceError::Conflict(_)));

        drop(service);
        let db = Arc::try_unwrap(db).expect("service dropped");
        assert_eq!(db.into_transaction_log().len(), 1);
    }

    fn count_row(n: i64) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([("num_items", Value::BigInt(Some(n)))])
    }
}

// Entity services: one per table, each issuing at most a handful of queries per call
pub mod activities;
pub mod customers;
pub mod orders;
pub mod products;

pub use activities::ActivityService;
pub use customers::CustomerService;
pub use orders::OrderService;
pub use products::ProductService;

use crate::errors::ServiceError;
use sea_orm::{DbErr, SqlErr};
use tracing::warn;

/// A store that reports nothing inserted is a rejected create, not a server fault
pub(crate) fn insert_rejected(entity: &'static str) -> impl FnOnce(ServiceError) -> ServiceError {
    move |err| match err {
        ServiceError::DatabaseError(DbErr::RecordNotInserted) => {
            warn!(entity, "store reported no row inserted");
            ServiceError::ValidationError(format!("{} could not be created", entity))
        }
        other => other,
    }
}

/// Foreign-key violations raised by the store surface as conflicts
pub(crate) fn restricted_delete(
    entity: &'static str,
    id: i32,
) -> impl FnOnce(ServiceError) -> ServiceError {
    move |err| match err {
        ServiceError::DatabaseError(ref db_err)
            if matches!(
                db_err.sql_err(),
                Some(SqlErr::ForeignKeyConstraintViolation(_))
            ) =>
        {
            ServiceError::Conflict(format!(
                "{} with id {} still has orders and cannot be deleted",
                entity, id
            ))
        }
        other => other,
    }
}

use crate::{
    db::DatabaseAccess,
    dto::{
        order::{
            CreateOrderRequest, OrderDetailsResponse, OrderResponse, UpdateOrderByPairRequest,
            UpdateOrderRequest,
        },
        require_text,
    },
    entities::{customer, order, product},
    errors::ServiceError,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use validator::Validate;

use super::insert_rejected;

const UNKNOWN_REFERENCE: &str = "Order must reference an existing product and customer";

/// Orders linking one customer to one product
#[derive(Clone)]
pub struct OrderService {
    db: DatabaseAccess,
}

impl OrderService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            db: DatabaseAccess::new(db),
        }
    }

    /// Create an order for an existing product and customer
    #[instrument(skip(self))]
    pub async fn create(&self, input: CreateOrderRequest) -> Result<OrderResponse, ServiceError> {
        let product_id = input
            .product_id
            .ok_or_else(|| ServiceError::ValidationError("ProductId is required".into()))?;
        let customer_id = input
            .customer_id
            .ok_or_else(|| ServiceError::ValidationError("CustomerId is required".into()))?;
        let status = require_text(&input.status, "Status is required")?;
        input.validate()?;

        let product_exists = self
            .db
            .execute(
                "order.resolve_product",
                product::Entity::find_by_id(product_id).one(self.db.pool()),
            )
            .await?
            .is_some();
        if !product_exists {
            warn!(product_id, "Order references an unknown product");
            return Err(ServiceError::ValidationError(UNKNOWN_REFERENCE.into()));
        }

        let customer_exists = self
            .db
            .execute(
                "order.resolve_customer",
                customer::Entity::find_by_id(customer_id).one(self.db.pool()),
            )
            .await?
            .is_some();
        if !customer_exists {
            warn!(customer_id, "Order references an unknown customer");
            return Err(ServiceError::ValidationError(UNKNOWN_REFERENCE.into()));
        }

        let order = order::ActiveModel {
            product_id: Set(product_id),
            customer_id: Set(customer_id),
            status: Set(status.trim().to_string()),
            created_date: Set(Utc::now()),
            updated_date: Set(None),
            ..Default::default()
        };

        let order = self
            .db
            .execute("order.create", order.insert(self.db.pool()))
            .await
            .map_err(insert_rejected("Order"))?;

        info!(order_id = order.id, product_id, customer_id, "Created order");
        Ok(order.into())
    }

    /// Get an order by id
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i32) -> Result<OrderResponse, ServiceError> {
        self.find(id).await.map(Into::into)
    }

    /// Get an order with its customer and product resolved
    #[instrument(skip(self))]
    pub async fn get_details(&self, id: i32) -> Result<OrderDetailsResponse, ServiceError> {
        let order = self.find(id).await?;

        let customer = self
            .db
            .execute(
                "order.details_customer",
                order.find_related(customer::Entity).one(self.db.pool()),
            )
            .await?
            .ok_or_else(|| {
                ServiceError::InternalError(format!(
                    "Order {} references missing customer {}",
                    order.id, order.customer_id
                ))
            })?;

        let product = self
            .db
            .execute(
                "order.details_product",
                order.find_related(product::Entity).one(self.db.pool()),
            )
            .await?
            .ok_or_else(|| {
                ServiceError::InternalError(format!(
                    "Order {} references missing product {}",
                    order.id, order.product_id
                ))
            })?;

        Ok(OrderDetailsResponse {
            order: order.into(),
            customer: customer.into(),
            product: product.into(),
        })
    }

    /// List every order in ascending id order
    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<OrderResponse>, ServiceError> {
        let orders = self
            .db
            .execute(
                "order.list",
                order::Entity::find()
                    .order_by_asc(order::Column::Id)
                    .all(self.db.pool()),
            )
            .await?;

        Ok(orders.into_iter().map(Into::into).collect())
    }

    /// Replace the status of an order and stamp its update time
    #[instrument(skip(self))]
    pub async fn update(
        &self,
        id: i32,
        input: UpdateOrderRequest,
    ) -> Result<OrderResponse, ServiceError> {
        input.validate()?;

        let existing = self.find(id).await?;
        self.apply_status(existing, input.status).await
    }

    /// Legacy update that resolves the order by its (product, customer) pair.
    /// The lowest matching id wins.
    #[instrument(skip(self))]
    pub async fn update_by_pair(
        &self,
        input: UpdateOrderByPairRequest,
    ) -> Result<OrderResponse, ServiceError> {
        warn!(
            product_id = input.product_id,
            customer_id = input.customer_id,
            "Deprecated pair-matched order update used; address orders by id instead"
        );
        input.validate()?;

        let existing = self
            .db
            .execute(
                "order.find_by_pair",
                order::Entity::find()
                    .filter(order::Column::ProductId.eq(input.product_id))
                    .filter(order::Column::CustomerId.eq(input.customer_id))
                    .order_by_asc(order::Column::Id)
                    .one(self.db.pool()),
            )
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!(
                    "Order for product {} and customer {} not found",
                    input.product_id, input.customer_id
                ))
            })?;

        self.apply_status(existing, input.into_status_update().status)
            .await
    }

    /// Delete an order
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let result = self
            .db
            .execute(
                "order.delete",
                order::Entity::delete_by_id(id).exec(self.db.pool()),
            )
            .await?;

        if result.rows_affected == 0 {
            return Err(ServiceError::not_found("Order", id));
        }

        info!(order_id = id, "Deleted order");
        Ok(())
    }

    async fn apply_status(
        &self,
        existing: order::Model,
        status: String,
    ) -> Result<OrderResponse, ServiceError> {
        let id = existing.id;
        let mut active: order::ActiveModel = existing.into();
        active.status = Set(status);
        active.updated_date = Set(Some(Utc::now()));

        let updated = self
            .db
            .execute("order.update", active.update(self.db.pool()))
            .await?;

        info!(order_id = id, status = %updated.status, "Updated order");
        Ok(updated.into())
    }

    async fn find(&self, id: i32) -> Result<order::Model, ServiceError> {
        self.db
            .execute("order.find", order::Entity::find_by_id(id).one(self.db.pool()))
            .await?
            .ok_or_else(|| ServiceError::not_found("Order", id))
    }
}

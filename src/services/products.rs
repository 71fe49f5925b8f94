use crate::{
    db::DatabaseAccess,
    dto::{
        product::{CreateProductRequest, ProductResponse, UpdateProductRequest},
        require_text,
    },
    entities::{order, product},
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

/// Product catalog records
#[derive(Clone)]
pub struct ProductService {
    db: DatabaseAccess,
}

impl ProductService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            db: DatabaseAccess::new(db),
        }
    }

    /// Create a new product
    #[instrument(skip(self))]
    pub async fn create(&self, input: CreateProductRequest) -> Result<ProductResponse, ServiceError> {
        let name = require_text(&input.name, "Name is required")?;
        let description = require_text(&input.description, "Description is required")?;
        let sku = require_text(&input.sku, "SKU is required")?;
        input.validate()?;

        let product = product::ActiveModel {
            name: Set(name.trim().to_string()),
            description: Set(description.trim().to_string()),
            sku: Set(sku.trim().to_string()),
            ..Default::default()
        };

        let product = self
            .db
            .execute("product.create", product.insert(self.db.pool()))
            .await
            .map_err(insert_rejected("Product"))?;

        info!(product_id = product.id, sku = %product.sku, "Created product");
        Ok(product.into())
    }

    /// Get a product by id
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i32) -> Result<ProductResponse, ServiceError> {
        self.find(id).await.map(Into::into)
    }

    /// List every product in ascending id order
    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<ProductResponse>, ServiceError> {
        let products = self
            .db
            .execute(
                "product.list",
                product::Entity::find()
                    .order_by_asc(product::Column::Id)
                    .all(self.db.pool()),
            )
            .await?;

        Ok(products.into_iter().map(Into::into).collect())
    }

    /// Replace every field of an existing product
    #[instrument(skip(self))]
    pub async fn update(
        &self,
        id: i32,
        input: UpdateProductRequest,
    ) -> Result<ProductResponse, ServiceError> {
        input.validate()?;

        let existing = self.find(id).await?;
        let mut active: product::ActiveModel = existing.into();
        active.name = Set(input.name);
        active.description = Set(input.description);
        active.sku = Set(input.sku);

        let updated = self
            .db
            .execute("product.update", active.update(self.db.pool()))
            .await?;

        info!(product_id = id, "Updated product");
        Ok(updated.into())
    }

    /// Delete a product that is not referenced by any order
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let order_count = self
            .db
            .execute(
                "product.count_orders",
                order::Entity::find()
                    .filter(order::Column::ProductId.eq(id))
                    .count(self.db.pool()),
            )
            .await?;

        if order_count > 0 {
            warn!(product_id = id, order_count, "Refusing to delete product with orders");
            return Err(ServiceError::Conflict(format!(
                "Product with id {} still has {} order(s) and cannot be deleted",
                id, order_count
            )));
        }

        let result = self
            .db
            .execute(
                "product.delete",
                product::Entity::delete_by_id(id).exec(self.db.pool()),
            )
            .await
            .map_err(restricted_delete("Product", id))?;

        if result.rows_affected == 0 {
            return Err(ServiceError::not_found("Product", id));
        }

        info!(product_id = id, "Deleted product");
        Ok(())
    }

    async fn find(&self, id: i32) -> Result<product::Model, ServiceError> {
        self.db
            .execute(
                "product.find",
                product::Entity::find_by_id(id).one(self.db.pool()),
            )
            .await?
            .ok_or_else(|| ServiceError::not_found("Product", id))
    }
}

use crate::db::DbPool;
use crate::services::{ActivityService, CustomerService, OrderService, ProductService};
use std::sync::Arc;

pub mod activities;
pub mod common;
pub mod customers;
pub mod orders;
pub mod products;

/// Services shared by every request handler
#[derive(Clone)]
pub struct AppServices {
    pub customers: Arc<CustomerService>,
    pub products: Arc<ProductService>,
    pub orders: Arc<OrderService>,
    pub activities: Arc<ActivityService>,
}

impl AppServices {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self {
            customers: Arc::new(CustomerService::new(db_pool.clone())),
            products: Arc::new(ProductService::new(db_pool.clone())),
            orders: Arc::new(OrderService::new(db_pool.clone())),
            activities: Arc::new(ActivityService::new(db_pool)),
        }
    }
}

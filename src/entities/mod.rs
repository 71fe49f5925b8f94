pub mod activity;
pub mod customer;
pub mod order;
pub mod product;

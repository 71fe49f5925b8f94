use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_customers_table::Migration),
            Box::new(m20240101_000002_create_products_table::Migration),
            Box::new(m20240101_000003_create_orders_table::Migration),
            Box::new(m20240101_000004_create_activities_table::Migration),
            Box::new(m20240101_000005_seed_data::Migration),
        ]
    }
}

mod m20240101_000001_create_customers_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_customers_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Customers::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Customers::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Customers::FirstName).string_len(50).not_null())
                        .col(ColumnDef::new(Customers::LastName).string_len(50).not_null())
                        .col(ColumnDef::new(Customers::Phone).string_len(20).not_null())
                        .col(ColumnDef::new(Customers::Email).string_len(100).not_null())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Customers::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(crate) enum Customers {
        Table,
        Id,
        FirstName,
        LastName,
        Phone,
        Email,
    }
}

mod m20240101_000002_create_products_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000002_create_products_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Products::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Products::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Products::Name).string_len(100).not_null())
                        .col(ColumnDef::new(Products::Description).string_len(250).not_null())
                        .col(ColumnDef::new(Products::Sku).string_len(50).not_null())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Products::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(crate) enum Products {
        Table,
        Id,
        Name,
        Description,
        Sku,
    }
}

mod m20240101_000003_create_orders_table {

    use super::m20240101_000001_create_customers_table::Customers;
    use super::m20240101_000002_create_products_table::Products;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000003_create_orders_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Orders::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Orders::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Orders::ProductId).integer().not_null())
                        .col(ColumnDef::new(Orders::CustomerId).integer().not_null())
                        .col(ColumnDef::new(Orders::Status).string().not_null())
                        .col(
                            ColumnDef::new(Orders::CreatedDate)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Orders::UpdatedDate)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_orders_product_id")
                                .from(Orders::Table, Orders::ProductId)
                                .to(Products::Table, Products::Id)
                                .on_delete(ForeignKeyAction::Restrict)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_orders_customer_id")
                                .from(Orders::Table, Orders::CustomerId)
                                .to(Customers::Table, Customers::Id)
                                .on_delete(ForeignKeyAction::Restrict)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_orders_customer_id")
                        .table(Orders::Table)
                        .col(Orders::CustomerId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_orders_product_id")
                        .table(Orders::Table)
                        .col(Orders::ProductId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Orders::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(crate) enum Orders {
        Table,
        Id,
        ProductId,
        CustomerId,
        Status,
        CreatedDate,
        UpdatedDate,
    }
}

mod m20240101_000004_create_activities_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000004_create_activities_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Activities::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Activities::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(Activities::Name).string_len(100).not_null())
                        .col(ColumnDef::new(Activities::FromAddress).string_len(100).not_null())
                        .col(ColumnDef::new(Activities::FromName).string_len(100).not_null())
                        .col(
                            ColumnDef::new(Activities::ToEmailAddress)
                                .string_len(100)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Activities::CreatedDate)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Activities::SentDate)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Activities::OpenedDate)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Activities::BouncedDate)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Activities::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(crate) enum Activities {
        Table,
        Id,
        Name,
        FromAddress,
        FromName,
        ToEmailAddress,
        CreatedDate,
        SentDate,
        OpenedDate,
        BouncedDate,
    }
}

mod m20240101_000005_seed_data {

    use super::m20240101_000001_create_customers_table::Customers;
    use super::m20240101_000002_create_products_table::Products;
    use super::m20240101_000003_create_orders_table::Orders;
    use super::m20240101_000004_create_activities_table::Activities;
    use chrono::{DateTime, NaiveDate, Utc};
    use sea_orm_migration::prelude::*;
    use uuid::Uuid;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000005_seed_data"
        }
    }

    const SEED_CUSTOMERS: [(&str, &str, &str, &str); 3] = [
        ("John", "Doe", "1234567890", "john@example.com"),
        ("Jane", "Smith", "9876543210", "jane@example.com"),
        ("Mike", "Johnson", "5551234567", "mike@example.com"),
    ];

    const SEED_PRODUCTS: [(&str, &str, &str); 3] = [
        ("Product A", "Description for Product A", "SKU-001"),
        ("Product B", "Description for Product B", "SKU-002"),
        ("Product C", "Description for Product C", "SKU-003"),
    ];

    const SEED_ORDER_STATUSES: [&str; 3] = ["Pending", "Shipped", "Delivered"];

    const SEED_ACTIVITY_IDS: [&str; 3] = [
        "11111111-1111-1111-1111-111111111111",
        "22222222-2222-2222-2222-222222222222",
        "33333333-3333-3333-3333-333333333333",
    ];

    fn seed_date(year: i32, month: u32, day: u32) -> Result<DateTime<Utc>, DbErr> {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
            .ok_or_else(|| DbErr::Custom(format!("invalid seed date {year}-{month}-{day}")))
    }

    fn seed_id(raw: &str) -> Result<Uuid, DbErr> {
        Uuid::parse_str(raw).map_err(|e| DbErr::Custom(e.to_string()))
    }

    fn query_err(e: impl std::fmt::Display) -> DbErr {
        DbErr::Custom(e.to_string())
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            let mut customers = Query::insert();
            customers.into_table(Customers::Table).columns([
                Customers::FirstName,
                Customers::LastName,
                Customers::Phone,
                Customers::Email,
            ]);
            for (first, last, phone, email) in SEED_CUSTOMERS {
                customers
                    .values([first.into(), last.into(), phone.into(), email.into()])
                    .map_err(query_err)?;
            }
            manager.exec_stmt(customers).await?;

            let mut products = Query::insert();
            products.into_table(Products::Table).columns([
                Products::Name,
                Products::Description,
                Products::Sku,
            ]);
            for (name, description, sku) in SEED_PRODUCTS {
                products
                    .values([name.into(), description.into(), sku.into()])
                    .map_err(query_err)?;
            }
            manager.exec_stmt(products).await?;

            // Order n references product n and customer n
            let now = Utc::now();
            let mut orders = Query::insert();
            orders.into_table(Orders::Table).columns([
                Orders::ProductId,
                Orders::CustomerId,
                Orders::Status,
                Orders::CreatedDate,
            ]);
            for (n, status) in (1i32..).zip(SEED_ORDER_STATUSES) {
                orders
                    .values([n.into(), n.into(), status.into(), now.into()])
                    .map_err(query_err)?;
            }
            manager.exec_stmt(orders).await?;

            let activities_rows = [
                (
                    seed_id(SEED_ACTIVITY_IDS[0])?,
                    "Welcome Email",
                    "noreply@company.com",
                    "Company Team",
                    "john@example.com",
                    seed_date(2024, 1, 1)?,
                    Some(seed_date(2024, 1, 1)?),
                    Some(seed_date(2024, 1, 3)?),
                    None,
                ),
                (
                    seed_id(SEED_ACTIVITY_IDS[1])?,
                    "Product Update",
                    "updates@company.com",
                    "Product Team",
                    "jane@example.com",
                    seed_date(2024, 2, 1)?,
                    Some(seed_date(2024, 2, 1)?),
                    Some(seed_date(2024, 2, 1)?),
                    None,
                ),
                (
                    seed_id(SEED_ACTIVITY_IDS[2])?,
                    "Newsletter",
                    "news@company.com",
                    "Marketing Team",
                    "mike@example.com",
                    seed_date(2024, 3, 1)?,
                    Some(seed_date(2024, 3, 1)?),
                    None,
                    Some(seed_date(2024, 3, 1)?),
                ),
            ];

            let mut activities = Query::insert();
            activities.into_table(Activities::Table).columns([
                Activities::Id,
                Activities::Name,
                Activities::FromAddress,
                Activities::FromName,
                Activities::ToEmailAddress,
                Activities::CreatedDate,
                Activities::SentDate,
                Activities::OpenedDate,
                Activities::BouncedDate,
            ]);
            for (id, name, from, from_name, to, created, sent, opened, bounced) in activities_rows {
                activities
                    .values([
                        id.into(),
                        name.into(),
                        from.into(),
                        from_name.into(),
                        to.into(),
                        created.into(),
                        sent.into(),
                        opened.into(),
                        bounced.into(),
                    ])
                    .map_err(query_err)?;
            }
            manager.exec_stmt(activities).await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            let emails = SEED_CUSTOMERS.map(|(_, _, _, email)| email);
            let skus = SEED_PRODUCTS.map(|(_, _, sku)| sku);
            let activity_ids = SEED_ACTIVITY_IDS
                .iter()
                .map(|raw| seed_id(raw))
                .collect::<Result<Vec<_>, _>>()?;

            manager
                .exec_stmt(
                    Query::delete()
                        .from_table(Orders::Table)
                        .and_where(
                            Expr::col(Orders::CustomerId).in_subquery(
                                Query::select()
                                    .column(Customers::Id)
                                    .from(Customers::Table)
                                    .and_where(Expr::col(Customers::Email).is_in(emails))
                                    .to_owned(),
                            ),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .exec_stmt(
                    Query::delete()
                        .from_table(Customers::Table)
                        .and_where(Expr::col(Customers::Email).is_in(emails))
                        .to_owned(),
                )
                .await?;

            manager
                .exec_stmt(
                    Query::delete()
                        .from_table(Products::Table)
                        .and_where(Expr::col(Products::Sku).is_in(skus))
                        .to_owned(),
                )
                .await?;

            manager
                .exec_stmt(
                    Query::delete()
                        .from_table(Activities::Table)
                        .and_where(Expr::col(Activities::Id).is_in(activity_ids))
                        .to_owned(),
                )
                .await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_ordered_and_uniquely_named() {
        let names: Vec<String> = Migrator::migrations()
            .iter()
            .map(|m| m.name().to_string())
            .collect();
        assert_eq!(names.len(), 5);

        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);

        sorted.dedup();
        assert_eq!(sorted.len(), names.len());
    }
}

use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250301_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

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
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        uuid(Products::Uid)
                            .unique_key()
                            .default(Expr::cust("gen_random_uuid()")),
                    )
                    .col(big_integer(Products::UserId))
                    .col(string_len(Products::Name, 60))
                    .col(big_integer(Products::Price))
                    .col(text(Products::ImageUrl))
                    .col(big_integer(Products::Stock))
                    .col(string_len(Products::Condition, 10))
                    .col(
                        ColumnDef::new(Products::Tags)
                            .array(ColumnType::Text)
                            .not_null(),
                    )
                    .col(boolean(Products::IsPurchasable))
                    .col(big_integer(Products::PurchaseCount).default(0))
                    .col(
                        timestamp_with_time_zone(Products::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_products_user_id")
                            .from(Products::Table, Products::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                ALTER TABLE products
                    ADD CONSTRAINT products_stock_non_negative CHECK (stock >= 0),
                    ADD CONSTRAINT products_price_non_negative CHECK (price >= 0),
                    ADD CONSTRAINT products_purchase_count_non_negative CHECK (purchase_count >= 0),
                    ADD CONSTRAINT products_condition_valid CHECK (condition IN ('new', 'second'))
                "#,
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_products_user_id")
                    .table(Products::Table)
                    .col(Products::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_products_created_at")
                    .table(Products::Table)
                    .col(Products::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared("CREATE INDEX IF NOT EXISTS idx_products_tags ON products USING GIN (tags)")
            .await?;

        Ok(())
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
    Uid,
    UserId,
    Name,
    Price,
    ImageUrl,
    Stock,
    Condition,
    Tags,
    IsPurchasable,
    PurchaseCount,
    CreatedAt,
}

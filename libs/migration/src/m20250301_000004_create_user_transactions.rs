use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250301_000001_create_users::Users;
use crate::m20250301_000002_create_bank_accounts::BankAccounts;
use crate::m20250301_000003_create_products::Products;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Purchase history outlives deleted products and bank accounts.
        manager
            .create_table(
                Table::create()
                    .table(UserTransactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserTransactions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(big_integer(UserTransactions::UserId))
                    .col(big_integer_null(UserTransactions::ProductId))
                    .col(big_integer_null(UserTransactions::BankAccountId))
                    .col(text(UserTransactions::ImageUrl))
                    .col(big_integer(UserTransactions::Quantity))
                    .col(
                        timestamp_with_time_zone(UserTransactions::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_transactions_user_id")
                            .from(UserTransactions::Table, UserTransactions::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_transactions_product_id")
                            .from(UserTransactions::Table, UserTransactions::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_transactions_bank_account_id")
                            .from(UserTransactions::Table, UserTransactions::BankAccountId)
                            .to(BankAccounts::Table, BankAccounts::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "ALTER TABLE user_transactions ADD CONSTRAINT user_transactions_quantity_positive CHECK (quantity >= 1)",
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_transactions_product_id")
                    .table(UserTransactions::Table)
                    .col(UserTransactions::ProductId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserTransactions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum UserTransactions {
    Table,
    Id,
    UserId,
    ProductId,
    BankAccountId,
    ImageUrl,
    Quantity,
    CreatedAt,
}

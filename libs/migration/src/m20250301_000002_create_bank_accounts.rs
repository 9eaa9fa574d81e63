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
                    .table(BankAccounts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BankAccounts::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        uuid(BankAccounts::Uid)
                            .unique_key()
                            .default(Expr::cust("gen_random_uuid()")),
                    )
                    .col(big_integer(BankAccounts::UserId))
                    .col(string_len(BankAccounts::BankName, 15))
                    .col(string_len(BankAccounts::BankAccountName, 15))
                    .col(string_len(BankAccounts::BankAccountNumber, 15))
                    .col(
                        timestamp_with_time_zone(BankAccounts::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bank_accounts_user_id")
                            .from(BankAccounts::Table, BankAccounts::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bank_accounts_user_id")
                    .table(BankAccounts::Table)
                    .col(BankAccounts::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BankAccounts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum BankAccounts {
    Table,
    Id,
    Uid,
    UserId,
    BankName,
    BankAccountName,
    BankAccountNumber,
    CreatedAt,
}

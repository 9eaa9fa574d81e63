use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, FromQueryResult, Statement};
use uuid::Uuid;

use crate::error::{BankAccountError, BankAccountResult};
use crate::models::{BankAccount, NewBankAccount};
use crate::repository::BankAccountRepository;

const COLUMNS: &str =
    "id, uid, user_id, bank_name, bank_account_name, bank_account_number, created_at";

/// PostgreSQL implementation of BankAccountRepository using SeaORM raw statements
#[derive(Clone)]
pub struct PostgresBankAccountRepository {
    db: DatabaseConnection,
}

impl PostgresBankAccountRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[derive(Debug, FromQueryResult)]
struct BankAccountRow {
    id: i64,
    uid: Uuid,
    user_id: i64,
    bank_name: String,
    bank_account_name: String,
    bank_account_number: String,
    created_at: DateTime<Utc>,
}

impl From<BankAccountRow> for BankAccount {
    fn from(row: BankAccountRow) -> Self {
        BankAccount {
            id: row.id,
            uid: row.uid,
            user_id: row.user_id,
            bank_name: row.bank_name,
            bank_account_name: row.bank_account_name,
            bank_account_number: row.bank_account_number,
            created_at: row.created_at,
        }
    }
}

fn db_error(e: sea_orm::DbErr) -> BankAccountError {
    BankAccountError::Internal(format!("Database error: {}", e))
}

#[async_trait]
impl BankAccountRepository for PostgresBankAccountRepository {
    async fn create(&self, account: NewBankAccount) -> BankAccountResult<BankAccount> {
        let sql = format!(
            "INSERT INTO bank_accounts (user_id, bank_name, bank_account_name, bank_account_number) \
             VALUES ($1, $2, $3, $4) RETURNING {COLUMNS}"
        );

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [
                account.user_id.into(),
                account.bank_name.into(),
                account.bank_account_name.into(),
                account.bank_account_number.into(),
            ],
        );

        let row = BankAccountRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(db_error)?
            .ok_or_else(|| BankAccountError::Internal("Failed to create bank account".into()))?;

        Ok(row.into())
    }

    async fn find_by_uid(&self, uid: Uuid) -> BankAccountResult<Option<BankAccount>> {
        let sql = format!("SELECT {COLUMNS} FROM bank_accounts WHERE uid = $1");
        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, [uid.into()]);

        let row = BankAccountRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(row.map(Into::into))
    }

    async fn list_by_user(&self, user_id: i64) -> BankAccountResult<Vec<BankAccount>> {
        let sql = format!("SELECT {COLUMNS} FROM bank_accounts WHERE user_id = $1 ORDER BY id");
        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, [user_id.into()]);

        let rows = BankAccountRow::find_by_statement(stmt)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update(&self, account: BankAccount) -> BankAccountResult<BankAccount> {
        let sql = format!(
            "UPDATE bank_accounts SET bank_name = $1, bank_account_name = $2, bank_account_number = $3 \
             WHERE uid = $4 RETURNING {COLUMNS}"
        );

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [
                account.bank_name.into(),
                account.bank_account_name.into(),
                account.bank_account_number.into(),
                account.uid.into(),
            ],
        );

        BankAccountRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(db_error)?
            .map(Into::into)
            .ok_or(BankAccountError::NotFound(account.uid))
    }

    async fn delete(&self, uid: Uuid) -> BankAccountResult<bool> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "DELETE FROM bank_accounts WHERE uid = $1",
            [uid.into()],
        );

        let result = self.db.execute_raw(stmt).await.map_err(db_error)?;
        Ok(result.rows_affected() > 0)
    }
}

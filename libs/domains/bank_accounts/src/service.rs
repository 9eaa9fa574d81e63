use axum_helpers::load_and_authorize;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::{BankAccountError, BankAccountResult};
use crate::models::{
    BankAccount, BankAccountResponse, CreateBankAccount, NewBankAccount, UpdateBankAccount,
};
use crate::repository::BankAccountRepository;

/// Service layer for bank account business logic
#[derive(Clone)]
pub struct BankAccountService<R: BankAccountRepository> {
    repository: Arc<R>,
}

impl<R: BankAccountRepository> BankAccountService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self, input))]
    pub async fn create(
        &self,
        user_id: i64,
        input: CreateBankAccount,
    ) -> BankAccountResult<BankAccountResponse> {
        let account = self
            .repository
            .create(NewBankAccount {
                user_id,
                bank_name: input.bank_name,
                bank_account_name: input.bank_account_name,
                bank_account_number: input.bank_account_number,
            })
            .await?;

        info!(bank_account_id = %account.uid, "bank account created");
        Ok(account.into())
    }

    pub async fn list(&self, user_id: i64) -> BankAccountResult<Vec<BankAccountResponse>> {
        let accounts = self.repository.list_by_user(user_id).await?;
        Ok(accounts.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self, input))]
    pub async fn update(
        &self,
        actor: i64,
        uid: Uuid,
        input: UpdateBankAccount,
    ) -> BankAccountResult<BankAccountResponse> {
        let mut account = self.owned(actor, uid).await?;
        account.apply_update(input);

        let updated = self.repository.update(account).await?;
        Ok(updated.into())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, actor: i64, uid: Uuid) -> BankAccountResult<()> {
        self.owned(actor, uid).await?;

        if !self.repository.delete(uid).await? {
            return Err(BankAccountError::NotFound(uid));
        }

        info!(bank_account_id = %uid, "bank account deleted");
        Ok(())
    }

    async fn owned(&self, actor: i64, uid: Uuid) -> BankAccountResult<BankAccount> {
        load_and_authorize(self.repository.find_by_uid(uid), actor, |a| a.user_id)
            .await?
            .into_result(
                || BankAccountError::NotFound(uid),
                || BankAccountError::Forbidden,
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryBankAccountRepository, MockBankAccountRepository};

    const OWNER: i64 = 1;
    const OTHER: i64 = 2;

    fn create_input() -> CreateBankAccount {
        CreateBankAccount {
            bank_name: "Bank Central".into(),
            bank_account_name: "Seller One".into(),
            bank_account_number: "1234567890".into(),
        }
    }

    async fn service_with_account() -> (BankAccountService<InMemoryBankAccountRepository>, Uuid) {
        let service = BankAccountService::new(InMemoryBankAccountRepository::new());
        let created = service.create(OWNER, create_input()).await.unwrap();
        (service, created.bank_account_id)
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_fields() {
        let (service, uid) = service_with_account().await;

        let updated = service
            .update(
                OWNER,
                uid,
                UpdateBankAccount {
                    bank_name: "Other Bank".into(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.bank_name, "Other Bank");
        assert_eq!(updated.bank_account_name, "Seller One");
        assert_eq!(updated.bank_account_number, "1234567890");
    }

    #[tokio::test]
    async fn test_update_by_other_user_is_forbidden() {
        let (service, uid) = service_with_account().await;

        let result = service
            .update(OTHER, uid, UpdateBankAccount::default())
            .await;
        assert!(matches!(result, Err(BankAccountError::Forbidden)));
    }

    #[tokio::test]
    async fn test_delete_outcomes_are_distinct() {
        let (service, uid) = service_with_account().await;

        let missing = service.delete(OWNER, Uuid::new_v4()).await;
        assert!(matches!(missing, Err(BankAccountError::NotFound(_))));

        let forbidden = service.delete(OTHER, uid).await;
        assert!(matches!(forbidden, Err(BankAccountError::Forbidden)));

        service.delete(OWNER, uid).await.unwrap();
        assert!(service.list(OWNER).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_only_returns_own_accounts() {
        let (service, _) = service_with_account().await;
        service.create(OTHER, create_input()).await.unwrap();

        assert_eq!(service.list(OWNER).await.unwrap().len(), 1);
        assert_eq!(service.list(OTHER).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_lookup_failure_is_not_treated_as_missing() {
        let mut repo = MockBankAccountRepository::new();
        repo.expect_find_by_uid()
            .returning(|_| Err(BankAccountError::Internal("timeout".into())));
        repo.expect_delete().never();

        let service = BankAccountService::new(repo);
        let result = service.delete(OWNER, Uuid::new_v4()).await;
        assert!(matches!(result, Err(BankAccountError::Internal(_))));
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// One row of `bank_accounts`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankAccount {
    pub id: i64,
    /// Public identifier used in URLs and payloads
    pub uid: Uuid,
    pub user_id: i64,
    pub bank_name: String,
    pub bank_account_name: String,
    pub bank_account_number: String,
    pub created_at: DateTime<Utc>,
}

impl BankAccount {
    /// Overwrite only the fields that are non-empty in `update`.
    pub fn apply_update(&mut self, update: UpdateBankAccount) {
        if !update.bank_name.is_empty() {
            self.bank_name = update.bank_name;
        }
        if !update.bank_account_name.is_empty() {
            self.bank_account_name = update.bank_account_name;
        }
        if !update.bank_account_number.is_empty() {
            self.bank_account_number = update.bank_account_number;
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewBankAccount {
    pub user_id: i64,
    pub bank_name: String,
    pub bank_account_name: String,
    pub bank_account_number: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBankAccount {
    #[validate(length(min = 5, max = 15))]
    #[schema(example = "Bank Central", min_length = 5, max_length = 15)]
    pub bank_name: String,
    #[validate(length(min = 5, max = 15))]
    #[schema(example = "Seller One", min_length = 5, max_length = 15)]
    pub bank_account_name: String,
    #[validate(length(min = 5, max = 15))]
    #[schema(example = "1234567890", min_length = 5, max_length = 15)]
    pub bank_account_number: String,
}

/// Partial update. Omitted or empty fields keep their stored value, so a
/// field cannot be cleared through this payload.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateBankAccount {
    #[validate(custom(function = "empty_or_5_to_15"))]
    pub bank_name: String,
    #[validate(custom(function = "empty_or_5_to_15"))]
    pub bank_account_name: String,
    #[validate(custom(function = "empty_or_5_to_15"))]
    pub bank_account_number: String,
}

fn empty_or_5_to_15(value: &str) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len == 0 || (5..=15).contains(&len) {
        Ok(())
    } else {
        Err(ValidationError::new("length").with_message("must be empty or 5-15 characters".into()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BankAccountResponse {
    pub bank_account_id: Uuid,
    pub bank_name: String,
    pub bank_account_name: String,
    pub bank_account_number: String,
}

impl From<BankAccount> for BankAccountResponse {
    fn from(account: BankAccount) -> Self {
        Self {
            bank_account_id: account.uid,
            bank_name: account.bank_name,
            bank_account_name: account.bank_account_name,
            bank_account_number: account.bank_account_number,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> BankAccount {
        BankAccount {
            id: 1,
            uid: Uuid::new_v4(),
            user_id: 7,
            bank_name: "Bank Central".into(),
            bank_account_name: "Seller One".into(),
            bank_account_number: "1234567890".into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_apply_update_only_bank_name() {
        let mut account = account();
        account.apply_update(UpdateBankAccount {
            bank_name: "Other Bank".into(),
            ..Default::default()
        });

        assert_eq!(account.bank_name, "Other Bank");
        assert_eq!(account.bank_account_name, "Seller One");
        assert_eq!(account.bank_account_number, "1234567890");
    }

    #[test]
    fn test_update_validation_allows_empty() {
        assert!(UpdateBankAccount::default().validate().is_ok());

        let short = UpdateBankAccount {
            bank_account_number: "123".into(),
            ..Default::default()
        };
        assert!(short.validate().is_err());

        let long = UpdateBankAccount {
            bank_name: "b".repeat(16),
            ..Default::default()
        };
        assert!(long.validate().is_err());
    }

    #[test]
    fn test_update_payload_fields_are_optional() {
        let update: UpdateBankAccount =
            serde_json::from_str(r#"{"bankName":"Other Bank"}"#).unwrap();
        assert_eq!(update.bank_name, "Other Bank");
        assert!(update.bank_account_name.is_empty());
    }

    #[test]
    fn test_response_shape() {
        let account = account();
        let uid = account.uid;
        let json = serde_json::to_value(BankAccountResponse::from(account)).unwrap();

        assert_eq!(json["bankAccountId"], uid.to_string());
        assert_eq!(json["bankName"], "Bank Central");
        assert_eq!(json["bankAccountNumber"], "1234567890");
    }
}

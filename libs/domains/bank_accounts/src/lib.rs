//! Bank Accounts Domain
//!
//! Sellers register the accounts buyers pay into. Every account has one
//! owner; only the owner may change or delete it.

pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{BankAccountError, BankAccountResult};
pub use handlers::ApiDoc;
pub use models::{
    BankAccount, BankAccountResponse, CreateBankAccount, NewBankAccount, UpdateBankAccount,
};
pub use postgres::PostgresBankAccountRepository;
pub use repository::{BankAccountRepository, InMemoryBankAccountRepository};
pub use service::BankAccountService;

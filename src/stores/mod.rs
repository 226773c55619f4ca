//! Storage collaborators for accounts and transactions.
//!
//! Handlers only see the [AccountStore] and [TransactionStore] traits. The process picks
//! one implementation at startup:
//! - [postgres]: sqlx queries against PostgreSQL
//! - [memory]: in-process maps, used by tests and for running without a database

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::models::{
    account::{Account, AccountDraft},
    transaction::{DailyTotal, Transaction, TransactionDraft},
};

pub mod memory;
pub mod postgres;

/// Failure reported by a storage collaborator.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Query or connection error from PostgreSQL.
    #[error("{0}")]
    Database(#[from] sqlx::Error),

    /// Any other backend failure, carrying the backend's own message.
    #[error("{0}")]
    Backend(String),
}

/// Persists accounts keyed by a store-assigned id.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Insert a validated account and return it with its new id.
    async fn create(&self, draft: AccountDraft) -> Result<Account, StoreError>;

    /// Overwrite the stored account that has the same id.
    async fn save(&self, account: &Account) -> Result<Account, StoreError>;

    async fn get(&self, id: i64) -> Result<Option<Account>, StoreError>;

    /// Accounts owned by `user_id` whose name contains `query` (case-sensitive), ordered by id.
    async fn find_by_user_and_name(
        &self,
        user_id: i64,
        query: &str,
    ) -> Result<Vec<Account>, StoreError>;

    async fn delete(&self, account: &Account) -> Result<(), StoreError>;
}

/// Persists transactions keyed by a store-assigned id.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Insert a validated transaction and return it with its new id.
    async fn create(&self, draft: TransactionDraft) -> Result<Transaction, StoreError>;

    /// Overwrite the stored transaction that has the same id.
    async fn save(&self, transaction: &Transaction) -> Result<Transaction, StoreError>;

    async fn get(&self, id: i64) -> Result<Option<Transaction>, StoreError>;

    /// Transactions owned by `user_id` whose reference contains `query` (case-sensitive),
    /// ordered by id.
    async fn find_by_user_and_reference(
        &self,
        user_id: i64,
        query: &str,
    ) -> Result<Vec<Transaction>, StoreError>;

    /// Transactions owned by `user_id` dated within `start..=end`, ordered by date then id.
    async fn find_by_user_and_date_between(
        &self,
        user_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Transaction>, StoreError>;

    /// Per-day sums of `amount` for `user_id` within `start..=end`, ascending by date.
    async fn daily_totals(
        &self,
        user_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyTotal>, StoreError>;

    async fn delete(&self, transaction: &Transaction) -> Result<(), StoreError>;
}

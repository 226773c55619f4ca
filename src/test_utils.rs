//! Helpers shared by handler tests.

use std::sync::Arc;

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::NaiveDate;

use crate::{
    models::{
        account::{Account, AccountDraft},
        transaction::{DailyTotal, Transaction, TransactionDraft},
    },
    routes,
    state::AppState,
    stores::{AccountStore, StoreError, TransactionStore},
};

pub const STORAGE_FAILURE: &str = "database is unavailable";

/// Serve the full router over fresh in-memory stores.
pub fn in_memory_server() -> TestServer {
    TestServer::try_new(routes::router(AppState::in_memory())).expect("Could not create test server.")
}

/// Serve the full router over stores that fail every call.
pub fn failing_server() -> TestServer {
    let state = AppState::new(Arc::new(FailingStore), Arc::new(FailingStore));
    TestServer::try_new(routes::router(state)).expect("Could not create test server.")
}

fn failure() -> StoreError {
    StoreError::Backend(STORAGE_FAILURE.to_string())
}

/// A store whose every call reports a backend failure.
pub struct FailingStore;

#[async_trait]
impl AccountStore for FailingStore {
    async fn create(&self, _: AccountDraft) -> Result<Account, StoreError> {
        Err(failure())
    }

    async fn save(&self, _: &Account) -> Result<Account, StoreError> {
        Err(failure())
    }

    async fn get(&self, _: i64) -> Result<Option<Account>, StoreError> {
        Err(failure())
    }

    async fn find_by_user_and_name(&self, _: i64, _: &str) -> Result<Vec<Account>, StoreError> {
        Err(failure())
    }

    async fn delete(&self, _: &Account) -> Result<(), StoreError> {
        Err(failure())
    }
}

#[async_trait]
impl TransactionStore for FailingStore {
    async fn create(&self, _: TransactionDraft) -> Result<Transaction, StoreError> {
        Err(failure())
    }

    async fn save(&self, _: &Transaction) -> Result<Transaction, StoreError> {
        Err(failure())
    }

    async fn get(&self, _: i64) -> Result<Option<Transaction>, StoreError> {
        Err(failure())
    }

    async fn find_by_user_and_reference(
        &self,
        _: i64,
        _: &str,
    ) -> Result<Vec<Transaction>, StoreError> {
        Err(failure())
    }

    async fn find_by_user_and_date_between(
        &self,
        _: i64,
        _: NaiveDate,
        _: NaiveDate,
    ) -> Result<Vec<Transaction>, StoreError> {
        Err(failure())
    }

    async fn daily_totals(
        &self,
        _: i64,
        _: NaiveDate,
        _: NaiveDate,
    ) -> Result<Vec<DailyTotal>, StoreError> {
        Err(failure())
    }

    async fn delete(&self, _: &Transaction) -> Result<(), StoreError> {
        Err(failure())
    }
}

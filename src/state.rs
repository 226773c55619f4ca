//! Shared state handed to every handler through axum's `State` extractor.

use std::sync::Arc;

use crate::{
    db::DbPool,
    stores::{
        AccountStore, TransactionStore,
        memory::{MemoryAccountStore, MemoryTransactionStore},
        postgres::{PgAccountStore, PgTransactionStore},
    },
};

/// Storage handles for both resources. Cloning only bumps reference counts.
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<dyn AccountStore>,
    pub transactions: Arc<dyn TransactionStore>,
}

impl AppState {
    pub fn new(accounts: Arc<dyn AccountStore>, transactions: Arc<dyn TransactionStore>) -> Self {
        Self {
            accounts,
            transactions,
        }
    }

    /// Both stores share one PostgreSQL pool.
    pub fn postgres(pool: DbPool) -> Self {
        Self::new(
            Arc::new(PgAccountStore::new(pool.clone())),
            Arc::new(PgTransactionStore::new(pool)),
        )
    }

    /// Fresh, empty in-process stores.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(MemoryAccountStore::new()),
            Arc::new(MemoryTransactionStore::new()),
        )
    }
}

//! In-process implementations of the store traits.
//!
//! Records live in a `BTreeMap` keyed by id, so iteration order is id order. Ids start at 1
//! and are never reused, even after a delete.

use std::{
    collections::BTreeMap,
    sync::{Mutex, MutexGuard},
};

use async_trait::async_trait;
use chrono::NaiveDate;

use super::{AccountStore, StoreError, TransactionStore};
use crate::models::{
    account::{Account, AccountDraft},
    transaction::{DailyTotal, Transaction, TransactionDraft, daily_totals},
};

#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<i64, T>,
    last_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T> Table<T> {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }
}

fn lock<T>(table: &Mutex<Table<T>>) -> Result<MutexGuard<'_, Table<T>>, StoreError> {
    table
        .lock()
        .map_err(|_| StoreError::Backend("in-memory store lock poisoned".to_string()))
}

fn row_not_found(kind: &str, id: i64) -> StoreError {
    StoreError::Backend(format!("no {kind} row with id {id} to update"))
}

#[derive(Debug, Default)]
pub struct MemoryAccountStore {
    table: Mutex<Table<Account>>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn create(&self, draft: AccountDraft) -> Result<Account, StoreError> {
        let mut table = lock(&self.table)?;
        let account = Account {
            id: table.next_id(),
            user_id: draft.user_id,
            name: draft.name,
            account_type: draft.account_type,
            balance: draft.balance,
            currency: draft.currency,
            iban: draft.iban,
            plaid_id: draft.plaid_id,
            created_on: draft.created_on,
            updated_on: None,
        };
        table.rows.insert(account.id, account.clone());

        Ok(account)
    }

    async fn save(&self, account: &Account) -> Result<Account, StoreError> {
        let mut table = lock(&self.table)?;
        let stored = table
            .rows
            .get_mut(&account.id)
            .ok_or_else(|| row_not_found("account", account.id))?;
        let created_on = stored.created_on;
        *stored = Account {
            created_on,
            ..account.clone()
        };

        Ok(stored.clone())
    }

    async fn get(&self, id: i64) -> Result<Option<Account>, StoreError> {
        Ok(lock(&self.table)?.rows.get(&id).cloned())
    }

    async fn find_by_user_and_name(
        &self,
        user_id: i64,
        query: &str,
    ) -> Result<Vec<Account>, StoreError> {
        let table = lock(&self.table)?;

        Ok(table
            .rows
            .values()
            .filter(|account| account.user_id == user_id && account.name.contains(query))
            .cloned()
            .collect())
    }

    async fn delete(&self, account: &Account) -> Result<(), StoreError> {
        lock(&self.table)?.rows.remove(&account.id);

        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryTransactionStore {
    table: Mutex<Table<Transaction>>,
}

impl MemoryTransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn in_range(
        table: &Table<Transaction>,
        user_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<Transaction> {
        let mut transactions: Vec<Transaction> = table
            .rows
            .values()
            .filter(|t| t.user_id == user_id && (start..=end).contains(&t.date))
            .cloned()
            .collect();
        // Stable sort keeps id order within a day
        transactions.sort_by_key(|t| t.date);
        transactions
    }
}

#[async_trait]
impl TransactionStore for MemoryTransactionStore {
    async fn create(&self, draft: TransactionDraft) -> Result<Transaction, StoreError> {
        let mut table = lock(&self.table)?;
        let transaction = Transaction {
            id: table.next_id(),
            user_id: draft.user_id,
            account_id: draft.account_id,
            reference: draft.reference,
            amount: draft.amount,
            date: draft.date,
            transaction_type: draft.transaction_type,
            created_on: draft.created_on,
            updated_on: None,
        };
        table.rows.insert(transaction.id, transaction.clone());

        Ok(transaction)
    }

    async fn save(&self, transaction: &Transaction) -> Result<Transaction, StoreError> {
        let mut table = lock(&self.table)?;
        let stored = table
            .rows
            .get_mut(&transaction.id)
            .ok_or_else(|| row_not_found("transaction", transaction.id))?;
        let created_on = stored.created_on;
        *stored = Transaction {
            created_on,
            ..transaction.clone()
        };

        Ok(stored.clone())
    }

    async fn get(&self, id: i64) -> Result<Option<Transaction>, StoreError> {
        Ok(lock(&self.table)?.rows.get(&id).cloned())
    }

    async fn find_by_user_and_reference(
        &self,
        user_id: i64,
        query: &str,
    ) -> Result<Vec<Transaction>, StoreError> {
        let table = lock(&self.table)?;

        Ok(table
            .rows
            .values()
            .filter(|t| t.user_id == user_id && t.reference.contains(query))
            .cloned()
            .collect())
    }

    async fn find_by_user_and_date_between(
        &self,
        user_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Transaction>, StoreError> {
        let table = lock(&self.table)?;

        Ok(Self::in_range(&table, user_id, start, end))
    }

    async fn daily_totals(
        &self,
        user_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyTotal>, StoreError> {
        let table = lock(&self.table)?;

        Ok(daily_totals(&Self::in_range(&table, user_id, start, end)))
    }

    async fn delete(&self, transaction: &Transaction) -> Result<(), StoreError> {
        lock(&self.table)?.rows.remove(&transaction.id);

        Ok(())
    }
}

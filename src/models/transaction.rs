//! Transaction data models and API request types.
//!
//! This module defines:
//! - `Transaction`: Database entity representing a transaction
//! - `NewTransaction` / `TransactionDraft`: Create request before and after validation
//! - `TransactionUpdate`: Request body for updating transactions
//! - `DailyTotal`: Sum of amounts booked on one day

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Represents a transaction record from the database.
///
/// # Database Table
///
/// Maps to the `transactions` table. Each transaction:
/// - Belongs to one user (via `user_id`)
/// - Refers to an account via `account_id`, which is not checked against `accounts`
/// - Carries a calendar `date` that is independent of `created_on`/`updated_on`
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Identifier assigned by the store on insert
    pub id: i64,

    pub user_id: i64,

    pub account_id: i64,

    /// Free-text description, searched by the filtered list endpoint
    pub reference: String,

    /// Signed amount in currency units
    pub amount: f64,

    /// Day the transaction was booked (`YYYY-MM-DD`)
    pub date: NaiveDate,

    /// Free-form kind of transaction, e.g. "debit"
    #[serde(rename = "type")]
    pub transaction_type: String,

    pub created_on: DateTime<Utc>,

    pub updated_on: Option<DateTime<Utc>>,
}

/// Request body for creating a new transaction.
///
/// # JSON Example
///
/// ```json
/// {
///   "userId": 1,
///   "accountId": 3,
///   "reference": "Groceries",
///   "amount": -54.2,
///   "date": "2025-03-14",
///   "type": "debit"
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub user_id: Option<i64>,
    pub account_id: Option<i64>,
    pub reference: Option<String>,
    pub amount: Option<f64>,
    pub date: Option<NaiveDate>,
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
}

/// A transaction that passed validation but has no id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub user_id: i64,
    pub account_id: i64,
    pub reference: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub transaction_type: String,
    pub created_on: DateTime<Utc>,
}

/// Request body for updating a transaction.
///
/// A body carrying every field replaces every business field of the stored transaction;
/// fields left out keep their stored value.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionUpdate {
    pub user_id: Option<i64>,
    pub account_id: Option<i64>,
    pub reference: Option<String>,
    pub amount: Option<f64>,
    pub date: Option<NaiveDate>,
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
}

/// Sum of transaction amounts for a single day.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize, Deserialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total: f64,
}

impl Transaction {
    /// Copy every field present in `update` onto this transaction and stamp `updated_on`.
    pub fn apply(&mut self, update: TransactionUpdate, now: DateTime<Utc>) {
        if let Some(user_id) = update.user_id {
            self.user_id = user_id;
        }
        if let Some(account_id) = update.account_id {
            self.account_id = account_id;
        }
        if let Some(reference) = update.reference {
            self.reference = reference;
        }
        if let Some(amount) = update.amount {
            self.amount = amount;
        }
        if let Some(date) = update.date {
            self.date = date;
        }
        if let Some(transaction_type) = update.transaction_type {
            self.transaction_type = transaction_type;
        }
        self.updated_on = Some(now);
    }
}

/// Fold transactions into per-day sums, ascending by date.
pub fn daily_totals<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Vec<DailyTotal> {
    let mut totals = std::collections::BTreeMap::<NaiveDate, f64>::new();
    for transaction in transactions {
        *totals.entry(transaction.date).or_default() += transaction.amount;
    }

    totals
        .into_iter()
        .map(|(date, total)| DailyTotal { date, total })
        .collect()
}

//! Account data models and API request types.
//!
//! This module defines:
//! - `Account`: Database entity representing an account
//! - `NewAccount`: Request body for creating accounts, every field optional until validated
//! - `AccountDraft`: A validated `NewAccount`, ready to be inserted
//! - `AccountUpdate`: Request body for updating accounts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Represents an account record from the database.
///
/// # Database Table
///
/// Maps to the `accounts` table. Each account belongs to one user (via `user_id`).
///
/// # Balance Storage
///
/// Balances are stored as `f64` in currency units (e.g. `100.5` dollars), matching the
/// representation of transaction amounts.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Identifier assigned by the store on insert
    pub id: i64,

    /// Owner of this account, used to scope list queries
    pub user_id: i64,

    /// Display name, searched by the filtered list endpoint
    pub name: String,

    /// Free-form kind of account, e.g. "checking" or "savings"
    #[serde(rename = "type")]
    pub account_type: String,

    pub balance: f64,

    /// Currency code (ISO 4217), e.g. "USD"
    pub currency: String,

    /// Bank account number, if known
    pub iban: Option<String>,

    /// Identifier of the linked external bank item, if any
    pub plaid_id: Option<String>,

    /// Set by the server when the account is created and never changed afterwards
    pub created_on: DateTime<Utc>,

    /// Set by the server on every update; `None` until the first update
    pub updated_on: Option<DateTime<Utc>>,
}

/// Request body for creating a new account.
///
/// Every field is optional so that missing fields reach the validator instead of failing
/// deserialization. Server-owned fields (`id`, `createdOn`, `updatedOn`) are not part of
/// this type and are ignored if a client sends them.
///
/// # JSON Example
///
/// ```json
/// {
///   "userId": 1,
///   "name": "Checking",
///   "type": "checking",
///   "balance": 100.0,
///   "currency": "USD"
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub user_id: Option<i64>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub account_type: Option<String>,
    pub balance: Option<f64>,
    pub currency: Option<String>,
    pub iban: Option<String>,
    pub plaid_id: Option<String>,
}

/// An account that passed validation but has no id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountDraft {
    pub user_id: i64,
    pub name: String,
    pub account_type: String,
    pub balance: f64,
    pub currency: String,
    pub iban: Option<String>,
    pub plaid_id: Option<String>,
    pub created_on: DateTime<Utc>,
}

/// Request body for updating an account.
///
/// Present fields overwrite the stored value, absent fields leave it untouched.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountUpdate {
    pub user_id: Option<i64>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub account_type: Option<String>,
    pub balance: Option<f64>,
    pub currency: Option<String>,
    pub iban: Option<String>,
    pub plaid_id: Option<String>,
}

impl Account {
    /// Copy every field present in `update` onto this account and stamp `updated_on`.
    pub fn apply(&mut self, update: AccountUpdate, now: DateTime<Utc>) {
        if let Some(user_id) = update.user_id {
            self.user_id = user_id;
        }
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(account_type) = update.account_type {
            self.account_type = account_type;
        }
        if let Some(balance) = update.balance {
            self.balance = balance;
        }
        if let Some(currency) = update.currency {
            self.currency = currency;
        }
        if update.iban.is_some() {
            self.iban = update.iban;
        }
        if update.plaid_id.is_some() {
            self.plaid_id = update.plaid_id;
        }
        self.updated_on = Some(now);
    }
}

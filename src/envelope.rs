//! The uniform response body returned by every endpoint.
//!
//! Success and failure share one JSON shape:
//!
//! ```json
//! {
//!   "timestamp": "2025-03-14T09:26:53Z",
//!   "status": 404,
//!   "ok": false,
//!   "message": "Account with id 7 not found."
//! }
//! ```
//!
//! `data` is only present when the envelope carries a [Payload].

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{
    account::Account,
    transaction::{DailyTotal, Transaction},
};

/// The shapes `data` can take.
///
/// Serialized untagged, so clients see the record, list or strings directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    Account(Account),
    Accounts(Vec<Account>),
    Transaction(Transaction),
    Transactions(Vec<Transaction>),
    DailyTotals(Vec<DailyTotal>),
    /// Violation list from a failed validation
    Errors(Vec<String>),
    /// Generic description of the operation that failed
    Detail(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    pub timestamp: DateTime<Utc>,
    pub status: u16,
    pub ok: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Payload>,
}

impl Envelope {
    /// Build an envelope stamped with the current time. `ok` is true only for 200.
    pub fn new(status: StatusCode, message: impl Into<String>, data: Option<Payload>) -> Self {
        Self {
            timestamp: Utc::now(),
            status: status.as_u16(),
            ok: status == StatusCode::OK,
            message: message.into(),
            data,
        }
    }

    /// A 200 envelope.
    pub fn ok(message: impl Into<String>, data: Option<Payload>) -> Self {
        Self::new(StatusCode::OK, message, data)
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

impl From<Account> for Payload {
    fn from(account: Account) -> Self {
        Payload::Account(account)
    }
}

impl From<Vec<Account>> for Payload {
    fn from(accounts: Vec<Account>) -> Self {
        Payload::Accounts(accounts)
    }
}

impl From<Transaction> for Payload {
    fn from(transaction: Transaction) -> Self {
        Payload::Transaction(transaction)
    }
}

impl From<Vec<Transaction>> for Payload {
    fn from(transactions: Vec<Transaction>) -> Self {
        Payload::Transactions(transactions)
    }
}

impl From<Vec<DailyTotal>> for Payload {
    fn from(totals: Vec<DailyTotal>) -> Self {
        Payload::DailyTotals(totals)
    }
}

//! Transaction HTTP handlers.
//!
//! This module implements transaction-related API endpoints:
//! - POST /accounts/transactions/create - Record a transaction
//! - GET /accounts/transactions/get?id={id} - Get transaction by ID
//! - GET /accounts/transactions/get?userId={id}&query={q} - Search by reference
//! - GET /accounts/transactions/get?userId={id}&start={date}&end={date} - List by date range
//! - GET /accounts/transactions/totals?userId={id}&start={date}&end={date} - Daily sums
//! - PUT /accounts/transactions/{id}/update - Overwrite transaction fields
//! - DELETE /accounts/transactions/{id}/delete - Delete transaction

use axum::extract::State;
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use crate::{
    envelope::Envelope,
    error::AppError,
    extract::{JsonBody, PathId, QueryParams},
    models::transaction::{NewTransaction, TransactionUpdate},
    state::AppState,
};

/// Query string accepted by `GET /accounts/transactions/get`.
///
/// Valid shapes: `id`; `userId` + `query`; `userId` + `start` + `end`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionLookup {
    pub id: Option<i64>,
    pub user_id: Option<i64>,
    pub query: Option<String>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// Query string accepted by `GET /accounts/transactions/totals`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub user_id: i64,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

fn not_found(id: i64) -> AppError {
    tracing::warn!(transaction_id = id, "Transaction not found");
    AppError::NotFound(format!("Transaction with id {id} not found."))
}

/// Record a transaction.
///
/// # Request Body
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
///
/// The account id is stored as given; it is not checked against existing accounts.
///
/// # Response
///
/// - **Success (200 OK)**: The created transaction
/// - **Error (400)**: Violation list naming every missing required field
/// - **Error (500)**: Storage error
pub async fn create_transaction(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<NewTransaction>,
) -> Result<Envelope, AppError> {
    let draft = request.into_draft(Utc::now()).map_err(|errors| {
        tracing::warn!(?errors, "Rejected invalid transaction");
        AppError::Validation(errors)
    })?;

    let transaction = state
        .transactions
        .create(draft)
        .await
        .map_err(AppError::storage("Failed to add Transaction to DB."))?;

    tracing::info!(
        transaction_id = transaction.id,
        account_id = transaction.account_id,
        "Transaction created"
    );
    Ok(Envelope::ok(
        "Success creating Transaction.",
        Some(transaction.into()),
    ))
}

/// Look up transactions by id, reference substring or date range.
///
/// # Response
///
/// - **Success (200 OK)**: The transaction, or the non-empty list of matches
/// - **Error (400)**: The query string fits none of the accepted shapes
/// - **Error (404)**: No transaction with that id, or no matches
/// - **Error (500)**: Storage error
pub async fn get_transactions(
    State(state): State<AppState>,
    QueryParams(lookup): QueryParams<TransactionLookup>,
) -> Result<Envelope, AppError> {
    match lookup {
        TransactionLookup {
            id: Some(id),
            user_id: None,
            query: None,
            start: None,
            end: None,
        } => get_transaction(&state, id).await,
        TransactionLookup {
            id: None,
            user_id: Some(user_id),
            query: Some(query),
            start: None,
            end: None,
        } => search_transactions(&state, user_id, &query).await,
        TransactionLookup {
            id: None,
            user_id: Some(user_id),
            query: None,
            start: Some(start),
            end: Some(end),
        } => list_transactions_between(&state, user_id, start, end).await,
        _ => Err(AppError::InvalidRequest(
            "Expected either `id`, `userId` and `query`, or `userId`, `start` and `end`."
                .to_string(),
        )),
    }
}

async fn get_transaction(state: &AppState, id: i64) -> Result<Envelope, AppError> {
    let transaction = state
        .transactions
        .get(id)
        .await
        .map_err(AppError::storage("Failed to get Transaction from DB."))?
        .ok_or_else(|| not_found(id))?;

    Ok(Envelope::ok(
        format!("Success getting Transaction with id {id}"),
        Some(transaction.into()),
    ))
}

async fn search_transactions(
    state: &AppState,
    user_id: i64,
    query: &str,
) -> Result<Envelope, AppError> {
    let transactions = state
        .transactions
        .find_by_user_and_reference(user_id, query)
        .await
        .map_err(AppError::storage("Failed to get Transactions from DB."))?;

    if transactions.is_empty() {
        tracing::warn!(user_id, query, "No transactions matched");
        return Err(AppError::NoMatches);
    }

    Ok(Envelope::ok(
        "Success getting Transactions.",
        Some(transactions.into()),
    ))
}

async fn list_transactions_between(
    state: &AppState,
    user_id: i64,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Envelope, AppError> {
    let transactions = state
        .transactions
        .find_by_user_and_date_between(user_id, start, end)
        .await
        .map_err(AppError::storage("Failed to get Transactions from DB."))?;

    if transactions.is_empty() {
        tracing::warn!(user_id, %start, %end, "No transactions in date range");
        return Err(AppError::NoMatches);
    }

    Ok(Envelope::ok(
        "Success getting Transactions.",
        Some(transactions.into()),
    ))
}

/// Sum a user's transaction amounts per day.
///
/// # Endpoint
///
/// `GET /accounts/transactions/totals?userId={id}&start={date}&end={date}`
///
/// Both dates are inclusive.
///
/// # Response (200 OK)
///
/// ```json
/// {
///   "status": 200,
///   "ok": true,
///   "message": "Success getting daily totals.",
///   "data": [
///     { "date": "2025-03-14", "total": -54.2 },
///     { "date": "2025-03-15", "total": 1200.0 }
///   ]
/// }
/// ```
pub async fn get_daily_totals(
    State(state): State<AppState>,
    QueryParams(range): QueryParams<DateRange>,
) -> Result<Envelope, AppError> {
    let totals = state
        .transactions
        .daily_totals(range.user_id, range.start, range.end)
        .await
        .map_err(AppError::storage("Failed to get daily totals from DB."))?;

    if totals.is_empty() {
        return Err(AppError::NoMatches);
    }

    Ok(Envelope::ok("Success getting daily totals.", Some(totals.into())))
}

/// Update a transaction.
///
/// # Endpoint
///
/// `PUT /accounts/transactions/{id}/update`
///
/// Every business field present in the body replaces the stored value; a complete body
/// replaces them all. `updatedOn` is refreshed.
///
/// # Response
///
/// - **Success (200 OK)**: The updated transaction
/// - **Error (400)**: Body is `null` or not valid JSON, or the id is not a number
/// - **Error (404)**: No transaction with that id
/// - **Error (500)**: Storage error
pub async fn update_transaction(
    State(state): State<AppState>,
    PathId(id): PathId<i64>,
    JsonBody(request): JsonBody<Option<TransactionUpdate>>,
) -> Result<Envelope, AppError> {
    let Some(update) = request else {
        tracing::warn!(transaction_id = id, "Rejected null transaction update");
        return Err(AppError::NullRequest);
    };

    let mut transaction = state
        .transactions
        .get(id)
        .await
        .map_err(AppError::storage("Failed to update Transaction in DB."))?
        .ok_or_else(|| not_found(id))?;

    transaction.apply(update, Utc::now());

    let updated = state
        .transactions
        .save(&transaction)
        .await
        .map_err(AppError::storage("Failed to update Transaction in DB."))?;

    tracing::info!(transaction_id = id, "Transaction updated");
    Ok(Envelope::ok(
        "Success updating Transaction.",
        Some(updated.into()),
    ))
}

/// Delete a transaction.
///
/// # Response
///
/// - **Success (200 OK)**: No data
/// - **Error (400)**: The id is missing or not a number
/// - **Error (404)**: No transaction with that id
/// - **Error (500)**: Storage error
pub async fn delete_transaction(
    State(state): State<AppState>,
    PathId(id): PathId<i64>,
) -> Result<Envelope, AppError> {
    let transaction = state
        .transactions
        .get(id)
        .await
        .map_err(AppError::storage("Failed to delete Transaction from DB."))?
        .ok_or_else(|| not_found(id))?;

    state
        .transactions
        .delete(&transaction)
        .await
        .map_err(AppError::storage("Failed to delete Transaction from DB."))?;

    tracing::info!(transaction_id = id, "Transaction deleted");
    Ok(Envelope::ok("Success deleting the Transaction.", None))
}

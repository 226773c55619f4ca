//! HTTP route table.
//!
//! Paths follow the front-end's existing contract: every resource lives under `/accounts/`
//! and the verb is spelled out in the last path segment.

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::{
    handlers::{accounts, health, transactions},
    state::AppState,
};

/// Build the router for both resources. Tracing and CORS layers are added by the caller.
pub fn router(state: AppState) -> Router {
    Router::new()
        // Public routes
        .route("/health", get(health::health_check))
        // Account routes
        .route("/accounts/create", post(accounts::create_account))
        .route("/accounts/get", get(accounts::get_accounts))
        .route("/accounts/{id}/update", put(accounts::update_account))
        .route("/accounts/{id}/delete", delete(accounts::delete_account))
        // Transaction routes
        .route(
            "/accounts/transactions/create",
            post(transactions::create_transaction),
        )
        .route(
            "/accounts/transactions/get",
            get(transactions::get_transactions),
        )
        .route(
            "/accounts/transactions/totals",
            get(transactions::get_daily_totals),
        )
        .route(
            "/accounts/transactions/{id}/update",
            put(transactions::update_transaction),
        )
        .route(
            "/accounts/transactions/{id}/delete",
            delete(transactions::delete_transaction),
        )
        .with_state(state)
}

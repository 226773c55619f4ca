//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON body, URL params, query string)
//! 2. Validates it and calls the storage collaborator at most once per read and write
//! 3. Returns an envelope carrying the status code, message and optional data

/// Account management endpoints
pub mod accounts;
/// Service health endpoint
pub mod health;
/// Transaction endpoints
pub mod transactions;

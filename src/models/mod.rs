//! Data models representing database entities and request bodies.

/// Account model and its create/update requests
pub mod account;
/// Transaction model, its create/update requests and daily totals
pub mod transaction;

//! Account management HTTP handlers.
//!
//! This module implements the account-related API endpoints:
//! - POST /accounts/create - Create new account
//! - GET /accounts/get?id={id} - Get account by ID
//! - GET /accounts/get?userId={id}&query={q} - List a user's accounts whose name contains `q`
//! - PUT /accounts/{id}/update - Update account fields
//! - DELETE /accounts/{id}/delete - Delete account
//!
//! Every endpoint answers with an [Envelope]. Store failures become 500 envelopes through
//! [AppError::storage]; nothing is retried.

use axum::extract::State;
use chrono::Utc;
use serde::Deserialize;

use crate::{
    envelope::Envelope,
    error::AppError,
    extract::{JsonBody, PathId, QueryParams},
    models::account::{AccountUpdate, NewAccount},
    state::AppState,
};

/// Query string accepted by `GET /accounts/get`.
///
/// Exactly one shape is valid: `id` alone, or `userId` together with `query`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountLookup {
    pub id: Option<i64>,
    pub user_id: Option<i64>,
    pub query: Option<String>,
}

fn not_found(id: i64) -> AppError {
    tracing::warn!(account_id = id, "Account not found");
    AppError::NotFound(format!("Account with id {id} not found."))
}

/// Create a new account.
///
/// # Endpoint
///
/// `POST /accounts/create`
///
/// # Request Body
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
///
/// # Response
///
/// - **Success (200 OK)**: The created account, with its id and `createdOn`
/// - **Error (400)**: Violation list naming every missing required field
/// - **Error (500)**: Storage error
pub async fn create_account(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<NewAccount>,
) -> Result<Envelope, AppError> {
    let draft = request.into_draft(Utc::now()).map_err(|errors| {
        tracing::warn!(?errors, "Rejected invalid account");
        AppError::Validation(errors)
    })?;

    let account = state
        .accounts
        .create(draft)
        .await
        .map_err(AppError::storage("Failed to add Account to DB."))?;

    tracing::info!(account_id = account.id, user_id = account.user_id, "Account created");
    Ok(Envelope::ok("Success creating Account.", Some(account.into())))
}

/// Look up accounts by id, or by owner and name substring.
///
/// # Endpoint
///
/// `GET /accounts/get?id={id}` or `GET /accounts/get?userId={id}&query={q}`
///
/// # Response
///
/// - **Success (200 OK)**: The account, or the non-empty list of matches
/// - **Error (400)**: Neither or both query shapes supplied
/// - **Error (404)**: No account with that id, or no matches
/// - **Error (500)**: Storage error
pub async fn get_accounts(
    State(state): State<AppState>,
    QueryParams(lookup): QueryParams<AccountLookup>,
) -> Result<Envelope, AppError> {
    match lookup {
        AccountLookup {
            id: Some(id),
            user_id: None,
            query: None,
        } => get_account(&state, id).await,
        AccountLookup {
            id: None,
            user_id: Some(user_id),
            query: Some(query),
        } => list_accounts(&state, user_id, &query).await,
        _ => Err(AppError::InvalidRequest(
            "Expected either `id`, or `userId` and `query`.".to_string(),
        )),
    }
}

async fn get_account(state: &AppState, id: i64) -> Result<Envelope, AppError> {
    let account = state
        .accounts
        .get(id)
        .await
        .map_err(AppError::storage("Failed to get Account from DB."))?
        .ok_or_else(|| not_found(id))?;

    Ok(Envelope::ok(
        format!("Success getting Account with id {id}"),
        Some(account.into()),
    ))
}

async fn list_accounts(state: &AppState, user_id: i64, query: &str) -> Result<Envelope, AppError> {
    let accounts = state
        .accounts
        .find_by_user_and_name(user_id, query)
        .await
        .map_err(AppError::storage("Failed to get Accounts from DB."))?;

    if accounts.is_empty() {
        tracing::warn!(user_id, query, "No accounts matched");
        return Err(AppError::NoMatches);
    }

    Ok(Envelope::ok("Success getting Accounts.", Some(accounts.into())))
}

/// Update an account.
///
/// # Endpoint
///
/// `PUT /accounts/{id}/update`
///
/// Fields present in the body overwrite the stored values; absent fields are kept.
/// `updatedOn` is always refreshed and `createdOn` never changes.
///
/// # Response
///
/// - **Success (200 OK)**: The updated account
/// - **Error (400)**: Body is `null` or not valid JSON, or the id is not a number
/// - **Error (404)**: No account with that id
/// - **Error (500)**: Storage error
pub async fn update_account(
    State(state): State<AppState>,
    PathId(id): PathId<i64>,
    JsonBody(request): JsonBody<Option<AccountUpdate>>,
) -> Result<Envelope, AppError> {
    let Some(update) = request else {
        tracing::warn!(account_id = id, "Rejected null account update");
        return Err(AppError::NullRequest);
    };

    let mut account = state
        .accounts
        .get(id)
        .await
        .map_err(AppError::storage("Failed to update Account in DB."))?
        .ok_or_else(|| not_found(id))?;

    account.apply(update, Utc::now());

    let updated = state
        .accounts
        .save(&account)
        .await
        .map_err(AppError::storage("Failed to update Account in DB."))?;

    tracing::info!(account_id = id, "Account updated");
    Ok(Envelope::ok("Success updating Account.", Some(updated.into())))
}

/// Delete an account.
///
/// # Endpoint
///
/// `DELETE /accounts/{id}/delete`
///
/// The account's transactions are left in place.
///
/// # Response
///
/// - **Success (200 OK)**: No data
/// - **Error (400)**: The id is missing or not a number
/// - **Error (404)**: No account with that id
/// - **Error (500)**: Storage error
pub async fn delete_account(
    State(state): State<AppState>,
    PathId(id): PathId<i64>,
) -> Result<Envelope, AppError> {
    let account = state
        .accounts
        .get(id)
        .await
        .map_err(AppError::storage("Failed to delete Account from DB."))?
        .ok_or_else(|| not_found(id))?;

    state
        .accounts
        .delete(&account)
        .await
        .map_err(AppError::storage("Failed to delete Account from DB."))?;

    tracing::info!(account_id = id, "Account deleted");
    Ok(Envelope::ok("Success deleting the Account.", None))
}

#[cfg(test)]
mod account_handler_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use chrono::{DateTime, Utc};
    use serde_json::{Value, json};

    use crate::test_utils::{STORAGE_FAILURE, failing_server, in_memory_server};

    fn checking_account() -> Value {
        json!({
            "userId": 1,
            "name": "Checking",
            "type": "checking",
            "balance": 100.0,
            "currency": "USD"
        })
    }

    async fn create(server: &TestServer, body: Value) -> Value {
        let response = server.post("/accounts/create").json(&body).await;
        assert_eq!(response.status_code(), StatusCode::OK);
        response.json::<Value>()["data"].clone()
    }

    fn timestamp(value: &Value) -> DateTime<Utc> {
        serde_json::from_value(value.clone()).unwrap()
    }

    #[tokio::test]
    async fn create_get_delete_round_trip() {
        let server = in_memory_server();
        let before = Utc::now();

        let response = server.post("/accounts/create").json(&checking_account()).await;
        let body = response.json::<Value>();

        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(body["status"], 200);
        assert_eq!(body["ok"], true);
        assert_eq!(body["message"], "Success creating Account.");
        let created = body["data"].clone();
        let id = created["id"].as_i64().expect("created account should have an id");
        assert_eq!(created["userId"], 1);
        assert_eq!(created["name"], "Checking");
        assert_eq!(created["type"], "checking");
        assert_eq!(created["balance"], 100.0);
        assert_eq!(created["currency"], "USD");
        assert!(created["updatedOn"].is_null());
        let created_on = timestamp(&created["createdOn"]);
        assert!(before <= created_on && created_on <= Utc::now());

        let response = server
            .get("/accounts/get")
            .add_query_param("id", id)
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
        let body = response.json::<Value>();
        assert_eq!(body["message"], format!("Success getting Account with id {id}"));
        assert_eq!(body["data"], created);

        let response = server.delete(&format!("/accounts/{id}/delete")).await;
        assert_eq!(response.status_code(), StatusCode::OK);
        let body = response.json::<Value>();
        assert_eq!(body["message"], "Success deleting the Account.");
        assert!(body.get("data").is_none());

        let response = server
            .get("/accounts/get")
            .add_query_param("id", id)
            .await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
        let body = response.json::<Value>();
        assert_eq!(body["ok"], false);
        assert_eq!(body["message"], format!("Account with id {id} not found."));
    }

    #[tokio::test]
    async fn create_ignores_client_supplied_server_fields() {
        let server = in_memory_server();
        let mut body = checking_account();
        body["id"] = json!(999);
        body["createdOn"] = json!("1999-01-01T00:00:00Z");

        let created = create(&server, body).await;

        assert_ne!(created["id"], 999);
        assert!(timestamp(&created["createdOn"]).timestamp() > 946_684_800);
    }

    #[tokio::test]
    async fn create_lists_every_missing_field_in_order() {
        let server = in_memory_server();

        let response = server
            .post("/accounts/create")
            .json(&json!({ "name": "Checking", "balance": 10.0 }))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let body = response.json::<Value>();
        assert_eq!(body["status"], 400);
        assert_eq!(body["ok"], false);
        assert_eq!(body["message"], "Bad Request");
        assert_eq!(
            body["data"],
            json!([
                "User ID cannot be NULL.",
                "Account Type cannot be NULL.",
                "Account Currency cannot be NULL."
            ])
        );
    }

    #[tokio::test]
    async fn create_rejects_malformed_json_with_envelope() {
        let server = in_memory_server();

        let response = server
            .post("/accounts/create")
            .json(&json!({ "userId": "not a number" }))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["ok"], false);
    }

    #[tokio::test]
    async fn filtered_list_matches_name_substring_for_owner() {
        let server = in_memory_server();
        create(&server, checking_account()).await;
        let mut savings = checking_account();
        savings["name"] = json!("Holiday Savings");
        create(&server, savings).await;
        let mut other_user = checking_account();
        other_user["userId"] = json!(2);
        create(&server, other_user).await;

        let response = server
            .get("/accounts/get")
            .add_query_param("userId", 1)
            .add_query_param("query", "Check")
            .await;

        assert_eq!(response.status_code(), StatusCode::OK);
        let body = response.json::<Value>();
        assert_eq!(body["message"], "Success getting Accounts.");
        let accounts = body["data"].as_array().unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0]["name"], "Checking");
        assert_eq!(accounts[0]["userId"], 1);
    }

    #[tokio::test]
    async fn filtered_list_without_matches_is_not_found() {
        let server = in_memory_server();
        create(&server, checking_account()).await;

        let response = server
            .get("/accounts/get")
            .add_query_param("userId", 1)
            .add_query_param("query", "Brokerage")
            .await;

        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
        let body = response.json::<Value>();
        assert_eq!(body["message"], "There seem to be no matches in the DB.");
        assert!(body.get("data").is_none());
    }

    #[tokio::test]
    async fn lookup_needs_a_complete_query_shape() {
        let server = in_memory_server();

        let response = server
            .get("/accounts/get")
            .add_query_param("userId", 1)
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn update_applies_present_fields_and_refreshes_updated_on() {
        let server = in_memory_server();
        let created = create(&server, checking_account()).await;
        let id = created["id"].as_i64().unwrap();

        let response = server
            .put(&format!("/accounts/{id}/update"))
            .json(&json!({ "name": "Everyday", "balance": 250.5 }))
            .await;

        assert_eq!(response.status_code(), StatusCode::OK);
        let body = response.json::<Value>();
        assert_eq!(body["message"], "Success updating Account.");
        let updated = &body["data"];
        assert_eq!(updated["id"], id);
        assert_eq!(updated["name"], "Everyday");
        assert_eq!(updated["balance"], 250.5);
        assert_eq!(updated["type"], "checking");
        assert_eq!(updated["currency"], "USD");
        assert_eq!(updated["createdOn"], created["createdOn"]);
        assert!(timestamp(&updated["updatedOn"]) >= timestamp(&created["createdOn"]));

        let stored = server
            .get("/accounts/get")
            .add_query_param("id", id)
            .await
            .json::<Value>();
        assert_eq!(&stored["data"], updated);
    }

    #[tokio::test]
    async fn update_with_empty_object_only_touches_updated_on() {
        let server = in_memory_server();
        let created = create(&server, checking_account()).await;
        let id = created["id"].as_i64().unwrap();

        let updated = server
            .put(&format!("/accounts/{id}/update"))
            .json(&json!({}))
            .await
            .json::<Value>()["data"]
            .clone();

        assert_eq!(updated["name"], created["name"]);
        assert_eq!(updated["balance"], created["balance"]);
        assert!(updated["updatedOn"].is_string());
    }

    #[tokio::test]
    async fn update_with_null_body_is_bad_request() {
        let server = in_memory_server();
        let created = create(&server, checking_account()).await;
        let id = created["id"].as_i64().unwrap();

        let response = server
            .put(&format!("/accounts/{id}/update"))
            .json(&Value::Null)
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["message"], "Request cannot be NULL.");
        let stored = server
            .get("/accounts/get")
            .add_query_param("id", id)
            .await
            .json::<Value>();
        assert!(stored["data"]["updatedOn"].is_null());
    }

    #[tokio::test]
    async fn update_of_missing_account_is_not_found() {
        let server = in_memory_server();

        let response = server
            .put("/accounts/42/update")
            .json(&json!({ "name": "Ghost" }))
            .await;

        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.json::<Value>()["message"],
            "Account with id 42 not found."
        );
    }

    #[tokio::test]
    async fn second_delete_is_not_found() {
        let server = in_memory_server();
        let id = create(&server, checking_account()).await["id"]
            .as_i64()
            .unwrap();

        let first = server.delete(&format!("/accounts/{id}/delete")).await;
        let second = server.delete(&format!("/accounts/{id}/delete")).await;

        assert_eq!(first.status_code(), StatusCode::OK);
        assert_eq!(second.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_with_non_numeric_id_is_bad_request() {
        let server = in_memory_server();

        let response = server.delete("/accounts/abc/delete").await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["status"], 400);
    }

    #[tokio::test]
    async fn storage_failures_are_internal_errors() {
        let server = failing_server();

        let create = server.post("/accounts/create").json(&checking_account()).await;
        let get = server.get("/accounts/get").add_query_param("id", 1).await;
        let list = server
            .get("/accounts/get")
            .add_query_param("userId", 1)
            .add_query_param("query", "a")
            .await;
        let update = server.put("/accounts/1/update").json(&json!({})).await;
        let delete = server.delete("/accounts/1/delete").await;

        for (response, action) in [
            (create, "Failed to add Account to DB."),
            (get, "Failed to get Account from DB."),
            (list, "Failed to get Accounts from DB."),
            (update, "Failed to update Account in DB."),
            (delete, "Failed to delete Account from DB."),
        ] {
            assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
            let body = response.json::<Value>();
            assert_eq!(body["status"], 500);
            assert_eq!(body["ok"], false);
            assert_eq!(body["message"], STORAGE_FAILURE);
            assert_eq!(body["data"], action);
        }
    }

    #[tokio::test]
    async fn invalid_create_does_not_reach_storage() {
        let server = failing_server();

        let response = server.post("/accounts/create").json(&json!({})).await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    }
}

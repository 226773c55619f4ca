//! Health check endpoint for service monitoring.

use crate::envelope::Envelope;

/// Health check handler.
///
/// Does not touch storage; it only reports that the HTTP layer is serving.
///
/// # Response (200 OK)
///
/// ```json
/// {
///   "timestamp": "2025-12-21T19:00:00Z",
///   "status": 200,
///   "ok": true,
///   "message": "Service is healthy."
/// }
/// ```
pub async fn health_check() -> Envelope {
    Envelope::ok("Service is healthy.", None)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::Value;

    use crate::test_utils::failing_server;

    #[tokio::test]
    async fn health_does_not_depend_on_storage() {
        let server = failing_server();

        let response = server.get("/health").await;

        assert_eq!(response.status_code(), StatusCode::OK);
        let body = response.json::<Value>();
        assert_eq!(body["ok"], true);
        assert_eq!(body["message"], "Service is healthy.");
    }
}

pub mod auth;
pub mod todos;

/// GET / - liveness probe, plain text by contract.
pub async fn root() -> &'static str {
    "Server is working"
}

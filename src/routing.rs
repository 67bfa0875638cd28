//! Application router configuration.

use axum::{Json, Router, routing::get};
use tower_http::cors::CorsLayer;

use crate::{
    AppState, endpoints,
    transaction::{
        create_transaction_endpoint, get_transaction_endpoint, list_transactions_endpoint,
        update_status_endpoint,
    },
};

/// Return a router with all the app's routes.
///
/// Requests from any origin are allowed.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_root))
        .route(
            endpoints::TRANSACTIONS_API,
            get(list_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(
            endpoints::TRANSACTIONS_API_SLASH,
            get(list_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(
            endpoints::TRANSACTION,
            get(get_transaction_endpoint).put(update_status_endpoint),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// The root path '/' lets clients check that the server is up.
async fn get_root() -> Json<&'static str> {
    Json("Server is connecting...")
}

#[cfg(test)]
mod root_route_tests {
    use axum::http::{
        HeaderValue,
        header::{ACCESS_CONTROL_ALLOW_ORIGIN, ORIGIN},
    };
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::json;

    use crate::{AppState, build_router, endpoints};

    #[tokio::test]
    async fn root_reports_server_is_up() {
        let state = AppState::new(Connection::open_in_memory().unwrap()).unwrap();
        let server = TestServer::new(build_router(state));

        let response = server.get(endpoints::ROOT).await;

        response.assert_status_ok();
        response.assert_json(&json!("Server is connecting..."));
    }

    #[tokio::test]
    async fn allows_any_origin() {
        let state = AppState::new(Connection::open_in_memory().unwrap()).unwrap();
        let server = TestServer::new(build_router(state));

        let response = server
            .get(endpoints::TRANSACTIONS_API)
            .add_header(ORIGIN, HeaderValue::from_static("http://example.com"))
            .await;

        response.assert_status_ok();
        assert_eq!(response.header(ACCESS_CONTROL_ALLOW_ORIGIN), "*");
    }
}

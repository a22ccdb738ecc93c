//! Application router configuration.

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

use crate::{
    AppState, endpoints,
    function::invoke_endpoint,
    logging::logging_middleware,
    not_found::get_404_not_found,
    note::{create_item_endpoint, delete_item_endpoint, get_items_endpoint},
    transaction::{add_transaction_endpoint, get_balance_endpoint, send_alert_endpoint},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let budget_routes = Router::new()
        .route(endpoints::TRANSACTIONS, post(add_transaction_endpoint))
        .route(endpoints::BALANCE, get(get_balance_endpoint))
        .route(endpoints::ALERTS, post(send_alert_endpoint));

    let knowledge_base_routes = Router::new()
        .route(
            endpoints::ITEMS,
            post(create_item_endpoint).get(get_items_endpoint),
        )
        .route(endpoints::ITEM, delete(delete_item_endpoint));

    budget_routes
        .merge(knowledge_base_routes)
        .route(endpoints::INVOKE, post(invoke_endpoint))
        .fallback(get_404_not_found)
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{Value, json};

    use crate::{
        build_router,
        endpoints::{self, format_endpoint},
        test_utils::{RecordingNotifier, get_test_state},
    };

    fn get_test_server(notifier: Arc<RecordingNotifier>) -> TestServer {
        let app = build_router(get_test_state(notifier));

        TestServer::try_new(app).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn add_transaction_then_get_balance() {
        let notifier = Arc::new(RecordingNotifier::default());
        let server = get_test_server(notifier.clone());

        let response = server
            .post(endpoints::TRANSACTIONS)
            .json(&json!({ "amount": "100", "type": "income", "category": "salary" }))
            .await;
        response.assert_status_ok();
        let added: Value = response.json();
        assert_eq!(added["balance"], "100");

        server
            .post(endpoints::TRANSACTIONS)
            .json(&json!({ "amount": "150.5", "description": "rent" }))
            .await
            .assert_status_ok();

        let response = server.get(endpoints::BALANCE).await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["balance"], "-50.5");
        assert_eq!(body["total_count"], 2);
        assert_eq!(notifier.published().len(), 1);
    }

    #[tokio::test]
    async fn responses_allow_any_origin() {
        let server = get_test_server(Arc::new(RecordingNotifier::default()));

        let response = server.get(endpoints::ITEMS).await;

        response.assert_status_ok();
        assert_eq!(response.header("access-control-allow-origin"), "*");
        assert_eq!(response.header("content-type"), "application/json");
    }

    #[tokio::test]
    async fn create_list_and_delete_items() {
        let server = get_test_server(Arc::new(RecordingNotifier::default()));

        let response = server
            .post(endpoints::ITEMS)
            .json(&json!({ "title": "Traits", "content": "Shared behaviour", "type": "snippet" }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let created: Value = response.json();
        let id = created["item"]["id"].as_str().unwrap().to_owned();

        let listed: Value = server.get(endpoints::ITEMS).await.json();
        assert_eq!(listed["count"], 1);
        assert_eq!(listed["items"][0]["type"], "snippet");

        let response = server.delete(&format_endpoint(endpoints::ITEM, &id)).await;
        response.assert_status_ok();
        let deleted: Value = response.json();
        assert_eq!(deleted["deleted_item"]["id"], id.as_str());

        server
            .delete(&format_endpoint(endpoints::ITEM, &id))
            .await
            .assert_status_not_found();

        let listed: Value = server.get(endpoints::ITEMS).await.json();
        assert_eq!(listed, json!({ "items": [], "count": 0 }));
    }

    #[tokio::test]
    async fn create_item_without_content_is_bad_request() {
        let server = get_test_server(Arc::new(RecordingNotifier::default()));

        let response = server
            .post(endpoints::ITEMS)
            .json(&json!({ "title": "Traits" }))
            .await;

        response.assert_status_bad_request();
        response.assert_json(&json!({ "error": "Missing required fields: title and content" }));
    }

    #[tokio::test]
    async fn send_alert_route() {
        let notifier = Arc::new(RecordingNotifier::default());
        let server = get_test_server(notifier.clone());

        let response = server
            .post(endpoints::ALERTS)
            .json(&json!({ "subject": "Heads up", "message": "Payday soon" }))
            .await;

        response.assert_status_ok();
        let published = notifier.published();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].subject, "Heads up");
    }

    #[tokio::test]
    async fn invoke_route_takes_raw_envelope() {
        let server = get_test_server(Arc::new(RecordingNotifier::default()));

        let response = server
            .post(&format_endpoint(endpoints::INVOKE, "create-item"))
            .json(&json!({ "body": "{\"title\": \"a\", \"content\": \"b\"}" }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let created: Value = response.json();
        assert_eq!(created["item"]["title"], "a");
    }

    #[tokio::test]
    async fn invoke_unknown_function_is_not_found() {
        let server = get_test_server(Arc::new(RecordingNotifier::default()));

        let response = server
            .post(&format_endpoint(endpoints::INVOKE, "launch-rockets"))
            .await;

        response.assert_status_not_found();
        let body: Value = response.json();
        assert_eq!(body["error"], "unknown function \"launch-rockets\"");
    }

    #[tokio::test]
    async fn unknown_path_is_json_not_found() {
        let server = get_test_server(Arc::new(RecordingNotifier::default()));

        let response = server.get("/api/nothing-here").await;

        response.assert_status_not_found();
        response.assert_json(&json!({ "error": "Not found" }));
    }
}

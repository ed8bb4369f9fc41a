//! HTTP client and widget tests against a local search endpoint

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use goalimpact_search::mock::RecordingNavigator;
use goalimpact_search::{
    EntityType, HttpSearchClient, Phase, SearchBackend, SearchError, SearchResponse, SearchResult,
    SearchWidget, WidgetOptions,
};
use tokio::net::TcpListener;

type Seen = Arc<Mutex<Vec<HashMap<String, String>>>>;

async fn search_handler(
    State(seen): State<Seen>,
    Query(params): Query<HashMap<String, String>>,
) -> axum::response::Response {
    seen.lock().unwrap().push(params.clone());
    let q = params.get("q").cloned().unwrap_or_default();

    match q.as_str() {
        "boom" => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        "garbled" => (StatusCode::OK, "<html>not json</html>").into_response(),
        _ => {
            let mut results = vec![
                SearchResult::new(7, format!("{q} player"), EntityType::Player),
                SearchResult::new(3, format!("{q} club"), EntityType::Club),
            ];
            if let Some(kind) = params.get("type") {
                results.retain(|r| r.kind.as_str() == kind);
            }
            Json(SearchResponse { results }).into_response()
        }
    }
}

async fn spawn_server() -> (SocketAddr, Seen) {
    let seen: Seen = Arc::default();
    let app = Router::new()
        .route("/api/search/", get(search_handler))
        .with_state(Arc::clone(&seen));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, seen)
}

fn client(addr: SocketAddr) -> HttpSearchClient {
    HttpSearchClient::new(&format!("http://{addr}/api"), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn search_decodes_results() {
    let (addr, seen) = spawn_server().await;

    let results = client(addr).search("salah", None).await.unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].name, "salah player");
    assert_eq!(results[1].route().path(), "/clubs/3");

    let seen = seen.lock().unwrap();
    assert_eq!(seen[0].get("q").map(String::as_str), Some("salah"));
    assert!(!seen[0].contains_key("type"));
}

#[tokio::test]
async fn scoped_search_sends_type() {
    let (addr, seen) = spawn_server().await;

    let results = client(addr).search("liverpool", Some(EntityType::Club)).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].kind, EntityType::Club);
    assert_eq!(
        seen.lock().unwrap()[0].get("type").map(String::as_str),
        Some("Club")
    );
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let (addr, _) = spawn_server().await;

    let err = client(addr).search("boom", None).await.unwrap_err();
    assert!(matches!(err, SearchError::Status { status: 500, .. }));
}

#[tokio::test]
async fn undecodable_body_is_an_error() {
    let (addr, _) = spawn_server().await;

    let err = client(addr).search("garbled", None).await.unwrap_err();
    assert!(matches!(err, SearchError::Decode { .. }));
}

#[tokio::test]
async fn connection_failure_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(addr).search("anyone", None).await.unwrap_err();
    assert!(matches!(err, SearchError::Transport { .. }));
}

#[tokio::test]
async fn widget_searches_through_http_client() {
    let (addr, seen) = spawn_server().await;
    let navigator = Arc::new(RecordingNavigator::new());
    let widget = SearchWidget::new(
        WidgetOptions::new("http").debounce(Duration::from_millis(20)),
        Arc::new(client(addr)),
        navigator.clone(),
    );

    widget.input("haa");
    widget.input("haaland");

    let mut rx = widget.subscribe();
    let state = tokio::time::timeout(
        Duration::from_secs(5),
        rx.wait_for(|s| s.phase == Phase::Results),
    )
    .await
    .expect("search did not complete")
    .expect("widget dropped")
    .clone();

    assert_eq!(state.results.len(), 2);
    assert_eq!(seen.lock().unwrap().len(), 1);

    widget.select(0);
    assert_eq!(navigator.paths(), vec!["/players/7"]);
}

#[tokio::test]
async fn widget_failure_leaves_dropdown_closed() {
    let (addr, _) = spawn_server().await;
    let navigator = Arc::new(RecordingNavigator::new());
    let widget = SearchWidget::new(
        WidgetOptions::new("http").debounce(Duration::from_millis(20)),
        Arc::new(client(addr)),
        navigator,
    );

    widget.input("boom");

    let mut rx = widget.subscribe();
    let state = tokio::time::timeout(
        Duration::from_secs(5),
        rx.wait_for(|s| s.phase == Phase::Idle),
    )
    .await
    .expect("search did not fail")
    .expect("widget dropped")
    .clone();

    assert_eq!(state.query, "boom");
    assert!(!state.is_open);
    assert!(state.results.is_empty());
}

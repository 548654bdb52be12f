//! Local stand-in for the two exchange APIs.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

/// Same logical book the two formats below encode.
pub fn flat_book() -> Value {
    json!({
        "bids": [[9000.5, 0.25], [8999, 1.5]],
        "asks": [[9010, 0.4], [9011.25, 2]]
    })
}

fn nested_book() -> Value {
    json!({
        "success": true,
        "message": "",
        "result": {
            "buy": [{"Quantity": 0.25, "Rate": 9000.5}, {"Quantity": 1.5, "Rate": 8999}],
            "sell": [{"Quantity": 0.4, "Rate": 9010}, {"Quantity": 2, "Rate": 9011.25}]
        }
    })
}

async fn flat(Path(pair): Path<String>) -> impl IntoResponse {
    if pair == "BTCUSD" {
        (StatusCode::OK, Json(flat_book()))
    } else {
        (StatusCode::NOT_FOUND, Json(json!({"error": "unknown pair"})))
    }
}

async fn nested(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    match params.get("market").map(String::as_str) {
        Some("USD-BTC") => Json(nested_book()),
        _ => Json(json!({"success": false, "message": "INVALID_MARKET", "result": null})),
    }
}

async fn unavailable() -> StatusCode {
    StatusCode::SERVICE_UNAVAILABLE
}

/// Answers well after any client timeout used in the tests.
pub const SLOW_RESPONSE: Duration = Duration::from_secs(5);

async fn slow() -> Json<Value> {
    tokio::time::sleep(SLOW_RESPONSE).await;
    Json(flat_book())
}

/// Serve both formats plus failing and slow routes on an ephemeral port.
pub async fn spawn() -> SocketAddr {
    let router = Router::new()
        .route("/API/Public/:pair/orderbook.json", get(flat))
        .route("/api/v1.1/public/getorderbook", get(nested))
        .route("/down/:pair", get(unavailable))
        .route("/slow/:pair", get(slow));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    addr
}

/// Address nothing listens on.
pub async fn dead_addr() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

/// Flat-format URL template for the stub.
pub fn flat_template(addr: SocketAddr) -> String {
    format!("http://{addr}/API/Public/{{base}}{{quote}}/orderbook.json")
}

/// Nested-format URL template for the stub.
pub fn nested_template(addr: SocketAddr) -> String {
    format!("http://{addr}/api/v1.1/public/getorderbook?market={{quote}}-{{base}}&type=both")
}

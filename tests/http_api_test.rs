//! Round-trip tests for the HTTP transport layer.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tempfile::NamedTempFile;
use tower::ServiceExt;

use parlor::server::router;
use parlor::{Arbiter, ArbiterRepository, EngineConfig};

const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

fn setup_app() -> (NamedTempFile, Router) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();

    let repo = ArbiterRepository::new(db_path).expect("Failed to create repository");
    repo.run_migrations().expect("Migrations failed");

    let arbiter = Arc::new(Arbiter::new(repo, EngineConfig::default()));
    (db_file, router(arbiter))
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body is JSON")
}

#[tokio::test]
async fn register_succeeds_then_conflicts() {
    let (_db, app) = setup_app();

    let response = app
        .clone()
        .oneshot(post_json("/register", json!({"username": "alice"})))
        .await
        .expect("request succeeds");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["ok"], json!(true));
    assert_eq!(body["username"], json!("alice"));

    let response = app
        .oneshot(post_json("/register", json!({"username": "alice"})))
        .await
        .expect("request succeeds");
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["error"], json!("conflict"));
}

#[tokio::test]
async fn grid_move_validates_board_shape() {
    let (_db, app) = setup_app();

    let response = app
        .oneshot(post_json("/tictactoe/ai_move", json!({"board": ["", "X", "O"]})))
        .await
        .expect("request succeeds");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], json!("validation"));
}

#[tokio::test]
async fn grid_move_reports_winner_or_index() {
    let (_db, app) = setup_app();

    let response = app
        .clone()
        .oneshot(post_json(
            "/tictactoe/ai_move",
            json!({"board": ["X", "X", "X", "", "", "", "", "", ""]}),
        ))
        .await
        .expect("request succeeds");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["winner"], json!("X"));

    let response = app
        .oneshot(post_json(
            "/tictactoe/ai_move",
            json!({"board": ["", "", "", "", "X", "", "", "", ""]}),
        ))
        .await
        .expect("request succeeds");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["ai_index"], json!(0));
}

#[tokio::test]
async fn chess_routes_validate_apply_and_reject() {
    let (_db, app) = setup_app();

    let response = app
        .clone()
        .oneshot(post_json(
            "/chess/validate_move",
            json!({"fen": START, "move": "e2e4"}),
        ))
        .await
        .expect("request succeeds");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["legal"], json!(true));

    let response = app
        .clone()
        .oneshot(post_json(
            "/chess/apply_move",
            json!({"fen": START, "move": "e2e4"}),
        ))
        .await
        .expect("request succeeds");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let next = body["fen"].as_str().expect("fen string");
    assert!(next.contains(" b "));

    let response = app
        .oneshot(post_json(
            "/chess/apply_move",
            json!({"fen": START, "move": "e2e5"}),
        ))
        .await
        .expect("request succeeds");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], json!("illegal_move"));
    assert!(body["reason"].as_str().expect("reason string").contains("e2e5"));
}

#[tokio::test]
async fn engine_move_without_engine_is_an_error() {
    let (_db, app) = setup_app();

    let response = app
        .oneshot(post_json("/chess/engine_move", json!({"fen": START})))
        .await
        .expect("request succeeds");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], json!("engine_unavailable"));
}

#[tokio::test]
async fn scores_aggregates_terminal_outcomes() {
    let (_db, app) = setup_app();

    let response = app
        .clone()
        .oneshot(post_json(
            "/tictactoe/ai_move",
            json!({"board": ["X", "X", "X", "", "", "", "", "", ""]}),
        ))
        .await
        .expect("request succeeds");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/scores")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("request succeeds");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["counts"]["tictactoe"]["loss"], json!(1));
}

use axum::body::Body;
use axum::http::{Request, StatusCode};
use borrow_ledger::api::handlers::AppState;
use borrow_ledger::api::router::create_router;
use borrow_ledger::api::types::*;
use chrono::{Duration, TimeZone, Utc};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

mod common;

use common::{TestContext, book};

// ============================================================================
// E2Eテスト用のヘルパー関数
// ============================================================================

/// インメモリのアダプターで実際のAPIルーターを組み立てる
fn setup_e2e_app(ctx: &TestContext) -> axum::Router {
    let app_state = Arc::new(AppState {
        service_deps: ctx.deps.clone(),
    });
    create_router(app_state)
}

async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> axum::response::Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.clone().oneshot(request).await.unwrap()
}

async fn read_json<T: DeserializeOwned>(response: axum::response::Response) -> T {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

// ============================================================================
// E2Eテスト: 正常系フロー
// ============================================================================

#[tokio::test]
async fn test_e2e_full_borrow_flow() {
    // Arrange
    let ctx = TestContext::new();
    ctx.availability.add_available_book(book("book-1"));
    let app = setup_e2e_app(&ctx);

    // Step 1: 貸出（POST /borrow）
    let response = send(
        &app,
        "POST",
        "/borrow",
        Some(json!({ "userId": "user-1", "bookId": "book-1" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let created: BorrowCreatedResponse = read_json(response).await;
    assert_eq!(created.message, "Book borrowed successfully");
    assert_eq!(ctx.store.records()[0].id.value(), created.borrow_id);

    // Step 2: 貸出中一覧（GET /borrowings/:user_id）
    let response = send(&app, "GET", "/borrowings/user-1", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let books: Vec<BorrowedBookResponse> = read_json(response).await;
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].book_id, "book-1");
    assert_eq!(
        books[0].borrow_date,
        Utc.with_ymd_and_hms(2025, 5, 1, 14, 0, 0).unwrap()
    );
    assert_eq!(
        books[0].due_date,
        Utc.with_ymd_and_hms(2025, 5, 15, 14, 0, 0).unwrap()
    );

    // Step 3: 返却（PUT /return）
    let response = send(
        &app,
        "PUT",
        "/return",
        Some(json!({ "userId": "user-1", "bookId": "book-1" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let returned: MessageResponse = read_json(response).await;
    assert_eq!(returned.message, "Book returned successfully");

    // 返却後は一覧が空になる
    let response = send(&app, "GET", "/borrowings/user-1", None).await;
    let books: Vec<BorrowedBookResponse> = read_json(response).await;
    assert!(books.is_empty());
}

#[tokio::test]
async fn test_e2e_overdue_listing() {
    let ctx = TestContext::new();
    ctx.availability.add_available_book(book("book-1"));
    ctx.availability.add_available_book(book("book-2"));
    let app = setup_e2e_app(&ctx);

    send(
        &app,
        "POST",
        "/borrow",
        Some(json!({ "userId": "user-1", "bookId": "book-1" })),
    )
    .await;
    ctx.clock.advance(Duration::days(2));
    send(
        &app,
        "POST",
        "/borrow",
        Some(json!({ "userId": "user-2", "bookId": "book-2" })),
    )
    .await;
    ctx.clock.advance(Duration::days(13));

    // /borrowings/overdue は利用者IDとして解釈されない
    let response = send(&app, "GET", "/borrowings/overdue", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let overdue: Vec<OverdueBorrowResponse> = read_json(response).await;
    assert_eq!(overdue.len(), 1);
    assert_eq!(overdue[0].user_id, "user-1");
    assert_eq!(overdue[0].book_id, "book-1");
    assert_eq!(
        overdue[0].due_date,
        Utc.with_ymd_and_hms(2025, 5, 15, 14, 0, 0).unwrap()
    );
    assert_eq!(ctx.bus.published_to(ctx.deps.event_publisher.overdue_topic()).len(), 1);
}

#[tokio::test]
async fn test_e2e_health_check() {
    let ctx = TestContext::new();
    let app = setup_e2e_app(&ctx);

    let response = send(&app, "GET", "/health", None).await;

    assert_eq!(response.status(), StatusCode::OK);
}

// ============================================================================
// E2Eテスト: エラーケース
// ============================================================================

#[tokio::test]
async fn test_e2e_borrow_unavailable_book() {
    let ctx = TestContext::new();
    ctx.availability.add_unavailable_book(book("book-1"));
    let app = setup_e2e_app(&ctx);

    let response = send(
        &app,
        "POST",
        "/borrow",
        Some(json!({ "userId": "user-1", "bookId": "book-1" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let error: ErrorResponse = read_json(response).await;
    assert_eq!(error.error, "BOOK_NOT_AVAILABLE");
    assert!(ctx.store.records().is_empty());
}

#[tokio::test]
async fn test_e2e_borrow_unknown_book() {
    let ctx = TestContext::new();
    let app = setup_e2e_app(&ctx);

    let response = send(
        &app,
        "POST",
        "/borrow",
        Some(json!({ "userId": "user-1", "bookId": "nope" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error: ErrorResponse = read_json(response).await;
    assert_eq!(error.error, "BOOK_NOT_FOUND");
}

#[tokio::test]
async fn test_e2e_borrow_upstream_failure() {
    let ctx = TestContext::new();
    ctx.availability.add_available_book(book("book-1"));
    ctx.availability.fail_checks(true);
    let app = setup_e2e_app(&ctx);

    let response = send(
        &app,
        "POST",
        "/borrow",
        Some(json!({ "userId": "user-1", "bookId": "book-1" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let error: ErrorResponse = read_json(response).await;
    assert_eq!(error.error, "UPSTREAM_UNAVAILABLE");
}

#[tokio::test]
async fn test_e2e_borrow_validation_error() {
    let ctx = TestContext::new();
    let app = setup_e2e_app(&ctx);

    let response = send(
        &app,
        "POST",
        "/borrow",
        Some(json!({ "userId": "   ", "bookId": "book-1" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = read_json(response).await;
    assert_eq!(error.error, "VALIDATION_ERROR");
    assert!(ctx.availability.calls().is_empty());
}

#[tokio::test]
async fn test_e2e_return_without_borrow() {
    let ctx = TestContext::new();
    ctx.availability.add_unavailable_book(book("book-1"));
    let app = setup_e2e_app(&ctx);

    let response = send(
        &app,
        "PUT",
        "/return",
        Some(json!({ "userId": "user-1", "bookId": "book-1" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error: ErrorResponse = read_json(response).await;
    assert_eq!(error.error, "BORROW_NOT_FOUND");
}

#[tokio::test]
async fn test_e2e_list_store_failure() {
    let ctx = TestContext::new();
    ctx.store.fail_operations(true);
    let app = setup_e2e_app(&ctx);

    let response = send(&app, "GET", "/borrowings/user-1", None).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let response = send(&app, "GET", "/borrowings/overdue", None).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let error: ErrorResponse = read_json(response).await;
    assert_eq!(error.error, "STORE_ERROR");
}

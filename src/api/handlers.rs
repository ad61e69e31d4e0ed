use crate::application::borrow::{
    ServiceDependencies, borrow_book as execute_borrow_book, list_borrowed as query_borrowed,
    list_overdue as query_overdue, return_book as execute_return_book,
};
use crate::domain::UserId;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::{
    error::ApiError,
    types::{
        BorrowCreatedResponse, BorrowRequest, BorrowedBookResponse, MessageResponse,
        OverdueBorrowResponse,
    },
};

// ============================================================================
// State
// ============================================================================

/// ハンドラー間で共有されるアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub service_deps: ServiceDependencies,
}

// ============================================================================
// Command handlers
// ============================================================================

/// POST /borrow - 書籍を借りる
///
/// 書籍サービスで貸出可能なことを確認し、貸出記録を作成する。
pub async fn borrow_book(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BorrowRequest>,
) -> Result<(StatusCode, Json<BorrowCreatedResponse>), ApiError> {
    let cmd = req.to_borrow_command()?;

    let borrow_id = execute_borrow_book(&state.service_deps, cmd).await?;

    let response = BorrowCreatedResponse {
        message: "Book borrowed successfully".to_string(),
        borrow_id: borrow_id.value(),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// PUT /return - 書籍を返却する
///
/// 貸出記録を削除し、書籍を貸出可能に戻す。
pub async fn return_book(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BorrowRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let cmd = req.to_return_command()?;

    execute_return_book(&state.service_deps, cmd).await?;

    Ok(Json(MessageResponse::new("Book returned successfully")))
}

// ============================================================================
// Query handlers (GET)
// ============================================================================

/// GET /borrowings/:user_id - 利用者の貸出中書籍を返却期限付きで取得
pub async fn list_borrowings(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<BorrowedBookResponse>>, ApiError> {
    let user_id = UserId::parse(&user_id)?;

    let books = query_borrowed(&state.service_deps, &user_id).await?;

    Ok(Json(
        books.into_iter().map(BorrowedBookResponse::from).collect(),
    ))
}

/// GET /borrowings/overdue - 延滞中の貸出を取得
///
/// 取得した各貸出について延滞イベントを発行する。
pub async fn list_overdue(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<OverdueBorrowResponse>>, ApiError> {
    let overdue = query_overdue(&state.service_deps).await?;

    Ok(Json(
        overdue.into_iter().map(OverdueBorrowResponse::from).collect(),
    ))
}

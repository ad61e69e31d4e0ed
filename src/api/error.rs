use crate::application::borrow::BorrowApplicationError;
use crate::domain::ValidationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API層のエラー型
///
/// アプリケーション層のエラーをラップし、HTTPレスポンスへのマッピングを提供する。
#[derive(Debug)]
pub struct ApiError(BorrowApplicationError);

impl From<BorrowApplicationError> for ApiError {
    fn from(err: BorrowApplicationError) -> Self {
        ApiError(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError(BorrowApplicationError::Validation(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self.0 {
            // 400 Bad Request - 入力値の不正
            BorrowApplicationError::Validation(ref e) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string())
            }

            // 404 Not Found - 貸出記録または書籍が存在しない
            BorrowApplicationError::BorrowNotFound => (
                StatusCode::NOT_FOUND,
                "BORROW_NOT_FOUND",
                "No borrow record for this user and book".to_string(),
            ),
            BorrowApplicationError::BookNotFound => (
                StatusCode::NOT_FOUND,
                "BOOK_NOT_FOUND",
                "Book not found".to_string(),
            ),

            // 409 Conflict - 書籍が貸出中
            BorrowApplicationError::BookNotAvailable => (
                StatusCode::CONFLICT,
                "BOOK_NOT_AVAILABLE",
                "Book is not available for borrowing".to_string(),
            ),

            // 5xx - システム障害
            // 内部エラーの詳細はログに記録し、クライアントには一般的なメッセージのみを返す
            BorrowApplicationError::UpstreamUnavailable(ref e) => {
                tracing::error!("Availability service error: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    "UPSTREAM_UNAVAILABLE",
                    "Availability service error".to_string(),
                )
            }
            BorrowApplicationError::StoreError(ref e) => {
                tracing::error!("Store error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORE_ERROR",
                    "Failed to access borrow records".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse::new(error_type, message));
        (status, body).into_response()
    }
}

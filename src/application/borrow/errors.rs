use crate::domain::ValidationError;
use crate::ports::AvailabilityError;
use thiserror::Error;

/// 貸出管理アプリケーション層のエラー
#[derive(Debug, Error)]
pub enum BorrowApplicationError {
    /// 入力値が不正
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// 利用者と書籍の組に一致する貸出記録がない
    #[error("Borrow record not found")]
    BorrowNotFound,

    /// 書籍サービスが書籍を知らない
    #[error("Book not found")]
    BookNotFound,

    /// 書籍が貸出不可
    #[error("Book is not available for borrowing")]
    BookNotAvailable,

    /// 書籍サービスに到達できない、またはエラーを返した
    #[error("Availability service error")]
    UpstreamUnavailable(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// 貸出記録ストアのエラー
    #[error("Store error")]
    StoreError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<AvailabilityError> for BorrowApplicationError {
    fn from(err: AvailabilityError) -> Self {
        match err {
            AvailabilityError::NotFound(_) => BorrowApplicationError::BookNotFound,
            other => BorrowApplicationError::UpstreamUnavailable(Box::new(other)),
        }
    }
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, BorrowApplicationError>;

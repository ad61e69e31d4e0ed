use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::borrow::{BorrowedBook, OverdueBorrow};
use crate::domain::{BookId, UserId, ValidationError, commands::*};

/// 貸出・返却リクエスト（POST /borrow, PUT /return）
///
/// IDは文字列のまま受け取り、`to_borrow_command`/`to_return_command`で検証する。
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowRequest {
    pub user_id: String,
    pub book_id: String,
}

impl BorrowRequest {
    fn parse_ids(&self) -> Result<(UserId, BookId), ValidationError> {
        Ok((UserId::parse(&self.user_id)?, BookId::parse(&self.book_id)?))
    }

    pub fn to_borrow_command(&self) -> Result<BorrowBook, ValidationError> {
        let (user_id, book_id) = self.parse_ids()?;
        Ok(BorrowBook { user_id, book_id })
    }

    pub fn to_return_command(&self) -> Result<ReturnBook, ValidationError> {
        let (user_id, book_id) = self.parse_ids()?;
        Ok(ReturnBook { user_id, book_id })
    }
}

/// 貸出成功レスポンス
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowCreatedResponse {
    pub message: String,
    pub borrow_id: Uuid,
}

/// メッセージのみのレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// 利用者の貸出中書籍（GET /borrowings/:user_id）
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowedBookResponse {
    pub book_id: String,
    pub borrow_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
}

impl From<BorrowedBook> for BorrowedBookResponse {
    fn from(book: BorrowedBook) -> Self {
        Self {
            book_id: book.book_id.into(),
            borrow_date: book.borrow_date,
            due_date: book.due_date,
        }
    }
}

/// 延滞中の貸出（GET /borrowings/overdue）
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverdueBorrowResponse {
    pub user_id: String,
    pub book_id: String,
    pub borrow_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
}

impl From<OverdueBorrow> for OverdueBorrowResponse {
    fn from(item: OverdueBorrow) -> Self {
        Self {
            user_id: item.user_id.into(),
            book_id: item.book_id.into(),
            borrow_date: item.borrow_date,
            due_date: item.due_date,
        }
    }
}

/// エラーレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}

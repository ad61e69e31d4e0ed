use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BookId, UserId};

/// イベント：書籍が返却された
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookReturned {
    pub user_id: UserId,
    pub book_id: BookId,
    pub returned_at: DateTime<Utc>,
}

/// イベント：貸出が延滞している
///
/// 延滞一覧の取得ごとに発行される。同じ貸出について重複して届きうる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowOverdue {
    pub user_id: UserId,
    pub book_id: BookId,
    pub borrow_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub detected_at: DateTime<Utc>,
}

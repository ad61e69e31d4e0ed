use crate::domain::{BookId, BorrowId, BorrowRecord, UserId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 貸出記録ストアポート
///
/// 貸出記録の永続化を抽象化する。
/// すべての操作は単一ステートメントで完結し、複数行にまたがるトランザクションは不要。
/// 利用者IDと書籍IDの整合性チェックは行わない（外部キーなし）。
#[async_trait]
pub trait BorrowStore: Send + Sync {
    /// 貸出記録を追加する
    async fn insert(&self, record: BorrowRecord) -> Result<BorrowId>;

    /// 利用者と書籍の組に一致する貸出記録を削除する
    ///
    /// 削除した件数を返す。一致する記録がなければ0。
    async fn delete_by_user_and_book(&self, user_id: &UserId, book_id: &BookId) -> Result<u64>;

    /// 利用者の貸出記録を貸出日の昇順で取得する
    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<BorrowRecord>>;

    /// `cutoff`より前に貸し出された記録を貸出日の昇順で取得する
    ///
    /// 延滞検出に使用される。`borrow_date == cutoff`の記録は含まない。
    async fn list_older_than(&self, cutoff: DateTime<Utc>) -> Result<Vec<BorrowRecord>>;
}

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::{BookId, BorrowId, UserId};

/// 貸出期間（日数）
pub const LOAN_PERIOD_DAYS: i64 = 14;

/// 貸出期間
pub fn loan_period() -> Duration {
    Duration::days(LOAN_PERIOD_DAYS)
}

/// 延滞判定の基準時刻
///
/// この時刻より前に貸し出された記録が延滞となる。
pub fn overdue_cutoff(now: DateTime<Utc>) -> DateTime<Utc> {
    now - loan_period()
}

/// 貸出記録 - 1冊の書籍の1回の貸出
///
/// 記録が存在する間だけ書籍は「貸出中」とみなされ、削除が返却を意味する。
/// 作成後に更新されることはない。
///
/// 返却期限は保存せず、読み取り時に`borrow_date + 14日`として導出する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowRecord {
    pub id: BorrowId,
    pub user_id: UserId,
    pub book_id: BookId,
    pub borrow_date: DateTime<Utc>,
}

impl BorrowRecord {
    /// 新しい貸出記録を作成する
    pub fn new(user_id: UserId, book_id: BookId, borrow_date: DateTime<Utc>) -> Self {
        Self {
            id: BorrowId::new(),
            user_id,
            book_id,
            borrow_date,
        }
    }

    /// 返却期限
    pub fn due_date(&self) -> DateTime<Utc> {
        self.borrow_date + loan_period()
    }

    /// 延滞しているか
    ///
    /// 貸出日が`now`からちょうど14日前の記録はまだ延滞ではない。
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.borrow_date < overdue_cutoff(now)
    }
}

use crate::domain::{self, BookId, BorrowId, BorrowRecord, UserId};
use chrono::{DateTime, Utc};

use super::borrow_service::ServiceDependencies;
use super::errors::{BorrowApplicationError, Result};

/// 延滞中の貸出
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverdueBorrow {
    pub borrow_id: BorrowId,
    pub user_id: UserId,
    pub book_id: BookId,
    pub borrow_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
}

impl From<BorrowRecord> for OverdueBorrow {
    fn from(record: BorrowRecord) -> Self {
        Self {
            borrow_id: record.id,
            due_date: record.due_date(),
            user_id: record.user_id,
            book_id: record.book_id,
            borrow_date: record.borrow_date,
        }
    }
}

/// 延滞中の貸出を一覧し、延滞イベントを発行する
///
/// 貸出日が現在時刻の14日より前（ちょうど14日は含まない）の記録を延滞とする。
///
/// 処理フロー：
/// 1. 時計から評価時刻を取得
/// 2. ストアから基準時刻より古い記録を取得
/// 3. 各記録について延滞イベントを発行（ベストエフォート）
///
/// # 冪等性
///
/// 重複排除は行わない。延滞が続く限り、呼び出すたびに同じ貸出のイベントが再発行される。
pub async fn list_overdue(deps: &ServiceDependencies) -> Result<Vec<OverdueBorrow>> {
    let now = deps.clock.now();
    let cutoff = domain::overdue_cutoff(now);

    let records = deps
        .borrow_store
        .list_older_than(cutoff)
        .await
        .map_err(BorrowApplicationError::StoreError)?;

    let mut overdue = Vec::with_capacity(records.len());
    for record in records {
        let item = OverdueBorrow::from(record);
        deps.event_publisher
            .publish_overdue(
                &item.user_id,
                &item.book_id,
                item.borrow_date,
                item.due_date,
                now,
            )
            .await;
        overdue.push(item);
    }

    tracing::debug!(count = overdue.len(), %cutoff, "Overdue borrows detected");

    Ok(overdue)
}

use crate::domain::{BookId, BorrowId, BorrowRecord, UserId, commands::*};
use crate::ports::{AvailabilityService, BorrowStore, Clock};
use chrono::{DateTime, Utc};
use std::sync::Arc;

use super::errors::{BorrowApplicationError, Result};
use super::event_publisher::EventPublisher;

/// サービスの依存関係
///
/// 関数型DDDの原則に従い、データ構造として定義。
/// 振る舞い（メソッド）は持たず、関数に依存関係を渡す。
///
/// 現在時刻も`clock`として注入するため、テストでは時刻を固定できる。
#[derive(Clone)]
pub struct ServiceDependencies {
    pub borrow_store: Arc<dyn BorrowStore>,
    pub availability_service: Arc<dyn AvailabilityService>,
    pub event_publisher: EventPublisher,
    pub clock: Arc<dyn Clock>,
}

/// 利用者の貸出中の書籍（返却期限付き）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorrowedBook {
    pub borrow_id: BorrowId,
    pub book_id: BookId,
    pub borrow_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
}

impl From<BorrowRecord> for BorrowedBook {
    fn from(record: BorrowRecord) -> Self {
        Self {
            borrow_id: record.id,
            due_date: record.due_date(),
            book_id: record.book_id,
            borrow_date: record.borrow_date,
        }
    }
}

/// 書籍を借りる
///
/// 処理順序：
/// 1. 書籍サービスで貸出可能か確認（失敗時はローカル状態を変更しない）
/// 2. 貸出記録を保存（貸出日 = 現在時刻）
/// 3. 書籍サービスの在庫状態を「貸出不可」に更新
///
/// # 一貫性保証
///
/// 手順3が失敗しても手順2の記録は**ロールバックしない**。
/// ローカルでは貸出中、書籍サービス上は貸出可能という不整合が残り、
/// エラーを呼び出し元に返したうえで警告ログを出す。リトライは行わない。
///
/// 同じ書籍への同時貸出は手順1で競合しうる（分散ロックなし）。
///
/// # 戻り値
/// 成功時は作成された貸出記録のID
pub async fn borrow_book(deps: &ServiceDependencies, cmd: BorrowBook) -> Result<BorrowId> {
    // 1. 書籍の貸出可能性確認
    let available = deps
        .availability_service
        .is_available(&cmd.book_id)
        .await?;

    if !available {
        return Err(BorrowApplicationError::BookNotAvailable);
    }

    // 2. 貸出記録を保存
    let record = BorrowRecord::new(cmd.user_id, cmd.book_id, deps.clock.now());
    let book_id = record.book_id.clone();

    let borrow_id = deps
        .borrow_store
        .insert(record)
        .await
        .map_err(BorrowApplicationError::StoreError)?;

    tracing::debug!(%borrow_id, %book_id, "Borrow record stored");

    // 3. 書籍サービスの在庫状態を更新
    if let Err(e) = deps
        .availability_service
        .set_available(&book_id, false)
        .await
    {
        tracing::warn!(
            %borrow_id,
            %book_id,
            error = %e,
            "Borrow record kept but book is still marked available upstream"
        );
        return Err(e.into());
    }

    Ok(borrow_id)
}

/// 書籍を返却する
///
/// 処理順序：貸出記録の削除 → 在庫状態の更新 → 返却イベントの発行
///
/// - 一致する記録がなければ`BorrowNotFound`を返し、外部呼び出しは行わない
/// - 在庫状態の更新に失敗した場合はエラーを返すが、削除した記録は戻さない
/// - イベント発行の失敗はログに記録するのみ
pub async fn return_book(deps: &ServiceDependencies, cmd: ReturnBook) -> Result<()> {
    // 1. 貸出記録を削除
    let deleted = deps
        .borrow_store
        .delete_by_user_and_book(&cmd.user_id, &cmd.book_id)
        .await
        .map_err(BorrowApplicationError::StoreError)?;

    if deleted == 0 {
        return Err(BorrowApplicationError::BorrowNotFound);
    }

    tracing::debug!(
        user_id = %cmd.user_id,
        book_id = %cmd.book_id,
        deleted,
        "Borrow record deleted"
    );

    // 2. 書籍サービスの在庫状態を更新
    if let Err(e) = deps
        .availability_service
        .set_available(&cmd.book_id, true)
        .await
    {
        tracing::warn!(
            user_id = %cmd.user_id,
            book_id = %cmd.book_id,
            error = %e,
            "Borrow record deleted but book is still marked unavailable upstream"
        );
        return Err(e.into());
    }

    // 3. 返却イベントを発行（ベストエフォート）
    deps.event_publisher
        .publish_returned(&cmd.user_id, &cmd.book_id, deps.clock.now())
        .await;

    Ok(())
}

/// 利用者の貸出中の書籍を一覧する
///
/// 副作用はない。返却期限は各記録の貸出日から計算する。
pub async fn list_borrowed(
    deps: &ServiceDependencies,
    user_id: &UserId,
) -> Result<Vec<BorrowedBook>> {
    let records = deps
        .borrow_store
        .list_by_user(user_id)
        .await
        .map_err(BorrowApplicationError::StoreError)?;

    Ok(records.into_iter().map(BorrowedBook::from).collect())
}

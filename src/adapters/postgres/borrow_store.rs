use crate::domain::{BookId, BorrowId, BorrowRecord, UserId};
use crate::ports::borrow_store::{BorrowStore as BorrowStoreTrait, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row, postgres::PgRow};

/// PostgreSQLの行データをBorrowRecordに変換する
///
/// 利用者IDと書籍IDは値オブジェクトとして再検証する。
/// 不正な値が保存されていた場合はInvalidDataエラーとする。
fn map_row_to_record(row: &PgRow) -> Result<BorrowRecord> {
    let user_id: &str = row.try_get("user_id")?;
    let book_id: &str = row.try_get("book_id")?;

    let invalid = |e: crate::domain::ValidationError| {
        Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
            as Box<dyn std::error::Error + Send + Sync>
    };

    Ok(BorrowRecord {
        id: BorrowId::from_uuid(row.try_get("id")?),
        user_id: UserId::parse(user_id).map_err(invalid)?,
        book_id: BookId::parse(book_id).map_err(invalid)?,
        borrow_date: row.try_get("borrow_date")?,
    })
}

/// BorrowStoreのPostgreSQL実装
///
/// `borrow_records`テーブルに1貸出1行で保存する。返却期限の列は持たない。
pub struct BorrowStore {
    pool: PgPool,
}

impl BorrowStore {
    /// PostgreSQLコネクションプールから新しいBorrowStoreを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BorrowStoreTrait for BorrowStore {
    async fn insert(&self, record: BorrowRecord) -> Result<BorrowId> {
        sqlx::query(
            r#"
            INSERT INTO borrow_records (id, user_id, book_id, borrow_date)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(record.id.value())
        .bind(record.user_id.as_str())
        .bind(record.book_id.as_str())
        .bind(record.borrow_date)
        .execute(&self.pool)
        .await?;

        Ok(record.id)
    }

    async fn delete_by_user_and_book(&self, user_id: &UserId, book_id: &BookId) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM borrow_records
            WHERE user_id = $1 AND book_id = $2
            "#,
        )
        .bind(user_id.as_str())
        .bind(book_id.as_str())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// 利用者の貸出記録を取得
    ///
    /// user_idのインデックスを使用する。
    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<BorrowRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, book_id, borrow_date
            FROM borrow_records
            WHERE user_id = $1
            ORDER BY borrow_date ASC
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_record).collect()
    }

    /// 基準時刻より前の貸出記録を取得（延滞検出用）
    ///
    /// borrow_dateのインデックスを使用する。
    async fn list_older_than(&self, cutoff: DateTime<Utc>) -> Result<Vec<BorrowRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, book_id, borrow_date
            FROM borrow_records
            WHERE borrow_date < $1
            ORDER BY borrow_date ASC
            "#,
        )
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_record).collect()
    }
}

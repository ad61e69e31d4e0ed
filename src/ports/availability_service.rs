use crate::domain::BookId;
use async_trait::async_trait;
use thiserror::Error;

/// 書籍サービス呼び出しのエラー
#[derive(Debug, Error)]
pub enum AvailabilityError {
    /// 書籍が存在しない
    #[error("book {0} not found")]
    NotFound(BookId),

    /// 書籍サービスが成功以外のステータスを返した
    #[error("availability service responded with status {status}")]
    Rejected { status: u16 },

    /// 書籍サービスに到達できない、または応答を解釈できない
    #[error("availability service unreachable")]
    Unreachable(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T> = std::result::Result<T, AvailabilityError>;

/// 書籍在庫サービスポート
///
/// 書籍の存在確認と在庫状態は外部サービスが管理する。
/// 貸出コンテキストはBookIDのみを知り、在庫の詳細は知らない。
///
/// 呼び出しは1回きりで、リトライは行わない。
#[async_trait]
pub trait AvailabilityService: Send + Sync {
    /// 書籍が貸出可能か確認する
    async fn is_available(&self, book_id: &BookId) -> Result<bool>;

    /// 書籍の貸出可能状態を更新する
    async fn set_available(&self, book_id: &BookId, available: bool) -> Result<()>;
}

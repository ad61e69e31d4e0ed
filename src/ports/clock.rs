use chrono::{DateTime, Utc};

/// 現在時刻の取得元
///
/// 貸出日時と延滞判定の基準時刻はすべてここから取得する。
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

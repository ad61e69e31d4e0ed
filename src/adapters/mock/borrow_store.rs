use crate::domain::{BookId, BorrowId, BorrowRecord, UserId};
use crate::ports::borrow_store::{BorrowStore as BorrowStoreTrait, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// BorrowStoreのインメモリ実装
///
/// PostgreSQL実装と同じく貸出日の昇順で返す。
pub struct BorrowStore {
    records: Mutex<Vec<BorrowRecord>>,
    fail: AtomicBool,
}

impl BorrowStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            fail: AtomicBool::new(false),
        }
    }

    /// 保存されている全記録のスナップショット
    pub fn records(&self) -> Vec<BorrowRecord> {
        self.records.lock().unwrap().clone()
    }

    /// データベース障害を模して全操作を失敗させる
    pub fn fail_operations(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    fn check(&self) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(Box::new(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "mock store is down",
            )));
        }
        Ok(())
    }

    fn sorted(mut records: Vec<BorrowRecord>) -> Vec<BorrowRecord> {
        records.sort_by_key(|r| r.borrow_date);
        records
    }
}

impl Default for BorrowStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BorrowStoreTrait for BorrowStore {
    async fn insert(&self, record: BorrowRecord) -> Result<BorrowId> {
        self.check()?;
        let id = record.id;
        self.records.lock().unwrap().push(record);
        Ok(id)
    }

    async fn delete_by_user_and_book(&self, user_id: &UserId, book_id: &BookId) -> Result<u64> {
        self.check()?;
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| !(r.user_id == *user_id && r.book_id == *book_id));
        Ok((before - records.len()) as u64)
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<BorrowRecord>> {
        self.check()?;
        let records = self.records.lock().unwrap();
        Ok(Self::sorted(
            records
                .iter()
                .filter(|r| r.user_id == *user_id)
                .cloned()
                .collect(),
        ))
    }

    async fn list_older_than(&self, cutoff: DateTime<Utc>) -> Result<Vec<BorrowRecord>> {
        self.check()?;
        let records = self.records.lock().unwrap();
        Ok(Self::sorted(
            records
                .iter()
                .filter(|r| r.borrow_date < cutoff)
                .cloned()
                .collect(),
        ))
    }
}

use crate::domain::BookId;
use crate::ports::availability_service::{
    AvailabilityError, AvailabilityService as AvailabilityServiceTrait, Result,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// モックが受けた呼び出し（受信順に記録）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvailabilityCall {
    IsAvailable(BookId),
    SetAvailable(BookId, bool),
}

/// AvailabilityServiceのモック実装
///
/// 登録された書籍の貸出可能フラグをメモリ上に保持する。
/// 未登録の書籍には、書籍サービスの404と同じく`NotFound`を返す。
/// どちらの操作も、サービスに到達できない状態として失敗させられる。
pub struct AvailabilityService {
    books: Mutex<HashMap<BookId, bool>>,
    calls: Mutex<Vec<AvailabilityCall>>,
    fail_checks: AtomicBool,
    fail_updates: AtomicBool,
}

impl AvailabilityService {
    pub fn new() -> Self {
        Self {
            books: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            fail_checks: AtomicBool::new(false),
            fail_updates: AtomicBool::new(false),
        }
    }

    /// テスト用に貸出可能な書籍を登録
    pub fn add_available_book(&self, book_id: BookId) {
        self.books.lock().unwrap().insert(book_id, true);
    }

    /// テスト用に貸出中の書籍を登録
    pub fn add_unavailable_book(&self, book_id: BookId) {
        self.books.lock().unwrap().insert(book_id, false);
    }

    /// 書籍の現在のフラグ（未登録なら`None`）
    pub fn availability_of(&self, book_id: &BookId) -> Option<bool> {
        self.books.lock().unwrap().get(book_id).copied()
    }

    /// `is_available`を失敗させる
    pub fn fail_checks(&self, fail: bool) {
        self.fail_checks.store(fail, Ordering::SeqCst);
    }

    /// `set_available`を失敗させる
    pub fn fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }

    /// これまでに受けた呼び出し
    pub fn calls(&self) -> Vec<AvailabilityCall> {
        self.calls.lock().unwrap().clone()
    }

    fn unreachable() -> AvailabilityError {
        AvailabilityError::Unreachable(Box::new(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "mock availability service is down",
        )))
    }
}

impl Default for AvailabilityService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AvailabilityServiceTrait for AvailabilityService {
    async fn is_available(&self, book_id: &BookId) -> Result<bool> {
        self.calls
            .lock()
            .unwrap()
            .push(AvailabilityCall::IsAvailable(book_id.clone()));

        if self.fail_checks.load(Ordering::SeqCst) {
            return Err(Self::unreachable());
        }

        self.books
            .lock()
            .unwrap()
            .get(book_id)
            .copied()
            .ok_or_else(|| AvailabilityError::NotFound(book_id.clone()))
    }

    async fn set_available(&self, book_id: &BookId, available: bool) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(AvailabilityCall::SetAvailable(book_id.clone(), available));

        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(Self::unreachable());
        }

        let mut books = self.books.lock().unwrap();
        match books.get_mut(book_id) {
            Some(flag) => {
                *flag = available;
                Ok(())
            }
            None => Err(AvailabilityError::NotFound(book_id.clone())),
        }
    }
}

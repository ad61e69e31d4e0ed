pub mod borrow_store;

// パブリックに型を再エクスポート
pub use borrow_store::BorrowStore as PostgresBorrowStore;

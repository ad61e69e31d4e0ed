mod borrow_service;
mod errors;
mod event_publisher;
mod overdue_detection;

pub use borrow_service::{
    BorrowedBook, ServiceDependencies, borrow_book, list_borrowed, return_book,
};
pub use errors::{BorrowApplicationError, Result};
pub use event_publisher::EventPublisher;
pub use overdue_detection::{OverdueBorrow, list_overdue};

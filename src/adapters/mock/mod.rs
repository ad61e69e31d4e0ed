pub mod availability_service;
pub mod borrow_store;
pub mod event_bus;

pub use availability_service::{AvailabilityCall, AvailabilityService};
pub use borrow_store::BorrowStore;
pub use event_bus::{EventBus, PublishedMessage};

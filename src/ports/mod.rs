pub mod availability_service;
pub mod borrow_store;
pub mod clock;
pub mod event_bus;

pub use availability_service::{AvailabilityError, AvailabilityService};
pub use borrow_store::BorrowStore;
pub use clock::Clock;
pub use event_bus::{EventBus, PublishError};

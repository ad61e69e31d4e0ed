pub mod availability_client;

pub use availability_client::AvailabilityClient;

pub mod clock;
pub mod http;
pub mod mock;
pub mod noop;
pub mod postgres;
pub mod redis;

pub mod borrow;
pub mod commands;
pub mod errors;
pub mod events;
pub mod value_objects;

pub use borrow::*;
pub use errors::*;
pub use events::*;
pub use value_objects::*;

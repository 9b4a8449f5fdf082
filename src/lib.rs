pub mod description;
pub mod error;
pub mod export;
pub mod input;
pub mod math;
pub mod operations;
pub mod pipeline;
pub mod section;
pub mod store;
pub mod tessellation;

pub use error::{PoloidalError, Result};

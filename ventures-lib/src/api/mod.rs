//! Data API operations

mod crud;
pub mod query;
mod storage;

pub use storage::*;

//! Ventures data library
//!
//! An async client for a managed relational data API (PostgREST dialect), plus
//! the client-side pieces every dashboard page shares: derived-metric
//! aggregation, formatting, view models, commands and notifications.

pub mod aggregate;
pub mod api;
pub mod command;
pub mod error;
pub mod format;
pub mod memory;
pub mod model;
pub mod notify;
pub mod resource;
pub mod source;

mod client;

pub use client::*;
pub use error::Error;
pub use source::DataSource;

pub mod csv;
pub mod error;
pub mod ranking;
pub mod service;

pub use csv::{ParsedRow, parse};
pub use error::{ImporterError, Result};
pub use service::{ImportResult, ImportService};

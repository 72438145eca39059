pub mod auth;
pub mod client;
pub mod error;

pub use auth::ServiceAccountKey;
pub use client::{SheetsClient, SpreadsheetMeta};
pub use error::SheetsError;

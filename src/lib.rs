//! Reading-log scraper.
//!
//! Walks the paginated reading log of every user in the input table and writes
//! the scraped titles and authors to one flat file per field per user.
//! Users that already have output are skipped, so an interrupted run can simply be restarted.

#[cfg(feature = "browser")]
pub mod browser;
pub mod config;
pub mod corpus;
mod error;
#[doc(hidden)]
pub mod macros;
pub mod model;
pub mod parse;
pub mod process;
pub mod request;
pub mod store;

pub use error::{Error, Result};

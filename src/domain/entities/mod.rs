//! Core domain entities.
//!
//! Entities are plain data structures. Each persisted entity has a `New*`
//! counterpart carrying the fields supplied on creation; the store assigns ids.
//!
//! - [`UrlEntry`] - A long URL, its short token and its owner
//! - [`AccessStatistic`] - One redirect through a short token

pub mod access_statistic;
pub mod url_entry;

pub use access_statistic::{AccessStatistic, NewAccessStatistic};
pub use url_entry::{NewUrlEntry, UrlEntry};

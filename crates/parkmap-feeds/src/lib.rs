//! Upstream data collaborators for the parking map.
//!
//! [`FeedSource`] is the boundary the session controller consumes. Two
//! implementations ship here: [`OpenDataClient`] for the live Socrata
//! endpoints and [`LocalFeeds`] for JSON exports on disk.

pub mod client;
pub mod error;
pub mod local;
mod parse;
pub mod source;

pub use client::OpenDataClient;
pub use error::FeedError;
pub use local::LocalFeeds;
pub use source::FeedSource;

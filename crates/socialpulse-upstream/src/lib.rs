//! Clients for the third-party statistics APIs behind the socialpulse proxy.
//!
//! Each upstream gets a thin `reqwest` client that returns the raw JSON
//! payload, plus pure extractor functions that map a payload onto one of the
//! normalized records in [`socialpulse_core::stats`]. Extractors are tried in
//! a fixed priority order and the first match wins.

pub mod error;
mod http;
pub mod instagram;
mod json;
pub mod twitter;
pub mod virality;
pub mod youtube;

pub use error::UpstreamError;
pub use instagram::InstagramClient;
pub use twitter::{TwitterClient, TwitterTarget};
pub use virality::ViralityClient;
pub use youtube::YouTubeClient;

//! PDDikti registry scraper.
//!
//! Locates Universitas Ekasakti on the national higher-education registry,
//! extracts its study-program listing and exports it as CSV, with a curated
//! fallback dataset for when the live site gives nothing usable.

pub mod config;
pub mod error;
pub mod export;
pub mod extractor;
pub mod fallback;
pub mod locator;
pub mod logger;
pub mod pipeline;
pub mod session;
pub mod types;

pub use types::*;

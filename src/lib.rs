//! rs-crawler - Browser-driven RS Components product search CLI
//!
//! Drives a real Chrome through a WebDriver server to select a regional
//! storefront, search it, and scrape structured product records from the
//! rendered pages.

pub mod commands;
pub mod config;
pub mod format;
pub mod storefront;

pub use config::Config;
pub use storefront::models::{ProductDetails, ProductSummary};
pub use storefront::regions::RegionTable;
pub use storefront::session::{StorefrontOps, StorefrontSession};

//! Storefront-specific modules: region table, browser session, selectors,
//! extraction, and data models.

pub mod models;
pub mod parser;
pub mod regions;
pub mod selectors;
pub mod session;

pub use models::{ProductDetails, ProductSummary};
pub use parser::Parser;
pub use regions::{RegionError, RegionTable};
pub use session::{SessionError, StorefrontOps, StorefrontSession};

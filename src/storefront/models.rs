//! Data models for scraped product records.

use serde::{Deserialize, Serialize};

/// One product tile from a search results listing.
///
/// All five fields are required: a tile that is missing any of them is not
/// represented at all. Prices stay exactly as displayed on the page,
/// currency symbol and locale formatting included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSummary {
    /// Product title as shown on the tile
    pub title: String,
    /// Distributor stock number
    pub stock_no: String,
    /// Manufacturer part number
    pub mfr_part_no: String,
    /// Price as displayed (e.g. "£1.87" or "12,50 €")
    pub price: String,
    /// Absolute URL of the product detail page
    pub url: String,
}

/// A single product detail page.
///
/// Only the title is guaranteed; detail pages vary more than listing tiles,
/// so everything else is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDetails {
    /// Product title
    pub title: String,
    /// Distributor stock number
    pub stock_no: Option<String>,
    /// Manufacturer part number
    pub mfr_part_no: Option<String>,
    /// Brand / manufacturer name
    pub brand: Option<String>,
    /// Price as displayed
    pub price: Option<String>,
    /// Availability text (e.g. "In stock for next working day delivery")
    pub availability: Option<String>,
    /// URL the details were scraped from
    pub url: String,
}

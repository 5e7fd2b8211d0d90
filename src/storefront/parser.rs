//! HTML extraction for listing and product detail pages.
//!
//! Operates on rendered page source handed over by the browser session, so
//! tile semantics stay testable against plain HTML fixtures.

use crate::storefront::models::{ProductDetails, ProductSummary};
use crate::storefront::selectors::{detail, listing};
use anyhow::{Context, Result};
use scraper::{ElementRef, Html};
use tracing::{debug, trace};

/// Parser for storefront pages.
pub struct Parser {
    base_url: Option<String>,
}

impl Parser {
    /// Creates a parser. Relative product links are joined onto `base_url`.
    pub fn new(base_url: Option<String>) -> Self {
        Self { base_url }
    }

    /// Parses all product tiles from a listing page, in DOM order.
    ///
    /// A tile missing any of the five fields contributes no record at all;
    /// extraction continues with the remaining tiles.
    pub fn parse_listing(&self, html: &str) -> Vec<ProductSummary> {
        let document = Html::parse_document(html);
        let mut summaries = Vec::new();

        for tile in document.select(&listing::TILE) {
            match self.parse_tile(tile) {
                Some(summary) => {
                    trace!("Parsed tile: {} - {}", summary.stock_no, summary.title);
                    summaries.push(summary);
                }
                None => trace!("Skipping tile with missing fields"),
            }
        }

        debug!("Parsed {} product tiles", summaries.len());
        summaries
    }

    /// Collects product link URLs from a listing page, in DOM order.
    pub fn parse_links(&self, html: &str) -> Vec<String> {
        let document = Html::parse_document(html);
        document
            .select(&listing::TITLE_LINKS)
            .filter_map(|a| a.value().attr("href"))
            .map(|href| self.absolutize(href))
            .collect()
    }

    /// Parses a product detail page. The title is required; other fields
    /// are filled when present.
    pub fn parse_detail(&self, html: &str, url: &str) -> Result<ProductDetails> {
        let document = Html::parse_document(html);

        let title = document
            .select(&detail::TITLE)
            .next()
            .map(element_text)
            .context("Could not find product title on detail page")?;

        Ok(ProductDetails {
            title,
            stock_no: document.select(&detail::STOCK_NO).next().map(element_text),
            mfr_part_no: document.select(&detail::MFR_PART_NO).next().map(element_text),
            brand: document.select(&detail::BRAND).next().map(element_text),
            price: document.select(&detail::PRICE).next().map(element_text),
            availability: document.select(&detail::AVAILABILITY).next().map(element_text),
            url: url.to_string(),
        })
    }

    /// Reads one tile; None when any of the five fields is absent.
    fn parse_tile(&self, tile: ElementRef) -> Option<ProductSummary> {
        let title = tile.select(&listing::TITLE).next().map(element_text)?;
        let stock_no = tile.select(&listing::STOCK_NO).next().map(element_text)?;
        let mfr_part_no = tile.select(&listing::MFR_PART_NO).next().map(element_text)?;
        let price = tile.select(&listing::PRICE).next().map(element_text)?;
        let url = tile
            .select(&listing::LINK)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(|href| self.absolutize(href))?;

        Some(ProductSummary { title, stock_no, mfr_part_no, price, url })
    }

    fn absolutize(&self, href: &str) -> String {
        if href.starts_with("http") {
            return href.to_string();
        }
        match &self.base_url {
            Some(base) => format!("{}{}", base.trim_end_matches('/'), href),
            None => href.to_string(),
        }
    }
}

fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

//! Selectors for storefront pages and controls.
//!
//! This file contains every selector used to interact with or parse the
//! storefront. Update this file when the site changes its markup.
//!
//! **Update process**: when an interaction fails with "no such element" or
//! parsing starts dropping tiles, capture an HTML sample, update selectors,
//! and add a test fixture.

use scraper::Selector;
use std::sync::LazyLock;

/// Locators for live page controls, used through the WebDriver session.
pub mod controls {
    /// Search input on the storefront header.
    pub static SEARCH_INPUT_ID: &str = "searchBarTextInput";

    /// Button that submits the header search.
    pub static SEARCH_BUTTON: &str = "button[aria-label='Search button']";

    /// Results-per-page button identified by its visible "100" label.
    pub static PER_PAGE_100_XPATH: &str = "//button[span[text()='100']]";

    /// Cookie-consent popup container.
    pub static POPUP_CONTAINER: &str = "body";

    /// Reject-all control inside the popup container.
    pub static POPUP_REJECT: &str = "button#rejectAll";
}

/// Selectors for search results listing pages.
pub mod listing {
    use super::*;

    /// Product tile container - one per result.
    pub static TILE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("div[data-testid='product-tile-item']").unwrap());

    /// Product title on a tile.
    pub static TITLE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("div[data-qa='product-tile-title']").unwrap());

    /// Distributor stock number on a tile.
    pub static STOCK_NO: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("div[data-qa='product-tile-partno-value']").unwrap());

    /// Manufacturer part number on a tile.
    pub static MFR_PART_NO: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("div[data-qa='product-tile-mftr-value']").unwrap());

    /// Price on a tile.
    pub static PRICE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("div[data-qa='product-tile-price']").unwrap());

    /// Anchor wrapping the tile, carries the product detail URL.
    pub static LINK: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("a[data-qa='product-tile-container']").unwrap());

    /// Anchors inside product title blocks, for link-only extraction.
    pub static TITLE_LINKS: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(".product-title a").unwrap());
}

/// Selectors for product detail pages.
pub mod detail {
    use super::*;

    /// Product title heading.
    pub static TITLE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("h1[data-testid='long-part-description']").unwrap());

    /// Distributor stock number value.
    pub static STOCK_NO: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("[data-testid='stock-number-value']").unwrap());

    /// Manufacturer part number value.
    pub static MFR_PART_NO: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("[data-testid='mpn-value']").unwrap());

    /// Brand link.
    pub static BRAND: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("[data-testid='brand-value']").unwrap());

    /// Unit price, VAT-inclusive or -exclusive depending on region.
    pub static PRICE: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            "[data-testid='price-inc-vat'], \
             [data-testid='price-exc-vat']",
        )
        .unwrap()
    });

    /// Stock availability message.
    pub static AVAILABILITY: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("[data-testid='stock-status']").unwrap());
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn test_selectors_compile() {
        // Force evaluation of all lazy selectors to ensure they compile
        let _ = &*listing::TILE;
        let _ = &*listing::TITLE;
        let _ = &*listing::STOCK_NO;
        let _ = &*listing::MFR_PART_NO;
        let _ = &*listing::PRICE;
        let _ = &*listing::LINK;
        let _ = &*listing::TITLE_LINKS;
        let _ = &*detail::TITLE;
        let _ = &*detail::PRICE;
        let _ = &*detail::AVAILABILITY;
    }

    #[test]
    fn test_basic_tile_matching() {
        let html = Html::parse_document(
            r#"<div data-testid="product-tile-item">
                <div data-qa="product-tile-title">RS PRO Resistor</div>
                <div data-qa="product-tile-partno-value">123-4567</div>
            </div>"#,
        );

        let tiles: Vec<_> = html.select(&listing::TILE).collect();
        assert_eq!(tiles.len(), 1);

        let title: String =
            tiles[0].select(&listing::TITLE).next().unwrap().text().collect();
        assert_eq!(title, "RS PRO Resistor");
    }
}

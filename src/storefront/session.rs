//! Browser session controller for the storefront.
//!
//! Owns the WebDriver handle and the region table, and exposes the
//! interaction surface: region selection, navigation, search, pagination,
//! and field extraction from rendered pages. A cookie-consent popup guard
//! runs at the top of every guarded action; extraction methods, the
//! page-size toggle, and `close` are exempt and never perform the lookup.

use crate::config::Config;
use crate::storefront::models::{ProductDetails, ProductSummary};
use crate::storefront::parser::Parser;
use crate::storefront::regions::{RegionError, RegionTable};
use crate::storefront::selectors::controls;
use anyhow::{Context, Result};
use async_trait::async_trait;
use thirtyfour::error::WebDriverError;
use thirtyfour::{By, ChromiumLikeCapabilities, DesiredCapabilities, WebDriver};
use tracing::{debug, info, warn};

/// Errors surfaced by session operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Region(#[from] RegionError),

    #[error("Browser session is already closed")]
    Closed,

    #[error("Could not extract product details: {0}")]
    Extraction(String),

    #[error(transparent)]
    WebDriver(#[from] WebDriverError),
}

/// The storefront operation surface.
///
/// `StorefrontSession` is the only production implementation; the trait
/// exists so commands can be exercised against a scripted session in tests.
#[async_trait]
pub trait StorefrontOps {
    /// Selects a regional storefront by name and navigates to it.
    async fn select_region(&mut self, name: &str) -> Result<(), SessionError>;

    /// Navigates to an arbitrary URL.
    async fn open_page(&mut self, url: &str) -> Result<(), SessionError>;

    /// Types a term into the search box and submits it.
    async fn search(&mut self, term: &str) -> Result<(), SessionError>;

    /// Switches the listing to 100 results per page, if the control exists.
    async fn set_results_per_page_100(&mut self) -> Result<(), SessionError>;

    /// Extracts product link URLs from the current listing page.
    async fn product_links(&mut self) -> Result<Vec<String>, SessionError>;

    /// Extracts product summaries from the current listing page.
    async fn product_summaries(&mut self) -> Result<Vec<ProductSummary>, SessionError>;

    /// Navigates to a product detail page.
    async fn goto_product_url(&mut self, url: &str) -> Result<(), SessionError>;

    /// Extracts the record from the current product detail page.
    async fn product_details(&mut self) -> Result<ProductDetails, SessionError>;

    /// Releases the browser. Safe to call multiple times.
    async fn close(&mut self) -> Result<(), SessionError>;
}

/// A live browser session against one storefront.
#[derive(Debug)]
pub struct StorefrontSession {
    driver: Option<WebDriver>,
    regions: RegionTable,
    base_url: Option<String>,
}

impl StorefrontSession {
    /// Loads the region table and starts a WebDriver session.
    ///
    /// The region file is read before the browser is touched, so a
    /// configuration error never leaks a browser process.
    pub async fn connect(config: &Config) -> Result<Self> {
        let regions = RegionTable::load(&config.regions_file)?;

        let mut caps = DesiredCapabilities::chrome();
        if config.headless {
            caps.set_headless()?;
        }
        // Required when Chrome runs as root in containers
        caps.set_no_sandbox()?;
        caps.set_disable_dev_shm_usage()?;

        debug!("Connecting to WebDriver at {}", config.webdriver_url);
        let driver = WebDriver::new(&config.webdriver_url, caps)
            .await
            .context("Failed to create WebDriver session")?;

        Ok(Self { driver: Some(driver), regions, base_url: None })
    }

    /// Returns the loaded region table.
    pub fn regions(&self) -> &RegionTable {
        &self.regions
    }

    /// Returns the base URL of the selected region, if any.
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    fn driver(&self) -> Result<&WebDriver, SessionError> {
        self.driver.as_ref().ok_or(SessionError::Closed)
    }

    /// Dismisses the cookie-consent popup when it is on screen.
    ///
    /// Looks up the popup container and the reject control inside it; if
    /// either is absent the popup is simply not there, which is the common
    /// case and not an error. Returns whether a dismissal click happened.
    async fn dismiss_popup_if_present(&self) -> Result<bool, SessionError> {
        let driver = self.driver()?;

        let container = match driver.find(By::Css(controls::POPUP_CONTAINER)).await {
            Ok(element) => element,
            Err(WebDriverError::NoSuchElement(_)) => return Ok(false),
            Err(e) => return Err(e.into()),
        };

        let reject = match container.find(By::Css(controls::POPUP_REJECT)).await {
            Ok(element) => element,
            Err(WebDriverError::NoSuchElement(_)) => return Ok(false),
            Err(e) => return Err(e.into()),
        };

        reject.click().await?;
        debug!("Dismissed cookie-consent popup");
        Ok(true)
    }

    async fn page_source(&self) -> Result<String, SessionError> {
        Ok(self.driver()?.source().await?)
    }

    fn parser(&self) -> Parser {
        Parser::new(self.base_url.clone())
    }
}

#[async_trait]
impl StorefrontOps for StorefrontSession {
    async fn select_region(&mut self, name: &str) -> Result<(), SessionError> {
        self.dismiss_popup_if_present().await?;

        // Resolve before navigating: an unknown region must not move the page
        let url = self.regions.url(name)?.to_string();
        info!("Selected region '{}': {}", name, url);
        self.base_url = Some(url.clone());
        self.driver()?.goto(&url).await?;
        Ok(())
    }

    async fn open_page(&mut self, url: &str) -> Result<(), SessionError> {
        self.dismiss_popup_if_present().await?;
        debug!("Opening {}", url);
        self.driver()?.goto(url).await?;
        Ok(())
    }

    async fn search(&mut self, term: &str) -> Result<(), SessionError> {
        self.dismiss_popup_if_present().await?;
        info!("Searching for: {}", term);

        let driver = self.driver()?;
        let input = driver.find(By::Id(controls::SEARCH_INPUT_ID)).await?;
        input.clear().await?;
        input.send_keys(term).await?;

        let button = driver.find(By::Css(controls::SEARCH_BUTTON)).await?;
        button.click().await?;
        Ok(())
    }

    async fn set_results_per_page_100(&mut self) -> Result<(), SessionError> {
        let driver = self.driver()?;
        match driver.find(By::XPath(controls::PER_PAGE_100_XPATH)).await {
            Ok(button) => {
                button.click().await?;
                info!("Set results per page to 100");
            }
            Err(WebDriverError::NoSuchElement(_)) => {
                warn!("'100' results-per-page button not found, keeping default page size");
            }
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }

    async fn product_links(&mut self) -> Result<Vec<String>, SessionError> {
        let html = self.page_source().await?;
        Ok(self.parser().parse_links(&html))
    }

    async fn product_summaries(&mut self) -> Result<Vec<ProductSummary>, SessionError> {
        let html = self.page_source().await?;
        Ok(self.parser().parse_listing(&html))
    }

    async fn goto_product_url(&mut self, url: &str) -> Result<(), SessionError> {
        self.dismiss_popup_if_present().await?;
        debug!("Opening product page {}", url);
        self.driver()?.goto(url).await?;
        Ok(())
    }

    async fn product_details(&mut self) -> Result<ProductDetails, SessionError> {
        let html = self.page_source().await?;
        let url = self.driver()?.current_url().await?.to_string();
        self.parser()
            .parse_detail(&html, &url)
            .map_err(|e| SessionError::Extraction(e.to_string()))
    }

    async fn close(&mut self) -> Result<(), SessionError> {
        match self.driver.take() {
            Some(driver) => {
                debug!("Quitting browser session");
                driver.quit().await?;
            }
            None => debug!("Browser session already closed"),
        }
        Ok(())
    }
}

//! Product detail lookup command implementation.

use crate::config::Config;
use crate::format::Formatter;
use crate::storefront::{ProductDetails, StorefrontOps, StorefrontSession};
use anyhow::{Context, Result};
use tracing::{info, warn};

/// Looks up product detail pages by URL.
pub struct ProductCommand {
    config: Config,
}

impl ProductCommand {
    /// Creates a new product command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Fetches a single product page and returns formatted output.
    pub async fn execute(&self, url: &str) -> Result<String> {
        let mut session = StorefrontSession::connect(&self.config)
            .await
            .context("Failed to start browser session")?;

        let result = self.execute_with_session(&mut session, url).await;

        if let Err(e) = session.close().await {
            warn!("Failed to close browser session: {}", e);
        }

        result
    }

    /// Fetches a single product with a provided session (for testing).
    pub async fn execute_with_session(
        &self,
        session: &mut impl StorefrontOps,
        url: &str,
    ) -> Result<String> {
        info!("Looking up product: {}", url);

        session.goto_product_url(url).await?;
        let details = session.product_details().await?;

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_detail(&details))
    }

    /// Fetches multiple product pages in one browser session.
    pub async fn execute_batch(&self, urls: &[String]) -> Result<String> {
        let mut session = StorefrontSession::connect(&self.config)
            .await
            .context("Failed to start browser session")?;

        let result = self.execute_batch_with_session(&mut session, urls).await;

        if let Err(e) = session.close().await {
            warn!("Failed to close browser session: {}", e);
        }

        result
    }

    /// Fetches multiple products with a provided session (for testing).
    ///
    /// Failures on individual URLs are reported and skipped.
    pub async fn execute_batch_with_session(
        &self,
        session: &mut impl StorefrontOps,
        urls: &[String],
    ) -> Result<String> {
        let mut all_details: Vec<ProductDetails> = Vec::new();

        for url in urls {
            info!("Looking up product: {}", url);

            if let Err(e) = session.goto_product_url(url).await {
                eprintln!("Failed to open {}: {}", url, e);
                continue;
            }

            match session.product_details().await {
                Ok(details) => all_details.push(details),
                Err(e) => eprintln!("Failed to extract {}: {}", url, e),
            }
        }

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_details(&all_details))
    }
}

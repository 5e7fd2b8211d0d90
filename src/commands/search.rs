//! Search command implementation.

use crate::config::Config;
use crate::format::Formatter;
use crate::storefront::{StorefrontOps, StorefrontSession};
use anyhow::{Context, Result};
use tracing::{info, warn};

/// Executes a product search against the configured region.
pub struct SearchCommand {
    config: Config,
    links_only: bool,
}

impl SearchCommand {
    /// Creates a new search command.
    pub fn new(config: Config) -> Self {
        Self { config, links_only: false }
    }

    /// Output bare product links instead of full summaries.
    pub fn links_only(mut self, links_only: bool) -> Self {
        self.links_only = links_only;
        self
    }

    /// Executes the search and returns formatted output.
    ///
    /// The browser session is released on every exit path.
    pub async fn execute(&self, query: &str) -> Result<String> {
        let mut session = StorefrontSession::connect(&self.config)
            .await
            .context("Failed to start browser session")?;

        let result = self.execute_with_session(&mut session, query).await;

        if let Err(e) = session.close().await {
            warn!("Failed to close browser session: {}", e);
        }

        result
    }

    /// Executes the search with a provided session (for testing).
    pub async fn execute_with_session(
        &self,
        session: &mut impl StorefrontOps,
        query: &str,
    ) -> Result<String> {
        info!("Searching for: {}", query);

        session.select_region(&self.config.region).await?;
        session.search(query).await?;
        session.set_results_per_page_100().await?;

        let formatter = Formatter::new(self.config.format);

        if self.links_only {
            let links = session.product_links().await?;
            info!("Extracted {} product links", links.len());
            return Ok(formatter.format_links(&links));
        }

        let summaries = session.product_summaries().await?;
        info!("Extracted {} products", summaries.len());
        Ok(formatter.format_summaries(&summaries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use crate::storefront::{
        ProductDetails, ProductSummary, RegionTable, SessionError,
    };
    use async_trait::async_trait;

    /// Scripted session that records the operations performed on it.
    struct MockSession {
        calls: Vec<String>,
        regions: RegionTable,
        summaries: Vec<ProductSummary>,
        links: Vec<String>,
    }

    impl MockSession {
        fn new() -> Self {
            Self {
                calls: Vec::new(),
                regions: RegionTable::from_pairs([(
                    "uk".to_string(),
                    "https://example.test/uk".to_string(),
                )]),
                summaries: Vec::new(),
                links: Vec::new(),
            }
        }

        fn with_summaries(mut self, summaries: Vec<ProductSummary>) -> Self {
            self.summaries = summaries;
            self
        }

        fn with_links(mut self, links: Vec<String>) -> Self {
            self.links = links;
            self
        }
    }

    #[async_trait]
    impl StorefrontOps for MockSession {
        async fn select_region(&mut self, name: &str) -> Result<(), SessionError> {
            self.calls.push(format!("select_region:{}", name));
            self.regions.url(name)?;
            Ok(())
        }

        async fn open_page(&mut self, url: &str) -> Result<(), SessionError> {
            self.calls.push(format!("open_page:{}", url));
            Ok(())
        }

        async fn search(&mut self, term: &str) -> Result<(), SessionError> {
            self.calls.push(format!("search:{}", term));
            Ok(())
        }

        async fn set_results_per_page_100(&mut self) -> Result<(), SessionError> {
            self.calls.push("set_results_per_page_100".to_string());
            Ok(())
        }

        async fn product_links(&mut self) -> Result<Vec<String>, SessionError> {
            self.calls.push("product_links".to_string());
            Ok(self.links.clone())
        }

        async fn product_summaries(&mut self) -> Result<Vec<ProductSummary>, SessionError> {
            self.calls.push("product_summaries".to_string());
            Ok(self.summaries.clone())
        }

        async fn goto_product_url(&mut self, url: &str) -> Result<(), SessionError> {
            self.calls.push(format!("goto_product_url:{}", url));
            Ok(())
        }

        async fn product_details(&mut self) -> Result<ProductDetails, SessionError> {
            self.calls.push("product_details".to_string());
            Err(SessionError::Extraction("not scripted".to_string()))
        }

        async fn close(&mut self) -> Result<(), SessionError> {
            self.calls.push("close".to_string());
            Ok(())
        }
    }

    fn make_summary(stock_no: &str, title: &str) -> ProductSummary {
        ProductSummary {
            title: title.to_string(),
            stock_no: stock_no.to_string(),
            mfr_part_no: format!("MFR-{}", stock_no),
            price: "£1.00".to_string(),
            url: format!("https://example.test/uk/p/{}", stock_no),
        }
    }

    fn make_config() -> Config {
        Config { region: "uk".to_string(), format: OutputFormat::Table, ..Config::default() }
    }

    #[tokio::test]
    async fn test_search_flow_order() {
        let mut session =
            MockSession::new().with_summaries(vec![make_summary("111-1111", "Resistor")]);
        let cmd = SearchCommand::new(make_config());

        let output = cmd.execute_with_session(&mut session, "resistor").await.unwrap();

        assert_eq!(
            session.calls,
            vec![
                "select_region:uk",
                "search:resistor",
                "set_results_per_page_100",
                "product_summaries",
            ]
        );
        assert!(output.contains("111-1111"));
        assert!(output.contains("Resistor"));
    }

    #[tokio::test]
    async fn test_search_unknown_region_aborts() {
        let mut session = MockSession::new();
        let mut config = make_config();
        config.region = "atlantis".to_string();
        let cmd = SearchCommand::new(config);

        let result = cmd.execute_with_session(&mut session, "resistor").await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("atlantis"));

        // Nothing after the failed region selection ran
        assert_eq!(session.calls, vec!["select_region:atlantis"]);
    }

    #[tokio::test]
    async fn test_search_empty_results() {
        let mut session = MockSession::new();
        let cmd = SearchCommand::new(make_config());

        let output = cmd.execute_with_session(&mut session, "unobtainium").await.unwrap();
        assert!(output.contains("No products found"));
    }

    #[tokio::test]
    async fn test_search_links_only() {
        let mut session = MockSession::new().with_links(vec![
            "https://example.test/uk/p/1".to_string(),
            "https://example.test/uk/p/2".to_string(),
        ]);
        let cmd = SearchCommand::new(make_config()).links_only(true);

        let output = cmd.execute_with_session(&mut session, "resistor").await.unwrap();

        assert!(session.calls.contains(&"product_links".to_string()));
        assert!(!session.calls.contains(&"product_summaries".to_string()));
        assert_eq!(output, "https://example.test/uk/p/1\nhttps://example.test/uk/p/2");
    }

    #[tokio::test]
    async fn test_search_json_format() {
        let mut session =
            MockSession::new().with_summaries(vec![make_summary("111-1111", "Resistor")]);
        let mut config = make_config();
        config.format = OutputFormat::Json;
        let cmd = SearchCommand::new(config);

        let output = cmd.execute_with_session(&mut session, "resistor").await.unwrap();
        assert!(output.starts_with('['));
        assert!(output.contains("111-1111"));
    }
}

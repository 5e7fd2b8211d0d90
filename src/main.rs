//! rs-crawler - Browser-driven RS Components product search CLI

use anyhow::Result;
use clap::{Parser, Subcommand};
use rs_crawler::commands::{ProductCommand, SearchCommand};
use rs_crawler::config::{Config, OutputFormat};
use rs_crawler::storefront::RegionTable;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "rs-crawler",
    version,
    about = "Browser-driven RS Components product search CLI",
    long_about = "Drives a Chrome instance through a WebDriver server to search \
                  RS Components regional storefronts and scrape product listings."
)]
struct Cli {
    /// Storefront region to use (must exist in the regions file)
    #[arg(short, long, global = true, env = "RS_REGION")]
    region: Option<String>,

    /// WebDriver server URL
    #[arg(long, global = true, env = "RS_WEBDRIVER_URL")]
    webdriver_url: Option<String>,

    /// Path to the regions JSON file
    #[arg(long, global = true, env = "RS_REGIONS_FILE")]
    regions_file: Option<PathBuf>,

    /// Run the browser with a visible window
    #[arg(long, global = true)]
    no_headless: bool,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "table", global = true)]
    format: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the regional storefront for products
    #[command(alias = "s")]
    Search {
        /// Search query
        query: String,

        /// Print product links instead of full records
        #[arg(long)]
        links: bool,
    },

    /// Scrape product detail pages by URL
    #[command(alias = "p")]
    Product {
        /// Product page URL(s)
        #[arg(required = true)]
        urls: Vec<String>,
    },

    /// List regions available in the regions file
    Regions,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    config.format = cli.format;

    if cli.no_headless {
        config.headless = false;
    }
    if let Some(region) = cli.region {
        config.region = region;
    }
    if let Some(url) = cli.webdriver_url {
        config.webdriver_url = url;
    }
    if let Some(path) = cli.regions_file {
        config.regions_file = path;
    }

    match cli.command {
        Commands::Search { query, links } => {
            let cmd = SearchCommand::new(config).links_only(links);
            let output = cmd.execute(&query).await?;
            println!("{}", output);
        }

        Commands::Product { urls } => {
            let cmd = ProductCommand::new(config);

            let output = if urls.len() == 1 {
                cmd.execute(&urls[0]).await?
            } else {
                cmd.execute_batch(&urls).await?
            };

            println!("{}", output);
        }

        Commands::Regions => {
            let table = RegionTable::load(&config.regions_file)?;

            println!("Available regions:\n");
            println!("{:<16} {}", "Region", "URL");
            println!("{:-<16} {:-<40}", "", "");

            for (name, url) in table.iter() {
                println!("{:<16} {}", name, url);
            }
        }
    }

    Ok(())
}

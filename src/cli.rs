use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

use crate::config::AppConfig;
use commands::{list_products, print_report, serve};

#[derive(Parser)]
#[command(name = "salesboard")]
#[command(about = "Product-level sales forecast dashboard with web server and CLI reports")]
#[command(version)]
pub struct Cli {
    /// Optional TOML configuration file
    ///
    /// Values from the file override built-in defaults and are themselves
    /// overridden by SALESBOARD__SECTION__KEY environment variables.
    #[arg(short, long, global = true, env = "SALESBOARD_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Bind address for the web server
        ///
        /// Format: IP:PORT (e.g., 0.0.0.0:3000, 127.0.0.1:8080)
        #[arg(short, long)]
        bind_address: Option<String>,
    },
    /// List the selectable products
    Products,
    /// Print the dashboard for one product as text
    ///
    /// Examples:
    ///   salesboard report --product-id 101
    ///   salesboard report --product-id 101 --start-date 2023-01-01 --end-date 2023-06-30
    Report {
        /// Product to report on; defaults to the first product
        #[arg(short, long)]
        product_id: Option<String>,

        /// Start of the historical range (YYYY-MM-DD)
        #[arg(short, long)]
        start_date: Option<NaiveDate>,

        /// End of the historical range (YYYY-MM-DD)
        #[arg(short, long)]
        end_date: Option<NaiveDate>,
    },
}

impl Cli {
    pub async fn run(self, config: AppConfig) -> Result<()> {
        match self.command {
            Commands::Serve { bind_address } => {
                let bind_address = bind_address.unwrap_or_else(|| config.server.bind_address.clone());
                serve(&config.data, &bind_address).await?;
            }
            Commands::Products => {
                list_products(&config.data)?;
            }
            Commands::Report { product_id, start_date, end_date } => {
                print_report(&config.data, product_id, start_date, end_date)?;
            }
        }
        Ok(())
    }
}

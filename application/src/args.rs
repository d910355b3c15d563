//! [`Args`] definitions.

use std::num::NonZeroUsize;

use clap::Parser;
use url::Url;

/// Console client of the users directory.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    /// URL of the users endpoint, overriding the configured one.
    #[arg(short, long)]
    pub endpoint: Option<Url>,

    /// Number of users on a page, overriding the configured one.
    #[arg(short, long)]
    pub page_size: Option<NonZeroUsize>,
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}

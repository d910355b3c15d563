//! [`Config`]-related definitions.

use std::{num::NonZeroUsize, time};

use common::Sort;
use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use serde::Deserialize;
use service::domain::user::SortPath;
use smart_default::SmartDefault;
use url::Url;

use crate::Args;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Remote API configuration.
    pub api: Api,

    /// View configuration.
    pub view: View,

    /// Log configuration.
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }

    /// Creates a new [`Config`] from the provided [`Args`], applying their
    /// overrides on top of [`Config::new()`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        let mut conf = Self::new(&args.config)?;
        if let Some(endpoint) = &args.endpoint {
            conf.api.endpoint.clone_from(endpoint);
        }
        if let Some(page_size) = args.page_size {
            conf.view.page_size = page_size;
        }
        Ok(conf)
    }
}

/// Remote API configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Api {
    /// URL of the endpoint returning all the users.
    #[default(service::infra::http::Config::default().endpoint)]
    pub endpoint: Url,

    /// Timeout of a single request.
    #[default(time::Duration::from_secs(10))]
    #[serde(with = "humantime_serde")]
    pub timeout: time::Duration,
}

impl From<Api> for service::infra::http::Config {
    fn from(value: Api) -> Self {
        let Api { endpoint, timeout } = value;
        Self { endpoint, timeout }
    }
}

/// View configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct View {
    /// Number of users on a single page.
    #[default(service::Config::DEFAULT_PAGE_SIZE)]
    pub page_size: NonZeroUsize,

    /// [`Sort`] specification of users.
    #[default(Sort::ascending(SortPath::Name))]
    pub sort: Sort<SortPath>,

    /// Indicator whether to colorize the output with ANSI escape codes.
    #[default(true)]
    pub ansi: bool,
}

impl From<View> for service::Config {
    fn from(value: View) -> Self {
        let View {
            page_size,
            sort,
            ansi: _,
        } = value;
        Self { page_size, sort }
    }
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    Info,

    /// Designates hazardous situations.
    #[default]
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

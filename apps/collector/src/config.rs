//! Environment configuration of the collector binary.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use orgscope_core::{AppError, AppResult};

const DEFAULT_API_URL: &str = "https://api.github.com";
const DEFAULT_PAGE_SIZE: u8 = 100;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Where organization data is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectorSource {
    /// Live GitHub REST and GraphQL APIs.
    Github {
        api_url: String,
        token: String,
        page_size: u8,
        http_timeout: Duration,
    },
    /// A JSON fixture served by the in-memory directory.
    Fixture { path: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectorConfig {
    pub source: CollectorSource,
    pub organizations: Vec<String>,
    pub max_concurrency: Option<usize>,
    pub retain_inactive_members: bool,
}

impl CollectorConfig {
    pub fn load() -> AppResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let organizations = lookup("ORGSCOPE_ORGS")
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|login| !login.is_empty())
                    .map(str::to_owned)
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        let max_concurrency = match lookup("ORGSCOPE_MAX_CONCURRENCY") {
            Some(value) => Some(parse_positive::<usize>(
                "ORGSCOPE_MAX_CONCURRENCY",
                value.as_str(),
            )?),
            None => None,
        };

        let retain_inactive_members = match lookup("ORGSCOPE_RETAIN_INACTIVE") {
            Some(value) => parse_bool("ORGSCOPE_RETAIN_INACTIVE", value.as_str())?,
            None => false,
        };

        let source = match lookup("ORGSCOPE_FIXTURE").filter(|path| !path.trim().is_empty()) {
            Some(path) => CollectorSource::Fixture {
                path: PathBuf::from(path),
            },
            None => {
                let token = required(&lookup, "GITHUB_TOKEN")?;
                let api_url = lookup("GITHUB_API_URL")
                    .filter(|value| !value.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_API_URL.to_owned())
                    .trim_end_matches('/')
                    .to_owned();

                let page_size = match lookup("ORGSCOPE_PAGE_SIZE") {
                    Some(value) => parse_positive::<u8>("ORGSCOPE_PAGE_SIZE", value.as_str())?,
                    None => DEFAULT_PAGE_SIZE,
                };
                if page_size > 100 {
                    return Err(AppError::Validation(format!(
                        "ORGSCOPE_PAGE_SIZE must be between 1 and 100, got {page_size}"
                    )));
                }

                let http_timeout_secs = match lookup("ORGSCOPE_HTTP_TIMEOUT_SECS") {
                    Some(value) => {
                        parse_positive::<u64>("ORGSCOPE_HTTP_TIMEOUT_SECS", value.as_str())?
                    }
                    None => DEFAULT_HTTP_TIMEOUT_SECS,
                };

                CollectorSource::Github {
                    api_url,
                    token,
                    page_size,
                    http_timeout: Duration::from_secs(http_timeout_secs),
                }
            }
        };

        Ok(Self {
            source,
            organizations,
            max_concurrency,
            retain_inactive_members,
        })
    }
}

fn required(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> AppResult<String> {
    lookup(name)
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| AppError::Validation(format!("{name} is required")))
}

fn parse_positive<T>(name: &str, value: &str) -> AppResult<T>
where
    T: std::str::FromStr + PartialEq + Default,
    T::Err: std::fmt::Display,
{
    let parsed = value.trim().parse::<T>().map_err(|error| {
        AppError::Validation(format!("invalid {name} value '{value}': {error}"))
    })?;
    if parsed == T::default() {
        return Err(AppError::Validation(format!(
            "{name} must be greater than zero"
        )));
    }
    Ok(parsed)
}

fn parse_bool(name: &str, value: &str) -> AppResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(AppError::Validation(format!(
            "invalid {name} value '{value}': expected a boolean"
        ))),
    }
}

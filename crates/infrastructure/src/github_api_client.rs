//! GitHub REST and GraphQL adapter for the collector ports.

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderValue, LINK, USER_AGENT};
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use orgscope_application::PageToken;
use orgscope_core::{AppError, AppResult};

mod audit_log;
mod members;
mod organizations;
mod responses;

const GITHUB_API_VERSION: &str = "2022-11-28";
const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";
const CLIENT_USER_AGENT: &str = "orgscope-collector";

/// Settings for [`GithubApiClient`].
#[derive(Debug, Clone)]
pub struct GithubApiConfig {
    /// REST API root, e.g. `https://api.github.com` or `https://ghe.example.com/api/v3`.
    pub api_url: String,
    /// Token sent as bearer credential.
    pub token: String,
    /// Records requested per page, between 1 and 100.
    pub page_size: u8,
    /// Organization logins to scan; empty scans every membership.
    pub organizations: Vec<String>,
}

/// GitHub implementation of the organization, member and audit log ports.
pub struct GithubApiClient {
    http_client: reqwest::Client,
    api_url: Url,
    graphql_url: Url,
    token: String,
    page_size: u8,
    organizations: Vec<String>,
}

impl GithubApiClient {
    /// Creates a client from validated settings.
    pub fn new(http_client: reqwest::Client, config: GithubApiConfig) -> AppResult<Self> {
        let api_url = Url::parse(config.api_url.trim_end_matches('/')).map_err(|error| {
            AppError::Validation(format!(
                "invalid GitHub API URL '{}': {error}",
                config.api_url
            ))
        })?;
        if api_url.cannot_be_a_base() {
            return Err(AppError::Validation(format!(
                "GitHub API URL '{}' cannot be used as a base",
                config.api_url
            )));
        }

        if config.token.trim().is_empty() {
            return Err(AppError::Validation(
                "GitHub token must not be empty".to_owned(),
            ));
        }

        if !(1..=100).contains(&config.page_size) {
            return Err(AppError::Validation(
                "page size must be between 1 and 100".to_owned(),
            ));
        }

        Ok(Self {
            graphql_url: graphql_url(&api_url),
            api_url,
            http_client,
            token: config.token,
            page_size: config.page_size,
            organizations: config.organizations,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                AppError::Validation(format!(
                    "GitHub API URL '{}' cannot be used as a base",
                    self.api_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header(ACCEPT, GITHUB_MEDIA_TYPE)
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION)
    }

    /// Sends a request and decodes the JSON body along with the next page token.
    async fn fetch_json<T>(
        &self,
        request: RequestBuilder,
        context: &str,
    ) -> AppResult<(T, Option<PageToken>)>
    where
        T: DeserializeOwned,
    {
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(|error| AppError::Unavailable(format!("failed to call {context}: {error}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<body unavailable>".to_owned());
            return Err(status_error(status, context, body.as_str()));
        }

        let next_page = next_page_token(response.headers().get(LINK));
        let body = response.json::<T>().await.map_err(|error| {
            AppError::Unavailable(format!("failed to parse {context} response body: {error}"))
        })?;

        Ok((body, next_page))
    }

    fn web_url(&self, login: &str) -> String {
        let host = match self.api_url.host_str() {
            Some("api.github.com") | None => "github.com",
            Some(host) => host,
        };
        format!("https://{host}/{login}")
    }
}

fn status_error(status: StatusCode, context: &str, body: &str) -> AppError {
    let message = format!("{context} returned status {}: {body}", status.as_u16());
    match status {
        StatusCode::UNAUTHORIZED => AppError::Unauthorized(message),
        StatusCode::FORBIDDEN => AppError::Forbidden(message),
        StatusCode::NOT_FOUND => AppError::NotFound(message),
        _ => AppError::Unavailable(message),
    }
}

/// Extracts the `page` parameter of the `rel="next"` target of a Link header.
fn next_page_token(link_header: Option<&HeaderValue>) -> Option<PageToken> {
    let links = link_header?.to_str().ok()?;
    links.split(',').find_map(|link| {
        let mut parts = link.split(';');
        let target = parts
            .next()?
            .trim()
            .strip_prefix('<')?
            .strip_suffix('>')?;
        if !parts.any(|parameter| parameter.trim() == "rel=\"next\"") {
            return None;
        }

        let target = Url::parse(target).ok()?;
        target
            .query_pairs()
            .find(|(key, _)| key == "page")
            .map(|(_, value)| PageToken::new(value.into_owned()))
    })
}

/// GraphQL lives next to the REST root: `/graphql` on github.com, `/api/graphql` on servers.
fn graphql_url(api_url: &Url) -> Url {
    let path = api_url.path().trim_end_matches('/');
    let graphql_path = match path.strip_suffix("/v3") {
        Some(prefix) => format!("{prefix}/graphql"),
        None => format!("{path}/graphql"),
    };

    let mut url = api_url.clone();
    url.set_path(graphql_path.as_str());
    url
}

use std::env;
use std::time::Duration;

use anyhow::Context as _;
use reqwest::{StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use verdant_utils::parse::{parse_positive_u64, parse_truthy};

use crate::cache::{CacheService, DEFAULT_SESSION_CACHE_TTL};
use crate::error::ApiError;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_CACHE_PREFIX: &str = "verdant:session";
const MAX_ERROR_BODY_CHARS: usize = 512;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub cache_enabled: bool,
    pub cache_ttl: Duration,
    pub cache_prefix: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
            cache_enabled: true,
            cache_ttl: DEFAULT_SESSION_CACHE_TTL,
            cache_prefix: DEFAULT_CACHE_PREFIX.to_owned(),
        }
    }

    pub fn from_env() -> anyhow::Result<Self> {
        let base_url = env::var("VERDANT_API_URL")
            .ok()
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .context("VERDANT_API_URL must point at the backend")?;

        let timeout = Duration::from_secs(env_u64(
            "VERDANT_HTTP_TIMEOUT_SECONDS",
            DEFAULT_TIMEOUT.as_secs(),
        ));
        let cache_enabled = env_bool("VERDANT_CACHE_ENABLED", true);
        let cache_ttl = Duration::from_secs(env_u64(
            "VERDANT_CACHE_TTL_SECONDS",
            DEFAULT_SESSION_CACHE_TTL.as_secs(),
        ));

        Ok(Self {
            base_url,
            timeout,
            cache_enabled,
            cache_ttl,
            cache_prefix: DEFAULT_CACHE_PREFIX.to_owned(),
        })
    }
}

/// Shared handle to the backend, passed by reference to every endpoint module.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    cache: CacheService,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> anyhow::Result<Self> {
        let base_url = parse_base_url(&config.base_url)?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .context("failed to build HTTP client")?;

        let cache = if config.cache_enabled {
            CacheService::memory(config.cache_prefix.clone(), config.cache_ttl)
        } else {
            CacheService::disabled(config.cache_prefix.clone())
        };

        Ok(Self {
            http,
            base_url,
            cache,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn cache(&self) -> &CacheService {
        &self.cache
    }

    /// Build an endpoint URL from path segments. Segments are percent-encoded.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|()| ApiError::Endpoint {
                path: segments.join("/"),
                reason: "base URL cannot carry a path".to_owned(),
            })?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    pub(crate) async fn get_json<T>(&self, segments: &[&str]) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        debug!(%url, "GET");
        let response = self.http.get(url.clone()).send().await?;
        read_json(&url, response).await
    }

    pub(crate) async fn post_json<B, T>(&self, segments: &[&str], body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        debug!(%url, "POST");
        let response = self.http.post(url.clone()).json(body).send().await?;
        read_json(&url, response).await
    }
}

async fn read_json<T>(url: &Url, response: reqwest::Response) -> Result<T, ApiError>
where
    T: DeserializeOwned,
{
    let status = response.status();
    let body = response.text().await?;
    let decoded = decode_body(status, &body);
    if let Err(err) = &decoded {
        warn!(%url, status = status.as_u16(), ?err, "backend request failed");
    }
    decoded
}

/// Turn a status and raw body into a typed value or the matching [`ApiError`].
pub(crate) fn decode_body<T>(status: StatusCode, body: &str) -> Result<T, ApiError>
where
    T: DeserializeOwned,
{
    if !status.is_success() {
        return Err(ApiError::Status {
            status: status.as_u16(),
            body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
        });
    }

    Ok(serde_json::from_str(body)?)
}

fn parse_base_url(raw: &str) -> anyhow::Result<Url> {
    let trimmed = raw.trim();
    let normalized = if trimmed.ends_with('/') {
        trimmed.to_owned()
    } else {
        format!("{}/", trimmed)
    };

    Url::parse(&normalized).with_context(|| format!("invalid backend URL `{}`", trimmed))
}

fn env_bool(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(value) => parse_truthy(&value),
        Err(_) => default,
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    match env::var(key) {
        Ok(value) => parse_positive_u64(&value).unwrap_or(default),
        Err(_) => default,
    }
}

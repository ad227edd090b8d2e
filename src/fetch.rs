use reqwest::StatusCode;
use reqwest::header::{ACCEPT_LANGUAGE, HeaderMap, HeaderValue, InvalidHeaderValue, USER_AGENT};
use url::Url;

use crate::config::ScrapeConfig;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: StatusCode },

    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid request header: {0}")]
    Header(#[from] InvalidHeaderValue),

    #[error("build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl FetchError {
    /// Short label used in per-target console reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Status { .. } => "HTTP",
            Self::Network { .. } => "Network",
            Self::Header(_) | Self::Client(_) => "Client",
        }
    }
}

/// Anything able to hand back the HTML of a catalog page.
pub trait PageSource {
    fn fetch(&self, url: &Url) -> Result<String, FetchError>;
}

/// Blocking HTTP page source: one attempt per page, no retries.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::blocking::Client,
}

impl HttpSource {
    pub fn new(config: &ScrapeConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_str(&config.user_agent)?);
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_str(&config.accept_language)?,
        );

        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self { client })
    }
}

impl PageSource for HttpSource {
    fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        let network = |source| FetchError::Network {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url.clone()).send().map_err(network)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        // The catalog does not always declare its charset; it is UTF-8.
        let body = response.bytes().map_err(network)?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

/// Detail page URL of one manuscript: `{base_url}?projet={id}`.
pub fn target_url(config: &ScrapeConfig, id: u64) -> anyhow::Result<Url> {
    let mut url = Url::parse(&config.base_url)
        .map_err(|err| anyhow::anyhow!("parse base url {:?}: {err}", config.base_url))?;
    url.query_pairs_mut().append_pair("projet", &id.to_string());
    Ok(url)
}

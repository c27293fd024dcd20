use std::time::Duration;

use serde_json::Value;
use stargazer_core::{
    format_iso_date, ApodQuery, FeedRequest, MarsDate, MarsPhotosQuery, NeoFeedQuery,
};
use stargazer_logging::{sg_debug, sg_info, sg_warn};
use url::Url;

use crate::{FailureKind, FetchError};

const APOD_PATH: &str = "/planetary/apod";
const NEO_FEED_PATH: &str = "/neo/rest/v1/feed";

#[derive(Debug, Clone)]
pub struct GatewaySettings {
    pub base_url: String,
    pub api_key: String,
    pub rover: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.nasa.gov".to_string(),
            api_key: "DEMO_KEY".to_string(),
            rover: "curiosity".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Issues one GET per call against the NASA open APIs.
#[async_trait::async_trait]
pub trait Gateway: Send + Sync {
    async fn fetch_apod(&self, query: &ApodQuery) -> Result<Value, FetchError>;

    async fn fetch_neo_feed(&self, query: &NeoFeedQuery) -> Result<Value, FetchError>;

    async fn fetch_mars_photos(&self, query: &MarsPhotosQuery) -> Result<Value, FetchError>;

    async fn fetch(&self, request: &FeedRequest) -> Result<Value, FetchError> {
        match request {
            FeedRequest::Apod(query) => self.fetch_apod(query).await,
            FeedRequest::NeoFeed(query) => self.fetch_neo_feed(query).await,
            FeedRequest::MarsPhotos(query) => self.fetch_mars_photos(query).await,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReqwestGateway {
    settings: GatewaySettings,
    client: reqwest::Client,
}

impl ReqwestGateway {
    pub fn new(settings: GatewaySettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &GatewaySettings {
        &self.settings
    }

    fn mars_photos_path(&self) -> String {
        format!("/mars-photos/api/v1/rovers/{}/photos", self.settings.rover)
    }

    /// Builds `{base}{path}?api_key=...&{params}`.
    fn endpoint(&self, path: &str, params: &[(&str, String)]) -> Result<Url, FetchError> {
        let raw = format!("{}{}", self.settings.base_url.trim_end_matches('/'), path);
        let mut url = Url::parse(&raw)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("api_key", &self.settings.api_key);
            for (name, value) in params {
                pairs.append_pair(name, value);
            }
        }
        Ok(url)
    }

    async fn get_json(&self, path: &str, params: Vec<(&str, String)>) -> Result<Value, FetchError> {
        let url = self.endpoint(path, &params)?;
        sg_info!("GET {} params={:?}", path, params);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        sg_debug!("GET {} -> {} ({} bytes)", path, status, body.len());

        if !status.is_success() {
            let message = upstream_message(&body).unwrap_or_else(|| {
                format!("Request failed with status code {}", status.as_u16())
            });
            sg_warn!("GET {} failed with {}: {}", path, status, message);
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                message,
            ));
        }

        serde_json::from_slice(&body)
            .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))
    }
}

#[async_trait::async_trait]
impl Gateway for ReqwestGateway {
    async fn fetch_apod(&self, query: &ApodQuery) -> Result<Value, FetchError> {
        let mut params = Vec::new();
        if let Some(date) = query.date {
            params.push(("date", format_iso_date(date)));
        }
        self.get_json(APOD_PATH, params).await
    }

    async fn fetch_neo_feed(&self, query: &NeoFeedQuery) -> Result<Value, FetchError> {
        let params = vec![
            ("start_date", format_iso_date(query.start_date)),
            ("end_date", format_iso_date(query.end_date)),
        ];
        self.get_json(NEO_FEED_PATH, params).await
    }

    async fn fetch_mars_photos(&self, query: &MarsPhotosQuery) -> Result<Value, FetchError> {
        let mut params = match query.selector {
            MarsDate::Sol(sol) => vec![("sol", sol.to_string())],
            MarsDate::EarthDate(date) => vec![("earth_date", format_iso_date(date))],
        };
        if let Some(page) = query.page {
            params.push(("page", page.to_string()));
        }
        let path = self.mars_photos_path();
        self.get_json(&path, params).await
    }
}

/// Pulls the human-readable message out of a NASA error body.
///
/// The APIs disagree on shape: api.nasa.gov gateway errors use
/// `{"error": {"message": ..}}`, APOD uses `{"msg": ..}`, NeoWs uses
/// `{"error_message": ..}`.
pub(crate) fn upstream_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    let candidates = [
        value.pointer("/error/message"),
        value.get("msg"),
        value.get("error_message"),
        value.get("message"),
        value.get("error"),
    ];
    let found = candidates
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|text| !text.is_empty())
        .map(str::to_string);
    found
}

/// The request url carries `api_key`, so it is stripped before formatting.
fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    let err = err.without_url();
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}

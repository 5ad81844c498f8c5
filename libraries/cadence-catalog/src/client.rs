//! Catalog HTTP client.

use crate::config::CatalogConfig;
use crate::error::{CatalogClientError, Result};
use crate::transform::{track_from_raw, tracks_from_raw};
use crate::types::{ListEnvelope, SearchEnvelope, SongEnvelope};
use async_trait::async_trait;
use cadence_core::{CatalogService, Track, TrackId};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use url::Url;

/// Query used to probe the catalog at startup.
const PROBE_QUERY: &str = "test";

/// Client for the third-party music catalog.
///
/// Every response is normalized into [`Track`]s; provider quirks never leak
/// past this type.
///
/// # Example
///
/// ```ignore
/// use cadence_catalog::{CatalogClient, CatalogConfig};
///
/// let client = CatalogClient::new(CatalogConfig::default())?;
/// client.check_connection().await?;
///
/// for track in client.search_songs("lofi").await? {
///     println!("{} - {}", track.artist, track.title);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: Client,
    base_url: Url,
    max_results: usize,
}

impl CatalogClient {
    /// Create a new client with the given configuration.
    pub fn new(config: CatalogConfig) -> Result<Self> {
        if config.base_url.trim().is_empty() {
            return Err(CatalogClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let trimmed = config.base_url.trim().trim_end_matches('/');
        if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
            return Err(CatalogClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let base_url = Url::parse(trimmed)
            .map_err(|e| CatalogClientError::InvalidUrl(format!("{}: {}", trimmed, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(CatalogClientError::InvalidUrl(trimmed.to_string()));
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(format!("Cadence/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url,
            max_results: config.max_results,
        })
    }

    /// Normalized base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Verify the catalog answers searches.
    ///
    /// Used at startup; a catalog that responds without a `data` field counts
    /// as broken.
    pub async fn check_connection(&self) -> Result<()> {
        let url = self.endpoint(&["search", "songs"])?;
        let envelope: SearchEnvelope = self
            .get_json(self.http.get(url).query(&[("query", PROBE_QUERY)]))
            .await?;

        if envelope.data.is_none() {
            return Err(CatalogClientError::ParseError(
                "search response has no data".into(),
            ));
        }

        info!(base_url = %self.base_url(), "Music catalog reachable");
        Ok(())
    }

    /// Search songs by free text.
    pub async fn search_songs(&self, query: &str) -> Result<Vec<Track>> {
        debug!(query, "Searching catalog");
        let url = self.endpoint(&["search", "songs"])?;
        let envelope: SearchEnvelope = self
            .get_json(self.http.get(url).query(&[("query", query)]))
            .await?;

        let results = envelope.data.unwrap_or_default().results;
        Ok(tracks_from_raw(results))
    }

    /// Look up one song by id.
    ///
    /// Falls back to searching for the id when the direct lookup has no data,
    /// keeping only an exact id match.
    pub async fn get_song(&self, id: &TrackId) -> Result<Option<Track>> {
        debug!(song_id = %id, "Fetching song");
        let url = self.endpoint(&["songs", id.as_str()])?;
        let response = self.http.get(url).send().await.map_err(map_send_error)?;

        let direct = if response.status() == StatusCode::NOT_FOUND {
            None
        } else {
            let envelope: SongEnvelope = parse_json(response).await?;
            envelope
                .data
                .and_then(|data| data.into_first())
                .and_then(track_from_raw)
        };

        if let Some(track) = direct {
            return Ok(Some(track));
        }

        debug!(song_id = %id, "Song not found by id, trying search");
        let found = self
            .search_songs(id.as_str())
            .await?
            .into_iter()
            .find(|track| &track.id == id);
        Ok(found)
    }

    /// Trending songs, capped at the configured maximum.
    pub async fn trending_songs(&self) -> Result<Vec<Track>> {
        self.get_list(&["trending", "songs"]).await
    }

    /// Top-chart songs, capped at the configured maximum.
    pub async fn top_playlists(&self) -> Result<Vec<Track>> {
        self.get_list(&["playlists", "top"]).await
    }

    async fn get_list(&self, segments: &[&str]) -> Result<Vec<Track>> {
        let url = self.endpoint(segments)?;
        debug!(url = %url, "Fetching catalog list");
        let envelope: ListEnvelope = self.get_json(self.http.get(url)).await?;

        let mut songs = envelope.data.unwrap_or_default();
        songs.truncate(self.max_results);
        Ok(tracks_from_raw(songs))
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| CatalogClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T> {
        let response = request.send().await.map_err(map_send_error)?;
        parse_json(response).await
    }
}

fn map_send_error(err: reqwest::Error) -> CatalogClientError {
    if err.is_connect() || err.is_timeout() {
        CatalogClientError::Unreachable(err.to_string())
    } else {
        CatalogClientError::Request(err)
    }
}

async fn parse_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(CatalogClientError::Upstream {
            status: status.as_u16(),
            message,
        });
    }

    response
        .json()
        .await
        .map_err(|e| CatalogClientError::ParseError(e.to_string()))
}

#[async_trait]
impl CatalogService for CatalogClient {
    async fn search_songs(&self, query: &str) -> cadence_core::Result<Vec<Track>> {
        Ok(CatalogClient::search_songs(self, query).await?)
    }

    async fn get_song(&self, id: &TrackId) -> cadence_core::Result<Option<Track>> {
        Ok(CatalogClient::get_song(self, id).await?)
    }

    async fn trending_songs(&self) -> cadence_core::Result<Vec<Track>> {
        Ok(CatalogClient::trending_songs(self).await?)
    }

    async fn top_playlists(&self) -> cadence_core::Result<Vec<Track>> {
        Ok(CatalogClient::top_playlists(self).await?)
    }
}

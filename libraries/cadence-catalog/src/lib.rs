//! Cadence Catalog Client
//!
//! HTTP client for the third-party music catalog (a JioSaavn-compatible
//! API). It searches songs, looks them up by id and fetches trending and
//! top-chart lists, normalizing every payload into `cadence_core::Track`.
//!
//! # Normalization
//!
//! - **Artwork**: highest resolution among the quality-tagged images
//! - **Stream URL**: highest bitrate among the quality-tagged download links
//! - **Artist**: `primaryArtists`, else the primary artist objects joined
//!   with `", "`, else `artist`
//!
//! # Example
//!
//! ```ignore
//! use cadence_catalog::{CatalogClient, CatalogConfig};
//! use cadence_core::TrackId;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CatalogClient::new(CatalogConfig::default())?;
//!     client.check_connection().await?;
//!
//!     if let Some(track) = client.get_song(&TrackId::new("OGlcIY0Y")).await? {
//!         println!("{} ({})", track.title, track.formatted_duration());
//!     }
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod transform;
mod types;

pub use client::CatalogClient;
pub use config::{CatalogConfig, DEFAULT_BASE_URL, DEFAULT_MAX_RESULTS, DEFAULT_TIMEOUT};
pub use error::{CatalogClientError, Result};

/// Track domain type
use crate::types::TrackId;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// A playable song, normalized from the catalog provider's shape
///
/// Two tracks are equal when their ids are equal; metadata may differ
/// between catalog responses for the same song.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Provider-assigned identifier
    pub id: TrackId,

    /// Song title
    pub title: String,

    /// Display artist (several artists joined with ", ")
    pub artist: String,

    /// Best available audio URL; `None` until resolved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream_url: Option<String>,

    /// Best available artwork URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,

    /// Length in whole seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Provider web page for the song
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perma_url: Option<String>,
}

impl Track {
    /// Create a track with only the required fields set
    pub fn new(id: impl Into<String>, title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            id: TrackId::new(id),
            title: title.into(),
            artist: artist.into(),
            stream_url: None,
            thumbnail: None,
            duration_secs: None,
            album: None,
            year: None,
            language: None,
            perma_url: None,
        }
    }

    /// Set the stream URL
    #[must_use]
    pub fn with_stream_url(mut self, url: impl Into<String>) -> Self {
        self.stream_url = Some(url.into());
        self
    }

    /// Set the thumbnail URL
    #[must_use]
    pub fn with_thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail = Some(url.into());
        self
    }

    /// Set the duration in seconds
    #[must_use]
    pub fn with_duration(mut self, secs: u32) -> Self {
        self.duration_secs = Some(secs);
        self
    }

    /// Whether the track can be handed to audio output without a lookup
    pub fn is_playable(&self) -> bool {
        self.stream_url.as_deref().is_some_and(|url| !url.is_empty())
    }

    /// Duration as `m:ss`, or `0:00` when unknown
    pub fn formatted_duration(&self) -> String {
        let secs = self.duration_secs.unwrap_or(0);
        format!("{}:{:02}", secs / 60, secs % 60)
    }
}

impl PartialEq for Track {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Track {}

impl Hash for Track {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_duration_as_minutes_and_seconds() {
        assert_eq!(Track::new("a", "t", "x").with_duration(245).formatted_duration(), "4:05");
        assert_eq!(Track::new("a", "t", "x").with_duration(59).formatted_duration(), "0:59");
        assert_eq!(Track::new("a", "t", "x").formatted_duration(), "0:00");
    }

    #[test]
    fn equality_is_by_id_only() {
        let a = Track::new("same", "One title", "One artist");
        let b = Track::new("same", "Other title", "Other artist").with_duration(10);
        assert_eq!(a, b);
        assert_ne!(a, Track::new("different", "One title", "One artist"));
    }

    #[test]
    fn playable_requires_non_empty_url() {
        assert!(!Track::new("a", "t", "x").is_playable());
        assert!(!Track::new("a", "t", "x").with_stream_url("").is_playable());
        assert!(Track::new("a", "t", "x").with_stream_url("https://x/a.mp4").is_playable());
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let track = Track::new("a", "t", "x")
            .with_stream_url("https://x/a.mp4")
            .with_duration(30);
        let value = serde_json::to_value(&track).unwrap();

        assert_eq!(value["streamUrl"], "https://x/a.mp4");
        assert_eq!(value["durationSecs"], 30);
        assert!(value.get("album").is_none());
    }
}

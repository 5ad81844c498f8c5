//! Raw catalog payloads.
//!
//! The provider is inconsistent between endpoints and API versions: images
//! and download links come as quality lists or bare strings, albums as
//! objects or names, durations and years as numbers or strings. Every field
//! is optional and every union has a catch-all arm so one odd song never
//! fails a whole response.

use serde::de::IgnoredAny;
use serde::Deserialize;

/// `GET search/songs`
#[derive(Debug, Deserialize)]
pub(crate) struct SearchEnvelope {
    pub data: Option<SearchData>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchData {
    #[serde(default)]
    pub results: Vec<RawSong>,
}

/// `GET songs/{id}`
#[derive(Debug, Deserialize)]
pub(crate) struct SongEnvelope {
    pub data: Option<OneOrMany>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum OneOrMany {
    Many(Vec<RawSong>),
    One(Box<RawSong>),
}

impl OneOrMany {
    pub fn into_first(self) -> Option<RawSong> {
        match self {
            Self::Many(songs) => songs.into_iter().next(),
            Self::One(song) => Some(*song),
        }
    }
}

/// `GET trending/songs` and `GET playlists/top`
#[derive(Debug, Deserialize)]
pub(crate) struct ListEnvelope {
    pub data: Option<Vec<RawSong>>,
}

/// One song as the provider sends it
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSong {
    pub id: Option<Scalar>,
    pub name: Option<String>,
    pub title: Option<String>,
    pub primary_artists: Option<String>,
    pub artists: Option<RawArtists>,
    pub artist: Option<String>,
    pub image: Option<MediaField>,
    pub download_url: Option<MediaField>,
    pub duration: Option<Scalar>,
    pub album: Option<AlbumField>,
    pub year: Option<Scalar>,
    pub language: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "perma_url", alias = "permaUrl")]
    pub perma_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawArtists {
    #[serde(default)]
    pub primary: Vec<RawArtist>,
}

#[derive(Debug, Deserialize)]
pub struct RawArtist {
    pub name: Option<String>,
}

/// Quality-tagged links, or a single bare link
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum MediaField {
    List(Vec<MediaLink>),
    Single(String),
    Other(IgnoredAny),
}

#[derive(Debug, Deserialize)]
pub struct MediaLink {
    /// `"500x500"` for images, `"320kbps"` for audio
    pub quality: Option<String>,
    #[serde(alias = "link")]
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum AlbumField {
    Object { name: Option<String> },
    Name(String),
    Other(IgnoredAny),
}

/// A value the provider sends as either a number or a string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

impl Scalar {
    /// String form; whole numbers print without a fraction
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Number(n) if n.is_finite() && n.fract() == 0.0 => Some(format!("{}", *n as i64)),
            Self::Number(n) if n.is_finite() => Some(n.to_string()),
            Self::Text(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            _ => None,
        }
    }

    /// Non-negative numeric form, rounded to whole units
    pub fn as_whole(&self) -> Option<u32> {
        let value = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse::<f64>().ok()?,
            Self::Other(_) => return None,
        };
        (value.is_finite() && value >= 0.0).then(|| value.round() as u32)
    }
}

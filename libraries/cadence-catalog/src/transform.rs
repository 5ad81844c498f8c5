//! Normalization of provider songs into [`Track`]s.

use crate::types::{AlbumField, MediaField, RawSong};
use cadence_core::{Track, TrackId};
use tracing::warn;

const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Convert one provider song; `None` when it has no usable id
pub(crate) fn track_from_raw(song: RawSong) -> Option<Track> {
    let id = song.id.as_ref().and_then(|id| id.as_text())?;

    let title = song
        .name
        .as_deref()
        .or(song.title.as_deref())
        .map(decode_entities)
        .unwrap_or_default();

    let stream_url = best_stream_url(song.download_url.as_ref());
    if stream_url.is_none() {
        warn!(song_id = %id, "No stream URL found for song");
    }

    Some(Track {
        id: TrackId::new(id),
        title,
        artist: artist_name(&song),
        stream_url,
        thumbnail: best_image(song.image.as_ref()),
        duration_secs: song.duration.as_ref().and_then(|d| d.as_whole()),
        album: album_name(song.album.as_ref()),
        year: song.year.as_ref().and_then(|y| y.as_text()),
        language: song.language.filter(|l| !l.is_empty()),
        perma_url: song.url.or(song.perma_url).filter(|u| !u.is_empty()),
    })
}

/// Convert a list, dropping entries without an id
pub(crate) fn tracks_from_raw(songs: Vec<RawSong>) -> Vec<Track> {
    songs.into_iter().filter_map(track_from_raw).collect()
}

fn artist_name(song: &RawSong) -> String {
    if let Some(names) = song.primary_artists.as_deref().filter(|s| !s.is_empty()) {
        return decode_entities(names);
    }

    if let Some(artists) = &song.artists {
        let joined = artists
            .primary
            .iter()
            .filter_map(|a| a.name.as_deref())
            .filter(|n| !n.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        if !joined.is_empty() {
            return decode_entities(&joined);
        }
    }

    song.artist
        .as_deref()
        .filter(|s| !s.is_empty())
        .map_or_else(|| UNKNOWN_ARTIST.to_string(), decode_entities)
}

fn album_name(album: Option<&AlbumField>) -> Option<String> {
    let name = match album? {
        AlbumField::Object { name } => name.as_deref()?,
        AlbumField::Name(name) => name.as_str(),
        AlbumField::Other(_) => return None,
    };
    (!name.is_empty()).then(|| decode_entities(name))
}

/// Highest-resolution artwork; quality is `"WxH"`
fn best_image(image: Option<&MediaField>) -> Option<String> {
    best_link(image?, |quality| {
        let (w, h) = quality.split_once('x')?;
        let (w, h) = (w.trim().parse::<u64>().ok()?, h.trim().parse::<u64>().ok()?);
        w.checked_mul(h)
    })
}

/// Highest-bitrate audio; quality is `"<n>kbps"`
fn best_stream_url(download: Option<&MediaField>) -> Option<String> {
    best_link(download?, |quality| {
        let digits: String = quality.chars().take_while(char::is_ascii_digit).collect();
        digits.parse::<u64>().ok()
    })
}

/// Pick the link with the highest score, preferring earlier entries on ties
///
/// Entries whose quality cannot be scored rank lowest, so a list without
/// recognizable qualities falls back to its first link.
fn best_link(field: &MediaField, score: impl Fn(&str) -> Option<u64>) -> Option<String> {
    match field {
        MediaField::Single(url) => Some(url.clone()).filter(|u| !u.is_empty()),
        MediaField::List(links) => links
            .iter()
            .filter_map(|link| {
                let url = link.url.as_deref().filter(|u| !u.is_empty())?;
                let rank = link.quality.as_deref().and_then(&score).unwrap_or(0);
                Some((rank, url))
            })
            .fold(None::<(u64, &str)>, |best, (rank, url)| match best {
                Some((best_rank, _)) if best_rank >= rank => best,
                _ => Some((rank, url)),
            })
            .map(|(_, url)| url.to_string()),
        MediaField::Other(_) => None,
    }
}

/// Undo the HTML escaping the provider applies to names
fn decode_entities(text: &str) -> String {
    text.replace("&quot;", "\"")
        .replace("&#039;", "'")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawSong {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn picks_highest_quality_links() {
        let track = track_from_raw(raw(json!({
            "id": "abc",
            "name": "Tum Hi Ho",
            "primaryArtists": "Arijit Singh",
            "image": [
                { "quality": "50x50", "url": "https://img/50.jpg" },
                { "quality": "500x500", "url": "https://img/500.jpg" },
                { "quality": "150x150", "url": "https://img/150.jpg" }
            ],
            "downloadUrl": [
                { "quality": "12kbps", "url": "https://aac/12.mp4" },
                { "quality": "320kbps", "url": "https://aac/320.mp4" },
                { "quality": "160kbps", "url": "https://aac/160.mp4" }
            ],
            "duration": 262
        })))
        .unwrap();

        assert_eq!(track.thumbnail.as_deref(), Some("https://img/500.jpg"));
        assert_eq!(track.stream_url.as_deref(), Some("https://aac/320.mp4"));
        assert_eq!(track.formatted_duration(), "4:22");
    }

    #[test]
    fn accepts_plain_string_links() {
        let track = track_from_raw(raw(json!({
            "id": "abc",
            "title": "Plain",
            "artist": "Someone",
            "image": "https://img/cover.jpg",
            "downloadUrl": "https://aac/song.mp4"
        })))
        .unwrap();

        assert_eq!(track.title, "Plain");
        assert_eq!(track.artist, "Someone");
        assert_eq!(track.thumbnail.as_deref(), Some("https://img/cover.jpg"));
        assert_eq!(track.stream_url.as_deref(), Some("https://aac/song.mp4"));
    }

    #[test]
    fn unknown_qualities_fall_back_to_first_link() {
        let track = track_from_raw(raw(json!({
            "id": "abc",
            "name": "Odd",
            "downloadUrl": [
                { "quality": "lossless", "url": "https://aac/first.mp4" },
                { "quality": "hifi", "url": "https://aac/second.mp4" }
            ]
        })))
        .unwrap();

        assert_eq!(track.stream_url.as_deref(), Some("https://aac/first.mp4"));
    }

    #[test]
    fn joins_primary_artist_objects() {
        let track = track_from_raw(raw(json!({
            "id": "abc",
            "name": "Duet",
            "artists": { "primary": [ { "name": "Shreya Ghoshal" }, { "name": "Sonu Nigam" } ] },
            "album": { "name": "Hits &amp; More" },
            "year": 2019,
            "language": "hindi"
        })))
        .unwrap();

        assert_eq!(track.artist, "Shreya Ghoshal, Sonu Nigam");
        assert_eq!(track.album.as_deref(), Some("Hits & More"));
        assert_eq!(track.year.as_deref(), Some("2019"));
        assert_eq!(track.language.as_deref(), Some("hindi"));
    }

    #[test]
    fn decodes_html_entities_in_titles() {
        let track = track_from_raw(raw(json!({
            "id": "abc",
            "name": "Don&#039;t Stop &quot;Live&quot;"
        })))
        .unwrap();
        assert_eq!(track.title, "Don't Stop \"Live\"");
    }

    #[test]
    fn tolerates_odd_shapes() {
        let track = track_from_raw(raw(json!({
            "id": 12345,
            "name": "Numbers",
            "image": 7,
            "downloadUrl": null,
            "album": "Loose Album",
            "duration": "185"
        })))
        .unwrap();

        assert_eq!(track.id.as_str(), "12345");
        assert_eq!(track.artist, UNKNOWN_ARTIST);
        assert!(track.thumbnail.is_none());
        assert!(track.stream_url.is_none());
        assert_eq!(track.album.as_deref(), Some("Loose Album"));
        assert_eq!(track.duration_secs, Some(185));
    }

    #[test]
    fn songs_without_id_are_dropped() {
        let tracks = tracks_from_raw(vec![
            raw(json!({ "name": "No id" })),
            raw(json!({ "id": "ok", "name": "Has id" })),
        ]);
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].id.as_str(), "ok");
    }
}

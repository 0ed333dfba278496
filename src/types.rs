use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tabled::Tabled;

use crate::warning;

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
}

/// A single recording as returned by the catalog.
///
/// `popularity` is absent on simplified album tracks and `explicit` may be
/// missing altogether; see [`Track::popularity_or_default`] and
/// [`Track::is_explicit`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub uri: String,
    #[serde(default)]
    pub artists: Vec<Artist>,
    #[serde(default)]
    pub popularity: Option<u32>,
    #[serde(default)]
    pub explicit: Option<bool>,
}

pub const DEFAULT_POPULARITY: u32 = 50;

impl Track {
    pub fn popularity_or_default(&self) -> u32 {
        self.popularity.unwrap_or(DEFAULT_POPULARITY)
    }

    pub fn is_explicit(&self) -> bool {
        self.explicit.unwrap_or(false)
    }

    pub fn first_artist_id(&self) -> Option<&str> {
        self.artists.first().map(|a| a.id.as_str())
    }
}

/// A track slot that may be empty.
///
/// Listings sometimes carry `null` for tracks removed from the catalog, and
/// local files come back without a usable id. Both decode quietly to
/// `MaybeTrack(None)`. Any other entry that does not decode as a [`Track`] is
/// logged with its serde error and also becomes `None`, so one odd entry never
/// fails the whole page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaybeTrack(pub Option<Track>);

impl<'de> Deserialize<'de> for MaybeTrack {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let name = value
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or("<unnamed>")
            .to_string();
        match decode_track(value) {
            Ok(track) => Ok(MaybeTrack(track)),
            Err(e) => {
                warning!("Skipping track {:?} that failed to decode: {}", name, e);
                Ok(MaybeTrack(None))
            }
        }
    }
}

/// Decodes one track slot.
///
/// `null` and local files are `Ok(None)`; a present entry of the wrong shape is
/// an error.
pub fn decode_track(value: Value) -> Result<Option<Track>, serde_json::Error> {
    let is_local = value.get("is_local").and_then(Value::as_bool) == Some(true);
    if value.is_null() || is_local {
        return Ok(None);
    }
    serde_json::from_value(value).map(Some)
}

impl From<MaybeTrack> for Option<Track> {
    fn from(slot: MaybeTrack) -> Self {
        slot.0
    }
}

/// Wrapper used by playlist listings and the saved library.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrackEntry {
    #[serde(default)]
    pub track: MaybeTrack,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub album_type: String,
}

impl Album {
    pub fn is_compilation(&self) -> bool {
        self.album_type.eq_ignore_ascii_case("compilation")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioFeature {
    pub id: String,
    pub tempo: f64,
    pub energy: f64,
    pub valence: f64,
    pub liveness: f64,
}

/// One page of a listing. `next` is an opaque absolute URL.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FollowedArtistsResponse {
    pub artists: Page<Artist>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AudioFeaturesResponse {
    #[serde(default)]
    pub audio_features: Vec<Option<AudioFeature>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlaylistUrisRequest<'a> {
    pub uris: &'a [String],
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SnapshotResponse {
    #[serde(default)]
    pub snapshot_id: Option<String>,
}

#[derive(Tabled)]
pub struct RankedTrackTableRow {
    pub position: usize,
    pub name: String,
    pub artists: String,
    pub popularity: String,
    pub score: String,
}

//! The seam between the curation pipeline and the remote catalog.
//!
//! The pipeline only ever talks to a `&dyn Catalog`. [`SpotifyClient`] is the
//! production implementation; tests substitute an in-memory one.
//!
//! [`SpotifyClient`]: crate::spotify::client::SpotifyClient

use async_trait::async_trait;

use crate::{
    Res,
    types::{Album, Artist, AudioFeature, Playlist, Track},
};

#[async_trait]
pub trait Catalog: Send + Sync {
    /// Artists the user follows.
    async fn followed_artists(&self) -> Res<Vec<Artist>>;

    /// Albums of `artist_id` available in the configured market.
    async fn albums(&self, artist_id: &str) -> Res<Vec<Album>>;

    /// Tracks of `album_id`. Slots that failed to decode are `None`.
    async fn album_tracks(&self, album_id: &str) -> Res<Vec<Option<Track>>>;

    /// Every playlist visible to the user.
    async fn playlists(&self) -> Res<Vec<Playlist>>;

    /// Tracks of `playlist_id`, unwrapped from their playlist entries.
    async fn playlist_tracks(&self, playlist_id: &str) -> Res<Vec<Option<Track>>>;

    /// Tracks in the user's saved library.
    async fn saved_tracks(&self) -> Res<Vec<Option<Track>>>;

    /// Audio features for `track_ids`.
    ///
    /// Ids without a feature record are simply absent from the result. A
    /// failed lookup batch contributes nothing instead of failing the call.
    async fn audio_features(&self, track_ids: &[String]) -> Res<Vec<AudioFeature>>;

    /// Removes every track from `playlist_id`.
    async fn clear_playlist(&self, playlist_id: &str) -> Res<()>;

    /// Appends `uris` to `playlist_id` in order, one batch at a time.
    async fn append_tracks(&self, playlist_id: &str, uris: &[String]) -> Res<()>;
}

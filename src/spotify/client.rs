use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use reqwest::Method;

use crate::{
    CurateError, Res,
    config::SpotifySettings,
    info,
    spotify::{
        catalog::Catalog,
        fetcher::Fetcher,
        paginator::{paginate, paginate_items},
        rate_limit::RateLimitGate,
    },
    types::{
        Album, Artist, AudioFeature, AudioFeaturesResponse, FollowedArtistsResponse, MaybeTrack,
        Playlist, PlaylistUrisRequest, SnapshotResponse, Track, TrackEntry,
    },
    warning,
};

/// Typed Spotify Web API client built on the rate-limited fetcher.
pub struct SpotifyClient {
    fetcher: Fetcher,
    api_url: String,
    market: String,
    audio_features_batch_size: usize,
    playlist_write_batch_size: usize,
}

impl SpotifyClient {
    /// Creates a client with its own backoff gate.
    pub fn new(access_token: impl Into<String>, settings: &SpotifySettings) -> Self {
        let gate = Arc::new(RateLimitGate::new(settings.throttle_poll_interval));
        Self::with_gate(access_token, settings, gate)
    }

    /// Creates a client that shares `gate` with other fetchers.
    pub fn with_gate(
        access_token: impl Into<String>,
        settings: &SpotifySettings,
        gate: Arc<RateLimitGate>,
    ) -> Self {
        Self {
            fetcher: Fetcher::new(access_token, gate),
            api_url: settings.api_url.trim_end_matches('/').to_string(),
            market: settings.market.clone(),
            audio_features_batch_size: settings.audio_features_batch_size.max(1),
            playlist_write_batch_size: settings.playlist_write_batch_size.max(1),
        }
    }

    fn playlist_tracks_url(&self, playlist_id: &str) -> String {
        format!("{}/playlists/{}/tracks", self.api_url, playlist_id)
    }

    async fn audio_features_batch(&self, ids: &[String]) -> Res<Vec<AudioFeature>> {
        let url = format!("{}/audio-features", self.api_url);
        let joined = ids.join(",");
        let response: AudioFeaturesResponse =
            self.fetcher.get(&url, &[("ids", joined.as_str())]).await?;
        Ok(response.audio_features.into_iter().flatten().collect())
    }
}

fn unwrap_entries(entries: Vec<TrackEntry>) -> Vec<Option<Track>> {
    entries.into_iter().map(|entry| entry.track.into()).collect()
}

#[async_trait]
impl Catalog for SpotifyClient {
    async fn followed_artists(&self) -> Res<Vec<Artist>> {
        let url = format!("{}/me/following", self.api_url);
        paginate(
            &self.fetcher,
            &url,
            &[("type", "artist")],
            |r: FollowedArtistsResponse| r.artists,
        )
        .await
    }

    async fn albums(&self, artist_id: &str) -> Res<Vec<Album>> {
        let url = format!("{}/artists/{}/albums", self.api_url, artist_id);
        paginate_items(&self.fetcher, &url, &[("market", self.market.as_str())]).await
    }

    async fn album_tracks(&self, album_id: &str) -> Res<Vec<Option<Track>>> {
        let url = format!("{}/albums/{}/tracks", self.api_url, album_id);
        let slots: Vec<MaybeTrack> = paginate_items(&self.fetcher, &url, &[]).await?;
        Ok(slots.into_iter().map(Into::into).collect())
    }

    async fn playlists(&self) -> Res<Vec<Playlist>> {
        let url = format!("{}/me/playlists", self.api_url);
        let playlists: Vec<Playlist> = paginate_items(&self.fetcher, &url, &[]).await?;
        info!(
            "playlists: {}",
            playlists
                .iter()
                .map(|p| p.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
        Ok(playlists)
    }

    async fn playlist_tracks(&self, playlist_id: &str) -> Res<Vec<Option<Track>>> {
        let url = self.playlist_tracks_url(playlist_id);
        let entries: Vec<TrackEntry> = paginate_items(&self.fetcher, &url, &[]).await?;
        Ok(unwrap_entries(entries))
    }

    async fn saved_tracks(&self) -> Res<Vec<Option<Track>>> {
        let url = format!("{}/me/tracks", self.api_url);
        let entries: Vec<TrackEntry> =
            paginate_items(&self.fetcher, &url, &[("limit", "50")]).await?;
        Ok(unwrap_entries(entries))
    }

    async fn audio_features(&self, track_ids: &[String]) -> Res<Vec<AudioFeature>> {
        let batches = track_ids.chunks(self.audio_features_batch_size);
        let results = join_all(batches.map(|ids| self.audio_features_batch(ids))).await;

        let mut features = Vec::with_capacity(track_ids.len());
        for (index, result) in results.into_iter().enumerate() {
            match result {
                Ok(batch) => features.extend(batch),
                Err(e) => warning!("audio feature batch {} failed, skipping it: {}", index, e),
            }
        }
        Ok(features)
    }

    async fn clear_playlist(&self, playlist_id: &str) -> Res<()> {
        let url = self.playlist_tracks_url(playlist_id);
        let empty: [String; 0] = [];
        self.fetcher
            .send_json::<Option<SnapshotResponse>, _>(
                Method::PUT,
                &url,
                &PlaylistUrisRequest { uris: &empty },
            )
            .await?;
        Ok(())
    }

    async fn append_tracks(&self, playlist_id: &str, uris: &[String]) -> Res<()> {
        let url = self.playlist_tracks_url(playlist_id);
        let batches = uris.len().div_ceil(self.playlist_write_batch_size);
        let mut written = 0;

        // Concurrent writes to one playlist reorder tracks or fail upstream.
        for (index, chunk) in uris.chunks(self.playlist_write_batch_size).enumerate() {
            self.fetcher
                .send_json::<Option<SnapshotResponse>, _>(
                    Method::POST,
                    &url,
                    &PlaylistUrisRequest { uris: chunk },
                )
                .await
                .map_err(|e| CurateError::BatchWrite {
                    batch: index + 1,
                    batches,
                    written,
                    source: Box::new(e),
                })?;
            written += chunk.len();
        }
        Ok(())
    }
}

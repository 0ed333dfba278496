#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use axum::Router;
use reqwest::StatusCode;
use stridecli::{
    CurateError, Res,
    config::{CurationSettings, SpotifySettings},
    spotify::Catalog,
    types::{Album, Artist, AudioFeature, Playlist, Track},
};

pub const ARTIST_BANLIST: &str = "artist-banlist";
pub const TRACK_BANLIST: &str = "track-banlist";
pub const RUNNING_PLAYLIST: &str = "running";
pub const LIVE_ARTIST: &str = "grateful-dead";

// Helper function to create a test track by "some artist"
pub fn make_track(id: &str) -> Track {
    Track {
        id: id.to_string(),
        name: id.to_string(),
        uri: format!("uri:{id}"),
        artists: vec![make_artist("some artist")],
        popularity: None,
        explicit: None,
    }
}

pub fn make_artist(id: &str) -> Artist {
    Artist {
        id: id.to_string(),
        name: format!("{id} name"),
    }
}

pub fn make_album(id: &str, album_type: &str) -> Album {
    Album {
        id: id.to_string(),
        name: format!("{id} name"),
        album_type: album_type.to_string(),
    }
}

pub fn make_playlist(id: &str) -> Playlist {
    Playlist {
        id: id.to_string(),
        name: format!("{id} name"),
    }
}

// A feature record that passes every check
pub fn running_feature(id: &str) -> AudioFeature {
    AudioFeature {
        id: id.to_string(),
        tempo: 180.0,
        energy: 0.9,
        valence: 0.9,
        liveness: 0.1,
    }
}

pub fn curation_settings() -> CurationSettings {
    CurationSettings {
        artist_banlist_playlist_id: ARTIST_BANLIST.to_string(),
        track_banlist_playlist_id: TRACK_BANLIST.to_string(),
        running_playlist_id: RUNNING_PLAYLIST.to_string(),
        live_allowlist_artist_ids: vec![LIVE_ARTIST.to_string()],
    }
}

pub fn spotify_settings(api_url: &str) -> SpotifySettings {
    SpotifySettings::with_api_url(api_url)
}

/// In-memory catalog that records every playlist read and write.
///
/// Ids without an explicit feature record get [`running_feature`] unless
/// `default_features` is turned off.
pub struct MockCatalog {
    pub followed_artists: Vec<Artist>,
    pub artist_albums: HashMap<String, Vec<Album>>,
    pub album_tracks: HashMap<String, Vec<Option<Track>>>,
    pub playlists: Vec<Playlist>,
    pub playlist_tracks: HashMap<String, Vec<Option<Track>>>,
    pub saved_tracks: Vec<Option<Track>>,
    pub features: HashMap<String, AudioFeature>,
    pub default_features: bool,
    pub failing_playlist: Option<String>,
    pub album_requests: Mutex<Vec<String>>,
    pub playlist_requests: Mutex<Vec<String>>,
    pub writes: Mutex<Vec<String>>,
    pub written: Mutex<Vec<String>>,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self {
            followed_artists: Vec::new(),
            artist_albums: HashMap::new(),
            album_tracks: HashMap::new(),
            playlists: Vec::new(),
            playlist_tracks: HashMap::new(),
            saved_tracks: Vec::new(),
            features: HashMap::new(),
            default_features: true,
            failing_playlist: None,
            album_requests: Mutex::new(Vec::new()),
            playlist_requests: Mutex::new(Vec::new()),
            writes: Mutex::new(Vec::new()),
            written: Mutex::new(Vec::new()),
        }
    }

    /// Adds one playlist holding `track` and returns the track.
    pub fn with_playlist_track(&mut self, playlist_id: &str, track: Track) -> Track {
        if !self.playlists.iter().any(|p| p.id == playlist_id) {
            self.playlists.push(make_playlist(playlist_id));
        }
        self.playlist_tracks
            .entry(playlist_id.to_string())
            .or_default()
            .push(Some(track.clone()));
        track
    }

    pub fn set_feature(&mut self, feature: AudioFeature) {
        self.features.insert(feature.id.clone(), feature);
    }

    pub fn written(&self) -> Vec<String> {
        self.written.lock().unwrap().clone()
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }

    pub fn playlist_requests(&self) -> Vec<String> {
        self.playlist_requests.lock().unwrap().clone()
    }
}

fn not_found(what: &str) -> CurateError {
    CurateError::Upstream {
        url: what.to_string(),
        status: StatusCode::NOT_FOUND,
        body: String::new(),
    }
}

#[async_trait]
impl Catalog for MockCatalog {
    async fn followed_artists(&self) -> Res<Vec<Artist>> {
        Ok(self.followed_artists.clone())
    }

    async fn albums(&self, artist_id: &str) -> Res<Vec<Album>> {
        Ok(self.artist_albums.get(artist_id).cloned().unwrap_or_default())
    }

    async fn album_tracks(&self, album_id: &str) -> Res<Vec<Option<Track>>> {
        self.album_requests
            .lock()
            .unwrap()
            .push(album_id.to_string());
        Ok(self.album_tracks.get(album_id).cloned().unwrap_or_default())
    }

    async fn playlists(&self) -> Res<Vec<Playlist>> {
        Ok(self.playlists.clone())
    }

    async fn playlist_tracks(&self, playlist_id: &str) -> Res<Vec<Option<Track>>> {
        if playlist_id.is_empty() {
            return Err(not_found("bad playlist id"));
        }
        self.playlist_requests
            .lock()
            .unwrap()
            .push(playlist_id.to_string());
        if self.failing_playlist.as_deref() == Some(playlist_id) {
            return Err(not_found(playlist_id));
        }
        Ok(self
            .playlist_tracks
            .get(playlist_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn saved_tracks(&self) -> Res<Vec<Option<Track>>> {
        Ok(self.saved_tracks.clone())
    }

    async fn audio_features(&self, track_ids: &[String]) -> Res<Vec<AudioFeature>> {
        Ok(track_ids
            .iter()
            .filter_map(|id| match self.features.get(id) {
                Some(feature) => Some(feature.clone()),
                None if self.default_features => Some(running_feature(id)),
                None => None,
            })
            .collect())
    }

    async fn clear_playlist(&self, playlist_id: &str) -> Res<()> {
        self.writes.lock().unwrap().push(format!("clear {playlist_id}"));
        self.written.lock().unwrap().clear();
        Ok(())
    }

    async fn append_tracks(&self, playlist_id: &str, uris: &[String]) -> Res<()> {
        self.writes
            .lock()
            .unwrap()
            .push(format!("append {playlist_id} {}", uris.len()));
        self.written.lock().unwrap().extend(uris.iter().cloned());
        Ok(())
    }
}

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// One request seen by a stub server.
#[derive(Debug, Clone)]
pub struct Hit {
    pub path: String,
    pub query: Option<String>,
    pub body: String,
    pub at: std::time::Instant,
}

#[derive(Default)]
pub struct Recorder {
    hits: Mutex<Vec<Hit>>,
}

impl Recorder {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Stores the hit and returns how many hits `path` has seen so far.
    pub fn record(&self, path: &str, query: Option<String>, body: String) -> usize {
        let mut hits = self.hits.lock().unwrap();
        hits.push(Hit {
            path: path.to_string(),
            query,
            body,
            at: std::time::Instant::now(),
        });
        hits.iter().filter(|hit| hit.path == path).count()
    }

    pub fn hits(&self) -> Vec<Hit> {
        self.hits.lock().unwrap().clone()
    }

    pub fn hits_for(&self, path: &str) -> Vec<Hit> {
        self.hits()
            .into_iter()
            .filter(|hit| hit.path == path)
            .collect()
    }
}

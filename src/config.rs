//! Configuration management for the running playlist curator.
//!
//! Settings are read from environment variables. Before that, a `.env` file in
//! the local data directory is loaded so credentials and playlist ids can live
//! outside the shell profile:
//!
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf, time::Duration};

use crate::{CurateError, Res};

pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_MARKET: &str = "US";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";

/// Ceiling of ids per audio-features lookup.
pub const AUDIO_FEATURES_BATCH_SIZE: usize = 100;

/// Ceiling of URIs per playlist append.
pub const PLAYLIST_WRITE_BATCH_SIZE: usize = 50;

pub const THROTTLE_POLL_INTERVAL_MS: u64 = 100;
pub const THROTTLE_POLL_INTERVAL: Duration = Duration::from_millis(THROTTLE_POLL_INTERVAL_MS);

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the `stridecli` directory if it doesn't exist. A missing `.env`
/// file is fine: the process environment alone may carry every setting, which
/// is how the HTTP trigger is usually deployed.
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/stridecli/.env`
/// - macOS: `~/Library/Application Support/stridecli/.env`
/// - Windows: `%LOCALAPPDATA%/stridecli/.env`
///
/// # Errors
///
/// Returns [`CurateError::Config`] if the directory cannot be created or the
/// file exists but cannot be parsed.
pub async fn load_env() -> Res<()> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| CurateError::Config(e.to_string()))?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| CurateError::Config(e.to_string()))?;
    }
    Ok(())
}

fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("stridecli/.env");
    path
}

/// Everything needed to talk to the Spotify Web API.
#[derive(Debug, Clone)]
pub struct SpotifySettings {
    pub api_url: String,
    pub token_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
    /// Market used to filter artist albums.
    pub market: String,
    pub audio_features_batch_size: usize,
    pub playlist_write_batch_size: usize,
    pub throttle_poll_interval: Duration,
}

impl SpotifySettings {
    /// Settings pointing at `api_url` with default batching and no credentials.
    ///
    /// Useful when the access token comes from somewhere else, e.g. a stub
    /// server in tests.
    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            client_id: String::new(),
            client_secret: String::new(),
            refresh_token: String::new(),
            market: DEFAULT_MARKET.to_string(),
            audio_features_batch_size: AUDIO_FEATURES_BATCH_SIZE,
            playlist_write_batch_size: PLAYLIST_WRITE_BATCH_SIZE,
            throttle_poll_interval: THROTTLE_POLL_INTERVAL,
        }
    }
}

/// Playlists and artists that steer the curation pipeline.
#[derive(Debug, Clone, Default)]
pub struct CurationSettings {
    /// Every artist on a track of this playlist is banned.
    pub artist_banlist_playlist_id: String,
    /// Every track on this playlist is banned.
    pub track_banlist_playlist_id: String,
    /// Destination playlist. Never read as a source.
    pub running_playlist_id: String,
    /// Artists whose live recordings are still acceptable.
    pub live_allowlist_artist_ids: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub spotify: SpotifySettings,
    pub curation: CurationSettings,
    pub server_address: String,
}

impl Settings {
    /// Builds settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`CurateError::Config`] naming the first missing or malformed
    /// variable.
    pub fn from_env() -> Res<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds settings from any name-to-value lookup. Blank values count as
    /// unset.
    pub fn from_lookup<F>(lookup: F) -> Res<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(lookup);
        let spotify = SpotifySettings {
            api_url: vars.optional("SPOTIFY_API_URL", DEFAULT_API_URL),
            token_url: vars.optional("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL),
            client_id: vars.required("SPOTIFY_API_AUTH_CLIENT_ID")?,
            client_secret: vars.required("SPOTIFY_API_AUTH_CLIENT_SECRET")?,
            refresh_token: vars.required("SPOTIFY_REFRESH_TOKEN")?,
            market: vars.optional("SPOTIFY_MARKET", DEFAULT_MARKET),
            audio_features_batch_size: vars
                .parsed("AUDIO_FEATURES_BATCH_SIZE", AUDIO_FEATURES_BATCH_SIZE)?,
            playlist_write_batch_size: vars
                .parsed("PLAYLIST_WRITE_BATCH_SIZE", PLAYLIST_WRITE_BATCH_SIZE)?,
            throttle_poll_interval: Duration::from_millis(
                vars.parsed("THROTTLE_POLL_INTERVAL_MS", THROTTLE_POLL_INTERVAL_MS)?,
            ),
        };

        if spotify.audio_features_batch_size == 0 || spotify.playlist_write_batch_size == 0 {
            return Err(CurateError::Config(
                "batch sizes must be greater than zero".to_string(),
            ));
        }

        let curation = CurationSettings {
            artist_banlist_playlist_id: vars.required("ARTIST_BANLIST_PLAYLIST_ID")?,
            track_banlist_playlist_id: vars.required("TRACK_BANLIST_PLAYLIST_ID")?,
            running_playlist_id: vars.required("RUNNING_PLAYLIST_ID")?,
            live_allowlist_artist_ids: parse_id_list(
                &vars.optional("LIVE_ALLOWLIST_ARTIST_IDS", ""),
            ),
        };

        Ok(Self {
            spotify,
            curation,
            server_address: vars.optional("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS),
        })
    }
}

/// Splits a comma separated id list, ignoring blanks.
pub fn parse_id_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(String::from)
        .collect()
}

struct Vars<F>(F);

impl<F: Fn(&str) -> Option<String>> Vars<F> {
    fn get(&self, name: &str) -> Option<String> {
        (self.0)(name).filter(|value| !value.trim().is_empty())
    }

    fn required(&self, name: &str) -> Res<String> {
        self.get(name)
            .ok_or_else(|| CurateError::Config(format!("{name} must be set")))
    }

    fn optional(&self, name: &str, default: &str) -> String {
        self.get(name).unwrap_or_else(|| default.to_string())
    }

    fn parsed<T: std::str::FromStr>(&self, name: &str, default: T) -> Res<T> {
        match self.get(name) {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| CurateError::Config(format!("{name} is not a valid number: {value}"))),
            None => Ok(default),
        }
    }
}

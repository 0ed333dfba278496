//! # Spotify Integration Module
//!
//! This module is the integration layer between the curator and the Spotify
//! Web API. It covers token refresh, a throttling-aware request layer,
//! pagination and the typed operations the curation pipeline needs.
//!
//! ## Architecture
//!
//! ```text
//! Curation pipeline
//!          ↓
//! Catalog trait  ←  SpotifyClient (typed operations, batching)
//!          ↓
//! Paginator (follows `next` links)
//!          ↓
//! Fetcher (bearer auth, logging, 429 handling)
//!          ↓
//! RateLimitGate (shared backoff flag)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Core Modules
//!
//! - [`rate_limit`] - One flag shared by every in-flight request. When a 429
//!   arrives, one caller sleeps out the `Retry-After` delay while every other
//!   caller polls until the flag clears. No request leaves while it is set.
//! - [`fetcher`] - Single requests. Waits on the gate, logs the URL, retries
//!   throttled requests, turns any other failure into an upstream error.
//! - [`paginator`] - Walks `{items, next}` listings into one flat vector.
//!   Extra query parameters go out with the first page only.
//! - [`client`] - [`client::SpotifyClient`], the typed façade: followed
//!   artists, albums, album tracks, playlists, playlist tracks, saved tracks,
//!   audio features (concurrent batches of 100, failed batches skipped) and
//!   playlist writes (strictly sequential batches of 50).
//! - [`catalog`] - The [`catalog::Catalog`] trait the pipeline depends on.
//! - [`auth`] - Refresh-token exchange.
//!
//! ## API Coverage
//!
//! - `GET /me/following?type=artist` - Followed artists
//! - `GET /artists/{id}/albums` - Artist albums for one market
//! - `GET /albums/{id}/tracks` - Album tracks
//! - `GET /me/playlists` - Visible playlists
//! - `GET /playlists/{id}/tracks` - Playlist tracks
//! - `GET /me/tracks` - Saved library
//! - `GET /audio-features?ids=` - Audio features
//! - `PUT /playlists/{id}/tracks` - Clear a playlist
//! - `POST /playlists/{id}/tracks` - Append to a playlist
//! - `POST /api/token` - Token refresh

pub mod auth;
pub mod catalog;
pub mod client;
pub mod fetcher;
pub mod paginator;
pub mod rate_limit;

pub use catalog::Catalog;
pub use client::SpotifyClient;
pub use rate_limit::RateLimitGate;

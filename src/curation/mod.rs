//! # Curation Module
//!
//! The pipeline that turns everything the user can see on Spotify into one
//! running playlist:
//!
//! ```text
//! followed artists → albums → album tracks ┐
//! saved library ───────────────────────────┼→ aggregate → ban filter → audio features
//! other playlists → playlist tracks ───────┘        → suitability → rank → write
//! ```
//!
//! - [`aggregate`] - Merges sources and keeps one track per song, preferring
//!   explicit versions.
//! - [`bans`] - Ban lists read from two designated playlists, and the filter.
//! - [`suitability`] - Tempo, energy, valence and liveness heuristics.
//! - [`ranking`] - Popularity plus injected noise.
//! - [`writer`] - Clears and refills the destination playlist.
//! - [`pipeline`] - Wires the stages together over a [`Catalog`].
//!
//! [`Catalog`]: crate::spotify::Catalog

pub mod aggregate;
pub mod bans;
pub mod pipeline;
pub mod ranking;
pub mod suitability;
pub mod writer;

use rand::{SeedableRng, rngs::StdRng};

use crate::{
    Res,
    config::Settings,
    spotify::{SpotifyClient, auth},
};

pub use pipeline::{CurateOptions, CurationReport, run_pipeline};

/// Refreshes the access token, then runs the pipeline against Spotify.
///
/// Authorization failures abort before any catalog request.
pub async fn curate_with_options(
    settings: &Settings,
    options: CurateOptions,
) -> Res<CurationReport> {
    let access_token = auth::refresh_access_token(&settings.spotify).await?;
    let client = SpotifyClient::new(access_token, &settings.spotify);
    let mut rng = StdRng::from_os_rng();
    run_pipeline(&client, &settings.curation, options, &mut rng).await
}

/// Rewrites the running playlist and returns how many tracks it now holds.
///
/// `test_mode` limits the followed-artist source to a single artist.
pub async fn curate(settings: &Settings, test_mode: bool) -> Res<usize> {
    let options = CurateOptions {
        test_mode,
        dry_run: false,
    };
    let report = curate_with_options(settings, options).await?;
    Ok(report.track_count())
}

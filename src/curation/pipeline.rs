use std::collections::HashMap;

use futures::{future::try_join_all, try_join};
use rand::Rng;

use crate::{
    Res,
    config::CurationSettings,
    curation::{
        aggregate::aggregate,
        bans::{filter_banned, load_ban_lists},
        ranking::{RankedTrack, rank_tracks},
        suitability::SuitabilityClassifier,
        writer,
    },
    info,
    spotify::Catalog,
    types::{AudioFeature, Track},
};

#[derive(Debug, Clone, Copy, Default)]
pub struct CurateOptions {
    /// Only read the first followed artist.
    pub test_mode: bool,
    /// Stop after ranking and leave the destination playlist alone.
    pub dry_run: bool,
}

#[derive(Debug, Clone)]
pub struct CurationReport {
    /// Surviving tracks in playlist order.
    pub ranked: Vec<RankedTrack>,
    /// Whether the destination playlist was rewritten.
    pub written: bool,
}

impl CurationReport {
    pub fn track_count(&self) -> usize {
        self.ranked.len()
    }

    pub fn uris(&self) -> Vec<String> {
        self.ranked.iter().map(|r| r.track.uri.clone()).collect()
    }
}

/// Runs one curation pass against `catalog`.
///
/// All sources and both ban playlists are read concurrently; the first error
/// from any of them aborts the run before anything is written.
pub async fn run_pipeline<R: Rng + Send>(
    catalog: &dyn Catalog,
    settings: &CurationSettings,
    options: CurateOptions,
    rng: &mut R,
) -> Res<CurationReport> {
    let (artist_tracks, saved_tracks, playlist_tracks, bans) = try_join!(
        followed_artist_tracks(catalog, options.test_mode),
        catalog.saved_tracks(),
        other_playlist_tracks(catalog, &settings.running_playlist_id),
        load_ban_lists(catalog, settings),
    )?;
    info!(
        "gathered {} artist tracks, {} saved tracks, {} playlist tracks",
        artist_tracks.len(),
        saved_tracks.len(),
        playlist_tracks.len()
    );

    let deduped = aggregate([artist_tracks, saved_tracks, playlist_tracks]);
    info!("{} tracks after deduplication", deduped.len());
    let candidates = filter_banned(deduped, &bans);
    info!("{} tracks after ban filtering", candidates.len());

    let ids: Vec<String> = candidates.iter().map(|t| t.id.clone()).collect();
    let features = catalog.audio_features(&ids).await?;
    let suitable = select_suitable(
        candidates,
        &features,
        &SuitabilityClassifier::new(settings.live_allowlist_artist_ids.iter().cloned()),
    );
    info!("{} tracks suitable for running", suitable.len());

    let ranked = rank_tracks(suitable, rng);
    let mut report = CurationReport {
        ranked,
        written: false,
    };

    if !options.dry_run {
        writer::replace(catalog, &settings.running_playlist_id, &report.uris()).await?;
        report.written = true;
    }
    Ok(report)
}

/// Keeps the tracks the classifier accepts, matching features by track id.
pub fn select_suitable(
    tracks: Vec<Track>,
    features: &[AudioFeature],
    classifier: &SuitabilityClassifier,
) -> Vec<Track> {
    let by_id: HashMap<&str, &AudioFeature> =
        features.iter().map(|f| (f.id.as_str(), f)).collect();

    tracks
        .into_iter()
        .filter(|track| classifier.is_suitable(track, by_id.get(track.id.as_str()).copied()))
        .collect()
}

async fn followed_artist_tracks(
    catalog: &dyn Catalog,
    test_mode: bool,
) -> Res<Vec<Option<Track>>> {
    let mut artists = catalog.followed_artists().await?;
    if test_mode {
        artists.truncate(1);
    }

    let albums: Vec<_> = try_join_all(artists.iter().map(|artist| catalog.albums(&artist.id)))
        .await?
        .into_iter()
        .flatten()
        .filter(|album| !album.is_compilation())
        .collect();

    let tracks = try_join_all(albums.iter().map(|album| catalog.album_tracks(&album.id))).await?;
    Ok(tracks.into_iter().flatten().collect())
}

async fn other_playlist_tracks(
    catalog: &dyn Catalog,
    running_playlist_id: &str,
) -> Res<Vec<Option<Track>>> {
    // The destination is never a source, or it would feed on itself.
    let playlists: Vec<_> = catalog
        .playlists()
        .await?
        .into_iter()
        .filter(|playlist| playlist.id != running_playlist_id)
        .collect();

    let tracks =
        try_join_all(playlists.iter().map(|playlist| catalog.playlist_tracks(&playlist.id)))
            .await?;
    Ok(tracks.into_iter().flatten().collect())
}

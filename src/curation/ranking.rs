use rand::Rng;

use crate::{info, types::Track, utils::describe_track};

/// Upper bound of the noise added to each popularity.
pub const FUZZ_RANGE: f64 = 200.0;

#[derive(Debug, Clone, PartialEq)]
pub struct RankedTrack {
    pub track: Track,
    pub score: f64,
}

/// Orders tracks by popularity plus uniform noise in `[0, 200)`, highest first.
///
/// Popular tracks tend to land near the top but any track can. Pass a seeded
/// rng to get a reproducible order.
pub fn rank_tracks<R: Rng>(tracks: Vec<Track>, rng: &mut R) -> Vec<RankedTrack> {
    let mut ranked: Vec<RankedTrack> = tracks
        .into_iter()
        .map(|track| {
            let fuzz = rng.random_range(0.0..FUZZ_RANGE);
            let score = f64::from(track.popularity_or_default()) + fuzz;
            info!(
                "{}: true pop: {:?}, fuzzed: {:.1}",
                describe_track(&track),
                track.popularity,
                score
            );
            RankedTrack { track, score }
        })
        .collect();

    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}

/// [`rank_tracks`], reduced to the URIs in playlist order.
pub fn rank<R: Rng>(tracks: Vec<Track>, rng: &mut R) -> Vec<String> {
    rank_tracks(tracks, rng)
        .into_iter()
        .map(|ranked| ranked.track.uri)
        .collect()
}

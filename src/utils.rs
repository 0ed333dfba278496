use std::collections::HashSet;

use crate::types::Track;

/// Human readable `Artist, Artist - Title` label for log lines.
pub fn describe_track(track: &Track) -> String {
    let artists = track
        .artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    format!("{} - {}", artists, track.name)
}

/// Whether any artist of `track` is in `artist_ids`.
pub fn artists_intersect<S>(track: &Track, artist_ids: &HashSet<String, S>) -> bool
where
    S: std::hash::BuildHasher,
{
    track.artists.iter().any(|a| artist_ids.contains(&a.id))
}

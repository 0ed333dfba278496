use std::collections::HashMap;

use crate::{types::Track, warning};

/// Identity of a song across albums, compilations and playlists.
///
/// Two recordings with the same title by the same lead artist count as the
/// same song, whatever their track ids are.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackIdentityKey {
    pub name: String,
    pub first_artist_id: Option<String>,
}

impl TrackIdentityKey {
    pub fn of(track: &Track) -> Self {
        Self {
            name: track.name.clone(),
            first_artist_id: track.first_artist_id().map(String::from),
        }
    }
}

/// Merges every source into one list with a single track per identity key.
///
/// Empty slots are dropped and counted in a warning. Within a group the first
/// explicit version wins; without one, the first track seen is kept. Groups
/// come out in the order their key was first seen.
pub fn aggregate<I, S>(sources: I) -> Vec<Track>
where
    I: IntoIterator<Item = S>,
    S: IntoIterator<Item = Option<Track>>,
{
    let mut positions: HashMap<TrackIdentityKey, usize> = HashMap::new();
    let mut representatives: Vec<Track> = Vec::new();
    let mut empty_slots = 0;

    for slot in sources.into_iter().flatten() {
        let Some(track) = slot else {
            empty_slots += 1;
            continue;
        };
        let key = TrackIdentityKey::of(&track);
        match positions.get(&key) {
            Some(&index) => {
                if track.is_explicit() && !representatives[index].is_explicit() {
                    representatives[index] = track;
                }
            }
            None => {
                positions.insert(key, representatives.len());
                representatives.push(track);
            }
        }
    }

    if empty_slots > 0 {
        warning!("Dropped {} empty or undecodable track entries", empty_slots);
    }
    representatives
}

use std::collections::HashSet;

use futures::try_join;

use crate::{
    Res,
    config::CurationSettings,
    curation::aggregate::TrackIdentityKey,
    info,
    spotify::Catalog,
    types::Track,
    utils::artists_intersect,
};

/// Exclusions for one curation run, read from the two ban playlists.
#[derive(Debug, Clone, Default)]
pub struct BanLists {
    artist_ids: HashSet<String>,
    track_keys: HashSet<TrackIdentityKey>,
}

impl BanLists {
    /// Every artist of every artist-ban track is banned; every track-ban track
    /// is banned by identity key.
    pub fn from_tracks<'a, A, T>(artist_ban_tracks: A, track_ban_tracks: T) -> Self
    where
        A: IntoIterator<Item = &'a Track>,
        T: IntoIterator<Item = &'a Track>,
    {
        Self {
            artist_ids: artist_ban_tracks
                .into_iter()
                .flat_map(|t| t.artists.iter().map(|a| a.id.clone()))
                .collect(),
            track_keys: track_ban_tracks
                .into_iter()
                .map(TrackIdentityKey::of)
                .collect(),
        }
    }

    pub fn banned_artist_ids(&self) -> &HashSet<String> {
        &self.artist_ids
    }

    pub fn banned_track_keys(&self) -> &HashSet<TrackIdentityKey> {
        &self.track_keys
    }

    pub fn is_banned(&self, track: &Track) -> bool {
        self.track_keys.contains(&TrackIdentityKey::of(track))
            || artists_intersect(track, &self.artist_ids)
    }
}

/// Reads both ban playlists and builds the run's [`BanLists`].
///
/// The value only exists once both playlists are fully read, so filtering can
/// never see a partial ban set.
pub async fn load_ban_lists(catalog: &dyn Catalog, settings: &CurationSettings) -> Res<BanLists> {
    let (artist_ban, track_ban) = try_join!(
        catalog.playlist_tracks(&settings.artist_banlist_playlist_id),
        catalog.playlist_tracks(&settings.track_banlist_playlist_id),
    )?;

    let bans = BanLists::from_tracks(artist_ban.iter().flatten(), track_ban.iter().flatten());
    info!(
        "ban lists loaded: {} artists, {} tracks",
        bans.artist_ids.len(),
        bans.track_keys.len()
    );
    Ok(bans)
}

/// Drops every banned track.
pub fn filter_banned(tracks: Vec<Track>, bans: &BanLists) -> Vec<Track> {
    tracks.into_iter().filter(|t| !bans.is_banned(t)).collect()
}

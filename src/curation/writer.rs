use crate::{Res, info, spotify::Catalog};

/// Replaces the contents of `playlist_id` with `uris`, in order.
///
/// The playlist is cleared first, then the URIs are appended batch by batch.
/// A failing batch surfaces as [`CurateError::BatchWrite`]; batches written
/// before it are not rolled back.
///
/// [`CurateError::BatchWrite`]: crate::CurateError::BatchWrite
pub async fn replace(catalog: &dyn Catalog, playlist_id: &str, uris: &[String]) -> Res<()> {
    info!("clearing playlist {}", playlist_id);
    catalog.clear_playlist(playlist_id).await?;
    info!("appending {} tracks to playlist {}", uris.len(), playlist_id);
    catalog.append_tracks(playlist_id, uris).await
}

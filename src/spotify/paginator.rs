use serde::de::DeserializeOwned;

use crate::{
    Res, info,
    spotify::fetcher::{Fetcher, Params},
    types::Page,
};

/// Drives the fetcher across a `next`-linked listing and collects every item.
///
/// `select` pulls the page out of each response (most endpoints return the
/// page itself, followed artists nest it under `artists`). `params` are sent
/// with the first request only: the `next` URL already carries the full query,
/// and merging the params in again would clobber its offset or cursor.
pub async fn paginate<R, T, F>(
    fetcher: &Fetcher,
    url: &str,
    params: &Params<'_>,
    select: F,
) -> Res<Vec<T>>
where
    R: DeserializeOwned,
    F: Fn(R) -> Page<T>,
{
    let mut items = Vec::new();
    let mut page = select(fetcher.get::<R>(url, params).await?);

    loop {
        items.append(&mut page.items);
        match page.next.take() {
            Some(next) => {
                info!("paging...");
                page = select(fetcher.get::<R>(&next, &[]).await?);
            }
            None => break,
        }
    }

    info!("pagination complete for {} ({} items)", url, items.len());
    Ok(items)
}

/// [`paginate`] for endpoints whose body is the page itself.
pub async fn paginate_items<T: DeserializeOwned>(
    fetcher: &Fetcher,
    url: &str,
    params: &Params<'_>,
) -> Res<Vec<T>> {
    paginate(fetcher, url, params, |page: Page<T>| page).await
}

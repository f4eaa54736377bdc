use crate::error::Result;

use async_trait::async_trait;
use log::debug;
use reqwest::Url;
use serde::Deserialize;

/// A page object returned from Spotify.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct PageObject<T> {
    items: Vec<T>,
    next: Option<String>,

    // these fields aren't actually needed but keep them around for logging purposes
    #[allow(dead_code)]
    limit: usize,
    #[allow(dead_code)]
    offset: usize,
    #[allow(dead_code)]
    total: usize,
}

impl<T> PageObject<T> {
    /// Returns the URL for the next page from this page, if there is one.
    pub(crate) fn next(&self) -> Option<&str> {
        // a page with no next reference may omit the field or carry an empty value; both mean the
        // listing is exhausted
        self.next.as_deref().filter(|next| !next.is_empty())
    }

    /// Return the items in this page while consuming the page.
    pub(crate) fn take_items(self) -> Vec<T> {
        self.items
    }
}

/// A source of pages for [collect_all_items]. The one real implementation requests them over HTTP
/// with [SpotifyClientWithSecret](crate::client::SpotifyClientWithSecret); tests substitute a fake
/// source.
#[async_trait]
pub(crate) trait PageFetcher<T> {
    async fn fetch_page(&mut self, url: Url) -> Result<PageObject<T>>;
}

/// Accumulates every item of a paged listing in arrival order, following each page's `next`
/// reference until a page doesn't carry one.
///
/// The `next` reference is opaque and already fully qualified, so it is requested exactly as
/// given. An error at any page fails the whole collection; no partial listing is returned.
pub(crate) async fn collect_all_items<T, F>(first_page_url: Url, fetcher: &mut F) -> Result<Vec<T>>
where
    T: Send,
    F: PageFetcher<T> + Send,
{
    let mut page = fetcher.fetch_page(first_page_url).await?;
    let mut items = Vec::new();

    loop {
        let next = page.next().map(str::to_owned);
        items.extend(page.take_items());

        match next {
            Some(next) => {
                // this will only fail if Spotify returns a malformed URL
                let url = Url::parse(&next)
                    .expect("failed to parse next page URL: malformed URL in Spotify response");

                debug!("Fetching next page: {url}");
                page = fetcher.fetch_page(url).await?;
            }

            None => return Ok(items),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::collections::VecDeque;

    struct FakeFetcher {
        pages: VecDeque<Result<PageObject<u32>>>,
        calls: usize,
    }

    impl FakeFetcher {
        fn new(pages: Vec<Result<PageObject<u32>>>) -> Self {
            Self {
                pages: pages.into(),
                calls: 0,
            }
        }
    }

    #[async_trait]
    impl PageFetcher<u32> for FakeFetcher {
        async fn fetch_page(&mut self, _url: Url) -> Result<PageObject<u32>> {
            self.calls += 1;
            self.pages
                .pop_front()
                .expect("fetcher called more times than there are pages")
        }
    }

    fn page(items: Vec<u32>, next: Option<&str>) -> PageObject<u32> {
        PageObject {
            items,
            next: next.map(str::to_owned),
            limit: 100,
            offset: 0,
            total: 237,
        }
    }

    fn first_page_url() -> Url {
        Url::parse("https://api.spotify.com/v1/playlists/239iOV14rR7rToh6Onkgi8/tracks?limit=100")
            .unwrap()
    }

    fn next_url(offset: u32) -> String {
        format!(
            "https://api.spotify.com/v1/playlists/239iOV14rR7rToh6Onkgi8/tracks?offset={offset}&limit=100"
        )
    }

    #[tokio::test]
    async fn follows_next_references_in_order() {
        let mut fetcher = FakeFetcher::new(vec![
            Ok(page((0..100).collect(), Some(&next_url(100)))),
            Ok(page((100..200).collect(), Some(&next_url(200)))),
            Ok(page((200..237).collect(), None)),
        ]);

        let items = collect_all_items(first_page_url(), &mut fetcher).await.unwrap();

        assert_eq!(items, (0..237).collect::<Vec<_>>());
        assert_eq!(fetcher.calls, 3);
    }

    #[tokio::test]
    async fn empty_listing_yields_empty_result_with_no_followups() {
        let mut fetcher = FakeFetcher::new(vec![Ok(page(Vec::new(), None))]);

        let items = collect_all_items(first_page_url(), &mut fetcher).await.unwrap();

        assert!(items.is_empty());
        assert_eq!(fetcher.calls, 1);
    }

    #[tokio::test]
    async fn empty_next_reference_ends_the_listing() {
        let mut fetcher = FakeFetcher::new(vec![Ok(page(vec![1, 2, 3], Some("")))]);

        let items = collect_all_items(first_page_url(), &mut fetcher).await.unwrap();

        assert_eq!(items, vec![1, 2, 3]);
        assert_eq!(fetcher.calls, 1);
    }

    #[tokio::test]
    async fn error_on_any_page_fails_the_whole_collection() {
        let mut fetcher = FakeFetcher::new(vec![
            Ok(page((0..100).collect(), Some(&next_url(100)))),
            Err(Error::UnhandledSpotifyError(500, "server error".to_string())),
        ]);

        let result = collect_all_items(first_page_url(), &mut fetcher).await;

        assert!(matches!(result, Err(Error::UnhandledSpotifyError(500, _))));
        assert_eq!(fetcher.calls, 2);
    }
}

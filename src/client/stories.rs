//! Top-story aggregation: ranked id list, pagination, parallel fan-out
//!
//! Only the initial id-list fetch is allowed to fail an operation; every
//! per-item failure inside the fan-out is recovered locally by dropping the
//! item. Page and limit are clamped instead of trusting the caller.

use futures::future::join_all;
use tracing::{debug, info};

use super::HnClient;
use crate::error::{Error, Result};
use crate::models::{PaginatedStories, RawItem, Story};

impl HnClient {
    /// Fetch the full ranked top-story id list
    ///
    /// # Errors
    ///
    /// Returns `Error::StoryIdsUnavailable` when the list fetch fails; the
    /// caller performs no item fetches in that case.
    pub async fn fetch_top_story_ids(&self) -> Result<Vec<u64>> {
        self.get_json::<Vec<u64>>("topstories.json")
            .await
            .map_err(Error::StoryIdsUnavailable)
    }

    /// Fetch the top stories, sorted by descending score
    ///
    /// Takes the first `top_stories_limit` ids (default 20), fan-out fetches
    /// them in parallel, and drops anything deleted, dead, or malformed.
    ///
    /// # Errors
    ///
    /// Returns `Error::StoryIdsUnavailable` when the id-list fetch fails.
    pub async fn fetch_top_stories(&self) -> Result<Vec<Story>> {
        let ids = self.fetch_top_story_ids().await?;
        let take = ids.len().min(self.config.top_stories_limit);

        let stories = self.fetch_stories(&ids[..take]).await;
        info!(requested = take, returned = stories.len(), "fetched top stories");

        Ok(stories)
    }

    /// Fetch one page of the top-story list with pagination metadata
    ///
    /// `page` is clamped to at least 1 and `limit` to `1..=max_page_size`.
    /// An out-of-range page yields an empty page, not an error.
    ///
    /// # Errors
    ///
    /// Returns `Error::StoryIdsUnavailable` when the id-list fetch fails.
    pub async fn fetch_paged_top_stories(
        &self,
        page: usize,
        limit: usize,
    ) -> Result<PaginatedStories> {
        let page = page.max(1);
        let limit = limit.clamp(1, self.config.max_page_size);

        let ids = self.fetch_top_story_ids().await?;
        let total = ids.len();
        let (start, end, total_pages) = page_bounds(total, page, limit);

        debug!(page, limit, total, start, end, "resolving story page");
        let stories = self.fetch_stories(&ids[start..end]).await;

        Ok(PaginatedStories {
            stories,
            page,
            limit,
            total,
            total_pages,
        })
    }

    /// Fan-out fetch a slice of story ids, filter, and sort by score
    ///
    /// `join_all` preserves id-list order, and the sort is stable, so equal
    /// scores keep their arrival order.
    async fn fetch_stories(&self, ids: &[u64]) -> Vec<Story> {
        let fetches = ids.iter().map(|id| self.fetch_item(*id));

        let mut stories: Vec<Story> = join_all(fetches)
            .await
            .into_iter()
            .flatten()
            .filter_map(RawItem::into_story)
            .collect();

        stories.sort_by(|a, b| b.score.cmp(&a.score));
        stories
    }
}

/// Compute the id-slice bounds and page count for one page
///
/// Expects `page >= 1` and `limit >= 1`; an out-of-range page collapses to
/// an empty `start..end` range.
fn page_bounds(total: usize, page: usize, limit: usize) -> (usize, usize, usize) {
    let total_pages = total.div_ceil(limit);
    let start = (page - 1).saturating_mul(limit).min(total);
    let end = (start + limit).min(total);
    (start, end, total_pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_page_bounds_scenarios() {
        // 30 ids, limit 20: page 1 holds 20, two pages total
        assert_eq!(page_bounds(30, 1, 20), (0, 20, 2));
        // 45 ids, page 3 of 20: the last 5 ids
        assert_eq!(page_bounds(45, 3, 20), (40, 45, 3));
        // 10 ids, page 2 of 20: empty page, one page total
        assert_eq!(page_bounds(10, 2, 20), (10, 10, 1));
    }

    #[test]
    fn test_page_bounds_empty_list() {
        assert_eq!(page_bounds(0, 1, 20), (0, 0, 0));
    }

    proptest! {
        #[test]
        fn prop_page_bounds_invariants(
            total in 0usize..10_000,
            page in 1usize..200,
            limit in 1usize..100,
        ) {
            let (start, end, total_pages) = page_bounds(total, page, limit);

            // Slice stays in range and never exceeds the limit
            prop_assert!(start <= end);
            prop_assert!(end <= total);
            prop_assert!(end - start <= limit);

            // ceil arithmetic
            prop_assert_eq!(total_pages, total.div_ceil(limit));

            // In-range pages are full except possibly the last
            if page <= total_pages {
                prop_assert_eq!(start, (page - 1) * limit);
                if page < total_pages {
                    prop_assert_eq!(end - start, limit);
                }
            } else {
                prop_assert_eq!(start, end);
            }
        }
    }
}

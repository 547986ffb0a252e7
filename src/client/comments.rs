//! Comment resolution: shallow one-level fetches and bounded recursion
//!
//! Both modes filter deleted/dead nodes and recover per-item failures
//! locally. The recursive resolver early-exits once the depth bound is
//! reached, which bounds the fan-out tree to branching-factor^depth
//! requests; id lists are additionally truncated to `max_ids_per_request`.

use futures::future::{join_all, BoxFuture};
use futures::FutureExt;
use tracing::debug;

use super::HnClient;
use crate::models::{Comment, RawItem};

impl HnClient {
    /// Fetch one level of comments for a list of ids
    ///
    /// Children are left as unresolved ids for a later request. The id list
    /// is truncated to the configured cap.
    pub async fn fetch_comments(&self, ids: &[u64]) -> Vec<Comment> {
        let ids = self.cap_ids(ids);
        if ids.is_empty() {
            return Vec::new();
        }

        let fetches = ids.iter().map(|id| self.fetch_item(*id));

        join_all(fetches)
            .await
            .into_iter()
            .flatten()
            .filter_map(RawItem::into_comment)
            .collect()
    }

    /// Fetch the top-level comments of a story
    ///
    /// Returns `None` when the story itself does not exist (or is deleted),
    /// and an empty list when it exists but has no comments.
    pub async fn fetch_story_comments(&self, story_id: u64) -> Option<Vec<Comment>> {
        let story = self.fetch_item(story_id).await?;
        if story.is_filtered() {
            return None;
        }

        let kids = story.kids.unwrap_or_default();
        if kids.is_empty() {
            return Some(Vec::new());
        }

        Some(self.fetch_comments(&kids).await)
    }

    /// Recursively resolve a comment id list into nested trees
    ///
    /// `max_depth` is clamped to `1..=max_comment_depth`. The depth counter
    /// starts at 0; children are only recursed while the next level is still
    /// inside the bound, otherwise they stay unresolved.
    pub async fn fetch_nested_comments(&self, ids: &[u64], max_depth: u32) -> Vec<Comment> {
        let max_depth = max_depth.clamp(1, self.config.max_comment_depth);
        let ids = self.cap_ids(ids).to_vec();

        debug!(roots = ids.len(), max_depth, "resolving nested comments");
        self.resolve_level(ids, max_depth, 0).await
    }

    /// Resolve one level of the tree; recursion via boxed future
    ///
    /// A call whose depth has reached the bound returns empty without
    /// issuing any fetches.
    fn resolve_level(
        &self,
        ids: Vec<u64>,
        max_depth: u32,
        depth: u32,
    ) -> BoxFuture<'_, Vec<Comment>> {
        async move {
            if depth >= max_depth || ids.is_empty() {
                return Vec::new();
            }

            let fetches = ids.into_iter().map(|id| async move {
                let raw = self.fetch_item(id).await?;
                if raw.is_filtered() {
                    return None;
                }

                let kid_ids = raw.kids.clone().unwrap_or_default();
                let children = if !kid_ids.is_empty() && depth < max_depth - 1 {
                    self.resolve_level(kid_ids, max_depth, depth + 1).await
                } else {
                    Vec::new()
                };

                raw.into_comment_with_children(children)
            });

            join_all(fetches).await.into_iter().flatten().collect()
        }
        .boxed()
    }
}

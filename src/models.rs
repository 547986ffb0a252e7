//! Core data structures for the Hacker News aggregation proxy
//!
//! The upstream API returns loosely-typed item records; [`RawItem`] mirrors
//! that shape permissively, and conversion into [`Story`] or [`Comment`]
//! enforces the required-field and deleted/dead invariants. A record that
//! fails conversion is simply dropped from aggregator output.

use serde::{Deserialize, Serialize};

/// A Hacker News story as served by the proxy
///
/// Only emitted when the upstream record has an id, title, and author and is
/// not flagged deleted or dead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Story {
    pub id: u64,

    pub title: String,

    /// Upstream score; absent scores are treated as 0 for sorting
    #[serde(default)]
    pub score: i64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Author handle
    pub by: String,

    /// Self-post body, raw HTML from upstream
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Ordered child comment ids
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kids: Option<Vec<u64>>,

    /// Post timestamp, unix seconds
    #[serde(default)]
    pub time: i64,
}

/// A comment node, shallow or recursively resolved
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    pub id: u64,

    /// Author handle; upstream omits it on some records
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by: Option<String>,

    /// Comment body, raw HTML from upstream
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Comment timestamp, unix seconds
    #[serde(default)]
    pub time: i64,

    /// Children: unresolved ids (shallow) or resolved records (nested)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kids: Option<CommentChildren>,
}

/// Children of a comment, either lazy ids or eagerly resolved subtrees
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum CommentChildren {
    Ids(Vec<u64>),
    Resolved(Vec<Comment>),
}

/// A Hacker News user profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    /// Username, the upstream primary key
    pub id: String,

    #[serde(default)]
    pub karma: i64,

    /// Account creation timestamp, unix seconds
    #[serde(default)]
    pub created: i64,
}

/// One page of top stories plus pagination metadata
///
/// Derived per request, never stored. `total_pages` is always
/// `ceil(total / limit)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedStories {
    pub stories: Vec<Story>,
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    #[serde(rename = "totalPages")]
    pub total_pages: usize,
}

/// Best-effort Open Graph scrape result for an external URL
///
/// Every field is optional; an absent field is not an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PreviewData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Permissive mirror of an upstream item record
///
/// Everything except the id is optional so that partial or malformed records
/// deserialize cleanly and get filtered during conversion instead of failing
/// a whole fan-out batch.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawItem {
    pub id: u64,

    #[serde(rename = "type")]
    pub item_type: Option<String>,

    pub by: Option<String>,
    pub title: Option<String>,
    pub score: Option<i64>,
    pub url: Option<String>,
    pub text: Option<String>,
    pub time: Option<i64>,
    pub kids: Option<Vec<u64>>,

    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub dead: bool,
}

impl RawItem {
    /// True when the record is flagged deleted or dead upstream
    pub fn is_filtered(&self) -> bool {
        self.deleted || self.dead
    }

    /// Convert into a [`Story`], enforcing the story invariants
    ///
    /// Returns `None` for deleted/dead records or records missing the
    /// required title or author.
    pub fn into_story(self) -> Option<Story> {
        if self.is_filtered() {
            return None;
        }

        let title = self.title?;
        let by = self.by?;

        Some(Story {
            id: self.id,
            title,
            score: self.score.unwrap_or(0),
            url: self.url,
            by,
            text: self.text,
            kids: self.kids,
            time: self.time.unwrap_or(0),
        })
    }

    /// Convert into a shallow [`Comment`], children left as unresolved ids
    pub fn into_comment(self) -> Option<Comment> {
        if self.is_filtered() {
            return None;
        }

        Some(Comment {
            id: self.id,
            by: self.by,
            text: self.text,
            time: self.time.unwrap_or(0),
            kids: self.kids.filter(|k| !k.is_empty()).map(CommentChildren::Ids),
        })
    }

    /// Convert into a [`Comment`] with an already-resolved subtree attached
    pub fn into_comment_with_children(self, children: Vec<Comment>) -> Option<Comment> {
        if self.is_filtered() {
            return None;
        }

        Some(Comment {
            id: self.id,
            by: self.by,
            text: self.text,
            time: self.time.unwrap_or(0),
            kids: if children.is_empty() {
                None
            } else {
                Some(CommentChildren::Resolved(children))
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_story() -> RawItem {
        RawItem {
            id: 1,
            item_type: Some("story".to_string()),
            by: Some("pg".to_string()),
            title: Some("Announcing Arc".to_string()),
            score: Some(444),
            url: Some("https://example.com".to_string()),
            time: Some(1_200_000_000),
            ..Default::default()
        }
    }

    #[test]
    fn test_story_conversion() {
        let story = raw_story().into_story().unwrap();
        assert_eq!(story.id, 1);
        assert_eq!(story.by, "pg");
        assert_eq!(story.score, 444);
    }

    #[test]
    fn test_story_missing_title_is_dropped() {
        let mut raw = raw_story();
        raw.title = None;
        assert!(raw.into_story().is_none());
    }

    #[test]
    fn test_story_missing_author_is_dropped() {
        let mut raw = raw_story();
        raw.by = None;
        assert!(raw.into_story().is_none());
    }

    #[test]
    fn test_deleted_story_is_dropped() {
        let mut raw = raw_story();
        raw.deleted = true;
        assert!(raw.into_story().is_none());
    }

    #[test]
    fn test_dead_story_is_dropped() {
        let mut raw = raw_story();
        raw.dead = true;
        assert!(raw.into_story().is_none());
    }

    #[test]
    fn test_absent_score_defaults_to_zero() {
        let mut raw = raw_story();
        raw.score = None;
        assert_eq!(raw.into_story().unwrap().score, 0);
    }

    #[test]
    fn test_comment_needs_only_id() {
        let raw = RawItem {
            id: 7,
            ..Default::default()
        };
        let comment = raw.into_comment().unwrap();
        assert_eq!(comment.id, 7);
        assert!(comment.by.is_none());
        assert!(comment.kids.is_none());
    }

    #[test]
    fn test_comment_keeps_kid_ids_unresolved() {
        let raw = RawItem {
            id: 7,
            kids: Some(vec![8, 9]),
            ..Default::default()
        };
        let comment = raw.into_comment().unwrap();
        assert_eq!(comment.kids, Some(CommentChildren::Ids(vec![8, 9])));
    }

    #[test]
    fn test_dead_comment_is_dropped() {
        let raw = RawItem {
            id: 7,
            dead: true,
            ..Default::default()
        };
        assert!(raw.into_comment().is_none());
    }

    #[test]
    fn test_resolved_children_serialize_as_objects() {
        let child = RawItem {
            id: 9,
            by: Some("dang".to_string()),
            text: Some("nested".to_string()),
            ..Default::default()
        }
        .into_comment()
        .unwrap();

        let parent = RawItem {
            id: 8,
            by: Some("tptacek".to_string()),
            ..Default::default()
        }
        .into_comment_with_children(vec![child])
        .unwrap();

        let json = serde_json::to_value(&parent).unwrap();
        assert_eq!(json["kids"][0]["id"], 9);
        assert_eq!(json["kids"][0]["text"], "nested");
    }

    #[test]
    fn test_raw_item_tolerates_partial_records() {
        let raw: RawItem = serde_json::from_str(r#"{"id": 42}"#).unwrap();
        assert_eq!(raw.id, 42);
        assert!(!raw.is_filtered());
    }

    #[test]
    fn test_paginated_stories_serializes_total_pages_camel_case() {
        let page = PaginatedStories {
            stories: vec![],
            page: 1,
            limit: 20,
            total: 45,
            total_pages: 3,
        };
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["totalPages"], 3);
    }
}

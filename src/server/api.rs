//! REST API handlers for the proxy server
//!
//! Each handler calls exactly one aggregator operation. Upstream failures
//! map to 502, missing records to 404, a missing preview URL to 400, and
//! everything unexpected to 500; a missing or unparsable `ids` parameter
//! degrades to an empty result instead of an error.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Error;
use crate::models::Comment;

use super::server::AppState;

// ============================================================================
// API Response Types
// ============================================================================

/// Simple error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// Comment list response
#[derive(Debug, Serialize)]
pub struct CommentsResponse {
    pub comments: Vec<Comment>,
}

/// Top-story list response
#[derive(Debug, Serialize)]
pub struct StoriesResponse {
    pub stories: Vec<crate::models::Story>,
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Pagination query; values are parsed leniently so malformed input falls
/// back to the defaults instead of erroring
#[derive(Debug, Deserialize, Default)]
pub struct StoriesQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Nested comment query
#[derive(Debug, Deserialize, Default)]
pub struct NestedQuery {
    pub ids: Option<String>,
    #[serde(rename = "maxDepth")]
    pub max_depth: Option<String>,
}

/// Preview query
#[derive(Debug, Deserialize, Default)]
pub struct PreviewQuery {
    pub url: Option<String>,
}

// ============================================================================
// API Routes
// ============================================================================

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/stories", get(get_paged_stories))
        .route("/api/stories/top", get(get_top_stories))
        .route("/api/comments/nested", get(get_nested_comments))
        .route("/api/comments/{story_id}", get(get_story_comments))
        .route("/api/users/{username}", get(get_user))
        .route("/api/preview", get(get_preview))
        .with_state(state)
}

/// Map an aggregation error to its HTTP status
fn status_for(err: &Error) -> StatusCode {
    match err {
        Error::StoryIdsUnavailable(_) | Error::UserUnavailable(_) => StatusCode::BAD_GATEWAY,
        Error::UserNotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(err: Error) -> Response {
    let status = status_for(&err);
    warn!(status = %status, error = %err, "request failed");
    (status, Json(ErrorResponse::new(err.to_string()))).into_response()
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// One page of the top-story list with pagination metadata
async fn get_paged_stories(
    State(state): State<AppState>,
    Query(query): Query<StoriesQuery>,
) -> Response {
    let page = query.page.and_then(|p| p.parse().ok()).unwrap_or(1);
    let limit = query
        .limit
        .and_then(|l| l.parse().ok())
        .unwrap_or(state.config.upstream.default_page_size);

    match state.hn.fetch_paged_top_stories(page, limit).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Top stories convenience view (first page, score-sorted)
async fn get_top_stories(State(state): State<AppState>) -> Response {
    match state.hn.fetch_top_stories().await {
        Ok(stories) => (StatusCode::OK, Json(StoriesResponse { stories })).into_response(),
        Err(e) => error_response(e),
    }
}

/// One level of comments for a story's direct children
async fn get_story_comments(
    State(state): State<AppState>,
    Path(story_id): Path<u64>,
) -> Response {
    match state.hn.fetch_story_comments(story_id).await {
        Some(comments) => (StatusCode::OK, Json(CommentsResponse { comments })).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("Story not found")),
        )
            .into_response(),
    }
}

/// Recursive comment resolution for a comma-separated id list
///
/// A missing, empty, or wholly unparsable `ids` parameter yields an empty
/// comment list so the UI degrades gracefully.
async fn get_nested_comments(
    State(state): State<AppState>,
    Query(query): Query<NestedQuery>,
) -> Response {
    let ids: Vec<u64> = query
        .ids
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .filter_map(|id| id.trim().parse().ok())
        .collect();

    if ids.is_empty() {
        return (
            StatusCode::OK,
            Json(CommentsResponse { comments: vec![] }),
        )
            .into_response();
    }

    let max_depth = query
        .max_depth
        .and_then(|d| d.parse().ok())
        .unwrap_or(state.config.upstream.default_comment_depth);

    let comments = state.hn.fetch_nested_comments(&ids, max_depth).await;
    (StatusCode::OK, Json(CommentsResponse { comments })).into_response()
}

/// User profile lookup
async fn get_user(State(state): State<AppState>, Path(username): Path<String>) -> Response {
    match state.hn.fetch_user(&username).await {
        Ok(user) => (StatusCode::OK, Json(user)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Open Graph preview for an external URL
async fn get_preview(
    State(state): State<AppState>,
    Query(query): Query<PreviewQuery>,
) -> Response {
    let Some(url) = query.url.filter(|u| !u.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Missing url parameter")),
        )
            .into_response();
    };

    match state.preview.fetch_preview(&url).await {
        Ok(preview) => (StatusCode::OK, Json(preview)).into_response(),
        Err(e) => error_response(Error::Preview(e)),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FetchError, PreviewError};

    #[test]
    fn test_error_response_body() {
        let response = ErrorResponse::new("test error");
        assert_eq!(response.error, "test error");
    }

    #[test]
    fn test_status_mapping() {
        let err = Error::StoryIdsUnavailable(FetchError::Status(500));
        assert_eq!(status_for(&err), StatusCode::BAD_GATEWAY);

        let err = Error::UserUnavailable(FetchError::Timeout);
        assert_eq!(status_for(&err), StatusCode::BAD_GATEWAY);

        let err = Error::UserNotFound("nobody".to_string());
        assert_eq!(status_for(&err), StatusCode::NOT_FOUND);

        let err = Error::Preview(PreviewError::Timeout);
        assert_eq!(status_for(&err), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

//! Single item and user fetches
//!
//! Items use the null-on-failure policy: any transport error, non-success
//! status, or `null`/malformed body becomes `None` so one bad record never
//! fails a fan-out batch. The user fetch is the exception; it backs a
//! dedicated endpoint and surfaces a typed error instead.

use tracing::debug;

use super::HnClient;
use crate::error::{Error, Result};
use crate::models::{RawItem, User};

impl HnClient {
    /// Fetch a single upstream item by id
    ///
    /// Returns `None` on any failure: transport error, non-success status,
    /// a JSON `null` body (unknown id), or an unparsable record.
    pub async fn fetch_item(&self, id: u64) -> Option<RawItem> {
        match self.get_json::<Option<RawItem>>(&format!("item/{id}.json")).await {
            Ok(item) => item,
            Err(e) => {
                debug!(id = %id, error = %e, "item fetch failed, skipping");
                None
            }
        }
    }

    /// Fetch a user profile by username
    ///
    /// # Errors
    ///
    /// Returns `Error::UserUnavailable` when the upstream fetch fails and
    /// `Error::UserNotFound` when upstream answers with a JSON `null`.
    pub async fn fetch_user(&self, username: &str) -> Result<User> {
        let user = self
            .get_json::<Option<User>>(&format!("user/{username}.json"))
            .await
            .map_err(Error::UserUnavailable)?;

        user.ok_or_else(|| Error::UserNotFound(username.to_string()))
    }
}

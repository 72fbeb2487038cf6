//! # User lookup and follow responses
//!
//! The backend keys users by integer ids and returns them as JSON numbers,
//! while older endpoints and fixtures use strings. Every id field here goes
//! through [`session::token::lenient_id`] and surfaces as a `String`, so the
//! client never has to care which form it received.
//!
//! | Struct | Endpoint |
//! |--------|----------|
//! | [`UserIdResponse`] | `GET /user/id/username<name>` |
//! | [`FollowingResponse`] | `GET /user/<id>/following` |
//! | [`FollowResponse`] | `POST` / `DELETE /user/follow/<id>` |

use serde::{Deserialize, Deserializer, Serialize};
use session::token::lenient_id;

/// Result of a username lookup. `user_id` is `None` when no such
/// user exists; that is a normal answer, not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdResponse {
    #[serde(default, deserialize_with = "lenient_id")]
    pub user_id: Option<String>,
}

/// Ids of the users a user follows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowingResponse {
    #[serde(default, deserialize_with = "lenient_ids")]
    pub following_arr: Vec<String>,
}

/// Body of a follow or unfollow call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FollowResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub msg: Option<String>,
}

/// A list of ids given as strings or numbers. Other entries are dropped.
pub(crate) fn lenient_ids<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?;
    Ok(values
        .unwrap_or_default()
        .into_iter()
        .filter_map(|v| match v {
            serde_json::Value::String(s) => Some(s),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .collect())
}

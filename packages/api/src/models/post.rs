//! # Post bodies and the two-stage post listing
//!
//! Listing a user's posts takes two calls. The first returns the ordered id
//! sequence ([`PostIdsResponse`]); the second returns the bodies for a batch
//! of ids as a map ([`PostsResponse`]). Maps carry no order, so
//! [`PostsResponse::in_order`] projects the bodies back onto the id sequence.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

use super::user::lenient_ids;

/// A post as served by the backend. Read-only on the client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(default)]
    pub upload_date: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default, deserialize_with = "lenient_tags")]
    pub tags: Vec<String>,
    /// Fields the client doesn't model, kept as received.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Post {
    /// Upload date as shown under a post, or `None` when it can't be parsed.
    pub fn display_date(&self) -> Option<String> {
        crate::date::format_date_str(self.upload_date.as_deref()?)
    }
}

/// Ordered ids of a user's posts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostIdsResponse {
    #[serde(default, deserialize_with = "lenient_ids")]
    pub post_id_arr: Vec<String>,
}

/// Post bodies keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostsResponse {
    #[serde(default)]
    pub posts: HashMap<String, Post>,
}

impl PostsResponse {
    /// Bodies in the order of `ids`, skipping ids the response left out.
    pub fn in_order(&self, ids: &[String]) -> Vec<Post> {
        ids.iter().filter_map(|id| self.posts.get(id).cloned()).collect()
    }
}

/// Tags as a list, or a lone string treated as one tag.
fn lenient_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::Array(items)) => items
            .into_iter()
            .filter_map(|v| match v {
                serde_json::Value::String(s) => Some(s),
                serde_json::Value::Null => None,
                other => Some(other.to_string()),
            })
            .collect(),
        Some(serde_json::Value::String(s)) if !s.is_empty() => vec![s],
        _ => Vec::new(),
    })
}

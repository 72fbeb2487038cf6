//! Wire models for the backend's JSON responses.

mod post;
mod user;

pub use post::{Post, PostIdsResponse, PostsResponse};
pub use user::{FollowResponse, FollowingResponse, UserIdResponse};

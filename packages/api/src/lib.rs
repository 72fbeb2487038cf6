//! # API crate: HTTP access to the profile backend
//!
//! Everything the profile page needs from the backend lives here: the
//! request paths, the response shapes, and the date formatting applied to
//! post upload dates.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | `client` | [`ProfileApi`] trait and its `reqwest` implementation [`ApiClient`] |
//! | [`date`] | `"<Month> <n>, <Year>"` upload-date formatting |
//! | `error` | [`ApiError`] |
//! | [`models`] | JSON bodies: post ids, post maps, user-id lookups, follow lists |

mod client;
pub mod date;
mod error;
pub mod models;

pub use client::{ApiClient, ProfileApi};
pub use error::ApiError;
pub use models::{Post, PostsResponse};

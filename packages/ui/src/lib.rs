//! This crate contains all shared UI for the workspace: the profile page
//! component and the controller behind it.

pub mod platform;
pub use platform::{load_config, make_session};

mod user_page;
pub use user_page::{
    FollowButton, PageError, PagePhase, PageState, PostSummary, UserPageController, UserPageView,
};

pub mod views;
pub use views::{NoUserPage, PostCard, UserPage};

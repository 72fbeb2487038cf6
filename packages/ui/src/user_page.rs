//! # Profile page controller
//!
//! [`UserPageController`] owns the state of one `/user/:username` page and
//! drives it through the loading pipeline:
//!
//! ```text
//! Init ──▶ ResolvingUserId ──┬──▶ NotFound
//!                            └──▶ LoadingPosts ──▶ Loaded
//! ```
//!
//! 1. **Init**: read the access token from the injected [`Session`] and
//!    decode it best-effort to learn who the viewer is.
//! 2. **ResolvingUserId**: look the page's username up. No id means the user
//!    doesn't exist, which ends the load as `NotFound`.
//! 3. **LoadingPosts**: fetch the post id sequence, then (only if it is
//!    non-empty) the bodies, projected back into id order.
//!
//! [`resolve`](UserPageController::resolve) runs the first two stages and
//! [`load_posts`](UserPageController::load_posts) the third, so a caller can
//! render between them; [`load`](UserPageController::load) runs both.
//!
//! Each stage commits its result to [`PageState`] only once its request has
//! completed. A rejected request records an alert and stops the pipeline
//! without reaching `Loaded`. Cancellation drops the in-flight request and
//! returns without writing anything.
//!
//! The controller has no UI dependency. The `UserPage` component runs it and
//! renders [`UserPageController::view`].

use std::future::Future;

use api::{ApiError, Post, ProfileApi};
use session::token::{self, Claims};
use session::{Session, SessionStore};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Where the page is in its loading pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PagePhase {
    #[default]
    Init,
    ResolvingUserId,
    NotFound,
    LoadingPosts,
    Loaded,
}

/// Everything the page knows. Owned and mutated only by its controller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageState {
    pub phase: PagePhase,
    /// Decoded viewer claims; `None` when signed out or the token is malformed.
    pub viewer: Option<Claims>,
    pub is_loaded: bool,
    /// Posts in id-sequence order.
    pub posts: Vec<Post>,
    pub target_user_id: Option<String>,
    /// Message of the last rejected request.
    pub alert: Option<String>,
    /// Whether the viewer follows this profile; `None` until asked.
    pub followed_by_viewer: Option<bool>,
    /// A follow or unfollow request is in flight.
    pub follow_pending: bool,
}

/// Why a controller operation stopped early.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("page load cancelled")]
    Cancelled,
}

/// One post as the page renders it.
#[derive(Debug, Clone, PartialEq)]
pub struct PostSummary {
    pub username: String,
    /// Formatted upload date, empty when the backend's date didn't parse.
    pub date: String,
    pub content: String,
    pub tags: Vec<String>,
}

/// What to render for the current state.
#[derive(Debug, Clone, PartialEq)]
pub enum UserPageView {
    /// No user id resolved. `alert` is set when the lookup itself failed.
    NotFound { alert: Option<String> },
    Profile {
        username: String,
        posts: Vec<PostSummary>,
        show_editor: bool,
        loading: bool,
        alert: Option<String>,
        /// `Some` when the viewer may follow or unfollow this profile.
        following: Option<FollowButton>,
    },
}

/// Follow control state for a signed-in viewer on someone else's profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowButton {
    Unknown,
    Follow,
    Unfollow,
    Pending,
}

#[derive(Clone)]
pub struct UserPageController<A, S: SessionStore> {
    api: A,
    session: Session<S>,
    username: String,
    access_token: Option<String>,
    state: PageState,
}

impl<A: ProfileApi, S: SessionStore> UserPageController<A, S> {
    pub fn new(api: A, session: Session<S>, username: impl Into<String>) -> Self {
        Self {
            api,
            session,
            username: username.into(),
            access_token: None,
            state: PageState::default(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    /// Run the whole loading pipeline once.
    ///
    /// `Ok` covers both `Loaded` and `NotFound`. On `Err(PageError::Api)` the
    /// alert is already recorded in the state.
    pub async fn load(&mut self, cancel: &CancellationToken) -> Result<(), PageError> {
        if self.resolve(cancel).await? {
            self.load_posts(cancel).await?;
        }
        Ok(())
    }

    /// Read the viewer and resolve the page's username.
    ///
    /// Returns `Ok(false)` when the user doesn't exist; the page is then
    /// loaded and `NotFound`.
    pub async fn resolve(&mut self, cancel: &CancellationToken) -> Result<bool, PageError> {
        // Init
        let access_token = until_cancelled(cancel, self.session.access_token()).await?;
        let viewer = token::viewer_claims(access_token.as_deref());
        if access_token.is_some() && viewer.is_none() {
            debug!("ignoring malformed access token");
        }
        self.access_token = access_token;
        self.state.viewer = viewer;
        self.state.phase = PagePhase::ResolvingUserId;

        // ResolvingUserId
        info!(username = %self.username, "resolving user id");
        let lookup = until_cancelled(cancel, self.api.user_id_by_username(&self.username)).await?;
        let user_id = match lookup {
            Ok(id) => id,
            Err(e) => return Err(self.reject("user lookup", e)),
        };
        let Some(user_id) = user_id else {
            info!(username = %self.username, "no such user");
            self.state.phase = PagePhase::NotFound;
            self.state.is_loaded = true;
            return Ok(false);
        };
        self.state.target_user_id = Some(user_id);
        self.state.phase = PagePhase::LoadingPosts;
        Ok(true)
    }

    /// Fetch the resolved user's posts. Does nothing before a user id is
    /// resolved.
    pub async fn load_posts(&mut self, cancel: &CancellationToken) -> Result<(), PageError> {
        if self.state.phase != PagePhase::LoadingPosts {
            return Ok(());
        }
        let token = self.access_token.as_deref();
        let fetched = until_cancelled(cancel, self.api.post_ids(&self.username, token)).await?;
        let ids = match fetched {
            Ok(ids) => ids,
            Err(e) => return Err(self.reject("post id lookup", e)),
        };
        if ids.is_empty() {
            debug!(username = %self.username, "user has no posts");
            self.finish(Vec::new());
            return Ok(());
        }

        let token = self.access_token.as_deref();
        let fetched = until_cancelled(cancel, self.api.posts(&ids, token)).await?;
        let bodies = match fetched {
            Ok(bodies) => bodies,
            Err(e) => return Err(self.reject("post fetch", e)),
        };
        let posts = bodies.in_order(&ids);
        if posts.len() < ids.len() {
            debug!(requested = ids.len(), received = posts.len(), "response omitted some posts");
        }
        self.finish(posts);
        Ok(())
    }

    /// Ask the backend whether the viewer follows this profile.
    ///
    /// Returns `Ok(None)` without a request when there is nothing to ask: the
    /// page has no resolved user, the viewer is signed out or expired, or the
    /// viewer is looking at their own profile.
    pub async fn load_follow_state(
        &mut self,
        cancel: &CancellationToken,
    ) -> Result<Option<bool>, PageError> {
        let (Some(viewer_id), Some(target)) = (self.follower_id(), self.state.target_user_id.clone())
        else {
            return Ok(None);
        };
        let fetched = until_cancelled(cancel, self.api.following(&viewer_id)).await?;
        let following = match fetched {
            Ok(ids) => ids,
            Err(e) => return Err(self.reject("following lookup", e)),
        };
        let followed = following.iter().any(|id| *id == target);
        self.state.followed_by_viewer = Some(followed);
        Ok(Some(followed))
    }

    /// Mark a follow change as in flight.
    ///
    /// Returns `false`, changing nothing, when one is already pending or the
    /// viewer can't follow this profile.
    pub fn begin_follow_change(&mut self) -> bool {
        if self.state.follow_pending || self.follower_id().is_none() {
            return false;
        }
        self.state.follow_pending = true;
        true
    }

    pub async fn follow(&mut self, cancel: &CancellationToken) -> Result<(), PageError> {
        self.set_followed(cancel, true).await
    }

    pub async fn unfollow(&mut self, cancel: &CancellationToken) -> Result<(), PageError> {
        self.set_followed(cancel, false).await
    }

    async fn set_followed(
        &mut self,
        cancel: &CancellationToken,
        follow: bool,
    ) -> Result<(), PageError> {
        let (Some(_), Some(target)) = (self.follower_id(), self.state.target_user_id.clone()) else {
            debug!(username = %self.username, "follow change without a signed-in viewer");
            return Ok(());
        };
        let token = self.access_token.as_deref();
        let result = if follow {
            until_cancelled(cancel, self.api.follow(&target, token)).await?
        } else {
            until_cancelled(cancel, self.api.unfollow(&target, token)).await?
        };
        self.state.follow_pending = false;
        match result {
            Ok(()) => {
                info!(target = %target, follow, "follow state changed");
                self.state.followed_by_viewer = Some(follow);
                Ok(())
            }
            Err(e) => Err(self.reject(if follow { "follow" } else { "unfollow" }, e)),
        }
    }

    /// Render model for the current state, at the current time.
    pub fn view(&self) -> UserPageView {
        self.view_at(token::now_secs())
    }

    /// Render model for the current state, with `now` in seconds.
    pub fn view_at(&self, now: f64) -> UserPageView {
        if self.state.target_user_id.is_none() {
            return UserPageView::NotFound {
                alert: self.state.alert.clone(),
            };
        }
        let posts = self
            .state
            .posts
            .iter()
            .map(|post| PostSummary {
                username: self.username.clone(),
                date: post.display_date().unwrap_or_default(),
                content: post.content.clone(),
                tags: post.tags.clone(),
            })
            .collect();
        let live_viewer = self.state.viewer.as_ref().filter(|c| c.is_live_at(now));
        let show_editor = live_viewer.is_some_and(|c| c.username() == Some(self.username.as_str()));
        let following = live_viewer
            .filter(|c| !show_editor && c.user_id().is_some())
            .map(|_| match (self.state.follow_pending, self.state.followed_by_viewer) {
                (true, _) => FollowButton::Pending,
                (false, None) => FollowButton::Unknown,
                (false, Some(false)) => FollowButton::Follow,
                (false, Some(true)) => FollowButton::Unfollow,
            });
        UserPageView::Profile {
            username: self.username.clone(),
            posts,
            show_editor,
            loading: !self.state.is_loaded,
            alert: self.state.alert.clone(),
            following,
        }
    }

    /// The viewer's id when they can follow this profile.
    fn follower_id(&self) -> Option<String> {
        let viewer_id = token::validate(self.access_token.as_deref())?;
        match &self.state.target_user_id {
            Some(target) if *target != viewer_id => Some(viewer_id),
            _ => None,
        }
    }

    fn finish(&mut self, posts: Vec<Post>) {
        info!(username = %self.username, posts = posts.len(), "profile loaded");
        self.state.posts = posts;
        self.state.is_loaded = true;
        self.state.phase = PagePhase::Loaded;
    }

    fn reject(&mut self, stage: &str, e: ApiError) -> PageError {
        error!(
            username = %self.username,
            stage,
            status = ?e.status(),
            error = %e,
            "request rejected"
        );
        self.state.alert = Some(e.to_string());
        PageError::Api(e)
    }
}

/// Await `fut` unless `cancel` fires first, in which case `fut` is dropped.
async fn until_cancelled<F: Future>(
    cancel: &CancellationToken,
    fut: F,
) -> Result<F::Output, PageError> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(PageError::Cancelled),
        out = fut => Ok(out),
    }
}

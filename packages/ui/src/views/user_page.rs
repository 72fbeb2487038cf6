use api::ApiClient;
use dioxus::prelude::*;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use super::{NoUserPage, PostCard};
use crate::platform::{self, PlatformStore};
use crate::user_page::{FollowButton, PageError, UserPageController, UserPageView};

type PageController = UserPageController<ApiClient, PlatformStore>;

/// Profile page for `/user/:username`.
///
/// `children` is the post editor; it is rendered only for the profile's
/// owner, below the posts. Each load gets its own cancellation token, which
/// is cancelled when the username changes or the page unmounts.
#[component]
pub fn UserPage(
    /// Username from the route.
    username: String,
    #[props(default)] children: Element,
) -> Element {
    // Track the route param in a signal so use_resource re-runs when it changes
    let mut username_signal = use_signal(|| username.clone());
    if *username_signal.peek() != username {
        username_signal.set(username.clone());
    }

    let mut page = use_signal(|| Option::<PageController>::None);
    // Parent of every per-load token; cancelling it on unmount stops them all.
    let mount_cancel = use_hook(CancellationToken::new);
    let mut load_cancel = use_signal(CancellationToken::new);

    use_drop({
        let mount_cancel = mount_cancel.clone();
        move || mount_cancel.cancel()
    });

    let _loader = use_resource(move || {
        let username = username_signal();
        let cancel = mount_cancel.child_token();
        let previous = std::mem::replace(&mut *load_cancel.write(), cancel.clone());
        previous.cancel();
        async move {
            page.set(None);
            let config = platform::load_config();
            let api = match ApiClient::new(&config.api) {
                Ok(api) => api,
                Err(e) => {
                    error!(error = %e, "could not build api client");
                    platform::alert(&e.to_string());
                    return;
                }
            };
            let mut controller =
                UserPageController::new(api, platform::make_session(&config), username);

            let resolved = controller.resolve(&cancel).await;
            let found = match resolved {
                Ok(found) => found,
                Err(e) => return publish(page, controller, &cancel, Err(e)),
            };
            page.set(Some(controller.clone()));
            if !found {
                return;
            }

            if let Err(e) = controller.load_posts(&cancel).await {
                return publish(page, controller, &cancel, Err(e));
            }
            page.set(Some(controller.clone()));

            let follow_state = controller.load_follow_state(&cancel).await.map(|_| ());
            publish(page, controller, &cancel, follow_state);
        }
    });

    let set_following = use_callback(move |follow: bool| {
        let Some(mut controller) = page.peek().clone() else {
            return;
        };
        if !controller.begin_follow_change() {
            return;
        }
        page.set(Some(controller.clone()));
        let cancel = load_cancel.peek().clone();
        spawn(async move {
            let result = if follow {
                controller.follow(&cancel).await
            } else {
                controller.unfollow(&cancel).await
            };
            if is_current(controller.username(), &username_signal.peek(), &cancel) {
                publish(page, controller, &cancel, result);
            } else {
                debug!(username = %controller.username(), "dropping follow result for a stale page");
            }
        });
    });

    let view = page
        .read()
        .as_ref()
        .map(|controller| controller.view())
        .unwrap_or(UserPageView::NotFound { alert: None });

    match view {
        UserPageView::NotFound { alert } => rsx! {
            if let Some(message) = alert {
                div { class: "user-page-alert", role: "alert", "{message}" }
            }
            NoUserPage {}
        },
        UserPageView::Profile {
            username,
            posts,
            show_editor,
            loading,
            alert,
            following,
        } => {
            let follow_control = match following {
                Some(FollowButton::Follow) => rsx! {
                    button {
                        class: "follow-button",
                        onclick: move |_| set_following.call(true),
                        "Follow"
                    }
                },
                Some(FollowButton::Unfollow) => rsx! {
                    button {
                        class: "follow-button follow-button--active",
                        onclick: move |_| set_following.call(false),
                        "Unfollow"
                    }
                },
                Some(FollowButton::Pending) => rsx! {
                    button { class: "follow-button", disabled: true, "..." }
                },
                Some(FollowButton::Unknown) | None => rsx! {},
            };
            let blocks = profile_layout(alert.is_some(), loading, show_editor)
                .into_iter()
                .map(|block| match block {
                    ProfileBlock::Alert => {
                        let message = alert.clone().unwrap_or_default();
                        rsx! {
                            div { class: "user-page-alert", role: "alert", "{message}" }
                        }
                    }
                    ProfileBlock::Loading => rsx! {
                        p { class: "user-page-loading", "Loading..." }
                    },
                    ProfileBlock::Posts => rsx! {
                        for (i, post) in posts.iter().enumerate() {
                            PostCard {
                                key: "{i}",
                                username: post.username.clone(),
                                date: post.date.clone(),
                                content: post.content.clone(),
                                tags: post.tags.clone(),
                            }
                        }
                    },
                    ProfileBlock::Editor => rsx! { {children.clone()} },
                });
            rsx! {
                div {
                    class: "user-page",
                    div {
                        class: "user-page-header",
                        h1 { "{username}" }
                        {follow_control}
                    }
                    {blocks}
                }
            }
        }
    }
}

/// Sections of a resolved profile below its header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProfileBlock {
    Alert,
    Loading,
    Posts,
    Editor,
}

/// Render order of a resolved profile: posts first, the editor last.
fn profile_layout(alert: bool, loading: bool, show_editor: bool) -> Vec<ProfileBlock> {
    let mut blocks = Vec::with_capacity(4);
    if alert {
        blocks.push(ProfileBlock::Alert);
    }
    if loading {
        blocks.push(ProfileBlock::Loading);
    }
    blocks.push(ProfileBlock::Posts);
    if show_editor {
        blocks.push(ProfileBlock::Editor);
    }
    blocks
}

/// Store a controller after a stage finished, alerting on rejection.
/// A cancelled stage writes nothing.
fn publish(
    mut page: Signal<Option<PageController>>,
    controller: PageController,
    cancel: &CancellationToken,
    result: Result<(), PageError>,
) {
    if cancel.is_cancelled() {
        return;
    }
    match result {
        Err(PageError::Cancelled) => return,
        Err(PageError::Api(e)) => platform::alert(&e.to_string()),
        Ok(()) => {}
    }
    page.set(Some(controller));
}

/// Whether a controller that finished a request may still be shown.
fn is_current(controller_username: &str, route_username: &str, cancel: &CancellationToken) -> bool {
    !cancel.is_cancelled() && controller_username == route_username
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editor_comes_after_posts() {
        assert_eq!(
            profile_layout(false, false, true),
            vec![ProfileBlock::Posts, ProfileBlock::Editor]
        );
        assert_eq!(
            profile_layout(true, true, true),
            vec![
                ProfileBlock::Alert,
                ProfileBlock::Loading,
                ProfileBlock::Posts,
                ProfileBlock::Editor
            ]
        );
    }

    #[test]
    fn test_no_editor_for_visitors() {
        assert_eq!(
            profile_layout(false, true, false),
            vec![ProfileBlock::Loading, ProfileBlock::Posts]
        );
    }

    #[test]
    fn test_current_page_is_kept() {
        let cancel = CancellationToken::new();
        assert!(is_current("bob", "bob", &cancel));
    }

    #[test]
    fn test_result_for_previous_user_is_dropped() {
        let cancel = CancellationToken::new();
        assert!(!is_current("bob", "carol", &cancel));
    }

    #[test]
    fn test_result_after_reload_is_dropped() {
        let mount = CancellationToken::new();
        let first_load = mount.child_token();
        first_load.cancel();
        assert!(!is_current("bob", "bob", &first_load));

        let second_load = mount.child_token();
        assert!(is_current("bob", "bob", &second_load));
        mount.cancel();
        assert!(!is_current("bob", "bob", &second_load));
    }
}

use dioxus::prelude::*;

/// Empty state shown when the username doesn't resolve to a user.
#[component]
pub fn NoUserPage() -> Element {
    rsx! {
        div {
            class: "no-user-page",
            h2 { "User not found" }
            p { "There is no user with this name." }
        }
    }
}

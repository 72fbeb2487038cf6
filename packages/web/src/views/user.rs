use dioxus::prelude::*;

use super::PostEditor;

#[component]
pub fn User(username: String) -> Element {
    rsx! {
        ui::UserPage {
            username,
            PostEditor {}
        }
    }
}

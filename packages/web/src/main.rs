use dioxus::prelude::*;

use ui::NoUserPage;
use views::User;

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/user/:username")]
    User { username: String },
    #[route("/:..segments")]
    Unknown { segments: Vec<String> },
}

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        Router::<Route> {}
    }
}

/// Anything but a profile path.
#[component]
fn Unknown(segments: Vec<String>) -> Element {
    tracing::debug!(path = %segments.join("/"), "no route");
    rsx! { NoUserPage {} }
}

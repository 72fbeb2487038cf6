use dioxus::prelude::*;

/// Draft box shown to the owner of a profile.
///
/// Publishing goes through the compose flow; this only keeps the draft while
/// the page is open.
#[component]
pub fn PostEditor() -> Element {
    let mut draft = use_signal(String::new);

    rsx! {
        div {
            class: "post-editor",
            textarea {
                class: "post-editor-input",
                placeholder: "What's on your mind?",
                value: draft(),
                oninput: move |evt: FormEvent| draft.set(evt.value()),
            }
            span { class: "post-editor-count", "{draft().chars().count()}" }
        }
    }
}

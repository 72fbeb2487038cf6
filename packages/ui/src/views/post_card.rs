use dioxus::prelude::*;

/// One post on a profile page.
#[component]
pub fn PostCard(username: String, date: String, content: String, tags: Vec<String>) -> Element {
    rsx! {
        article {
            class: "post-card",
            header {
                class: "post-card-header",
                span { class: "post-card-author", "{username}" }
                if !date.is_empty() {
                    time { class: "post-card-date", "{date}" }
                }
            }
            p { class: "post-card-content", "{content}" }
            if !tags.is_empty() {
                ul {
                    class: "post-card-tags",
                    for tag in tags {
                        li { key: "{tag}", class: "post-card-tag", "#{tag}" }
                    }
                }
            }
        }
    }
}

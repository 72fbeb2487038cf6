mod post_editor;
pub use post_editor::PostEditor;

mod user;
pub use user::User;

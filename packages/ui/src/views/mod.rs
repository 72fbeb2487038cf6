mod no_user_page;
pub use no_user_page::NoUserPage;

mod post_card;
pub use post_card::PostCard;

mod user_page;
pub use user_page::UserPage;

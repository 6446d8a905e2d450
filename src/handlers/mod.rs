pub mod get_leaderboard;
pub mod health_check;
pub mod submissions;
pub mod users;

pub use get_leaderboard::get_leaderboard;
pub use health_check::health_check;
pub use submissions::list_submissions::list_submissions;
pub use users::get_user_profile::get_user_profile;
pub use users::sync_user::sync_user;

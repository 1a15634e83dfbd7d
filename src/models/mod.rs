pub mod movie;
pub mod player;
pub mod settings;
pub mod user;

pub use movie::{CategoryLabel, MovieRecord, MovieSummary};
pub use player::PlayerState;
pub use settings::{NotificationSettings, Theme, UserSettings};
pub use user::{AuthSession, UserProfile, WatchlistEntry};

pub mod feed;
pub mod filter;
pub mod gateway;
pub mod session;

pub use gateway::{BackendGateway, SupabaseGateway};
pub use session::{Session, SessionState};

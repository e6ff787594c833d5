//! HTTP request handlers.

pub mod expired;
pub mod health;
pub mod links;
pub mod resolve;
pub mod search;
pub mod shorten;
pub mod stats;

pub use expired::expired_handler;
pub use health::health_handler;
pub use links::{delete_link_handler, update_link_handler};
pub use resolve::resolve_handler;
pub use search::search_handler;
pub use shorten::shorten_handler;
pub use stats::stats_handler;

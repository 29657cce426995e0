//! Announcement API: create and paginated list handlers over a managed key-value table.

pub mod config;
pub mod error;
pub mod event;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::{Config, StoreBackend};
pub use error::{ApiError, ConfigError, StoreError, ValidationError};
pub use event::ApiEvent;
pub use handlers::{add_announcement, list_announcements};
pub use model::{Announcement, PageCursor};
pub use response::{Envelope, ProxyResponse};
pub use routes::{announcement_routes, app, common_routes};
pub use state::AppState;
pub use store::{AnnouncementStore, DynamoStore, MemoryStore};

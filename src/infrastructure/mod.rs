//! Infrastructure layer - Persistence, configuration and process plumbing

pub mod config;
pub mod file_store;
pub mod lock;
pub mod logging;
pub mod rate_limit;
pub mod store;

pub use config::Config;
pub use file_store::FileStore;
pub use rate_limit::{RateLimitedInterpreter, RateLimiter};
pub use store::{EntryStore, MemoryStore};

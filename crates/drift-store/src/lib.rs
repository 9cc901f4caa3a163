//! The Snapshot Store: persists, enumerates, and retrieves `Snapshot`s with
//! baseline and history views, plus the thin Timeline/History Index layered
//! over it.

pub mod config;
pub mod filename;
pub mod filter;
pub mod store;
pub mod timeline;

pub use config::StoreConfig;
pub use filter::SnapshotFilter;
pub use store::Store;

//! Local-state collector: walks a directory tree for `*.state.json` files
//! and normalizes their managed-resources arrays into drift-kit's resource
//! model. Supports single-snapshot and multi-root (`collect_separate`)
//! collection.

pub mod collector;
pub mod state_file;

pub use collector::LocalStateCollector;

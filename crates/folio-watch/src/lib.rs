//! Watch mode for folio.
//!
//! Watches the site sources and re-runs the full build pipeline on change.
//! Rebuild requests that arrive while a pass is running are coalesced into a
//! single follow-up pass.

pub mod gate;
pub mod session;
pub mod watcher;

pub use gate::{GateState, RebuildGate};
pub use session::{WatchConfig, WatchError, WatchSession};
pub use watcher::{FileWatcher, WatchEvent, WatchEventKind};

//! Sync manifest tracking which sessions have been exported
//!
//! The manifest lives at the destination root. Loading never fails so that a
//! lost or corrupt manifest only costs a full re-export, and saving goes
//! through a temp-file rename so an interrupted write cannot corrupt the
//! previous manifest. Concurrent writers are not coordinated.

pub mod schema;
pub mod store;

pub use schema::{Manifest, ManifestEntry, MANIFEST_FILENAME, MANIFEST_VERSION};
pub use store::{file_mtime, load_manifest, needs_sync, path_key, save_manifest};

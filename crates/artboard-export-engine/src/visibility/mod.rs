//! Artboard-scoped layer visibility.
//!
//! - **`snapshot`**: capture and restore per-layer visibility
//! - **`resolver`**: show exactly the layers holding visible content on an artboard
//! - **`guard`**: snapshot/resolve/restore bound to a scope

pub mod guard;
pub mod resolver;
pub mod snapshot;

pub use guard::VisibilityGuard;
pub use resolver::{Resolution, has_visible_items, resolve_layer, resolve_visibility};
pub use snapshot::{SnapshotKey, VisibilitySnapshot};

//! Common types for veil content visibility filtering
//!
//! Browsing levels, viewer context and the hidden-preference snapshots the filter
//! consumes. Nothing here holds state across calls.

#![warn(missing_docs)]
pub use smol_str;

pub mod error;
pub mod hidden;
pub mod level;
pub mod viewer;

pub use error::{Result, VeilError, VeilErrorKind};
pub use hidden::{HiddenMap, HiddenPreferences, HiddenView, ModeratedTag, ModeratedTags};
pub use level::{BrowsingLevel, NsfwLevel};
pub use viewer::{Viewer, ViewerContext};

//! # Veil
//!
//! Content visibility filtering for a content-sharing platform.
//!
//! Given a list of models, images, articles, users, collections, bounties, posts or tags
//! and a viewer's preferences, veil works out which items that viewer is allowed to see
//! and counts the ones it left out, by reason.
//!
//! The filter is a pure function of its arguments: the viewer, their browsing level and
//! their hidden preferences are all passed in, nothing is cached between calls, and it
//! is safe to call from any number of threads at once.
//!
//! ## Example
//!
//! ```
//! use veil::filter::{FilterOptions, ImageItem, UserRef, filter};
//! use veil::{HiddenPreferences, NsfwLevel, ViewerContext};
//!
//! let images = vec![
//!     ImageItem { id: 1, nsfw_level: NsfwLevel::Pg.bits(), user: Some(UserRef::new(3)), tag_ids: vec![] },
//!     ImageItem { id: 2, nsfw_level: NsfwLevel::Pg.bits(), user: Some(UserRef::new(4)), tag_ids: vec![] },
//! ];
//!
//! let mut prefs = HiddenPreferences::new();
//! prefs.hidden_users.hide(4);
//!
//! let ctx = ViewerContext::anonymous(NsfwLevel::Pg);
//! let result = filter(Some(images.as_slice()), &ctx, &prefs, &FilterOptions::default());
//!
//! assert_eq!(result.items.len(), 1);
//! assert_eq!(result.hidden.users, 1);
//! ```
//!
//! ## Scenarios
//!
//! [`scenario::Scenario`] bundles a viewer, preferences, options and items in one JSON
//! document. The `veil` binary runs such a file and prints the filtered result.

#![warn(missing_docs)]

pub mod filter;
pub mod scenario;

pub use veil_common::*;

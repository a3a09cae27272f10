//! Content visibility filtering
//!
//! Decides, per content type, which items a viewer gets to see. The inputs are the
//! viewer's browsing level, their personal block-lists (hidden images, users, tags and
//! so on), the list of moderated tags, and ownership/moderator status. The output is the
//! visible subset plus a tally of how many items were excluded for each reason.
//!
//! # Rule precedence
//!
//! For each item the rules of its content type run top to bottom and the first verdict
//! wins:
//!
//! 1. Owner or moderator looking at unrated content (level `0`): always visible
//! 2. Level not allowed by the browsing level: hidden (`browsingLevel`)
//! 3. Owner is a hidden user: hidden (`users`)
//! 4. Item is on its own hidden list, unless hidden items are being shown (`images`,
//!    `models`, `collections`)
//! 5. Any attached tag is hidden: hidden (`tags`)
//!
//! Container types (models, articles, collections, bounties, posts) then run each of
//! their images through a reduced rule list. The parent's exemption doesn't carry over;
//! every image is judged on its own level and owner. See [`rules`] for the exact table
//! per type.
//!
//! # Example
//!
//! ```
//! # use veil::filter::*;
//! # use veil::{HiddenPreferences, NsfwLevel, Viewer, ViewerContext};
//! let models = vec![ModelItem {
//!     id: 1,
//!     name: "lineart".into(),
//!     nsfw_level: 0,
//!     nsfw: false,
//!     user: Some(UserRef::new(7)),
//!     tag_ids: vec![],
//!     images: vec![ImageRef::new(10, NsfwLevel::R.bits())],
//! }];
//!
//! // the owner sees their own unrated model, minus the R image they haven't enabled
//! let ctx = ViewerContext::signed_in(Viewer::user(7), NsfwLevel::Pg | NsfwLevel::Pg13);
//! let result = filter(Some(models.as_slice()), &ctx, &HiddenPreferences::new(), &FilterOptions::default());
//! assert_eq!(result.items.len(), 1);
//! assert!(result.items[0].images.is_empty());
//! assert_eq!(result.hidden.no_images, 1);
//! ```

mod content;
mod decision;
mod items;
pub mod rules;
mod tally;


pub use content::{ContentItems, ContentType, FilteredItems, filter_items, filter_named};
pub use decision::{FilterOptions, Filtered, filter};
pub use items::{
    ArticleItem, BountyItem, CollectionItem, Filterable, ImageItem, ImageRef, ModelItem,
    PostItem, TagItem, UserItem, UserRef,
};
pub use rules::{Rated, RuleSet};
pub use tally::{HiddenReason, HiddenTally};

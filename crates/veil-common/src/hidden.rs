//! Per-viewer block-lists and moderated tags
//!
//! These are snapshots of what the preferences provider knows about a viewer. The filter
//! only reads them; per-call override ids are layered on top through [`HiddenView`] rather
//! than copied in.

use crate::level::BrowsingLevel;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::collections::HashMap;

/// Mapping of entity id to a "hidden" flag
///
/// Presence with `true` hides the entity. Absence, or an explicit `false`, leaves it
/// visible. Serializes as a JSON object keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HiddenMap(pub HashMap<u64, bool>);

impl HiddenMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `id` as hidden
    pub fn hide(&mut self, id: u64) {
        self.0.insert(id, true);
    }

    /// Explicitly mark `id` as visible
    pub fn unhide(&mut self, id: u64) {
        self.0.insert(id, false);
    }

    /// Whether `id` is hidden
    #[inline]
    pub fn is_hidden(&self, id: u64) -> bool {
        self.0.get(&id).copied().unwrap_or(false)
    }

    /// Number of hidden entries
    pub fn hidden_count(&self) -> usize {
        self.0.values().filter(|hidden| **hidden).count()
    }

    /// Layer transient ids on top of this map without copying it
    pub fn with_extra<'a>(&'a self, extra: &'a [u64]) -> HiddenView<'a> {
        HiddenView { base: self, extra }
    }
}

impl FromIterator<u64> for HiddenMap {
    fn from_iter<I: IntoIterator<Item = u64>>(iter: I) -> Self {
        HiddenMap(iter.into_iter().map(|id| (id, true)).collect())
    }
}

/// Borrowed union of a [`HiddenMap`] and a list of extra hidden ids
///
/// Override lists are short (usually zero or one id), so a linear scan over `extra`
/// beats building a merged map.
#[derive(Debug, Clone, Copy)]
pub struct HiddenView<'a> {
    base: &'a HiddenMap,
    extra: &'a [u64],
}

impl<'a> HiddenView<'a> {
    /// Whether `id` is hidden by either layer
    #[inline]
    pub fn is_hidden(&self, id: u64) -> bool {
        self.extra.contains(&id) || self.base.is_hidden(id)
    }

    /// Whether any of `ids` is hidden
    pub fn any_hidden(&self, ids: &[u64]) -> bool {
        ids.iter().any(|id| self.is_hidden(*id))
    }
}

/// A tag under moderation, with the level it has been moderated at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeratedTag {
    /// Tag id
    pub id: u64,
    /// Tag name
    #[serde(default)]
    pub name: SmolStr,
    /// Level the tag was moderated at, if rated
    #[serde(default)]
    pub nsfw_level: Option<u32>,
}

/// The list of moderated tags from the preferences provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModeratedTags(pub Vec<ModeratedTag>);

impl ModeratedTags {
    /// Whether `tag_id` is moderated at a level the viewer has enabled
    ///
    /// Unrated moderated tags never match.
    pub fn is_moderated(&self, tag_id: u64, browsing_level: BrowsingLevel) -> bool {
        self.0.iter().any(|tag| {
            tag.id == tag_id
                && tag
                    .nsfw_level
                    .is_some_and(|level| browsing_level.intersects(level))
        })
    }
}

impl From<Vec<ModeratedTag>> for ModeratedTags {
    fn from(tags: Vec<ModeratedTag>) -> Self {
        ModeratedTags(tags)
    }
}

/// Snapshot of a viewer's hidden preferences
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HiddenPreferences {
    /// Images the viewer has hidden
    pub hidden_images: HiddenMap,
    /// Users the viewer has blocked or hidden
    pub hidden_users: HiddenMap,
    /// Tags the viewer has hidden
    pub hidden_tags: HiddenMap,
    /// Models the viewer has hidden
    pub hidden_models: HiddenMap,
    /// Collections the viewer has hidden
    pub hidden_collections: HiddenMap,
    /// Tags moderated at a specific level
    pub moderated_tags: ModeratedTags,
    /// Preferences are still being fetched
    pub hidden_loading: bool,
}

impl HiddenPreferences {
    /// Preferences that hide nothing
    pub fn new() -> Self {
        Self::default()
    }

    /// Preferences that haven't finished loading
    pub fn loading() -> Self {
        Self {
            hidden_loading: true,
            ..Self::default()
        }
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why an item was left out of the filtered output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HiddenReason {
    /// Maturity tier not enabled by the viewer
    BrowsingLevel,
    /// Owner is on the viewer's hidden-users list
    Users,
    /// Image is on the viewer's hidden-images list
    Images,
    /// Model is on the viewer's hidden-models list
    Models,
    /// Collection is on the viewer's hidden-collections list
    Collections,
    /// Carries (or is) a hidden tag
    Tags,
    /// Every attached image was filtered out
    NoImages,
}

impl HiddenReason {
    /// Counter name, as serialized in [`HiddenTally`]
    pub const fn as_str(self) -> &'static str {
        match self {
            HiddenReason::BrowsingLevel => "browsingLevel",
            HiddenReason::Users => "users",
            HiddenReason::Images => "images",
            HiddenReason::Models => "models",
            HiddenReason::Collections => "collections",
            HiddenReason::Tags => "tags",
            HiddenReason::NoImages => "noImages",
        }
    }
}

impl fmt::Display for HiddenReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-reason count of excluded items
///
/// Every exclusion lands in exactly one counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HiddenTally {
    /// Excluded by browsing level (including the tag maturity threshold)
    pub browsing_level: usize,
    /// Excluded because the owner is hidden
    pub users: usize,
    /// Images excluded by the hidden-images list
    pub images: usize,
    /// Models excluded by the hidden-models list
    pub models: usize,
    /// Collections excluded by the hidden-collections list
    pub collections: usize,
    /// Excluded by hidden tags
    pub tags: usize,
    /// Parents left with no images
    pub no_images: usize,
}

impl HiddenTally {
    /// Increment the counter for `reason`
    pub fn bump(&mut self, reason: HiddenReason) {
        *self.counter_mut(reason) += 1;
    }

    /// Current value of the counter for `reason`
    pub fn get(&self, reason: HiddenReason) -> usize {
        match reason {
            HiddenReason::BrowsingLevel => self.browsing_level,
            HiddenReason::Users => self.users,
            HiddenReason::Images => self.images,
            HiddenReason::Models => self.models,
            HiddenReason::Collections => self.collections,
            HiddenReason::Tags => self.tags,
            HiddenReason::NoImages => self.no_images,
        }
    }

    /// Sum of every counter
    pub fn total(&self) -> usize {
        self.browsing_level
            + self.users
            + self.images
            + self.models
            + self.collections
            + self.tags
            + self.no_images
    }

    /// Whether nothing was excluded
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    fn counter_mut(&mut self, reason: HiddenReason) -> &mut usize {
        match reason {
            HiddenReason::BrowsingLevel => &mut self.browsing_level,
            HiddenReason::Users => &mut self.users,
            HiddenReason::Images => &mut self.images,
            HiddenReason::Models => &mut self.models,
            HiddenReason::Collections => &mut self.collections,
            HiddenReason::Tags => &mut self.tags,
            HiddenReason::NoImages => &mut self.no_images,
        }
    }
}

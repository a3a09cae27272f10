//! A scenario is a single JSON document describing one filter call:
//!
//! ```json
//! {
//!   "contentType": "images",
//!   "viewer": { "currentUser": { "id": 1 }, "browsingLevel": 3 },
//!   "preferences": { "hiddenUsers": { "9": true } },
//!   "options": { "showHidden": false },
//!   "items": [{ "id": 5, "nsfwLevel": 1, "user": { "id": 9 } }]
//! }
//! ```
//!
//! Every section except `contentType` is optional. A missing `items` key behaves like a
//! caller that hasn't got data yet: the result is empty.

use crate::filter::{ContentItems, ContentType, FilterOptions, FilteredItems, filter_items};
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::path::Path;
use veil_common::{HiddenPreferences, Result, VeilError, ViewerContext};

/// One filter call, as loaded from JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    /// Content type name; validated when the scenario runs
    pub content_type: SmolStr,
    /// Who is looking
    #[serde(default)]
    pub viewer: ViewerContext,
    /// The viewer's hidden preferences
    #[serde(default)]
    pub preferences: HiddenPreferences,
    /// Per-call options
    #[serde(default)]
    pub options: FilterOptions,
    /// Raw items, parsed once the content type is known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<serde_json::Value>,
}

impl Scenario {
    /// Parse a scenario from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| VeilError::scenario(e).with_context("parsing scenario document"))
    }

    /// Read and parse a scenario file
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "debug", skip_all, fields(path = %path.as_ref().display())))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| VeilError::io(e).with_context(format!("reading {}", path.display())))?;
        Self::from_json(&json)
    }

    /// The validated content type
    pub fn content_type(&self) -> Result<ContentType> {
        self.content_type.parse()
    }

    /// Typed items, if the scenario has any
    pub fn items(&self) -> Result<Option<ContentItems>> {
        let content_type = self.content_type()?;
        self.items
            .clone()
            .map(|value| ContentItems::from_value(content_type, value))
            .transpose()
    }

    /// Run the filter described by this scenario
    pub fn run(&self) -> Result<FilteredItems> {
        let content_type = self.content_type()?;
        let items = self.items()?;

        #[cfg(feature = "tracing")]
        tracing::info!(
            content_type = %content_type,
            items = items.as_ref().map_or(0, ContentItems::len),
            browsing_level = %self.viewer.browsing_level,
            "running scenario"
        );

        filter_items(
            content_type,
            items.as_ref(),
            &self.viewer,
            &self.preferences,
            &self.options,
        )
    }
}

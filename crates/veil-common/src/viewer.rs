//! Viewer identity and browsing context

use crate::level::BrowsingLevel;
use serde::{Deserialize, Serialize};

/// The signed-in user looking at content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewer {
    /// User id
    pub id: u64,
    /// Moderators see unrated content from everyone
    #[serde(default)]
    pub is_moderator: bool,
}

impl Viewer {
    /// A regular (non-moderator) viewer
    pub fn user(id: u64) -> Self {
        Self {
            id,
            is_moderator: false,
        }
    }

    /// A moderator
    pub fn moderator(id: u64) -> Self {
        Self {
            id,
            is_moderator: true,
        }
    }
}

/// Everything the filter needs to know about who is looking
///
/// Passed explicitly on every call rather than read from an ambient session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerContext {
    /// Signed-in user, if any
    #[serde(default)]
    pub current_user: Option<Viewer>,
    /// Enabled maturity tiers; an absent level enables nothing
    #[serde(default)]
    pub browsing_level: BrowsingLevel,
    /// Compare levels against the highest enabled tier instead of by intersection
    #[serde(default)]
    pub allow_lower_levels: bool,
}

impl ViewerContext {
    /// Anonymous viewer with the given browsing level
    pub fn anonymous(browsing_level: impl Into<BrowsingLevel>) -> Self {
        Self {
            current_user: None,
            browsing_level: browsing_level.into(),
            allow_lower_levels: false,
        }
    }

    /// Signed-in viewer with the given browsing level
    pub fn signed_in(viewer: Viewer, browsing_level: impl Into<BrowsingLevel>) -> Self {
        Self {
            current_user: Some(viewer),
            browsing_level: browsing_level.into(),
            allow_lower_levels: false,
        }
    }

    /// Switch on lower-level matching
    pub fn with_lower_levels(mut self, allow: bool) -> Self {
        self.allow_lower_levels = allow;
        self
    }

    /// Whether `user_id` is the viewer
    pub fn is_self(&self, user_id: u64) -> bool {
        self.current_user.is_some_and(|u| u.id == user_id)
    }

    /// Whether the viewer owns content by `owner_id`, or is a moderator
    pub fn is_owner_or_moderator(&self, owner_id: Option<u64>) -> bool {
        match self.current_user {
            Some(user) => user.is_moderator || owner_id == Some(user.id),
            None => false,
        }
    }

    /// Whether content at `level` passes the browsing-level check
    pub fn allows(&self, level: u32) -> bool {
        self.browsing_level.allows(level, self.allow_lower_levels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::NsfwLevel;

    #[test]
    fn test_viewer_fields_are_optional() {
        let ctx: ViewerContext =
            serde_json::from_str(r#"{ "currentUser": { "id": 4 } }"#).expect("failed to parse viewer");

        assert_eq!(ctx.browsing_level, BrowsingLevel::NONE);
        assert!(!ctx.allow_lower_levels);
        assert!(ctx.is_self(4));
        assert!(!ctx.allows(NsfwLevel::Pg.bits()));
    }
}

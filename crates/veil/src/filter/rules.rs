//! Declarative rule descriptors for each content type
//!
//! Every content type gets a [`RuleSet`] spelling out exactly which checks run, in which
//! order, and how attached images are treated. The generic routine in `decision.rs`
//! only interprets these tables, so differences between types live here and nowhere else.

use super::tally::HiddenReason;
use veil_common::{NsfwLevel, ViewerContext};

/// Which per-item block-list a [`Rule::HiddenItem`] consults
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HiddenKind {
    /// Hidden images
    Images,
    /// Hidden models
    Models,
    /// Hidden collections
    Collections,
}

impl HiddenKind {
    /// Tally counter bumped when this list excludes an item
    pub const fn reason(self) -> HiddenReason {
        match self {
            HiddenKind::Images => HiddenReason::Images,
            HiddenKind::Models => HiddenReason::Models,
            HiddenKind::Collections => HiddenReason::Collections,
        }
    }
}

/// A single visibility check
///
/// Rules run top to bottom and the first one that reaches a verdict wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Owner or moderator looking at unrated content: keep, stop evaluating
    OwnerExempt,
    /// The viewer's own profile: keep, stop evaluating
    SelfVisible,
    /// Level not allowed by the viewer's browsing level
    BrowsingLevel,
    /// Owner is on the hidden-users list
    HiddenUser,
    /// Item id is on a hidden list; skipped when hidden items are being shown
    HiddenItem(HiddenKind),
    /// Any attached tag is hidden
    HiddenTags,
    /// A tag item that is itself hidden
    HiddenSelfTag,
    /// Tag rated above PG-13 that isn't moderated at an enabled level
    TagMaturity,
}

/// Outcome of evaluating a rule list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Item stays
    Keep,
    /// Item goes, counted under the given reason
    Hide(HiddenReason),
}

/// Rules applied to each attached image of a container item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildRules {
    /// Checks for each image, same precedence as item rules
    pub rules: &'static [Rule],
    /// Sort browsing-level-matching images first on nsfw-flagged parents
    pub nsfw_reorder: bool,
}

/// What happens to a parent left with no images
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImagelessPolicy {
    /// Parent is returned with an empty image list
    KeepParent,
    /// Parent is returned only when imageless items are requested
    RespectShowImageless,
}

/// Full descriptor for one content type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSet {
    /// Checks for the item itself
    pub item: &'static [Rule],
    /// Image sub-filtering, for container types
    pub children: Option<ChildRules>,
    /// Parent survival when every image was removed
    pub imageless: ImagelessPolicy,
}

const CHILD_IMAGES: ChildRules = ChildRules {
    rules: &[
        Rule::OwnerExempt,
        Rule::BrowsingLevel,
        Rule::HiddenItem(HiddenKind::Images),
        Rule::HiddenTags,
    ],
    nsfw_reorder: false,
};

/// Models: images are reordered on nsfw models and the model is kept even when imageless.
pub const MODELS: RuleSet = RuleSet {
    item: &[
        Rule::OwnerExempt,
        Rule::BrowsingLevel,
        Rule::HiddenUser,
        Rule::HiddenItem(HiddenKind::Models),
        Rule::HiddenTags,
    ],
    children: Some(ChildRules {
        nsfw_reorder: true,
        ..CHILD_IMAGES
    }),
    imageless: ImagelessPolicy::KeepParent,
};

/// Standalone images.
pub const IMAGES: RuleSet = RuleSet {
    item: &[
        Rule::OwnerExempt,
        Rule::BrowsingLevel,
        Rule::HiddenUser,
        Rule::HiddenItem(HiddenKind::Images),
        Rule::HiddenTags,
    ],
    children: None,
    imageless: ImagelessPolicy::KeepParent,
};

/// Articles: the cover image is the only child.
pub const ARTICLES: RuleSet = RuleSet {
    item: &[
        Rule::OwnerExempt,
        Rule::BrowsingLevel,
        Rule::HiddenUser,
        Rule::HiddenTags,
    ],
    children: Some(CHILD_IMAGES),
    imageless: ImagelessPolicy::RespectShowImageless,
};

/// Users never go through browsing-level checks.
pub const USERS: RuleSet = RuleSet {
    item: &[Rule::SelfVisible, Rule::HiddenUser],
    children: None,
    imageless: ImagelessPolicy::KeepParent,
};

/// Collections: the featured image is merged into the image list before filtering.
pub const COLLECTIONS: RuleSet = RuleSet {
    item: &[
        Rule::OwnerExempt,
        Rule::BrowsingLevel,
        Rule::HiddenUser,
        Rule::HiddenItem(HiddenKind::Collections),
        Rule::HiddenTags,
    ],
    children: Some(CHILD_IMAGES),
    imageless: ImagelessPolicy::RespectShowImageless,
};

/// Bounties.
pub const BOUNTIES: RuleSet = RuleSet {
    item: &[
        Rule::OwnerExempt,
        Rule::BrowsingLevel,
        Rule::HiddenUser,
        Rule::HiddenTags,
    ],
    children: Some(CHILD_IMAGES),
    imageless: ImagelessPolicy::RespectShowImageless,
};

/// Posts: images are never checked against hidden tags, and the post is kept even when
/// imageless.
pub const POSTS: RuleSet = RuleSet {
    item: &[
        Rule::OwnerExempt,
        Rule::BrowsingLevel,
        Rule::HiddenUser,
        Rule::HiddenTags,
    ],
    children: Some(ChildRules {
        rules: &[
            Rule::OwnerExempt,
            Rule::BrowsingLevel,
            Rule::HiddenItem(HiddenKind::Images),
        ],
        nsfw_reorder: false,
    }),
    imageless: ImagelessPolicy::KeepParent,
};

/// Tags: block-list first, then the maturity threshold unless moderated.
pub const TAGS: RuleSet = RuleSet {
    item: &[Rule::HiddenSelfTag, Rule::TagMaturity],
    children: None,
    imageless: ImagelessPolicy::KeepParent,
};

/// Content that carries a maturity rating and can be checked against rules
pub trait Rated {
    /// Unique id within its content type
    fn id(&self) -> u64;

    /// Maturity level (single tier or bitmask, depending on the type)
    fn nsfw_level(&self) -> u32;

    /// Owning user, if known
    fn owner_id(&self) -> Option<u64> {
        None
    }

    /// Attached tag ids
    fn tag_ids(&self) -> &[u64] {
        &[]
    }
}

impl Rule {
    /// Evaluate this rule, returning `None` when it doesn't apply
    pub(crate) fn check<S: Rated + ?Sized>(
        self,
        subject: &S,
        env: &super::decision::FilterEnv<'_>,
    ) -> Option<Verdict> {
        let ctx: &ViewerContext = env.ctx;
        match self {
            Rule::OwnerExempt => (ctx.is_owner_or_moderator(subject.owner_id())
                && subject.nsfw_level() == NsfwLevel::UNRATED)
                .then_some(Verdict::Keep),
            Rule::SelfVisible => subject
                .owner_id()
                .is_some_and(|id| ctx.is_self(id))
                .then_some(Verdict::Keep),
            Rule::BrowsingLevel => (!ctx.allows(subject.nsfw_level()))
                .then_some(Verdict::Hide(HiddenReason::BrowsingLevel)),
            Rule::HiddenUser => subject
                .owner_id()
                .is_some_and(|id| env.users.is_hidden(id))
                .then_some(Verdict::Hide(HiddenReason::Users)),
            Rule::HiddenItem(kind) => (!env.show_hidden
                && env.hidden_for(kind).is_hidden(subject.id()))
            .then_some(Verdict::Hide(kind.reason())),
            Rule::HiddenTags => env
                .tags
                .any_hidden(subject.tag_ids())
                .then_some(Verdict::Hide(HiddenReason::Tags)),
            Rule::HiddenSelfTag => env
                .tags
                .is_hidden(subject.id())
                .then_some(Verdict::Hide(HiddenReason::Tags)),
            Rule::TagMaturity => (NsfwLevel::is_above_pg13(subject.nsfw_level())
                && !env
                    .moderated_tags
                    .is_moderated(subject.id(), ctx.browsing_level))
            .then_some(Verdict::Hide(HiddenReason::BrowsingLevel)),
        }
    }
}

/// Run `rules` against `subject`; the first verdict wins, otherwise the subject is kept
pub(crate) fn evaluate<S: Rated + ?Sized>(
    subject: &S,
    rules: &[Rule],
    env: &super::decision::FilterEnv<'_>,
) -> Verdict {
    rules
        .iter()
        .find_map(|rule| rule.check(subject, env))
        .unwrap_or(Verdict::Keep)
}

use super::items::{ChildImage, Filterable, ImageRef};
use super::rules::{self, ChildRules, HiddenKind, ImagelessPolicy, Verdict};
use super::tally::{HiddenReason, HiddenTally};
use serde::{Deserialize, Serialize};
use veil_common::{HiddenPreferences, HiddenView, ModeratedTags, ViewerContext};

/// Per-call switches and transient block-list additions
///
/// # Example
///
/// ```
/// # use veil::filter::FilterOptions;
/// let options = FilterOptions::new()
///     .show_imageless(true)
///     .hidden_images(vec![42])
///     .build();
/// assert!(!options.show_hidden);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, bon::Builder)]
#[builder(start_fn = new)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterOptions {
    /// Reveal items the viewer has hidden by id (browsing level still applies)
    #[builder(default)]
    pub show_hidden: bool,
    /// Keep container items whose images were all filtered out
    #[builder(default)]
    pub show_imageless: bool,
    /// Skip filtering entirely and return nothing
    #[builder(default)]
    pub disabled: bool,
    /// Extra image ids to hide for this call
    #[builder(default)]
    pub hidden_images: Vec<u64>,
    /// Extra user ids to hide for this call
    #[builder(default)]
    pub hidden_users: Vec<u64>,
    /// Extra tag ids to hide for this call
    #[builder(default)]
    pub hidden_tags: Vec<u64>,
}

/// Items that survived filtering, plus counts of what didn't
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filtered<T> {
    /// Visible items, in input order
    pub items: Vec<T>,
    /// Per-reason exclusion counts
    pub hidden: HiddenTally,
}

impl<T> Filtered<T> {
    /// Nothing visible, nothing counted
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            hidden: HiddenTally::default(),
        }
    }
}

impl<T> Default for Filtered<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Everything a rule needs to reach a verdict, borrowed for the length of one call
pub(crate) struct FilterEnv<'a> {
    pub(crate) ctx: &'a ViewerContext,
    pub(crate) images: HiddenView<'a>,
    pub(crate) users: HiddenView<'a>,
    pub(crate) tags: HiddenView<'a>,
    pub(crate) models: HiddenView<'a>,
    pub(crate) collections: HiddenView<'a>,
    pub(crate) moderated_tags: &'a ModeratedTags,
    pub(crate) show_hidden: bool,
    pub(crate) show_imageless: bool,
}

impl<'a> FilterEnv<'a> {
    pub(crate) fn new(
        ctx: &'a ViewerContext,
        prefs: &'a HiddenPreferences,
        options: &'a FilterOptions,
    ) -> Self {
        Self {
            ctx,
            images: prefs.hidden_images.with_extra(&options.hidden_images),
            users: prefs.hidden_users.with_extra(&options.hidden_users),
            tags: prefs.hidden_tags.with_extra(&options.hidden_tags),
            models: prefs.hidden_models.with_extra(&[]),
            collections: prefs.hidden_collections.with_extra(&[]),
            moderated_tags: &prefs.moderated_tags,
            show_hidden: options.show_hidden,
            show_imageless: options.show_imageless,
        }
    }

    pub(crate) fn hidden_for(&self, kind: HiddenKind) -> &HiddenView<'a> {
        match kind {
            HiddenKind::Images => &self.images,
            HiddenKind::Models => &self.models,
            HiddenKind::Collections => &self.collections,
        }
    }
}

/// Filter `items` for the given viewer
///
/// Returns the visible items in their original order, each a copy with its image list
/// replaced by the visible subset, along with per-reason counts of everything left out.
/// When `options.disabled` is set, `items` is `None`, or the preferences are still
/// loading, the result is empty with a zero tally.
///
/// # Example
///
/// ```
/// # use veil::filter::{filter, FilterOptions, ImageItem};
/// # use veil::{HiddenPreferences, NsfwLevel, ViewerContext};
/// let images = vec![
///     ImageItem { id: 1, nsfw_level: NsfwLevel::Pg13.bits(), user: None, tag_ids: vec![] },
///     ImageItem { id: 2, nsfw_level: NsfwLevel::R.bits(), user: None, tag_ids: vec![] },
/// ];
/// let ctx = ViewerContext::anonymous(NsfwLevel::Pg | NsfwLevel::Pg13);
/// let result = filter(Some(images.as_slice()), &ctx, &HiddenPreferences::new(), &FilterOptions::default());
/// assert_eq!(result.items.len(), 1);
/// assert_eq!(result.hidden.browsing_level, 1);
/// ```
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        level = "debug",
        skip_all,
        fields(content_type = %T::CONTENT_TYPE, count = items.map_or(0, <[T]>::len))
    )
)]
pub fn filter<T: Filterable>(
    items: Option<&[T]>,
    ctx: &ViewerContext,
    prefs: &HiddenPreferences,
    options: &FilterOptions,
) -> Filtered<T> {
    let Some(items) = items else {
        return Filtered::empty();
    };
    if options.disabled || prefs.hidden_loading {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            disabled = options.disabled,
            loading = prefs.hidden_loading,
            "filter short-circuited"
        );
        return Filtered::empty();
    }

    let env = FilterEnv::new(ctx, prefs, options);
    let rule_set = T::RULES;
    let mut hidden = HiddenTally::default();
    let mut visible = Vec::with_capacity(items.len());

    for item in items {
        if let Verdict::Hide(reason) = rules::evaluate(item, rule_set.item, &env) {
            #[cfg(feature = "tracing")]
            tracing::trace!(id = item.id(), reason = %reason, "hidden");
            hidden.bump(reason);
            continue;
        }

        let Some(children) = rule_set.children else {
            visible.push(item.clone());
            continue;
        };

        let mut item = item.clone();
        let images = item.take_images();
        let had_images = !images.is_empty();
        let mut kept = filter_images(images, item.owner_id(), &children, &env, &mut hidden);
        if children.nsfw_reorder && item.is_nsfw() {
            sort_by_browsing_level(&mut kept, ctx);
        }

        if kept.is_empty() {
            let drop = rule_set.imageless == ImagelessPolicy::RespectShowImageless
                && !env.show_imageless;
            if had_images || drop {
                hidden.bump(HiddenReason::NoImages);
            }
            if drop {
                #[cfg(feature = "tracing")]
                tracing::trace!(id = item.id(), reason = %HiddenReason::NoImages, "hidden");
                continue;
            }
        }

        item.set_images(kept);
        visible.push(item);
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
        visible = visible.len(),
        hidden = hidden.total(),
        browsing_level = hidden.browsing_level,
        no_images = hidden.no_images,
        "filtered"
    );

    Filtered {
        items: visible,
        hidden,
    }
}

/// Run each image through the child rules, counting exclusions in `hidden`
fn filter_images(
    images: Vec<ImageRef>,
    parent_owner: Option<u64>,
    children: &ChildRules,
    env: &FilterEnv<'_>,
    hidden: &mut HiddenTally,
) -> Vec<ImageRef> {
    images
        .into_iter()
        .filter(|image| {
            let child = ChildImage {
                image,
                parent_owner,
            };
            match rules::evaluate(&child, children.rules, env) {
                Verdict::Keep => true,
                Verdict::Hide(reason) => {
                    hidden.bump(reason);
                    false
                }
            }
        })
        .collect()
}

/// Stable partition: images matching the browsing level first
fn sort_by_browsing_level(images: &mut [ImageRef], ctx: &ViewerContext) {
    images.sort_by_key(|image| !ctx.browsing_level.intersects(image.nsfw_level));
}

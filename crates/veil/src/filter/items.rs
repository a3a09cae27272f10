//! Content item shapes consumed by the filter
//!
//! These mirror the JSON the presentation layer hands over. Only the fields the filter
//! reads are modelled. Absent arrays deserialize as empty, absent owners as `None`.

use super::content::ContentType;
use super::rules::{self, Rated, RuleSet};
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Minimal reference to a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRef {
    /// User id
    pub id: u64,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<SmolStr>,
}

impl UserRef {
    /// Reference with just an id
    pub fn new(id: u64) -> Self {
        Self { id, username: None }
    }
}

/// An image attached to a model, post, article, collection or bounty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRef {
    /// Image id
    pub id: u64,
    /// Single-tier maturity level
    #[serde(default)]
    pub nsfw_level: u32,
    /// Uploader, when it differs from (or isn't implied by) the parent's owner
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    /// Tag ids
    #[serde(default, alias = "tags", skip_serializing_if = "Vec::is_empty")]
    pub tag_ids: Vec<u64>,
}

impl ImageRef {
    /// Untagged image with no explicit uploader
    pub fn new(id: u64, nsfw_level: u32) -> Self {
        Self {
            id,
            nsfw_level,
            user_id: None,
            tag_ids: Vec::new(),
        }
    }
}

/// An image nested under a parent, borrowing the parent's owner when it has none of its own
pub(crate) struct ChildImage<'a> {
    pub(crate) image: &'a ImageRef,
    pub(crate) parent_owner: Option<u64>,
}

impl Rated for ChildImage<'_> {
    fn id(&self) -> u64 {
        self.image.id
    }

    fn nsfw_level(&self) -> u32 {
        self.image.nsfw_level
    }

    fn owner_id(&self) -> Option<u64> {
        self.image.user_id.or(self.parent_owner)
    }

    fn tag_ids(&self) -> &[u64] {
        &self.image.tag_ids
    }
}

/// Content that can be run through the visibility filter
///
/// Each implementor names its [`ContentType`] and the [`RuleSet`] describing how it is
/// filtered. Container types also expose their images so the filter can replace them with
/// the visible subset on the returned copy.
pub trait Filterable: Rated + Clone {
    /// Content type this shape belongs to
    const CONTENT_TYPE: ContentType;

    /// Rule descriptor for this type
    const RULES: RuleSet;

    /// Remove the attached images for sub-filtering
    fn take_images(&mut self) -> Vec<ImageRef> {
        Vec::new()
    }

    /// Put the filtered images back
    fn set_images(&mut self, _images: Vec<ImageRef>) {}

    /// Whether the item is flagged nsfw as a whole
    fn is_nsfw(&self) -> bool {
        false
    }
}

/// A model with its showcase images
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelItem {
    /// Model id
    pub id: u64,
    /// Display name
    #[serde(default)]
    pub name: SmolStr,
    /// Maturity bitmask
    #[serde(default)]
    pub nsfw_level: u32,
    /// Flagged nsfw by its creator
    #[serde(default)]
    pub nsfw: bool,
    /// Creator
    #[serde(default)]
    pub user: Option<UserRef>,
    /// Tag ids
    #[serde(default, alias = "tags")]
    pub tag_ids: Vec<u64>,
    /// Showcase images
    #[serde(default)]
    pub images: Vec<ImageRef>,
}

/// A standalone image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageItem {
    /// Image id
    pub id: u64,
    /// Single-tier maturity level
    #[serde(default)]
    pub nsfw_level: u32,
    /// Uploader
    #[serde(default)]
    pub user: Option<UserRef>,
    /// Tag ids
    #[serde(default, alias = "tags")]
    pub tag_ids: Vec<u64>,
}

/// An article with an optional cover image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleItem {
    /// Article id
    pub id: u64,
    /// Title
    #[serde(default)]
    pub title: SmolStr,
    /// Maturity bitmask
    #[serde(default)]
    pub nsfw_level: u32,
    /// Author
    #[serde(default)]
    pub user: Option<UserRef>,
    /// Tag ids
    #[serde(default, alias = "tags")]
    pub tag_ids: Vec<u64>,
    /// Cover image
    #[serde(default)]
    pub cover_image: Option<ImageRef>,
}

/// A user profile card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserItem {
    /// User id
    pub id: u64,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<SmolStr>,
}

/// A collection with its images and an optional featured image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionItem {
    /// Collection id
    pub id: u64,
    /// Display name
    #[serde(default)]
    pub name: SmolStr,
    /// Maturity bitmask
    #[serde(default)]
    pub nsfw_level: u32,
    /// Curator
    #[serde(default)]
    pub user: Option<UserRef>,
    /// Tag ids
    #[serde(default, alias = "tags")]
    pub tag_ids: Vec<u64>,
    /// Featured image
    #[serde(default)]
    pub image: Option<ImageRef>,
    /// Images in the collection
    #[serde(default)]
    pub images: Vec<ImageRef>,
}

/// A bounty with its example images
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BountyItem {
    /// Bounty id
    pub id: u64,
    /// Display name
    #[serde(default)]
    pub name: SmolStr,
    /// Maturity bitmask
    #[serde(default)]
    pub nsfw_level: u32,
    /// Poster
    #[serde(default)]
    pub user: Option<UserRef>,
    /// Tag ids
    #[serde(default, alias = "tags")]
    pub tag_ids: Vec<u64>,
    /// Example images
    #[serde(default)]
    pub images: Vec<ImageRef>,
}

/// A post grouping one or more images
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostItem {
    /// Post id
    pub id: u64,
    /// Maturity bitmask
    #[serde(default)]
    pub nsfw_level: u32,
    /// Author
    #[serde(default)]
    pub user: Option<UserRef>,
    /// Tag ids
    #[serde(default, alias = "tags")]
    pub tag_ids: Vec<u64>,
    /// Images in the post
    #[serde(default)]
    pub images: Vec<ImageRef>,
}

/// A tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagItem {
    /// Tag id
    pub id: u64,
    /// Tag name
    #[serde(default)]
    pub name: SmolStr,
    /// Maturity level
    #[serde(default)]
    pub nsfw_level: u32,
}

/// Implements [`Rated`] for shapes with `id`, `nsfw_level`, `user` and `tag_ids` fields
macro_rules! rated_owned_tagged {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Rated for $ty {
                fn id(&self) -> u64 {
                    self.id
                }

                fn nsfw_level(&self) -> u32 {
                    self.nsfw_level
                }

                fn owner_id(&self) -> Option<u64> {
                    self.user.as_ref().map(|u| u.id)
                }

                fn tag_ids(&self) -> &[u64] {
                    &self.tag_ids
                }
            }
        )+
    };
}

rated_owned_tagged!(
    ModelItem,
    ImageItem,
    ArticleItem,
    CollectionItem,
    BountyItem,
    PostItem
);

impl Filterable for ModelItem {
    const CONTENT_TYPE: ContentType = ContentType::Models;
    const RULES: RuleSet = rules::MODELS;

    fn take_images(&mut self) -> Vec<ImageRef> {
        std::mem::take(&mut self.images)
    }

    fn set_images(&mut self, images: Vec<ImageRef>) {
        self.images = images;
    }

    fn is_nsfw(&self) -> bool {
        self.nsfw
    }
}

impl Filterable for ImageItem {
    const CONTENT_TYPE: ContentType = ContentType::Images;
    const RULES: RuleSet = rules::IMAGES;
}

impl Filterable for ArticleItem {
    const CONTENT_TYPE: ContentType = ContentType::Articles;
    const RULES: RuleSet = rules::ARTICLES;

    fn take_images(&mut self) -> Vec<ImageRef> {
        self.cover_image.take().into_iter().collect()
    }

    fn set_images(&mut self, images: Vec<ImageRef>) {
        self.cover_image = images.into_iter().next();
    }
}

impl Rated for UserItem {
    fn id(&self) -> u64 {
        self.id
    }

    // users are never rated
    fn nsfw_level(&self) -> u32 {
        0
    }

    fn owner_id(&self) -> Option<u64> {
        Some(self.id)
    }
}

impl Filterable for UserItem {
    const CONTENT_TYPE: ContentType = ContentType::Users;
    const RULES: RuleSet = rules::USERS;
}

impl Filterable for CollectionItem {
    const CONTENT_TYPE: ContentType = ContentType::Collections;
    const RULES: RuleSet = rules::COLLECTIONS;

    /// Featured image first (unless it's already in the list), then the rest.
    fn take_images(&mut self) -> Vec<ImageRef> {
        let mut images = std::mem::take(&mut self.images);
        if let Some(featured) = &self.image {
            if !images.iter().any(|i| i.id == featured.id) {
                images.insert(0, featured.clone());
            }
        }
        images
    }

    fn set_images(&mut self, images: Vec<ImageRef>) {
        self.image = self
            .image
            .take()
            .filter(|featured| images.iter().any(|i| i.id == featured.id));
        self.images = images;
    }
}

impl Filterable for BountyItem {
    const CONTENT_TYPE: ContentType = ContentType::Bounties;
    const RULES: RuleSet = rules::BOUNTIES;

    fn take_images(&mut self) -> Vec<ImageRef> {
        std::mem::take(&mut self.images)
    }

    fn set_images(&mut self, images: Vec<ImageRef>) {
        self.images = images;
    }
}

impl Filterable for PostItem {
    const CONTENT_TYPE: ContentType = ContentType::Posts;
    const RULES: RuleSet = rules::POSTS;

    fn take_images(&mut self) -> Vec<ImageRef> {
        std::mem::take(&mut self.images)
    }

    fn set_images(&mut self, images: Vec<ImageRef>) {
        self.images = images;
    }
}

impl Rated for TagItem {
    fn id(&self) -> u64 {
        self.id
    }

    fn nsfw_level(&self) -> u32 {
        self.nsfw_level
    }
}

impl Filterable for TagItem {
    const CONTENT_TYPE: ContentType = ContentType::Tags;
    const RULES: RuleSet = rules::TAGS;
}

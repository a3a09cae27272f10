//! Type-erased entry point, for callers that only know the content type at runtime

use super::decision::{FilterOptions, filter};
use super::items::{
    ArticleItem, BountyItem, CollectionItem, ImageItem, ModelItem, PostItem, TagItem, UserItem,
};
use super::tally::HiddenTally;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use veil_common::{HiddenPreferences, Result, VeilError, ViewerContext};

/// The closed set of content types the filter understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// Models and their showcase images
    Models,
    /// Standalone images
    Images,
    /// Articles and their cover image
    Articles,
    /// User profiles
    Users,
    /// Collections and their images
    Collections,
    /// Bounties and their example images
    Bounties,
    /// Posts and their images
    Posts,
    /// Tags
    Tags,
}

impl ContentType {
    /// Every content type
    pub const ALL: [ContentType; 8] = [
        ContentType::Models,
        ContentType::Images,
        ContentType::Articles,
        ContentType::Users,
        ContentType::Collections,
        ContentType::Bounties,
        ContentType::Posts,
        ContentType::Tags,
    ];

    /// Lowercase plural name
    pub const fn as_str(self) -> &'static str {
        match self {
            ContentType::Models => "models",
            ContentType::Images => "images",
            ContentType::Articles => "articles",
            ContentType::Users => "users",
            ContentType::Collections => "collections",
            ContentType::Bounties => "bounties",
            ContentType::Posts => "posts",
            ContentType::Tags => "tags",
        }
    }
}

impl FromStr for ContentType {
    type Err = VeilError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ContentType::ALL
            .into_iter()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| VeilError::unsupported_type(s))
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ContentType {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let s = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

macro_rules! content_items {
    ($($variant:ident => $item:ty),+ $(,)?) => {
        /// A collection of items of a single content type
        #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
        #[serde(untagged)]
        pub enum ContentItems {
            $(
                #[doc = concat!("`", stringify!($variant), "` items")]
                $variant(Vec<$item>),
            )+
        }

        impl ContentItems {
            /// Content type of the contained items
            pub fn content_type(&self) -> ContentType {
                match self {
                    $(ContentItems::$variant(_) => ContentType::$variant,)+
                }
            }

            /// Number of items
            pub fn len(&self) -> usize {
                match self {
                    $(ContentItems::$variant(items) => items.len(),)+
                }
            }

            /// Whether there are no items
            pub fn is_empty(&self) -> bool {
                self.len() == 0
            }

            /// An empty collection for `content_type`
            pub fn empty(content_type: ContentType) -> Self {
                match content_type {
                    $(ContentType::$variant => ContentItems::$variant(Vec::new()),)+
                }
            }

            /// Parse a JSON array as items of `content_type`
            pub fn from_value(content_type: ContentType, value: serde_json::Value) -> Result<Self> {
                let items = match content_type {
                    $(ContentType::$variant => serde_json::from_value(value).map(ContentItems::$variant),)+
                };
                items.map_err(|e| {
                    VeilError::scenario(e).with_context(format!("parsing {} items", content_type))
                })
            }

            fn filter(
                &self,
                ctx: &ViewerContext,
                prefs: &HiddenPreferences,
                options: &FilterOptions,
            ) -> FilteredItems {
                match self {
                    $(
                        ContentItems::$variant(items) => {
                            let result = filter(Some(items.as_slice()), ctx, prefs, options);
                            FilteredItems {
                                items: ContentItems::$variant(result.items),
                                hidden: result.hidden,
                            }
                        }
                    )+
                }
            }
        }

        $(
            impl From<Vec<$item>> for ContentItems {
                fn from(items: Vec<$item>) -> Self {
                    ContentItems::$variant(items)
                }
            }
        )+
    };
}

content_items! {
    Models => ModelItem,
    Images => ImageItem,
    Articles => ArticleItem,
    Users => UserItem,
    Collections => CollectionItem,
    Bounties => BountyItem,
    Posts => PostItem,
    Tags => TagItem,
}

/// Type-erased filter output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilteredItems {
    /// Visible items
    pub items: ContentItems,
    /// Per-reason exclusion counts
    pub hidden: HiddenTally,
}

/// Filter a type-erased collection
///
/// `content_type` picks the rule set. Items of a different shape are a caller error and
/// yield [`MismatchedItems`](veil_common::VeilErrorKind::MismatchedItems); absent items
/// short-circuit to an empty result like [`filter`] does.
pub fn filter_items(
    content_type: ContentType,
    items: Option<&ContentItems>,
    ctx: &ViewerContext,
    prefs: &HiddenPreferences,
    options: &FilterOptions,
) -> Result<FilteredItems> {
    let Some(items) = items else {
        return Ok(FilteredItems {
            items: ContentItems::empty(content_type),
            hidden: HiddenTally::default(),
        });
    };
    if items.content_type() != content_type {
        return Err(VeilError::mismatched_items(
            content_type,
            items.content_type(),
        ));
    }
    Ok(items.filter(ctx, prefs, options))
}

/// Like [`filter_items`], with the content type given by name
///
/// Unknown names are rejected with
/// [`UnsupportedType`](veil_common::VeilErrorKind::UnsupportedType).
pub fn filter_named(
    content_type: &str,
    items: Option<&ContentItems>,
    ctx: &ViewerContext,
    prefs: &HiddenPreferences,
    options: &FilterOptions,
) -> Result<FilteredItems> {
    filter_items(content_type.parse()?, items, ctx, prefs, options)
}

//! Maturity tiers and browsing-level bitmasks
//!
//! Every piece of content carries an `nsfwLevel`. Depending on the content kind that is
//! either a single tier ([`NsfwLevel`]) or a bitmask of tiers. A viewer's
//! [`BrowsingLevel`] is always a bitmask of the tiers they have enabled.

use crate::error::VeilError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::BitOr;
use std::str::FromStr;

/// A single maturity tier, stored as its bit value
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u32)]
pub enum NsfwLevel {
    /// General audiences
    Pg = 1,
    /// Mild content
    Pg13 = 2,
    /// Mature content
    R = 4,
    /// Adult content
    X = 8,
    /// Explicit adult content
    Xxx = 16,
    /// Content that is never shown outside moderation tooling
    Blocked = 32,
}

impl NsfwLevel {
    /// All tiers, lowest first
    pub const ALL: [NsfwLevel; 6] = [
        NsfwLevel::Pg,
        NsfwLevel::Pg13,
        NsfwLevel::R,
        NsfwLevel::X,
        NsfwLevel::Xxx,
        NsfwLevel::Blocked,
    ];

    /// Level value of unrated content
    pub const UNRATED: u32 = 0;

    /// Bit value of this tier
    #[inline]
    pub const fn bits(self) -> u32 {
        self as u32
    }

    /// Whether a raw level sits above the PG-13 tier
    ///
    /// Used for the tag maturity threshold. A bitmask counts as above PG-13 if any
    /// tier beyond PG-13 is set.
    #[inline]
    pub const fn is_above_pg13(level: u32) -> bool {
        level > NsfwLevel::Pg13 as u32
    }

    /// Lowercase name, as accepted by [`BrowsingLevel::from_str`]
    pub const fn as_str(self) -> &'static str {
        match self {
            NsfwLevel::Pg => "pg",
            NsfwLevel::Pg13 => "pg13",
            NsfwLevel::R => "r",
            NsfwLevel::X => "x",
            NsfwLevel::Xxx => "xxx",
            NsfwLevel::Blocked => "blocked",
        }
    }
}

impl FromStr for NsfwLevel {
    type Err = VeilError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase().replace('-', "");
        NsfwLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == name)
            .ok_or_else(|| VeilError::invalid_level(s))
    }
}

impl fmt::Display for NsfwLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bitmask of the maturity tiers a viewer has enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BrowsingLevel(pub u32);

impl BrowsingLevel {
    /// Nothing enabled
    pub const NONE: BrowsingLevel = BrowsingLevel(0);
    /// PG only
    pub const PUBLIC: BrowsingLevel = BrowsingLevel(NsfwLevel::Pg.bits());
    /// PG and PG-13
    pub const SFW: BrowsingLevel = BrowsingLevel(NsfwLevel::Pg.bits() | NsfwLevel::Pg13.bits());
    /// R, X and XXX
    pub const NSFW: BrowsingLevel =
        BrowsingLevel(NsfwLevel::R.bits() | NsfwLevel::X.bits() | NsfwLevel::Xxx.bits());
    /// Every tier a viewer may enable
    pub const ALL: BrowsingLevel = BrowsingLevel(Self::SFW.0 | Self::NSFW.0);

    /// Raw mask
    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Whether `level` shares at least one tier with this mask
    #[inline]
    pub const fn intersects(self, level: u32) -> bool {
        self.0 & level != 0
    }

    /// Whether a single tier is enabled
    #[inline]
    pub const fn contains(self, tier: NsfwLevel) -> bool {
        self.0 & tier.bits() != 0
    }

    /// Bit value of the highest enabled tier, or 0 for an empty mask
    pub const fn max_tier(self) -> u32 {
        if self.0 == 0 {
            0
        } else {
            1 << (31 - self.0.leading_zeros())
        }
    }

    /// Whether content at `level` may be shown under this mask
    ///
    /// With `allow_lower_levels` the test becomes "the highest tier of `level` does not
    /// exceed the highest enabled tier", otherwise it is plain bit intersection.
    #[inline]
    pub const fn allows(self, level: u32, allow_lower_levels: bool) -> bool {
        if allow_lower_levels {
            BrowsingLevel(level).max_tier() <= self.max_tier()
        } else {
            self.intersects(level)
        }
    }

    /// Enabled tiers, lowest first
    pub fn tiers(self) -> impl Iterator<Item = NsfwLevel> {
        NsfwLevel::ALL.into_iter().filter(move |t| self.contains(*t))
    }
}

impl From<NsfwLevel> for BrowsingLevel {
    fn from(level: NsfwLevel) -> Self {
        BrowsingLevel(level.bits())
    }
}

impl From<u32> for BrowsingLevel {
    fn from(bits: u32) -> Self {
        BrowsingLevel(bits)
    }
}

impl BitOr for BrowsingLevel {
    type Output = BrowsingLevel;

    fn bitor(self, rhs: Self) -> Self::Output {
        BrowsingLevel(self.0 | rhs.0)
    }
}

impl BitOr<NsfwLevel> for BrowsingLevel {
    type Output = BrowsingLevel;

    fn bitor(self, rhs: NsfwLevel) -> Self::Output {
        BrowsingLevel(self.0 | rhs.bits())
    }
}

impl BitOr for NsfwLevel {
    type Output = BrowsingLevel;

    fn bitor(self, rhs: Self) -> Self::Output {
        BrowsingLevel(self.bits() | rhs.bits())
    }
}

/// Parses either a raw integer mask (`"3"`) or a `|`/`,` separated list of tier
/// names (`"pg|pg13"`). The named presets `sfw`, `nsfw`, `all` and `public` are
/// also accepted as list entries.
impl FromStr for BrowsingLevel {
    type Err = VeilError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(bits) = s.parse::<u32>() {
            return Ok(BrowsingLevel(bits));
        }
        let mut mask = BrowsingLevel::NONE;
        for part in s.split(['|', ',']).map(str::trim).filter(|p| !p.is_empty()) {
            mask = mask
                | match part.to_ascii_lowercase().as_str() {
                    "sfw" => BrowsingLevel::SFW,
                    "nsfw" => BrowsingLevel::NSFW,
                    "all" => BrowsingLevel::ALL,
                    "public" => BrowsingLevel::PUBLIC,
                    _ => BrowsingLevel::from(part.parse::<NsfwLevel>()?),
                };
        }
        if mask == BrowsingLevel::NONE {
            return Err(VeilError::invalid_level(s));
        }
        Ok(mask)
    }
}

impl fmt::Display for BrowsingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for tier in self.tiers() {
            if !first {
                f.write_str("|")?;
            }
            f.write_str(tier.as_str())?;
            first = false;
        }
        if first {
            write!(f, "{}", self.0)?;
        }
        Ok(())
    }
}

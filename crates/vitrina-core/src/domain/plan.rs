//! Plan tiers: duration table, rank weights, and the expiry predicate.
//!
//! Tier names are parsed case-insensitively into [`PlanTier`] and the enum is
//! what gets stored and compared. English names and the Spanish names
//! (`Basico`, `Destacado`) are both accepted.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const BASIC_PLAN_DAYS: i64 = 30;
pub const PREMIUM_PLAN_DAYS: i64 = 60;
pub const FEATURED_PLAN_DAYS: i64 = 90;

/// Duration granted to a tier name nobody recognizes.
pub const FALLBACK_PLAN_DAYS: i64 = 30;

/// Rank of listings without a boosting tier. Lower sorts first.
pub const UNBOOSTED_RANK: u8 = 2;

/// How many Featured listings the home page shows.
pub const HOME_FEATURED_LIMIT: usize = 4;

/// A paid visibility tier.
///
/// `Unlisted` keeps an unrecognized tier name verbatim. Activation accepts
/// it permissively and grants the fallback duration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PlanTier {
    Basic,
    Premium,
    Featured,
    Unlisted(String),
}

impl PlanTier {
    /// Parse a free-text tier name.
    ///
    /// Returns `None` for a blank name, which callers treat as "no tier
    /// supplied".
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        let tier = match trimmed.to_lowercase().as_str() {
            "basic" | "basico" | "básico" => PlanTier::Basic,
            "premium" => PlanTier::Premium,
            "featured" | "destacado" => PlanTier::Featured,
            _ => PlanTier::Unlisted(trimmed.to_string()),
        };
        Some(tier)
    }

    pub fn duration(&self) -> Duration {
        let days = match self {
            PlanTier::Basic => BASIC_PLAN_DAYS,
            PlanTier::Premium => PREMIUM_PLAN_DAYS,
            PlanTier::Featured => FEATURED_PLAN_DAYS,
            PlanTier::Unlisted(_) => FALLBACK_PLAN_DAYS,
        };
        Duration::days(days)
    }

    /// Sort weight for public listings: Featured, then Premium, then the rest.
    pub fn rank(&self) -> u8 {
        match self {
            PlanTier::Featured => 0,
            PlanTier::Premium => 1,
            PlanTier::Basic | PlanTier::Unlisted(_) => UNBOOSTED_RANK,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            PlanTier::Basic => "Basic",
            PlanTier::Premium => "Premium",
            PlanTier::Featured => "Featured",
            PlanTier::Unlisted(name) => name,
        }
    }
}

impl fmt::Display for PlanTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Stored values are never blank, but an old or hand-edited file might be.
impl From<String> for PlanTier {
    fn from(raw: String) -> Self {
        PlanTier::parse(&raw).unwrap_or(PlanTier::Unlisted(raw))
    }
}

impl From<PlanTier> for String {
    fn from(tier: PlanTier) -> Self {
        tier.as_str().to_string()
    }
}

/// Rank for an optional plan; no plan sorts with the unboosted tiers.
pub fn rank_of(plan: Option<&PlanTier>) -> u8 {
    plan.map_or(UNBOOSTED_RANK, PlanTier::rank)
}

/// A plan window has elapsed once its expiry is strictly before `now`.
pub fn is_expired(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    expires_at < now
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::basic("Basic", PlanTier::Basic)]
    #[case::lowercase("premium", PlanTier::Premium)]
    #[case::uppercase("FEATURED", PlanTier::Featured)]
    #[case::spanish_basic("Basico", PlanTier::Basic)]
    #[case::spanish_accent("básico", PlanTier::Basic)]
    #[case::spanish_featured("destacado", PlanTier::Featured)]
    #[case::padded("  Premium ", PlanTier::Premium)]
    #[case::unknown("Gold", PlanTier::Unlisted("Gold".to_string()))]
    fn parse_is_case_insensitive(#[case] raw: &str, #[case] expected: PlanTier) {
        assert_eq!(PlanTier::parse(raw), Some(expected));
    }

    #[rstest]
    #[case::empty("")]
    #[case::whitespace("   ")]
    fn parse_blank_is_none(#[case] raw: &str) {
        assert_eq!(PlanTier::parse(raw), None);
    }

    #[rstest]
    #[case::basic(PlanTier::Basic, 30)]
    #[case::premium(PlanTier::Premium, 60)]
    #[case::featured(PlanTier::Featured, 90)]
    #[case::unlisted(PlanTier::Unlisted("Gold".to_string()), 30)]
    fn duration_table(#[case] tier: PlanTier, #[case] days: i64) {
        assert_eq!(tier.duration(), Duration::days(days));
    }

    #[rstest]
    #[case::featured(Some(PlanTier::Featured), 0)]
    #[case::premium(Some(PlanTier::Premium), 1)]
    #[case::basic(Some(PlanTier::Basic), 2)]
    #[case::unlisted(Some(PlanTier::Unlisted("Gold".to_string())), 2)]
    #[case::none(None, 2)]
    fn rank_table(#[case] plan: Option<PlanTier>, #[case] rank: u8) {
        assert_eq!(rank_of(plan.as_ref()), rank);
    }

    #[test]
    fn expiry_is_strict() {
        let now = Utc::now();
        assert!(is_expired(now - Duration::seconds(1), now));
        assert!(!is_expired(now, now));
        assert!(!is_expired(now + Duration::seconds(1), now));
    }

    #[test]
    fn serializes_canonical_name() {
        let json = serde_json::to_string(&PlanTier::parse("destacado").unwrap()).unwrap();
        assert_eq!(json, "\"Featured\"");

        let back: PlanTier = serde_json::from_str("\"premium\"").unwrap();
        assert_eq!(back, PlanTier::Premium);
    }
}

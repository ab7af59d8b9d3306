use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Identifier wrapper for clinic organizations (tenants).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TenantId(pub u64);

/// Identifier wrapper for clinic customers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CustomerId(pub u64);

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Behavioral lifecycle segment assigned from an R/F/M score triple.
///
/// Declaration order is the canonical reporting order; `Ord` follows it so
/// distributions keyed by segment iterate the same way every run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Segment {
    Champions,
    Loyal,
    Potential,
    New,
    Promising,
    NeedAttention,
    AboutToSleep,
    AtRisk,
    Hibernating,
    Lost,
}

impl Segment {
    pub const fn ordered() -> [Self; 10] {
        [
            Self::Champions,
            Self::Loyal,
            Self::Potential,
            Self::New,
            Self::Promising,
            Self::NeedAttention,
            Self::AboutToSleep,
            Self::AtRisk,
            Self::Hibernating,
            Self::Lost,
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Champions => "champions",
            Self::Loyal => "loyal",
            Self::Potential => "potential",
            Self::New => "new",
            Self::Promising => "promising",
            Self::NeedAttention => "need_attention",
            Self::AboutToSleep => "about_to_sleep",
            Self::AtRisk => "at_risk",
            Self::Hibernating => "hibernating",
            Self::Lost => "lost",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Champions => "Champions",
            Self::Loyal => "Loyal Customers",
            Self::Potential => "Potential Loyalists",
            Self::New => "New Customers",
            Self::Promising => "Promising",
            Self::NeedAttention => "Need Attention",
            Self::AboutToSleep => "About to Sleep",
            Self::AtRisk => "At Risk",
            Self::Hibernating => "Hibernating",
            Self::Lost => "Lost",
        }
    }

    pub const fn recommended_action(self) -> &'static str {
        match self {
            Self::Champions => {
                "Offer VIP-only perks, priority booking and a referral reward program"
            }
            Self::Loyal => {
                "Maintain the relationship, grant loyalty rewards and invite them to try new treatments"
            }
            Self::Potential => {
                "Offer upgrade promotions, recommend high-value treatments and build a long-term relationship"
            }
            Self::New => {
                "Send a welcome offer, introduce popular treatments and secure the first return visit"
            }
            Self::Promising => {
                "Run limited-time offers, recommend package bundles and raise visit frequency"
            }
            Self::NeedAttention => {
                "Understand changing needs, propose tailored plans and rebuild perceived value"
            }
            Self::AboutToSleep => {
                "Send a reactivation offer, remind them of treatment results and give a limited comeback discount"
            }
            Self::AtRisk => {
                "Make an urgent care call, offer a strong win-back discount and learn why they left"
            }
            Self::Hibernating => {
                "Send an aggressive wake-up offer, reintroduce services and weigh the cost of re-engagement"
            }
            Self::Lost => {
                "Make a final reactivation attempt, analyse churn causes and adjust marketing strategy"
            }
        }
    }

    pub const fn urgency(self) -> UrgencyTier {
        match self {
            Self::AtRisk | Self::AboutToSleep => UrgencyTier::High,
            Self::NeedAttention | Self::Hibernating | Self::New => UrgencyTier::Medium,
            Self::Champions | Self::Loyal | Self::Potential | Self::Promising | Self::Lost => {
                UrgencyTier::Low
            }
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown customer segment '{0}'")]
pub struct SegmentParseError(pub String);

impl FromStr for Segment {
    type Err = SegmentParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        Self::ordered()
            .into_iter()
            .find(|segment| segment.as_str() == normalized)
            .ok_or_else(|| SegmentParseError(value.to_string()))
    }
}

/// Fixed follow-up priority for a segment in the summary view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyTier {
    High,
    Medium,
    Low,
}

impl UrgencyTier {
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

/// A single axis score, always within `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RfmScore(u8);

impl RfmScore {
    pub const MIN: Self = Self(1);
    pub const MAX: Self = Self(5);

    pub const fn new(value: u8) -> Option<Self> {
        if value >= 1 && value <= 5 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Callers pass a literal rank from a rubric; the range is not rechecked.
    pub(crate) const fn from_rank(value: u8) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for RfmScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RfmScores {
    pub recency: RfmScore,
    pub frequency: RfmScore,
    pub monetary: RfmScore,
}

impl RfmScores {
    pub const fn new(recency: RfmScore, frequency: RfmScore, monetary: RfmScore) -> Self {
        Self {
            recency,
            frequency,
            monetary,
        }
    }

    /// Sum of the three axes, `3..=15`.
    pub const fn total(&self) -> u8 {
        self.recency.0 + self.frequency.0 + self.monetary.0
    }

    /// Compact `"R-F-M"` form used in reports.
    pub fn code(&self) -> String {
        format!("{}-{}-{}", self.recency, self.frequency, self.monetary)
    }
}

/// Per-segment population counts. Every segment is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SegmentDistribution(BTreeMap<Segment, usize>);

impl SegmentDistribution {
    pub fn zeroed() -> Self {
        Self(
            Segment::ordered()
                .into_iter()
                .map(|segment| (segment, 0))
                .collect(),
        )
    }

    pub fn record(&mut self, segment: Segment) {
        *self.0.entry(segment).or_insert(0) += 1;
    }

    pub fn count(&self, segment: Segment) -> usize {
        self.0.get(&segment).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Segment, usize)> + '_ {
        self.0.iter().map(|(segment, count)| (*segment, *count))
    }
}

impl Default for SegmentDistribution {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl FromIterator<Segment> for SegmentDistribution {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        let mut distribution = Self::zeroed();
        for segment in iter {
            distribution.record(segment);
        }
        distribution
    }
}

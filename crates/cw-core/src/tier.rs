//! Occupancy-ratio status tiers.

/// Derived crowd classification of a site.
///
/// | Tier       | Occupancy ratio     |
/// |------------|---------------------|
/// | `Safe`     | `< 0.50`            |
/// | `Moderate` | `0.50 ..< 0.80`     |
/// | `Crowded`  | `>= 0.80`           |
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum StatusTier {
    #[default]
    Safe,
    Moderate,
    Crowded,
}

impl StatusTier {
    /// Lower bound of `Moderate`, in percent.
    pub const MODERATE_PCT: u64 = 50;
    /// Lower bound of `Crowded`, in percent.
    pub const CROWDED_PCT: u64 = 80;

    /// Classify `occupancy / capacity` with exact integer arithmetic.
    ///
    /// A zero capacity is treated as full.
    pub fn classify(occupancy: u32, capacity: u32) -> StatusTier {
        if capacity == 0 {
            return StatusTier::Crowded;
        }
        let scaled = occupancy as u64 * 100;
        let cap = capacity as u64;
        if scaled < cap * Self::MODERATE_PCT {
            StatusTier::Safe
        } else if scaled < cap * Self::CROWDED_PCT {
            StatusTier::Moderate
        } else {
            StatusTier::Crowded
        }
    }

    /// Human-readable label, used for CSV column values and CLI filters.
    pub fn as_str(self) -> &'static str {
        match self {
            StatusTier::Safe     => "safe",
            StatusTier::Moderate => "moderate",
            StatusTier::Crowded  => "crowded",
        }
    }
}

impl std::fmt::Display for StatusTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for StatusTier {
    type Err = crate::CwError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "safe"     => Ok(StatusTier::Safe),
            "moderate" => Ok(StatusTier::Moderate),
            "crowded"  => Ok(StatusTier::Crowded),
            other => Err(crate::CwError::Parse(format!(
                "invalid status tier {other:?}: expected \"safe\", \"moderate\", or \"crowded\""
            ))),
        }
    }
}

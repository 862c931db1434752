use serde::Serialize;
use std::fmt;

use crate::error::LimnosError;
use crate::model::Dataset;
use crate::profile::schema::Profile;
use crate::query::{family_observations, Observation, TrendQuery};

/// Safety tier relative to a single threshold T, in ascending order of
/// danger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SafetyTier {
    /// `value <= T`
    Safe,
    /// `T < value <= 2T`
    Warning,
    /// `value > 2T`
    Danger,
}

impl SafetyTier {
    /// Advisory text shown next to a reading in this tier.
    pub fn implication(&self) -> &'static str {
        match self {
            SafetyTier::Safe => {
                "Safe level: below the regulatory threshold. No immediate action required."
            }
            SafetyTier::Warning => {
                "Moderate level: above the regulatory threshold. Continued monitoring recommended."
            }
            SafetyTier::Danger => {
                "High level: significantly above the threshold. Investigate the source and consider remediation."
            }
        }
    }
}

impl fmt::Display for SafetyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SafetyTier::Safe => write!(f, "safe"),
            SafetyTier::Warning => write!(f, "warning"),
            SafetyTier::Danger => write!(f, "danger"),
        }
    }
}

/// Bucket `value` against `threshold`. Results `<= 0` are not real
/// detections and get no tier.
pub fn safety_tier(value: f64, threshold: f64) -> Option<SafetyTier> {
    if value.is_nan() || value <= 0.0 {
        return None;
    }
    if value <= threshold {
        Some(SafetyTier::Safe)
    } else if value <= threshold * 2.0 {
        Some(SafetyTier::Warning)
    } else {
        Some(SafetyTier::Danger)
    }
}

/// Observations partitioned by safety tier.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TierBuckets {
    pub threshold: f64,
    pub safe: Vec<Observation>,
    pub warning: Vec<Observation>,
    pub danger: Vec<Observation>,
}

impl TierBuckets {
    pub fn get(&self, tier: SafetyTier) -> &[Observation] {
        match tier {
            SafetyTier::Safe => &self.safe,
            SafetyTier::Warning => &self.warning,
            SafetyTier::Danger => &self.danger,
        }
    }

    pub fn total(&self) -> usize {
        self.safe.len() + self.warning.len() + self.danger.len()
    }

    /// Value range over every bucketed observation.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.safe
            .iter()
            .chain(&self.warning)
            .chain(&self.danger)
            .map(|o| o.value)
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

/// Partition observations into tiers, keeping input order within each
/// bucket. Non-positive results and invalid timestamps are left out.
pub fn tier_buckets(observations: &[Observation], threshold: f64) -> TierBuckets {
    let mut buckets = TierBuckets {
        threshold,
        ..Default::default()
    };

    for obs in observations.iter().filter(|o| o.timestamp.is_some()) {
        match safety_tier(obs.value, threshold) {
            Some(SafetyTier::Safe) => buckets.safe.push(obs.clone()),
            Some(SafetyTier::Warning) => buckets.warning.push(obs.clone()),
            Some(SafetyTier::Danger) => buckets.danger.push(obs.clone()),
            None => {}
        }
    }

    buckets
}

/// Tiered view of one family, using the family's threshold from the
/// profile.
pub fn family_tiers(
    dataset: &Dataset,
    profile: &Profile,
    query: &TrendQuery,
) -> Result<TierBuckets, LimnosError> {
    let threshold = profile
        .threshold(&query.family)
        .ok_or_else(|| LimnosError::MissingThreshold(query.family.clone()))?;
    let observations = family_observations(dataset, profile, query)?;
    Ok(tier_buckets(&observations, threshold))
}

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::error::LimnosError;
use crate::model::{Dataset, Determinand, SamplingPoint};
use crate::profile::schema::{ComplianceDef, FamilyDef, Profile};
use crate::query::family::count_in_family;

/// Prefix the bathing-water export puts in front of litter definitions.
pub const LITTER_DEFINITION_PREFIX: &str = "Bathing Water Profile : ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ComplianceStatus {
    Compliant,
    Caution,
    #[serde(rename = "Non-Compliant")]
    NonCompliant,
}

impl fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComplianceStatus::Compliant => write!(f, "Compliant"),
            ComplianceStatus::Caution => write!(f, "Caution"),
            ComplianceStatus::NonCompliant => write!(f, "Non-Compliant"),
        }
    }
}

/// Percentage bands: below `caution_pct` is compliant, up to and including
/// `non_compliant_pct` is caution, above it is non-compliant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComplianceBands {
    pub caution_pct: f64,
    pub non_compliant_pct: f64,
}

impl Default for ComplianceBands {
    fn default() -> Self {
        ComplianceBands {
            caution_pct: 5.0,
            non_compliant_pct: 10.0,
        }
    }
}

impl From<&ComplianceDef> for ComplianceBands {
    fn from(def: &ComplianceDef) -> Self {
        ComplianceBands {
            caution_pct: def.caution_pct,
            non_compliant_pct: def.non_compliant_pct,
        }
    }
}

/// `family_count / total_count * 100`, with zero determinands read as 0 %.
pub fn compliance_ratio(family_count: usize, total_count: usize) -> f64 {
    if total_count == 0 {
        return 0.0;
    }
    family_count as f64 / total_count as f64 * 100.0
}

pub fn compliance_status(percentage: f64, bands: &ComplianceBands) -> ComplianceStatus {
    if percentage < bands.caution_pct {
        ComplianceStatus::Compliant
    } else if percentage <= bands.non_compliant_pct {
        ComplianceStatus::Caution
    } else {
        ComplianceStatus::NonCompliant
    }
}

/// Litter type of a determinand: its definition minus the bathing-water
/// profile prefix.
pub fn litter_type(determinand: &Determinand) -> String {
    let definition = determinand.definition.as_str();
    definition
        .strip_prefix(LITTER_DEFINITION_PREFIX)
        .unwrap_or(definition)
        .to_string()
}

/// Compliance of one sampling point.
#[derive(Debug, Clone, Serialize)]
pub struct LocationCompliance {
    pub notation: String,
    pub location: String,
    /// Determinands in the compliance family.
    pub family_count: usize,
    pub total_count: usize,
    pub percentage: f64,
    pub status: ComplianceStatus,
    /// Family determinand counts by litter type.
    pub breakdown: BTreeMap<String, usize>,
}

pub fn point_compliance(
    point: &SamplingPoint,
    family: &FamilyDef,
    bands: &ComplianceBands,
) -> LocationCompliance {
    let family_count = count_in_family(point, family);
    let total_count = point.determinand_count();

    let mut breakdown = BTreeMap::new();
    for d in point
        .samples()
        .iter()
        .flat_map(|s| s.determinands())
        .filter(|d| family.matches(d))
    {
        *breakdown.entry(litter_type(d)).or_insert(0) += 1;
    }

    let percentage = compliance_ratio(family_count, total_count);
    LocationCompliance {
        notation: point.notation.clone(),
        location: point.label.clone(),
        family_count,
        total_count,
        percentage,
        status: compliance_status(percentage, bands),
        breakdown,
    }
}

/// Compliance for every point, in insertion order, using the profile's
/// compliance family and bands.
pub fn compliance_by_location(
    dataset: &Dataset,
    profile: &Profile,
) -> Result<Vec<LocationCompliance>, LimnosError> {
    let family = profile.compliance_family()?;
    let bands = ComplianceBands::from(&profile.compliance);
    Ok(dataset
        .points()
        .iter()
        .map(|p| point_compliance(p, family, &bands))
        .collect())
}

/// Roll-up across locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComplianceSummary {
    pub compliant: usize,
    pub total: usize,
    /// Compliant when every location is, caution when some are,
    /// non-compliant when none are.
    pub status: ComplianceStatus,
}

pub fn compliance_summary(results: &[LocationCompliance]) -> ComplianceSummary {
    let total = results.len();
    let compliant = results
        .iter()
        .filter(|r| r.status == ComplianceStatus::Compliant)
        .count();

    let status = if compliant == total {
        ComplianceStatus::Compliant
    } else if compliant > 0 {
        ComplianceStatus::Caution
    } else {
        ComplianceStatus::NonCompliant
    };

    ComplianceSummary {
        compliant,
        total,
        status,
    }
}

/// Family determinand counts by litter type, summed over all points.
pub fn litter_breakdown(results: &[LocationCompliance]) -> BTreeMap<String, usize> {
    let mut totals = BTreeMap::new();
    for r in results {
        for (kind, count) in &r.breakdown {
            *totals.entry(kind.clone()).or_insert(0) += count;
        }
    }
    totals
}

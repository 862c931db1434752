use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::LimnosError;

/// An analysis profile: substance families, safety thresholds and
/// compliance bands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    pub families: Vec<FamilyDef>,
    /// Family name -> safety threshold T for safe/warning/danger tiers.
    #[serde(default)]
    pub thresholds: BTreeMap<String, f64>,
    pub compliance: ComplianceDef,
}

impl Profile {
    pub fn family(&self, name: &str) -> Result<&FamilyDef, LimnosError> {
        self.families
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| LimnosError::UnknownFamily(name.to_string()))
    }

    pub fn threshold(&self, family: &str) -> Option<f64> {
        self.thresholds.get(family).copied()
    }

    /// The family whose share of determinands drives compliance.
    pub fn compliance_family(&self) -> Result<&FamilyDef, LimnosError> {
        self.family(&self.compliance.family)
    }
}

/// Which determinand text the keywords are matched against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchFields {
    Label,
    Definition,
    #[default]
    Both,
}

/// A named substance family.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FamilyDef {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Case-insensitive substrings.
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub fields: MatchFields,
    /// Exact unit labels that place a determinand in this family.
    #[serde(default)]
    pub unit_labels: Vec<String>,
}

/// Percentage bands for the compliance ratio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceDef {
    pub family: String,
    pub caution_pct: f64,
    pub non_compliant_pct: f64,
}

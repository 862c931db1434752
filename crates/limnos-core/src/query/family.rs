use crate::model::{Dataset, Determinand, SamplingPoint};
use crate::profile::schema::{FamilyDef, MatchFields};
use std::collections::BTreeSet;

impl FamilyDef {
    /// Whether `determinand` belongs to this family: an exact unit-label
    /// match, or a case-insensitive keyword substring in the configured
    /// text fields.
    pub fn matches(&self, determinand: &Determinand) -> bool {
        if self
            .unit_labels
            .iter()
            .any(|u| *u == determinand.unit_label)
        {
            return true;
        }

        let label = determinand.label.to_lowercase();
        let definition = determinand.definition.to_lowercase();

        self.keywords.iter().any(|keyword| {
            let keyword = keyword.to_lowercase();
            match self.fields {
                MatchFields::Label => label.contains(&keyword),
                MatchFields::Definition => definition.contains(&keyword),
                MatchFields::Both => label.contains(&keyword) || definition.contains(&keyword),
            }
        })
    }
}

/// Names of every family `determinand` belongs to, in profile order.
/// Families may overlap, so more than one name can come back.
pub fn classify<'a>(determinand: &Determinand, families: &'a [FamilyDef]) -> Vec<&'a str> {
    families
        .iter()
        .filter(|f| f.matches(determinand))
        .map(|f| f.name.as_str())
        .collect()
}

/// Number of determinands at `point` that belong to `family`.
pub fn count_in_family(point: &SamplingPoint, family: &FamilyDef) -> usize {
    point
        .samples()
        .iter()
        .flat_map(|s| s.determinands())
        .filter(|d| family.matches(d))
        .count()
}

/// Whether `point` has at least one strictly positive result in `family`.
pub fn has_detection(point: &SamplingPoint, family: &FamilyDef) -> bool {
    point
        .samples()
        .iter()
        .flat_map(|s| s.determinands())
        .any(|d| family.matches(d) && d.result > 0.0)
}

/// Points with a positive detection in `family`, in insertion order.
pub fn points_with_family<'a>(dataset: &'a Dataset, family: &FamilyDef) -> Vec<&'a SamplingPoint> {
    dataset
        .points()
        .iter()
        .filter(|p| has_detection(p, family))
        .collect()
}

/// Sorted distinct labels of points with at least one strictly positive
/// result in `family`.
pub fn locations_with_family(dataset: &Dataset, family: &FamilyDef) -> Vec<String> {
    points_with_family(dataset, family)
        .into_iter()
        .map(|p| p.label.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

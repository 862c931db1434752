use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

use crate::query::window::parse_timestamp;

/// One measured substance within a sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Determinand {
    pub label: String,
    pub definition: String,
    pub notation: String,
    pub unit_label: String,
    pub result: f64,
}

/// One sampling event at a point, keyed by its raw `date_time` text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    /// ISO-8601 text exactly as loaded. Used verbatim as the identity key.
    pub date_time: String,
    pub purpose: String,
    pub sampled_material_type: String,
    pub is_compliance_sample: bool,
    determinands: Vec<Determinand>,
}

impl Sample {
    pub fn new(
        date_time: impl Into<String>,
        purpose: impl Into<String>,
        sampled_material_type: impl Into<String>,
        is_compliance_sample: bool,
    ) -> Self {
        Sample {
            date_time: date_time.into(),
            purpose: purpose.into(),
            sampled_material_type: sampled_material_type.into(),
            is_compliance_sample,
            determinands: Vec::new(),
        }
    }

    /// Determinands in load order.
    pub fn determinands(&self) -> &[Determinand] {
        &self.determinands
    }

    /// Parsed sample time, or `None` if `date_time` is not a recognised
    /// ISO-8601 form. Such samples stay in the hierarchy but are left out of
    /// every time-ordered query.
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.date_time)
    }

    /// Result of the first determinand with exactly this label.
    pub fn result_for(&self, label: &str) -> Option<f64> {
        self.determinands
            .iter()
            .find(|d| d.label == label)
            .map(|d| d.result)
    }

    pub(crate) fn push_determinand(&mut self, determinand: Determinand) {
        self.determinands.push(determinand);
    }
}

/// A monitored physical location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SamplingPoint {
    pub notation: String,
    pub label: String,
    pub northing: i64,
    pub easting: i64,
    samples: Vec<Sample>,
    #[serde(skip)]
    sample_index: HashMap<String, usize>,
}

impl SamplingPoint {
    pub fn new(
        notation: impl Into<String>,
        label: impl Into<String>,
        northing: i64,
        easting: i64,
    ) -> Self {
        SamplingPoint {
            notation: notation.into(),
            label: label.into(),
            northing,
            easting,
            samples: Vec::new(),
            sample_index: HashMap::new(),
        }
    }

    /// Samples in load order.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Exact text match on `date_time`; no timestamp normalisation.
    pub fn sample_at(&self, date_time: &str) -> Option<&Sample> {
        self.sample_index.get(date_time).map(|&i| &self.samples[i])
    }

    pub fn determinand_count(&self) -> usize {
        self.samples.iter().map(|s| s.determinands.len()).sum()
    }

    /// Returns the sample for `date_time`, appending one built by `make` if
    /// this point has none yet.
    pub(crate) fn sample_entry(
        &mut self,
        date_time: &str,
        make: impl FnOnce() -> Sample,
    ) -> &mut Sample {
        let idx = match self.sample_index.get(date_time) {
            Some(&i) => i,
            None => {
                self.samples.push(make());
                let i = self.samples.len() - 1;
                self.sample_index.insert(date_time.to_string(), i);
                i
            }
        };
        &mut self.samples[idx]
    }
}

/// Counts over a built dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DatasetStats {
    pub points: usize,
    pub samples: usize,
    pub determinands: usize,
    /// Samples whose `date_time` does not parse.
    pub invalid_timestamps: usize,
}

/// The whole loaded hierarchy. Owns every point; read-only once built.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Dataset {
    points: Vec<SamplingPoint>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sampling points.
    pub fn size(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get_by_notation(&self, notation: &str) -> Option<&SamplingPoint> {
        self.index.get(notation).map(|&i| &self.points[i])
    }

    /// First point with this label, in insertion order.
    ///
    /// Labels are not unique. When two points share a label the one loaded
    /// first wins; use [`Dataset::get_by_notation`] when identity matters.
    pub fn get_by_label(&self, label: &str) -> Option<&SamplingPoint> {
        self.points.iter().find(|p| p.label == label)
    }

    /// All points in insertion order.
    pub fn points(&self) -> &[SamplingPoint] {
        &self.points
    }

    pub fn sample_count(&self) -> usize {
        self.points.iter().map(|p| p.samples.len()).sum()
    }

    pub fn determinand_count(&self) -> usize {
        self.points.iter().map(|p| p.determinand_count()).sum()
    }

    /// Distinct point labels, sorted.
    pub fn locations(&self) -> Vec<String> {
        self.points
            .iter()
            .map(|p| p.label.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn stats(&self) -> DatasetStats {
        let invalid_timestamps = self
            .points
            .iter()
            .flat_map(|p| p.samples.iter())
            .filter(|s| s.timestamp().is_none())
            .count();

        DatasetStats {
            points: self.size(),
            samples: self.sample_count(),
            determinands: self.determinand_count(),
            invalid_timestamps,
        }
    }

    /// Returns the point for `notation`, indexing one built by `make` if
    /// it is not present yet.
    pub(crate) fn point_entry(
        &mut self,
        notation: &str,
        make: impl FnOnce() -> SamplingPoint,
    ) -> &mut SamplingPoint {
        let idx = match self.index.get(notation) {
            Some(&i) => i,
            None => {
                self.points.push(make());
                let i = self.points.len() - 1;
                self.index.insert(notation.to_string(), i);
                i
            }
        };
        &mut self.points[idx]
    }
}

use std::sync::Arc;

use crate::error::LimnosError;
use crate::ingest::{build_with, BuildOptions, SkippedRecord};
use crate::model::Dataset;
use crate::source::{Record, RecordSource};

/// Holds the current dataset and replaces it wholesale on each load.
///
/// A new dataset is built off to the side and swapped in only when the
/// build succeeds; a failed load leaves the previous dataset in place.
/// Readers hold an `Arc` snapshot, so a swap never changes a dataset
/// someone is already querying.
#[derive(Debug, Default)]
pub struct Workspace {
    current: Option<Arc<Dataset>>,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current dataset, if one has been loaded.
    pub fn current(&self) -> Option<Arc<Dataset>> {
        self.current.clone()
    }

    pub fn has_dataset(&self) -> bool {
        self.current.is_some()
    }

    /// Build a dataset from `records` and make it current.
    pub fn load(
        &mut self,
        records: &[Record],
        options: &BuildOptions,
    ) -> Result<Vec<SkippedRecord>, LimnosError> {
        let outcome = build_with(records, options)?;
        self.current = Some(Arc::new(outcome.dataset));
        Ok(outcome.skipped)
    }

    /// Read records from `source`, then [`Workspace::load`] them.
    pub fn load_from(
        &mut self,
        source: &dyn RecordSource,
        options: &BuildOptions,
    ) -> Result<Vec<SkippedRecord>, LimnosError> {
        let records = source.records()?;
        self.load(&records, options)
    }

    /// Drop the current dataset.
    pub fn clear(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::fields::*;

    fn record(notation: &str, result: &str) -> Record {
        Record::from_pairs([
            (POINT_NOTATION, notation),
            (POINT_LABEL, notation),
            (POINT_NORTHING, "0"),
            (POINT_EASTING, "0"),
            (SAMPLE_PURPOSE, ""),
            (SAMPLE_DATE_TIME, "2023-01-01T00:00:00"),
            (SAMPLE_MATERIAL, ""),
            (SAMPLE_IS_COMPLIANCE, "false"),
            (DETERMINAND_LABEL, "Lead"),
            (DETERMINAND_DEFINITION, ""),
            (DETERMINAND_NOTATION, ""),
            (DETERMINAND_UNIT, "ug/l"),
            (RESULT, result),
        ])
    }

    #[test]
    fn test_load_replaces_dataset() {
        let mut ws = Workspace::new();
        assert!(!ws.has_dataset());

        ws.load(&[record("A", "1")], &BuildOptions::default()).unwrap();
        let first = ws.current().unwrap();
        assert!(first.get_by_notation("A").is_some());

        ws.load(&[record("B", "1")], &BuildOptions::default()).unwrap();
        let second = ws.current().unwrap();
        assert!(second.get_by_notation("A").is_none());
        assert!(second.get_by_notation("B").is_some());

        // The earlier snapshot is untouched.
        assert!(first.get_by_notation("A").is_some());
    }

    #[test]
    fn test_failed_load_keeps_previous_dataset() {
        let mut ws = Workspace::new();
        ws.load(&[record("A", "1")], &BuildOptions::default()).unwrap();

        let err = ws.load(&[record("B", "1"), record("C", "bad")], &BuildOptions::default());
        assert!(err.is_err());

        let current = ws.current().unwrap();
        assert_eq!(current.size(), 1);
        assert!(current.get_by_notation("A").is_some());
        assert!(current.get_by_notation("B").is_none());
    }

    #[test]
    fn test_clear() {
        let mut ws = Workspace::new();
        ws.load(&[record("A", "1")], &BuildOptions::default()).unwrap();
        ws.clear();
        assert!(ws.current().is_none());
    }
}

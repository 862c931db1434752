pub mod fields;
pub mod values;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::LimnosError;
use crate::model::Dataset;
use crate::query::window::parse_timestamp;
use crate::source::Record;
use fields::MeasurementRow;

/// What to do with a record that fails to parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Fail the whole build on the first bad record.
    #[default]
    Abort,
    /// Drop the record, note it in [`BuildOutcome::skipped`], and continue.
    Skip,
}

#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    pub on_error: ErrorPolicy,
}

/// A record dropped under [`ErrorPolicy::Skip`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRecord {
    pub row: usize,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct BuildOutcome {
    pub dataset: Dataset,
    pub skipped: Vec<SkippedRecord>,
}

/// Fold flat records into a point -> sample -> determinand tree, aborting on
/// the first malformed record.
pub fn build(records: &[Record]) -> Result<Dataset, LimnosError> {
    build_with(records, &BuildOptions::default()).map(|outcome| outcome.dataset)
}

/// Fold flat records into a dataset using the given error policy.
///
/// Points are keyed by notation and samples by their exact `date_time`
/// text within a point; every record appends one determinand. No dataset
/// is returned when the build aborts.
pub fn build_with(
    records: &[Record],
    options: &BuildOptions,
) -> Result<BuildOutcome, LimnosError> {
    debug!(records = records.len(), policy = ?options.on_error, "building dataset");

    let mut dataset = Dataset::new();
    let mut skipped = Vec::new();

    for (idx, record) in records.iter().enumerate() {
        let row = match MeasurementRow::from_record(idx, record) {
            Ok(row) => row,
            Err(e) => match options.on_error {
                ErrorPolicy::Abort => return Err(e),
                ErrorPolicy::Skip => {
                    warn!(row = idx, error = %e, "skipping record");
                    skipped.push(SkippedRecord {
                        row: idx,
                        reason: e.to_string(),
                    });
                    continue;
                }
            },
        };

        if parse_timestamp(&row.date_time).is_none() {
            debug!(row = idx, date_time = %row.date_time, "unparseable sample time");
        }

        let point = dataset.point_entry(&row.point_notation, || row.new_point());
        let sample = point.sample_entry(&row.date_time, || row.new_sample());
        sample.push_determinand(row.determinand);
    }

    info!(
        points = dataset.size(),
        samples = dataset.sample_count(),
        determinands = dataset.determinand_count(),
        skipped = skipped.len(),
        "dataset built"
    );

    Ok(BuildOutcome { dataset, skipped })
}

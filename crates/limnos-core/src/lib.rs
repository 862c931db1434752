pub mod error;
pub mod ingest;
pub mod model;
pub mod profile;
pub mod query;
pub mod source;
pub mod workspace;

use error::LimnosError;
use ingest::{BuildOptions, BuildOutcome};
use source::RecordSource;

pub use ingest::{build, build_with, ErrorPolicy};
pub use model::{Dataset, Determinand, Sample, SamplingPoint};
pub use query::window::TimeWindow;
pub use query::{Observation, TrendQuery};
pub use workspace::Workspace;

/// Main API entry point: read every record from `source` and build a
/// dataset from them.
pub fn load(
    source: &dyn RecordSource,
    options: &BuildOptions,
) -> Result<BuildOutcome, LimnosError> {
    let records = source.records()?;
    tracing::debug!(
        source = source.source_name(),
        records = records.len(),
        "records read"
    );

    if records.is_empty() {
        tracing::warn!(source = source.source_name(), "source produced no records");
    }

    build_with(&records, options)
}

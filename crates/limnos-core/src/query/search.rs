use crate::model::Dataset;
use crate::query::{observations, sort_by_time, Observation};

/// Every determinand whose label contains `term` (case-insensitive),
/// sorted ascending by sample time.
///
/// Ties keep traversal order (point, sample, determinand insertion order).
/// Samples with an unparseable time are left out. An empty term matches
/// every determinand.
pub fn search(dataset: &Dataset, term: &str) -> Vec<Observation> {
    let needle = term.to_lowercase();
    let hits = observations(dataset)
        .into_iter()
        .filter(|o| o.determinand.to_lowercase().contains(&needle))
        .collect();
    sort_by_time(hits)
}

//! Read-only queries over a built [`Dataset`].
//!
//! Every function here takes the dataset (or observations derived from it)
//! by reference and returns a fresh value; nothing is cached between calls.

pub mod compliance;
pub mod family;
pub mod search;
pub mod tiers;
pub mod window;

use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::BTreeSet;

use crate::error::LimnosError;
use crate::model::{Dataset, Determinand, Sample, SamplingPoint};
use crate::profile::schema::Profile;
use window::{filter_window, TimeWindow};

/// One determinand result flattened with its point and sample context.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    /// Point label.
    pub location: String,
    /// Point notation.
    pub notation: String,
    /// Determinand label.
    pub determinand: String,
    pub unit: String,
    /// Sample time as loaded.
    pub date_time: String,
    /// Parsed sample time; `None` when `date_time` is not valid ISO-8601.
    pub timestamp: Option<NaiveDateTime>,
    pub value: f64,
}

impl Observation {
    pub fn new(point: &SamplingPoint, sample: &Sample, determinand: &Determinand) -> Self {
        Observation {
            location: point.label.clone(),
            notation: point.notation.clone(),
            determinand: determinand.label.clone(),
            unit: determinand.unit_label.clone(),
            date_time: sample.date_time.clone(),
            timestamp: sample.timestamp(),
            value: determinand.result,
        }
    }
}

/// Selection for a family time series.
#[derive(Debug, Clone, Default)]
pub struct TrendQuery {
    /// Restrict to points with this label. `None` means every location.
    pub location: Option<String>,
    pub family: String,
    pub window: TimeWindow,
}

/// Every determinand in the dataset, in traversal order (point, then
/// sample, then determinand insertion order). Invalid timestamps included.
pub fn observations(dataset: &Dataset) -> Vec<Observation> {
    dataset
        .points()
        .iter()
        .flat_map(|p| point_observations(p))
        .collect()
}

/// Every determinand at one point, in traversal order.
pub fn point_observations(point: &SamplingPoint) -> impl Iterator<Item = Observation> + '_ {
    point.samples().iter().flat_map(move |sample| {
        sample
            .determinands()
            .iter()
            .map(move |d| Observation::new(point, sample, d))
    })
}

/// Drop observations without a valid timestamp and sort the rest by time.
/// The sort is stable, so ties keep their incoming order.
pub fn sort_by_time(observations: Vec<Observation>) -> Vec<Observation> {
    let mut valid: Vec<Observation> = observations
        .into_iter()
        .filter(|o| o.timestamp.is_some())
        .collect();
    valid.sort_by_key(|o| o.timestamp);
    valid
}

/// Observations of one profile family, optionally at one location,
/// filtered to the query window and sorted by time.
pub fn family_observations(
    dataset: &Dataset,
    profile: &Profile,
    query: &TrendQuery,
) -> Result<Vec<Observation>, LimnosError> {
    let family = profile.family(&query.family)?;

    let population: Vec<Observation> = dataset
        .points()
        .iter()
        .filter(|p| match &query.location {
            Some(location) => p.label == *location,
            None => true,
        })
        .flat_map(|point| {
            point.samples().iter().flat_map(move |sample| {
                sample
                    .determinands()
                    .iter()
                    .filter(move |d| family.matches(d))
                    .map(move |d| Observation::new(point, sample, d))
            })
        })
        .collect();

    Ok(sort_by_time(filter_window(&population, query.window)))
}

/// Distinct determinand labels measured at `point`, sorted.
pub fn determinand_labels(point: &SamplingPoint) -> Vec<String> {
    point
        .samples()
        .iter()
        .flat_map(|s| s.determinands())
        .map(|d| d.label.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Time series of one determinand at one point: for each sample, the first
/// determinand with exactly `label`. Samples without it are skipped.
pub fn series(point: &SamplingPoint, label: &str) -> Vec<Observation> {
    let points = point
        .samples()
        .iter()
        .filter_map(|sample| {
            sample
                .determinands()
                .iter()
                .find(|d| d.label == label)
                .map(|d| Observation::new(point, sample, d))
        })
        .collect();
    sort_by_time(points)
}

/// One family's share of an [`Overview`].
#[derive(Debug, Clone, Serialize)]
pub struct FamilySeries {
    pub family: String,
    pub observations: Vec<Observation>,
}

/// Dashboard view: every observation plus one series per profile family,
/// all inside the same window.
#[derive(Debug, Clone, Serialize)]
pub struct Overview {
    pub window: String,
    pub all: Vec<Observation>,
    pub families: Vec<FamilySeries>,
}

/// Build the dashboard overview. The window cutoff is taken from the
/// latest timestamp across the whole dataset, so every family series
/// shares the same time span.
pub fn overview(dataset: &Dataset, profile: &Profile, window: TimeWindow) -> Overview {
    let all = sort_by_time(filter_window(&observations(dataset), window));
    let latest = all.last().and_then(|o| o.timestamp);
    let cutoff = latest.and_then(|l| window.cutoff(l));

    let in_span = |o: &Observation| match (o.timestamp, latest) {
        (Some(t), Some(latest)) => t <= latest && cutoff.map_or(true, |c| t >= c),
        _ => false,
    };

    let families = profile
        .families
        .iter()
        .map(|family| {
            let observations: Vec<Observation> = dataset
                .points()
                .iter()
                .flat_map(|point| {
                    point.samples().iter().flat_map(move |sample| {
                        sample
                            .determinands()
                            .iter()
                            .filter(move |d| family.matches(d))
                            .map(move |d| Observation::new(point, sample, d))
                    })
                })
                .filter(|o| in_span(o))
                .collect();
            FamilySeries {
                family: family.name.clone(),
                observations: sort_by_time(observations),
            }
        })
        .collect();

    Overview {
        window: window.to_string(),
        all,
        families,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::build;
    use crate::ingest::fields::*;
    use crate::profile::builtin::default_profile;
    use crate::source::Record;

    fn record(
        notation: &str,
        label: &str,
        date_time: &str,
        det: &str,
        unit: &str,
        result: &str,
    ) -> Record {
        Record::from_pairs([
            (POINT_NOTATION, notation),
            (POINT_LABEL, label),
            (POINT_NORTHING, "0"),
            (POINT_EASTING, "0"),
            (SAMPLE_PURPOSE, "Monitoring"),
            (SAMPLE_DATE_TIME, date_time),
            (SAMPLE_MATERIAL, "RIVER WATER"),
            (SAMPLE_IS_COMPLIANCE, "false"),
            (DETERMINAND_LABEL, det),
            (DETERMINAND_DEFINITION, det),
            (DETERMINAND_NOTATION, "0"),
            (DETERMINAND_UNIT, unit),
            (RESULT, result),
        ])
    }

    fn dataset() -> Dataset {
        build(&[
            record("P1", "River A", "2020-03-01T00:00:00", "Lead", "ug/l", "1"),
            record("P1", "River A", "2020-03-01T00:00:00", "PFOS fluor", "ug/l", "0.2"),
            record("P1", "River A", "2020-01-01T00:00:00", "Lead", "ug/l", "3"),
            record("P2", "River B", "2020-02-15T00:00:00", "Perfluorohexane", "ug/l", "0.05"),
            record("P2", "River B", "bad-date", "Perfluorohexane", "ug/l", "9"),
            record("P3", "River A", "2019-06-01T00:00:00", "Fluoride", "mg/l", "0.5"),
        ])
        .unwrap()
    }

    #[test]
    fn test_observations_traversal_order() {
        let obs = observations(&dataset());
        let dets: Vec<&str> = obs.iter().map(|o| o.determinand.as_str()).collect();
        assert_eq!(
            dets,
            vec!["Lead", "PFOS fluor", "Lead", "Perfluorohexane", "Perfluorohexane", "Fluoride"]
        );
        assert!(obs[4].timestamp.is_none());
    }

    #[test]
    fn test_sort_by_time_drops_invalid_and_is_stable() {
        let sorted = sort_by_time(observations(&dataset()));
        assert_eq!(sorted.len(), 5);
        assert_eq!(sorted[0].date_time, "2019-06-01T00:00:00");
        // Two observations share 2020-03-01; load order is preserved.
        assert_eq!(sorted[3].determinand, "Lead");
        assert_eq!(sorted[4].determinand, "PFOS fluor");
    }

    #[test]
    fn test_family_observations_all_locations() {
        let profile = default_profile().unwrap();
        let out = family_observations(
            &dataset(),
            &profile,
            &TrendQuery {
                location: None,
                family: "pfas".into(),
                window: TimeWindow::All,
            },
        )
        .unwrap();
        let values: Vec<f64> = out.iter().map(|o| o.value).collect();
        assert_eq!(values, vec![0.5, 0.05, 0.2]);
    }

    #[test]
    fn test_family_observations_location_covers_shared_labels() {
        let profile = default_profile().unwrap();
        let out = family_observations(
            &dataset(),
            &profile,
            &TrendQuery {
                location: Some("River A".into()),
                family: "pfas".into(),
                window: TimeWindow::All,
            },
        )
        .unwrap();
        let notations: Vec<&str> = out.iter().map(|o| o.notation.as_str()).collect();
        assert_eq!(notations, vec!["P3", "P1"]);
    }

    #[test]
    fn test_family_observations_window() {
        let profile = default_profile().unwrap();
        let out = family_observations(
            &dataset(),
            &profile,
            &TrendQuery {
                location: None,
                family: "pfas".into(),
                window: TimeWindow::LAST_MONTH,
            },
        )
        .unwrap();
        // latest 2020-03-01, cutoff 2020-02-01
        let values: Vec<f64> = out.iter().map(|o| o.value).collect();
        assert_eq!(values, vec![0.05, 0.2]);
    }

    #[test]
    fn test_family_observations_unknown_family() {
        let profile = default_profile().unwrap();
        let err = family_observations(
            &dataset(),
            &profile,
            &TrendQuery {
                family: "metals".into(),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, LimnosError::UnknownFamily(_)));
    }

    #[test]
    fn test_series_and_labels() {
        let ds = dataset();
        let p1 = ds.get_by_notation("P1").unwrap();
        assert_eq!(determinand_labels(p1), vec!["Lead", "PFOS fluor"]);
        let lead = series(p1, "Lead");
        let values: Vec<f64> = lead.iter().map(|o| o.value).collect();
        assert_eq!(values, vec![3.0, 1.0]);
        assert!(series(p1, "Zinc").is_empty());
    }

    #[test]
    fn test_overview_shares_window_across_families() {
        let profile = default_profile().unwrap();
        let ov = overview(&dataset(), &profile, TimeWindow::LAST_MONTH);
        assert_eq!(ov.window, "last_month");
        assert_eq!(ov.all.len(), 3);
        let pfas = ov.families.iter().find(|f| f.family == "pfas").unwrap();
        assert_eq!(pfas.observations.len(), 2);
        let litter = ov.families.iter().find(|f| f.family == "litter").unwrap();
        assert!(litter.observations.is_empty());
    }

    #[test]
    fn test_overview_of_empty_dataset() {
        let profile = default_profile().unwrap();
        let ov = overview(&Dataset::new(), &profile, TimeWindow::All);
        assert!(ov.all.is_empty());
        assert!(ov.families.iter().all(|f| f.observations.is_empty()));
    }
}

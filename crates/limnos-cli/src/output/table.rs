use limnos_core::model::DatasetStats;
use limnos_core::query::compliance::{ComplianceSummary, LocationCompliance};
use limnos_core::query::tiers::{SafetyTier, TierBuckets};
use limnos_core::query::Overview;
use limnos_core::{Observation, SamplingPoint};
use std::collections::BTreeMap;

pub fn print_summary(stats: &DatasetStats, locations: &[String]) {
    println!("  Sampling points:  {}", stats.points);
    println!("  Samples:          {}", stats.samples);
    println!("  Determinands:     {}", stats.determinands);
    if stats.invalid_timestamps > 0 {
        println!(
            "  Invalid times:    {} sample(s), left out of time series",
            stats.invalid_timestamps
        );
    }
    println!();

    if !locations.is_empty() {
        println!("Locations:");
        for loc in locations {
            println!("  {loc}");
        }
        println!();
    }
}

pub fn print_points(points: &[&SamplingPoint]) {
    if points.is_empty() {
        println!("No sampling points.");
        return;
    }

    let max_notation = points.iter().map(|p| p.notation.len()).max().unwrap_or(8).max(8);
    let max_label = points.iter().map(|p| p.label.len()).max().unwrap_or(8).max(8);

    println!(
        "  {:<nw$}  {:<lw$}  {:>8}  {:>8}  {:>7}  {:>12}",
        "Notation",
        "Label",
        "Easting",
        "Northing",
        "Samples",
        "Determinands",
        nw = max_notation,
        lw = max_label
    );
    println!("  {}", "-".repeat(max_notation + max_label + 47));

    for p in points {
        println!(
            "  {:<nw$}  {:<lw$}  {:>8}  {:>8}  {:>7}  {:>12}",
            p.notation,
            p.label,
            p.easting,
            p.northing,
            p.samples().len(),
            p.determinand_count(),
            nw = max_notation,
            lw = max_label
        );
    }
    println!();
}

/// Observations in time order, one per line.
pub fn print_observations(observations: &[Observation]) {
    if observations.is_empty() {
        println!("  No observations.\n");
        return;
    }

    let max_loc = observations.iter().map(|o| o.location.len()).max().unwrap_or(10);
    let max_det = observations.iter().map(|o| o.determinand.len()).max().unwrap_or(10);

    for o in observations {
        println!(
            "  {:<19}  {:<lw$}  {:<dw$}  {} {}",
            o.date_time,
            o.location,
            o.determinand,
            o.value,
            o.unit,
            lw = max_loc,
            dw = max_det
        );
    }
    println!();
}

pub fn print_tiers(family: &str, buckets: &TierBuckets) {
    println!("=== {} (threshold {}) ===\n", family, buckets.threshold);

    if buckets.total() == 0 {
        println!("  No positive readings.\n");
        return;
    }

    for tier in [SafetyTier::Safe, SafetyTier::Warning, SafetyTier::Danger] {
        let readings = buckets.get(tier);
        println!(
            "  {:<8} {:>5}  {}",
            tier.to_string(),
            readings.len(),
            tier.implication()
        );
    }
    println!();

    if let Some((lo, hi)) = buckets.value_range() {
        println!("  Range: {lo} .. {hi}\n");
    }

    for tier in [SafetyTier::Danger, SafetyTier::Warning] {
        let readings = buckets.get(tier);
        if readings.is_empty() {
            continue;
        }
        println!("  {tier}:");
        print_observations(readings);
    }
}

pub fn print_compliance(
    results: &[LocationCompliance],
    summary: &ComplianceSummary,
    breakdown: &BTreeMap<String, usize>,
) {
    println!(
        "  Overall: {} ({} of {} location(s) compliant)\n",
        summary.status, summary.compliant, summary.total
    );

    if results.is_empty() {
        return;
    }

    let max_loc = results.iter().map(|r| r.location.len()).max().unwrap_or(10);
    for r in results {
        println!(
            "  {:<width$}  {:>4}/{:<5} {:>6.2}%  {}",
            r.location,
            r.family_count,
            r.total_count,
            r.percentage,
            r.status,
            width = max_loc
        );
    }
    println!();

    if !breakdown.is_empty() {
        println!("  Litter types:");
        for (kind, count) in breakdown {
            println!("    {kind}: {count}");
        }
        println!();
    }
}

pub fn print_overview(overview: &Overview) {
    println!("=== Overview ({}) ===\n", overview.window);
    println!("  All determinands: {} reading(s)", overview.all.len());
    for series in &overview.families {
        match series.observations.last() {
            Some(latest) => println!(
                "  {:<16} {} reading(s), latest {} {} at {} ({})",
                series.family,
                series.observations.len(),
                latest.value,
                latest.unit,
                latest.location,
                latest.date_time
            ),
            None => println!("  {:<16} no readings", series.family),
        }
    }
    println!();
}

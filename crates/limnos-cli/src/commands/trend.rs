use limnos_core::error::LimnosError;
use limnos_core::query::window::filter_window;
use limnos_core::query::{determinand_labels, family_observations, series};
use limnos_core::{TimeWindow, TrendQuery};
use std::path::Path;

use super::Context;
use crate::output;

pub fn run(
    ctx: &Context,
    input_file: &Path,
    location: &str,
    determinand: Option<&str>,
    family: Option<&str>,
    window: &str,
) -> Result<(), LimnosError> {
    let window: TimeWindow = window.parse()?;
    let dataset = ctx.load_dataset(input_file)?;
    let point = dataset
        .get_by_label(location)
        .ok_or_else(|| LimnosError::UnknownLocation(location.to_string()))?;

    let (title, observations) = match (determinand, family) {
        (Some(label), _) => {
            let observations = filter_window(&series(point, label), window);
            if observations.is_empty() {
                let measured = determinand_labels(point);
                if !measured.iter().any(|m| m == label) {
                    eprintln!("'{}' is not measured at {}.", label, location);
                    eprintln!("  Measured: {}", measured.join(", "));
                }
            }
            (label.to_string(), observations)
        }
        (None, family) => {
            // clap requires one of --determinand / --family
            let name = family.unwrap_or_default();
            let profile = ctx.profile()?;
            let query = TrendQuery {
                location: Some(location.to_string()),
                family: name.to_string(),
                window,
            };
            (name.to_string(), family_observations(&dataset, &profile, &query)?)
        }
    };

    if ctx.json() {
        output::json::print(&serde_json::json!({
            "location": location,
            "series": title,
            "window": window.to_string(),
            "observations": observations,
        }))
    } else {
        println!("=== {} at {} ({}) ===\n", title, location, window);
        output::table::print_observations(&observations);
        Ok(())
    }
}

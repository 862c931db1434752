use limnos_core::error::LimnosError;
use limnos_core::query::family::points_with_family;
use limnos_core::SamplingPoint;
use std::path::Path;

use super::Context;
use crate::output;

pub fn run(ctx: &Context, input_file: &Path, family: Option<&str>) -> Result<(), LimnosError> {
    let dataset = ctx.load_dataset(input_file)?;

    let points: Vec<&SamplingPoint> = match family {
        Some(name) => {
            let profile = ctx.profile()?;
            points_with_family(&dataset, profile.family(name)?)
        }
        None => dataset.points().iter().collect(),
    };

    if ctx.json() {
        let rows: Vec<serde_json::Value> = points
            .iter()
            .map(|p| {
                serde_json::json!({
                    "notation": p.notation,
                    "label": p.label,
                    "easting": p.easting,
                    "northing": p.northing,
                    "samples": p.samples().len(),
                    "determinands": p.determinand_count(),
                })
            })
            .collect();
        output::json::print(&serde_json::Value::Array(rows))
    } else {
        output::table::print_points(&points);
        Ok(())
    }
}

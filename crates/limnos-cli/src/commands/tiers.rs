use limnos_core::error::LimnosError;
use limnos_core::query::tiers::family_tiers;
use limnos_core::{TimeWindow, TrendQuery};
use std::path::Path;

use super::Context;
use crate::output;

pub fn run(
    ctx: &Context,
    input_file: &Path,
    family: &str,
    location: Option<String>,
    window: &str,
) -> Result<(), LimnosError> {
    let window: TimeWindow = window.parse()?;
    let profile = ctx.profile()?;
    let dataset = ctx.load_dataset(input_file)?;

    if let Some(label) = &location {
        if dataset.get_by_label(label).is_none() {
            return Err(LimnosError::UnknownLocation(label.clone()));
        }
    }

    let query = TrendQuery {
        location,
        family: family.to_string(),
        window,
    };
    let buckets = family_tiers(&dataset, &profile, &query)?;

    if ctx.json() {
        output::json::print(&serde_json::json!({
            "family": family,
            "window": window.to_string(),
            "tiers": buckets,
            "range": buckets.value_range(),
        }))
    } else {
        output::table::print_tiers(family, &buckets);
        Ok(())
    }
}

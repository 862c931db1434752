use limnos_core::error::LimnosError;
use limnos_core::query::compliance::{compliance_by_location, compliance_summary, litter_breakdown};
use std::path::Path;

use super::Context;
use crate::output;

pub fn run(ctx: &Context, input_file: &Path) -> Result<(), LimnosError> {
    let profile = ctx.profile()?;
    let dataset = ctx.load_dataset(input_file)?;

    let results = compliance_by_location(&dataset, &profile)?;
    let summary = compliance_summary(&results);
    let breakdown = litter_breakdown(&results);

    if ctx.json() {
        output::json::print(&serde_json::json!({
            "family": profile.compliance.family,
            "summary": summary,
            "locations": results,
            "breakdown": breakdown,
        }))
    } else {
        println!("=== {} compliance ({}) ===\n", profile.compliance.family, profile.name);
        output::table::print_compliance(&results, &summary, &breakdown);
        Ok(())
    }
}

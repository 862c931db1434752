use limnos_core::error::LimnosError;
use std::path::Path;

use super::Context;
use crate::output;

pub fn run(ctx: &Context, input_file: &Path) -> Result<(), LimnosError> {
    let dataset = ctx.load_dataset(input_file)?;
    let stats = dataset.stats();
    let locations = dataset.locations();

    if ctx.json() {
        output::json::print(&serde_json::json!({
            "stats": stats,
            "locations": locations,
        }))
    } else {
        output::table::print_summary(&stats, &locations);
        Ok(())
    }
}

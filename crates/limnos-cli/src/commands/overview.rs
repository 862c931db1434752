use limnos_core::error::LimnosError;
use limnos_core::query::overview;
use limnos_core::TimeWindow;
use std::path::Path;

use super::Context;
use crate::output;

pub fn run(ctx: &Context, input_file: &Path, window: &str) -> Result<(), LimnosError> {
    let window: TimeWindow = window.parse()?;
    let profile = ctx.profile()?;
    let dataset = ctx.load_dataset(input_file)?;

    let view = overview(&dataset, &profile, window);

    if ctx.json() {
        output::json::print(&serde_json::to_value(&view)?)
    } else {
        output::table::print_overview(&view);
        Ok(())
    }
}

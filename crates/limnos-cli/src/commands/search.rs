use limnos_core::error::LimnosError;
use limnos_core::query::search::search;
use limnos_core::query::window::filter_window;
use limnos_core::TimeWindow;
use std::path::Path;

use super::Context;
use crate::output;

pub fn run(ctx: &Context, input_file: &Path, term: &str, window: &str) -> Result<(), LimnosError> {
    let window: TimeWindow = window.parse()?;
    let dataset = ctx.load_dataset(input_file)?;
    let hits = filter_window(&search(&dataset, term), window);

    if ctx.json() {
        output::json::print(&serde_json::to_value(&hits)?)
    } else {
        println!("{} match(es) for '{}' ({})\n", hits.len(), term, window);
        output::table::print_observations(&hits);
        Ok(())
    }
}

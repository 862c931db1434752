use limnos_core::error::LimnosError;
use serde_json::Value;

pub fn print(value: &Value) -> Result<(), LimnosError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

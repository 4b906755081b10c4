use labref_core::classify::outcome::SearchOutcome;
use labref_core::error::LabRefError;

pub fn print(outcome: &SearchOutcome) -> Result<(), LabRefError> {
    let json = serde_json::to_string_pretty(outcome)?;
    println!("{json}");
    Ok(())
}

use ecosort_core::error::EcosortError;
use serde::Serialize;

pub fn print<T: Serialize + ?Sized>(value: &T) -> Result<(), EcosortError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

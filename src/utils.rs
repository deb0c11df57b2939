use std::path::Path;

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;

use crate::Result;

/// Converts a human-entered view-denom amount into a base-denom integer
/// string, truncating any fractional base unit.
pub fn to_base_units(amount: Decimal, conversion_factor: Decimal) -> String {
    (amount * conversion_factor).trunc().to_string()
}

pub fn read_data_from_yaml<T>(path: impl AsRef<Path>) -> Result<T>
where
    T: DeserializeOwned,
{
    let file = std::fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);
    Ok(serde_yaml::from_reader(reader)?)
}

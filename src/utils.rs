use csv::ReaderBuilder;
use serde::{Deserialize, Deserializer};

/// Reader settings shared by every table. Rows shorter than the header
/// are accepted; their trailing columns read as absent.
pub fn csv_reader_builder() -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder.flexible(true);
    builder
}

/// Reads a CSV cell as `Option<String>`, trimming it and mapping blank
/// cells to `None`.
pub fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

pub mod currency;
pub mod destination;
pub mod location;
pub mod maps;
pub mod trip;
pub mod weather;

/// Trimmed, non-empty value of an optional request field.
pub fn required(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

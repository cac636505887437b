//! Command handlers, one module per command group.

pub mod auth;
pub mod cache;
pub mod clients;
pub mod estimates;
pub mod render;
pub mod serve;
pub mod upload;

/// Print a value as pretty JSON on stdout.
///
/// # Errors
///
/// Returns an error when serialization fails.
pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

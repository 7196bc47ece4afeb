//! Subcommand implementations.

pub mod admin;
pub mod cart;
pub mod products;

use serde::Serialize;
use thiserror::Error;

/// Errors raised by the commands themselves rather than the libraries.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Requested item does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Argument is not a product id.
    #[error("Invalid product id: {0}")]
    InvalidId(String),
}

/// Print a value to stdout as pretty JSON.
#[allow(clippy::print_stdout)]
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

//! Terminal output formatting.

use anyhow::Result;
use colored::Colorize;
use eventure_core::{Response, Status};
use serde::Serialize;

/// Print an operation envelope: colored status line plus pretty JSON
/// content or the error kind.
pub fn print_response<T: Serialize>(response: &Response<T>) -> Result<()> {
    match response.status {
        Status::Success => println!("{}", "success".green().bold()),
        Status::Failure => println!("{}", "failure".red().bold()),
    }

    if let Some(content) = &response.content {
        println!("{}", serde_json::to_string_pretty(content)?);
    }
    if let Some(error) = &response.error {
        println!("{} {}", "error:".red(), serde_json::to_string(error)?);
    }

    Ok(())
}

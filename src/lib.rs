//! Core library entry for the `planwright` CLI.
//!
//! Requirements text is decomposed into tasks by a rule-based generator or,
//! when configured, a language model with automatic fallback to the rules.
//! Plans are stored and edited through [`service::PlanService`].

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod planning;
pub mod ports;
pub mod service;

use clap::Parser;

pub use error::{PlanError, Result};
pub use service::PlanService;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub async fn run<I, T>(args: I) -> std::result::Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    commands::dispatch(&cli.command).await
}

#[cfg(test)]
mod tests {
    use super::run;

    #[tokio::test]
    async fn run_lists_templates() {
        let result = run(["planwright", "templates", "--categories"]).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn run_errors_on_unknown_subcommand() {
        let result = run(["planwright", "unknown"]).await;
        assert!(result.is_err());
    }
}

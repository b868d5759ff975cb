//! Tokensmith CLI
//!
//! - `build`: run the producer's generators
//! - `sync`: pull a pinned release into a consumer project
//! - `serve`: on-demand generation for the editor on `POST /generate`
//!
//! Default port: 4545

#![allow(clippy::print_stdout, clippy::print_stderr, reason = "CLI tool outputs to stdout")]

use clap::Parser;
use colored::Colorize;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod api;
mod cli;
mod commands;
mod router;
mod state;
#[cfg(test)]
mod test_helpers;

use cli::{Cli, Commands};
use commands::ServeError;
use tokensmith_types::TypedError;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let result = match cli.command {
        Commands::Build { config, dry_run, json } => {
            commands::handle_build(&config, dry_run, json).await
        },
        Commands::Sync { config, force, dry_run, token, api_url } => {
            commands::handle_sync(&config, force, dry_run, token, &api_url).await
        },
        Commands::Serve { port, scratch_dir } => commands::handle_serve(port, scratch_dir).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            print_failure(&err);
            ExitCode::from(exit_code(&err))
        },
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to install log subscriber: {e}");
    }
}

/// 1 for classified errors, 2 for anything we did not anticipate.
fn exit_code(err: &anyhow::Error) -> u8 {
    if err.downcast_ref::<TypedError>().is_some() || err.downcast_ref::<ServeError>().is_some() {
        1
    } else {
        2
    }
}

fn print_failure(err: &anyhow::Error) {
    if let Some(typed) = err.downcast_ref::<TypedError>() {
        let report = typed.report();
        eprintln!("{} {}", "error:".red().bold(), report.title.bold());
        eprintln!("  {}", report.detail);
        if let Some(remedy) = report.remedy {
            eprintln!("  {} {}", "hint:".cyan(), remedy);
        }
        return;
    }

    if let Some(serve) = err.downcast_ref::<ServeError>() {
        eprintln!("{} {}", "error:".red().bold(), "Could not start server".bold());
        eprintln!("  {serve}");
        eprintln!("  {} Pick another port with --port or stop the process using it.", "hint:".cyan());
        return;
    }

    tracing::error!(error = ?err, "Unexpected failure");
    eprintln!("{} {:#}", "unexpected error:".red().bold(), err);
    eprintln!("  This is a bug in tokensmith. Please report this issue with the output above.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokensmith_types::{ConfigError, SyncError};

    #[test]
    fn test_classified_errors_exit_with_one() {
        let err = anyhow::Error::from(TypedError::from(ConfigError::NotFound {
            path: "tokensmith.json".to_string(),
        }));
        assert_eq!(exit_code(&err), 1);

        let err = anyhow::Error::from(TypedError::from(SyncError::Network {
            message: "reset".to_string(),
        }));
        assert_eq!(exit_code(&err), 1);
    }

    #[test]
    fn test_unclassified_errors_exit_with_two() {
        let err = anyhow::anyhow!("worker channel closed");
        assert_eq!(exit_code(&err), 2);
    }

    #[tokio::test]
    async fn test_port_in_use_exits_with_one() {
        let taken = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = taken.local_addr().unwrap().port();

        let err = commands::bind_listener(port).await.unwrap_err();
        assert!(matches!(err, ServeError::Bind { ref addr, .. } if addr.port() == port));
        assert_eq!(exit_code(&anyhow::Error::from(err)), 1);
    }
}

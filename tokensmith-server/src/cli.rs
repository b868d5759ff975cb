use clap::{Parser, Subcommand};
use std::path::PathBuf;

use tokensmith_core::config::{CONSUMER_CONFIG_FILE, PRODUCER_CONFIG_FILE};

#[derive(Parser)]
#[command(
    name = "tokensmith",
    about = "Tokensmith - design token generation and release sync",
    version = env!("CARGO_PKG_VERSION"),
    author,
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the configured generators against the token tree")]
    Build {
        #[arg(short, long, default_value = PRODUCER_CONFIG_FILE, help = "Producer config file")]
        config: PathBuf,

        #[arg(long, help = "Generate into a scratch directory and report, without writing output")]
        dry_run: bool,

        #[arg(long, help = "Print the run report as JSON")]
        json: bool,
    },

    #[command(about = "Sync the pinned token release into this project")]
    Sync {
        #[arg(short, long, default_value = CONSUMER_CONFIG_FILE, help = "Consumer config file")]
        config: PathBuf,

        #[arg(short, long, help = "Ignore the sync cache")]
        force: bool,

        #[arg(long, help = "Print what would be synced without fetching or writing")]
        dry_run: bool,

        #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, help = "Release store token")]
        token: Option<String>,

        #[arg(
            long,
            env = "TOKENSMITH_API_URL",
            default_value = tokensmith_core::release::DEFAULT_API_URL,
            help = "Release store API base URL"
        )]
        api_url: String,
    },

    #[command(about = "Start the on-demand generation server for the editor")]
    Serve {
        #[arg(short, long, env = "TOKENSMITH_PORT", default_value = "4545")]
        port: u16,

        #[arg(long, help = "Directory for per-request scratch dirs (default: system temp)")]
        scratch_dir: Option<PathBuf>,
    },
}

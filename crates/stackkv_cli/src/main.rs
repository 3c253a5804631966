//! StackKV CLI
//!
//! Line-oriented shell over an in-memory nested-transaction store.
//!
//! # Commands
//!
//! - `repl` - Read commands interactively from stdin
//! - `exec` - Run a script of commands from a file
//! - `version` - Show version information

mod commands;

use clap::{Parser, Subcommand};
use commands::session::{self, Session};
use stackkv_core::{Config, TransactionalStore};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// StackKV interactive key-value shell.
#[derive(Parser)]
#[command(name = "stackkv")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read commands interactively from stdin
    Repl {
        /// Prompt shown before each line
        #[arg(short, long, default_value = "> ")]
        prompt: String,

        /// Print statistics when the session ends
        #[arg(short, long)]
        stats: bool,

        /// Statistics format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Run a script of commands, one per line
    Exec {
        /// Script file
        script: PathBuf,

        /// Print statistics when the script ends
        #[arg(short, long)]
        stats: bool,

        /// Statistics format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging; stderr keeps it apart from command output
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Commands::Repl {
            prompt,
            stats,
            format,
        } => {
            let mut shell = Session::new(TransactionalStore::with_config(
                Config::new().record_stats(stats),
            ));
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            session::run(&mut shell, stdin.lock(), &mut stdout, Some(&prompt))?;
            if stats {
                commands::report::run(&mut stdout, shell.store(), &format)?;
            }
        }
        Commands::Exec {
            script,
            stats,
            format,
        } => {
            info!(script = %script.display(), "running script");
            let file = File::open(&script)
                .map_err(|e| format!("cannot open {}: {e}", script.display()))?;
            let mut shell = Session::new(TransactionalStore::with_config(
                Config::new().record_stats(stats),
            ));
            let mut stdout = io::stdout();
            session::run(&mut shell, BufReader::new(file), &mut stdout, None)?;
            if stats {
                commands::report::run(&mut stdout, shell.store(), &format)?;
            }
        }
        Commands::Version => {
            println!("StackKV CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("StackKV Core v{}", stackkv_core::VERSION);
        }
    }

    Ok(())
}

//! Main CLI application structure

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{script, tui};
use crate::config::Config;
use crate::domain::{Filter, TaskStore};

#[derive(Parser)]
#[command(name = "todo")]
#[command(author, version, about = "Keyboard-driven in-memory to-do list")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true, env = "TODO_LIST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable selection and bulk archive/delete
    #[arg(long, global = true)]
    pub no_bulk: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive session (default)
    Tui {
        /// Initial filter (all, active, done, archived)
        #[arg(long)]
        filter: Option<Filter>,

        /// Initial view (list, board)
        #[arg(long, default_value = "list")]
        view: String,
    },

    /// Run intents from a file, one per line
    ///
    /// Examples:
    ///   todo script session.txt
    ///   printf 'add Buy milk\nshow\n' | todo script
    Script {
        /// Script file ("-" or omitted reads stdin)
        file: Option<PathBuf>,

        /// Initial filter (all, active, done, archived)
        #[arg(long)]
        filter: Option<Filter>,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    output.verbose("todo starting");

    let config = Config::load(cli.config.as_deref())?;
    output.verbose_ctx(
        "config",
        &format!(
            "bulk_selection={}, default_filter={}, tick_rate_ms={}",
            config.features.bulk_selection, config.ui.default_filter, config.ui.tick_rate_ms
        ),
    );

    let mut capabilities = config.capabilities();
    if cli.no_bulk {
        capabilities.bulk_selection = false;
    }
    let mut store = TaskStore::with_capabilities(capabilities);

    let command = cli.command.unwrap_or(Commands::Tui {
        filter: None,
        view: "list".to_string(),
    });

    match command {
        Commands::Tui { filter, view } => {
            store.set_filter(filter.unwrap_or(config.ui.default_filter));
            output.verbose_ctx("tui", &format!("filter={}, view={}", store.filter(), view));

            let store = tui::run(&output, store, &view, config.ui.tick_rate_ms)?;
            output.success(&format!(
                "Session ended with {} task(s); nothing was saved",
                store.tasks().len()
            ));
        }

        Commands::Script { file, filter } => {
            store.set_filter(filter.unwrap_or(config.ui.default_filter));

            match file {
                Some(path) if path.as_os_str() != "-" => {
                    output.verbose_ctx("script", &format!("Reading {}", path.display()));
                    let file = File::open(&path)
                        .with_context(|| format!("Failed to open script: {}", path.display()))?;
                    script::run(&output, &mut store, BufReader::new(file))?
                }
                _ => {
                    output.verbose_ctx("script", "Reading stdin");
                    script::run(&output, &mut store, io::stdin().lock())?
                }
            }
        }
    }

    output.verbose("Command completed successfully");
    Ok(())
}

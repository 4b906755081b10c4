mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Options shared by every command that runs the pipeline.
#[derive(clap::Args)]
struct PipelineArgs {
    /// SQLite database holding the extracted rows
    #[arg(long, default_value = "lab_test.db", value_name = "FILE")]
    db: PathBuf,

    /// Custom JSON pipeline config (default: built-in "tch" preset)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Match strategies: default, strict (English word boundary) or loose (all tokens)
    #[arg(short, long)]
    mode: Option<String>,

    /// Deduplication key: identity (code, English name, sub-item) or full
    #[arg(long)]
    dedupe: Option<String>,
}

#[derive(Parser)]
#[command(
    name = "labref",
    version,
    about = "Search a laboratory test reference manual by code, name or sub-item"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the manual and print structured records
    Search {
        /// Code, Chinese name, English name or sub-item
        query: String,

        #[command(flatten)]
        pipeline: PipelineArgs,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Print the matched raw rows when no record survives
        #[arg(long)]
        show_raw: bool,
    },
    /// Read queries from stdin, one per line, against a cached snapshot
    Shell {
        #[command(flatten)]
        pipeline: PipelineArgs,

        /// Seconds before the loaded rows are re-read from the database
        #[arg(long, default_value_t = 600)]
        ttl: u64,
    },
    /// Import extracted rows (JSON or XLSX) into the database
    Import {
        /// JSON array of rows, or an XLSX workbook
        input_file: PathBuf,

        /// SQLite database to (re)create
        #[arg(long, default_value = "lab_test.db", value_name = "FILE")]
        db: PathBuf,

        /// Worksheet to read from an XLSX workbook (default: first sheet)
        #[arg(long)]
        sheet: Option<String>,

        /// Store rows as extracted, without carrying merged cells down
        #[arg(long)]
        no_fill: bool,
    },
    /// Show row count and last update time of the database
    Info {
        #[arg(long, default_value = "lab_test.db", value_name = "FILE")]
        db: PathBuf,
    },
    /// Inspect and validate pipeline configs
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print a predefined config as JSON
    Show {
        /// Preset name
        #[arg(default_value = "tch")]
        preset: String,
    },
    /// Print the config field reference
    Schema,
    /// Validate a custom config file
    Validate {
        /// Path to JSON config file
        file: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Search {
            query,
            pipeline,
            output,
            show_raw,
        } => commands::search::run(&query, &pipeline, &output, show_raw),
        Commands::Shell { pipeline, ttl } => commands::shell::run(&pipeline, ttl),
        Commands::Import {
            input_file,
            db,
            sheet,
            no_fill,
        } => commands::import::run(&input_file, &db, sheet.as_deref(), !no_fill),
        Commands::Info { db } => commands::info::run(&db),
        Commands::Config { action } => match action {
            ConfigAction::Show { preset } => commands::config::show(&preset),
            ConfigAction::Schema => commands::config::schema(),
            ConfigAction::Validate { file } => commands::config::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

//! CLI entry point for breeze-codegen

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use breeze_codegen::codegen::WriteOutcome;
use breeze_codegen::config::CodegenConfig;

#[derive(Parser)]
#[command(name = "breeze-codegen")]
#[command(about = "Generate PHP data-access classes from a database schema")]
#[command(version)]
struct Cli {
    /// Path to configuration file (TOML format, BREEZE_CODEGEN_* env vars apply on top)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to the schema file, DDL dump or JSON snapshot (overrides config)
    #[arg(short, long)]
    schema: Option<PathBuf>,

    /// Output directory (overrides config)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Dry run - show what would be generated without writing files
    #[arg(long)]
    dry_run: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the classes, interfaces, factory and base
    Generate,
    /// Inspect schema (show the table descriptors for debugging)
    Inspect,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (before logging, so we can use config.log_level)
    let mut config = CodegenConfig::load(cli.config.as_deref())?;

    // Initialize logging
    // Priority: RUST_LOG env var > config.log_level > default (debug for dev, info for release)
    let default_level = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };
    let log_level = config.log_level.as_deref().unwrap_or(default_level);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .init();

    // Apply CLI overrides
    if let Some(schema) = cli.schema {
        config.schema_file = schema;
    }
    if let Some(output) = cli.output {
        config.output_dir = output;
    }
    if cli.dry_run {
        config.dry_run = true;
    }

    config.validate()?;

    if let Some(Commands::Inspect) = &cli.command {
        return inspect_schema(&config);
    }

    info!("Generating code from schema: {:?}", config.schema_file);
    let report = breeze_codegen::generate(&config)?;

    if config.dry_run {
        println!("Dry run mode - would generate:");
    }
    for file in &report.files {
        let status = match file.outcome {
            WriteOutcome::Written if config.dry_run => "write",
            WriteOutcome::Written => "written",
            WriteOutcome::KeptExisting => "kept",
        };
        println!("  {:<9} {:<7} {}", file.kind.as_str(), status, file.path.display());
    }

    info!("Code generation completed successfully");
    Ok(())
}

fn inspect_schema(config: &CodegenConfig) -> Result<()> {
    let tables = breeze_codegen::inspect(config)?;

    println!("Found {} tables:\n", tables.len());
    for table in &tables {
        println!("Table: {}", table.name);
        println!("  Columns:");
        for (column, data_type) in &table.column_types {
            let auto_inc = if table.auto_increment_column.as_deref() == Some(column.as_str()) {
                " AUTO_INCREMENT"
            } else {
                ""
            };
            println!("    - {} {}{}", column, data_type, auto_inc);
        }
        println!("  Row identifier: {:?}", table.ric);
        if !table.unique_indexes.is_empty() {
            println!("  Unique indexes:");
            for columns in &table.unique_indexes {
                println!("    - {:?}", columns);
            }
        }
        println!();
    }

    Ok(())
}

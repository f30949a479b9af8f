use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

use logmigrate::core::{LogMigrator, PatchPlan};
use logmigrate::formatters::{JsonRecordsFormatter, TextFormatter};
use logmigrate::{init_tracing, MigrationConfig};

#[derive(Debug, Clone, Parser)]
#[command(
    name = "logmigrate",
    version,
    author = "logmigrate developers",
    about = "Turns a log call-site export into tagged replacement calls"
)]
struct Cli {
    /// Indentation-encoded export of log call-sites
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    /// Root of the source tree package tokens resolve against
    #[arg(short, long, value_name = "DIR")]
    base_path: Option<PathBuf>,

    /// Application root namespace, start of every module tag
    #[arg(short, long, value_name = "NAMESPACE")]
    namespace: Option<String>,

    /// Maximum number of dotted segments in a module tag
    #[arg(short = 'd', long, value_name = "N")]
    max_depth: Option<usize>,

    /// Extra package alias, e.g. hadoop-main=hadoop-common-project
    #[arg(short, long = "alias", value_name = "FROM=TO", value_parser = parse_alias)]
    aliases: Vec<(String, String)>,

    /// JSON configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output file; stdout when omitted
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format: json, text
    #[arg(short, long, value_name = "FORMAT", value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
#[value(rename_all = "kebab-case")]
enum OutputFormat {
    Json,
    Text,
}

impl OutputFormat {
    fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Text => "text",
        }
    }
}

fn parse_alias(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((from, to)) if !from.trim().is_empty() && !to.trim().is_empty() => {
            Ok((from.trim().to_string(), to.trim().to_string()))
        }
        _ => Err(format!("expected FROM=TO, got '{raw}'")),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    run(cli)
}

fn load_config(cli: &Cli) -> Result<MigrationConfig> {
    let mut config = match &cli.config {
        Some(path) => MigrationConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => MigrationConfig::default(),
    };

    if let Some(base_path) = &cli.base_path {
        config = config.with_base_path(base_path);
    }
    if let Some(namespace) = &cli.namespace {
        config = config.with_namespace(namespace);
    }
    if let Some(depth) = cli.max_depth {
        anyhow::ensure!(depth > 0, "--max-depth must be at least 1");
        config = config.with_max_module_depth(depth);
    }
    for (from, to) in &cli.aliases {
        config = config.with_alias(from, to);
    }

    Ok(config)
}

fn run(cli: Cli) -> Result<()> {
    let start_time = Instant::now();
    let config = load_config(&cli)?;

    info!(
        input = %cli.input.display(),
        base = %config.base_path.display(),
        namespace = %config.application_namespace,
        max_depth = config.max_module_depth,
        format = cli.format.as_str(),
        "Starting log migration"
    );

    let migrator = LogMigrator::new(&config);
    let mut plan = PatchPlan::new();
    let report = migrator
        .migrate_file(&cli.input, &mut plan)
        .with_context(|| format!("Migration of {} aborted", cli.input.display()))?;

    let rendered = match cli.format {
        OutputFormat::Json => JsonRecordsFormatter::new().format(&plan, &report)?,
        OutputFormat::Text => TextFormatter::new().format(&plan, &report)?,
    };

    match &cli.output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(output = %path.display(), "Wrote migration records");
        }
        None => println!("{rendered}"),
    }

    info!(
        files = plan.file_count(),
        logger_declarations = plan.logger_declarations(),
        elapsed = %format!("{:.2}s", start_time.elapsed().as_secs_f64()),
        "Done"
    );

    Ok(())
}

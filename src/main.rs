use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use qc_review::rubric::RubricManifest;
use qc_review::taxonomy::TagCatalogue;
use qc_review::{ActionScript, Config, OutputFormat};

#[derive(Parser)]
#[command(name = "qc-review")]
#[command(about = "Replay QC review actions and print the feedback report", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay an action script onto a fresh review and print the report
    Render {
        /// Script path (.json for JSON, anything else is TOML)
        script: PathBuf,

        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },
    /// Print the safety tag catalogue
    Tags {
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },
    /// Print the review rubric
    Rubric {
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    init_logging(&config.logging.filter, cli.verbose);

    match cli.command {
        Commands::Render { script, format } => {
            let script = ActionScript::load(&script).inspect_err(|err| {
                tracing::warn!(error = %format!("{err:#}"), "Rejected action script");
            })?;
            let report = qc_review::render(&script.replay());
            let stats = report.stats();
            tracing::info!(
                actions = script.len(),
                criteria = stats.criteria_reported,
                incorrect = stats.criteria_incorrect,
                turns = stats.turns_reported,
                "Rendered report"
            );
            match format.unwrap_or(config.report.format) {
                OutputFormat::Text => print_text(&report.to_plain_text()),
                OutputFormat::Json => print_json(&report)?,
            }
        }
        Commands::Tags { format } => {
            let catalogue = TagCatalogue::build();
            match format.unwrap_or(config.report.format) {
                OutputFormat::Text => print_text(&catalogue_text(&catalogue)),
                OutputFormat::Json => print_json(&catalogue)?,
            }
        }
        Commands::Rubric { format } => {
            let manifest = RubricManifest::build();
            match format.unwrap_or(config.report.format) {
                OutputFormat::Text => print_text(&rubric_text(&manifest)),
                OutputFormat::Json => print_json(&manifest)?,
            }
        }
    }

    Ok(())
}

/// `RUST_LOG` wins; otherwise `-v` means debug, else the configured filter.
fn init_logging(config_filter: &str, verbose: bool) {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) if verbose => EnvFilter::new("debug"),
        Err(_) => EnvFilter::try_new(config_filter).unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr) // stdout is for report text only
        .init();
}

fn print_text(text: &str) {
    if text.ends_with('\n') {
        print!("{text}");
    } else {
        println!("{text}");
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}

fn catalogue_text(catalogue: &TagCatalogue) -> String {
    let mut out = String::new();
    for group in &catalogue.groups {
        out.push_str(&format!("{}:\n", group.label));
        for tag in &group.tags {
            out.push_str(&format!("- {} [{}] {}\n", tag.short_form, tag.id, tag.label));
        }
        out.push('\n');
    }
    out
}

fn rubric_text(manifest: &RubricManifest) -> String {
    let mut out = String::new();
    for section in &manifest.categories {
        out.push_str(&format!("{} ({}):\n", section.label, section.id));
        for item in &section.criteria {
            out.push_str(&format!("- {}: {}\n", item.key, item.name));
        }
        out.push('\n');
    }
    out
}

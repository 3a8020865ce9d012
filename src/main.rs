// SPDX-License-Identifier: PMPL-1.0-or-later

//! locale-catalog: inspect and audit per-language resource bundles
//!
//! QA entry point for the catalog engine: key consistency audits, language
//! listings, one-off lookups and resource directory health checks.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use locale_catalog::report::{self, AuditExport};
use locale_catalog::{diagnostics, Args, EngineConfig, Translator};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "locale-catalog")]
#[command(version)]
#[command(about = "Inspect and audit per-language resource bundles")]
#[command(long_about = None)]
struct Cli {
    /// Resource directory (overrides config and LOCALE_CATALOG_DIR)
    #[arg(short, long, global = true)]
    dir: Option<PathBuf>,

    /// YAML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Reference language for audits and fallback
    #[arg(short, long, global = true)]
    reference: Option<String>,

    /// Log load progress (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare every language's keys against the reference language
    Audit {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Write the JSON report to a file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Keys listed per language and category
        #[arg(short, long, default_value = "5")]
        limit: usize,
    },

    /// List loaded languages
    Languages,

    /// Resolve a single key
    Get {
        /// Dotted key, e.g. validation.age_min
        #[arg(value_name = "KEY")]
        key: String,

        /// Language to resolve in (falls back to the reference language)
        #[arg(short, long)]
        lang: Option<String>,

        /// Value returned when the key is missing
        #[arg(long, default_value = "")]
        default: String,

        /// Placeholder value as name=value (repeatable)
        #[arg(short, long = "arg", value_parser = parse_placeholder)]
        args: Vec<(String, String)>,
    },

    /// Print keys in every loaded language
    Show {
        /// Only this language
        #[arg(short, long)]
        lang: Option<String>,

        #[arg(value_name = "KEY", required = true)]
        keys: Vec<String>,
    },

    /// Check the resource directory and every resource file
    Doctor,
}

fn parse_placeholder(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected name=value, got '{}'", raw)),
    }
}

fn init_logging(verbose: bool) {
    let fallback = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(cli: &Cli) -> Result<EngineConfig> {
    let base = match &cli.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };
    let mut config = base.with_env_overrides();
    if let Some(dir) = &cli.dir {
        config.resource_dir = dir.clone();
    }
    if let Some(reference) = &cli.reference {
        config.reference_language = reference.clone();
    }
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(&cli).context("loading configuration")?;
    let translator = Translator::from_config(&config);
    let catalog = translator.catalog();

    match cli.command {
        Commands::Audit {
            json,
            output,
            limit,
        } => {
            catalog.load();
            let audit = translator.audit().ok_or_else(|| {
                anyhow!(
                    "no resource bundles loaded from {}",
                    config.resource_dir.display()
                )
            })?;
            let export = AuditExport::new(catalog, &audit);

            if json {
                println!("{}", export.to_json()?);
            } else {
                report::print_audit(&audit, limit);
            }

            if let Some(output_path) = output {
                export.write(&output_path)?;
                eprintln!("Report saved to: {}", output_path.display());
            }

            let inconsistent = audit.inconsistent_languages();
            if !inconsistent.is_empty() {
                bail!(
                    "{} language(s) inconsistent with '{}': {}",
                    inconsistent.len(),
                    audit.reference_language,
                    inconsistent.join(", ")
                );
            }
        }

        Commands::Languages => {
            catalog.load();
            report::print_languages(catalog);
        }

        Commands::Get {
            key,
            lang,
            default,
            args,
        } => {
            let requested = lang.unwrap_or_else(|| config.default_language.clone());
            translator.initialize(&requested, true)?;
            let args: Args = args.into_iter().collect();
            println!("{}", translator.get_with(&key, &default, &args));
        }

        Commands::Show { lang, keys } => {
            catalog.load();
            let languages: Vec<String> = match lang {
                Some(code) => vec![code],
                None => catalog.languages().into_iter().collect(),
            };
            if languages.is_empty() {
                bail!(
                    "no resource bundles loaded from {}",
                    config.resource_dir.display()
                );
            }

            for code in &languages {
                let context = translator.context(code)?;
                println!("\n{}:", code.to_uppercase().bold());
                for key in &keys {
                    match context.lookup(key).found() {
                        Some(value) => println!("  {}: {}", key, value),
                        None => println!("  {}: {}", key, "(missing)".dimmed()),
                    }
                }
            }
        }

        Commands::Doctor => {
            diagnostics::run_self_diagnostics(catalog)?;
        }
    }

    Ok(())
}

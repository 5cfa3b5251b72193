use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::{error, info, warn};
use std::fs;
use std::path::PathBuf;

use growth_data_pipeline::export::{export_csv, export_xlsx};
use growth_data_pipeline::summary::{condition_table, environment_summary, growth_summary};
use growth_data_pipeline::{load_config, load_directory, PipelineConfig, Severity};

#[derive(Parser, Debug)]
#[command(name = "growth_data_pipeline")]
#[command(about = "Load, reconcile and export per-group environment and growth data", long_about = None)]
struct Args {
    /// Directory holding the environment CSVs and the growth workbook
    #[arg(long, env = "DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    /// JSON configuration overriding the built-in groups and discovery settings
    #[arg(long, env = "PIPELINE_CONFIG")]
    config: Option<PathBuf>,

    /// Restrict summaries and exports to these groups (repeatable)
    #[arg(long = "group")]
    groups: Vec<String>,

    /// Write environment/growth datasets as CSV and XLSX into this directory
    #[arg(long)]
    export_dir: Option<PathBuf>,
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.2}", v))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => PipelineConfig::default(),
    };
    for name in &args.groups {
        if config.group(name).is_none() {
            warn!("--group '{}' is not a configured group", name);
        }
    }

    let data = match load_directory(&args.data_dir, &config) {
        Ok(data) => data,
        Err(e) => {
            error!("{}", e);
            return Err(e.into());
        }
    };

    let notices = data.warnings.iter().filter(|w| w.severity == Severity::Notice).count();
    info!(
        "Loaded {} environment rows and {} growth rows ({} warnings, {} notices)",
        data.environment.len(),
        data.growth.len(),
        data.warnings.len() - notices,
        notices
    );

    let environment = data.environment.filter_groups(&args.groups);
    let growth = data.growth.filter_groups(&args.groups);
    let selected = |name: &str| args.groups.is_empty() || args.groups.iter().any(|g| g == name);

    println!("EC conditions:");
    for row in condition_table(&config, &growth).iter().filter(|r| selected(&r.group)) {
        println!(
            "  {:<8} EC {:>4.1}  specimens {:>4}  {}",
            row.group, row.target_ec, row.specimen_count, row.color
        );
    }

    println!("Environment:");
    for row in environment_summary(&config, &environment).iter().filter(|r| selected(&r.group)) {
        println!(
            "  {:<8} samples {:>6}  temp {:>7}  humidity {:>7}  pH {:>6}  EC {:>6}",
            row.group,
            row.samples,
            fmt_opt(row.mean_temperature),
            fmt_opt(row.mean_humidity),
            fmt_opt(row.mean_ph),
            fmt_opt(row.mean_ec)
        );
    }

    println!("Growth:");
    for row in growth_summary(&config, &growth).iter().filter(|r| selected(&r.group)) {
        println!(
            "  {:<8} specimens {:>4}  leaves {:>7}  shoot {:>7}  root {:>7}  fresh weight {:>7}",
            row.group,
            row.specimens,
            fmt_opt(row.mean_leaf_count),
            fmt_opt(row.mean_shoot_length),
            fmt_opt(row.mean_root_length),
            fmt_opt(row.mean_fresh_weight)
        );
    }

    if let Some(dir) = &args.export_dir {
        fs::create_dir_all(dir).with_context(|| format!("creating export directory {}", dir.display()))?;
        export_csv(&environment, &dir.join("environment.csv"))?;
        export_xlsx(&environment, "environment", &dir.join("environment.xlsx"))?;
        export_csv(&growth, &dir.join("growth.csv"))?;
        export_xlsx(&growth, "growth", &dir.join("growth.xlsx"))?;
        info!("Exports written to {}", dir.display());
    }

    Ok(())
}

mod cli;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;
use tracing_subscriber::EnvFilter;
use vinewater::config::Config;
use vinewater::models::ResultOutput;
use vinewater::snapshot::Snapshot;

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Init => {
            Config::setup_interactive().context("Setup failed")?;
        }
        Commands::Check => check(config_path)?,
        Commands::Compute {
            snapshot,
            strict,
            pretty,
        } => compute(config_path, &snapshot, strict, pretty)?,
    }

    Ok(())
}

fn load_config(config_path: Option<&Path>) -> anyhow::Result<Config> {
    if !Config::exists(config_path) {
        anyhow::bail!("No vineyard config found. Run `vinewater init` to create one.");
    }
    Config::load(config_path).context("Invalid vineyard config")
}

fn check(config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    println!("Vineyard: {}", config.vineyard.name);
    if let Some(block) = &config.vineyard.block {
        println!("Block: {}", block);
    }
    println!("Zones:");
    for zone in &config.vineyard.all_zones {
        let cfg = &config.zones[zone];
        let marker = if config.vineyard.root_zones.contains(zone) {
            " (root zone)"
        } else {
            ""
        };
        println!(
            "  {:>3}\" SP {:>5.1}  FC {:>5.1}  PWP {:>5.1}{}",
            zone.depth(),
            cfg.saturation_point,
            cfg.field_capacity_point,
            cfg.perm_wilting_point,
            marker
        );
    }
    println!(
        "FC goal {:.2}, FC minimum {:.2}, multiplier {:.2}",
        config.thresholds.fc_high, config.thresholds.fc_low, config.thresholds.multiplier
    );
    println!("Config OK");
    Ok(())
}

fn compute(
    config_path: Option<&Path>,
    snapshot_path: &Path,
    strict: bool,
    pretty: bool,
) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let snapshot = Snapshot::load(snapshot_path)
        .with_context(|| format!("Failed to read snapshot {}", snapshot_path.display()))?;
    let inputs = snapshot.inputs(&config).context("Snapshot rejected")?;

    let report = vinewater::compute(&inputs);

    let json = if strict {
        let result = report.into_result().context("Metric computation failed")?;
        let output = ResultOutput {
            sm_units: &snapshot.sm_units,
            user_root_zones: inputs.root_zones,
            result,
        };
        to_json(&output, pretty)?
    } else {
        to_json(&report.to_output(&snapshot.sm_units, inputs.root_zones), pretty)?
    };

    println!("{}", json);
    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> anyhow::Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

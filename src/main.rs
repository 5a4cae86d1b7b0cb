use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use landneed::{
    engine::{EngineBuilder, SimulationReport},
    logging::init_logger,
    scenario::{Scenario, ScenarioLoader},
    web::{self, WebServerConfig},
};

/// Widest bar in the text histogram.
const BAR_WIDTH: usize = 50;

#[derive(Debug, Parser)]
#[command(author, version, about = "Growth-based land need simulator")]
struct Cli {
    /// Path to a scenario YAML file (built-in defaults when omitted)
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Override the number of simulated scenarios
    #[arg(long)]
    trials: Option<usize>,

    /// Override the random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override the histogram bin count
    #[arg(long)]
    bins: Option<usize>,

    /// Worker threads; more than one partitions trials across threads
    #[arg(long)]
    workers: Option<usize>,

    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Serve the JSON API instead of running once
    #[arg(long)]
    serve: bool,

    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    #[arg(long, default_value_t = 8080)]
    port: u16,

    /// Log level (overrides the scenario's logging.level)
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let scenario = match &cli.scenario {
        Some(path) => ScenarioLoader::new(".").load(path)?,
        None => Scenario::default(),
    };
    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| scenario.logging.level.clone());
    init_logger(&level, scenario.logging.json);

    let mut builder = EngineBuilder::new(scenario.engine_settings());
    if let Some(trials) = cli.trials {
        builder = builder.with_trials(trials);
    }
    if let Some(seed) = cli.seed {
        builder = builder.with_seed(seed);
    }
    if let Some(bins) = cli.bins {
        builder = builder.with_histogram_bins(bins);
    }
    if let Some(workers) = cli.workers {
        builder = builder.with_workers(workers);
    }
    let engine = builder.build()?;

    if cli.serve {
        let runtime = tokio::runtime::Runtime::new()?;
        return runtime.block_on(web::run(WebServerConfig {
            settings: *engine.settings(),
            scenario,
            host: cli.host,
            port: cli.port,
        }));
    }

    let report = engine.run(&scenario.parameters)?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&scenario, &report);
    }
    Ok(())
}

fn print_report(scenario: &Scenario, report: &SimulationReport) {
    println!("Scenario '{}' (seed {})", scenario.name, report.seed);
    println!("{}", report.summary);
    println!();
    println!("Distribution of Additional Acres Needed");
    let peak = report
        .histogram
        .iter()
        .map(|bin| bin.count)
        .max()
        .unwrap_or(0)
        .max(1);
    for bin in &report.histogram {
        let bar = "#".repeat(bin.count * BAR_WIDTH / peak);
        println!("{:>15} | {:<width$} {}", bin.label, bar, bin.count, width = BAR_WIDTH);
    }
}

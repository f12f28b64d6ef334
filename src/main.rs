use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use paving_estimator::config::{Config, ConfigOverrides};
use paving_estimator::distance::DistanceResolver;
use paving_estimator::estimate::quick::{
    quick_crack_fill, quick_fuel, quick_patching, quick_sealcoat, quick_striping,
};
use paving_estimator::estimate::{EstimationResult, Estimator};
use paving_estimator::logging::init_logging;
use paving_estimator::output::csv::estimate_to_csv;
use paving_estimator::output::json::render_json;
use paving_estimator::output::table::{
    render_estimate, render_quick_crack_fill, render_quick_fuel, render_quick_patching,
    render_quick_sealcoat, render_quick_striping, render_rates,
};
use paving_estimator::project::{
    CrackFillingDetails, CrackSeverity, LineStripingDetails, PatchType, PatchingDetails,
    ProjectDetails, SealcoatingDetails, SurfaceCondition,
};
use paving_estimator::rates::RateTables;
use paving_estimator::server::run_server;
use serde::Serialize;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Debug, Parser)]
#[command(
    name = "paving-estimator",
    about = "Cost estimates for sealcoating, crack filling, patching and line striping"
)]
struct Cli {
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    output: OutputFormat,
    #[arg(long = "base-address", global = true)]
    base_address: Option<String>,
    #[arg(long = "distance-url", global = true)]
    distance_url: Option<String>,
    #[arg(long = "default-distance", global = true)]
    default_distance: Option<f64>,
    #[arg(short, long, global = true)]
    verbose: bool,
    #[arg(long = "log-json", global = true)]
    log_json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Full estimate for a project described in a JSON file.
    Estimate {
        #[arg(short, long)]
        project: PathBuf,
        /// One-way miles from the shop; skips the distance lookup.
        #[arg(long)]
        distance: Option<f64>,
    },
    /// Single-category calculators.
    Quick {
        #[command(subcommand)]
        tool: QuickCommand,
    },
    /// Show the active rate tables.
    Rates,
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        #[arg(long, default_value_t = 3001)]
        port: u16,
    },
    Config {
        #[arg(long)]
        init: bool,
        #[arg(long)]
        show: bool,
    },
}

#[derive(Debug, Subcommand)]
enum QuickCommand {
    Sealcoat {
        #[arg(long)]
        area: f64,
        #[arg(long, default_value = "good")]
        condition: SurfaceCondition,
        #[arg(long = "oil-spot-area")]
        oil_spot_area: Option<f64>,
    },
    Crackfill {
        #[arg(long)]
        feet: f64,
        #[arg(long, default_value = "moderate")]
        severity: CrackSeverity,
        #[arg(long)]
        sand: bool,
    },
    Striping {
        #[arg(long, default_value_t = 0)]
        standard: u32,
        #[arg(long, default_value_t = 0)]
        double: u32,
        #[arg(long, default_value_t = 0)]
        handicap: u32,
        #[arg(long, default_value_t = 0)]
        stencils: u32,
        #[arg(long, default_value_t = 0)]
        crosswalks: u32,
    },
    Patching {
        #[arg(long)]
        area: f64,
        #[arg(long = "type", default_value = "hot_mix")]
        patch_type: PatchType,
        #[arg(long, default_value_t = 2.0)]
        thickness: f64,
    },
    Fuel {
        #[arg(long)]
        distance: Option<f64>,
        /// Site address to look up when `--distance` is not given.
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        hours: Option<f64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_json);

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load(Some(&config_path))?;
    config.apply_overrides(ConfigOverrides {
        base_address: cli.base_address.clone(),
        distance_provider_url: cli.distance_url.clone(),
        default_distance_miles: cli.default_distance,
    });

    if matches!(cli.command, Commands::Config { .. }) {
        return handle_config_command(&cli.command, &config, &config_path);
    }
    if let Commands::Serve { host, port } = &cli.command {
        let bind = format!("{host}:{port}");
        let addr: SocketAddr = bind
            .parse()
            .map_err(|e| anyhow!("invalid bind address {bind}: {e}"))?;
        return run_server(config, Some(config_path), addr).await;
    }

    let resolver = DistanceResolver::from_config(&config)?;
    let rates = config.rates.clone();

    match &cli.command {
        Commands::Estimate { project, distance } => {
            let mut details = read_project(project)?;
            if let Some(miles) = distance {
                details.location.distance_from_base = Some(*miles);
            }
            let estimator = Estimator::new(rates.into());
            let result = estimator.estimate(&details, &resolver).await?;
            print_estimate(&result, cli.output)?;
        }
        Commands::Quick { tool } => run_quick(tool, &rates, &resolver, cli.output).await?,
        Commands::Rates => print_rates(&rates, cli.output)?,
        Commands::Config { .. } => {}
        Commands::Serve { .. } => unreachable!("serve command handled before dispatch"),
    }

    Ok(())
}

fn handle_config_command(command: &Commands, config: &Config, config_path: &Path) -> Result<()> {
    let Commands::Config { init, show } = command else {
        return Ok(());
    };
    if *init {
        Config::write_template(config_path)?;
        println!("Wrote config template to {}", config_path.display());
    }
    if *show || !*init {
        let mut shown = config.clone();
        if !shown.distance.api_key.is_empty() {
            shown.distance.api_key = "***".to_string();
        }
        println!("{}", render_json(&shown)?);
    }
    Ok(())
}

fn read_project(path: &Path) -> Result<ProjectDetails> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed reading project file: {}", path.display()))?;
    let project: ProjectDetails = serde_json::from_str(&data)
        .with_context(|| format!("failed parsing project JSON: {}", path.display()))?;
    debug!("loaded {} project from {}", project.project_type, path.display());
    Ok(project)
}

async fn run_quick(
    tool: &QuickCommand,
    rates: &RateTables,
    resolver: &DistanceResolver,
    format: OutputFormat,
) -> Result<()> {
    match tool {
        QuickCommand::Sealcoat {
            area,
            condition,
            oil_spot_area,
        } => {
            let details = SealcoatingDetails {
                area: *area,
                surface_condition: *condition,
                oil_spots: oil_spot_area.is_some(),
                oil_spot_area: *oil_spot_area,
            };
            let quick = quick_sealcoat(&details, rates)?;
            print_quick(&quick, format, render_quick_sealcoat)
        }
        QuickCommand::Crackfill {
            feet,
            severity,
            sand,
        } => {
            let details = CrackFillingDetails {
                linear_footage: *feet,
                severity: *severity,
                sand_fill_required: *sand,
            };
            let quick = quick_crack_fill(&details, rates)?;
            print_quick(&quick, format, render_quick_crack_fill)
        }
        QuickCommand::Striping {
            standard,
            double,
            handicap,
            stencils,
            crosswalks,
        } => {
            let details = LineStripingDetails {
                standard_stalls: *standard,
                double_stalls: *double,
                handicap_stalls: *handicap,
                custom_stencils: *stencils,
                crosswalks: *crosswalks,
                restripe: false,
            };
            let quick = quick_striping(&details, rates)?;
            print_quick(&quick, format, render_quick_striping)
        }
        QuickCommand::Patching {
            area,
            patch_type,
            thickness,
        } => {
            let details = PatchingDetails {
                area: *area,
                patch_type: *patch_type,
                thickness: *thickness,
            };
            let quick = quick_patching(&details, rates)?;
            print_quick(&quick, format, render_quick_patching)
        }
        QuickCommand::Fuel {
            distance,
            address,
            hours,
        } => {
            let miles = match (distance, address) {
                (Some(miles), _) => *miles,
                (None, Some(address)) => resolver.resolve_miles(address).await,
                (None, None) => resolver.default_miles(),
            };
            let quick = quick_fuel(miles, *hours, rates)?;
            print_quick(&quick, format, render_quick_fuel)
        }
    }
}

fn print_estimate(result: &EstimationResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_estimate(result)),
        OutputFormat::Json => println!("{}", render_json(result)?),
        OutputFormat::Csv => print!("{}", estimate_to_csv(result)?),
    }
    Ok(())
}

fn print_quick<T: Serialize>(value: &T, format: OutputFormat, render: fn(&T) -> String) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render(value)),
        OutputFormat::Json => println!("{}", render_json(value)?),
        OutputFormat::Csv => {
            warn!("CSV output for quick tools not implemented, using JSON");
            println!("{}", render_json(value)?);
        }
    }
    Ok(())
}

fn print_rates(rates: &RateTables, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_rates(rates)),
        OutputFormat::Json => println!("{}", render_json(rates)?),
        OutputFormat::Csv => {
            warn!("CSV output for rates not implemented, using JSON");
            println!("{}", render_json(rates)?);
        }
    }
    Ok(())
}

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use soil_advisor::config::{Config, ConfigOverrides};
use soil_advisor::context::AppContext;
use soil_advisor::engine::RecommendationResult;
use soil_advisor::output::csv::{recommendation_to_csv, soils_to_csv};
use soil_advisor::output::json::render_json;
use soil_advisor::output::table::{
    render_fertilizer_table, render_recommendation_table, render_soils_table,
};
use soil_advisor::reference::{CropLabel, ReferenceData};
use soil_advisor::server::run_server;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Debug, Parser)]
#[command(
    name = "soil-advisor",
    about = "Crop and fertilizer recommendations by soil type"
)]
struct Cli {
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
    #[arg(long, default_value = "info")]
    log_level: String,
    #[arg(long)]
    seed: Option<u64>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    Recommend {
        soil: String,
    },
    Soils,
    Fertilizer {
        crop: String,
    },
    Config {
        #[arg(long)]
        init: bool,
        #[arg(long)]
        show: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .map_err(|e| anyhow!("invalid log level {}: {e}", cli.log_level))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load(Some(&config_path))?;
    let (host, port) = match &cli.command {
        Commands::Serve { host, port } => (host.clone(), *port),
        _ => (None, None),
    };
    config.apply_overrides(ConfigOverrides {
        host,
        port,
        training_seed: cli.seed,
    });

    match &cli.command {
        Commands::Config { .. } => handle_config_command(&cli.command, &config, &config_path),
        Commands::Soils => print_soils(&ReferenceData::builtin(), cli.output),
        Commands::Fertilizer { crop } => {
            let crop = CropLabel::from_str(crop)?;
            let advice = ReferenceData::builtin().crop_advice(crop);
            match cli.output {
                OutputFormat::Table => println!("{}", render_fertilizer_table(crop, &advice)),
                OutputFormat::Json | OutputFormat::Csv => println!("{}", render_json(&advice)?),
            }
            Ok(())
        }
        Commands::Recommend { soil } => {
            let context = AppContext::initialize(config)?;
            let result = context.engine.recommend(soil)?;
            print_recommendation(&result, cli.output)
        }
        Commands::Serve { .. } => {
            let bind = format!("{}:{}", config.server.host, config.server.port);
            let addr: SocketAddr = bind
                .parse()
                .map_err(|e| anyhow!("invalid bind address {bind}: {e}"))?;
            let context = AppContext::initialize(config)?;
            run_server(context, addr).await
        }
    }
}

fn handle_config_command(command: &Commands, config: &Config, config_path: &PathBuf) -> Result<()> {
    let Commands::Config { init, show } = command else {
        return Ok(());
    };
    if *init {
        Config::write_template(config_path)?;
        println!("Wrote config template to {}", config_path.display());
    }
    if *show || !*init {
        println!("{}", render_json(config)?);
    }
    Ok(())
}

fn print_soils(reference: &ReferenceData, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_soils_table(reference)),
        OutputFormat::Csv => println!("{}", soils_to_csv(reference)?),
        OutputFormat::Json => {
            let soils = reference
                .soils()
                .map(|soil| {
                    serde_json::json!({
                        "name": soil,
                        "description": soil.description(),
                        "fertilizer": reference.soil_advice(soil),
                        "suitable_crops": reference.suitable_crops(soil),
                    })
                })
                .collect::<Vec<_>>();
            println!("{}", render_json(&soils)?);
        }
    }
    Ok(())
}

fn print_recommendation(result: &RecommendationResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_recommendation_table(result)),
        OutputFormat::Json => println!("{}", render_json(result)?),
        OutputFormat::Csv => println!("{}", recommendation_to_csv(result)?),
    }
    Ok(())
}

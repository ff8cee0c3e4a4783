use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use neo_explorer::{
    init_logging, limit, parse_query_date, write_results, Config, NeoDatabase, QueryCriteria,
};

/// Explore past and future close approaches of near-Earth objects.
#[derive(Parser, Debug)]
#[command(name = "neo-explorer")]
#[command(version = neo_explorer::VERSION)]
#[command(after_help = "Examples:
  neo-explorer inspect --pdes 433
  neo-explorer inspect --name Halley --verbose
  neo-explorer query --start-date 2020-01-01 --max-distance 0.1 --hazardous
  neo-explorer query --date 2020-01-01 --limit 0 --outfile results.csv")]
struct Cli {
    /// Path to the NEO catalog CSV
    #[arg(long, value_name = "PATH", default_value = neo_explorer::config::DEFAULT_NEO_FILE)]
    neofile: PathBuf,

    /// Path to the close-approach JSON
    #[arg(long, value_name = "PATH", default_value = neo_explorer::config::DEFAULT_CAD_FILE)]
    cadfile: PathBuf,

    /// Log level (trace, debug, info, warn, error); RUST_LOG overrides it
    #[arg(long, value_name = "LEVEL", default_value = neo_explorer::config::DEFAULT_LOG_LEVEL)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Inspect one NEO by primary designation or by name
    Inspect(InspectArgs),
    /// Query close approaches, print them or save them to CSV/JSON
    Query(QueryArgs),
}

#[derive(Args, Debug)]
struct InspectArgs {
    /// Primary designation of the NEO
    #[arg(short, long, conflicts_with = "name", required_unless_present = "name")]
    pdes: Option<String>,

    /// IAU name of the NEO
    #[arg(short, long)]
    name: Option<String>,

    /// Also print every close approach of the NEO
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Args, Debug)]
struct QueryArgs {
    /// Only approaches on this date (YYYY-MM-DD)
    #[arg(short, long, value_parser = parse_query_date)]
    date: Option<NaiveDate>,

    /// Only approaches on or after this date (YYYY-MM-DD)
    #[arg(short, long, value_parser = parse_query_date)]
    start_date: Option<NaiveDate>,

    /// Only approaches on or before this date (YYYY-MM-DD)
    #[arg(short, long, value_parser = parse_query_date)]
    end_date: Option<NaiveDate>,

    /// Minimum approach distance in au
    #[arg(long)]
    min_distance: Option<f64>,

    /// Maximum approach distance in au
    #[arg(long)]
    max_distance: Option<f64>,

    /// Minimum approach velocity in km/s
    #[arg(long)]
    min_velocity: Option<f64>,

    /// Maximum approach velocity in km/s
    #[arg(long)]
    max_velocity: Option<f64>,

    /// Minimum NEO diameter in km
    #[arg(long)]
    min_diameter: Option<f64>,

    /// Maximum NEO diameter in km
    #[arg(long)]
    max_diameter: Option<f64>,

    /// Only potentially hazardous NEOs
    #[arg(long, conflicts_with = "not_hazardous")]
    hazardous: bool,

    /// Only NEOs that are not potentially hazardous
    #[arg(long)]
    not_hazardous: bool,

    /// Maximum number of results; 0 for no limit
    #[arg(short, long, default_value_t = 10)]
    limit: usize,

    /// Write results to this .csv or .json file instead of printing them
    #[arg(short, long, value_name = "PATH")]
    outfile: Option<PathBuf>,
}

impl QueryArgs {
    fn criteria(&self) -> QueryCriteria {
        let hazardous = match (self.hazardous, self.not_hazardous) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };

        QueryCriteria {
            date: self.date,
            start_date: self.start_date,
            end_date: self.end_date,
            distance_min: self.min_distance,
            distance_max: self.max_distance,
            velocity_min: self.min_velocity,
            velocity_max: self.max_velocity,
            diameter_min: self.min_diameter,
            diameter_max: self.max_diameter,
            hazardous,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config {
        neo_file: cli.neofile,
        cad_file: cli.cadfile,
        log_level: cli.log_level,
    };
    init_logging(&config.log_level)?;

    let db = config.load_database()?;

    match cli.command {
        Command::Inspect(args) => run_inspect(&db, &args),
        Command::Query(args) => run_query(&db, &args),
    }
}

fn run_inspect(db: &NeoDatabase, args: &InspectArgs) -> Result<()> {
    let neo = match (&args.pdes, &args.name) {
        (Some(pdes), _) => db.get_neo_by_designation(pdes),
        (None, Some(name)) => db.get_neo_by_name(name),
        (None, None) => None,
    };

    let Some(neo) = neo else {
        println!("No matching NEOs exist in the database.");
        return Ok(());
    };

    println!("{}", neo);
    if args.verbose {
        for approach in db.approaches_of(neo) {
            println!("- {}", approach.summary(db)?);
        }
    }
    Ok(())
}

fn run_query(db: &NeoDatabase, args: &QueryArgs) -> Result<()> {
    let filters = args.criteria().create_filters();
    let results = limit(db.query(&filters), Some(args.limit));

    match &args.outfile {
        None => {
            for approach in results {
                println!("{}", approach.summary(db)?);
            }
        }
        Some(path) => {
            let format = write_results(results, db, path)
                .with_context(|| format!("Failed to write results to {}", path.display()))?;
            info!(format = format.name(), path = %path.display(), "saved query results");
        }
    }
    Ok(())
}

//! CLI Adapter.

mod render;

use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dialoguer::{Error as DialoguerError, Input};
use log::LevelFilter;

use crate::app::api;
use crate::domain::{
    AppError, DEFAULT_MAX_DURATION, Difficulty, DifficultyFilter, DreamRequest, MAX_PLAN_DAYS,
    MIN_PLAN_DAYS, PackingRequest, SortKey, TripFilters, TripPlannerRequest,
};
use crate::ports::AiGatewayFactory;

use render::{EventPrinter, format_packing_list, format_trip_detail, format_trip_row};

const DEFAULT_SEASON: &str = "Summer (Jun-Aug)";

#[derive(Parser)]
#[command(name = "trekplan")]
#[command(version)]
#[command(
    about = "Plan treks and expeditions in Gilgit-Baltistan with generative AI",
    long_about = None
)]
struct Cli {
    /// Path to a trekplan.toml configuration file
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Answer from canned offline responses instead of calling Gemini
    #[arg(long, global = true)]
    mock: bool,
    /// Show progress logs on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List trips, filtered and sorted, or ranked against a wish
    #[clap(visible_alias = "t")]
    Trips {
        /// Difficulty level, or "all"
        #[arg(long, default_value = "all")]
        difficulty: DifficultyFilter,
        /// Longest trip to include, in days
        #[arg(long, default_value_t = DEFAULT_MAX_DURATION)]
        max_duration: u32,
        /// default, duration-asc, duration-desc, difficulty-asc or difficulty-desc
        #[arg(long, default_value = "default")]
        sort: SortKey,
        /// Describe your ideal trip and let the matchmaker order the list
        #[arg(long = "match", value_name = "QUERY")]
        query: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show one trip with its itinerary
    Show {
        /// Trip id as listed by `trips`
        id: String,
    },
    /// Get a personalized recommendation, alternatives, map and photographs
    #[clap(visible_alias = "p")]
    Plan {
        /// Desired trip length in days
        #[arg(
            long,
            default_value_t = 14,
            value_parser = clap::value_parser!(u32).range(MIN_PLAN_DAYS as i64..=MAX_PLAN_DAYS as i64)
        )]
        duration: u32,
        /// Beginner, Intermediate, Advanced or Expert
        #[arg(long, default_value = "Intermediate")]
        fitness: Difficulty,
        /// What you want from the trip
        #[arg(long)]
        interests: Option<String>,
        /// Directory to save generated photographs in
        #[arg(long, value_name = "DIR")]
        image_dir: Option<PathBuf>,
        /// Print one JSON event per line
        #[arg(long)]
        json: bool,
    },
    /// Turn a dream adventure into an itinerary and a poster
    #[clap(visible_alias = "d")]
    Dream {
        /// Your dream, prompted for when omitted
        dream: Option<String>,
        /// Directory to save the poster in
        #[arg(long, value_name = "DIR")]
        image_dir: Option<PathBuf>,
        /// Print one JSON event per line
        #[arg(long)]
        json: bool,
    },
    /// Generate a packing list for a trip
    Pack {
        /// Trip id; defaults to the first trip in the catalog
        #[arg(long)]
        trip: Option<String>,
        /// When you are travelling
        #[arg(long, default_value = DEFAULT_SEASON)]
        season: String,
        /// Anything the list should account for
        #[arg(long, default_value = "")]
        notes: String,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Ask Askari, our veteran guide, a question
    Ask { question: String },
    /// A few inspiring lines about an interest
    Inspire { interest: String },
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { LevelFilter::Info } else { LevelFilter::Warn };
    let _ = env_logger::Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} - {} - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter(None, level)
        .parse_default_env()
        .try_init();
}

fn execute(cli: Cli) -> Result<i32, AppError> {
    let config = api::config(cli.config.as_deref())?;
    let factory = api::gateway_factory(&config, cli.mock);
    let factory = factory.as_ref();

    match cli.command {
        Commands::Trips { difficulty, max_duration, sort, query, json } => {
            let filters = TripFilters { difficulty, max_duration };
            run_trips(factory, &filters, sort, query.as_deref(), json).map(|_| 0)
        }
        Commands::Show { id } => {
            println!("{}", format_trip_detail(api::trip(&id)?));
            Ok(0)
        }
        Commands::Plan { duration, fitness, interests, image_dir, json } => {
            let defaults = TripPlannerRequest::default();
            let request = TripPlannerRequest {
                duration_days: duration,
                fitness,
                interests: interests.unwrap_or(defaults.interests),
            };
            let run = api::plan_trip(factory, request)?;
            print_run(run, EventPrinter::new(json, image_dir, "plan"))
        }
        Commands::Dream { dream, image_dir, json } => {
            let dream = match dream {
                Some(value) => value,
                None => match prompt_dream()? {
                    Some(value) => value,
                    None => return Ok(0),
                },
            };
            let run = api::visualize_dream(factory, DreamRequest::new(dream))?;
            print_run(run, EventPrinter::new(json, image_dir, "dream"))
        }
        Commands::Pack { trip, season, notes, json } => {
            run_pack(factory, trip, season, notes, json).map(|_| 0)
        }
        Commands::Ask { question } => {
            println!("{}", api::ask_guide(factory, &question)?);
            Ok(0)
        }
        Commands::Inspire { interest } => {
            println!("{}", api::adventure_blurb(factory, &interest)?);
            Ok(0)
        }
    }
}

fn run_trips(
    factory: &dyn AiGatewayFactory,
    filters: &TripFilters,
    sort: SortKey,
    query: Option<&str>,
    json: bool,
) -> Result<(), AppError> {
    let ranking = match query.map(|query| api::match_trips(factory, query)) {
        Some(Ok(ranking)) => ranking,
        Some(Err(err)) => {
            log::warn!("Matchmaker failed, listing without a ranking: {}", err);
            eprintln!("Error: {}", err);
            eprintln!("The AI matchmaker is currently unavailable. Please use the filters.");
            None
        }
        None => None,
    };
    let trips = api::browse_trips(filters, sort, ranking.as_deref())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&trips)?);
        return Ok(());
    }
    if trips.is_empty() {
        println!("No trips match these filters.");
        return Ok(());
    }
    for trip in trips {
        println!("{}", format_trip_row(trip));
    }
    Ok(())
}

fn run_pack(
    factory: &dyn AiGatewayFactory,
    trip: Option<String>,
    season: String,
    notes: String,
    json: bool,
) -> Result<(), AppError> {
    let trip_id = match trip {
        Some(id) => id,
        None => api::trips()?
            .first()
            .map(|trip| trip.id.clone())
            .ok_or_else(|| AppError::Catalog("the catalog is empty".to_string()))?,
    };
    let list = api::packing_list(factory, &PackingRequest { trip_id, season, notes })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&list)?);
    } else {
        print!("{}", format_packing_list(&list));
    }
    Ok(())
}

fn print_run<I>(run: I, mut printer: EventPrinter) -> Result<i32, AppError>
where
    I: Iterator<Item = crate::domain::PipelineEvent>,
{
    for event in run {
        printer.render(&event)?;
    }
    Ok(if printer.failed() { 1 } else { 0 })
}

fn prompt_dream() -> Result<Option<String>, AppError> {
    match Input::<String>::new().with_prompt("Describe your dream adventure").interact_text() {
        Ok(value) => Ok(Some(value)),
        Err(DialoguerError::IO(err)) if err.kind() == ErrorKind::Interrupted => Ok(None),
        Err(err) => Err(AppError::InvalidRequest(format!("Failed to read your dream: {}", err))),
    }
}

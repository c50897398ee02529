mod assets;
mod report;

use assets::{ListingLoadError, load_listings};
use clap::Parser;
use meal_map::{
    ConfigError, DietaryPreference, FulfillmentOption, KindFilter, ListingFilter, ViewerRole,
    ViewportCommand, ViewportConfig, ViewportEngine,
};
use report::Report;
use std::io::BufRead;
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

/// Explore meal listings through a pan/zoom map viewport.
///
/// Commands: zoom-in (in, +), zoom-out (out, -), reset (fit, 0),
/// up, down, left, right (or pan-up, pan-down, ...).
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Listings file (.ron or .json); defaults to the bundled sample listings
    #[arg(short, long)]
    listings: Option<PathBuf>,

    /// Viewport config file (.ron)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Whose dashboard to emulate: guest, seeker or donor
    #[arg(long, default_value_t = ViewerRole::Guest)]
    role: ViewerRole,

    /// Override the role's listing kind: all, requests or offers
    #[arg(long)]
    kind: Option<KindFilter>,

    /// Only listings whose city, country or zip contains this text
    #[arg(long)]
    location: Option<String>,

    /// Only listings with this dietary tag (e.g. vegan, jain-veg)
    #[arg(long)]
    diet: Option<DietaryPreference>,

    /// Only listings offering this hand-off (pickup, delivery, dine-in, meet-up)
    #[arg(long)]
    logistics: Option<FulfillmentOption>,

    /// Also place fulfilled requests and claimed offers
    #[arg(long)]
    include_inactive: bool,

    /// Read further commands from stdin, one per line
    #[arg(short, long)]
    interactive: bool,

    /// Print reports as JSON
    #[arg(long)]
    json: bool,

    /// Viewport commands applied in order before the first report
    #[arg(value_name = "COMMAND")]
    commands: Vec<ViewportCommand>,
}

#[derive(Error, Debug)]
enum AppError {
    #[error(transparent)]
    Listings(#[from] ListingLoadError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to write JSON report: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read stdin: {0}")]
    Stdin(#[from] std::io::Error),
}

impl Args {
    fn listing_filter(&self) -> ListingFilter {
        let mut filter = ListingFilter::for_role(self.role);
        if let Some(kind) = self.kind {
            filter.kind = kind;
        }
        filter.active_only = !self.include_inactive;
        filter.location = self.location.clone();
        filter.diet = self.diet;
        filter.logistics = self.logistics;
        filter
    }
}

fn print_report(report: &Report<'_>, json: bool) -> Result<(), AppError> {
    if json {
        report.print_json()?;
    } else {
        report.print_text();
    }
    Ok(())
}

fn run(args: Args) -> Result<(), AppError> {
    let config = match &args.config {
        Some(path) => ViewportConfig::load(path)?,
        None => ViewportConfig::default(),
    };
    let mut engine = ViewportEngine::with_config(config)?;

    let listings = load_listings(args.listings.as_deref())?;
    if let Err(err) = meal_map::projection::check_unique_ids(&listings) {
        log::warn!("{err}; only one pin per id will be placed");
    }
    let placed = args.listing_filter().apply(&listings);

    for command in &args.commands {
        engine.apply(*command);
    }
    print_report(&Report::build(&mut engine, &placed, args.role), args.json)?;

    if !args.interactive {
        return Ok(());
    }

    for line in std::io::stdin().lock().lines() {
        let line = line?;
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if matches!(input, "quit" | "exit" | "q") {
            break;
        }
        match engine.execute(input) {
            Ok(_) => print_report(&Report::build(&mut engine, &placed, args.role), args.json)?,
            Err(err) => {
                log::warn!("Ignoring command: {err}");
                eprintln!("{err}");
            }
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

//! CLI entry point for the energy consumption forecaster.

use anyhow::{Result, anyhow};
use clap::Parser;
use energy_forecasting::{ForecastConfig, ForecastSession, dataset};
use energy_forecasting::ProjectionReport;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Per-country energy consumption projection",
    long_about = "Loads a table of per-country annual energy consumption, fills missing\n\
                  observations with row means, and projects future consumption with a\n\
                  linear trend fitted per country.\n\n\
                  EXAMPLES:\n  \
                  # List countries with their row numbers\n  \
                  energy-forecasting -i data/energy_data.csv --list\n\n  \
                  # Project row 10 (as shown by --list) to 2040\n  \
                  energy-forecasting -i data/energy_data.csv --row 10 --year 2040\n\n  \
                  # Project by country name and write a JSON report\n  \
                  energy-forecasting -i data/energy_data.csv --country Spain --year 2035 -r"
)]
struct Args {
    /// Path to the CSV file (first column = country, year columns after)
    #[arg(short, long)]
    input: String,

    /// List countries and their row numbers, then exit
    #[arg(long)]
    list: bool,

    /// Row number of the country to project, 1-based as shown by --list
    #[arg(long)]
    row: Option<usize>,

    /// Country name to project (alternative to --row)
    #[arg(short, long)]
    country: Option<String>,

    /// Target year to project to
    #[arg(short, long)]
    year: Option<i32>,

    /// Latest target year accepted
    #[arg(long, default_value = "2050")]
    max_year: i32,

    /// Output directory for reports
    #[arg(short, long, default_value = "./outputs")]
    output: String,

    /// Write the projection as a JSON report to the output directory
    #[arg(short = 'r', long)]
    emit_report: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and the result)
    #[arg(short, long)]
    quiet: bool,
}

/// Initialize the tracing subscriber for logging.
fn init_logging(level: &str, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet);

    if !std::path::Path::new(&args.input).exists() {
        return Err(anyhow!("Input file not found: {}", args.input));
    }

    let config = ForecastConfig::builder()
        .max_target_year(args.max_year)
        .output_dir(&args.output)
        .build()?;
    let session = ForecastSession::new(config);

    info!("Loading dataset from: {}", args.input);
    let data = dataset::read_table(&args.input)?;
    let summary = session.prepare(data)?;
    info!("{}", summary.message);
    for label in &summary.all_missing {
        warn!("'{}' has no usable observations and cannot be projected", label);
    }

    if args.list {
        return run_list(&session);
    }

    let year = args
        .year
        .ok_or_else(|| anyhow!("--year is required unless --list is given"))?;
    let last_year = session.last_year()?;
    // The practical range belongs to this boundary; the core only checks
    // that the target lies beyond the historical axis.
    if year > args.max_year {
        return Err(anyhow!(
            "Target year {} is beyond the supported horizon {} (see --max-year)",
            year,
            args.max_year
        ));
    }
    if year <= last_year {
        return Err(anyhow!(
            "Target year {} must be after the last historical year {}",
            year,
            last_year
        ));
    }

    let row_index = resolve_row(&session, &args)?;

    let projection = session.predict(row_index, year)?;
    let report = ProjectionReport::new(projection, Some(args.input.clone()));

    // User-facing output, always visible regardless of log level
    println!("{}", report.render_text());

    if args.emit_report {
        let path = report.write_json(&args.output)?;
        println!("Report written to {}", path.display());
    }

    Ok(())
}

/// Normalize the user's selection to a canonical 0-based row index, exactly
/// once at this boundary.
fn resolve_row(session: &ForecastSession, args: &Args) -> Result<usize> {
    match (&args.country, args.row) {
        (Some(name), _) => session
            .find_entity(name)?
            .ok_or_else(|| anyhow!("Country '{}' not found (try --list)", name)),
        (None, Some(display_row)) => {
            if display_row == 0 {
                return Err(anyhow!("--row is 1-based, as shown by --list"));
            }
            Ok(display_row - 1)
        }
        (None, None) => Err(anyhow!("Select a country with --row or --country")),
    }
}

/// Print countries with their 1-based display row numbers.
///
/// Uses `println!` intentionally: this listing is the primary output of
/// --list and should be visible regardless of log level.
fn run_list(session: &ForecastSession) -> Result<()> {
    println!("{:<6} {}", "Row", "Country");
    println!("{}", "-".repeat(40));
    for (index, label) in session.entities()? {
        println!("{:<6} {}", index + 1, label);
    }
    Ok(())
}

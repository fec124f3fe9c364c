use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum, arg};
use log::warn;

use lapdelta::comparison::sectors::partition;
use lapdelta::comparison::{ComparisonRequest, SyncMode, synchronize};
use lapdelta::config::AnalysisConfig;
use lapdelta::errors::LapDeltaError;
use lapdelta::loader::{list_lap_files, load_lap_file};
use lapdelta::openf1::{fastest_driver, parse_lap_summaries};
use lapdelta::telemetry::distance::{integrate_distance, total_distance};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SyncModeArg {
    AlignStart,
    AlignEnd,
}

impl From<SyncModeArg> for SyncMode {
    fn from(value: SyncModeArg) -> Self {
        match value {
            SyncModeArg::AlignStart => SyncMode::AlignStart,
            SyncModeArg::AlignEnd => SyncMode::AlignEnd,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compare one lap against another and print the derived deltas
    Compare {
        #[arg(short, long)]
        primary: PathBuf,

        #[arg(short, long)]
        secondary: Option<PathBuf>,

        #[arg(long, value_enum)]
        sync: Option<SyncModeArg>,

        /// Resample interval for the time delta, in meters
        #[arg(long)]
        interval: Option<f64>,

        /// Number of sectors to annotate on the primary lap
        #[arg(long)]
        sectors: Option<usize>,
    },
    /// Print the sector boundaries of a lap
    Sectors {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        count: Option<usize>,
    },
    /// List lap files available in a folder
    Laps {
        #[arg(short, long)]
        dir: PathBuf,
    },
    /// Decide the faster driver from two saved timing-service lap responses
    Fastest {
        #[arg(long)]
        laps_a: PathBuf,

        #[arg(long)]
        laps_b: PathBuf,

        #[arg(short, long)]
        lap: i32,

        #[arg(long)]
        name_a: String,

        #[arg(long)]
        name_b: String,
    },
}

fn compare(
    primary_path: &PathBuf,
    secondary_path: Option<&PathBuf>,
    sync: Option<SyncModeArg>,
    interval: Option<f64>,
    sector_count: Option<usize>,
    config: &AnalysisConfig,
) -> Result<(), LapDeltaError> {
    let primary = load_lap_file(primary_path)?;
    // same file selected on both sides means there is nothing to compare,
    // mirror that by not loading it at all
    let secondary = match secondary_path {
        Some(path) if path != primary_path => Some(load_lap_file(path)?),
        _ => None,
    };

    let mut request = ComparisonRequest::new(&primary);
    if let Some(ref secondary) = secondary {
        request = request.against(secondary);
    }
    request.sync_mode = sync.map(SyncMode::from).unwrap_or(config.sync_mode);
    request.channels = config.channels;
    request.resample_interval = interval.unwrap_or(config.resample_interval_m);

    let series = synchronize(&request);

    let annotated = integrate_distance(&primary);
    println!(
        "{} lap {}: {:.3} s over {:.0} m",
        primary.driver,
        primary.lap_number,
        primary.final_time().unwrap_or(0.),
        total_distance(&annotated)
    );
    for sector in partition(&annotated, sector_count.unwrap_or(config.sector_count)) {
        println!(
            "  {}: {:.0} m - {:.0} m",
            sector.label, sector.start_distance, sector.end_distance
        );
    }

    let Some(secondary) = secondary else {
        warn!("No comparison lap selected; overlays only");
        return Ok(());
    };
    println!(
        "{} lap {}: {:.3} s",
        secondary.driver,
        secondary.lap_number,
        secondary.final_time().unwrap_or(0.)
    );
    println!(
        "{}",
        fastest_summary(&primary, &secondary)
    );

    if let Some(delta) = series.speed_delta
        && let Some((time, value)) = delta
            .points
            .iter()
            .max_by(|a, b| a.1.abs().total_cmp(&b.1.abs()))
    {
        println!("Largest speed delta: {value:+.1} km/h at t={time:.2} s");
    }
    if let Some(delta) = series.time_delta
        && let Some((distance, value)) = delta.points.last()
    {
        println!("Cumulative time delta at {distance:.0} m: {value:+.3} s");
    }
    Ok(())
}

fn fastest_summary(primary: &lapdelta::LapData, secondary: &lapdelta::LapData) -> String {
    lapdelta::summarize(
        primary.final_time(),
        secondary.final_time(),
        &primary.driver,
        &secondary.driver,
    )
}

fn sectors(input: &PathBuf, count: usize) -> Result<(), LapDeltaError> {
    let lap = load_lap_file(input)?;
    let annotated = integrate_distance(&lap);
    println!(
        "{} lap {} ({:.0} m):",
        lap.driver,
        lap.lap_number,
        total_distance(&annotated)
    );
    for sector in partition(&annotated, count) {
        println!(
            "  {}: {:.0} m - {:.0} m",
            sector.label, sector.start_distance, sector.end_distance
        );
    }
    Ok(())
}

fn laps(dir: &PathBuf) -> Result<(), LapDeltaError> {
    for entry in list_lap_files(dir)? {
        println!("{} ({})", entry.display_name, entry.path.display());
    }
    Ok(())
}

fn fastest(
    laps_a: &PathBuf,
    laps_b: &PathBuf,
    lap: i32,
    name_a: &str,
    name_b: &str,
) -> Result<(), LapDeltaError> {
    let body_a =
        std::fs::read_to_string(laps_a).map_err(|e| LapDeltaError::LapFileIo { source: e })?;
    let body_b =
        std::fs::read_to_string(laps_b).map_err(|e| LapDeltaError::LapFileIo { source: e })?;
    let summaries_a = parse_lap_summaries(&body_a)?;
    let summaries_b = parse_lap_summaries(&body_b)?;
    println!(
        "{}",
        fastest_driver(&summaries_a, &summaries_b, lap, name_a, name_b)
    );
    Ok(())
}

fn main() {
    #[cfg(debug_assertions)]
    colog::init();

    let cli = Args::parse();
    let config = AnalysisConfig::from_local_file().unwrap_or_default();

    match &cli.command {
        Commands::Compare {
            primary,
            secondary,
            sync,
            interval,
            sectors,
        } => compare(primary, secondary.as_ref(), *sync, *interval, *sectors, &config)
            .expect("Error while comparing laps"),
        Commands::Sectors { input, count } => {
            sectors(input, count.unwrap_or(config.sector_count))
                .expect("Error while partitioning lap")
        }
        Commands::Laps { dir } => laps(dir).expect("Error while listing lap files"),
        Commands::Fastest {
            laps_a,
            laps_b,
            lap,
            name_a,
            name_b,
        } => fastest(laps_a, laps_b, *lap, name_a, name_b)
            .expect("Error while comparing lap times"),
    };
}

use clap::Parser;
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rover::codec;
use rover::config;
use rover::console::{self, InputSource, ReaderSource, SessionOptions};
use rover::logging;
use rover::{Dialect, Mission, Plateau, Result, VehicleKind};
use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::PathBuf;
use std::process;

// --- Command Line Arguments ---
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Mission script: a position line ("1 2 N") followed by an instruction
    /// line, repeated. Reads stdin when omitted.
    script: Option<PathBuf>,

    /// Upper-right corner of a rectangular plateau [default: "5 5"]
    #[arg(long, conflicts_with = "radius")]
    max: Option<String>,

    /// Radius of a circular plateau instead of a rectangular one
    #[arg(long)]
    radius: Option<i32>,

    /// Obstacle coordinates such as "2 4" (repeatable)
    #[arg(long = "obstacle")]
    obstacles: Vec<String>,

    /// Number of obstacles to scatter on random free cells
    #[arg(long, default_value_t = 0)]
    random_obstacles: usize,

    /// Seed for random obstacle placement
    #[arg(long)]
    seed: Option<u64>,

    /// Instruction dialect
    #[arg(long, value_enum, default_value_t = Dialect::Simple)]
    dialect: Dialect,

    /// Kind of vehicle deployed for every position line
    #[arg(long, value_enum, default_value_t = config::DEFAULT_VEHICLE_KIND)]
    kind: VehicleKind,

    /// Debug filter to specify log topics (e.g., "plateau,vehicle")
    /// Available topics: plateau, vehicle, instructions, mission
    #[arg(long)]
    debug_filter: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn init_logging(args: &Args) {
    // RUST_LOG takes over from the built-in logger when present
    let result = if std::env::var_os("RUST_LOG").is_some() {
        env_logger::try_init().map_err(|e| e.to_string())
    } else {
        logging::init_logger(logging::parse_level(&args.log_level), args.debug_filter.clone())
            .map_err(|e| e.to_string())
    };
    if let Err(e) = result {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }
}

fn build_plateau(args: &Args) -> Result<Plateau> {
    let mut plateau = match args.radius {
        Some(radius) => Plateau::circular(radius)?,
        None => {
            let max = match &args.max {
                Some(text) => codec::to_coordinates(text)?,
                None => config::DEFAULT_PLATEAU_MAX,
            };
            Plateau::rectangular(max)?
        }
    };

    for text in &args.obstacles {
        plateau.add_obstacle(codec::to_coordinates(text)?)?;
    }

    if args.random_obstacles > 0 {
        let count = args.random_obstacles.min(config::MAX_SCATTERED_OBSTACLES);
        let mut rng = match args.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let placed = plateau.scatter_obstacles(count, &mut rng);
        info!("Scattered {} random obstacles", placed);
    }

    Ok(plateau)
}

fn run(args: &Args) -> Result<()> {
    let plateau = build_plateau(args)?;
    info!(
        "{} with {} obstacles, {} dialect",
        plateau.shape(),
        plateau.obstacles().len(),
        args.dialect.parser().name()
    );

    let mut mission = Mission::new(args.dialect);
    mission.connect_plateau(plateau);

    let mut source: Box<dyn InputSource> = match &args.script {
        Some(path) => Box::new(ReaderSource::new(BufReader::new(File::open(path)?))),
        None => Box::new(ReaderSource::new(io::stdin().lock())),
    };
    let show_prompts = args.script.is_none() && io::stdin().is_terminal();

    let options = SessionOptions {
        kind: args.kind,
        show_prompts,
    };
    let mut stdout = io::stdout().lock();
    let summary = console::run_session(source.as_mut(), &mut stdout, &mut mission, options)?;

    info!(
        "Session finished: {} instructions applied, {} placements rejected",
        summary.reports.len(),
        summary.rejected_placements
    );
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(&args);

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

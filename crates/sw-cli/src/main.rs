//! CLI frontend for the Sternenwanderer universe generator and explorer.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Store directory used when `--db` is not given.
const DEFAULT_DB: &str = "universe.db";

#[derive(Parser)]
#[command(
    name = "sw",
    about = "Sternenwanderer: generate a persistent universe of stars and explore it",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log progress to stderr (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate stars and planets into a store
    Generate {
        /// Store directory
        #[arg(short, long, default_value = DEFAULT_DB)]
        db: PathBuf,

        /// Number of stars to generate
        #[arg(short = 'n', long, default_value = "10000")]
        stars: u64,

        /// World extent per axis
        #[arg(short, long, default_value = "1000.0")]
        size: f64,

        /// RNG seed for deterministic generation
        #[arg(long, default_value = "42")]
        seed: u64,
    },

    /// Show a star and its planets
    Show {
        /// Star id
        id: u64,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        /// Store directory
        #[arg(short, long, default_value = DEFAULT_DB)]
        db: PathBuf,
    },

    /// List the stars in the square around a point
    #[command(allow_negative_numbers = true)]
    Near {
        /// Center x coordinate
        x: f64,

        /// Center y coordinate
        y: f64,

        /// Half-width of the square
        #[arg(short, long, default_value = "40.0")]
        radius: f64,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Store directory
        #[arg(short, long, default_value = DEFAULT_DB)]
        db: PathBuf,
    },

    /// Look up the star at a coordinate
    #[command(allow_negative_numbers = true)]
    At {
        /// X coordinate
        x: f64,

        /// Y coordinate
        y: f64,

        /// Store directory
        #[arg(short, long, default_value = DEFAULT_DB)]
        db: PathBuf,
    },

    /// Show the parameters of a stored universe
    Info {
        /// Store directory
        #[arg(short, long, default_value = DEFAULT_DB)]
        db: PathBuf,
    },

    /// Explore a stored universe interactively
    Explore {
        /// Store directory
        #[arg(short, long, default_value = DEFAULT_DB)]
        db: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Generate {
            db,
            stars,
            size,
            seed,
        } => commands::generate::run(&db, stars, size, seed),
        Commands::Show { id, json, db } => commands::show::run(&db, id, json),
        Commands::Near {
            x,
            y,
            radius,
            json,
            db,
        } => commands::near::run(&db, x, y, radius, json),
        Commands::At { x, y, db } => commands::at::run(&db, x, y),
        Commands::Info { db } => commands::info::run(&db),
        Commands::Explore { db } => commands::explore::run(&db),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

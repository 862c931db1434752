mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use commands::Context;

#[derive(Parser)]
#[command(
    name = "limnos",
    version,
    about = "Water-quality sampling analysis: trends, safety tiers and litter compliance"
)]
struct Cli {
    /// Predefined analysis profile (default: bathing-water)
    #[arg(long, global = true, value_name = "NAME", conflicts_with = "profile_file")]
    profile: Option<String>,

    /// Custom JSON analysis profile
    #[arg(long = "profile-file", global = true, value_name = "FILE")]
    profile_file: Option<PathBuf>,

    /// Skip malformed records instead of aborting the load
    #[arg(long, global = true)]
    skip_invalid: bool,

    /// Output format: table (default) or json
    #[arg(short, long, global = true, default_value = "table")]
    output: String,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Counts and locations in a sampling export
    Summary {
        /// Path to CSV or XLSX export
        input_file: PathBuf,
    },
    /// List sampling points
    Points {
        /// Path to CSV or XLSX export
        input_file: PathBuf,

        /// Only points with a positive detection in this family
        #[arg(long, value_name = "FAMILY")]
        family: Option<String>,
    },
    /// Time series for one location
    Trend {
        /// Path to CSV or XLSX export
        input_file: PathBuf,

        /// Sampling point label
        #[arg(short, long)]
        location: String,

        /// Determinand label (exact)
        #[arg(short, long, conflicts_with = "family", required_unless_present = "family")]
        determinand: Option<String>,

        /// Substance family from the profile
        #[arg(short, long)]
        family: Option<String>,

        /// all, last_month, last_half_year, last_<n>_months or last_<n>_days
        #[arg(short, long, default_value = "all")]
        window: String,
    },
    /// Find determinands by label
    Search {
        /// Path to CSV or XLSX export
        input_file: PathBuf,

        /// Case-insensitive label substring
        term: String,

        /// all, last_month, last_half_year, last_<n>_months or last_<n>_days
        #[arg(short, long, default_value = "all")]
        window: String,
    },
    /// Safe / warning / danger breakdown for a family
    Tiers {
        /// Path to CSV or XLSX export
        input_file: PathBuf,

        /// Substance family with a threshold in the profile
        #[arg(short, long)]
        family: String,

        /// Sampling point label (default: every location)
        #[arg(short, long)]
        location: Option<String>,

        /// all, last_month, last_half_year, last_<n>_months or last_<n>_days
        #[arg(short, long, default_value = "all")]
        window: String,
    },
    /// Litter compliance per sampling point
    Compliance {
        /// Path to CSV or XLSX export
        input_file: PathBuf,
    },
    /// Dashboard overview: every family in one window
    Overview {
        /// Path to CSV or XLSX export
        input_file: PathBuf,

        /// all, last_month, last_half_year, last_<n>_months or last_<n>_days
        #[arg(short, long, default_value = "all")]
        window: String,
    },
    /// Manage and inspect analysis profiles
    Profiles {
        #[command(subcommand)]
        action: ProfilesAction,
    },
}

#[derive(Subcommand)]
enum ProfilesAction {
    /// List predefined profiles
    List,
    /// Show a predefined profile's families, thresholds and bands
    Show {
        /// Preset name (e.g., "bathing-water")
        preset: String,
    },
    /// Validate a custom profile file
    Validate {
        /// Path to JSON profile
        file: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let ctx = Context {
        profile: cli.profile,
        profile_file: cli.profile_file,
        skip_invalid: cli.skip_invalid,
        output: cli.output,
    };

    let result = match cli.command {
        Commands::Summary { input_file } => commands::summary::run(&ctx, &input_file),
        Commands::Points { input_file, family } => {
            commands::points::run(&ctx, &input_file, family.as_deref())
        }
        Commands::Trend {
            input_file,
            location,
            determinand,
            family,
            window,
        } => commands::trend::run(
            &ctx,
            &input_file,
            &location,
            determinand.as_deref(),
            family.as_deref(),
            &window,
        ),
        Commands::Search {
            input_file,
            term,
            window,
        } => commands::search::run(&ctx, &input_file, &term, &window),
        Commands::Tiers {
            input_file,
            family,
            location,
            window,
        } => commands::tiers::run(&ctx, &input_file, &family, location, &window),
        Commands::Compliance { input_file } => commands::compliance::run(&ctx, &input_file),
        Commands::Overview { input_file, window } => {
            commands::overview::run(&ctx, &input_file, &window)
        }
        Commands::Profiles { action } => match action {
            ProfilesAction::List => commands::profiles::list(),
            ProfilesAction::Show { preset } => commands::profiles::show(&preset),
            ProfilesAction::Validate { file } => commands::profiles::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

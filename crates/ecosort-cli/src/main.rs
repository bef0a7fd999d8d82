mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "ecosort",
    version,
    about = "Waste item classification with rule-based fallback for unreliable LLM output"
)]
struct Cli {
    /// Debug logging and per-label reasoning
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a detection list (JSON array of {label, box_2d})
    Classify {
        /// Path to the detection JSON file
        input_file: PathBuf,

        /// Use local rules only, even if GEMINI_API_KEY is set
        #[arg(long)]
        offline: bool,

        /// Custom material rule file(s)
        #[arg(short, long = "rules", value_name = "FILE")]
        rules: Vec<PathBuf>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Show the local classification of one or more labels
    Inspect {
        /// Item labels, e.g. "plastic bag"
        #[arg(required = true)]
        labels: Vec<String>,

        /// Custom material rule file(s)
        #[arg(short, long = "rules", value_name = "FILE")]
        rules: Vec<PathBuf>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Ask the external service for a markdown report on a detection list
    Analyze {
        /// Path to the detection JSON file
        input_file: PathBuf,
    },
    /// Inspect built-in rule tables and validate custom rule files
    Rules {
        #[command(subcommand)]
        action: RulesAction,
    },
}

#[derive(Subcommand)]
enum RulesAction {
    /// List built-in rule tables
    List,
    /// Print a built-in rule table
    Explain {
        /// Table name (e.g., "material")
        table: String,
    },
    /// Print the custom rule file schema with an example
    Schema,
    /// Validate a custom rule file
    Validate {
        /// Path to JSON rule file
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    ecosort_core::config::load_dotenv();

    let result = match cli.command {
        Commands::Classify {
            input_file,
            offline,
            rules,
            output,
        } => commands::classify::run(input_file, rules, offline, &output, cli.verbose),
        Commands::Inspect {
            labels,
            rules,
            output,
        } => commands::inspect::run(&labels, rules, &output),
        Commands::Analyze { input_file } => commands::analyze::run(input_file),
        Commands::Rules { action } => match action {
            RulesAction::List => commands::rules::list(),
            RulesAction::Explain { table } => commands::rules::explain(&table),
            RulesAction::Schema => commands::rules::schema(),
            RulesAction::Validate { file } => commands::rules::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

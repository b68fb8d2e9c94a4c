//! sheetgrade CLI: parse question papers and answer keys, grade submissions.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(
    name = "sheetgrade",
    version,
    about = "Parse answer sheets and grade submissions"
)]
struct Cli {
    /// Log parser and grading decisions
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a question paper into numbered questions
    Questions {
        /// Text extracted from the question paper
        #[arg(long)]
        input: PathBuf,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Parse an answer key
    Answers {
        /// Text extracted from the answer key
        #[arg(long)]
        input: PathBuf,

        /// Reduce answers like "B. Paris" to their option letter
        #[arg(long)]
        cleanup: bool,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Parse a SET A / SET B / SET C answer table
    MultiSet {
        /// Text extracted from the answer table
        #[arg(long)]
        input: PathBuf,

        /// Only show this set (e.g. "SET B")
        #[arg(long)]
        set: Option<String>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Grade a submission against an answer key
    Grade(commands::grade::GradeArgs),

    /// Check that a question paper and answer key line up
    Validate {
        /// Text extracted from the question paper
        #[arg(long)]
        questions: PathBuf,

        /// Text extracted from the answer key
        #[arg(long)]
        answers: PathBuf,
    },

    /// Create a starter sheetgrade.toml
    Init,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "sheetgrade=debug"
    } else {
        "sheetgrade=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Questions { input, format } => commands::questions::execute(input, format),
        Commands::Answers {
            input,
            cleanup,
            format,
        } => commands::answers::execute(input, cleanup, format),
        Commands::MultiSet { input, set, format } => {
            commands::multi_set::execute(input, set, format)
        }
        Commands::Grade(args) => commands::grade::execute(args),
        Commands::Validate { questions, answers } => {
            commands::validate::execute(questions, answers)
        }
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

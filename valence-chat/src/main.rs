//! valence-chat: interactive interviewer about what a concept is
//!
//! Asks a respondent what a concept (or a named individual) is, whether it
//! is good or bad, how common it is, and which instances it has. Questions
//! are printed to stdout, answers read one per line from stdin, and the
//! conversation is appended to a transcript file under the data directory.
//!
//! Type `q` (or close the input) to end the session.

mod config;
mod transcript;

use std::path::PathBuf;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::Config;
use transcript::{session_id_now, FileTranscript};
use valence_core::{load_templates, Session, SessionOutcome};

#[derive(Parser)]
#[command(name = "valence-chat")]
#[command(about = "Interview a respondent about a concept's definition, valence and prevalence")]
struct Cli {
    /// Concept (or individual's name) to talk about
    concept: String,

    /// Treat the concept as a named individual
    #[arg(short, long)]
    individual: bool,

    /// Path to configuration file
    #[arg(short, long, default_value = "valence-chat.toml")]
    config: String,

    /// Template language (overrides config file)
    #[arg(short, long, env = "VALENCE_LANG")]
    lang: Option<String>,

    /// Data directory for transcripts
    #[arg(short, long, env = "VALENCE_DATA_DIR")]
    data_dir: Option<String>,

    /// Template file (defaults to <static_dir>/<lang>/verbalisations.txt)
    #[arg(short, long)]
    templates: Option<PathBuf>,

    /// Seed for question sampling
    #[arg(long)]
    seed: Option<u64>,

    /// Allow the same phrasing to be used more than once
    #[arg(long)]
    allow_repeats: bool,

    /// Session id used in the transcript file name
    #[arg(long)]
    session_id: Option<String>,
}

/// `RUST_LOG` plus info-level output from both the binary and the engine.
fn log_filter() -> anyhow::Result<EnvFilter> {
    Ok(EnvFilter::from_default_env()
        .add_directive("valence_chat=info".parse()?)
        .add_directive("valence_core=info".parse()?))
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never interleave with the conversation
    tracing_subscriber::fmt()
        .with_env_filter(log_filter()?)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    info!("Config file: {}", cli.config);
    let mut config = Config::load(std::path::Path::new(&cli.config))?;

    // Apply CLI overrides
    if let Some(lang) = cli.lang {
        config.chat.lang = lang;
    }
    if let Some(data_dir) = cli.data_dir {
        config.chat.data_dir = PathBuf::from(data_dir);
    }
    if let Some(seed) = cli.seed {
        config.dialogue.seed = Some(seed);
    }
    if cli.allow_repeats {
        config.dialogue.disallow_repeats = false;
    }

    let templates_path = cli
        .templates
        .unwrap_or_else(|| config.chat.templates_path());
    let store = load_templates(&templates_path)?;
    if store.is_empty() {
        warn!(path = %templates_path.display(), "No templates loaded, nothing can be asked");
    }

    let session_id = cli.session_id.unwrap_or_else(session_id_now);
    let transcript = FileTranscript::open(&config.chat.transcript_dir(), &session_id)?;
    info!(
        lang = %config.chat.lang,
        transcript = %transcript.path().display(),
        "Starting valence-chat"
    );

    let mut session = Session::new(store, config.dialogue.clone(), transcript);
    let stdin = std::io::stdin();
    let outcome = session.converse(&cli.concept, cli.individual, stdin.lock(), std::io::stdout())?;

    match outcome {
        SessionOutcome::EndedByRespondent { answers } => {
            info!(answers, "Respondent ended the conversation");
        }
        SessionOutcome::OutOfQuestions { answers } => {
            info!(answers, "Ran out of questions");
        }
    }

    if let Some(frame) = session.controller().current_frame() {
        info!(frame = %frame.name, satisfied = frame.is_satisfied(), "Final frame");
    }

    Ok(())
}

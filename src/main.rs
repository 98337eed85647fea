use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use quiz_session::{
    load_or_demo, logging, protocol::DEFAULT_PORT, BankSource, Quiz, QuizError, RandomShuffler,
    DEFAULT_ANSWERS_PATH, DEFAULT_QUESTIONS_PATH,
};
use tracing::error;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Question blocks file (question line, then "A. option" lines)
    #[arg(short, long, global = true, default_value = DEFAULT_QUESTIONS_PATH)]
    questions: PathBuf,

    /// Answer key file, one label per line
    #[arg(short, long, global = true, default_value = DEFAULT_ANSWERS_PATH)]
    answers: PathBuf,

    /// JSON question bank to use instead of the text files
    #[arg(long, global = true, conflicts_with_all = ["questions", "answers"])]
    json: Option<PathBuf>,

    /// Seed for a reproducible question order
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Write diagnostics here instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Host the quiz for one remote player over WebSocket
    Serve {
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,
    },
    /// Play a quiz hosted elsewhere
    Connect {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,
    },
}

impl Args {
    fn source(&self) -> BankSource {
        match &self.json {
            Some(path) => BankSource::Json(path.clone()),
            None => BankSource::Text {
                questions: self.questions.clone(),
                answers: self.answers.clone(),
            },
        }
    }

    fn shuffler(&self) -> RandomShuffler {
        self.seed.map_or_else(RandomShuffler::new, RandomShuffler::seeded)
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = logging::init(args.log_file.as_deref()) {
        eprintln!("Cannot open log file: {}", e);
        return ExitCode::FAILURE;
    }

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "quiz exited with error");
            eprintln!("Error running quiz: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), QuizError> {
    match &args.command {
        None => {
            let bank = load_or_demo(&args.source());
            Quiz::from_bank(bank, args.shuffler()).run()
        }
        Some(Command::Serve { port }) => {
            let bank = load_or_demo(&args.source());
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(quiz_session::server::run(*port, bank, args.shuffler()))
        }
        Some(Command::Connect { host, port }) => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(quiz_session::client::run(host.clone(), *port))
        }
    }
}

//! Diagnostic tracing.
//!
//! Reads `RUST_LOG`, defaulting to `warn`. Output goes to stderr, or to a
//! file when one is given; the full-screen quiz should always log to a file
//! since stderr shares the terminal with the alternate screen.
//!
//! ```bash
//! RUST_LOG=quiz_session=debug quiz-session --log-file quiz.log
//! ```

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init(log_file: Option<&Path>) -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let (file_layer, stderr_layer) = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let layer = fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .compact();
            (Some(layer), None)
        }
        None => (None, Some(fmt::layer().with_writer(io::stderr).compact())),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();
    Ok(())
}

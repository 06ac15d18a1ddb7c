//! TextEdit - A minimal plain-text editor for the terminal.
//!
//! # Usage
//!
//! ```bash
//! textedit
//! textedit notes.txt
//! textedit --log-file textedit.log notes.txt
//! ```

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use textedit::app::App;
use textedit::config::EditorConfig;

/// A minimal plain-text editor for the terminal
#[derive(Parser, Debug)]
#[command(name = "textedit", version, about, long_about = None)]
struct Cli {
    /// Text file to open
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Write log events to a file (filtered by RUST_LOG, default info)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

/// Logs go to a file only; the terminal belongs to the editor.
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(tracing::Level::INFO.into())
                .from_env_lossy(),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    // Verify file exists
    if let Some(file) = &cli.file {
        if !file.exists() {
            anyhow::bail!("File not found: {}", file.display());
        }
    }

    let mut app = App::new(EditorConfig::default()).with_initial_file(cli.file);

    app.run().context("Application error")
}

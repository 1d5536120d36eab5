use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use practice_report::{
    create_router, render_prompt, render_text, AppState, ClientFactory, Config, GenerationStatus,
    PracticeSession, ReportGenerator, ReportSource, ReportStore, SessionConfig,
    StorageBackendFactory, TranscriptMessage,
};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "practice-report", version, about = "Speaking practice reports from conversation transcripts")]
struct Cli {
    /// Config file (extension optional)
    #[arg(long, default_value = "config/practice-report")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API
    Serve,

    /// Generate (or reuse) the report for a transcript file
    Generate {
        /// JSON array of transcript messages
        #[arg(long)]
        transcript: PathBuf,

        /// Session length in minutes (defaults to the transcript span)
        #[arg(long)]
        duration: Option<u32>,

        /// Session whose stored report is reused (defaults to the transcript file name)
        #[arg(long)]
        session: Option<String>,

        /// Print the report as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print the prompt that would be sent for a transcript file
    Prompt {
        #[arg(long)]
        transcript: PathBuf,

        #[arg(long, default_value_t = 0)]
        duration: u32,
    },

    /// Show the latest stored report
    Show {
        #[arg(long, default_value = "default")]
        session: String,
    },

    /// List stored reports
    List {
        #[arg(long, default_value = "default")]
        session: String,
    },

    /// Delete stored reports
    Clear {
        #[arg(long, default_value = "default")]
        session: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = Config::load(&cli.config)?;

    match cli.command {
        Command::Serve => serve(cfg).await,
        Command::Generate {
            transcript,
            duration,
            session,
            json,
        } => generate(cfg, &transcript, duration, session, json).await,
        Command::Prompt {
            transcript,
            duration,
        } => {
            let messages = load_transcript(&transcript)?;
            println!("{}", render_prompt(&messages, duration));
            Ok(())
        }
        Command::Show { session } => {
            match open_store(&cfg, session)?.latest() {
                Some(report) => print!("{}", render_text(&report)),
                None => println!("No report stored"),
            }
            Ok(())
        }
        Command::List { session } => {
            let reports = open_store(&cfg, session)?.list();
            println!("{}", serde_json::to_string_pretty(&reports)?);
            Ok(())
        }
        Command::Clear { session } => {
            let store = open_store(&cfg, session)?;
            store.clear();
            info!("Cleared {}", store.collection());
            Ok(())
        }
    }
}

async fn serve(cfg: Config) -> Result<()> {
    info!("{} v{}", cfg.service.name, env!("CARGO_PKG_VERSION"));

    let client = ClientFactory::create(&cfg.model)?;
    let backend = StorageBackendFactory::create(&cfg.storage)?;
    let state = AppState::new(
        ReportGenerator::new(client),
        backend,
        cfg.storage.collection.clone(),
    );

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("HTTP server listening on {}", addr);
    axum::serve(listener, create_router(state))
        .await
        .context("HTTP server failed")?;

    Ok(())
}

async fn generate(
    cfg: Config,
    transcript_path: &Path,
    duration: Option<u32>,
    session_id: Option<String>,
    json: bool,
) -> Result<()> {
    let messages = load_transcript(transcript_path)?;
    let session_id = session_id.unwrap_or_else(|| session_for(transcript_path));
    if messages.is_empty() {
        anyhow::bail!("No transcript found in {}", transcript_path.display());
    }

    let generator = ReportGenerator::new(ClientFactory::create(&cfg.model)?);
    let backend = StorageBackendFactory::create(&cfg.storage)?;
    let session = PracticeSession::new(
        SessionConfig::new(session_id, &cfg.storage.collection),
        backend,
    );
    session.record_all(messages).await;

    let (status_tx, mut status_rx) = mpsc::unbounded_channel::<GenerationStatus>();
    let progress = tokio::spawn(async move {
        while let Some(status) = status_rx.recv().await {
            eprintln!("[{:>3}%] {}", status.progress, status.message);
        }
    });

    let result = session.report(&generator, None, duration, Some(&status_tx)).await;
    drop(status_tx);
    let _ = progress.await;

    let (report, source) = result?;
    if source == ReportSource::Stored {
        eprintln!(
            "Showing the report already stored for session '{}'. Run `clear --session {}` to generate a new one.",
            session.id(),
            session.id()
        );
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_text(&report));
    }

    Ok(())
}

/// Session id derived from a transcript path, e.g. `demos/transcript.json` → `transcript`
fn session_for(transcript_path: &Path) -> String {
    transcript_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| "default".to_string())
}

fn load_transcript(path: &Path) -> Result<Vec<TranscriptMessage>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read transcript {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse transcript {}", path.display()))
}

fn open_store(cfg: &Config, session_id: String) -> Result<ReportStore> {
    let backend = StorageBackendFactory::create(&cfg.storage)?;
    let session = SessionConfig::new(session_id, &cfg.storage.collection);
    Ok(ReportStore::new(backend, session.collection))
}

//! Weekhours - Business hours editor
//!
//! Reads form edits as JSON lines on stdin, e.g.
//! `{"op": "open", "day": "monday"}`, groups open days as they change,
//! and prints the submitted business hours as JSON when input ends.

use anyhow::{Context, Result};
use chrono::Datelike;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use weekhours::{Config, Day, EditorSession, FormEdit, FormStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    let dotenv_loaded = if std::path::Path::new(".env").exists() {
        dotenvy::dotenv()?;
        true
    } else {
        false
    };

    let config = Config::load()?;

    // Initialize logging; stdout is reserved for the submitted value
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if dotenv_loaded {
        info!("Loaded environment variables from .env file");
    }
    info!("Weekhours starting...");
    info!("Debounce window: {}ms", config.editor.debounce_ms);

    let (form, changes) = FormStore::new();
    let (edit_tx, edit_rx) = mpsc::channel(64);
    let reader = tokio::spawn(read_edits(edit_tx));

    let session = EditorSession::new(form.clone())
        .run(edit_rx, changes, config.editor.debounce())
        .await;
    reader.await.context("Edit reader task failed")??;

    for (index, selection) in session.selections().iter().enumerate() {
        let has_break = session.has_break(index).unwrap_or(false);
        info!(
            "{}{}",
            selection.label(),
            if has_break { " (with break)" } else { "" }
        );
    }

    let today = Day::from(chrono::Local::now().weekday());
    match session.selection_for(today) {
        Some(selection) => info!("Today ({}) is covered by {}", today.label(), selection.label()),
        None => info!("Closed today ({})", today.label()),
    }

    let submitted = serde_json::to_string_pretty(&form.business_hours())
        .context("Failed to serialize business hours")?;
    println!("{}", submitted);

    info!("Weekhours shutting down");
    Ok(())
}

/// Forward stdin edit lines to the session until input ends
async fn read_edits(tx: mpsc::Sender<FormEdit>) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match serde_json::from_str::<FormEdit>(line) {
            Ok(edit) => {
                if tx.send(edit).await.is_err() {
                    break;
                }
            }
            Err(e) => warn!("Ignoring invalid edit {:?}: {}", line, e),
        }
    }

    Ok(())
}

//! Headless mode runner - main event loop without UI
//!
//! Interleaves stdin commands with completions from background fetch/save
//! tasks, and forwards every engine event to stdout.

use std::path::{Path, PathBuf};

use tokio::sync::{broadcast, mpsc};
use tracing::{error, info, warn};

use pagewright_app::{Engine, EngineEvent, LayoutStore, LoadStatus, Message};
use pagewright_core::prelude::*;

use super::command::HeadlessCommand;
use super::HeadlessEvent;

/// What woke the event loop
enum Next {
    Line(Option<String>),
    Message(Option<Message>),
}

/// Run in headless mode against the JSON file store
pub async fn run_headless(
    project_path: &Path,
    store_path: Option<PathBuf>,
    object_key: Option<String>,
) -> Result<()> {
    info!("═══════════════════════════════════════════════════════");
    info!("pagewright starting in HEADLESS mode");
    info!("Project: {}", project_path.display());
    info!("═══════════════════════════════════════════════════════");

    let mut engine = Engine::open(project_path, store_path);
    info!("Layout store: {}", engine.store().path().display());

    let result = run_session(&mut engine, object_key).await;

    info!("pagewright headless mode exiting");
    result
}

/// Drive one editing session until stdin closes
pub async fn run_session<S>(engine: &mut Engine<S>, object_key: Option<String>) -> Result<()>
where
    S: LayoutStore + Send + Sync + 'static,
{
    let mut events = engine.subscribe();

    if let Some(object_key) = object_key {
        select_and_wait(engine, object_key, &mut events).await;
    }

    let (line_tx, mut line_rx) = mpsc::channel::<String>(64);
    std::thread::spawn(move || {
        spawn_stdin_reader_blocking(line_tx);
    });

    loop {
        let next = tokio::select! {
            line = line_rx.recv() => Next::Line(line),
            msg = engine.msg_rx.recv() => Next::Message(msg),
        };

        match next {
            Next::Line(Some(line)) => handle_line(engine, &line, &mut events).await,
            Next::Line(None) => {
                info!("Stdin closed");
                if engine.state.save_status.is_saving() {
                    info!("Waiting for in-flight save");
                }
                engine.settle().await;
                forward_events(&mut events);
                break;
            }
            Next::Message(Some(msg)) => {
                engine.process_message(msg);
                forward_events(&mut events);
            }
            Next::Message(None) => {
                info!("Message channel closed");
                break;
            }
        }
    }

    Ok(())
}

async fn handle_line<S>(
    engine: &mut Engine<S>,
    line: &str,
    events: &mut broadcast::Receiver<EngineEvent>,
) where
    S: LayoutStore + Send + Sync + 'static,
{
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return;
    }

    let command = match HeadlessCommand::parse(trimmed) {
        Ok(command) => command,
        Err(e) => {
            warn!("Invalid stdin command {:?}: {}", trimmed, e);
            HeadlessEvent::error(format!("invalid command: {}", e), false).emit();
            return;
        }
    };

    match command {
        HeadlessCommand::Show => HeadlessEvent::layout(&engine.state).emit(),
        HeadlessCommand::Pool => HeadlessEvent::pool(&engine.state).emit(),
        HeadlessCommand::Select { object } => select_and_wait(engine, object, events).await,
        command => {
            let default_section = engine.state.model.registry().default_section().to_string();
            if let Some(msg) = command.into_message(&default_section) {
                engine.process_message(msg);
                forward_events(events);
            }
        }
    }
}

/// Select an object and block until its layout is loaded, so that
/// commands following a `select` see the fetched blocks and pool.
async fn select_and_wait<S>(
    engine: &mut Engine<S>,
    object_key: String,
    events: &mut broadcast::Receiver<EngineEvent>,
) where
    S: LayoutStore + Send + Sync + 'static,
{
    engine.process_message(Message::SelectObject { object_key });
    forward_events(events);

    while engine.state.load_status == LoadStatus::Loading {
        if !engine.process_next().await {
            break;
        }
        forward_events(events);
    }
}

/// Emit every pending engine event as NDJSON
fn forward_events(events: &mut broadcast::Receiver<EngineEvent>) {
    loop {
        match events.try_recv() {
            Ok(event) => HeadlessEvent::from_engine(event).emit(),
            Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                warn!("Dropped {} engine event(s)", skipped);
            }
            Err(_) => break,
        }
    }
}

/// Forward stdin lines to the event loop (blocking, runs on its own thread)
fn spawn_stdin_reader_blocking(line_tx: mpsc::Sender<String>) {
    use std::io::BufRead;

    let stdin = std::io::stdin();
    let reader = stdin.lock();

    for line in reader.lines() {
        match line {
            Ok(line) => {
                if line_tx.blocking_send(line).is_err() {
                    break;
                }
            }
            Err(e) => {
                error!("Failed to read stdin: {}", e);
                break;
            }
        }
    }

    info!("Stdin reader exiting");
}

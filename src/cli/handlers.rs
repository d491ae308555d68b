use std::future::Future;

use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::client::{GatewayError, NotesGateway};
use crate::config::{ClientConfig, ServerConfig};
use crate::entity::{timestamp, Note, NoteForm};
use crate::error::{NotekeeperError, Result};
use crate::logging;
use crate::server::{self, AppState};
use crate::storage::NoteStore;

const CLIENT_LOG_LEVEL: &str = "error";

fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    Ok(runtime.block_on(future))
}

fn gateway(config: &ClientConfig) -> Result<NotesGateway> {
    logging::init(CLIENT_LOG_LEVEL, false);
    Ok(NotesGateway::new(config)?)
}

pub fn handle_serve(config: ServerConfig, in_memory: bool) -> Result<()> {
    logging::init(&config.log_level, config.log_json);

    let store = if in_memory {
        tracing::warn!("using an in-memory store; notes are lost on exit");
        NoteStore::open_in_memory()?
    } else {
        NoteStore::open(&config.database)?
    };

    let mut state = AppState::new(store);
    if let Some(origin) = &config.cors_origin {
        state = state.with_cors_origin(origin)?;
    }
    let addr = config.bind_addr()?;

    block_on(async move {
        let listener = TcpListener::bind(addr).await?;

        let shutdown = CancellationToken::new();
        let trigger = shutdown.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    tracing::info!("shutdown requested");
                    trigger.cancel();
                }
                Err(e) => tracing::warn!("cannot listen for shutdown signal: {e}"),
            }
        });

        server::serve(listener, state, shutdown).await
    })?
}

pub fn handle_list(config: &ClientConfig, json: bool) -> Result<()> {
    let gateway = gateway(config)?;
    let notes = block_on(gateway.list_notes())??;

    if json {
        println!("{}", serde_json::to_string_pretty(&notes)?);
        return Ok(());
    }

    if notes.is_empty() {
        println!("No notes yet.");
        return Ok(());
    }
    for note in &notes {
        println!(
            "{:>4}  {}  (updated {})",
            note.id,
            note.title,
            timestamp::format(&note.updated_at)
        );
    }
    Ok(())
}

pub fn handle_get(config: &ClientConfig, id: i64, json: bool) -> Result<()> {
    let gateway = gateway(config)?;
    let note = block_on(gateway.get_note(id))??;
    print_note(&note, json)
}

pub fn handle_add(config: &ClientConfig, title: String, description: String, json: bool) -> Result<()> {
    let input = NoteForm::new(title, description)
        .submit()
        .map_err(NotekeeperError::InvalidInput)?;

    let gateway = gateway(config)?;
    let note = block_on(gateway.create_note(&input))??;

    if json {
        return print_note(&note, true);
    }
    println!("Created note {} - {}", note.id, note.title);
    Ok(())
}

pub fn handle_update(
    config: &ClientConfig,
    id: i64,
    title: String,
    description: String,
    json: bool,
) -> Result<()> {
    let input = NoteForm::new(title, description)
        .submit()
        .map_err(NotekeeperError::InvalidInput)?;

    let gateway = gateway(config)?;
    let note = block_on(gateway.update_note(id, &input))??;

    if json {
        return print_note(&note, true);
    }
    println!("Updated note {} - {}", note.id, note.title);
    Ok(())
}

pub fn handle_delete(config: &ClientConfig, id: i64) -> Result<()> {
    let gateway = gateway(config)?;
    block_on(gateway.delete_note(id))??;
    println!("Deleted note {}", id);
    Ok(())
}

fn print_note(note: &Note, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(note)?);
        return Ok(());
    }
    println!("#{} {}", note.id, note.title);
    println!("created {}", timestamp::format(&note.created_at));
    println!("updated {}", timestamp::format(&note.updated_at));
    println!();
    println!("{}", note.description);
    Ok(())
}

/// Render a failure for the terminal.
///
/// Validation problems are listed per field; everything else gets a single
/// line.
pub fn report_error(err: &NotekeeperError) -> String {
    match err {
        NotekeeperError::InvalidInput(fields) => {
            let lines: Vec<String> = fields
                .iter()
                .map(|e| format!("  {}: {}", e.field, e.message))
                .collect();
            format!("Error: please fix the following fields:\n{}", lines.join("\n"))
        }
        NotekeeperError::Gateway(gw) => report_gateway_error(gw),
        other => format!("Error: {}", other),
    }
}

fn report_gateway_error(err: &GatewayError) -> String {
    let fields = err.field_errors();
    if !fields.is_empty() {
        let lines: Vec<String> = fields
            .iter()
            .map(|(field, message)| format!("  {}: {}", field, message))
            .collect();
        return format!(
            "Error: the note store rejected the note:\n{}",
            lines.join("\n")
        );
    }
    if err.is_not_found() {
        return "Error: Note not found".to_string();
    }
    if err.is_transport() {
        return format!("Error: could not reach the note store ({})", err);
    }
    format!("Error: {}", err)
}

pub mod cli;
pub mod client;
pub mod config;
pub mod entity;
pub mod error;
pub mod logging;
pub mod server;
pub mod storage;

pub use client::{GatewayError, NotesGateway};
pub use entity::{Note, NoteForm, NoteInput};
pub use error::{NotekeeperError, Result};
pub use server::{build_router, AppState};
pub use storage::NoteStore;

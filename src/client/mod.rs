//! Client-side access to a running note store.

mod error;
mod gateway;

pub use error::GatewayError;
pub use gateway::NotesGateway;

//! HTTP front end for a single Texas Hold'em table.
//!
//! One [`table::Table`] lives behind a [`table::SharedTable`] handle that
//! every route receives; the mutex inside it serializes all game calls.

pub mod config;
pub mod dto;
pub mod errors;
pub mod handlers;
pub mod logging;
pub mod middleware;
pub mod server;
pub mod table;

pub use config::{ConfigError, ServerArgs, ServerConfig};
pub use dto::{Ack, ActionRequest, CardView, GameStateResponse, JoinRequest, PlayerStateView};
pub use errors::{ErrorResponse, ErrorSeverity, IntoErrorResponse};
pub use logging::{init_logging, LogEntry, TestLogSubscriber};
pub use middleware::{log_response, with_request_logging};
pub use server::{AppContext, ServerError, ServerHandle, WebServer};
pub use table::{SharedTable, Table, TableError};

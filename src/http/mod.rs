//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware: timeout, request ID, trace)
//!     → handlers.rs (trace-context extraction, orchestrator dispatch,
//!                    outcome → status mapping)
//!     → JSON response
//! ```

pub mod handlers;
pub mod server;

pub use server::{AppState, HttpServer};

//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Telemetry → Clients → Start listener
//!
//! Shutdown (shutdown.rs):
//!     Ctrl-C → Stop accepting → Drain in-flight requests
//!     → Flush telemetry → Exit
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, telemetry second, listener last
//! - Telemetry is flushed after the server stops, never before

pub mod shutdown;

pub use shutdown::Shutdown;

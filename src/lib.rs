//! Payment authorization orchestrator.
//!
//! A single synchronous decision path: validate the inbound payment request,
//! look up the product, ask the authorization service to clear the amount,
//! and answer, with one tracing span and one counter increment describing
//! every outcome.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │            PAYMENT ORCHESTRATOR              │
//!                    │                                              │
//!  POST /process_payment  ┌────────┐     ┌──────────────┐           │
//!  ───────────────────────┼▶ http  │────▶│ orchestrator │           │
//!                    │    │ server │     │    core      │           │
//!                    │    └────────┘     └──────┬───────┘           │
//!                    │                          │                   │
//!                    │              ┌───────────┴───────────┐       │
//!                    │              ▼                       ▼       │
//!                    │      ┌──────────────┐       ┌──────────────┐ │     product
//!                    │      │   product    │       │authorization │─┼──── catalog /
//!                    │      │   client     │       │   client     │ │     authorizer
//!                    │      └──────────────┘       └──────────────┘ │
//!                    │                                              │
//!                    │  ┌────────────────────────────────────────┐  │
//!                    │  │         Cross-Cutting Concerns         │  │
//!                    │  │  ┌────────┐ ┌───────────┐ ┌─────────┐  │  │
//!                    │  │  │ config │ │ telemetry │ │lifecycle│  │  │
//!                    │  │  └────────┘ └───────────┘ └─────────┘  │  │
//!                    │  └────────────────────────────────────────┘  │
//!                    └──────────────────────────────────────────────┘
//! ```

// Core subsystems
pub mod clients;
pub mod config;
pub mod http;
pub mod orchestrator;

// Cross-cutting concerns
pub mod lifecycle;
pub mod telemetry;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use orchestrator::PaymentOrchestrator;
pub use telemetry::Telemetry;

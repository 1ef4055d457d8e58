//! Downstream service clients.
//!
//! # Data Flow
//! ```text
//! orchestrator
//!     → product.rs        GET /get_product?product_id=...  → ProductInfo
//!     → authorization.rs  GET /authorize                   → authorized: bool
//!
//! both: caller's trace context + baggage injected into outbound headers
//! ```
//!
//! # Design Decisions
//! - One shared reqwest::Client handle (connection pool) cloned per client
//! - All-or-nothing results; no partial data on failure
//! - No retries: a failed call is terminal for the whole request

pub mod authorization;
pub mod product;
pub mod types;

pub use authorization::AuthorizationClient;
pub use product::ProductClient;
pub use types::{ClientError, ClientResult, ProductInfo};

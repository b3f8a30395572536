//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, tracing, timeout)
//!     → middleware/locale.rs (route: pass through or redirect)
//!         ├── RedirectTo  → response.rs (307 + Location)
//!         └── Continue    → handlers.rs (/api/health, /api/locale/{code})
//!                         → server.rs proxy_handler (forward to upstream)
//!     → Send to client
//! ```

pub mod handlers;
pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use request::{IncomingRequest, MakeRequestUuidV4, X_LOCALE, X_REQUEST_ID, X_TEXT_DIRECTION};
pub use server::{AppState, HttpServer, ServerError};

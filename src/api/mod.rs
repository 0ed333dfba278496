//! # API Module
//!
//! HTTP handlers for the trigger server.
//!
//! ## Endpoints
//!
//! - [`curate`] - `GET /` runs one curation pass and answers with the number
//!   of tracks written, as plain text. `?test=1` limits the followed-artist
//!   source to a single artist. Failures answer 500 with the error message.
//! - [`health`] - `GET /health` answers with status and version.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use stridecli::api::{curate, health};
//!
//! let app = Router::new()
//!     .route("/", get(curate))
//!     .route("/health", get(health));
//! ```

mod curate;
mod health;

pub use curate::{CurateQuery, curate};
pub use health::health;

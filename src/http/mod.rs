//! HTTP server module for the asteroid ranging service.
//!
//! This module provides an axum-based HTTP server exposing the ranging
//! workflow as a REST API: submit a calculation, get `202 Accepted`
//! immediately, and poll its delivery state while the real result travels
//! to the submitted callback URL.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                              │
//! │  - Request parsing and presence validation               │
//! │  - JSON serialization/deserialization                    │
//! │  - CORS, tracing, error handling                         │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Service Layer (services/)                               │
//! │  - Bounded dispatch and background calculation           │
//! │  - Callback delivery and state tracking                  │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Algorithms (algorithms/)                                │
//! │  - Haversine separation, pairwise triangulation, median  │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;

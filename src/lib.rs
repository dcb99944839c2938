//! # ARS Rust Backend
//!
//! Asteroid Ranging Service.
//!
//! This crate estimates the distance to a small celestial body from a batch
//! of angular sky observations (right ascension/declination plus date) and
//! reports the result asynchronously to the submitting system via an HTTP
//! callback. The submitter receives `202 Accepted` immediately; the actual
//! outcome only ever arrives at its callback URL.
//!
//! ## Features
//!
//! - **Ranging**: haversine angular separation plus multi-pair triangulation
//!   with median aggregation
//! - **Async orchestration**: bounded background execution with a randomized
//!   pre-computation delay and exactly one delivery attempt per request
//! - **Delivery tracking**: per-request lifecycle state observable through
//!   the HTTP API
//! - **HTTP API**: axum-based endpoints for submitting calculations and
//!   polling their delivery state
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`algorithms`]: pure distance-estimation math
//! - [`models`]: observation parsing and domain types
//! - [`services`]: dispatcher, background calculation task, callback client,
//!   and delivery tracker
//! - [`http`]: axum-based HTTP server and request handlers
//! - [`config`]: environment-driven service configuration

pub mod algorithms;
pub mod config;
pub mod http;
pub mod models;
pub mod services;

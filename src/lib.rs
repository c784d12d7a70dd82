//! # medsched
//!
//! Provider availability and appointment slot scheduling backend.
//!
//! This crate materializes a provider's recurring weekly availability
//! (working days, daily hours, break, appointment duration) into concrete
//! bookable time slots over a date range, tracks per-day availability, and
//! records bookings. It backs the patient/doctor portal's calendar and
//! booking flows over a REST API.
//!
//! ## Features
//!
//! - **Slot Generation**: Weekly pattern to per-day slot lists, with break
//!   exclusion and replace-on-regenerate semantics
//! - **Booking**: Idempotent Available-to-Booked transitions with receipts
//! - **Persistence**: Flat `{date -> [{time, status}]}` snapshots behind a
//!   repository abstraction (in-memory or JSON files)
//! - **HTTP API**: Axum-based REST endpoints for the portal frontend
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Domain types and validation (availability, ranges, slots)
//! - [`scheduler`]: The schedule engine itself
//! - [`db`]: Repository pattern and persistence layer
//! - [`services`]: Business logic over engines and repositories, including
//!   the per-provider locking discipline
//! - [`http`]: Axum-based HTTP server and request handlers

pub mod api;

pub mod db;
pub mod models;

pub mod scheduler;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;

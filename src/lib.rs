//! Hive management: create, read, update and soft-delete physical storage
//! areas ("hives") and their sections, with code uniqueness and lifecycle
//! validation. Every mutation is attributed to the acting user.
//!
//! The `data` feature builds the domain, persistence and service layers. The
//! `server` feature adds the JSON routes used by the binary.

#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod dto;
#[cfg(feature = "data")]
mod error_conversions;
#[cfg(feature = "data")]
pub mod forms;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "data")]
pub mod schema;
#[cfg(feature = "data")]
pub mod services;

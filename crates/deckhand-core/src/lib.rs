//! Deckhand Core - Domain types and port definitions
//!
//! This crate contains the hexagonal architecture core with:
//! - **Domain entities** - `Instance`, `Folder`, `InstanceUpdate`
//! - **Port definitions** - Traits for adapters: `IConsoleApi`, `INotifier`
//! - **Configuration** - YAML-backed `Config` with validation and a builder
//!
//! # Architecture
//!
//! The domain module holds plain data with no I/O. Ports define the trait
//! interfaces that the state layer depends on and that adapter crates
//! (the HTTP client, the toast queue) implement.

pub mod config;
pub mod domain;
pub mod ports;

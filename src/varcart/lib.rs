//! # Varcart Architecture
//!
//! Varcart is a **UI-agnostic product variant engine**. Given the attribute
//! types chosen for a product (`Size`, `Color`, ...) and the values chosen for
//! each, it builds the Cartesian product of those values as a table of priced,
//! stocked rows. The table stays in sync as the selection changes, and price
//! and stock typed into a row survive as long as its combination does.
//!
//! It is a library that happens to have a CLI client, not the other way round.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs, args.rs, print.rs)                     │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - Installs the tracing subscriber                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs) + EditSession (session.rs)              │
//! │  - Thin facade over commands                                │
//! │  - Session owns one product's selection and row table       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - generate, reconcile, select, edit: pure snapshots        │
//! │  - catalog, product, config: read and write via the store   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract DataStore trait                                 │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Data Flow
//!
//! ```text
//! Catalog + SelectionState ──generate──► combinations
//!                                             │
//!                 previous rows ──reconcile───┘──► new rows ──save──► variations
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes plain Rust arguments, returns plain Rust
//! types, and never writes to stdout/stderr. Diagnostics go through `tracing`;
//! only the binary installs a subscriber.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`session`]: Editing session for one product's variant table
//! - [`commands`]: Engine and store-backed commands
//! - [`selection`]: Selected types and values
//! - [`table`]: Combinations, rows and editable fields
//! - [`variations`]: Stored `variations` format and its mapping to the table
//! - [`model`]: Attribute catalog and products
//! - [`store`]: Storage abstraction and implementations
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod selection;
pub mod session;
pub mod store;
pub mod table;
pub mod variations;

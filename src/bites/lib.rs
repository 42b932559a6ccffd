//! # Bites Architecture
//!
//! Bites is a personal restaurant guide: a list of favourite places with
//! ratings, coordinates and contact details, kept in local storage, with
//! place search backed by a remote places service. It is a library with a
//! CLI client, not the other way round.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders results, prompts, exit codes   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade, raw tokens → selectors, config defaults     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One module per screen action, returns CmdResult          │
//! └─────────────────────────────────────────────────────────────┘
//!                 │                              │
//!                 ▼                              ▼
//! ┌───────────────────────────────┐ ┌───────────────────────────┐
//! │  Storage (store/)             │ │  Places (places/)         │
//! │  KeyValueStore: FsKv, MemKv   │ │  PlacesTransport: Http,   │
//! │  RecordStore: one JSON blob   │ │  Fake; SuggestionList     │
//! └───────────────────────────────┘ └───────────────────────────┘
//! ```
//!
//! ## State
//!
//! Nothing is global. The form being filled in ([`form::RestaurantForm`]),
//! the open suggestion list ([`places::SuggestionList`]) and the map focus
//! ([`commands::map::MapFocus`]) are plain values passed into commands.
//!
//! ## Consistency
//!
//! The whole collection is one value under one key. Reads hand back a
//! [`store::records::Revision`]; writes made from a read only land if the
//! stored data is still at that revision. Lookups that lose a race are
//! dropped by generation tickets rather than overwriting newer results.
//!
//! ## Testing Strategy
//!
//! 1. **Commands**: unit tests against `MemKv` and `FakeTransport`. Most
//!    tests live here.
//! 2. **API**: dispatch and config defaults.
//! 3. **CLI**: `tests/` drives the built binary against a temp data dir.
//!
//! ## Module Overview
//!
//! - [`api`]: facade, entry point for all operations
//! - [`commands`]: screen actions
//! - [`store`]: key-value storage and the record collection
//! - [`places`]: autocomplete and details lookups
//! - [`form`]: add/edit form state and validation
//! - [`selector`]: naming records by id or position
//! - [`model`]: `RestaurantRecord`, `Coordinates`, sample data
//! - [`config`]: layered configuration
//! - [`logging`]: tracing subscriber setup
//! - [`clipboard`]: system clipboard
//! - [`error`]: error types

pub mod api;
pub mod clipboard;
pub mod commands;
pub mod config;
pub mod error;
pub mod form;
pub mod logging;
pub mod model;
pub mod places;
pub mod selector;
pub mod store;

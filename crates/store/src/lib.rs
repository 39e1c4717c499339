//! Record store client for Wholesome Wellness Way.
//!
//! Every read and write the site performs is a direct passthrough to one of
//! two remote tables, `ads` and `web_results`. This crate provides:
//!
//! - [`RecordStore`] - the table-oriented port (select, single-row select,
//!   insert, update by id, delete by id)
//! - [`PostgrestStore`] - adapter for a PostgREST-compatible API such as the
//!   one Supabase exposes
//! - [`MemoryStore`] - in-process adapter for tests and local runs
//! - [`AdRepository`] and [`WebResultRepository`] - typed queries used by the
//!   storefront and admin binaries
//! - [`StoreConfig`] - adapter selection from `RECORD_STORE_*` variables

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod memory;
pub mod postgrest;
pub mod query;
pub mod repository;
pub mod store;

pub use config::{BackendKind, ConfigError, StoreConfig};
pub use error::StoreError;
pub use memory::{CALL_LOG_LIMIT, MemoryStore, StoreCall};
pub use postgrest::{PostgrestConfig, PostgrestStore};
pub use query::{Filter, Order, Query, Table};
pub use repository::{AdRepository, WebResultRepository};
pub use store::RecordStore;
